//! Login form state

/// Focusable rows of the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
    Submit,
}

impl LoginField {
    pub fn next(&self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Submit,
            Self::Submit => Self::Username,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Username => Self::Submit,
            Self::Password => Self::Username,
            Self::Submit => Self::Password,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub active_field: LoginField,
    pub username_error: Option<String>,
    pub password_error: Option<String>,
    /// Set while the login call is in flight
    pub is_loading: bool,
}

impl LoginForm {
    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.prev();
    }

    pub fn push_char(&mut self, c: char) {
        match self.active_field {
            LoginField::Username => {
                self.username.push(c);
                self.username_error = None;
            }
            LoginField::Password => {
                self.password.push(c);
                self.password_error = None;
            }
            LoginField::Submit => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.active_field {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
            LoginField::Submit => {}
        }
    }

    /// Check required inputs before calling the backend
    pub fn validate(&mut self) -> bool {
        self.username_error = self
            .username
            .trim()
            .is_empty()
            .then(|| "Email is required".to_string());
        self.password_error = self
            .password
            .is_empty()
            .then(|| "Password is required".to_string());
        self.username_error.is_none() && self.password_error.is_none()
    }

    /// Password rendered as bullets
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_cycle() {
        let mut form = LoginForm::default();
        form.next_field();
        assert_eq!(form.active_field, LoginField::Password);
        form.next_field();
        form.next_field();
        assert_eq!(form.active_field, LoginField::Username);
        form.prev_field();
        assert_eq!(form.active_field, LoginField::Submit);
    }

    #[test]
    fn test_typing_goes_to_active_field() {
        let mut form = LoginForm::default();
        form.push_char('a');
        form.next_field();
        form.push_char('b');
        form.push_char('c');
        form.pop_char();
        assert_eq!(form.username, "a");
        assert_eq!(form.password, "b");
    }

    #[test]
    fn test_validate_requires_both() {
        let mut form = LoginForm::default();
        assert!(!form.validate());
        assert_eq!(form.username_error.as_deref(), Some("Email is required"));
        assert_eq!(form.password_error.as_deref(), Some("Password is required"));

        form.username = "testuser".into();
        form.password = "password123".into();
        assert!(form.validate());
        assert!(form.username_error.is_none());
    }

    #[test]
    fn test_typing_clears_field_error() {
        let mut form = LoginForm::default();
        form.validate();
        form.push_char('t');
        assert!(form.username_error.is_none());
        assert!(form.password_error.is_some());
    }

    #[test]
    fn test_masked_password() {
        let form = LoginForm {
            password: "abc".into(),
            ..LoginForm::default()
        };
        assert_eq!(form.masked_password(), "•••");
    }
}
