//! Application state definitions

use super::forms::{FormData, SendMoneySession};
use super::login_form::LoginForm;
use crate::locale::Language;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Splash screen with progress bar
    #[default]
    Splash,
    Login,
    Home,
    SendMoney,
    Confirmation,
    History,
    Profile,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Splash => "",
            Self::Login => "Login",
            Self::Home => "Home",
            Self::SendMoney => "Send Money",
            Self::Confirmation => "Confirm Transfer",
            Self::History => "History",
            Self::Profile => "Profile",
        }
    }

    /// Views reachable from the sidebar
    pub fn has_sidebar(&self) -> bool {
        matches!(self, Self::Home | Self::History | Self::Profile)
    }
}

/// Async load progress of a piece of screen data
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> LoadState<T> {
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

/// Wallet balance
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub balance: f64,
    pub currency: String,
}

impl Balance {
    pub fn formatted(&self) -> String {
        format!("${:.2}", self.balance)
    }
}

/// Backend answer to a form submission
#[derive(Debug, Clone, PartialEq)]
pub struct SendMoneyResponse {
    pub transaction_id: String,
    pub status: String,
    pub message: String,
    pub recipient_name: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Backend answer to a confirmed transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionConfirmation {
    pub transaction_id: String,
    pub recipient_name: String,
    pub amount: f64,
    pub note: Option<String>,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

/// Completed or attempted transfer shown in history
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub recipient_name: String,
    pub amount: f64,
    pub note: Option<String>,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(recipient_name: &str, amount: f64, note: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            recipient_name: recipient_name.to_string(),
            amount,
            note,
            date: Utc::now(),
            status: TransactionStatus::Completed,
        }
    }

    pub fn formatted_amount(&self) -> String {
        format!("-${:.2}", self.amount)
    }

    pub fn formatted_date(&self) -> String {
        self.date.with_timezone(&Local).format("%b %d, %Y").to_string()
    }

    pub fn formatted_status(&self) -> String {
        self.status.name().replace('_', " ")
    }

    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Saved,
    Submitted,
    Completed,
    Failed,
}

impl RequestStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Saved => "SAVED",
            Self::Submitted => "SUBMITTED",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

/// A send-money request kept in history
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRequest {
    pub id: String,
    pub service_name: String,
    pub provider_name: String,
    pub amount: f64,
    pub form_data: FormData,
    pub timestamp: DateTime<Utc>,
    pub status: RequestStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedRequestJson<'a> {
    request_id: &'a str,
    service_name: &'a str,
    provider_name: &'a str,
    amount: f64,
    currency: &'static str,
    timestamp: String,
    status: &'static str,
    form_data: &'a FormData,
}

impl SavedRequest {
    pub fn formatted_amount(&self) -> String {
        format!("{:.2} AED", self.amount)
    }

    pub fn formatted_date(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%b %d, %Y %H:%M")
            .to_string()
    }

    /// Pretty-printed JSON rendering for the details dialog
    pub fn to_formatted_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&SavedRequestJson {
            request_id: &self.id,
            service_name: &self.service_name,
            provider_name: &self.provider_name,
            amount: self.amount,
            currency: "AED",
            timestamp: self
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            status: self.status.name(),
            form_data: &self.form_data,
        })
    }
}

/// Transfer awaiting confirmation, carried from the send-money form
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransfer {
    pub recipient_name: String,
    pub amount: f64,
    pub note: Option<String>,
    pub service_name: String,
    pub provider_name: String,
    pub form_data: FormData,
}

impl PendingTransfer {
    pub fn formatted_amount(&self) -> String {
        format!("${:.2}", self.amount)
    }
}

/// Tabs of the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryTab {
    #[default]
    SavedRequests,
    Transactions,
}

impl HistoryTab {
    pub fn toggle(&self) -> Self {
        match self {
            Self::SavedRequests => Self::Transactions,
            Self::Transactions => Self::SavedRequests,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SavedRequests => "Saved Requests",
            Self::Transactions => "Transactions",
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Session
    pub language: Language,
    pub user: Option<User>,
    pub login_form: LoginForm,

    // Data
    pub balance: LoadState<Balance>,
    pub transactions: LoadState<Vec<Transaction>>,
    pub saved_requests: LoadState<Vec<SavedRequest>>,
    pub request_details: LoadState<SavedRequest>,

    // Send-money flow
    pub send_money: Option<SendMoneySession>,
    pub catalog_error: Option<String>,
    pub pending_transfer: Option<PendingTransfer>,
    pub confirming: bool,

    // Selection
    pub selected_index: usize,
    pub history_tab: HistoryTab,

    // Errors waiting to be shown in the error dialog
    pub errors: VecDeque<String>,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Number of rows in the active history tab
    pub fn history_len(&self) -> usize {
        match self.history_tab {
            HistoryTab::SavedRequests => self.saved_requests.loaded().map_or(0, Vec::len),
            HistoryTab::Transactions => self.transactions.loaded().map_or(0, Vec::len),
        }
    }

    pub fn toggle_history_tab(&mut self) {
        self.history_tab = self.history_tab.toggle();
        self.reset_selection();
    }

    /// Saved request under the cursor, if that tab is active
    pub fn selected_saved_request(&self) -> Option<&SavedRequest> {
        if self.history_tab != HistoryTab::SavedRequests {
            return None;
        }
        self.saved_requests
            .loaded()
            .and_then(|list| list.get(self.selected_index))
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Forget everything tied to the logged-in user
    pub fn logout(&mut self) {
        self.user = None;
        self.login_form = LoginForm::default();
        self.balance = LoadState::Idle;
        self.transactions = LoadState::Idle;
        self.saved_requests = LoadState::Idle;
        self.request_details = LoadState::Idle;
        self.end_send_money();
        self.view_history.clear();
        self.reset_selection();
    }

    /// Drop the send-money session and anything carried to confirmation
    pub fn end_send_money(&mut self) {
        self.send_money = None;
        self.catalog_error = None;
        self.pending_transfer = None;
        self.confirming = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn sample_request() -> SavedRequest {
        let mut fields = BTreeMap::new();
        fields.insert("amount".to_string(), "250.0".to_string());
        fields.insert("firstname".to_string(), "Ahmed".to_string());
        SavedRequest {
            id: "REQ001".into(),
            service_name: "Bank Transfer".into(),
            provider_name: "ABC Bank".into(),
            amount: 250.0,
            form_data: FormData {
                service_id: "bank_transfer".into(),
                provider_id: "101".into(),
                fields,
            },
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
            status: RequestStatus::Saved,
        }
    }

    mod load_state {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_is_idle() {
            let state: LoadState<u32> = LoadState::default();
            assert!(state.is_idle());
            assert!(state.loaded().is_none());
        }

        #[test]
        fn test_loaded_value() {
            let state = LoadState::Loaded(5);
            assert_eq!(state.loaded(), Some(&5));
            assert!(!state.is_loading());
        }
    }

    mod records {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_balance_format() {
            let balance = Balance {
                balance: 1250.0,
                currency: "USD".into(),
            };
            assert_eq!(balance.formatted(), "$1250.00");
        }

        #[test]
        fn test_transaction_formats() {
            let tx = Transaction::new("John Doe", 100.0, Some("Payment for dinner".into()));
            assert_eq!(tx.formatted_amount(), "-$100.00");
            assert_eq!(tx.formatted_status(), "COMPLETED");
            assert!(tx.has_note());
            assert!(!Transaction::new("Jane", 1.0, Some("  ".into())).has_note());
        }

        #[test]
        fn test_saved_request_amount_format() {
            assert_eq!(sample_request().formatted_amount(), "250.00 AED");
        }

        #[test]
        fn test_saved_request_json_keys_in_order() {
            let json = sample_request().to_formatted_json().unwrap();
            let keys = [
                "\"requestId\"",
                "\"serviceName\"",
                "\"providerName\"",
                "\"amount\"",
                "\"currency\"",
                "\"timestamp\"",
                "\"status\"",
                "\"formData\"",
            ];
            let positions: Vec<_> = keys.iter().map(|k| json.find(k).unwrap()).collect();
            let mut sorted = positions.clone();
            sorted.sort();
            assert_eq!(positions, sorted);
        }

        #[test]
        fn test_saved_request_json_values() {
            let json = sample_request().to_formatted_json().unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["requestId"], "REQ001");
            assert_eq!(value["currency"], "AED");
            assert_eq!(value["timestamp"], "2024-03-05T14:30:00Z");
            assert_eq!(value["status"], "SAVED");
            assert_eq!(value["formData"]["providerId"], "101");
            assert_eq!(value["formData"]["fields"]["firstname"], "Ahmed");
        }
    }

    mod app_state {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first");
            state.push_error("second");
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_move_selection_bounds() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
            state.move_selection_down(2);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);
        }

        #[test]
        fn test_selected_saved_request_only_on_requests_tab() {
            let mut state = AppState::default();
            state.saved_requests = LoadState::Loaded(vec![sample_request()]);
            assert_eq!(state.selected_saved_request().unwrap().id, "REQ001");
            state.toggle_history_tab();
            assert!(state.selected_saved_request().is_none());
        }

        #[test]
        fn test_logout_clears_session() {
            let mut state = AppState::default();
            state.user = Some(User {
                username: "testuser".into(),
            });
            state.pending_transfer = Some(PendingTransfer {
                recipient_name: "A".into(),
                amount: 1.0,
                note: None,
                service_name: String::new(),
                provider_name: String::new(),
                form_data: FormData::default(),
            });
            state.view_history.push(View::Home);

            state.logout();
            assert!(state.user.is_none());
            assert!(state.pending_transfer.is_none());
            assert!(state.view_history.is_empty());
        }

        #[test]
        fn test_sidebar_views() {
            assert!(View::Home.has_sidebar());
            assert!(View::History.has_sidebar());
            assert!(!View::SendMoney.has_sidebar());
            assert!(!View::Login.has_sidebar());
        }
    }
}
