//! Application state and core logic

use crate::backend::{BackendTrait, InMemoryBackend};
use crate::config::TuiConfig;
use crate::platform::has_shortcut_modifier;
use crate::state::forms::{FieldInput, Focus, FormError, SendMoneySession};
use crate::state::{
    AppState, LoadState, LoginField, PendingTransfer, RequestStatus, SavedRequest,
    SendMoneyResponse, SplashState, Transaction, View,
};
use crate::tasks::{TaskKind, TaskManager, TaskOutcome, TaskOwner};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Cards on the home screen, in display order
pub const HOME_CARDS: [HomeCard; 4] = [
    HomeCard::SendMoney,
    HomeCard::History,
    HomeCard::RefreshBalance,
    HomeCard::Profile,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeCard {
    SendMoney,
    History,
    RefreshBalance,
    Profile,
}

impl HomeCard {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SendMoney => "Send Money",
            Self::History => "History",
            Self::RefreshBalance => "Refresh Balance",
            Self::Profile => "Profile",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::SendMoney => "Transfer to a bank or wallet",
            Self::History => "Transactions and saved requests",
            Self::RefreshBalance => "Reload your wallet balance",
            Self::Profile => "Language and account",
        }
    }
}

/// Rows of the profile screen
pub const PROFILE_ACTIONS: [ProfileAction; 2] =
    [ProfileAction::ToggleLanguage, ProfileAction::Logout];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    ToggleLanguage,
    Logout,
}

/// Sidebar entries; number keys 1-3 jump to them
pub const SIDEBAR_VIEWS: [View; 3] = [View::Home, View::History, View::Profile];

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend the screens talk to
    backend: Arc<dyn BackendTrait>,
    /// In-flight backend calls
    pub tasks: TaskManager,
    /// Persisted user preferences
    pub config: TuiConfig,
    /// Whether language changes are written back to the config file
    persist_config: bool,
    /// Whether the app should quit
    quit: bool,
    /// One-line notice shown in the status bar
    pub status_message: Option<String>,
    /// Splash screen animation state
    pub splash_state: Option<SplashState>,
}

impl App {
    /// Create a new App instance from the user's config
    pub fn new() -> Result<Self> {
        let config = TuiConfig::load().unwrap_or_else(|err| {
            tracing::warn!("Ignoring unreadable config: {err}");
            TuiConfig::default()
        });
        let backend = InMemoryBackend::new(config.catalog_override(), config.simulate_latency());
        let mut app = Self::with_backend(Arc::new(backend), config);
        app.persist_config = true;
        Ok(app)
    }

    /// Create an App over any backend; config changes stay in memory
    pub fn with_backend(backend: Arc<dyn BackendTrait>, config: TuiConfig) -> Self {
        let mut state = AppState::new(config.language());
        // Start with splash screen
        state.current_view = View::Splash;

        Self {
            state,
            backend,
            tasks: TaskManager::new(),
            config,
            persist_config: false,
            quit: false,
            status_message: None,
            splash_state: Some(SplashState::new()),
        }
    }

    /// Update splash animation state
    /// Returns true if animation is complete and we should transition
    pub fn update_splash(&mut self) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update();
            if splash.is_complete() {
                self.splash_state = None;
                self.state.current_view = View::Login;
                return true;
            }
        }
        false
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal: dismiss with Enter or Esc, swallow the rest
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.in_splash() {
            self.handle_splash_key(key);
            return Ok(());
        }

        // Clear the previous notice on any key press
        self.status_message = None;

        if has_shortcut_modifier(key.modifiers) && key.code == KeyCode::Char('l') {
            self.toggle_language();
            return Ok(());
        }

        // Request details dialog sits above the history screen
        if !self.state.request_details.is_idle() {
            self.handle_request_dialog_key(key);
            return Ok(());
        }

        match self.state.current_view {
            View::Splash => {}
            View::Login => self.handle_login_key(key),
            View::Home => self.handle_home_key(key),
            View::SendMoney => self.handle_send_money_key(key),
            View::Confirmation => self.handle_confirmation_key(key),
            View::History => self.handle_history_key(key),
            View::Profile => self.handle_profile_key(key),
        }
        Ok(())
    }

    fn handle_splash_key(&mut self, _key: KeyEvent) {
        if let Some(ref mut splash) = self.splash_state {
            splash.skip();
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if view == self.state.current_view {
            return;
        }
        let from = self.state.current_view;
        self.leave(from, view);
        if !matches!(from, View::Splash | View::Login) {
            self.state.view_history.push(from);
        }
        self.state.current_view = view;
        self.enter(view);
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        let Some(view) = self.state.view_history.pop() else {
            return;
        };
        let from = self.state.current_view;
        self.leave(from, view);
        self.state.current_view = view;
        self.enter(view);
    }

    /// Jump to a top-level view, forgetting the history
    fn navigate_root(&mut self, view: View) {
        let from = self.state.current_view;
        if from != view {
            self.leave(from, view);
        }
        self.state.view_history.clear();
        self.state.current_view = view;
        self.enter(view);
    }

    fn leave(&mut self, from: View, to: View) {
        self.tasks.cancel_owned_by(from);
        self.state.reset_selection();

        let in_flow = |v: View| matches!(v, View::SendMoney | View::Confirmation);
        if in_flow(from) && !in_flow(to) {
            tracing::debug!("Send-money flow ended");
            self.state.end_send_money();
        }
        match from {
            View::Login => self.state.login_form.is_loading = false,
            View::Confirmation => self.state.confirming = false,
            View::SendMoney => {
                if let Some(session) = self.state.send_money.as_mut() {
                    session.finish_submit();
                }
            }
            View::History => self.state.request_details = LoadState::Idle,
            _ => {}
        }
    }

    /// Start the loads a view needs on entry
    fn enter(&mut self, view: View) {
        match view {
            View::Home => {
                if self.state.balance.loaded().is_none() {
                    self.load_balance();
                }
            }
            View::SendMoney => {
                if self.state.send_money.is_none() && self.state.catalog_error.is_none() {
                    self.load_catalog();
                }
            }
            View::History => self.load_history(),
            _ => {}
        }
    }

    // Background work

    fn load_balance(&mut self) {
        self.state.balance = LoadState::Loading;
        let backend = Arc::clone(&self.backend);
        self.tasks
            .spawn(TaskKind::Balance, TaskOwner::Screen(View::Home), async move {
                TaskOutcome::Balance(backend.get_balance().await.map_err(|e| e.to_string()))
            });
    }

    fn load_catalog(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.tasks.spawn(
            TaskKind::Catalog,
            TaskOwner::Screen(View::SendMoney),
            async move {
                TaskOutcome::Catalog(backend.load_catalog().await.map_err(|e| e.to_string()))
            },
        );
    }

    fn load_history(&mut self) {
        self.state.transactions = LoadState::Loading;
        self.state.saved_requests = LoadState::Loading;

        let backend = Arc::clone(&self.backend);
        self.tasks.spawn(
            TaskKind::Transactions,
            TaskOwner::Screen(View::History),
            async move {
                TaskOutcome::Transactions(
                    backend.list_transactions().await.map_err(|e| e.to_string()),
                )
            },
        );
        let backend = Arc::clone(&self.backend);
        self.tasks.spawn(
            TaskKind::SavedRequests,
            TaskOwner::Screen(View::History),
            async move {
                TaskOutcome::SavedRequests(
                    backend
                        .list_saved_requests()
                        .await
                        .map_err(|e| e.to_string()),
                )
            },
        );
    }

    /// Apply every finished background result to the state
    pub fn process_task_results(&mut self) {
        for outcome in self.tasks.drain() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Login(result) => {
                self.state.login_form.is_loading = false;
                match result {
                    Ok(user) => {
                        tracing::info!("Logged in as {}", user.username);
                        self.status_message = Some(format!("Welcome, {}", user.username));
                        self.state.user = Some(user);
                        self.state.login_form = Default::default();
                        self.navigate_root(View::Home);
                    }
                    Err(err) => self.state.push_error(err),
                }
            }
            TaskOutcome::Balance(result) => match result {
                Ok(balance) => self.state.balance = LoadState::Loaded(balance),
                Err(err) => {
                    self.state.balance = LoadState::Failed(err.clone());
                    self.state.push_error(format!("Failed to load balance: {err}"));
                }
            },
            TaskOutcome::Catalog(result) => match result {
                Ok(catalog) => {
                    tracing::info!("Catalog ready: {} services", catalog.services.len());
                    self.state.send_money = Some(SendMoneySession::new(
                        catalog,
                        self.state.language,
                        self.config.validity_mode(),
                    ));
                }
                Err(err) => {
                    tracing::error!("{err}");
                    self.state.catalog_error = Some(err);
                }
            },
            TaskOutcome::Submit(result) => self.finish_submit(result),
            TaskOutcome::Confirm(result) => {
                self.state.confirming = false;
                match result {
                    Ok(confirmation) => {
                        let pending = self.state.pending_transfer.take();
                        self.status_message = Some(format!(
                            "Sent ${:.2} to {}",
                            confirmation.amount, confirmation.recipient_name
                        ));
                        if let Some(pending) = pending {
                            self.record_transfer(pending);
                        }
                        self.navigate_root(View::Home);
                    }
                    Err(err) => self.state.push_error(format!("Transfer failed: {err}")),
                }
            }
            TaskOutcome::RecordTransfer(result) => match result {
                Ok(()) => {
                    // Lists are stale now; history reloads on its next visit
                    if self.state.current_view == View::History {
                        self.load_history();
                    } else {
                        self.state.transactions = LoadState::Idle;
                        self.state.saved_requests = LoadState::Idle;
                    }
                }
                Err(err) => self
                    .state
                    .push_error(format!("Failed to record transfer: {err}")),
            },
            TaskOutcome::Transactions(result) => {
                self.state.transactions = match result {
                    Ok(list) => LoadState::Loaded(list),
                    Err(err) => {
                        self.state
                            .push_error(format!("Failed to load transactions: {err}"));
                        LoadState::Failed(err)
                    }
                };
            }
            TaskOutcome::SavedRequests(result) => {
                self.state.saved_requests = match result {
                    Ok(list) => LoadState::Loaded(list),
                    Err(err) => {
                        self.state
                            .push_error(format!("Failed to load saved requests: {err}"));
                        LoadState::Failed(err)
                    }
                };
            }
            TaskOutcome::RequestDetails(result) => match result {
                Ok(request) => self.state.request_details = LoadState::Loaded(request),
                Err(err) => {
                    self.state.request_details = LoadState::Idle;
                    self.state.push_error(err);
                }
            },
        }
    }

    fn finish_submit(&mut self, result: Result<SendMoneyResponse, String>) {
        let Some(session) = self.state.send_money.as_mut() else {
            return;
        };
        session.finish_submit();

        match result {
            Ok(response) => {
                let language = session.language();
                let service_name = session
                    .selected_service()
                    .map(|s| s.label.get(language).to_string())
                    .unwrap_or_default();
                let provider_name = session
                    .selected_provider()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                let form_data = session.form().to_form_data();
                tracing::info!("Submission {} accepted", response.transaction_id);

                self.status_message = Some("Form submitted successfully!".to_string());
                self.state.pending_transfer = Some(PendingTransfer {
                    recipient_name: response.recipient_name,
                    amount: response.amount,
                    note: None,
                    service_name,
                    provider_name,
                    form_data,
                });
                self.navigate(View::Confirmation);
            }
            Err(err) => self.state.push_error(format!("Submission failed: {err}")),
        }
    }

    /// Add the confirmed transfer to both history lists
    fn record_transfer(&mut self, pending: PendingTransfer) {
        let transaction =
            Transaction::new(&pending.recipient_name, pending.amount, pending.note.clone());
        let request = SavedRequest {
            id: format!("REQ{}", Utc::now().timestamp_millis()),
            service_name: pending.service_name,
            provider_name: pending.provider_name,
            amount: pending.amount,
            form_data: pending.form_data,
            timestamp: Utc::now(),
            status: RequestStatus::Completed,
        };

        let backend = Arc::clone(&self.backend);
        self.tasks
            .spawn(TaskKind::RecordTransfer, TaskOwner::App, async move {
                let result: Result<()> = async {
                    backend.add_transaction(transaction).await?;
                    backend.save_request(request).await
                }
                .await;
                TaskOutcome::RecordTransfer(result.map_err(|e| e.to_string()))
            });
    }

    // Key handlers

    fn handle_login_key(&mut self, key: KeyEvent) {
        if self.state.login_form.is_loading {
            return;
        }
        let form = &mut self.state.login_form;
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Enter if form.active_field == LoginField::Username => form.next_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Esc => self.quit = true,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.push_char(c)
            }
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let form = &mut self.state.login_form;
        if !form.validate() {
            return;
        }
        form.is_loading = true;
        let username = form.username.trim().to_string();
        let password = form.password.clone();
        tracing::info!("Signing in as {username}");

        let backend = Arc::clone(&self.backend);
        self.tasks
            .spawn(TaskKind::Login, TaskOwner::Screen(View::Login), async move {
                TaskOutcome::Login(
                    backend
                        .login(&username, &password)
                        .await
                        .map_err(|e| e.to_string()),
                )
            });
    }

    /// Number keys 1-3 and `q` on screens with the sidebar
    fn handle_sidebar_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.navigate_root(SIDEBAR_VIEWS[index]);
                true
            }
            KeyCode::Char('q') => {
                self.quit = true;
                true
            }
            _ => false,
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        if self.handle_sidebar_key(key) {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.state.move_selection_down(HOME_CARDS.len())
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.state.move_selection_up()
            }
            KeyCode::Char('r') if !self.tasks.is_running(TaskKind::Balance) => {
                self.load_balance()
            }
            KeyCode::Char('s') => self.navigate(View::SendMoney),
            KeyCode::Enter => match HOME_CARDS.get(self.state.selected_index) {
                Some(HomeCard::SendMoney) => self.navigate(View::SendMoney),
                Some(HomeCard::History) => self.navigate(View::History),
                Some(HomeCard::RefreshBalance) => self.load_balance(),
                Some(HomeCard::Profile) => self.navigate(View::Profile),
                None => {}
            },
            _ => {}
        }
    }

    fn handle_send_money_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.go_back();
            return;
        }
        // Nothing but Esc while the catalog is loading or broken
        let Some(session) = self.state.send_money.as_mut() else {
            return;
        };
        if session.form().is_submitting {
            return;
        }

        if has_shortcut_modifier(key.modifiers) {
            if key.code == KeyCode::Char('s') {
                self.submit_form();
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => session.focus_next(),
            KeyCode::BackTab | KeyCode::Up => session.focus_prev(),
            KeyCode::Left => session.handle_input(FieldInput::Prev),
            KeyCode::Right => session.handle_input(FieldInput::Next),
            KeyCode::Backspace => session.handle_input(FieldInput::Backspace),
            KeyCode::Delete => session.handle_input(FieldInput::Clear),
            KeyCode::Enter => {
                if session.focus() == Focus::Submit {
                    self.submit_form();
                } else {
                    session.focus_next();
                }
            }
            KeyCode::Char(c) => session.handle_input(FieldInput::Char(c)),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let Some(session) = self.state.send_money.as_mut() else {
            return;
        };
        match session.submit() {
            Ok(form_data) => {
                let backend = Arc::clone(&self.backend);
                self.tasks.spawn(
                    TaskKind::Submit,
                    TaskOwner::Screen(View::SendMoney),
                    async move {
                        TaskOutcome::Submit(
                            backend
                                .submit_form(&form_data)
                                .await
                                .map_err(|e| e.to_string()),
                        )
                    },
                );
            }
            // Banner is shown under the form; jump to the first bad field
            Err(FormError::Invalid(_)) => {
                if let Some(index) = session.widgets().iter().position(|w| w.error_visible()) {
                    session.set_focus(Focus::Field(index));
                }
            }
            Err(err) => {
                tracing::debug!("Submit ignored: {err}");
                self.status_message = Some(err.to_string());
            }
        }
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        if self.state.confirming {
            return;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => self.confirm_transfer(),
            KeyCode::Esc | KeyCode::Char('n') => self.go_back(),
            _ => {}
        }
    }

    fn confirm_transfer(&mut self) {
        let Some(pending) = self.state.pending_transfer.clone() else {
            return;
        };
        self.state.confirming = true;
        tracing::info!(
            "Confirming {} to {}",
            pending.formatted_amount(),
            pending.recipient_name
        );

        let backend = Arc::clone(&self.backend);
        self.tasks.spawn(
            TaskKind::Confirm,
            TaskOwner::Screen(View::Confirmation),
            async move {
                let result: Result<_> = async {
                    if !backend.validate_recipient(&pending.recipient_name).await? {
                        anyhow::bail!("Invalid recipient name");
                    }
                    backend
                        .confirm_transaction(&pending.recipient_name, pending.amount, pending.note)
                        .await
                }
                .await;
                TaskOutcome::Confirm(result.map_err(|e| e.to_string()))
            },
        );
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        if self.handle_sidebar_key(key) {
            return;
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.state.toggle_history_tab(),
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.state.history_len();
                self.state.move_selection_down(len);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('r') => self.load_history(),
            KeyCode::Enter => self.open_request_details(),
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    fn open_request_details(&mut self) {
        let Some(id) = self.state.selected_saved_request().map(|r| r.id.clone()) else {
            return;
        };
        self.state.request_details = LoadState::Loading;

        let backend = Arc::clone(&self.backend);
        self.tasks.spawn(
            TaskKind::RequestDetails,
            TaskOwner::Screen(View::History),
            async move {
                TaskOutcome::RequestDetails(
                    backend.get_request(&id).await.map_err(|e| e.to_string()),
                )
            },
        );
    }

    fn handle_request_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                if let Some(id) = self.tasks.running(TaskKind::RequestDetails) {
                    self.tasks.cancel(id);
                }
                self.state.request_details = LoadState::Idle;
            }
            KeyCode::Char('y') => self.copy_request_json(),
            _ => {}
        }
    }

    fn copy_request_json(&mut self) {
        let Some(request) = self.state.request_details.loaded() else {
            return;
        };
        let copied = request
            .to_formatted_json()
            .map_err(anyhow::Error::from)
            .and_then(|json| self.copy_to_clipboard(&json));
        match copied {
            Ok(()) => self.status_message = Some("Copied request JSON".to_string()),
            Err(err) => {
                tracing::warn!("Clipboard copy failed: {err}");
                self.status_message = Some(format!("Copy failed: {err}"));
            }
        }
    }

    /// Copy text to clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    fn handle_profile_key(&mut self, key: KeyEvent) {
        if self.handle_sidebar_key(key) {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.state.move_selection_down(PROFILE_ACTIONS.len())
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.state.move_selection_up()
            }
            KeyCode::Enter => match PROFILE_ACTIONS.get(self.state.selected_index) {
                Some(ProfileAction::ToggleLanguage) => self.toggle_language(),
                Some(ProfileAction::Logout) => self.logout(),
                None => {}
            },
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    /// Switch between English and Arabic and remember the choice
    pub fn toggle_language(&mut self) {
        let language = self.state.language.toggle();
        self.state.language = language;
        if let Some(session) = self.state.send_money.as_mut() {
            session.switch_language(language);
        }
        tracing::info!("Language switched to {}", language.code());

        self.config.set_language(language);
        if self.persist_config {
            if let Err(err) = self.config.save() {
                tracing::warn!("Failed to save config: {err}");
            }
        }
        self.status_message = Some(format!("Language: {}", language.display_name()));
    }

    fn logout(&mut self) {
        tracing::info!("Logging out");
        self.tasks.cancel_all();
        self.state.logout();
        self.state.current_view = View::Login;
        self.status_message = Some("Signed out".to_string());
    }
}
