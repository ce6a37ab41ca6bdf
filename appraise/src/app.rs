//! Central application state for appraise.
//!
//! `AppState` wraps the [`Coordinator`] (all domain state) together with the
//! purely visual state the terminal needs: input mode, text buffers, list
//! selection and scroll offsets. Every user intent lands here as a method call;
//! methods that need the network hand the coordinator's [`NetRequest`] to the
//! network worker and return immediately. No rendering logic lives here.

use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;

use appraise_core::api::{NetRequest, NetResponse};
use appraise_core::controller::auth::AuthState;
use appraise_core::controller::review::ReviewField;
use appraise_core::coordinator::Coordinator;
use appraise_core::types::AuthMode;

/// Input mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Result list navigation (default).
    #[default]
    Browse,
    /// Typing into the search bar.
    Query,
    /// Detail overlay for the selected item.
    Detail,
    /// Typing credentials inside the detail overlay.
    Credentials,
    /// Editing the review form inside the detail overlay.
    ReviewForm,
    /// Help overlay above everything else.
    Help,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Browse => "BROWSE",
            Mode::Query => "SEARCH",
            Mode::Detail => "DETAIL",
            Mode::Credentials => "SIGN IN",
            Mode::ReviewForm => "REVIEW",
            Mode::Help => "HELP",
        }
    }
}

/// Which credential input receives typed characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    #[default]
    Username,
    Password,
}

impl CredentialField {
    pub fn toggle(self) -> Self {
        match self {
            CredentialField::Username => CredentialField::Password,
            CredentialField::Password => CredentialField::Username,
        }
    }
}

/// One-line message shown in the status bar until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

pub struct AppState {
    pub coordinator: Coordinator,
    pub mode: Mode,
    /// Mode restored when the help overlay closes.
    help_return: Mode,
    pub help_scroll: u16,

    /// Search bar contents while in `Query` mode.
    pub query_input: String,
    pub results_state: ListState,
    pub reviews_scroll: u16,

    pub credential_field: CredentialField,
    /// Raw text per review field, indexed like [`ReviewField::ALL`]. Committed
    /// into the draft on Tab and on submit.
    pub review_inputs: [String; ReviewField::ALL.len()],
    pub review_focus: usize,

    pub notice: Option<Notice>,
    /// Advances on every logic tick; drives the loading spinner.
    pub spinner_tick: usize,

    net_tx: UnboundedSender<NetRequest>,
}

impl AppState {
    pub fn new(coordinator: Coordinator, net_tx: UnboundedSender<NetRequest>) -> Self {
        Self {
            coordinator,
            mode: Mode::default(),
            help_return: Mode::default(),
            help_scroll: 0,
            query_input: String::new(),
            results_state: ListState::default(),
            reviews_scroll: 0,
            credential_field: CredentialField::default(),
            review_inputs: Default::default(),
            review_focus: 0,
            notice: None,
            spinner_tick: 0,
            net_tx,
        }
    }

    fn send(&self, request: NetRequest) {
        if self.net_tx.send(request).is_err() {
            tracing::warn!("network worker is gone, request dropped");
        }
    }

    /// True while any request is outstanding.
    pub fn is_busy(&self) -> bool {
        let c = &self.coordinator;
        c.search.is_loading()
            || c.reviews.is_loading()
            || c.review.is_loading()
            || c.auth.is_loading()
    }

    pub fn on_tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    pub fn open_help(&mut self) {
        if self.mode != Mode::Help {
            self.help_return = self.mode;
            self.help_scroll = 0;
            self.mode = Mode::Help;
        }
    }

    pub fn close_help(&mut self) {
        self.mode = self.help_return;
    }

    // Search

    pub fn start_query(&mut self) {
        self.query_input = self.coordinator.search.query().to_owned();
        self.mode = Mode::Query;
    }

    pub fn submit_query(&mut self) {
        let request = self.coordinator.search(&self.query_input);
        self.send(request);
        self.results_state.select(None);
        self.mode = Mode::Browse;
    }

    pub fn select_next(&mut self) {
        if !self.coordinator.search.results().is_empty() {
            self.results_state.select_next();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.coordinator.search.results().is_empty() {
            self.results_state.select_previous();
        }
    }

    // Selection

    /// Opens the highlighted result and requests its reviews.
    pub fn open_selected(&mut self) {
        let results = self.coordinator.search.results();
        let Some(item) = self
            .results_state
            .selected()
            .map(|idx| idx.min(results.len().saturating_sub(1)))
            .and_then(|idx| results.get(idx))
            .cloned()
        else {
            return;
        };
        if let Some(request) = self.coordinator.select(item) {
            self.send(request);
        }
        self.reviews_scroll = 0;
        self.mode = Mode::Detail;
    }

    pub fn close_detail(&mut self) {
        self.coordinator.close();
        self.mode = Mode::Browse;
    }

    pub fn scroll_reviews_down(&mut self, lines: u16) {
        self.reviews_scroll = self.reviews_scroll.saturating_add(lines);
    }

    pub fn scroll_reviews_up(&mut self, lines: u16) {
        self.reviews_scroll = self.reviews_scroll.saturating_sub(lines);
    }

    // Authentication

    pub fn begin_auth(&mut self, mode: AuthMode) {
        if self.coordinator.request_auth(mode) {
            self.credential_field = CredentialField::Username;
            self.mode = Mode::Credentials;
        } else {
            self.notice = Some(Notice::info("Already signed in"));
        }
    }

    pub fn cancel_auth(&mut self) {
        self.coordinator.cancel_auth();
        self.mode = Mode::Detail;
    }

    fn credential_buffer(&mut self) -> &mut String {
        let draft = self.coordinator.auth.draft_mut();
        match self.credential_field {
            CredentialField::Username => &mut draft.username,
            CredentialField::Password => &mut draft.password,
        }
    }

    pub fn credential_push(&mut self, c: char) {
        self.credential_buffer().push(c);
    }

    pub fn credential_backspace(&mut self) {
        self.credential_buffer().pop();
    }

    pub fn submit_credentials(&mut self) {
        if let Some(request) = self.coordinator.submit_credentials() {
            self.send(request);
        }
    }

    // Review form

    /// Opens the review form pre-filled from the current draft.
    pub fn open_review_form(&mut self) {
        if !self.coordinator.can_submit_review() {
            self.notice = Some(Notice::error("Sign in to write a review"));
            return;
        }
        self.review_inputs = ReviewField::ALL.map(|f| self.coordinator.review.field_text(f));
        self.review_focus = 0;
        self.mode = Mode::ReviewForm;
    }

    pub fn review_push(&mut self, c: char) {
        self.review_inputs[self.review_focus].push(c);
    }

    pub fn review_backspace(&mut self) {
        self.review_inputs[self.review_focus].pop();
    }

    /// Writes one buffer into the draft. On rejection the draft keeps its old
    /// value and the error becomes the notice.
    fn commit_review_field(&mut self, idx: usize) -> bool {
        let field = ReviewField::ALL[idx];
        match self.coordinator.review.set_field(field, &self.review_inputs[idx]) {
            Ok(()) => true,
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                false
            }
        }
    }

    pub fn next_review_field(&mut self) {
        if self.commit_review_field(self.review_focus) {
            self.review_focus = (self.review_focus + 1) % ReviewField::ALL.len();
        }
    }

    pub fn prev_review_field(&mut self) {
        if self.commit_review_field(self.review_focus) {
            let len = ReviewField::ALL.len();
            self.review_focus = (self.review_focus + len - 1) % len;
        }
    }

    /// Commits every buffer, then submits. Stops on the first rejected field.
    pub fn submit_review_form(&mut self) {
        for idx in 0..ReviewField::ALL.len() {
            if !self.commit_review_field(idx) {
                self.review_focus = idx;
                return;
            }
        }
        match self.coordinator.submit_review() {
            Some(request) => {
                self.notice = None;
                self.send(request);
            }
            None => self.notice = Some(Notice::error("Sign in to write a review")),
        }
    }

    pub fn leave_review_form(&mut self) {
        self.mode = Mode::Detail;
    }

    // Network and session

    /// Applies a completed request and sends any follow-up it triggers.
    /// Stale responses change nothing visible.
    pub async fn apply_net(&mut self, response: NetResponse) {
        let was_search = matches!(response, NetResponse::Search { .. });
        let was_submit = matches!(response, NetResponse::SubmitReview { .. });

        let applied = match self.coordinator.apply(response).await {
            Ok(applied) => applied,
            Err(e) => {
                self.notice = Some(Notice::error(format!("Could not save session: {e}")));
                return;
            }
        };
        if let Some(follow_up) = applied.follow_up {
            self.send(follow_up);
        }
        if !applied.accepted {
            return;
        }

        if was_search {
            let first = (!self.coordinator.search.results().is_empty()).then_some(0);
            self.results_state.select(first);
        }
        if was_submit && self.coordinator.review.succeeded() {
            self.notice = Some(Notice::info("Review submitted"));
        }
        if self.mode == Mode::Credentials && self.coordinator.auth_state() == AuthState::Authenticated {
            self.mode = Mode::Detail;
            self.notice = Some(Notice::info("Signed in"));
        }
    }

    pub async fn logout(&mut self) {
        match self.coordinator.logout().await {
            Ok(()) => self.notice = Some(Notice::info("Signed out")),
            Err(e) => {
                tracing::warn!(error = %e, "could not clear persisted session");
                self.notice = Some(Notice::error(format!("Could not clear session: {e}")));
            }
        }
        if self.mode == Mode::ReviewForm {
            self.mode = Mode::Detail;
        }
    }
}
