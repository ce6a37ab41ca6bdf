//! Login / register state machine.
//!
//! ```text
//! Anonymous ──request(mode)──▶ EnteringCredentials(mode) ──stored──▶ Authenticated
//!     ▲                          │  ▲        │ failure (error shown)     │
//!     └────────cancel()──────────┘  └────────┘                            │
//!     ▲                                                                   │
//!     └──────────────────────────────logout()─────────────────────────────┘
//! ```

use crate::controller::{RequestSeq, RequestTracker};
use crate::error::{Error, Result};
use crate::types::{AuthMode, Credentials};

/// Shown when the backend rejects credentials without a usable `detail`.
pub const GENERIC_AUTH_FAILURE: &str = "Authentication failed";
/// Shown when no response was received.
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    EnteringCredentials(AuthMode),
    Authenticated,
}

/// Result of feeding a credential exchange back into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCompletion {
    /// Not the awaited exchange; nothing changed.
    Stale,
    /// The backend refused or could not be reached; the form shows why.
    Rejected,
    /// A token to persist. The state stays `EnteringCredentials` until
    /// [`AuthController::authenticated`] is called.
    Token(String),
}

/// A credential exchange the caller must send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub seq: RequestSeq,
    pub mode: AuthMode,
    pub credentials: Credentials,
}

#[derive(Debug)]
pub struct AuthController {
    state: AuthState,
    draft: Credentials,
    error: Option<String>,
    tracker: RequestTracker,
}

impl AuthController {
    /// `authenticated` reflects whether a persisted token was found at startup.
    pub fn new(authenticated: bool) -> Self {
        let state = if authenticated { AuthState::Authenticated } else { AuthState::Anonymous };
        Self {
            state,
            draft: Credentials::default(),
            error: None,
            tracker: RequestTracker::default(),
        }
    }

    /// Opens the credential form in `mode`. Switching mode keeps typed input.
    ///
    /// Returns `false` (no-op) when already authenticated.
    pub fn request(&mut self, mode: AuthMode) -> bool {
        match self.state {
            AuthState::Authenticated => false,
            AuthState::Anonymous | AuthState::EnteringCredentials(_) => {
                self.state = AuthState::EnteringCredentials(mode);
                self.error = None;
                true
            }
        }
    }

    /// Leaves the credential form without authenticating.
    pub fn cancel(&mut self) {
        if let AuthState::EnteringCredentials(_) = self.state {
            self.state = AuthState::Anonymous;
            self.draft = Credentials::default();
            self.error = None;
            self.tracker.abandon();
        }
    }

    /// Sends the typed credentials. `None` unless the form is open.
    pub fn submit(&mut self) -> Option<AuthRequest> {
        let AuthState::EnteringCredentials(mode) = self.state else {
            return None;
        };
        self.error = None;
        let seq = self.tracker.issue();
        tracing::debug!(seq, mode = mode.label(), username = %self.draft.username, "credentials submitted");
        Some(AuthRequest { seq, mode, credentials: self.draft.clone() })
    }

    /// Applies the credential exchange outcome.
    ///
    /// On failure stays in the form with an error message. A token is handed
    /// back without leaving the form, so a failed persist can still be retried.
    pub fn complete(&mut self, seq: RequestSeq, outcome: Result<String>) -> AuthCompletion {
        if !self.tracker.settle(seq) {
            return AuthCompletion::Stale;
        }
        let AuthState::EnteringCredentials(mode) = self.state else {
            return AuthCompletion::Stale;
        };
        match outcome {
            Ok(token) => AuthCompletion::Token(token),
            Err(e) => {
                tracing::warn!(mode = mode.label(), error = %e, "authentication failed");
                self.error = Some(failure_message(&e));
                AuthCompletion::Rejected
            }
        }
    }

    /// Leaves the form for `Authenticated` once the token is stored.
    pub fn authenticated(&mut self) {
        if let AuthState::EnteringCredentials(mode) = self.state {
            tracing::info!(mode = mode.label(), "authenticated");
            self.state = AuthState::Authenticated;
            self.draft = Credentials::default();
            self.error = None;
        }
    }

    /// Keeps the form open after the token could not be stored.
    pub fn persist_failed(&mut self, error: &Error) {
        if self.is_entering() {
            self.error = Some(format!("Could not save session: {error}"));
        }
    }

    pub fn logout(&mut self) {
        self.state = AuthState::Anonymous;
        self.draft = Credentials::default();
        self.error = None;
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_entering(&self) -> bool {
        matches!(self.state, AuthState::EnteringCredentials(_))
    }

    pub fn draft(&self) -> &Credentials {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Credentials {
        &mut self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }
}

/// Rejections surface the server's detail verbatim; anything that kept us
/// from reading a response is a network error.
fn failure_message(error: &Error) -> String {
    match error {
        Error::Api { detail: Some(detail), .. } => detail.clone(),
        Error::Api { detail: None, .. } | Error::MissingToken => GENERIC_AUTH_FAILURE.to_owned(),
        _ => NETWORK_ERROR.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entering(mode: AuthMode) -> AuthController {
        let mut auth = AuthController::new(false);
        assert!(auth.request(mode));
        auth.draft_mut().username = "ada".into();
        auth.draft_mut().password = "secret".into();
        auth
    }

    #[test]
    fn success_returns_token_and_authenticates_once_stored() {
        let mut auth = entering(AuthMode::Login);
        let req = auth.submit().unwrap();
        assert_eq!(req.credentials.username, "ada");
        assert_eq!(auth.complete(req.seq, Ok("tok".into())), AuthCompletion::Token("tok".into()));
        assert_eq!(auth.state(), AuthState::EnteringCredentials(AuthMode::Login));
        assert!(!auth.is_loading());

        auth.authenticated();
        assert_eq!(auth.state(), AuthState::Authenticated);
        assert_eq!(auth.draft(), &Credentials::default());
    }

    #[test]
    fn failed_persist_keeps_form_and_draft() {
        let mut auth = entering(AuthMode::Login);
        let req = auth.submit().unwrap();
        auth.complete(req.seq, Ok("tok".into()));
        auth.persist_failed(&Error::MissingToken);

        assert_eq!(auth.state(), AuthState::EnteringCredentials(AuthMode::Login));
        assert_eq!(auth.draft().username, "ada");
        assert!(auth.error().unwrap().starts_with("Could not save session"));
        assert!(auth.request(AuthMode::Login));
        assert!(auth.submit().is_some());
    }

    #[test]
    fn rejection_surfaces_detail_and_stays_in_form() {
        let mut auth = entering(AuthMode::Login);
        let req = auth.submit().unwrap();
        let err = Error::Api { status: 400, detail: Some("Invalid credentials".into()) };
        assert_eq!(auth.complete(req.seq, Err(err)), AuthCompletion::Rejected);
        assert_eq!(auth.state(), AuthState::EnteringCredentials(AuthMode::Login));
        assert_eq!(auth.error(), Some("Invalid credentials"));
    }

    #[test]
    fn rejection_without_detail_uses_generic_message() {
        let mut auth = entering(AuthMode::Register);
        let req = auth.submit().unwrap();
        auth.complete(req.seq, Err(Error::Api { status: 422, detail: None }));
        assert_eq!(auth.error(), Some(GENERIC_AUTH_FAILURE));
    }

    #[test]
    fn transport_failure_is_a_network_error() {
        let mut auth = entering(AuthMode::Login);
        let req = auth.submit().unwrap();
        let err = Error::InvalidBaseUrl("unreachable".into());
        auth.complete(req.seq, Err(err));
        assert_eq!(auth.error(), Some(NETWORK_ERROR));
    }

    #[test]
    fn resubmit_clears_previous_error() {
        let mut auth = entering(AuthMode::Login);
        let req = auth.submit().unwrap();
        auth.complete(req.seq, Err(Error::MissingToken));
        assert!(auth.error().is_some());
        auth.submit().unwrap();
        assert!(auth.error().is_none());
    }

    #[test]
    fn submit_requires_open_form() {
        let mut auth = AuthController::new(false);
        assert!(auth.submit().is_none());
        let mut authed = AuthController::new(true);
        assert!(!authed.request(AuthMode::Login));
        assert!(authed.submit().is_none());
    }

    #[test]
    fn cancel_drops_pending_exchange() {
        let mut auth = entering(AuthMode::Login);
        let req = auth.submit().unwrap();
        auth.cancel();
        assert_eq!(auth.state(), AuthState::Anonymous);
        assert_eq!(auth.complete(req.seq, Ok("late".into())), AuthCompletion::Stale);
        assert_eq!(auth.state(), AuthState::Anonymous);
    }

    #[test]
    fn logout_returns_to_anonymous() {
        let mut auth = AuthController::new(true);
        auth.logout();
        assert_eq!(auth.state(), AuthState::Anonymous);
    }
}
