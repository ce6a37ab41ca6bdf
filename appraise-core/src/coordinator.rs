//! Wires the controllers together.
//!
//! The coordinator is the single owner of all client state. User intents
//! become [`NetRequest`]s for the caller to execute; completed
//! [`NetResponse`]s are applied through [`Coordinator::apply`]. Dependencies
//! between controllers are explicit calls here:
//!
//! - selecting or closing an item refreshes the review list,
//! - a successful review submission refreshes it once more,
//! - a successful credential exchange writes the token into the session store,
//!   and only a stored token leaves the credential form.

use crate::api::{NetRequest, NetResponse};
use crate::controller::auth::{AuthCompletion, AuthController, AuthState};
use crate::controller::review::ReviewController;
use crate::controller::review_list::ReviewListController;
use crate::controller::search::SearchController;
use crate::controller::selection::SelectionState;
use crate::error::Result;
use crate::session::SessionStore;
use crate::types::{AuthMode, SearchResult};

/// What [`Coordinator::apply`] did with a completed request.
#[derive(Debug, Default)]
pub struct Applied {
    /// `false` when the response was stale and dropped.
    pub accepted: bool,
    /// Request the caller must send next.
    pub follow_up: Option<NetRequest>,
}

impl Applied {
    fn settled(accepted: bool) -> Self {
        Self { accepted, follow_up: None }
    }
}

#[derive(Debug)]
pub struct Coordinator {
    pub search: SearchController,
    pub selection: SelectionState,
    pub auth: AuthController,
    pub review: ReviewController,
    pub reviews: ReviewListController,
    session: SessionStore,
}

impl Coordinator {
    pub fn new(session: SessionStore) -> Self {
        Self {
            search: SearchController::default(),
            selection: SelectionState::default(),
            auth: AuthController::new(session.is_authenticated()),
            review: ReviewController::default(),
            reviews: ReviewListController::default(),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn search(&mut self, query: &str) -> NetRequest {
        NetRequest::Search(self.search.search(query))
    }

    /// Opens `item` and requests its reviews.
    pub fn select(&mut self, item: SearchResult) -> Option<NetRequest> {
        self.selection.select(item);
        self.review.reset_success();
        self.refresh_reviews()
    }

    /// Closes the detail view; the review list empties without a request.
    pub fn close(&mut self) {
        self.selection.close();
        self.review.reset_success();
        self.reviews.refresh(None);
    }

    fn refresh_reviews(&mut self) -> Option<NetRequest> {
        self.reviews
            .refresh(self.selection.id())
            .map(NetRequest::ListReviews)
    }

    pub fn request_auth(&mut self, mode: AuthMode) -> bool {
        self.auth.request(mode)
    }

    pub fn cancel_auth(&mut self) {
        self.auth.cancel();
    }

    pub fn submit_credentials(&mut self) -> Option<NetRequest> {
        self.auth.submit().map(NetRequest::Authenticate)
    }

    /// Review submission is only offered with an open item and a token.
    pub fn can_submit_review(&self) -> bool {
        self.selection.current().is_some() && self.session.is_authenticated()
    }

    /// Builds the review submission, or `None` when submission is blocked.
    pub fn submit_review(&mut self) -> Option<NetRequest> {
        let selected = self.selection.current()?;
        let token = self.session.token()?;
        Some(NetRequest::SubmitReview(self.review.submit(selected, token)))
    }

    /// Routes a completed request to its controller and reports whether it was
    /// accepted and which request follows.
    ///
    /// # Errors
    ///
    /// Only persisting a freshly obtained token can fail; the credential form
    /// then stays open with the error. Network failures are absorbed into
    /// controller state.
    pub async fn apply(&mut self, response: NetResponse) -> Result<Applied> {
        match response {
            NetResponse::Search { seq, outcome } => {
                Ok(Applied::settled(self.search.complete(seq, outcome)))
            }
            NetResponse::ListReviews { seq, outcome } => {
                Ok(Applied::settled(self.reviews.complete(seq, outcome)))
            }
            NetResponse::SubmitReview { seq, outcome } => {
                let was_loading = self.review.is_loading();
                if self.review.complete(seq, outcome) {
                    return Ok(Applied { accepted: true, follow_up: self.refresh_reviews() });
                }
                Ok(Applied::settled(was_loading && !self.review.is_loading()))
            }
            NetResponse::Authenticate { seq, outcome } => match self.auth.complete(seq, outcome) {
                AuthCompletion::Stale => Ok(Applied::settled(false)),
                AuthCompletion::Rejected => Ok(Applied::settled(true)),
                AuthCompletion::Token(token) => match self.session.set(token).await {
                    Ok(()) => {
                        self.auth.authenticated();
                        Ok(Applied::settled(true))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "could not persist session token");
                        self.auth.persist_failed(&e);
                        Err(e)
                    }
                },
            },
        }
    }

    /// Ends the session in memory and on disk.
    pub async fn logout(&mut self) -> Result<()> {
        self.auth.logout();
        self.review.reset_success();
        self.session.clear().await
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }
}
