//! HTTP collaborator contract and its reqwest implementation.
//!
//! [`Backend`] is the seam between the controllers and the network: the
//! terminal app uses [`HttpBackend`], tests substitute in-memory doubles.
//! [`dispatch`] turns a [`NetRequest`] into the matching [`NetResponse`] so the
//! caller never has to know which endpoint serves which controller.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::controller::auth::AuthRequest;
use crate::controller::review::SubmitRequest;
use crate::controller::review_list::ListReviewsRequest;
use crate::controller::search::SearchRequest;
use crate::controller::RequestSeq;
use crate::error::{Error, Result};
use crate::types::{AuthMode, Credentials, ItemId, ReviewRecord, ReviewSubmission, SearchResult};

/// Remote search, auth and review storage.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    async fn list_reviews(&self, item_id: &ItemId) -> Result<Vec<ReviewRecord>>;

    async fn submit_review(&self, token: &str, submission: &ReviewSubmission) -> Result<()>;

    /// Exchanges form-encoded credentials for an access token.
    async fn login(&self, credentials: &Credentials) -> Result<String>;

    /// Creates an account from JSON credentials and returns an access token.
    async fn register(&self, credentials: &Credentials) -> Result<String>;
}

/// Body of `/login` and `/register` responses, success or failure.
#[derive(Debug, Deserialize)]
struct AuthReply {
    access_token: Option<String>,
    /// A string for domain errors; validation errors send a list instead.
    detail: Option<serde_json::Value>,
}

/// reqwest-backed [`Backend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` whose requests give up after
    /// `timeout`.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    /// Creates a backend with a caller-supplied reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Maps non-2xx to `Error::Api`, keeping a string `detail` if present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail")?.as_str().map(str::to_owned));
        Err(Error::Api { status: status.as_u16(), detail })
    }

    async fn token_from(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let reply: AuthReply = response.json().await?;
        if status.is_success() {
            return reply.access_token.ok_or(Error::MissingToken);
        }
        let detail = reply
            .detail
            .and_then(|d| d.as_str().map(str::to_owned));
        Err(Error::Api { status: status.as_u16(), detail })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let mut url = self.endpoint(&["search"]);
        url.query_pairs_mut().append_pair("q", query);
        let response = Self::check(self.http.get(url).send().await?).await?;
        let results: Option<Vec<SearchResult>> = response.json().await?;
        Ok(results.unwrap_or_default())
    }

    async fn list_reviews(&self, item_id: &ItemId) -> Result<Vec<ReviewRecord>> {
        let id = item_id.to_string();
        let url = self.endpoint(&["reviews", &id]);
        let response = Self::check(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn submit_review(&self, token: &str, submission: &ReviewSubmission) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(&["reviews"]))
            .bearer_auth(token)
            .json(submission)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint(&["login"]))
            .form(credentials)
            .send()
            .await?;
        Self::token_from(response).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint(&["register"]))
            .json(credentials)
            .send()
            .await?;
        Self::token_from(response).await
    }
}

/// Work a controller wants done on the network.
#[derive(Debug, Clone)]
pub enum NetRequest {
    Search(SearchRequest),
    ListReviews(ListReviewsRequest),
    SubmitReview(SubmitRequest),
    Authenticate(AuthRequest),
}

/// Completed network work, routed back to the controller that issued it.
#[derive(Debug)]
pub enum NetResponse {
    Search { seq: RequestSeq, outcome: Result<Vec<SearchResult>> },
    ListReviews { seq: RequestSeq, outcome: Result<Vec<ReviewRecord>> },
    SubmitReview { seq: RequestSeq, outcome: Result<()> },
    Authenticate { seq: RequestSeq, outcome: Result<String> },
}

/// Executes `request` against `backend`. Never fails: errors travel inside
/// the response for the owning controller to interpret.
pub async fn dispatch(backend: &dyn Backend, request: NetRequest) -> NetResponse {
    match request {
        NetRequest::Search(req) => NetResponse::Search {
            seq: req.seq,
            outcome: backend.search(&req.query).await,
        },
        NetRequest::ListReviews(req) => NetResponse::ListReviews {
            seq: req.seq,
            outcome: backend.list_reviews(&req.item_id).await,
        },
        NetRequest::SubmitReview(req) => NetResponse::SubmitReview {
            seq: req.seq,
            outcome: backend.submit_review(&req.token, &req.submission).await,
        },
        NetRequest::Authenticate(req) => {
            let outcome = match req.mode {
                AuthMode::Login => backend.login(&req.credentials).await,
                AuthMode::Register => backend.register(&req.credentials).await,
            };
            NetResponse::Authenticate { seq: req.seq, outcome }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        assert_eq!(
            backend("http://localhost:8000").endpoint(&["search"]).as_str(),
            "http://localhost:8000/search"
        );
        assert_eq!(
            backend("http://host/api/").endpoint(&["reviews", "42"]).as_str(),
            "http://host/api/reviews/42"
        );
    }

    #[test]
    fn named_ids_are_percent_encoded_in_paths() {
        let url = backend("http://host").endpoint(&["reviews", "Chess / Go"]);
        assert_eq!(url.as_str(), "http://host/reviews/Chess%20%2F%20Go");
    }

    #[test]
    fn rejects_non_base_urls() {
        let err = HttpBackend::new("mailto:someone@example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }
}
