use crate::controller::{RequestSeq, RequestTracker};
use crate::error::Result;
use crate::types::SearchResult;

/// A search the caller must send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: RequestSeq,
    pub query: String,
}

/// Owns the result list and the search loading flag.
#[derive(Debug, Default)]
pub struct SearchController {
    query: String,
    results: Vec<SearchResult>,
    tracker: RequestTracker,
}

impl SearchController {
    /// Starts a search: loading on, previous results cleared.
    pub fn search(&mut self, query: &str) -> SearchRequest {
        self.query = query.to_owned();
        self.results.clear();
        let seq = self.tracker.issue();
        tracing::debug!(seq, query, "search issued");
        SearchRequest { seq, query: self.query.clone() }
    }

    /// Applies a search outcome. Failures degrade to an empty result list.
    ///
    /// Returns `false` if the response was stale and ignored.
    pub fn complete(&mut self, seq: RequestSeq, outcome: Result<Vec<SearchResult>>) -> bool {
        if !self.tracker.settle(seq) {
            return false;
        }
        match outcome {
            Ok(results) => {
                tracing::debug!(seq, count = results.len(), "search completed");
                self.results = results;
            }
            Err(e) => {
                tracing::debug!(seq, error = %e, "search failed, showing no results");
                self.results.clear();
            }
        }
        true
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }
}
