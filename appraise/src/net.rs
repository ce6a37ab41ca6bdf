//! Background network worker.
//!
//! Owns the [`Backend`] for the lifetime of the app. Requests arrive on an
//! unbounded channel and each one runs as its own tokio task, so a slow review
//! fetch never holds up a search. Completions go back to the event loop as
//! `AppEvent::Net`; ordering between them is settled by the controllers'
//! sequence numbers, not here.

use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use appraise_core::api::{self, Backend, NetRequest};

use crate::event::AppEvent;

/// Runs until every `NetRequest` sender is dropped.
pub async fn net_worker_loop(
    backend: Arc<dyn Backend>,
    mut rx: UnboundedReceiver<NetRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    while let Some(request) = rx.recv().await {
        let backend = Arc::clone(&backend);
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            let response = api::dispatch(backend.as_ref(), request).await;
            let _ = event_tx.send(AppEvent::Net(Box::new(response)));
        });
    }
    tracing::debug!("network worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use appraise_core::controller::search::SearchController;
    use appraise_core::types::{Credentials, ItemId, ReviewRecord, ReviewSubmission, SearchResult};
    use appraise_core::api::NetResponse;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct Echo;

    #[async_trait]
    impl Backend for Echo {
        async fn search(&self, query: &str) -> appraise_core::Result<Vec<SearchResult>> {
            Ok(vec![SearchResult { title: query.to_owned(), ..Default::default() }])
        }
        async fn list_reviews(&self, _: &ItemId) -> appraise_core::Result<Vec<ReviewRecord>> {
            Ok(Vec::new())
        }
        async fn submit_review(&self, _: &str, _: &ReviewSubmission) -> appraise_core::Result<()> {
            Ok(())
        }
        async fn login(&self, _: &Credentials) -> appraise_core::Result<String> {
            Ok("t".into())
        }
        async fn register(&self, _: &Credentials) -> appraise_core::Result<String> {
            Ok("t".into())
        }
    }

    #[tokio::test]
    async fn completions_come_back_as_events() {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        tokio::spawn(net_worker_loop(Arc::new(Echo), req_rx, event_tx));

        let mut search = SearchController::default();
        req_tx.send(NetRequest::Search(search.search("chess"))).unwrap();

        match event_rx.recv().await {
            Some(AppEvent::Net(response)) => match *response {
                NetResponse::Search { seq, outcome } => {
                    assert!(search.complete(seq, outcome));
                    assert_eq!(search.results()[0].title, "chess");
                }
                other => panic!("unexpected response: {other:?}"),
            },
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
