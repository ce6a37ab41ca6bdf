use crate::controller::{RequestSeq, RequestTracker};
use crate::error::Result;
use crate::types::{ItemId, ReviewRecord};

/// A review-list fetch the caller must send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListReviewsRequest {
    pub seq: RequestSeq,
    pub item_id: ItemId,
}

/// Reviews of the currently selected item.
///
/// `owner` is the id the displayed list belongs to. The list is emptied the
/// moment the owner changes so reviews of a previous item are never shown.
#[derive(Debug, Default)]
pub struct ReviewListController {
    owner: Option<ItemId>,
    reviews: Vec<ReviewRecord>,
    tracker: RequestTracker,
}

impl ReviewListController {
    /// Refreshes for `item_id`. With no selection the list is empty and no
    /// request is issued.
    pub fn refresh(&mut self, item_id: Option<&ItemId>) -> Option<ListReviewsRequest> {
        let Some(item_id) = item_id else {
            self.owner = None;
            self.reviews.clear();
            self.tracker.abandon();
            return None;
        };
        if self.owner.as_ref() != Some(item_id) {
            self.reviews.clear();
            self.owner = Some(item_id.clone());
        }
        let seq = self.tracker.issue();
        tracing::debug!(seq, item = %item_id, "review list refresh");
        Some(ListReviewsRequest { seq, item_id: item_id.clone() })
    }

    /// Applies a fetch outcome. Failures replace the list with an empty one.
    pub fn complete(&mut self, seq: RequestSeq, outcome: Result<Vec<ReviewRecord>>) -> bool {
        if !self.tracker.settle(seq) {
            return false;
        }
        match outcome {
            Ok(reviews) => self.reviews = reviews,
            Err(e) => {
                tracing::debug!(seq, error = %e, "review list unavailable");
                self.reviews.clear();
            }
        }
        true
    }

    pub fn reviews(&self) -> &[ReviewRecord] {
        &self.reviews
    }

    pub fn owner(&self) -> Option<&ItemId> {
        self.owner.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn record(overall: f64) -> ReviewRecord {
        ReviewRecord {
            overall_rating: overall,
            value_rating: 0.0,
            ad_rating: 0.0,
            effort_rating: 0.0,
            enjoyment_rating: 0.0,
            offer_amount: 0.0,
            comment: String::new(),
            created_at: "2025-01-01T00:00:00".into(),
        }
    }

    #[test]
    fn no_selection_means_empty_list_and_no_request() {
        let mut list = ReviewListController::default();
        let req = list.refresh(Some(&ItemId::External(1))).unwrap();
        list.complete(req.seq, Ok(vec![record(4.0)]));

        assert!(list.refresh(None).is_none());
        assert!(list.reviews().is_empty());
        assert!(!list.is_loading());
    }

    #[test]
    fn switching_items_clears_stale_reviews_immediately() {
        let mut list = ReviewListController::default();
        let a = list.refresh(Some(&ItemId::External(1))).unwrap();
        list.complete(a.seq, Ok(vec![record(4.0)]));

        let b = list.refresh(Some(&ItemId::External(2))).unwrap();
        assert!(list.reviews().is_empty());
        assert_eq!(b.item_id, ItemId::External(2));
        assert!(!list.complete(a.seq, Ok(vec![record(1.0)])));
        assert!(list.reviews().is_empty());
    }

    #[test]
    fn same_item_refresh_keeps_list_until_response() {
        let mut list = ReviewListController::default();
        let first = list.refresh(Some(&ItemId::External(1))).unwrap();
        list.complete(first.seq, Ok(vec![record(4.0)]));
        let again = list.refresh(Some(&ItemId::External(1))).unwrap();
        assert_eq!(list.reviews().len(), 1);
        list.complete(again.seq, Ok(vec![record(4.0), record(2.0)]));
        assert_eq!(list.reviews().len(), 2);
    }

    #[test]
    fn failure_replaces_list_with_empty() {
        let mut list = ReviewListController::default();
        let first = list.refresh(Some(&ItemId::External(1))).unwrap();
        list.complete(first.seq, Ok(vec![record(4.0)]));
        let again = list.refresh(Some(&ItemId::External(1))).unwrap();
        list.complete(again.seq, Err(Error::Api { status: 500, detail: None }));
        assert!(list.reviews().is_empty());
    }
}
