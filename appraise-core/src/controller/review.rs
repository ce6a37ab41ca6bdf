use crate::controller::{RequestSeq, RequestTracker};
use crate::error::{Error, Result};
use crate::types::{ReviewDraft, ReviewSubmission, SelectedItem};

/// Editable fields of the review form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    Overall,
    Value,
    Ad,
    Effort,
    Enjoyment,
    OfferAmount,
    Comment,
}

impl ReviewField {
    pub const ALL: [ReviewField; 7] = [
        ReviewField::Overall,
        ReviewField::Value,
        ReviewField::Ad,
        ReviewField::Effort,
        ReviewField::Enjoyment,
        ReviewField::OfferAmount,
        ReviewField::Comment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReviewField::Overall => "Overall",
            ReviewField::Value => "Value",
            ReviewField::Ad => "Ads",
            ReviewField::Effort => "Effort",
            ReviewField::Enjoyment => "Enjoyment",
            ReviewField::OfferAmount => "Offer amount",
            ReviewField::Comment => "Comment",
        }
    }

    pub fn is_numeric(self) -> bool {
        self != ReviewField::Comment
    }

    fn slot(self, draft: &mut ReviewDraft) -> Option<&mut f64> {
        match self {
            ReviewField::Overall => Some(&mut draft.overall_rating),
            ReviewField::Value => Some(&mut draft.value_rating),
            ReviewField::Ad => Some(&mut draft.ad_rating),
            ReviewField::Effort => Some(&mut draft.effort_rating),
            ReviewField::Enjoyment => Some(&mut draft.enjoyment_rating),
            ReviewField::OfferAmount => Some(&mut draft.offer_amount),
            ReviewField::Comment => None,
        }
    }
}

/// A review submission the caller must POST with the bearer token.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub seq: RequestSeq,
    pub token: String,
    pub submission: ReviewSubmission,
}

/// Review form state plus submission loading/success flags.
///
/// The draft outlives submissions: it is created once and only changed by
/// [`ReviewController::set_field`].
#[derive(Debug, Default)]
pub struct ReviewController {
    draft: ReviewDraft,
    succeeded: bool,
    tracker: RequestTracker,
}

impl ReviewController {
    /// Updates one field from its textual input.
    ///
    /// Numeric input is trimmed and must parse to a finite `f64`; otherwise
    /// the field keeps its previous value and `Error::InvalidNumber` is
    /// returned. Range is not checked.
    pub fn set_field(&mut self, field: ReviewField, input: &str) -> Result<()> {
        let Some(slot) = field.slot(&mut self.draft) else {
            self.draft.comment = input.to_owned();
            return Ok(());
        };
        match input.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                *slot = value;
                Ok(())
            }
            _ => Err(Error::InvalidNumber { field: field.label(), input: input.to_owned() }),
        }
    }

    /// Current value of `field` as editable text.
    pub fn field_text(&self, field: ReviewField) -> String {
        let d = &self.draft;
        match field {
            ReviewField::Overall => d.overall_rating.to_string(),
            ReviewField::Value => d.value_rating.to_string(),
            ReviewField::Ad => d.ad_rating.to_string(),
            ReviewField::Effort => d.effort_rating.to_string(),
            ReviewField::Enjoyment => d.enjoyment_rating.to_string(),
            ReviewField::OfferAmount => d.offer_amount.to_string(),
            ReviewField::Comment => d.comment.clone(),
        }
    }

    /// Builds the submission for `selected`. Clears the success flag.
    pub fn submit(&mut self, selected: &SelectedItem, token: &str) -> SubmitRequest {
        self.succeeded = false;
        let seq = self.tracker.issue();
        tracing::debug!(seq, item = %selected.id, "review submitted");
        SubmitRequest {
            seq,
            token: token.to_owned(),
            submission: ReviewSubmission::new(selected, &self.draft),
        }
    }

    /// Applies the submission outcome. Returns `true` only on accepted success,
    /// which is the caller's cue to refresh the review list.
    pub fn complete(&mut self, seq: RequestSeq, outcome: Result<()>) -> bool {
        if !self.tracker.settle(seq) {
            return false;
        }
        match outcome {
            Ok(()) => {
                tracing::info!(seq, "review saved");
                self.succeeded = true;
            }
            Err(e) => tracing::warn!(seq, error = %e, "review submission failed"),
        }
        self.succeeded
    }

    pub fn reset_success(&mut self) {
        self.succeeded = false;
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemId, SearchResult};

    fn selected() -> SelectedItem {
        SelectedItem {
            id: ItemId::External(5),
            item: SearchResult {
                external_id: Some(5),
                name: Some("maps".into()),
                title: "Maps".into(),
                description: "Find places".into(),
                images: vec!["m.png".into()],
                rating: Some(3.9),
            },
        }
    }

    #[test]
    fn numeric_fields_parse_trimmed_input() {
        let mut review = ReviewController::default();
        review.set_field(ReviewField::Overall, " 4.5 ").unwrap();
        review.set_field(ReviewField::OfferAmount, "12").unwrap();
        review.set_field(ReviewField::Comment, "  keep spaces ").unwrap();
        assert_eq!(review.draft().overall_rating, 4.5);
        assert_eq!(review.draft().offer_amount, 12.0);
        assert_eq!(review.draft().comment, "  keep spaces ");
    }

    #[test]
    fn non_numeric_input_is_rejected_and_value_kept() {
        let mut review = ReviewController::default();
        review.set_field(ReviewField::Value, "3").unwrap();
        let err = review.set_field(ReviewField::Value, "three").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { field: "Value", .. }));
        assert!(review.set_field(ReviewField::Value, "NaN").is_err());
        assert_eq!(review.draft().value_rating, 3.0);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let mut review = ReviewController::default();
        review.set_field(ReviewField::Effort, "9").unwrap();
        assert_eq!(review.draft().effort_rating, 9.0);
    }

    #[test]
    fn submission_carries_item_and_every_draft_field() {
        let mut review = ReviewController::default();
        review.set_field(ReviewField::Enjoyment, "2.5").unwrap();
        let req = review.submit(&selected(), "tok");
        assert_eq!(req.token, "tok");
        assert_eq!(req.submission.item_id, ItemId::External(5));
        assert_eq!(req.submission.rating, Some(3.9));
        assert_eq!(req.submission.draft.enjoyment_rating, 2.5);
        assert!(review.is_loading());
    }

    #[test]
    fn success_flag_is_set_reset_and_draft_survives() {
        let mut review = ReviewController::default();
        review.set_field(ReviewField::Comment, "great").unwrap();
        let req = review.submit(&selected(), "tok");
        assert!(review.complete(req.seq, Ok(())));
        assert!(review.succeeded());
        assert!(!review.is_loading());
        assert_eq!(review.draft().comment, "great");

        review.reset_success();
        assert!(!review.succeeded());
    }

    #[test]
    fn failure_leaves_success_false() {
        let mut review = ReviewController::default();
        let req = review.submit(&selected(), "tok");
        assert!(!review.complete(req.seq, Err(Error::Api { status: 401, detail: None })));
        assert!(!review.succeeded());
        assert!(!review.is_loading());
    }

    #[test]
    fn resubmitting_clears_previous_success() {
        let mut review = ReviewController::default();
        let first = review.submit(&selected(), "tok");
        review.complete(first.seq, Ok(()));
        review.submit(&selected(), "tok");
        assert!(!review.succeeded());
    }
}
