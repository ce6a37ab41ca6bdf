//! Client-side controllers.
//!
//! Each controller is a synchronous state machine. Starting an operation
//! returns a request value tagged with a sequence number; the matching
//! response is fed back through `complete`. Responses whose number is not the
//! latest one issued by that controller are discarded, so a slow response for
//! an abandoned request can never overwrite newer state.

pub mod auth;
pub mod review;
pub mod review_list;
pub mod search;
pub mod selection;

/// Per-controller request sequence number.
pub type RequestSeq = u64;

/// Issues sequence numbers and remembers which one is still awaited.
#[derive(Debug, Default, Clone)]
pub struct RequestTracker {
    issued: RequestSeq,
    in_flight: Option<RequestSeq>,
}

impl RequestTracker {
    /// Issues the next sequence number and marks it as the one in flight.
    pub fn issue(&mut self) -> RequestSeq {
        self.issued += 1;
        self.in_flight = Some(self.issued);
        self.issued
    }

    /// Accepts the response for `seq` if it is the awaited one.
    ///
    /// Returns `false` for stale or unexpected responses; the in-flight marker
    /// is left untouched in that case.
    pub fn settle(&mut self, seq: RequestSeq) -> bool {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
            true
        } else {
            tracing::debug!(seq, latest = self.issued, "discarding stale response");
            false
        }
    }

    /// Stops waiting for the outstanding request, if any.
    pub fn abandon(&mut self) {
        self.in_flight = None;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}
