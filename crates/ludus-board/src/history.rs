//! Append-only request/response logs.
//!
//! The ledger records every round trip made against a board: one request
//! entry when an operation is issued, one response entry when it returns a
//! message. Requests are recorded before the runtime call is attempted, so
//! after a failed call the request log is one entry longer than the
//! response log: the ledger records intent, not just outcomes.
//! [`HistoryLedger::is_balanced`] makes that state observable.
//!
//! Cursor semantics (live vs. browsing) are not kept here; they live on the
//! script side and are read through the call bridge.

/// Append-only pair of request/response logs.
///
/// Index `i` of both logs corresponds to the i-th round trip, with the
/// initialization request as entry 0. Appends deep-copy their input; the
/// logs never alias the response buffer.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    requests: Vec<String>,
    responses: Vec<String>,
}

impl HistoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request entry.
    pub fn record_request(&mut self, request: &str) {
        self.requests.push(request.to_owned());
    }

    /// Appends a response entry.
    pub fn record_response(&mut self, response: &str) {
        self.responses.push(response.to_owned());
    }

    /// Number of recorded requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if no round trip has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Returns true when every recorded request has its response.
    ///
    /// False only after an operation recorded its request and then failed
    /// before producing a message.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.requests.len() == self.responses.len()
    }

    /// All recorded requests, oldest first.
    #[must_use]
    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    /// All recorded responses, oldest first.
    #[must_use]
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// The request of round trip `index`.
    #[must_use]
    pub fn request(&self, index: usize) -> Option<&str> {
        self.requests.get(index).map(String::as_str)
    }

    /// The response of round trip `index`.
    #[must_use]
    pub fn response(&self, index: usize) -> Option<&str> {
        self.responses.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ledger_is_empty_and_balanced() {
        let ledger = HistoryLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn round_trips_grow_in_lockstep() {
        let mut ledger = HistoryLedger::new();
        ledger.record_request("start");
        ledger.record_response("ready");
        ledger.record_request("a1");
        ledger.record_response("ok");

        assert_eq!(ledger.len(), 2);
        assert!(ledger.is_balanced());
        assert_eq!(ledger.request(0), Some("start"));
        assert_eq!(ledger.response(0), Some("ready"));
        assert_eq!(ledger.request(1), Some("a1"));
        assert_eq!(ledger.response(1), Some("ok"));
    }

    #[test]
    fn failed_round_trip_leaves_ledger_unbalanced() {
        let mut ledger = HistoryLedger::new();
        ledger.record_request("start");
        ledger.record_response("ready");
        ledger.record_request("bad move");

        assert!(!ledger.is_balanced());
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.response(1), None);
    }

    #[test]
    fn appends_copy_their_input() {
        let mut ledger = HistoryLedger::new();
        let mut text = String::from("original");
        ledger.record_request(&text);
        text.push_str(" mutated");
        assert_eq!(ledger.request(0), Some("original"));
    }

    #[test]
    fn out_of_range_lookups_return_none() {
        let ledger = HistoryLedger::new();
        assert_eq!(ledger.request(0), None);
        assert_eq!(ledger.response(5), None);
    }
}
