//! Board lifecycle and operations.
//!
//! A [`Board`] owns one Lua runtime (through the call bridge), one response
//! buffer, one error slot and, when history is kept, one ledger. All
//! operations are synchronous and run to completion on the caller's thread;
//! a board has exactly one logical owner and is deliberately not `Send`.

use crate::bridge::{CallBridge, API_GLOBAL, BOOTSTRAP_GLOBAL};
use crate::embedded;
use crate::error::{BoardError, ScriptPhase};
use crate::history::HistoryLedger;
use crate::response::ResponseBuffer;
use crate::types::{HistoryCursor, QueryEntry};

/// A script-defined game board.
///
/// Created by [`Board::initialize`], which never fails outright: on error
/// the returned board carries the failure in its error slot and accepts no
/// further operations. Callers are expected to check [`Board::last_error`]
/// after every call before trusting the response buffer or a query batch.
///
/// # Example
///
/// ```ignore
/// let mut board = Board::initialize(rules, api, Some("new game"), true);
/// assert!(board.last_error().is_none());
///
/// if board.make_move("e2e4") {
///     println!("{}", board.response());
/// }
/// ```
pub struct Board {
    /// Present iff initialization ran to completion.
    bridge: Option<CallBridge>,
    response: ResponseBuffer,
    error: Option<BoardError>,
    /// Present iff the board keeps history.
    ledger: Option<HistoryLedger>,
    /// Scratch storage refilled by each query call.
    query_batch: Vec<QueryEntry>,
}

impl Board {
    /// Creates a board from a rules script and an API script.
    ///
    /// Loads the rules script, the API script and the embedded bootstrap,
    /// enforcing the reserved-name and entry-point contracts in between.
    /// When `init_request` is given, the bootstrap's `init` entry point is
    /// invoked with it and the returned message lands in the response
    /// buffer (and the logs, when `keep_history` is set).
    ///
    /// Failure is signaled through [`Board::last_error`] on the returned
    /// board, which must then only be dropped or destroyed.
    #[must_use]
    #[tracing::instrument(skip(rules_code, api_code, init_request))]
    pub fn initialize(
        rules_code: &str,
        api_code: &str,
        init_request: Option<&str>,
        keep_history: bool,
    ) -> Self {
        let mut board = Self {
            bridge: None,
            response: ResponseBuffer::new(),
            error: None,
            ledger: keep_history.then(HistoryLedger::new),
            query_batch: Vec::new(),
        };

        match board.run_initialization(rules_code, api_code, init_request, keep_history) {
            Ok(bridge) => {
                board.bridge = Some(bridge);
                tracing::debug!(keep_history, "board initialized");
            }
            Err(error) => {
                tracing::warn!(%error, "board initialization failed");
                board.error = Some(error);
            }
        }
        board
    }

    fn run_initialization(
        &mut self,
        rules_code: &str,
        api_code: &str,
        init_request: Option<&str>,
        keep_history: bool,
    ) -> Result<CallBridge, BoardError> {
        let bridge = CallBridge::create()?;

        bridge.load_script(ScriptPhase::Rules, rules_code)?;
        for name in [API_GLOBAL, BOOTSTRAP_GLOBAL] {
            if bridge.global_defined(name) {
                return Err(BoardError::NamingConflict {
                    script: ScriptPhase::Rules,
                    name,
                });
            }
        }

        bridge.load_script(ScriptPhase::Api, api_code)?;
        if bridge.global_defined(BOOTSTRAP_GLOBAL) {
            return Err(BoardError::NamingConflict {
                script: ScriptPhase::Api,
                name: BOOTSTRAP_GLOBAL,
            });
        }
        bridge.check_api_contract()?;

        bridge.load_script(ScriptPhase::Bootstrap, embedded::BOOTSTRAP)?;

        if let Some(request) = init_request {
            // Intent is recorded before the call; a failed init leaves the
            // request in the log without a response.
            if let Some(ledger) = &mut self.ledger {
                ledger.record_request(request);
            }
            let message = bridge.call_init(request, keep_history)?;
            self.response.write(&message);
            if let Some(ledger) = &mut self.ledger {
                ledger.record_response(&message);
            }
        }
        Ok(bridge)
    }

    /// Submits a move to the engine.
    ///
    /// Returns the script's verdict (its own semantics, e.g. "move
    /// accepted"); the script's message is available in [`Board::response`].
    /// Returns false and sets the error slot when the call itself fails.
    /// When history is kept the move is appended to the request log before
    /// the call, and is not rolled back on failure.
    #[tracing::instrument(skip(self))]
    pub fn make_move(&mut self, move_text: &str) -> bool {
        let Some(bridge) = &self.bridge else {
            return false;
        };
        if let Some(ledger) = &mut self.ledger {
            ledger.record_request(move_text);
        }

        match bridge.call_move(move_text) {
            Ok((message, accepted)) => {
                self.response.write(&message);
                if let Some(ledger) = &mut self.ledger {
                    ledger.record_response(&message);
                }
                self.error = None;
                accepted
            }
            Err(error) => {
                tracing::warn!(%error, "move failed");
                self.error = Some(error);
                false
            }
        }
    }

    /// Runs a batch of queries in one script call.
    ///
    /// The returned slice is the board's scratch batch: it holds one entry
    /// per input query up to and including the first entry the script
    /// flagged unsuccessful, and is only valid until the next call on this
    /// board (the borrow enforces this). Returns `None` and sets the error
    /// slot when the call itself fails; the batch is left empty then.
    #[tracing::instrument(skip(self, queries), fields(count = queries.len()))]
    pub fn query<S: AsRef<str>>(&mut self, queries: &[S]) -> Option<&[QueryEntry]> {
        self.query_batch.clear();
        let Some(bridge) = &self.bridge else {
            return None;
        };

        match bridge.call_query(queries, &mut self.query_batch) {
            Ok(()) => {
                self.error = None;
                Some(&self.query_batch)
            }
            Err(error) => {
                tracing::warn!(%error, "query failed");
                self.query_batch.clear();
                self.error = Some(error);
                None
            }
        }
    }

    /// Enters history browsing at the newest recorded round trip.
    pub fn history_start(&mut self) -> bool {
        let Some(bridge) = &self.bridge else {
            return false;
        };
        match bridge.call_history_start() {
            Ok(_) => {
                self.error = None;
                true
            }
            Err(error) => {
                self.error = Some(error);
                false
            }
        }
    }

    /// Leaves history browsing, returning the board to live state.
    pub fn history_exit(&mut self) -> bool {
        let Some(bridge) = &self.bridge else {
            return false;
        };
        match bridge.call_history_exit() {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(error) => {
                self.error = Some(error);
                false
            }
        }
    }

    /// Moves the cursor `steps` round trips toward the oldest entry,
    /// clamping at entry 0. Returns the resulting cursor index.
    pub fn history_back(&mut self, steps: usize) -> Option<usize> {
        self.history_nav("history_back", steps)
    }

    /// Moves the cursor `steps` round trips toward the newest entry,
    /// clamping at the end of the log. Returns the resulting cursor index.
    pub fn history_forward(&mut self, steps: usize) -> Option<usize> {
        self.history_nav("history_forward", steps)
    }

    /// Moves the cursor to `index`. Out-of-range indices are rejected by
    /// the script side and surface as a call failure.
    pub fn history_goto(&mut self, index: usize) -> Option<usize> {
        self.history_nav("history_goto", index)
    }

    fn history_nav(&mut self, name: &str, arg: usize) -> Option<usize> {
        let Some(bridge) = &self.bridge else {
            return None;
        };
        match bridge.call_history_nav(name, arg) {
            Ok(index) => {
                self.error = None;
                Some(index)
            }
            Err(error) => {
                tracing::warn!(%error, "history navigation failed");
                self.error = Some(error);
                None
            }
        }
    }

    /// Reads the current cursor position.
    ///
    /// [`HistoryCursor::Live`] unless the board has explicitly entered
    /// history browsing. This is a pure read and never touches the slot.
    #[must_use]
    pub fn history_cursor(&self) -> HistoryCursor {
        match &self.bridge {
            Some(bridge) => bridge
                .read_cursor()
                .map_or(HistoryCursor::Live, HistoryCursor::At),
            None => HistoryCursor::Live,
        }
    }

    /// The most recent engine message.
    #[must_use]
    pub fn response(&self) -> &str {
        self.response.as_str()
    }

    /// The most recent failure, if the last operation failed.
    ///
    /// Cleared by each subsequent successful operation. When
    /// initialization itself failed, the slot keeps the initialization
    /// error and every operation fails fast without touching it.
    #[must_use]
    pub fn last_error(&self) -> Option<&BoardError> {
        self.error.as_ref()
    }

    /// Whether initialization ran to completion.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.bridge.is_some()
    }

    /// Whether this board records request/response history.
    #[must_use]
    pub fn keep_history(&self) -> bool {
        self.ledger.is_some()
    }

    /// The request/response logs, when history is kept.
    #[must_use]
    pub fn history(&self) -> Option<&HistoryLedger> {
        self.ledger.as_ref()
    }

    /// Tears the board down: runtime, buffers and logs are released
    /// together. Consuming `self` makes a second teardown unrepresentable.
    pub fn destroy(self) {
        tracing::debug!("board destroyed");
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("initialized", &self.is_initialized())
            .field("keep_history", &self.keep_history())
            .field("error", &self.error)
            .finish()
    }
}
