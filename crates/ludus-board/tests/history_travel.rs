//! Integration tests for history browsing and the time-travel cursor.
//!
//! The cursor lives on the script side; these tests exercise the full path
//! host -> bootstrap -> API script, including the optional `API.seek`
//! callback that lets rules code follow the cursor.

use ludus_board::{Board, BoardError, CallPhase, HistoryCursor};

const API_SCRIPT: &str = r#"
    API = {}

    function API.init(request, keep_history)
        return "ready"
    end

    function API.move(move)
        return "played " .. move, true
    end

    function API.query(queries)
        local out = {}
        for i, q in ipairs(queries) do
            out[i] = { message = "value of " .. q, request = q, success = true }
        end
        return out
    end
"#;

/// Board with four recorded round trips: init plus three moves
/// (indices 0..=3).
fn board_with_moves() -> Board {
    let mut board = Board::initialize("", API_SCRIPT, Some("start"), true);
    assert!(board.last_error().is_none());
    for text in ["a", "b", "c"] {
        assert!(board.make_move(text));
    }
    board
}

// === Cursor state machine ===

#[test]
fn cursor_is_live_until_browsing_starts() {
    let board = board_with_moves();
    assert_eq!(board.history_cursor(), HistoryCursor::Live);
    assert!(board.history_cursor().is_live());
}

#[test]
fn history_start_enters_at_the_newest_entry() {
    let mut board = board_with_moves();
    assert!(board.history_start());
    assert_eq!(board.history_cursor(), HistoryCursor::At(3));
}

#[test]
fn history_exit_returns_to_live() {
    let mut board = board_with_moves();
    assert!(board.history_start());
    assert!(board.history_exit());
    assert_eq!(board.history_cursor(), HistoryCursor::Live);
}

#[test]
fn history_exit_is_a_no_op_when_live() {
    let mut board = board_with_moves();
    assert!(board.history_exit());
    assert_eq!(board.history_cursor(), HistoryCursor::Live);
}

// === Navigation ===

#[test]
fn back_and_forward_move_the_cursor() {
    let mut board = board_with_moves();
    assert!(board.history_start());

    assert_eq!(board.history_back(2), Some(1));
    assert_eq!(board.history_cursor(), HistoryCursor::At(1));

    assert_eq!(board.history_forward(1), Some(2));
    assert_eq!(board.history_cursor(), HistoryCursor::At(2));
}

#[test]
fn back_clamps_at_the_oldest_entry() {
    let mut board = board_with_moves();
    assert!(board.history_start());
    assert_eq!(board.history_back(100), Some(0));
    assert_eq!(board.history_cursor(), HistoryCursor::At(0));
}

#[test]
fn forward_clamps_at_the_newest_entry() {
    let mut board = board_with_moves();
    assert!(board.history_start());
    board.history_back(100);
    assert_eq!(board.history_forward(100), Some(3));
}

#[test]
fn goto_jumps_to_a_concrete_index() {
    let mut board = board_with_moves();
    assert!(board.history_start());
    assert_eq!(board.history_goto(1), Some(1));
    assert_eq!(board.history_cursor(), HistoryCursor::At(1));
}

#[test]
fn goto_out_of_range_is_rejected() {
    let mut board = board_with_moves();
    assert!(board.history_start());
    assert!(board.history_goto(17).is_none());
    assert!(matches!(
        board.last_error(),
        Some(BoardError::CallFailure {
            phase: CallPhase::HistoryNav,
            ..
        })
    ));
    // The cursor stays where it was.
    assert_eq!(board.history_cursor(), HistoryCursor::At(3));
}

#[test]
fn navigation_while_live_is_rejected() {
    let mut board = board_with_moves();
    assert!(board.history_back(1).is_none());
    assert!(matches!(
        board.last_error(),
        Some(BoardError::CallFailure {
            phase: CallPhase::HistoryNav,
            ..
        })
    ));
}

// === Guard rails ===

#[test]
fn history_start_fails_when_history_was_not_kept() {
    let mut board = Board::initialize("", API_SCRIPT, Some("start"), false);
    assert!(board.last_error().is_none());
    assert!(!board.history_start());
    assert!(matches!(
        board.last_error(),
        Some(BoardError::CallFailure {
            phase: CallPhase::HistoryNav,
            ..
        })
    ));
}

#[test]
fn history_start_fails_on_an_empty_log() {
    // keep_history requested, but no init request: nothing recorded yet.
    let mut board = Board::initialize("", API_SCRIPT, None, true);
    assert!(board.last_error().is_none());
    assert!(!board.history_start());
    assert!(board.last_error().is_some());
}

#[test]
fn moving_while_browsing_is_rejected_and_logged_as_intent() {
    let mut board = board_with_moves();
    assert!(board.history_start());

    assert!(!board.make_move("d"));
    assert!(matches!(
        board.last_error(),
        Some(BoardError::CallFailure {
            phase: CallPhase::Move,
            ..
        })
    ));

    // The request was recorded before the attempt and is not rolled back.
    let ledger = board.history().expect("history kept");
    assert_eq!(ledger.len(), 5);
    assert!(!ledger.is_balanced());
    assert_eq!(ledger.request(4), Some("d"));

    // Back to live, the board keeps working.
    assert!(board.history_exit());
    assert!(board.make_move("e"));
    assert!(board.last_error().is_none());
}

// === Rules following the cursor ===

#[test]
fn seek_callback_follows_every_cursor_change() {
    let api = r#"
        API = {}
        local seen = "never"

        function API.init(request, keep_history)
            return "ready"
        end

        function API.move(move)
            return "played " .. move, true
        end

        function API.seek(index)
            seen = tostring(index)
        end

        function API.query(queries)
            local out = {}
            for i, q in ipairs(queries) do
                out[i] = { message = seen, request = q, success = true }
            end
            return out
        end
    "#;
    let mut board = Board::initialize("", api, Some("start"), true);
    assert!(board.last_error().is_none());
    for text in ["a", "b"] {
        assert!(board.make_move(text));
    }

    assert!(board.history_start());
    let batch = board.query(&["seen"]).expect("query");
    assert_eq!(batch[0].response, "2");

    board.history_goto(0);
    let batch = board.query(&["seen"]).expect("query");
    assert_eq!(batch[0].response, "0");

    // Exit seeks back to the newest entry.
    assert!(board.history_exit());
    let batch = board.query(&["seen"]).expect("query");
    assert_eq!(batch[0].response, "2");
}

// === Native logs stay available for cross-checking ===

#[test]
fn native_response_log_matches_what_was_returned_live() {
    let board = board_with_moves();
    let ledger = board.history().expect("history kept");
    assert_eq!(ledger.responses().len(), 4);
    assert_eq!(ledger.response(0), Some("ready"));
    assert_eq!(ledger.response(3), Some("played c"));
}
