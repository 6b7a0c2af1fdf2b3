//! Host for sandboxed, script-defined game-rules engines.
//!
//! A [`Board`] embeds a restricted Lua runtime, loads two caller-supplied
//! scripts (rules and API) plus a fixed embedded bootstrap, and exposes a
//! small synchronous surface: initialize, move, query, destroy, and history
//! navigation with an undo/redo cursor.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                    Board (host)                       │
//! │  response: ResponseBuffer   error: Option<BoardError> │
//! │  ledger: Option<HistoryLedger>   query scratch batch  │
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │              CallBridge (mlua)                  │  │
//! │  │   the only module that talks to the runtime     │  │
//! │  └───────────────────────┬─────────────────────────┘  │
//! │                          ▼                            │
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │  Lua: rules script + API script + bootstrap     │  │
//! │  │  LUDUS.init / move / query / history_*          │  │
//! │  │  LUDUS.cursor (nil = live)                      │  │
//! │  └─────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Script contract
//!
//! The API script must define the reserved global `API` as a table with
//! `init(request, keep_history) -> message`,
//! `move(move) -> message, accepted` and
//! `query(queries) -> { {message, request, success}, ... }`; it may define
//! `seek(index)` to follow the history cursor. The rules script must not
//! define `API`, and neither script may define the bootstrap's reserved
//! global `LUDUS`.
//!
//! # Example API script
//!
//! ```lua
//! API = {}
//!
//! function API.init(request, keep_history)
//!     return "new game: " .. request
//! end
//!
//! function API.move(move)
//!     if RULES.legal(move) then
//!         return RULES.apply(move), true
//!     end
//!     return "illegal move", false
//! end
//!
//! function API.query(queries)
//!     local out = {}
//!     for i, q in ipairs(queries) do
//!         out[i] = { message = RULES.answer(q), request = q, success = true }
//!     end
//!     return out
//! end
//! ```
//!
//! # Failure model
//!
//! Operations never panic across the script boundary. `initialize` always
//! returns a board; every failure lands in the error slot
//! ([`Board::last_error`]) as a [`BoardError`], combining the native
//! description with the runtime's own error text when one exists.

mod board;
mod bridge;
mod embedded;
mod error;
mod history;
mod response;
mod types;

pub use board::Board;
pub use bridge::{API_GLOBAL, BOOTSTRAP_GLOBAL};
pub use error::{BoardError, CallPhase, ScriptPhase};
pub use history::HistoryLedger;
pub use response::ResponseBuffer;
pub use types::{HistoryCursor, QueryEntry};
