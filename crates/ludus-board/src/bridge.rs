//! Call marshaling between the board host and the Lua runtime.
//!
//! This is the only module that touches `mlua`. Per call the bridge fetches
//! the bootstrap dispatch table, fetches the named function, invokes it with
//! the declared arguments and result arity, and copies every returned Lua
//! string into an owned Rust `String` before returning; the runtime's
//! string storage has no lifetime guarantee past the next call. On a
//! non-normal return the bridge yields the runtime's own error so the error
//! taxonomy can combine it with the native prefix.

use crate::error::{BoardError, CallPhase, ScriptPhase};
use crate::types::QueryEntry;
use mlua::{Function, Lua, LuaOptions, StdLib, Table, Value};

/// Reserved global the API script must define as its entry-point table.
pub const API_GLOBAL: &str = "API";

/// Reserved global holding the bootstrap's dispatch table.
pub const BOOTSTRAP_GLOBAL: &str = "LUDUS";

/// Owner of one Lua runtime and the call contract against it.
pub(crate) struct CallBridge {
    lua: Lua,
}

impl CallBridge {
    /// Creates a runtime with the restricted stdlib surface
    /// (base, table, string, math, utf8).
    pub(crate) fn create() -> Result<Self, BoardError> {
        let libs = StdLib::TABLE | StdLib::STRING | StdLib::MATH | StdLib::UTF8;
        let lua = Lua::new_with(libs, LuaOptions::default())
            .map_err(|e| BoardError::RuntimeAllocation(e.to_string()))?;
        Ok(Self { lua })
    }

    /// Loads and runs a script chunk.
    pub(crate) fn load_script(&self, phase: ScriptPhase, code: &str) -> Result<(), BoardError> {
        self.lua
            .load(code)
            .set_name(phase.to_string())
            .exec()
            .map_err(|source| BoardError::ScriptLoad { phase, source })
    }

    /// Returns true if `name` resolves to a non-nil global.
    pub(crate) fn global_defined(&self, name: &str) -> bool {
        matches!(
            self.lua.globals().get::<Value>(name),
            Ok(value) if !matches!(value, Value::Nil)
        )
    }

    /// Verifies the API script defined its entry-point table.
    ///
    /// The table must hold `move` and `init` functions; `query` and `seek`
    /// are resolved lazily by the bootstrap.
    pub(crate) fn check_api_contract(&self) -> Result<(), BoardError> {
        let api: Value = self
            .lua
            .globals()
            .get(API_GLOBAL)
            .map_err(|_| BoardError::ContractViolation("the API table"))?;
        let Value::Table(api) = api else {
            return Err(BoardError::ContractViolation("the API table"));
        };

        for (field, missing) in [("move", "API.move"), ("init", "API.init")] {
            let value: Value = api
                .get(field)
                .map_err(|_| BoardError::ContractViolation(missing))?;
            if !matches!(value, Value::Function(_)) {
                return Err(BoardError::ContractViolation(missing));
            }
        }
        Ok(())
    }

    /// Invokes the bootstrap `init` entry point.
    pub(crate) fn call_init(
        &self,
        request: &str,
        keep_history: bool,
    ) -> Result<String, BoardError> {
        let func = self.dispatch_fn("init", CallPhase::Init)?;
        func.call::<String>((request, keep_history))
            .map_err(|source| BoardError::CallFailure {
                phase: CallPhase::Init,
                source,
            })
    }

    /// Invokes the bootstrap `move` entry point.
    ///
    /// Returns the script's message and its accepted/rejected verdict.
    pub(crate) fn call_move(&self, move_text: &str) -> Result<(String, bool), BoardError> {
        let func = self.dispatch_fn("move", CallPhase::Move)?;
        func.call::<(String, bool)>(move_text)
            .map_err(|source| BoardError::CallFailure {
                phase: CallPhase::Move,
                source,
            })
    }

    /// Invokes the bootstrap `query` entry point and copies results into
    /// `batch`, one entry per input query, stopping after the first entry
    /// whose success flag is false (that entry is included).
    pub(crate) fn call_query<S: AsRef<str>>(
        &self,
        queries: &[S],
        batch: &mut Vec<QueryEntry>,
    ) -> Result<(), BoardError> {
        let fail = |source| BoardError::CallFailure {
            phase: CallPhase::Query,
            source,
        };

        let func = self.dispatch_fn("query", CallPhase::Query)?;
        let args = self
            .lua
            .create_sequence_from(queries.iter().map(|q| q.as_ref().to_owned()))
            .map_err(fail)?;
        let results: Table = func.call(args).map_err(fail)?;

        for i in 1..=queries.len() {
            let value: Value = results.get(i as i64).map_err(fail)?;
            let Value::Table(entry) = value else {
                return Err(fail(mlua::Error::RuntimeError(format!(
                    "query result {i} is missing"
                ))));
            };
            let success: bool = entry.get("success").map_err(fail)?;
            let request: String = entry.get("request").map_err(fail)?;
            let response: String = entry.get("message").map_err(fail)?;
            batch.push(QueryEntry {
                success,
                request,
                response,
            });
            if !success {
                break;
            }
        }
        Ok(())
    }

    /// Enters history browsing; returns the starting cursor index.
    pub(crate) fn call_history_start(&self) -> Result<usize, BoardError> {
        let func = self.dispatch_fn("history_start", CallPhase::HistoryNav)?;
        let index: i64 = func.call(()).map_err(|source| BoardError::CallFailure {
            phase: CallPhase::HistoryNav,
            source,
        })?;
        cursor_index(index)
    }

    /// Leaves history browsing.
    pub(crate) fn call_history_exit(&self) -> Result<(), BoardError> {
        let func = self.dispatch_fn("history_exit", CallPhase::HistoryNav)?;
        func.call::<()>(()).map_err(|source| BoardError::CallFailure {
            phase: CallPhase::HistoryNav,
            source,
        })
    }

    /// Invokes one of the cursor-moving entry points
    /// (`history_back`, `history_forward`, `history_goto`).
    pub(crate) fn call_history_nav(&self, name: &str, arg: usize) -> Result<usize, BoardError> {
        let func = self.dispatch_fn(name, CallPhase::HistoryNav)?;
        let index: i64 = func
            .call(arg as i64)
            .map_err(|source| BoardError::CallFailure {
                phase: CallPhase::HistoryNav,
                source,
            })?;
        cursor_index(index)
    }

    /// Reads the script-side cursor. Returns `None` when the cursor is nil,
    /// unreadable, or not a non-negative number.
    pub(crate) fn read_cursor(&self) -> Option<usize> {
        let table: Table = self.lua.globals().get(BOOTSTRAP_GLOBAL).ok()?;
        match table.get::<Value>("cursor") {
            Ok(Value::Integer(i)) if i >= 0 => Some(i as usize),
            Ok(Value::Number(n)) if n >= 0.0 => Some(n as usize),
            _ => None,
        }
    }

    /// Fetches a function from the bootstrap dispatch table.
    fn dispatch_fn(&self, name: &str, phase: CallPhase) -> Result<Function, BoardError> {
        let fail = |source| BoardError::CallFailure { phase, source };
        let table: Table = self.lua.globals().get(BOOTSTRAP_GLOBAL).map_err(fail)?;
        table.get::<Function>(name).map_err(fail)
    }
}

/// Converts a script-reported cursor to an index.
fn cursor_index(index: i64) -> Result<usize, BoardError> {
    usize::try_from(index).map_err(|_| BoardError::CallFailure {
        phase: CallPhase::HistoryNav,
        source: mlua::Error::RuntimeError(format!("script reported cursor {index}")),
    })
}
