//! Error types for board operations.
//!
//! Two failure sources feed one taxonomy: purely native checks (runtime
//! allocation, reserved-name conflicts, missing entry points) and failures
//! raised inside the Lua runtime. Runtime-sourced variants carry the
//! `mlua::Error` and render it after the native prefix, so a single
//! user-facing message describes both sides of the boundary. Native
//! variants never embed runtime text.

use thiserror::Error;

/// Which script was being loaded or checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPhase {
    /// The caller-supplied rules script.
    Rules,
    /// The caller-supplied API script.
    Api,
    /// The embedded bootstrap script.
    Bootstrap,
}

impl std::fmt::Display for ScriptPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptPhase::Rules => write!(f, "rules"),
            ScriptPhase::Api => write!(f, "api"),
            ScriptPhase::Bootstrap => write!(f, "bootstrap"),
        }
    }
}

/// Which board operation a runtime call was serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// The bootstrap `init` entry point.
    Init,
    /// The bootstrap `move` entry point.
    Move,
    /// The bootstrap `query` entry point.
    Query,
    /// One of the history navigation entry points.
    HistoryNav,
}

impl std::fmt::Display for CallPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallPhase::Init => write!(f, "initializing the board"),
            CallPhase::Move => write!(f, "making a move"),
            CallPhase::Query => write!(f, "running a query"),
            CallPhase::HistoryNav => write!(f, "navigating history"),
        }
    }
}

/// Errors that can occur while initializing or operating a board.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The Lua runtime could not be created.
    #[error("failed to allocate script runtime: {0}")]
    RuntimeAllocation(String),

    /// A script failed to load or run at initialization.
    #[error("error while loading {phase} script: {source}")]
    ScriptLoad {
        /// Which script was loading.
        phase: ScriptPhase,
        /// The runtime's own error text.
        source: mlua::Error,
    },

    /// A script defined a reserved top-level name.
    #[error("{script} script is not allowed to define name \"{name}\"")]
    NamingConflict {
        /// Which script defined the name.
        script: ScriptPhase,
        /// The reserved name.
        name: &'static str,
    },

    /// The API script does not satisfy the entry-point contract.
    #[error("{0} is not defined by the api script")]
    ContractViolation(&'static str),

    /// A runtime call failed after initialization checks passed.
    #[error("error while {phase}: {source}")]
    CallFailure {
        /// Which operation was running.
        phase: CallPhase,
        /// The runtime's own error text.
        source: mlua::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_load_appends_runtime_text() {
        let err = BoardError::ScriptLoad {
            phase: ScriptPhase::Rules,
            source: mlua::Error::RuntimeError("attempt to call a nil value".into()),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("error while loading rules script: "));
        assert!(msg.contains("attempt to call a nil value"));
    }

    #[test]
    fn naming_conflict_is_purely_native() {
        let err = BoardError::NamingConflict {
            script: ScriptPhase::Api,
            name: "LUDUS",
        };
        assert_eq!(
            err.to_string(),
            "api script is not allowed to define name \"LUDUS\""
        );
    }

    #[test]
    fn contract_violation_names_the_missing_item() {
        let err = BoardError::ContractViolation("API.move");
        assert_eq!(err.to_string(), "API.move is not defined by the api script");
    }

    #[test]
    fn call_failure_names_the_operation() {
        let err = BoardError::CallFailure {
            phase: CallPhase::Move,
            source: mlua::Error::RuntimeError("boom".into()),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("error while making a move: "));
        assert!(msg.contains("boom"));
    }
}
