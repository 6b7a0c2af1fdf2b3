//! Embedded bootstrap script.
//!
//! The bootstrap is embedded at compile time with `include_str!`, so a
//! board never depends on external script files beyond the two the caller
//! supplies.

/// The bootstrap script wiring the reserved dispatch table.
pub(crate) const BOOTSTRAP: &str = include_str!("../scripts/base.lua");
