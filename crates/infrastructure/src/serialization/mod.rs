//! Deterministic JSON serialization for the workspace and settings files.
//!
//! Output is stable across saves:
//! - Field order follows struct declaration order
//! - 2-space indentation
//! - Trailing newline

mod json;

pub use json::*;
