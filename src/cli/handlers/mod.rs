//! CLI command handlers.

pub mod analyze;
pub mod history;
pub mod reset;
pub mod serve;
