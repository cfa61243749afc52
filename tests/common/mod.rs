pub mod harness;

// Re-export commonly used test utilities
pub use harness::{uniform_margins, TestHarness};
