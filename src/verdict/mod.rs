//! Flag verdicts
//!
//! Submitted flags are compared by hash only; nothing is normalised.

pub mod flag;

pub use flag::verify;
