//! Safety and cleanup
//!
//! Forced, symlink-safe teardown and the per-challenge workspace sandbox.

pub mod safe_cleanup;
pub mod workspace;
