//! Progress store
//!
//! Tamper-evident record of the active challenge, its expected flag hash and
//! the workspace it was built in.

pub mod hash;
pub mod state;
pub mod store;

pub use state::{BoundedPath, ProgressState};
pub use store::ProgressStore;
