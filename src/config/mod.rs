//! Configuration
//!
//! Error taxonomy and on-disk locations.

pub mod types;
