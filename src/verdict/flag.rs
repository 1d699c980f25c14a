use crate::progress::hash::flag_hash;
use crate::progress::ProgressState;

/// Whether `submitted` hashes to the flag recorded for the active challenge.
///
/// Exact bytes only: case and surrounding whitespace matter. A different
/// string that collides under the 64-bit hash is accepted too.
pub fn verify(state: &ProgressState, submitted: &str) -> bool {
    flag_hash(submitted) == state.expected_flag_hash
}
