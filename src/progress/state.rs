//! Progress record and its fixed binary layout
//!
//! Layout (little-endian, no padding, no version tag):
//!
//! | offset | size | field                 |
//! |--------|------|-----------------------|
//! | 0      | 4    | challenge (u32)       |
//! | 4      | 8    | expected flag hash    |
//! | 12     | 4    | checksum (u32)        |
//! | 16     | 512  | workspace path buffer |

use crate::progress::hash;
use std::ffi::OsStr;
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Capacity of the workspace path buffer, terminator included
pub const PATH_CAPACITY: usize = 512;

/// Total size of an encoded record
pub const RECORD_LEN: usize = 4 + 8 + 4 + PATH_CAPACITY;

const CHALLENGE_AT: usize = 0;
const FLAG_AT: usize = 4;
const CHECKSUM_AT: usize = 12;
const PATH_AT: usize = 16;

/// Fixed-capacity, zero-padded path.
///
/// Writes truncate to `PATH_CAPACITY - 1` bytes so at least one terminating
/// zero always remains. The raw buffer is kept verbatim, padding included,
/// because every byte of it feeds the checksum.
#[derive(Clone, PartialEq, Eq)]
pub struct BoundedPath {
    buf: [u8; PATH_CAPACITY],
}

impl BoundedPath {
    pub fn empty() -> Self {
        Self {
            buf: [0u8; PATH_CAPACITY],
        }
    }

    pub fn from_path(path: &Path) -> Self {
        let bytes = path.as_os_str().as_bytes();
        let len = bytes.len().min(PATH_CAPACITY - 1);
        let mut buf = [0u8; PATH_CAPACITY];
        buf[..len].copy_from_slice(&bytes[..len]);
        Self { buf }
    }

    fn from_raw(buf: [u8; PATH_CAPACITY]) -> Self {
        Self { buf }
    }

    /// Bytes up to the first zero
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.buf.iter().position(|&b| b == 0).unwrap_or(PATH_CAPACITY);
        &self.buf[..end]
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(OsStr::from_bytes(self.as_bytes()))
    }

    pub fn raw(&self) -> &[u8; PATH_CAPACITY] {
        &self.buf
    }
}

impl Default for BoundedPath {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for BoundedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoundedPath")
            .field(&String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}

/// The single persisted progress entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    /// 1-based; past the last challenge means the quest is complete
    pub challenge: u32,
    pub expected_flag_hash: u64,
    pub checksum: u32,
    pub workspace: BoundedPath,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            challenge: 1,
            expected_flag_hash: 0,
            checksum: 0,
            workspace: BoundedPath::empty(),
        }
    }
}

impl ProgressState {
    pub fn compute_checksum(&self) -> u32 {
        hash::checksum(self.challenge, self.expected_flag_hash, self.workspace.raw())
    }

    /// Recompute and store the checksum
    pub fn seal(&mut self) {
        self.checksum = self.compute_checksum();
    }

    pub fn is_intact(&self) -> bool {
        self.checksum == self.compute_checksum()
    }

    pub fn workspace_path(&self) -> Option<PathBuf> {
        if self.workspace.is_empty() {
            None
        } else {
            Some(self.workspace.to_path_buf())
        }
    }

    pub fn set_workspace(&mut self, path: &Path) {
        self.workspace = BoundedPath::from_path(path);
    }

    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[CHALLENGE_AT..FLAG_AT].copy_from_slice(&self.challenge.to_le_bytes());
        out[FLAG_AT..CHECKSUM_AT].copy_from_slice(&self.expected_flag_hash.to_le_bytes());
        out[CHECKSUM_AT..PATH_AT].copy_from_slice(&self.checksum.to_le_bytes());
        out[PATH_AT..].copy_from_slice(self.workspace.raw());
        out
    }

    /// Decode a record without judging its integrity. Returns `None` only when
    /// the length is wrong.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != RECORD_LEN {
            return None;
        }

        let challenge = u32::from_le_bytes(bytes[CHALLENGE_AT..FLAG_AT].try_into().ok()?);
        let expected_flag_hash = u64::from_le_bytes(bytes[FLAG_AT..CHECKSUM_AT].try_into().ok()?);
        let checksum = u32::from_le_bytes(bytes[CHECKSUM_AT..PATH_AT].try_into().ok()?);
        let path: [u8; PATH_CAPACITY] = bytes[PATH_AT..].try_into().ok()?;

        Some(Self {
            challenge,
            expected_flag_hash,
            checksum,
            workspace: BoundedPath::from_raw(path),
        })
    }
}
