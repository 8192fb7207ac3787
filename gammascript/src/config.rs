//! Submission limits

use serde::{Deserialize, Serialize};

/// Longest Raw text the validation / mint endpoint accepts, in characters
pub const MAX_RAW_LEN: usize = 5000;

/// Limits applied by [`submission`](crate::validator::submission)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum Raw length in characters
    pub max_raw_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_raw_len: MAX_RAW_LEN,
        }
    }
}
