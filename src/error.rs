use thiserror::Error;

use crate::layout::GroupKey;

#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("No non-overlapping position found in group {group} after placing {placed} points")]
    PlacementExhausted { group: GroupKey, placed: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised by the swarm builder when no candidate clears every neighbor.
/// The orchestrator attaches the group key.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no non-overlapping candidate after placing {placed} points")]
pub struct PlacementExhausted {
    pub placed: usize,
}

impl PlacementExhausted {
    pub fn in_group(self, group: GroupKey) -> SwarmError {
        SwarmError::PlacementExhausted { group, placed: self.placed }
    }
}

pub type Result<T> = std::result::Result<T, SwarmError>;
