//! Output types for the JS chart surface.
//!
//! These structs are serialized to JSON and handed to the renderer, which
//! draws the markers and decides how to present failures.

use serde::Serialize;

use crate::error::SwarmError;
use crate::layout::{GroupKey, GroupSummary, PlacedPoint, SwarmLayout};

/// A group whose swarm could not be completed.
#[derive(Debug, Clone, Serialize)]
pub struct GroupErrorInfo {
    pub group: GroupKey,
    /// Points placed before the search gave up.
    pub placed: usize,
    pub message: String,
}

/// A failure that prevented any layout (bad JSON, bad configuration).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// The combined output sent to the renderer
#[derive(Debug, Clone, Default, Serialize)]
pub struct SwarmOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<PlacedPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GroupErrorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl SwarmOutput {
    pub fn from_error(e: &SwarmError) -> Self {
        let field = match e {
            SwarmError::InvalidConfiguration { field, .. } => Some(field.to_string()),
            _ => None,
        };
        Self {
            error: Some(ErrorInfo { message: e.to_string(), field }),
            ..Self::default()
        }
    }
}

impl From<SwarmLayout> for SwarmOutput {
    fn from(layout: SwarmLayout) -> Self {
        let errors = layout
            .errors
            .iter()
            .filter_map(|e| match e {
                SwarmError::PlacementExhausted { group, placed } => Some(GroupErrorInfo {
                    group: group.clone(),
                    placed: *placed,
                    message: e.to_string(),
                }),
                _ => None,
            })
            .collect();

        Self {
            points: layout.points,
            groups: layout.groups,
            skipped: layout.skipped,
            errors,
            error: None,
        }
    }
}
