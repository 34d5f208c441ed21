//! Input records as handed over by the data provider.

use serde::{Deserialize, Serialize};

/// One observation: a value inside a category, optionally split by a
/// sub-category (hue).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub value: f64,
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
}

impl DataPoint {
    pub fn new(value: f64, category: impl Into<String>) -> Self {
        Self { value, category: category.into(), sub_category: None }
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }
}
