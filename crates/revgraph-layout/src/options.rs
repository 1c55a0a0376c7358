use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margin {
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Space between consecutive revisions of a lane, and between lanes stacked in one column.
    pub vertical_gap: f64,
    pub column_gap: f64,
    /// Horizontal pitch of a column, without the gap. `None` uses the widest node.
    pub column_width: Option<f64>,
    pub margin: Margin,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            vertical_gap: 20.0,
            column_gap: 30.0,
            column_width: None,
            margin: Margin::default(),
        }
    }
}

impl LayoutOptions {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
