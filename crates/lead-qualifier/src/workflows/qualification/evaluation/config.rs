use serde::{Deserialize, Serialize};

/// Minimum scores for each category; anything below `nurture` is a generic redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringThresholds {
    pub hot: i32,
    pub warm: i32,
    pub nurture: i32,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            hot: 70,
            warm: 50,
            nurture: 30,
        }
    }
}
