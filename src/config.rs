use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SEPARATOR;

/// Everything that affects segmentation output. Only the separator does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    pub separator: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig { separator: DEFAULT_SEPARATOR.to_string() }
    }
}
