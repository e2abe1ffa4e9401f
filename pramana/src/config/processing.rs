//! Processing configuration section.

use serde::{Deserialize, Serialize};

use crate::stock::ExecutionMode;

/// Processing settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessingSection {
    /// Convex/concave aggregation: `parallel` or `sequential`
    #[serde(default)]
    pub execution: ExecutionMode,
}
