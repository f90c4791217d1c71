//! Output format value object

use serde::{Deserialize, Serialize};

/// How results are rendered to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, colored status text (default)
    #[default]
    Text,
    /// JSON output
    Json,
}
