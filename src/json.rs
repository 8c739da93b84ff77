use crate::boundary::ComparisonHandle;
use crate::diff::Difference;
use serde::{Deserialize, Serialize};

/// Comparison report for machine consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResponse {
    /// Identifier of the comparison
    pub session_id: String,
    pub success: bool,
    /// Lines of the first file, each `\n`-terminated
    pub left_text: String,
    /// Lines of the second file, each `\n`-terminated
    pub right_text: String,
    /// Differences rendered one per line
    pub differences: String,
    /// Differences as structured entries
    pub entries: Vec<Difference>,
    pub difference_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompareResponse {
    pub fn success(handle: &ComparisonHandle) -> Self {
        let entries = handle.differences().to_vec();
        Self {
            session_id: handle.id().to_string(),
            success: true,
            left_text: handle.left_text().to_string(),
            right_text: handle.right_text().to_string(),
            differences: handle.differences_text().to_string(),
            difference_count: entries.len(),
            entries,
            error: None,
        }
    }

    pub fn failure(session_id: String, error: String) -> Self {
        Self {
            session_id,
            success: false,
            left_text: String::new(),
            right_text: String::new(),
            differences: String::new(),
            entries: Vec::new(),
            difference_count: 0,
            error: Some(error),
        }
    }
}

/// Generate a fresh session identifier
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
