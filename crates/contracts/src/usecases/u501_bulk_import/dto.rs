use serde::{Deserialize, Serialize};

/// Request for a bulk value import: the raw delimited text as uploaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportRequest {
    pub filename: Option<String>,
    pub content: String,
}

/// Outcome of a bulk import run. Partial success is a normal outcome: some
/// rows persisted, some rejected, the errors list says which and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportReport {
    /// Batch audit record, absent when nothing was persisted
    pub batch_id: Option<String>,
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<String>,
}
