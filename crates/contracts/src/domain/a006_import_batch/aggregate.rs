use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportBatchId(pub Uuid);

impl ImportBatchId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ImportBatchId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ImportBatchId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImportBatchStatus {
    Processing,
    Completed,
    Failed,
}

impl ImportBatchStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "processing" => Ok(ImportBatchStatus::Processing),
            "completed" => Ok(ImportBatchStatus::Completed),
            "failed" => Ok(ImportBatchStatus::Failed),
            _ => Err(format!("Unknown import batch status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportBatchStatus::Processing => "processing",
            ImportBatchStatus::Completed => "completed",
            ImportBatchStatus::Failed => "failed",
        }
    }
}

/// ImportBatch aggregate: the audit trail of one bulk import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub id: ImportBatchId,
    pub filename: Option<String>,
    /// Rows submitted (valid parsed records)
    pub record_count: i32,
    /// Rows persisted
    pub success_count: i32,
    /// Row-level parse/resolution failures
    pub error_count: i32,
    pub status: ImportBatchStatus,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ImportBatch {
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }
}

impl AggregateRoot for ImportBatch {
    type Id = ImportBatchId;

    fn id(&self) -> Self::Id {
        self.id
    }
    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }
    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }
    fn aggregate_index() -> &'static str {
        "a006"
    }
    fn collection_name() -> &'static str {
        "import_batch"
    }
    fn element_name() -> &'static str {
        "Import batch"
    }
    fn list_name() -> &'static str {
        "Import batches"
    }
}
