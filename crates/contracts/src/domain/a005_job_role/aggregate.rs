use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRoleId(pub Uuid);

impl JobRoleId {
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

impl AggregateId for JobRoleId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(JobRoleId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// JobRole aggregate: a position title professionals are hired into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRole {
    pub id: JobRoleId,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_management: bool,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl JobRole {
    pub fn new_for_insert(form: JobRoleFormData) -> Self {
        Self {
            id: JobRoleId::new_v4(),
            title: form.title,
            description: form.description,
            is_management: form.is_management,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn apply(&mut self, form: JobRoleFormData) {
        self.title = form.title;
        self.description = form.description;
        self.is_management = form.is_management;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Job role title must not be empty".into());
        }
        Ok(())
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for JobRole {
    type Id = JobRoleId;

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
        "a005"
    }
    fn collection_name() -> &'static str {
        "job_role"
    }
    fn element_name() -> &'static str {
        "Job role"
    }
    fn list_name() -> &'static str {
        "Job roles"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRoleFormData {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_management: bool,
}
