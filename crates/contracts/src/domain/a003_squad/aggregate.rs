use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquadId(pub Uuid);

impl SquadId {
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

impl AggregateId for SquadId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SquadId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Squad aggregate: a delivery team values can be segmented by
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squad {
    pub id: SquadId,
    pub name: String,
    pub area: String,
    pub description: String,
    pub manager_id: Option<String>,
    /// Display position in the organogram; lower comes first
    #[serde(rename = "order")]
    pub sort_order: i32,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Squad {
    pub fn new_for_insert(form: SquadFormData) -> Self {
        Self {
            id: SquadId::new_v4(),
            name: form.name,
            area: form.area,
            description: form.description,
            manager_id: form.manager_id,
            sort_order: form.sort_order,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn apply(&mut self, form: SquadFormData) {
        self.name = form.name;
        self.area = form.area;
        self.description = form.description;
        self.manager_id = form.manager_id;
        self.sort_order = form.sort_order;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Squad name must not be empty".into());
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

impl AggregateRoot for Squad {
    type Id = SquadId;

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
        "a003"
    }
    fn collection_name() -> &'static str {
        "squad"
    }
    fn element_name() -> &'static str {
        "Squad"
    }
    fn list_name() -> &'static str {
        "Squads"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadFormData {
    pub name: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub description: String,
    pub manager_id: Option<String>,
    #[serde(rename = "order", default)]
    pub sort_order: i32,
}
