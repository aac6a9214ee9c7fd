use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfessionalId(pub Uuid);

impl ProfessionalId {
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

impl AggregateId for ProfessionalId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProfessionalId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Access/visibility profile of a professional
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Gestao,
    Especialista,
    Colaborador,
    Master,
    Admin,
}

impl ProfileType {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "gestao" => Ok(ProfileType::Gestao),
            "especialista" => Ok(ProfileType::Especialista),
            "colaborador" => Ok(ProfileType::Colaborador),
            "master" => Ok(ProfileType::Master),
            "admin" => Ok(ProfileType::Admin),
            _ => Err(format!("Unknown profile type: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Gestao => "gestao",
            ProfileType::Especialista => "especialista",
            ProfileType::Colaborador => "colaborador",
            ProfileType::Master => "master",
            ProfileType::Admin => "admin",
        }
    }
}

/// Professional aggregate: a person in the organogram
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: ProfessionalId,
    /// Account id at the external identity provider, when linked
    pub profile_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(rename = "role")]
    pub job_role: String,
    #[serde(rename = "squad")]
    pub squad_id: Option<String>,
    pub seniority: String,
    pub profile_type: ProfileType,
    pub avatar: Option<String>,
    pub manager_id: Option<String>,
    /// Squads managed by this person (gestao profile)
    #[serde(default)]
    pub managed_squads: Vec<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Professional {
    pub fn new_for_insert(form: ProfessionalFormData) -> Self {
        Self {
            id: ProfessionalId::new_v4(),
            profile_id: form.profile_id,
            name: form.name,
            email: form.email,
            job_role: form.job_role,
            squad_id: form.squad_id,
            seniority: form.seniority,
            profile_type: form.profile_type,
            avatar: form.avatar,
            manager_id: form.manager_id,
            managed_squads: form.managed_squads,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn apply(&mut self, form: ProfessionalFormData) {
        self.profile_id = form.profile_id;
        self.name = form.name;
        self.email = form.email;
        self.job_role = form.job_role;
        self.squad_id = form.squad_id;
        self.seniority = form.seniority;
        self.profile_type = form.profile_type;
        self.avatar = form.avatar;
        self.manager_id = form.manager_id;
        self.managed_squads = form.managed_squads;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Professional name must not be empty".into());
        }
        if self.email.trim().is_empty() {
            return Err("Professional email must not be empty".into());
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

impl AggregateRoot for Professional {
    type Id = ProfessionalId;

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
        "a004"
    }
    fn collection_name() -> &'static str {
        "professional"
    }
    fn element_name() -> &'static str {
        "Professional"
    }
    fn list_name() -> &'static str {
        "Professionals"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalFormData {
    pub profile_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(rename = "role", default)]
    pub job_role: String,
    #[serde(rename = "squad")]
    pub squad_id: Option<String>,
    #[serde(default)]
    pub seniority: String,
    pub profile_type: ProfileType,
    pub avatar: Option<String>,
    pub manager_id: Option<String>,
    #[serde(default)]
    pub managed_squads: Vec<String>,
}
