use serde::{Deserialize, Serialize};

/// One person in the organogram tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganogramMember {
    pub id: String,
    pub name: String,
    pub job_role: String,
    pub seniority: String,
    pub avatar: Option<String>,
    /// True when this person manages the squad they appear under
    pub is_manager: bool,
}

/// One squad node with its members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganogramSquad {
    pub id: String,
    pub name: String,
    pub area: String,
    pub members: Vec<OrganogramMember>,
}

/// Read-only organization tree derived from squads and professionals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organogram {
    pub squads: Vec<OrganogramSquad>,
    /// Professionals without a squad reference
    pub unassigned: Vec<OrganogramMember>,
}
