use crate::domain::{a003_squad, a004_professional};
use crate::shared::error::MetricsError;
use contracts::domain::a003_squad::aggregate::Squad;
use contracts::domain::a004_professional::aggregate::Professional;
use contracts::projections::p900_organogram::{Organogram, OrganogramMember, OrganogramSquad};

fn member_of(p: &Professional, manager_id: Option<&str>) -> OrganogramMember {
    OrganogramMember {
        id: p.to_string_id(),
        name: p.name.clone(),
        job_role: p.job_role.clone(),
        seniority: p.seniority.clone(),
        avatar: p.avatar.clone(),
        is_manager: manager_id.is_some_and(|m| m == p.to_string_id()),
    }
}

/// Assemble the organogram tree. Squads arrive in display order from the
/// repository; members keep their in-squad listing order with the manager
/// hoisted to the front.
pub fn build_organogram(squads: Vec<Squad>, professionals: Vec<Professional>) -> Organogram {
    let squad_nodes = squads
        .into_iter()
        .map(|squad| {
            let squad_id = squad.to_string_id();
            let mut members: Vec<OrganogramMember> = professionals
                .iter()
                .filter(|p| p.squad_id.as_deref() == Some(squad_id.as_str()))
                .map(|p| member_of(p, squad.manager_id.as_deref()))
                .collect();
            members.sort_by_key(|m| !m.is_manager);

            OrganogramSquad {
                id: squad_id,
                name: squad.name,
                area: squad.area,
                members,
            }
        })
        .collect();

    let unassigned = professionals
        .iter()
        .filter(|p| p.squad_id.is_none())
        .map(|p| member_of(p, None))
        .collect();

    Organogram {
        squads: squad_nodes,
        unassigned,
    }
}

pub async fn get() -> Result<Organogram, MetricsError> {
    let db = crate::shared::data::db::get_connection();
    let squads = a003_squad::repository::list_all(db).await?;
    let professionals = a004_professional::repository::list_all(db).await?;
    Ok(build_organogram(squads, professionals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_squad::aggregate::SquadFormData;
    use contracts::domain::a004_professional::aggregate::{ProfessionalFormData, ProfileType};

    fn squad(name: &str, manager_id: Option<String>) -> Squad {
        Squad::new_for_insert(SquadFormData {
            name: name.to_string(),
            area: "Tech".to_string(),
            description: String::new(),
            manager_id,
            sort_order: 0,
        })
    }

    fn professional(name: &str, squad_id: Option<String>) -> Professional {
        Professional::new_for_insert(ProfessionalFormData {
            profile_id: None,
            name: name.to_string(),
            email: format!("{}@example.com", name),
            job_role: "Engineer".to_string(),
            squad_id,
            seniority: "Pleno".to_string(),
            profile_type: ProfileType::Colaborador,
            avatar: None,
            manager_id: None,
            managed_squads: vec![],
        })
    }

    #[test]
    fn test_members_attach_to_their_squads() {
        let s = squad("Controladoria", None);
        let sid = s.to_string_id();
        let in_squad = professional("ana", Some(sid.clone()));
        let outside = professional("bruno", None);

        let tree = build_organogram(vec![s], vec![in_squad, outside]);
        assert_eq!(tree.squads.len(), 1);
        assert_eq!(tree.squads[0].members.len(), 1);
        assert_eq!(tree.squads[0].members[0].name, "ana");
        assert_eq!(tree.unassigned.len(), 1);
        assert_eq!(tree.unassigned[0].name, "bruno");
    }

    #[test]
    fn test_manager_is_flagged_and_listed_first() {
        let manager = professional("gestora", None);
        let manager_id = manager.to_string_id();
        let s = squad("RH", Some(manager_id.clone()));
        let sid = s.to_string_id();

        let mut manager = manager;
        manager.squad_id = Some(sid.clone());
        let member = professional("dev", Some(sid));

        let tree = build_organogram(vec![s], vec![member, manager]);
        let members = &tree.squads[0].members;
        assert!(members[0].is_manager);
        assert_eq!(members[0].name, "gestora");
        assert!(!members[1].is_manager);
    }
}
