use serde::{Deserialize, Serialize};

/// Application role, a closed set ordered master > admin > gestao > usuario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Master,
    Admin,
    Gestao,
    Usuario,
}

impl AppRole {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "master" => Ok(AppRole::Master),
            "admin" => Ok(AppRole::Admin),
            "gestao" => Ok(AppRole::Gestao),
            "usuario" => Ok(AppRole::Usuario),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Master => "master",
            AppRole::Admin => "admin",
            AppRole::Gestao => "gestao",
            AppRole::Usuario => "usuario",
        }
    }

    /// Higher wins when a user carries several roles
    pub fn precedence(&self) -> u8 {
        match self {
            AppRole::Master => 4,
            AppRole::Admin => 3,
            AppRole::Gestao => 2,
            AppRole::Usuario => 1,
        }
    }

    /// Pick the strongest role from a provider-supplied list
    pub fn highest(roles: &[AppRole]) -> Option<AppRole> {
        roles.iter().copied().max_by_key(|r| r.precedence())
    }

    /// Roles allowed to run admin-only mutations
    pub fn is_admin(&self) -> bool {
        matches!(self, AppRole::Master | AppRole::Admin)
    }
}

/// Current user as reported by the external identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_role_wins() {
        let roles = vec![AppRole::Usuario, AppRole::Admin, AppRole::Gestao];
        assert_eq!(AppRole::highest(&roles), Some(AppRole::Admin));
        assert_eq!(AppRole::highest(&[]), None);
    }

    #[test]
    fn test_role_round_trip() {
        for s in ["master", "admin", "gestao", "usuario"] {
            assert_eq!(AppRole::from_str(s).unwrap().as_str(), s);
        }
        assert!(AppRole::from_str("root").is_err());
    }
}
