use contracts::system::auth::AppRole;
use std::sync::RwLock;

/// Cache of the effective role for the last-seen user.
///
/// Owned by whoever wires the request pipeline and injected as a dependency,
/// never reached through module state. Sign-out calls invalidate(); a request
/// from a different user id replaces the entry.
#[derive(Debug, Default)]
pub struct RoleCache {
    inner: RwLock<Option<(String, AppRole)>>,
}

impl RoleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective role for the user, from cache when the id matches the last
    /// resolution, otherwise recomputed from the provider-supplied list.
    pub fn resolve(&self, user_id: &str, roles: &[AppRole]) -> Option<AppRole> {
        if let Some((cached_id, cached_role)) = self.inner.read().unwrap().as_ref() {
            if cached_id == user_id {
                return Some(*cached_role);
            }
        }

        let role = AppRole::highest(roles)?;
        *self.inner.write().unwrap() = Some((user_id.to_string(), role));
        Some(role)
    }

    /// Forget the cached role; called on sign-out
    pub fn invalidate(&self) {
        *self.inner.write().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_highest_role_and_caches_it() {
        let cache = RoleCache::new();
        let role = cache.resolve("user-1", &[AppRole::Usuario, AppRole::Gestao]);
        assert_eq!(role, Some(AppRole::Gestao));

        // Cache hit: the stored role answers even with a different list
        let role = cache.resolve("user-1", &[AppRole::Usuario]);
        assert_eq!(role, Some(AppRole::Gestao));
    }

    #[test]
    fn test_user_switch_replaces_the_entry() {
        let cache = RoleCache::new();
        cache.resolve("user-1", &[AppRole::Master]);
        let role = cache.resolve("user-2", &[AppRole::Usuario]);
        assert_eq!(role, Some(AppRole::Usuario));
    }

    #[test]
    fn test_invalidate_forces_recomputation() {
        let cache = RoleCache::new();
        cache.resolve("user-1", &[AppRole::Admin]);
        cache.invalidate();
        let role = cache.resolve("user-1", &[AppRole::Usuario]);
        assert_eq!(role, Some(AppRole::Usuario));
    }

    #[test]
    fn test_no_roles_resolves_to_none() {
        let cache = RoleCache::new();
        assert_eq!(cache.resolve("user-1", &[]), None);
    }
}
