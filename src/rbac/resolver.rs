use std::sync::Arc;

use feedesk_config::AccessConfig;
use feedesk_core::{AppError, Role};
use feedesk_db::RoleStore;
use feedesk_models::{Actor, ResolvedActor};
use tracing::{debug, instrument};

/// Resolves the single role an actor holds.
///
/// Sources are consulted in order and the first hit wins:
///
/// 1. the break-glass allowlist from [`AccessConfig`]
/// 2. the role store
/// 3. the role label embedded in the session token
#[derive(Clone)]
pub struct RoleResolver {
    store: Arc<dyn RoleStore>,
    config: AccessConfig,
}

impl RoleResolver {
    pub fn new(store: Arc<dyn RoleStore>, config: AccessConfig) -> Self {
        Self { store, config }
    }

    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn resolve(&self, actor: &Actor) -> Result<Option<Role>, AppError> {
        if let Some(role) = self.config.forced_role(actor.id.into_inner(), &actor.email) {
            debug!(role = %role, "Role forced by break-glass allowlist");
            return Ok(Some(role));
        }

        if let Some(role) = self.store.role_for(actor.id).await? {
            return Ok(Some(role));
        }

        let embedded = actor.embedded_role();
        if embedded.is_some() {
            debug!("Using role embedded in session token");
        }
        Ok(embedded)
    }

    pub async fn resolve_actor(&self, actor: Actor) -> Result<ResolvedActor, AppError> {
        let role = self.resolve(&actor).await?;
        Ok(ResolvedActor::new(actor, role))
    }
}

impl std::fmt::Debug for RoleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleResolver")
            .field("break_glass_entries", &self.config.break_glass.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedesk_config::BreakGlassEntry;
    use feedesk_db::MemoryRoleStore;
    use feedesk_models::UserId;

    fn resolver_with(store: MemoryRoleStore, entries: &[&str]) -> RoleResolver {
        let config = AccessConfig {
            break_glass: entries
                .iter()
                .map(|raw| BreakGlassEntry::parse(raw).unwrap())
                .collect(),
            audit_enabled: true,
        };
        RoleResolver::new(Arc::new(store), config)
    }

    #[tokio::test]
    async fn test_stored_role_beats_embedded_label() {
        let store = MemoryRoleStore::new();
        let user_id = UserId::new();
        store.insert(user_id, Role::SchoolAdmin);

        let resolver = resolver_with(store, &[]);
        let actor = Actor::new(user_id, "clerk@school.org").with_role_label("director");

        assert_eq!(
            resolver.resolve(&actor).await.unwrap(),
            Some(Role::SchoolAdmin)
        );
    }

    #[tokio::test]
    async fn test_break_glass_email_is_case_insensitive() {
        let store = MemoryRoleStore::new();
        let user_id = UserId::new();
        store.insert(user_id, Role::SchoolAdmin);

        let resolver = resolver_with(store, &["owner@school.org=super_admin"]);
        let actor = Actor::new(user_id, " Owner@School.ORG ");

        assert_eq!(
            resolver.resolve(&actor).await.unwrap(),
            Some(Role::SuperAdmin)
        );
    }

    #[tokio::test]
    async fn test_no_sources_means_no_role() {
        let resolver = resolver_with(MemoryRoleStore::new(), &[]);
        let actor = Actor::new(UserId::new(), "nobody@school.org");
        let resolved = resolver.resolve_actor(actor).await.unwrap();
        assert_eq!(resolved.role, None);
        assert!(resolved.permissions().is_empty());
    }
}
