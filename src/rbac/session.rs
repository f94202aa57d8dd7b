//! Session-scoped role tracking.
//!
//! An [`AccessSession`] holds the resolved actor for one signed-in session
//! and publishes it on a `watch` channel. Auth events arrive on a
//! `broadcast` channel; each one triggers exactly one re-resolution.

use std::sync::Arc;

use feedesk_core::{AppError, Capability, Permission, Role, has_capability};
use feedesk_models::{Actor, ResolvedActor};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::resolver::RoleResolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Actor),
    TokenRefreshed(Actor),
    SignedOut,
}

pub struct AccessSession {
    resolver: Arc<RoleResolver>,
    state: watch::Sender<Option<ResolvedActor>>,
}

impl AccessSession {
    pub fn new(resolver: Arc<RoleResolver>) -> Self {
        let (state, _) = watch::channel(None);
        Self { resolver, state }
    }

    /// Receives the latest resolved actor on every change. Dropping the
    /// receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<Option<ResolvedActor>> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Option<ResolvedActor> {
        self.state.borrow().clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().as_ref().and_then(|resolved| resolved.role)
    }

    pub fn is_allowed(&self, permission: Permission) -> bool {
        feedesk_core::is_allowed(self.role(), permission)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        has_capability(self.role(), capability)
    }

    /// Applies one auth event.
    ///
    /// If resolution fails the actor stays signed in with no role and the
    /// error is returned.
    pub async fn handle_event(&self, event: AuthEvent) -> Result<(), AppError> {
        let actor = match event {
            AuthEvent::SignedOut => {
                info!("Session signed out");
                self.state.send_replace(None);
                return Ok(());
            }
            AuthEvent::SignedIn(actor) | AuthEvent::TokenRefreshed(actor) => actor,
        };

        match self.resolver.resolve(&actor).await {
            Ok(role) => {
                debug!(user_id = %actor.id, role = ?role, "Session role resolved");
                self.state.send_replace(Some(ResolvedActor::new(actor, role)));
                Ok(())
            }
            Err(e) => {
                error!(user_id = %actor.id, error = %e, "Failed to resolve session role");
                self.state.send_replace(Some(ResolvedActor::new(actor, None)));
                Err(e)
            }
        }
    }

    /// Drives the session from an auth event stream until the sender side
    /// closes.
    pub fn listen(self: Arc<Self>, mut events: broadcast::Receiver<AuthEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if let Err(e) = self.handle_event(event).await {
                            debug!(error = %e, "Auth event left the session without a role");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Session fell behind auth events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl std::fmt::Debug for AccessSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessSession")
            .field("current", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedesk_config::AccessConfig;
    use feedesk_core::permissions::PaymentAction;
    use feedesk_db::MemoryRoleStore;
    use feedesk_models::UserId;

    #[tokio::test]
    async fn test_sign_in_then_sign_out() {
        let store = Arc::new(MemoryRoleStore::new());
        let user_id = UserId::new();
        store.insert(user_id, Role::Director);

        let resolver = Arc::new(RoleResolver::new(store, AccessConfig::default()));
        let session = AccessSession::new(resolver);
        let mut rx = session.subscribe();

        session
            .handle_event(AuthEvent::SignedIn(Actor::new(user_id, "d@school.org")))
            .await
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().and_then(|r| r.role), Some(Role::Director));
        assert!(session.has_capability(Capability::ManageTerms));

        session.handle_event(AuthEvent::SignedOut).await.unwrap();
        assert_eq!(session.current(), None);
        assert_eq!(session.role(), None);
    }

    #[tokio::test]
    async fn test_listen_applies_events_in_order() {
        let store = Arc::new(MemoryRoleStore::new());
        let user_id = UserId::new();
        store.insert(user_id, Role::SchoolAdmin);

        let resolver = Arc::new(RoleResolver::new(store, AccessConfig::default()));
        let session = Arc::new(AccessSession::new(resolver));
        let mut rx = session.subscribe();

        let (tx, events) = broadcast::channel(8);
        let task = session.clone().listen(events);

        tx.send(AuthEvent::SignedIn(Actor::new(user_id, "clerk@school.org")))
            .unwrap();
        rx.changed().await.unwrap();
        assert!(session.is_allowed(Permission::Payments(PaymentAction::Create)));
        assert!(!session.is_allowed(Permission::Payments(PaymentAction::Refund)));

        tx.send(AuthEvent::SignedOut).unwrap();
        drop(tx);
        task.await.unwrap();
        assert_eq!(session.current(), None);
    }
}
