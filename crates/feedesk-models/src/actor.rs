//! The authenticated actor and its resolved access.

use feedesk_core::{Permission, Role, capabilities_for, effective_permissions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::ids::UserId;

/// The identity behind the current session.
///
/// `role_label` is whatever role metadata the identity provider embedded in
/// the session, unparsed. It is only consulted when role storage has no
/// record for the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    pub id: UserId,
    pub email: String,
    pub role_label: Option<String>,
}

impl Actor {
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role_label: None,
        }
    }

    pub fn with_role_label(mut self, label: impl Into<String>) -> Self {
        self.role_label = Some(label.into());
        self
    }

    /// The embedded role metadata, if it names a known role.
    pub fn embedded_role(&self) -> Option<Role> {
        self.role_label.as_deref().and_then(|l| l.parse().ok())
    }
}

/// An actor together with the role resolved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedActor {
    pub actor: Actor,
    pub role: Option<Role>,
}

impl ResolvedActor {
    pub fn new(actor: Actor, role: Option<Role>) -> Self {
        Self { actor, role }
    }

    pub fn permissions(&self) -> Vec<Permission> {
        effective_permissions(self.role)
    }

    pub fn capabilities(&self) -> BTreeMap<&'static str, bool> {
        capabilities_for(self.role)
    }
}
