use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::context::SecurityContext;
use crate::role::{DashboardRole, Role};

/// Stored user document. Roles mirror the auth provider's custom claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
}

impl UserProfile {
    /// New sign-ups start as clients.
    #[must_use]
    pub fn new_client(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: None,
            roles: BTreeSet::from([Role::Client]),
        }
    }

    #[must_use]
    pub fn security_context(&self) -> SecurityContext {
        self.roles
            .iter()
            .fold(
                SecurityContext::builder()
                    .subject_id(self.id.clone())
                    .email(self.email.clone()),
                |b, r| b.role(*r),
            )
            .build()
    }

    #[must_use]
    pub fn dashboard(&self) -> Option<DashboardRole> {
        DashboardRole::resolve(&self.roles)
    }
}
