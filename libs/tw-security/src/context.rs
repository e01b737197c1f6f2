use std::collections::BTreeSet;

use crate::role::{DashboardRole, Role};

/// Identity of the caller for a request or operation.
///
/// An anonymous context has no subject and no roles; an authenticated one
/// holds at least [`Role::Client`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    subject_id: Option<String>,
    email: Option<String>,
    roles: BTreeSet<Role>,
}

impl SecurityContext {
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated user holding the given roles.
    #[must_use]
    pub fn user(subject_id: impl Into<String>, roles: &[Role]) -> Self {
        roles
            .iter()
            .fold(Self::builder().subject_id(subject_id), |b, r| b.role(*r))
            .build()
    }

    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.subject_id.is_some()
    }

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Admin implicitly holds every role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&Role::Admin) || self.roles.contains(&role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }

    #[must_use]
    pub fn dashboard(&self) -> Option<DashboardRole> {
        if !self.is_authenticated() {
            return None;
        }
        DashboardRole::resolve(&self.roles)
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<String>,
    email: Option<String>,
    roles: BTreeSet<Role>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        // Role claims without a subject are meaningless; an anonymous caller has none.
        // A signed-in user without claims is a client.
        let roles = match (&self.subject_id, self.roles.is_empty()) {
            (None, _) => BTreeSet::new(),
            (Some(_), true) => BTreeSet::from([Role::Client]),
            (Some(_), false) => self.roles,
        };
        SecurityContext {
            subject_id: self.subject_id,
            email: self.email,
            roles,
        }
    }
}
