use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role claim carried by an authenticated user. Users may hold several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Therapist,
    ClinicOwner,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Therapist => "therapist",
            Role::ClinicOwner => "clinic_owner",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "therapist" => Ok(Role::Therapist),
            "clinic_owner" | "clinicowner" | "clinic" => Ok(Role::ClinicOwner),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Dashboard a user lands on, resolved once from the role set.
///
/// Variants are declared in priority order: `Admin > Therapist > ClinicOwner > Client`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DashboardRole {
    Admin,
    Therapist,
    ClinicOwner,
    Client,
}

impl DashboardRole {
    const PRIORITY: [(Role, DashboardRole); 4] = [
        (Role::Admin, DashboardRole::Admin),
        (Role::Therapist, DashboardRole::Therapist),
        (Role::ClinicOwner, DashboardRole::ClinicOwner),
        (Role::Client, DashboardRole::Client),
    ];

    /// Highest-priority dashboard for the given roles, `None` for an empty set.
    #[must_use]
    pub fn resolve(roles: &BTreeSet<Role>) -> Option<Self> {
        Self::PRIORITY
            .iter()
            .find(|(role, _)| roles.contains(role))
            .map(|(_, dashboard)| *dashboard)
    }

    #[must_use]
    pub fn home_path(self) -> &'static str {
        match self {
            DashboardRole::Admin => "/dashboard/admin",
            DashboardRole::Therapist => "/dashboard/therapist",
            DashboardRole::ClinicOwner => "/dashboard/clinic",
            DashboardRole::Client => "/dashboard/client",
        }
    }
}

/// Role-gated sub-tree under `/dashboard/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardSection {
    Client,
    Therapist,
    Clinic,
    Admin,
}

impl DashboardSection {
    /// Parse the first path segment after `/dashboard/`.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "client" => Some(DashboardSection::Client),
            "therapist" => Some(DashboardSection::Therapist),
            "clinic" => Some(DashboardSection::Clinic),
            "admin" => Some(DashboardSection::Admin),
            _ => None,
        }
    }

    #[must_use]
    pub fn required_role(self) -> Role {
        match self {
            DashboardSection::Client => Role::Client,
            DashboardSection::Therapist => Role::Therapist,
            DashboardSection::Clinic => Role::ClinicOwner,
            DashboardSection::Admin => Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(list: &[Role]) -> BTreeSet<Role> {
        list.iter().copied().collect()
    }

    #[test]
    fn admin_dominates_every_other_role() {
        let all = roles(&[Role::Client, Role::ClinicOwner, Role::Therapist, Role::Admin]);
        assert_eq!(DashboardRole::resolve(&all), Some(DashboardRole::Admin));
    }

    #[test]
    fn therapist_beats_clinic_owner_and_client() {
        let r = roles(&[Role::Client, Role::ClinicOwner, Role::Therapist]);
        assert_eq!(DashboardRole::resolve(&r), Some(DashboardRole::Therapist));
        assert_eq!(
            DashboardRole::resolve(&roles(&[Role::Client, Role::ClinicOwner])),
            Some(DashboardRole::ClinicOwner)
        );
    }

    #[test]
    fn empty_role_set_has_no_dashboard() {
        assert_eq!(DashboardRole::resolve(&BTreeSet::new()), None);
    }

    #[test]
    fn home_paths_match_sections() {
        for dashboard in [
            DashboardRole::Admin,
            DashboardRole::Therapist,
            DashboardRole::ClinicOwner,
            DashboardRole::Client,
        ] {
            let segment = dashboard
                .home_path()
                .trim_start_matches("/dashboard/");
            assert!(DashboardSection::from_segment(segment).is_some());
        }
    }

    #[test]
    fn parses_role_names_leniently() {
        assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("clinic_owner".parse::<Role>(), Ok(Role::ClinicOwner));
        assert!("superuser".parse::<Role>().is_err());
    }
}
