//! Listing lifecycle shared by therapist profiles and clinics.
//!
//! - `draft | rejected | live --submit--> pending_approval`
//! - `pending_approval --approve--> live`
//! - `pending_approval --reject--> rejected`
//!
//! A live listing is resubmitted when its membership is renewed.

use std::fmt;

use discovery_sdk::LifecycleStatus;
use marketplace_sdk::ModerationDecision;

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Owner sends the listing for review.
    Submit,
    Approve,
    Reject,
}

impl LifecycleAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleAction::Submit => "submit",
            LifecycleAction::Approve => "approve",
            LifecycleAction::Reject => "reject",
        }
    }
}

impl From<ModerationDecision> for LifecycleAction {
    fn from(decision: ModerationDecision) -> Self {
        match decision {
            ModerationDecision::Approve => LifecycleAction::Approve,
            ModerationDecision::Reject => LifecycleAction::Reject,
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status reached by applying `action` in `from`.
pub fn transition(
    from: LifecycleStatus,
    action: LifecycleAction,
) -> Result<LifecycleStatus, DomainError> {
    match (from, action) {
        (
            LifecycleStatus::Draft | LifecycleStatus::Rejected | LifecycleStatus::Live,
            LifecycleAction::Submit,
        ) => Ok(LifecycleStatus::PendingApproval),
        (LifecycleStatus::PendingApproval, LifecycleAction::Approve) => Ok(LifecycleStatus::Live),
        (LifecycleStatus::PendingApproval, LifecycleAction::Reject) => {
            Ok(LifecycleStatus::Rejected)
        }
        _ => Err(DomainError::invalid_transition(from, action.as_str())),
    }
}
