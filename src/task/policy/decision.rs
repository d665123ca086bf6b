//! Policy outcomes.

use super::TaskAction;
use crate::identity::domain::Role;
use serde::Serialize;
use thiserror::Error;

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    /// The caller's role may never perform the action.
    #[error("role '{role}' may not {action} tasks")]
    RoleNotPermitted {
        /// Caller role.
        role: Role,
        /// Attempted action.
        action: TaskAction,
    },
    /// The caller is neither the assignee nor the creator of the task.
    #[error("not assigned or owner")]
    NotAssignedOrOwner,
}

/// Result of evaluating the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The action may proceed.
    Allow,
    /// The action is refused.
    Deny(DenialReason),
}

impl AccessDecision {
    /// Returns `true` when the decision allows the action.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Chains a further check, evaluated only if this decision allows.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Allow => next(),
            Self::Deny(reason) => Self::Deny(reason),
        }
    }

    /// Converts the decision into a `Result` for `?` propagation.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] carrying `action` and the denial reason.
    pub const fn into_result(self, action: TaskAction) -> Result<(), AccessDenied> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(AccessDenied { action, reason }),
        }
    }
}

/// A denied action and the reason for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[error("{action} denied: {reason}")]
pub struct AccessDenied {
    /// The refused action.
    pub action: TaskAction,
    /// Why it was refused.
    pub reason: DenialReason,
}
