//! Authorization policy for task operations.
//!
//! Decisions are pure functions of the caller's [`Identity`] and, where an
//! operation targets one task, that task. Evaluation order:
//!
//! 1. [`authorize_action`]: the role gate, checked before any task is
//!    loaded.
//! 2. [`authorize_task_access`]: the task-level gate for reading or updating
//!    a specific task. Services check that the task exists first.
//!
//! Reassignment is gated separately by `authorize_action(actor,
//! TaskAction::Reassign)` on top of the task-level gate. Listings are bounded
//! by [`visibility_scope`].
//!
//! [`Identity`]: crate::identity::domain::Identity

mod action;
mod decision;
mod rules;
mod scope;

pub use action::TaskAction;
pub use decision::{AccessDecision, AccessDenied, DenialReason};
pub use rules::{authorize_action, authorize_task_access, can_perform};
pub use scope::visibility_scope;
