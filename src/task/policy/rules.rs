//! Policy rules.

use super::{AccessDecision, DenialReason, TaskAction};
use crate::identity::domain::{Identity, Role};
use crate::task::domain::Task;

/// Role gate: may `actor`'s role attempt `action` at all?
///
/// Read and update always pass here; the task-level gate decides them.
#[must_use]
pub const fn authorize_action(actor: &Identity, action: TaskAction) -> AccessDecision {
    let role = actor.role();
    let permitted = match (role, action) {
        (_, TaskAction::List | TaskAction::Read | TaskAction::Update) => true,
        (Role::Admin | Role::Manager, TaskAction::Create | TaskAction::Reassign) => true,
        (Role::User, TaskAction::Create | TaskAction::Reassign) => false,
        (Role::Admin, TaskAction::Delete) => true,
        (Role::Manager | Role::User, TaskAction::Delete) => false,
    };
    if permitted {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(DenialReason::RoleNotPermitted { role, action })
    }
}

/// Task-level gate: may `actor` read or update this particular task?
#[must_use]
pub fn authorize_task_access(actor: &Identity, task: &Task) -> AccessDecision {
    match actor.role() {
        Role::Admin => AccessDecision::Allow,
        Role::Manager => manager_task_access(actor, task),
        Role::User => user_task_access(actor, task),
    }
}

/// Evaluates the full policy for `action`.
///
/// `task` is the already-loaded target for read and update; with `None`
/// only the role gate is evaluated.
#[must_use]
pub fn can_perform(actor: &Identity, action: TaskAction, task: Option<&Task>) -> AccessDecision {
    authorize_action(actor, action).and_then(|| match task {
        Some(target) if action.targets_task() => authorize_task_access(actor, target),
        _ => AccessDecision::Allow,
    })
}

// Managers currently see every task. Team membership does not exist yet;
// when it does, scoping belongs here.
const fn manager_task_access(_actor: &Identity, _task: &Task) -> AccessDecision {
    AccessDecision::Allow
}

fn user_task_access(actor: &Identity, task: &Task) -> AccessDecision {
    if task.involves(actor.id()) {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(DenialReason::NotAssignedOrOwner)
    }
}
