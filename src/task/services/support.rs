//! Helpers shared by the task services.

use crate::identity::{
    domain::{Identity, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::task::{
    domain::{Task, TaskView, UserRef},
    policy::{AccessDecision, TaskAction},
};
use std::collections::HashMap;
use tracing::debug;

use super::TaskServiceResult;

/// Converts a policy decision into a service result, logging denials.
pub(super) fn enforce(
    actor: &Identity,
    action: TaskAction,
    decision: AccessDecision,
) -> TaskServiceResult<()> {
    decision.into_result(action).map_err(|denied| {
        debug!(
            actor_id = %actor.id(),
            role = %actor.role(),
            reason = %denied.reason,
            "task action denied"
        );
        denied.into()
    })
}

/// Renders tasks as views, resolving each distinct user once.
pub(super) async fn render_views<U>(
    directory: &U,
    tasks: &[Task],
) -> Result<Vec<TaskView>, UserDirectoryError>
where
    U: UserDirectory + ?Sized,
{
    let mut resolved = HashMap::new();
    let mut views = Vec::with_capacity(tasks.len());
    for task in tasks {
        views.push(render_with(directory, &mut resolved, task).await?);
    }
    Ok(views)
}

/// Renders a single task.
pub(super) async fn render_view<U>(directory: &U, task: &Task) -> Result<TaskView, UserDirectoryError>
where
    U: UserDirectory + ?Sized,
{
    render_with(directory, &mut HashMap::new(), task).await
}

async fn render_with<U>(
    directory: &U,
    resolved: &mut HashMap<UserId, UserRef>,
    task: &Task,
) -> Result<TaskView, UserDirectoryError>
where
    U: UserDirectory + ?Sized,
{
    let assignee = resolve_user(directory, resolved, task.assigned_to()).await?;
    let creator = resolve_user(directory, resolved, task.created_by()).await?;
    Ok(TaskView::new(task, assignee, creator))
}

async fn resolve_user<U>(
    directory: &U,
    resolved: &mut HashMap<UserId, UserRef>,
    id: UserId,
) -> Result<UserRef, UserDirectoryError>
where
    U: UserDirectory + ?Sized,
{
    if let Some(cached) = resolved.get(&id) {
        return Ok(cached.clone());
    }
    let user_ref = directory
        .find_by_id(id)
        .await?
        .map_or(UserRef::Unknown { id }, |user| UserRef::Known(user.summary()));
    resolved.insert(id, user_ref.clone());
    Ok(user_ref)
}
