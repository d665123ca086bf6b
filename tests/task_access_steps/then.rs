//! Then steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use rstest_bdd_macros::then;
use taskwarden::task::{
    domain::TaskStatus,
    ports::{TaskQuery, TaskRepository},
    services::TaskServiceError,
};

#[then("the request is forbidden")]
fn request_is_forbidden(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing service outcome"))?;
    if !matches!(outcome, Err(TaskServiceError::Forbidden(_))) {
        return Err(eyre::eyre!("expected Forbidden, got {outcome:?}"));
    }
    Ok(())
}

#[then("the task is created")]
fn task_is_created(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing service outcome"))?;
    let view = outcome
        .as_ref()
        .map_err(|err| eyre::eyre!("expected task creation to succeed: {err}"))?;
    eyre::ensure!(view.status == TaskStatus::Pending);
    Ok(())
}

#[then("the read succeeds")]
fn read_succeeds(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    match &world.last_outcome {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected successful read, got {other:?}")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskAccessWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task()?;
    eyre::ensure!(
        task.status == expected,
        "expected status {expected}, found {}",
        task.status
    );
    Ok(())
}

#[then("the task has a completion time")]
fn task_has_completion_time(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.task()?.completed_at.is_some(),
        "completed task should carry completed_at"
    );
    Ok(())
}

#[then("the task has no completion time")]
fn task_has_no_completion_time(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.task()?.completed_at.is_none(),
        "open task should not carry completed_at"
    );
    Ok(())
}

#[then("the request fails because the assignee does not exist")]
fn assignee_missing(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    match &world.last_outcome {
        Some(Err(TaskServiceError::AssigneeNotFound(_))) => Ok(()),
        other => Err(eyre::eyre!("expected AssigneeNotFound, got {other:?}")),
    }
}

#[then("no tasks are stored")]
fn no_tasks_stored(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let stored = run_async(world.repository.count(&TaskQuery::all()))?;
    eyre::ensure!(stored == 0, "expected empty store, found {stored} tasks");
    Ok(())
}

#[then("the page holds {count:usize} tasks")]
fn page_holds(world: &TaskAccessWorld, count: usize) -> Result<(), eyre::Report> {
    let page = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing result"))?;
    eyre::ensure!(
        page.tasks.len() == count,
        "expected {count} tasks, found {}",
        page.tasks.len()
    );
    Ok(())
}

#[then("the listing reports {pages:u64} pages with a previous page and no next page")]
fn listing_reports_pages(world: &TaskAccessWorld, pages: u64) -> Result<(), eyre::Report> {
    let pagination = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing result"))?
        .pagination;
    eyre::ensure!(pagination.total_pages == pages);
    eyre::ensure!(pagination.has_prev, "expected a previous page");
    eyre::ensure!(!pagination.has_next, "expected no next page");
    Ok(())
}
