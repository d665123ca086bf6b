//! Task repository tests against `PostgreSQL`.

use super::helpers::{TaskTemplate, TestDatabase, at, test_runtime};
use chrono::Duration;
use eyre::{ensure, eyre};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use taskwarden::identity::domain::UserId;
use taskwarden::task::{
    domain::{CalendarMonth, Task, TaskId, TaskPriority, TaskStatus},
    ports::{PageWindow, TaskQuery, TaskRepository, TaskRepositoryError, TaskSort},
};

#[rstest]
fn stored_task_round_trips_every_column(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "round_trip")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let task = TaskTemplate {
        status: TaskStatus::Completed,
        priority: TaskPriority::Urgent,
        tags: &["ops", "security"],
        ..TaskTemplate::new(UserId::new(), UserId::new())?
    }
    .build()?;

    rt.block_on(tasks.insert(&task))?;
    let loaded = rt.block_on(tasks.find_by_id(task.id()))?;

    ensure!(
        loaded.as_ref() == Some(&task),
        "stored task changed on load: {loaded:?}"
    );
    Ok(())
}

#[rstest]
fn reopening_clears_the_completion_stamp(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "reopen")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let mut task = TaskTemplate {
        status: TaskStatus::Completed,
        ..TaskTemplate::new(UserId::new(), UserId::new())?
    }
    .build()?;
    rt.block_on(tasks.insert(&task))?;

    task.set_status(TaskStatus::InProgress, &DefaultClock);
    rt.block_on(tasks.update(&task))?;
    let reopened = rt
        .block_on(tasks.find_by_id(task.id()))?
        .ok_or_else(|| eyre!("task vanished after reopening"))?;
    ensure!(reopened.status() == TaskStatus::InProgress);
    ensure!(
        reopened.completed_at().is_none(),
        "completed_at should be NULL once the task leaves completed"
    );

    task.set_status(TaskStatus::Completed, &DefaultClock);
    rt.block_on(tasks.update(&task))?;
    let completed = rt
        .block_on(tasks.find_by_id(task.id()))?
        .ok_or_else(|| eyre!("task vanished after completion"))?;
    ensure!(completed.completed_at().is_some());
    Ok(())
}

#[rstest]
fn update_of_unknown_task_is_not_found(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "update_missing")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let task = TaskTemplate::new(UserId::new(), UserId::new())?.build()?;

    let result = rt.block_on(tasks.update(&task));

    ensure!(
        matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn inserting_the_same_id_twice_is_a_duplicate(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "duplicate")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let task = TaskTemplate::new(UserId::new(), UserId::new())?.build()?;

    rt.block_on(tasks.insert(&task))?;
    let again = rt.block_on(tasks.insert(&task));

    ensure!(
        matches!(again, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected DuplicateTask, got {again:?}"
    );
    Ok(())
}

#[rstest]
fn delete_reports_whether_a_row_was_removed(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "delete")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let task = TaskTemplate::new(UserId::new(), UserId::new())?.build()?;
    rt.block_on(tasks.insert(&task))?;

    ensure!(rt.block_on(tasks.delete(task.id()))?);
    ensure!(!rt.block_on(tasks.delete(task.id()))?);
    ensure!(rt.block_on(tasks.find_by_id(task.id()))?.is_none());
    Ok(())
}

#[rstest]
#[case::percent("FIX 100%", "Fix 100% CPU")]
#[case::underscore("e_c", "Rename snake_case keys")]
fn search_matches_wildcard_characters_literally(
    shared_test_cluster: &'static TestCluster,
    #[case] needle: &str,
    #[case] expected: &str,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "search")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let owner = UserId::new();
    for title in [
        "Fix 100% CPU",
        "Fix 1000 CPU",
        "Rename snake_case keys",
        "Rename snakeXcase keys",
    ] {
        let task = TaskTemplate {
            title,
            ..TaskTemplate::new(owner, owner)?
        }
        .build()?;
        rt.block_on(tasks.insert(&task))?;
    }
    let query = TaskQuery::all().with_search(needle);

    let found = rt.block_on(tasks.find(&query, TaskSort::CreatedAtDesc, None))?;
    let total = rt.block_on(tasks.count(&query))?;

    let titles: Vec<&str> = found.iter().map(|task| task.title().as_str()).collect();
    ensure!(titles == [expected], "search {needle:?} matched {titles:?}");
    ensure!(total == 1);
    Ok(())
}

#[rstest]
fn assignee_scope_pages_newest_first(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "paging")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let alice = UserId::new();
    let bob = UserId::new();
    let base = at(2026, 1, 1)?;
    let mut alice_tasks = Vec::new();
    for offset in 0..15 {
        let task = TaskTemplate {
            created_at: base + Duration::minutes(offset),
            ..TaskTemplate::new(alice, bob)?
        }
        .build()?;
        rt.block_on(tasks.insert(&task))?;
        alice_tasks.push(task);
    }
    for offset in 0..3 {
        let task = TaskTemplate {
            created_at: base + Duration::days(1) + Duration::minutes(offset),
            ..TaskTemplate::new(bob, alice)?
        }
        .build()?;
        rt.block_on(tasks.insert(&task))?;
    }
    let scope = TaskQuery::all().assigned_to(alice);

    let total = rt.block_on(tasks.count(&scope))?;
    let second_page = rt.block_on(tasks.find(
        &scope,
        TaskSort::CreatedAtDesc,
        Some(PageWindow::new(10, 10)),
    ))?;

    ensure!(total == 15);
    let expected: Vec<TaskId> = alice_tasks.iter().take(5).rev().map(Task::id).collect();
    let actual: Vec<TaskId> = second_page.iter().map(Task::id).collect();
    ensure!(actual == expected, "second page held {actual:?}");
    Ok(())
}

#[rstest]
fn equal_creation_times_are_ordered_by_id(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "ties")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let owner = UserId::new();
    let mut ids = Vec::new();
    for _ in 0..4 {
        let task = TaskTemplate::new(owner, owner)?.build()?;
        rt.block_on(tasks.insert(&task))?;
        ids.push(task.id());
    }
    ids.sort();

    let found = rt.block_on(tasks.find(&TaskQuery::all(), TaskSort::CreatedAtDesc, None))?;

    let actual: Vec<TaskId> = found.iter().map(Task::id).collect();
    ensure!(actual == ids, "ties were not broken by id: {actual:?}");
    Ok(())
}

#[rstest]
fn due_window_selects_the_month_in_due_order(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "due_window")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let owner = UserId::new();
    let end_of_march = at(2026, 3, 31)? + Duration::hours(23);
    let first_of_march = at(2026, 3, 1)?;
    let mut inside = Vec::new();
    for (due, in_march) in [
        (end_of_march, true),
        (at(2026, 4, 1)?, false),
        (first_of_march, true),
        (at(2026, 2, 28)?, false),
    ] {
        let task = TaskTemplate {
            due,
            ..TaskTemplate::new(owner, owner)?
        }
        .build()?;
        rt.block_on(tasks.insert(&task))?;
        if in_march {
            inside.push(task);
        }
    }
    inside.sort_by_key(|task| task.due_date());
    let query = TaskQuery::all().due_within(CalendarMonth::new(2026, 3)?.window());

    let found = rt.block_on(tasks.find(&query, TaskSort::DueDateAsc, None))?;

    let expected: Vec<TaskId> = inside.iter().map(Task::id).collect();
    let actual: Vec<TaskId> = found.iter().map(Task::id).collect();
    ensure!(actual == expected, "march window held {actual:?}");
    Ok(())
}

#[rstest]
fn status_and_priority_filters_combine(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "filters")?;
    let tasks = db.tasks();
    let rt = test_runtime()?;
    let owner = UserId::new();
    let mut wanted = None;
    for (status, priority) in [
        (TaskStatus::InProgress, TaskPriority::High),
        (TaskStatus::InProgress, TaskPriority::Low),
        (TaskStatus::Pending, TaskPriority::High),
    ] {
        let task = TaskTemplate {
            status,
            priority,
            ..TaskTemplate::new(owner, owner)?
        }
        .build()?;
        rt.block_on(tasks.insert(&task))?;
        if status == TaskStatus::InProgress && priority == TaskPriority::High {
            wanted = Some(task.id());
        }
    }
    let query = TaskQuery::all()
        .assigned_to(owner)
        .with_status(TaskStatus::InProgress)
        .with_priority(TaskPriority::High);

    let found = rt.block_on(tasks.find(&query, TaskSort::CreatedAtDesc, None))?;

    let actual: Vec<TaskId> = found.iter().map(Task::id).collect();
    ensure!(actual.first().copied() == wanted && actual.len() == 1);
    Ok(())
}
