//! In-memory integration tests for listings, the calendar view, and stats.

use super::helpers::{TaskFixture, TestContext, build_context, context, stored_task};
use chrono::{Duration, TimeZone, Utc};
use rstest::rstest;
use taskwarden::config::TaskServiceConfig;
use taskwarden::task::{
    domain::{TaskField, TaskPriority, TaskStatus},
    services::{ListTasksRequest, TaskServiceError},
};

async fn seed_tasks(ctx: &TestContext, count: i64) -> Result<(), eyre::Report> {
    let base = Utc::now() - Duration::days(30);
    for offset in 0..count {
        let mut fixture = TaskFixture::new(ctx.alice.id(), ctx.manager.id());
        fixture.created_at = base + Duration::minutes(offset);
        ctx.insert(&stored_task(&fixture)).await?;
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_page_of_fifteen(#[future] context: TestContext) -> Result<(), eyre::Report> {
    let ctx = context.await;
    seed_tasks(&ctx, 15).await?;

    let page = ctx
        .queries
        .list_tasks(&ctx.alice, ListTasksRequest::new().with_page(2).with_limit(10))
        .await?;

    eyre::ensure!(page.tasks.len() == 5, "expected 5 tasks, got {}", page.tasks.len());
    eyre::ensure!(page.pagination.current_page == 2);
    eyre::ensure!(page.pagination.total_pages == 2);
    eyre::ensure!(page.pagination.total_tasks == 15);
    eyre::ensure!(!page.pagination.has_next);
    eyre::ensure!(page.pagination.has_prev);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pages_do_not_overlap(#[future] context: TestContext) -> Result<(), eyre::Report> {
    let ctx = context.await;
    seed_tasks(&ctx, 12).await?;

    let mut seen = Vec::new();
    for page_number in 1..=3 {
        let page = ctx
            .queries
            .list_tasks(
                &ctx.manager,
                ListTasksRequest::new().with_page(page_number).with_limit(5),
            )
            .await?;
        seen.extend(page.tasks.into_iter().map(|view| (view.created_at, view.id)));
    }

    eyre::ensure!(seen.len() == 12);
    let mut sorted = seen.clone();
    sorted.sort_by(|left, right| right.0.cmp(&left.0));
    eyre::ensure!(seen == sorted, "listing should be newest first across pages");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn page_past_the_end_is_empty(#[future] context: TestContext) -> Result<(), eyre::Report> {
    let ctx = context.await;
    seed_tasks(&ctx, 3).await?;

    let page = ctx
        .queries
        .list_tasks(&ctx.admin, ListTasksRequest::new().with_page(4))
        .await?;

    eyre::ensure!(page.tasks.is_empty());
    eyre::ensure!(page.pagination.total_pages == 1);
    eyre::ensure!(!page.pagination.has_next);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_default_page_size_applies() -> Result<(), eyre::Report> {
    let ctx = build_context(TaskServiceConfig {
        default_page_size: 4,
        max_page_size: 8,
    })
    .await?;
    seed_tasks(&ctx, 6).await?;

    let page = ctx
        .queries
        .list_tasks(&ctx.admin, ListTasksRequest::new())
        .await?;
    eyre::ensure!(page.tasks.len() == 4);
    eyre::ensure!(page.pagination.total_pages == 2);

    let too_big = ctx
        .queries
        .list_tasks(&ctx.admin, ListTasksRequest::new().with_limit(9))
        .await;
    eyre::ensure!(matches!(
        too_big,
        Err(TaskServiceError::Validation(errors)) if errors.contains(TaskField::Limit)
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_narrow_within_visibility(
    #[future] context: TestContext,
) -> Result<(), eyre::Report> {
    let ctx = context.await;
    let mut urgent = TaskFixture::new(ctx.alice.id(), ctx.manager.id());
    urgent.priority = TaskPriority::Urgent;
    urgent.title = "Patch OpenSSL";
    let mut bobs_urgent = TaskFixture::new(ctx.bob.id(), ctx.manager.id());
    bobs_urgent.priority = TaskPriority::Urgent;
    bobs_urgent.title = "Patch kernel";
    let mut done = TaskFixture::new(ctx.alice.id(), ctx.manager.id());
    done.status = TaskStatus::Completed;
    for fixture in [&urgent, &bobs_urgent, &done] {
        ctx.insert(&stored_task(fixture)).await?;
    }

    let alice_urgent = ctx
        .queries
        .list_tasks(&ctx.alice, ListTasksRequest::new().with_priority("urgent"))
        .await?;
    eyre::ensure!(alice_urgent.pagination.total_tasks == 1);

    let patch_search = ctx
        .queries
        .list_tasks(&ctx.manager, ListTasksRequest::new().with_search("PATCH"))
        .await?;
    eyre::ensure!(patch_search.pagination.total_tasks == 2);

    let completed = ctx
        .queries
        .list_tasks(&ctx.manager, ListTasksRequest::new().with_status("completed"))
        .await?;
    eyre::ensure!(completed.pagination.total_tasks == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn calendar_covers_month_boundaries(
    #[future] context: TestContext,
) -> Result<(), eyre::Report> {
    let ctx = context.await;
    let instant = |month: u32, day: u32, hour: u32| {
        Utc.with_ymd_and_hms(2025, month, day, hour, 0, 0)
            .single()
            .ok_or_else(|| eyre::eyre!("invalid fixture instant"))
    };
    let dues = [
        instant(2, 28, 23)?,
        instant(3, 1, 0)?,
        instant(3, 31, 23)?,
        instant(4, 1, 0)?,
    ];
    for due in dues {
        let mut fixture = TaskFixture::new(ctx.alice.id(), ctx.manager.id());
        fixture.due = due;
        ctx.insert(&stored_task(&fixture)).await?;
    }

    let march = ctx.queries.list_tasks_in_range(&ctx.alice, 2025, 3).await?;
    let due_dates: Vec<_> = march.iter().map(|view| view.due_date).collect();

    eyre::ensure!(due_dates == vec![instant(3, 1, 0)?, instant(3, 31, 23)?]);
    let bob_march = ctx.queries.list_tasks_in_range(&ctx.bob, 2025, 3).await?;
    eyre::ensure!(bob_march.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_are_scoped_per_role(#[future] context: TestContext) -> Result<(), eyre::Report> {
    let ctx = context.await;
    let mut overdue = TaskFixture::new(ctx.alice.id(), ctx.manager.id());
    overdue.due = Utc::now() - Duration::days(1);
    overdue.priority = TaskPriority::High;
    let mut done_late = TaskFixture::new(ctx.bob.id(), ctx.manager.id());
    done_late.due = Utc::now() - Duration::days(1);
    done_late.status = TaskStatus::Completed;
    for fixture in [&overdue, &done_late] {
        ctx.insert(&stored_task(fixture)).await?;
    }

    let alice = ctx.queries.task_stats(&ctx.alice).await?;
    eyre::ensure!(alice.total == 1 && alice.overdue == 1 && alice.high == 1);

    let manager = ctx.queries.task_stats(&ctx.manager).await?;
    eyre::ensure!(manager.total == 2);
    eyre::ensure!(manager.completed == 1);
    eyre::ensure!(manager.overdue == 1);
    Ok(())
}
