//! Integration tests for notification de-duplication and the follow-up scan.

use sqlx::PgPool;
use taskdesk_db::models::task::{CreateTask, UpdateTask};
use taskdesk_db::repositories::{NotificationRepo, TaskRepo, UserRepo};

mod util;
use util::{new_task, new_user};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_at_most_one_unread_per_pair(pool: PgPool) {
    let admin = UserRepo::create(&pool, &new_user("admin1", "admin", None))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task("t", admin.id), admin.id)
        .await
        .unwrap();

    let first = NotificationRepo::create_if_absent(&pool, admin.id, task.id, "follow up")
        .await
        .unwrap();
    assert!(first);

    // Re-encountering the same overdue task is a no-op.
    let second = NotificationRepo::create_if_absent(&pool, admin.id, task.id, "follow up")
        .await
        .unwrap();
    assert!(!second);

    let unread = NotificationRepo::list_unread(&pool, admin.id).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].task_id, task.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_unread_allowed_after_read(pool: PgPool) {
    let admin = UserRepo::create(&pool, &new_user("admin1", "admin", None))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task("t", admin.id), admin.id)
        .await
        .unwrap();

    NotificationRepo::create_if_absent(&pool, admin.id, task.id, "first")
        .await
        .unwrap();
    let unread = NotificationRepo::list_unread(&pool, admin.id).await.unwrap();
    let marked = NotificationRepo::mark_read(&pool, unread[0].id, admin.id)
        .await
        .unwrap();
    assert!(marked);

    // The pair has no unread row anymore, so a fresh one may be inserted.
    let inserted = NotificationRepo::create_if_absent(&pool, admin.id, task.id, "again")
        .await
        .unwrap();
    assert!(inserted);

    assert_eq!(NotificationRepo::unread_count(&pool, admin.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_is_owner_scoped(pool: PgPool) {
    let admin = UserRepo::create(&pool, &new_user("admin1", "admin", None))
        .await
        .unwrap();
    let other = UserRepo::create(&pool, &new_user("other", "admin", None))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task("t", admin.id), admin.id)
        .await
        .unwrap();

    NotificationRepo::create_if_absent(&pool, admin.id, task.id, "msg")
        .await
        .unwrap();
    let unread = NotificationRepo::list_unread(&pool, admin.id).await.unwrap();

    // A foreign user marking someone else's notification mutates nothing.
    let marked = NotificationRepo::mark_read(&pool, unread[0].id, other.id)
        .await
        .unwrap();
    assert!(!marked);
    assert_eq!(NotificationRepo::unread_count(&pool, admin.id).await.unwrap(), 1);

    // A nonexistent id is likewise a no-op.
    let marked = NotificationRepo::mark_read(&pool, 888_888, admin.id)
        .await
        .unwrap();
    assert!(!marked);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_follow_up_scan_selects_due_uncompleted_own_tasks(pool: PgPool) {
    let admin = UserRepo::create(&pool, &new_user("admin1", "admin", None))
        .await
        .unwrap();
    let colleague = UserRepo::create(&pool, &new_user("admin2", "admin", None))
        .await
        .unwrap();
    let today = chrono::Utc::now().date_naive();
    let yesterday = today - chrono::Duration::days(1);
    let tomorrow = today + chrono::Duration::days(1);

    let due = TaskRepo::create(
        &pool,
        &CreateTask {
            follow_up_date: Some(yesterday),
            follow_up_message: Some("call the customer".into()),
            ..new_task("due", admin.id)
        },
        admin.id,
    )
    .await
    .unwrap();

    // Due today counts as reached.
    let due_today = TaskRepo::create(
        &pool,
        &CreateTask {
            follow_up_date: Some(today),
            ..new_task("due today", admin.id)
        },
        admin.id,
    )
    .await
    .unwrap();

    // Not due yet.
    TaskRepo::create(
        &pool,
        &CreateTask {
            follow_up_date: Some(tomorrow),
            ..new_task("later", admin.id)
        },
        admin.id,
    )
    .await
    .unwrap();

    // Due but completed.
    let done = TaskRepo::create(
        &pool,
        &CreateTask {
            follow_up_date: Some(yesterday),
            ..new_task("done", admin.id)
        },
        admin.id,
    )
    .await
    .unwrap();
    TaskRepo::update(
        &pool,
        done.id,
        &UpdateTask {
            success_percent: Some(100.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Due but created by someone else.
    TaskRepo::create(
        &pool,
        &CreateTask {
            follow_up_date: Some(yesterday),
            ..new_task("foreign", admin.id)
        },
        colleague.id,
    )
    .await
    .unwrap();

    let tasks = TaskRepo::list_follow_up_due(&pool, admin.id).await.unwrap();
    let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&due.id));
    assert!(ids.contains(&due_today.id));
}
