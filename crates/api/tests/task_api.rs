//! HTTP-level integration tests for tasks, the dashboard engine, and the
//! follow-up notification sweep.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete, get, patch_json, post_json, register_and_login,
};
use serde_json::{json, Value};
use sqlx::PgPool;

/// Create a task via the API, returning its id.
async fn create_task(app: &axum::Router, token: &str, body: Value) -> i64 {
    let response = post_json(app, "/api/v1/tasks", Some(token), body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "task creation should succeed");
    body_json(response).await["id"].as_i64().unwrap()
}

fn task_body(title: &str, assigned_to: i64) -> Value {
    json!({
        "title": title,
        "task_type": "Report",
        "level": "Normal",
        "assigned_to": assigned_to,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plain_user_cannot_create_or_delete_tasks(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, user_token) = register_and_login(&app, "worker", "user", None).await;
    let (_, admin_token) = register_and_login(&app, "admin", "admin", None).await;

    let response = post_json(
        &app,
        "/api/v1/tasks",
        Some(&user_token),
        task_body("not allowed", user_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let task_id = create_task(&app, &admin_token, task_body("real", user_id)).await;
    let response = delete(&app, &format!("/api/v1/tasks/{task_id}"), Some(&user_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(&app, &format!("/api/v1/tasks/{task_id}"), Some(&admin_token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_detail_visibility_matrix(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (worker_id, worker_token) = register_and_login(&app, "worker", "user", None).await;
    let (_, creator_token) = register_and_login(&app, "creator", "admin", None).await;
    let (_, other_admin_token) = register_and_login(&app, "other_admin", "admin", None).await;
    let (_, other_user_token) = register_and_login(&app, "other_user", "user", None).await;
    let (_, boss_token) = register_and_login(&app, "boss", "boss", None).await;

    let task_id = create_task(&app, &creator_token, task_body("visibility", worker_id)).await;
    let uri = format!("/api/v1/tasks/{task_id}");

    // Assignee, creator, and boss see it.
    assert_eq!(get(&app, &uri, Some(&worker_token)).await.status(), StatusCode::OK);
    assert_eq!(get(&app, &uri, Some(&creator_token)).await.status(), StatusCode::OK);
    assert_eq!(get(&app, &uri, Some(&boss_token)).await.status(), StatusCode::OK);

    // Unrelated identities get an explicit 403, not an empty result.
    assert_eq!(
        get(&app, &uri, Some(&other_admin_token)).await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        get(&app, &uri, Some(&other_user_token)).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_percent_update_drives_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (worker_id, worker_token) = register_and_login(&app, "worker", "user", None).await;
    let (_, admin_token) = register_and_login(&app, "admin", "admin", None).await;

    let task_id = create_task(&app, &admin_token, task_body("progress", worker_id)).await;
    let uri = format!("/api/v1/tasks/{task_id}");

    let response = patch_json(&app, &uri, Some(&worker_token), json!({ "success_percent": 45.0 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "In Progress");
    assert_eq!(json["success_percent"], 45.0);
    assert_eq!(json["title"], "progress");

    let response = patch_json(&app, &uri, Some(&worker_token), json!({ "success_percent": 100.0 })).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "Completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_percent_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (worker_id, worker_token) = register_and_login(&app, "worker", "user", None).await;
    let (_, admin_token) = register_and_login(&app, "admin", "admin", None).await;

    let task_id = create_task(&app, &admin_token, task_body("bounds", worker_id)).await;
    let uri = format!("/api/v1/tasks/{task_id}");

    for bad in [150.0, -5.0] {
        let response =
            patch_json(&app, &uri, Some(&worker_token), json!({ "success_percent": bad })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "percent {bad}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_staff_updates_are_whitelisted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (worker_id, worker_token) = register_and_login(&app, "worker", "user", None).await;
    let (_, admin_token) = register_and_login(&app, "admin", "admin", None).await;

    let task_id = create_task(&app, &admin_token, task_body("locked title", worker_id)).await;
    let uri = format!("/api/v1/tasks/{task_id}");

    // The assignee may report progress and comment, but the title edit is
    // silently dropped.
    let response = patch_json(
        &app,
        &uri,
        Some(&worker_token),
        json!({ "title": "hijacked", "success_percent": 20.0, "user_comment": "on it" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "locked title");
    assert_eq!(json["success_percent"], 20.0);
    assert_eq!(json["user_comment"], "on it");

    // Staff may edit the full field set.
    let response = patch_json(
        &app,
        &uri,
        Some(&admin_token),
        json!({ "title": "renamed", "admin_comment": "checked" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["title"], "renamed");
    assert_eq!(json["admin_comment"], "checked");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_counters_and_scope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (worker_id, worker_token) = register_and_login(&app, "worker", "user", None).await;
    let (admin_id, admin_token) = register_and_login(&app, "admin", "admin", None).await;

    let t1 = create_task(&app, &admin_token, task_body("one", worker_id)).await;
    create_task(&app, &admin_token, task_body("two", worker_id)).await;
    patch_json(
        &app,
        &format!("/api/v1/tasks/{t1}"),
        Some(&worker_token),
        json!({ "success_percent": 100.0 }),
    )
    .await;
    // A task assigned to the admin by itself, for the personal list.
    create_task(&app, &admin_token, task_body("own", admin_id)).await;

    // Worker dashboard: personal counters over its two tasks.
    let response = get(&app, "/api/v1/dashboard", Some(&worker_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["total_tasks"], 2);
    assert_eq!(data["completed_tasks"], 1);
    assert_eq!(data["tasks"].as_array().unwrap().len(), 2);

    // Admin dashboard: broad list covers everything it created.
    let response = get(&app, "/api/v1/dashboard", Some(&admin_token)).await;
    let data = &body_json(response).await["data"];
    assert_eq!(data["total_tasks"], 1);
    assert_eq!(data["tasks"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_failed_filter(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (worker_id, worker_token) = register_and_login(&app, "worker", "user", None).await;
    let (_, admin_token) = register_and_login(&app, "admin", "admin", None).await;

    let today = chrono::Utc::now().date_naive();
    let yesterday = (today - chrono::Duration::days(1)).to_string();
    let tomorrow = (today + chrono::Duration::days(1)).to_string();

    let overdue = create_task(
        &app,
        &admin_token,
        json!({
            "title": "overdue",
            "task_type": "Report",
            "level": "Normal",
            "assigned_to": worker_id,
            "end_date": yesterday,
        }),
    )
    .await;
    create_task(
        &app,
        &admin_token,
        json!({
            "title": "upcoming",
            "task_type": "Report",
            "level": "Normal",
            "assigned_to": worker_id,
            "end_date": tomorrow,
        }),
    )
    .await;

    let response = get(&app, "/api/v1/dashboard?status=Failed", Some(&worker_token)).await;
    let data = &body_json(response).await["data"];
    let tasks = data["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"].as_i64().unwrap(), overdue);
    assert_eq!(tasks[0]["is_failed"], true);

    // Counters stay unfiltered.
    assert_eq!(data["total_tasks"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_follow_up_sweep_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (worker_id, _) = register_and_login(&app, "worker", "user", None).await;
    let (_, admin_token) = register_and_login(&app, "admin", "admin", None).await;

    let today = chrono::Utc::now().date_naive();
    let yesterday = (today - chrono::Duration::days(1)).to_string();

    create_task(
        &app,
        &admin_token,
        json!({
            "title": "chase this",
            "task_type": "Report",
            "level": "Normal",
            "assigned_to": worker_id,
            "follow_up_date": yesterday,
            "follow_up_message": "ask for the report",
        }),
    )
    .await;

    // Two dashboard loads re-encounter the same overdue task.
    get(&app, "/api/v1/dashboard", Some(&admin_token)).await;
    let response = get(&app, "/api/v1/dashboard", Some(&admin_token)).await;
    let data = &body_json(response).await["data"];

    let notifications = data["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    let message = notifications[0]["message"].as_str().unwrap();
    assert!(message.contains("chase this"));
    assert!(message.contains("ask for the report"));

    let response = get(&app, "/api/v1/notifications/unread-count", Some(&admin_token)).await;
    assert_eq!(body_json(response).await["data"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_foreign_notification_is_noop(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (worker_id, worker_token) = register_and_login(&app, "worker", "user", None).await;
    let (_, admin_token) = register_and_login(&app, "admin", "admin", None).await;

    let today = chrono::Utc::now().date_naive();
    let yesterday = (today - chrono::Duration::days(1)).to_string();
    create_task(
        &app,
        &admin_token,
        json!({
            "title": "t",
            "task_type": "Report",
            "level": "Normal",
            "assigned_to": worker_id,
            "follow_up_date": yesterday,
        }),
    )
    .await;
    get(&app, "/api/v1/dashboard", Some(&admin_token)).await;

    let response = get(&app, "/api/v1/notifications", Some(&admin_token)).await;
    let notifications = body_json(response).await["data"].clone();
    let notification_id = notifications[0]["id"].as_i64().unwrap();

    // Someone else marking it read: silent no-op.
    let response = post_json(
        &app,
        &format!("/api/v1/notifications/{notification_id}/read"),
        Some(&worker_token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, "/api/v1/notifications/unread-count", Some(&admin_token)).await;
    assert_eq!(body_json(response).await["data"], 1);

    // The owner marking it read works.
    let response = post_json(
        &app,
        &format!("/api/v1/notifications/{notification_id}/read"),
        Some(&admin_token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, "/api/v1/notifications/unread-count", Some(&admin_token)).await;
    assert_eq!(body_json(response).await["data"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_task_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, admin_token) = register_and_login(&app, "admin", "admin", None).await;
    let response = get(&app, "/api/v1/tasks/999999", Some(&admin_token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
