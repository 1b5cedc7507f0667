//! Integration tests for the workflow group endpoints: auth, the
//! single-active invariant over HTTP, NotFound parity for foreign ids,
//! and config-update merge behaviour.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, request_as};
use sqlx::PgPool;

const ALICE: &str = "user_alice";
const BOB: &str = "user_bob";
const GROUPS: &str = "/api/v1/workflow/groups";

async fn create_group(pool: &PgPool, subject: &str, name: Option<&str>) -> serde_json::Value {
    let body = match name {
        Some(n) => serde_json::json!({ "name": n }),
        None => serde_json::json!({}),
    };
    let response = request_as(
        common::build_test_app(pool.clone()),
        subject,
        "POST",
        GROUPS,
        Some(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn listing_requires_a_bearer_token(pool: PgPool) {
    let response = get(common::build_test_app(pool), GROUPS).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_without_name_uses_the_default(pool: PgPool) {
    let group = create_group(&pool, ALICE, None).await;

    assert_eq!(group["name"], "Nieuwe workflow");
    assert_eq!(group["is_active"], false);
    assert!(group["id"].is_string());
    assert!(group["created_at"].is_string());
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_with_blank_name_is_rejected(pool: PgPool) {
    let response = request_as(
        common::build_test_app(pool),
        ALICE,
        "POST",
        GROUPS,
        Some(serde_json::json!({ "name": "   " })),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_only_shows_own_groups(pool: PgPool) {
    create_group(&pool, ALICE, Some("mine")).await;
    create_group(&pool, BOB, Some("theirs")).await;

    let response = request_as(common::build_test_app(pool), ALICE, "GET", GROUPS, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["name"], "mine");
}

// ---------------------------------------------------------------------------
// Activate: the single-active invariant, end to end
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn activation_moves_the_single_active_flag(pool: PgPool) {
    let g1 = create_group(&pool, ALICE, None).await;
    let g1_id = g1["id"].as_str().unwrap().to_string();

    let response = request_as(
        common::build_test_app(pool.clone()),
        ALICE,
        "POST",
        &format!("{GROUPS}/{g1_id}/activate"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], true);

    let g2 = create_group(&pool, ALICE, Some("tweede")).await;
    let g2_id = g2["id"].as_str().unwrap().to_string();
    assert_eq!(g2["is_active"], false);

    let response = request_as(
        common::build_test_app(pool.clone()),
        ALICE,
        "POST",
        &format!("{GROUPS}/{g2_id}/activate"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = request_as(common::build_test_app(pool), ALICE, "GET", GROUPS, None).await;
    let data = body_json(response).await["data"].clone();
    let active: Vec<&serde_json::Value> = data
        .as_array()
        .unwrap()
        .iter()
        .filter(|g| g["is_active"] == true)
        .collect();
    assert_eq!(active.len(), 1, "exactly one active group");
    assert_eq!(active[0]["id"].as_str().unwrap(), g2_id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn activating_a_foreign_group_is_not_found(pool: PgPool) {
    let theirs = create_group(&pool, BOB, None).await;
    let theirs_id = theirs["id"].as_str().unwrap().to_string();

    let response = request_as(
        common::build_test_app(pool.clone()),
        ALICE,
        "POST",
        &format!("{GROUPS}/{theirs_id}/activate"),
        None,
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;

    // Bob's group was not flipped as a side effect.
    let response = request_as(common::build_test_app(pool), BOB, "GET", GROUPS, None).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data[0]["is_active"], false);
}

// ---------------------------------------------------------------------------
// Rename / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn rename_unknown_and_foreign_ids_look_identical(pool: PgPool) {
    let theirs = create_group(&pool, BOB, None).await;
    let theirs_id = theirs["id"].as_str().unwrap().to_string();
    let random_id = uuid::Uuid::new_v4().to_string();

    for id in [theirs_id, random_id] {
        let response = request_as(
            common::build_test_app(pool.clone()),
            ALICE,
            "PATCH",
            &format!("{GROUPS}/{id}"),
            Some(serde_json::json!({ "name": "hijacked" })),
        )
        .await;
        assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_then_config_update_is_not_found(pool: PgPool) {
    let group = create_group(&pool, ALICE, None).await;
    let id = group["id"].as_str().unwrap().to_string();

    let response = request_as(
        common::build_test_app(pool.clone()),
        ALICE,
        "DELETE",
        &format!("{GROUPS}/{id}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = request_as(
        common::build_test_app(pool),
        ALICE,
        "PATCH",
        &format!("{GROUPS}/{id}/config"),
        Some(serde_json::json!({ "config": { "steps": [] } })),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Config update and readback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn empty_config_update_is_a_no_op_but_still_ownership_checked(pool: PgPool) {
    let group = create_group(&pool, ALICE, None).await;
    let id = group["id"].as_str().unwrap().to_string();

    let response = request_as(
        common::build_test_app(pool.clone()),
        ALICE,
        "PATCH",
        &format!("{GROUPS}/{id}/config"),
        Some(serde_json::json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "ok");

    // No config record appeared from the empty update.
    let response = request_as(
        common::build_test_app(pool.clone()),
        ALICE,
        "GET",
        &format!("{GROUPS}/{id}/config"),
        None,
    )
    .await;
    let data = body_json(response).await["data"].clone();
    assert!(data["config"].is_null());
    assert!(data["prompts"].as_array().unwrap().is_empty());

    // An empty update against someone else's group is still a miss.
    let response = request_as(
        common::build_test_app(pool),
        BOB,
        "PATCH",
        &format!("{GROUPS}/{id}/config"),
        Some(serde_json::json!({})),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn config_updates_merge_and_read_back(pool: PgPool) {
    let group = create_group(&pool, ALICE, None).await;
    let id = group["id"].as_str().unwrap().to_string();
    let config_uri = format!("{GROUPS}/{id}/config");

    let response = request_as(
        common::build_test_app(pool.clone()),
        ALICE,
        "PATCH",
        &config_uri,
        Some(serde_json::json!({
            "config": { "steps": [{ "name": "extract" }] },
            "prompts": { "x": "a" },
            "base_instructions": "Wees volledig"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "ok");

    // A second update listing only "y" must leave "x" in place.
    let response = request_as(
        common::build_test_app(pool.clone()),
        ALICE,
        "PATCH",
        &config_uri,
        Some(serde_json::json!({ "prompts": { "y": "b" } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = request_as(
        common::build_test_app(pool),
        ALICE,
        "GET",
        &config_uri,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["config"]["steps"][0]["name"], "extract");

    let names: Vec<&str> = data["prompts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["_base_instructions", "x", "y"]);
}
