//! HTTP-level tests for proposals and the award trigger.
//!
//! - Awarding creates exactly one project, never a second one
//! - Non-award transitions create nothing
//! - Project numbers continue from the highest existing number
//! - Concurrent awarding updates create one project per proposal
//! - Clearing the responsible contact and writing its phone
//! - The full client -> proposal -> award -> project -> invoices scenario

mod common;

use arquimetal_events::EVENT_PROJECT_CREATED;
use axum::http::StatusCode;
use common::{
    body_json, create_client, create_contact, create_project, create_proposal, get, patch_json,
    post_empty, post_json, project_count, set_proposal_status,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_new_proposal_is_an_opportunity(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/proposals",
        serde_json::json!({
            "client_id": client_id,
            "name": "Galpón",
            "status": "awarded",
            "amount": "50000"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "opportunity");
    assert_eq!(json["data"]["amount"], "50000");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_proposal_for_unknown_client_returns_404(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/proposals",
        serde_json::json!({ "client_id": 999999, "name": "Galpón" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_award_creates_exactly_one_project(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let proposal = create_proposal(&pool, client_id, "Galpón", Some("50000")).await;
    let id = proposal["id"].as_i64().unwrap();

    let first = set_proposal_status(&pool, id, "awarded").await;
    assert_eq!(first.status(), StatusCode::OK);
    let json = body_json(first).await;
    assert_eq!(json["data"]["status"], "awarded");
    assert!(json["data"]["awarded_project"].is_object());
    assert_eq!(project_count(&pool).await, 1);

    // Re-saving an awarded proposal is not an award.
    let second = set_proposal_status(&pool, id, "awarded").await;
    assert_eq!(second.status(), StatusCode::OK);
    let json = body_json(second).await;
    assert!(json["data"]["awarded_project"].is_null());
    assert_eq!(project_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rejected_then_awarded_triggers(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let proposal = create_proposal(&pool, client_id, "Galpón", None).await;
    let id = proposal["id"].as_i64().unwrap();

    set_proposal_status(&pool, id, "rejected").await;
    assert_eq!(project_count(&pool).await, 0);

    let response = set_proposal_status(&pool, id, "awarded").await;
    let json = body_json(response).await;
    // A proposal without an amount yields a zero-amount project.
    assert_eq!(json["data"]["awarded_project"]["amount"], "0");
    assert_eq!(json["data"]["awarded_project"]["balance"], "0");
    assert_eq!(project_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_award_transitions_have_no_side_effect(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let proposal = create_proposal(&pool, client_id, "Galpón", Some("1000")).await;
    let id = proposal["id"].as_i64().unwrap();

    set_proposal_status(&pool, id, "rejected").await;
    set_proposal_status(&pool, id, "opportunity").await;
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/proposals/{id}"),
        serde_json::json!({ "name": "Galpón ampliado", "amount": "2000" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(project_count(&pool).await, 0);

    set_proposal_status(&pool, id, "awarded").await;
    set_proposal_status(&pool, id, "rejected").await;
    set_proposal_status(&pool, id, "opportunity").await;
    assert_eq!(project_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_award_project_number_follows_highest(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    create_project(&pool, client_id, "Primera").await;
    create_project(&pool, client_id, "Segunda").await;

    let proposal = create_proposal(&pool, client_id, "Galpón", Some("50000")).await;
    let response = set_proposal_status(&pool, proposal["id"].as_i64().unwrap(), "awarded").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["awarded_project"]["project_number"], "3");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_awards_create_one_project_each(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let mut ids = Vec::new();
    for i in 0..10 {
        let proposal = create_proposal(&pool, client_id, &format!("Galpón {i}"), Some("1000")).await;
        ids.push(proposal["id"].as_i64().unwrap());
    }

    // Two racing award requests per proposal.
    let mut handles = Vec::new();
    for id in ids.iter().chain(ids.iter()).copied() {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            set_proposal_status(&pool, id, "awarded").await.status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(project_count(&pool).await, 10);
    let numbers: Vec<i64> =
        sqlx::query_scalar("SELECT project_number FROM projects ORDER BY project_number")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(numbers, (1..=10).collect::<Vec<i64>>());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_null_contact_clears_proposal_contact(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let contact_id = create_contact(&pool, client_id, "Luis").await;
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/proposals",
        serde_json::json!({ "client_id": client_id, "contact_id": contact_id, "name": "Galpón" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/proposals/{id}");

    // Absent keeps the contact.
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "name": "Galpón norte" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["contact_id"], contact_id);

    let response = patch_json(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({ "contact_id": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["contact_id"].is_null());
    assert_eq!(json["data"]["name"], "Galpón norte");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_proposal_patch_writes_contact_phone(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let contact_id = create_contact(&pool, client_id, "Luis").await;
    let proposal = create_proposal(&pool, client_id, "Galpón", None).await;
    let uri = format!("/api/v1/proposals/{}", proposal["id"]);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "contact_id": contact_id, "contact_phone": "5491155550001" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["contact_id"], contact_id);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/clients/{client_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["contacts"][0]["id"], contact_id);
    assert_eq!(json["data"]["contacts"][0]["phone"], "5491155550001");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_contact_phone_without_contact_returns_400(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let proposal = create_proposal(&pool, client_id, "Galpón", None).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/v1/proposals/{}", proposal["id"]),
        serde_json::json!({ "contact_phone": "5491155550001" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_award_publishes_events(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let proposal = create_proposal(&pool, client_id, "Galpón", Some("50000")).await;
    let id = proposal["id"].as_i64().unwrap();

    let (app, bus) = common::build_test_app_with_bus(pool);
    let mut rx = bus.subscribe();
    let response = patch_json(
        app,
        &format!("/api/v1/proposals/{id}"),
        serde_json::json!({ "status": "awarded" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let awarded = rx.recv().await.unwrap();
    assert_eq!(awarded.event_type, "proposal.awarded");
    assert_eq!(awarded.source_entity_id, Some(id));
    assert_eq!(awarded.actor.as_deref(), Some(common::TEST_SUBJECT));

    let created = rx.recv().await.unwrap();
    assert_eq!(created.event_type, EVENT_PROJECT_CREATED);
    assert_eq!(created.payload["proposal_id"], id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_failed_project_creation_keeps_award_and_reports_it(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let proposal = create_proposal(&pool, client_id, "Bloqueada", Some("100")).await;
    let id = proposal["id"].as_i64().unwrap();

    sqlx::query("ALTER TABLE projects ADD CONSTRAINT ck_test_block CHECK (name <> 'Bloqueada')")
        .execute(&pool)
        .await
        .unwrap();

    let response = set_proposal_status(&pool, id, "awarded").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PROJECT_CREATION_FAILED");
    assert_eq!(json["error"], "Proposal updated; project creation failed");

    // The proposal update committed before the project step.
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/proposals/{id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "awarded");
    assert_eq!(project_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_status_returns_400(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let proposal = create_proposal(&pool, client_id, "Galpón", None).await;

    let response = set_proposal_status(&pool, proposal["id"].as_i64().unwrap(), "Adjudicado").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_unknown_proposal_returns_404(pool: PgPool) {
    let response = set_proposal_status(&pool, 999999, "awarded").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(project_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_end_to_end_award_scenario(pool: PgPool) {
    let client_id = create_client(&pool, "Acme").await;
    let before: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(project_number), 0) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();

    let proposal = create_proposal(&pool, client_id, "Nave industrial", Some("50000")).await;
    let response = set_proposal_status(&pool, proposal["id"].as_i64().unwrap(), "awarded").await;
    assert_eq!(response.status(), StatusCode::OK);
    let project = body_json(response).await["data"]["awarded_project"].clone();

    assert_eq!(project["name"], "Nave industrial");
    assert_eq!(project["client_id"], client_id);
    assert_eq!(project["amount"], "50000");
    assert_eq!(project["balance"], "50000");
    assert_eq!(project["purchase_order"], "0");
    assert_eq!(project["proposal_number"], "20240017");
    assert_eq!(project["url"], "");
    assert_eq!(project["pending_percentage"], 100);
    assert_eq!(project["status"], "not_started");
    assert!(project["effective_date"].is_string());
    assert_eq!(project["project_number"], (before + 1).to_string());

    let project_id = project["id"].as_i64().unwrap();
    let invoices_uri = format!("/api/v1/projects/{project_id}/invoices");
    for expected in 1..=2 {
        let response = post_empty(common::build_test_app(pool.clone()), &invoices_uri).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["invoice_number"], expected);
    }

    let response = get(common::build_test_app(pool), &invoices_uri).await;
    let json = body_json(response).await;
    let numbers: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["invoice_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2]);
}
