use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use server::{ServerState, router};

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let backend = db.get_database_backend();
    for (username, token) in [("alice", ALICE), ("bob", BOB)] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, token) VALUES (?, ?)",
            vec![username.into(), token.into()],
        ))
        .await
        .unwrap();
    }

    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    router(ServerState {
        engine: Arc::new(engine),
        db,
    })
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = test_app().await;

    let res = app
        .oneshot(request("GET", "/transactions", None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let app = test_app().await;

    let res = app
        .oneshot(request("GET", "/transactions", Some("bogus"), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_list_transactions() {
    let app = test_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/transactions",
            Some(ALICE),
            Some(json!({
                "kind": "expense",
                "amount_minor": 1250,
                "category": "Food",
                "tags": ["lunch"]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = json_body(res).await;
    assert_eq!(created["kind"], "expense");
    assert_eq!(created["amount_minor"], 1250);
    assert_eq!(created["category"], "Food");
    assert_eq!(created["tags"], json!(["lunch"]));

    let res = app
        .oneshot(request("GET", "/transactions", Some(ALICE), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed = json_body(res).await;
    assert_eq!(listed["transactions"].as_array().unwrap().len(), 1);
    assert_eq!(listed["transactions"][0]["id"], created["id"]);
}

#[tokio::test]
async fn category_defaults_to_general() {
    let app = test_app().await;

    let res = app
        .oneshot(request(
            "POST",
            "/transactions",
            Some(ALICE),
            Some(json!({ "kind": "income", "amount_minor": 5000 })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = json_body(res).await;
    assert_eq!(created["category"], "General");
}

#[tokio::test]
async fn negative_amount_is_unprocessable() {
    let app = test_app().await;

    let res = app
        .oneshot(request(
            "POST",
            "/transactions",
            Some(ALICE),
            Some(json!({ "kind": "expense", "amount_minor": -5 })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn foreign_record_reads_as_unauthorized() {
    let app = test_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/transactions",
            Some(ALICE),
            Some(json!({ "kind": "income", "amount_minor": 100 })),
        ))
        .await
        .unwrap();
    let created = json_body(res).await;
    let id = created["id"].as_str().unwrap().to_string();

    let res = app
        .oneshot(request(
            "GET",
            &format!("/transactions/{id}"),
            Some(BOB),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let app = test_app().await;

    let res = app
        .oneshot(request(
            "GET",
            "/transactions/00000000-0000-0000-0000-000000000000",
            Some(ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_unknown_field_is_rejected() {
    let app = test_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/transactions",
            Some(ALICE),
            Some(json!({ "kind": "expense", "amount_minor": 100 })),
        ))
        .await
        .unwrap();
    let created = json_body(res).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Patch bodies reject fields they do not list, the owner column included.
    let res = app
        .oneshot(request(
            "PUT",
            &format!("/transactions/{id}"),
            Some(ALICE),
            Some(json!({ "user_id": "bob" })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_returns_a_confirmation() {
    let app = test_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/transactions",
            Some(ALICE),
            Some(json!({ "kind": "expense", "amount_minor": 100 })),
        ))
        .await
        .unwrap();
    let created = json_body(res).await;
    let id = created["id"].as_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/transactions/{id}"),
            Some(ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["message"], "Transaction removed");

    let res = app
        .oneshot(request(
            "GET",
            &format!("/transactions/{id}"),
            Some(ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transaction_stats_aggregate_per_user() {
    let app = test_app().await;

    for body in [
        json!({ "kind": "income", "amount_minor": 1000, "category": "Salary" }),
        json!({ "kind": "expense", "amount_minor": 200, "category": "Food" }),
        json!({ "kind": "expense", "amount_minor": 50, "category": "Food" }),
    ] {
        let res = app
            .clone()
            .oneshot(request("POST", "/transactions", Some(ALICE), Some(body)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    // Bob's records stay out of Alice's numbers.
    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/transactions",
            Some(BOB),
            Some(json!({ "kind": "expense", "amount_minor": 9999 })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .oneshot(request("GET", "/transactions/stats", Some(ALICE), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats = json_body(res).await;
    assert_eq!(stats["total_income_minor"], 1000);
    assert_eq!(stats["total_expenses_minor"], 250);
    assert_eq!(stats["net_minor"], 750);
    assert_eq!(stats["transaction_count"], 3);
    assert_eq!(stats["category_breakdown"]["Food"]["expenses_minor"], 250);
}

#[tokio::test]
async fn budget_crud_round_trip() {
    let app = test_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/budgets",
            Some(ALICE),
            Some(json!({
                "name": "Groceries",
                "category": "Food",
                "amount_minor": 40_000,
                "period": "monthly"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = json_body(res).await;
    assert_eq!(created["is_active"], true);
    let id = created["id"].as_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/budgets/{id}"),
            Some(ALICE),
            Some(json!({ "is_active": false })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated = json_body(res).await;
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["name"], "Groceries");

    let res = app
        .oneshot(request("GET", "/budgets/stats", Some(ALICE), None))
        .await
        .unwrap();
    let stats = json_body(res).await;
    // Deactivated budgets drop out of the aggregation.
    assert_eq!(stats["total_budgets"], 0);
}

#[tokio::test]
async fn goal_deposit_completes_at_target() {
    let app = test_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/savings-goals",
            Some(ALICE),
            Some(json!({
                "name": "Holiday",
                "target_amount_minor": 500,
                "target_date": "2027-06-01T00:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = json_body(res).await;
    assert_eq!(created["current_amount_minor"], 0);
    assert_eq!(created["priority"], "medium");
    let id = created["id"].as_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/savings-goals/{id}/deposit"),
            Some(ALICE),
            Some(json!({ "amount_minor": 480 })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let after = json_body(res).await;
    assert_eq!(after["current_amount_minor"], 480);
    assert_eq!(after["is_active"], true);

    let res = app
        .oneshot(request(
            "POST",
            &format!("/savings-goals/{id}/deposit"),
            Some(ALICE),
            Some(json!({ "amount_minor": 30 })),
        ))
        .await
        .unwrap();
    let after = json_body(res).await;
    assert_eq!(after["current_amount_minor"], 510);
    assert_eq!(after["is_active"], false);
}

#[tokio::test]
async fn deposit_on_foreign_goal_is_unauthorized() {
    let app = test_app().await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/savings-goals",
            Some(ALICE),
            Some(json!({
                "name": "Holiday",
                "target_amount_minor": 500,
                "target_date": "2027-06-01T00:00:00Z"
            })),
        ))
        .await
        .unwrap();
    let created = json_body(res).await;
    let id = created["id"].as_str().unwrap().to_string();

    let res = app
        .oneshot(request(
            "POST",
            &format!("/savings-goals/{id}/deposit"),
            Some(BOB),
            Some(json!({ "amount_minor": 100 })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
