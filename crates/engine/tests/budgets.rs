use chrono::Utc;

use engine::{BudgetNew, BudgetPatch, BudgetPeriod, EngineError};

mod common;
use common::engine_with_db;

fn monthly(name: &str, category: &str, amount_minor: i64) -> BudgetNew {
    BudgetNew {
        name: name.to_string(),
        category: category.to_string(),
        amount_minor,
        period: BudgetPeriod::Monthly,
        start_date: Some(Utc::now()),
        end_date: None,
        description: None,
    }
}

#[tokio::test]
async fn create_and_fetch_round_trip() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_budget("alice", monthly("Groceries", "Food", 50_000))
        .await
        .unwrap();

    let fetched = engine.budget("alice", created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert!(fetched.is_active);
}

#[tokio::test]
async fn create_rejects_empty_name() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_budget("alice", monthly("   ", "Food", 50_000))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidField(_)));
}

#[tokio::test]
async fn ownership_is_enforced() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_budget("alice", monthly("Groceries", "Food", 50_000))
        .await
        .unwrap();

    let err = engine.budget("bob", created.id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotAuthorized(_)));

    let err = engine.delete_budget("bob", created.id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotAuthorized(_)));
}

#[tokio::test]
async fn deactivated_budgets_leave_the_stats() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_budget("alice", monthly("Groceries", "Food", 50_000))
        .await
        .unwrap();
    let rent = engine
        .create_budget("alice", monthly("Rent", "Housing", 120_000))
        .await
        .unwrap();

    let stats = engine.budget_stats("alice").await.unwrap();
    assert_eq!(stats.total_budgets, 2);
    assert_eq!(stats.active_budgets, 2);
    assert_eq!(stats.total_budget_minor, 170_000);

    engine
        .update_budget(
            "alice",
            rent.id,
            BudgetPatch {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stats = engine.budget_stats("alice").await.unwrap();
    assert_eq!(stats.total_budgets, 1);
    assert_eq!(stats.active_budgets, 1);
    assert_eq!(stats.total_budget_minor, 50_000);
    assert!(!stats.category_breakdown.contains_key("Housing"));
}

#[tokio::test]
async fn stats_groups_amounts_by_category() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_budget("alice", monthly("Groceries", "Food", 50_000))
        .await
        .unwrap();
    engine
        .create_budget("alice", monthly("Restaurants", "Food", 20_000))
        .await
        .unwrap();

    let stats = engine.budget_stats("alice").await.unwrap();
    assert_eq!(stats.category_breakdown["Food"], 70_000);
}
