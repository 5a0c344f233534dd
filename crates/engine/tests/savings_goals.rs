use chrono::{Duration, Utc};

use engine::{EngineError, GoalPriority, SavingsGoalNew, SavingsGoalPatch};

mod common;
use common::engine_with_db;

fn goal(name: &str, target_amount_minor: i64) -> SavingsGoalNew {
    SavingsGoalNew {
        name: name.to_string(),
        target_amount_minor,
        target_date: Utc::now() + Duration::days(365),
        description: None,
        priority: None,
        category: None,
    }
}

#[tokio::test]
async fn create_applies_defaults() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_savings_goal("alice", goal("Holiday", 50_000))
        .await
        .unwrap();

    assert_eq!(created.current_amount_minor, 0);
    assert_eq!(created.priority, GoalPriority::Medium);
    assert_eq!(created.category, "General");
    assert!(created.is_active);
}

#[tokio::test]
async fn deposit_accumulates_and_completes() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_savings_goal("alice", goal("Holiday", 500))
        .await
        .unwrap();

    let after = engine.deposit("alice", created.id, 480).await.unwrap();
    assert_eq!(after.current_amount_minor, 480);
    assert!(after.is_active);

    // Crossing the target completes the goal, spec worked example.
    let after = engine.deposit("alice", created.id, 30).await.unwrap();
    assert_eq!(after.current_amount_minor, 510);
    assert!(!after.is_active);
}

#[tokio::test]
async fn completion_is_terminal_under_zero_deposits() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_savings_goal("alice", goal("Holiday", 100))
        .await
        .unwrap();

    engine.deposit("alice", created.id, 100).await.unwrap();

    let after = engine.deposit("alice", created.id, 0).await.unwrap();
    assert_eq!(after.current_amount_minor, 100);
    assert!(!after.is_active);
}

#[tokio::test]
async fn deposit_rejects_negative_amounts() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_savings_goal("alice", goal("Holiday", 100))
        .await
        .unwrap();

    let err = engine.deposit("alice", created.id, -1).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let unchanged = engine.savings_goal("alice", created.id).await.unwrap();
    assert_eq!(unchanged.current_amount_minor, 0);
}

#[tokio::test]
async fn deposit_checks_ownership() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_savings_goal("alice", goal("Holiday", 100))
        .await
        .unwrap();

    let err = engine.deposit("bob", created.id, 50).await.unwrap_err();
    assert!(matches!(err, EngineError::NotAuthorized(_)));
}

#[tokio::test]
async fn update_cannot_touch_saved_amount_or_state() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_savings_goal("alice", goal("Holiday", 500))
        .await
        .unwrap();
    engine.deposit("alice", created.id, 500).await.unwrap();

    // The patch has no current_amount/is_active fields; editing other
    // fields leaves the completed state alone.
    let after = engine
        .update_savings_goal(
            "alice",
            created.id,
            SavingsGoalPatch {
                name: Some("Holiday 2027".to_string()),
                priority: Some(GoalPriority::High),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(after.name, "Holiday 2027");
    assert_eq!(after.current_amount_minor, 500);
    assert!(!after.is_active);
}

#[tokio::test]
async fn stats_cover_all_goals_of_the_user() {
    let (engine, _db) = engine_with_db().await;

    let active = engine
        .create_savings_goal("alice", goal("Holiday", 50_000))
        .await
        .unwrap();
    engine.deposit("alice", active.id, 48_000).await.unwrap();

    let done = engine
        .create_savings_goal("alice", goal("Bike", 30_000))
        .await
        .unwrap();
    engine.deposit("alice", done.id, 30_000).await.unwrap();

    engine
        .create_savings_goal("bob", goal("Unrelated", 1_000_000))
        .await
        .unwrap();

    let stats = engine.savings_goal_stats("alice").await.unwrap();
    assert_eq!(stats.total_goals, 2);
    assert_eq!(stats.active_goals, 1);
    assert_eq!(stats.completed_goals, 1);
    assert_eq!(stats.total_target_minor, 80_000);
    assert_eq!(stats.total_current_minor, 78_000);
    assert_eq!(stats.total_progress, 98);
}
