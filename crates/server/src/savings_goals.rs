//! Savings goals API endpoints

use api_types::GoalPriority as ApiPriority;
use api_types::Removed;
use api_types::savings_goal::{
    Deposit, SavingsGoalCreate, SavingsGoalListResponse, SavingsGoalUpdate, SavingsGoalView,
};
use api_types::stats::SavingsGoalStats;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_priority(priority: engine::GoalPriority) -> ApiPriority {
    match priority {
        engine::GoalPriority::Low => ApiPriority::Low,
        engine::GoalPriority::Medium => ApiPriority::Medium,
        engine::GoalPriority::High => ApiPriority::High,
    }
}

fn map_priority_in(priority: ApiPriority) -> engine::GoalPriority {
    match priority {
        ApiPriority::Low => engine::GoalPriority::Low,
        ApiPriority::Medium => engine::GoalPriority::Medium,
        ApiPriority::High => engine::GoalPriority::High,
    }
}

fn view(goal: engine::SavingsGoal) -> SavingsGoalView {
    SavingsGoalView {
        id: goal.id,
        name: goal.name,
        target_amount_minor: goal.target_amount_minor,
        current_amount_minor: goal.current_amount_minor,
        target_date: goal.target_date,
        description: goal.description,
        priority: map_priority(goal.priority),
        category: goal.category,
        is_active: goal.is_active,
        created_at: goal.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<SavingsGoalListResponse>, ServerError> {
    let goals = state
        .engine
        .list_savings_goals(&user.username)
        .await?
        .into_iter()
        .map(view)
        .collect();

    Ok(Json(SavingsGoalListResponse { goals }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<SavingsGoalCreate>,
) -> Result<(StatusCode, Json<SavingsGoalView>), ServerError> {
    let goal = state
        .engine
        .create_savings_goal(
            &user.username,
            engine::SavingsGoalNew {
                name: payload.name,
                target_amount_minor: payload.target_amount_minor,
                target_date: payload.target_date.with_timezone(&Utc),
                description: payload.description,
                priority: payload.priority.map(map_priority_in),
                category: payload.category,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(goal))))
}

pub async fn get_detail(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavingsGoalView>, ServerError> {
    let goal = state.engine.savings_goal(&user.username, id).await?;
    Ok(Json(view(goal)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SavingsGoalUpdate>,
) -> Result<Json<SavingsGoalView>, ServerError> {
    let goal = state
        .engine
        .update_savings_goal(
            &user.username,
            id,
            engine::SavingsGoalPatch {
                name: payload.name,
                target_amount_minor: payload.target_amount_minor,
                target_date: payload.target_date.map(|dt| dt.with_timezone(&Utc)),
                description: payload.description,
                priority: payload.priority.map(map_priority_in),
                category: payload.category,
            },
        )
        .await?;

    Ok(Json(view(goal)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Removed>, ServerError> {
    state.engine.delete_savings_goal(&user.username, id).await?;

    Ok(Json(Removed {
        message: "Savings goal removed".to_string(),
    }))
}

pub async fn deposit(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Deposit>,
) -> Result<Json<SavingsGoalView>, ServerError> {
    let goal = state
        .engine
        .deposit(&user.username, id, payload.amount_minor)
        .await?;

    Ok(Json(view(goal)))
}

pub async fn stats(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<SavingsGoalStats>, ServerError> {
    let stats = state.engine.savings_goal_stats(&user.username).await?;

    Ok(Json(SavingsGoalStats {
        total_goals: stats.total_goals,
        active_goals: stats.active_goals,
        completed_goals: stats.completed_goals,
        total_target_minor: stats.total_target_minor,
        total_current_minor: stats.total_current_minor,
        total_progress: stats.total_progress,
    }))
}
