//! Budgets API endpoints

use api_types::BudgetPeriod as ApiPeriod;
use api_types::Removed;
use api_types::budget::{BudgetCreate, BudgetListResponse, BudgetUpdate, BudgetView};
use api_types::stats::BudgetStats;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_period(period: engine::BudgetPeriod) -> ApiPeriod {
    match period {
        engine::BudgetPeriod::Weekly => ApiPeriod::Weekly,
        engine::BudgetPeriod::Monthly => ApiPeriod::Monthly,
        engine::BudgetPeriod::Yearly => ApiPeriod::Yearly,
    }
}

fn map_period_in(period: ApiPeriod) -> engine::BudgetPeriod {
    match period {
        ApiPeriod::Weekly => engine::BudgetPeriod::Weekly,
        ApiPeriod::Monthly => engine::BudgetPeriod::Monthly,
        ApiPeriod::Yearly => engine::BudgetPeriod::Yearly,
    }
}

fn view(budget: engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        name: budget.name,
        category: budget.category,
        amount_minor: budget.amount_minor,
        period: map_period(budget.period),
        start_date: budget.start_date,
        end_date: budget.end_date,
        description: budget.description,
        is_active: budget.is_active,
        created_at: budget.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetListResponse>, ServerError> {
    let budgets = state
        .engine
        .list_budgets(&user.username)
        .await?
        .into_iter()
        .map(view)
        .collect();

    Ok(Json(BudgetListResponse { budgets }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetCreate>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state
        .engine
        .create_budget(
            &user.username,
            engine::BudgetNew {
                name: payload.name,
                category: payload.category,
                amount_minor: payload.amount_minor,
                period: map_period_in(payload.period),
                start_date: payload.start_date.map(|dt| dt.with_timezone(&Utc)),
                end_date: payload.end_date.map(|dt| dt.with_timezone(&Utc)),
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(budget))))
}

pub async fn get_detail(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state.engine.budget(&user.username, id).await?;
    Ok(Json(view(budget)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state
        .engine
        .update_budget(
            &user.username,
            id,
            engine::BudgetPatch {
                name: payload.name,
                category: payload.category,
                amount_minor: payload.amount_minor,
                period: payload.period.map(map_period_in),
                start_date: payload.start_date.map(|dt| dt.with_timezone(&Utc)),
                end_date: payload.end_date.map(|dt| dt.with_timezone(&Utc)),
                description: payload.description,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(view(budget)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Removed>, ServerError> {
    state.engine.delete_budget(&user.username, id).await?;

    Ok(Json(Removed {
        message: "Budget removed".to_string(),
    }))
}

pub async fn stats(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetStats>, ServerError> {
    let stats = state.engine.budget_stats(&user.username).await?;

    Ok(Json(BudgetStats {
        total_budgets: stats.total_budgets,
        total_budget_minor: stats.total_budget_minor,
        active_budgets: stats.active_budgets,
        category_breakdown: stats.category_breakdown,
    }))
}
