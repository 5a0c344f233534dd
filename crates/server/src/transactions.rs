//! Transactions API endpoints

use api_types::stats::{CategoryTotals, TransactionStats};
use api_types::transaction::{
    TransactionCreate, TransactionListResponse, TransactionStatsQuery, TransactionUpdate,
    TransactionView,
};
use api_types::{Removed, TransactionKind as ApiKind};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

fn map_kind_in(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Income => engine::TransactionKind::Income,
        ApiKind::Expense => engine::TransactionKind::Expense,
    }
}

fn view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        category: tx.category,
        amount_minor: tx.amount_minor,
        description: tx.description,
        date: tx.date,
        tags: tx.tags,
        created_at: tx.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let transactions = state
        .engine
        .list_transactions(&user.username)
        .await?
        .into_iter()
        .map(view)
        .collect();

    Ok(Json(TransactionListResponse { transactions }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .create_transaction(
            &user.username,
            engine::TransactionNew {
                kind: map_kind_in(payload.kind),
                category: payload.category,
                amount_minor: payload.amount_minor,
                description: payload.description,
                date: payload.date.map(|dt| dt.with_timezone(&Utc)),
                tags: payload.tags.unwrap_or_default(),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(tx))))
}

pub async fn get_detail(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.transaction(&user.username, id).await?;
    Ok(Json(view(tx)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .engine
        .update_transaction(
            &user.username,
            id,
            engine::TransactionPatch {
                kind: payload.kind.map(map_kind_in),
                category: payload.category,
                amount_minor: payload.amount_minor,
                description: payload.description,
                date: payload.date.map(|dt| dt.with_timezone(&Utc)),
                tags: payload.tags,
            },
        )
        .await?;

    Ok(Json(view(tx)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Removed>, ServerError> {
    state.engine.delete_transaction(&user.username, id).await?;

    Ok(Json(Removed {
        message: "Transaction removed".to_string(),
    }))
}

pub async fn stats(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionStatsQuery>,
) -> Result<Json<TransactionStats>, ServerError> {
    let range = engine::DateRange {
        start: query.start_date.map(|dt| dt.with_timezone(&Utc)),
        end: query.end_date.map(|dt| dt.with_timezone(&Utc)),
    };

    let stats = state.engine.transaction_stats(&user.username, range).await?;

    Ok(Json(TransactionStats {
        total_income_minor: stats.total_income_minor,
        total_expenses_minor: stats.total_expenses_minor,
        net_minor: stats.net_minor,
        transaction_count: stats.transaction_count,
        category_breakdown: stats
            .category_breakdown
            .into_iter()
            .map(|(category, totals)| {
                (
                    category,
                    CategoryTotals {
                        income_minor: totals.income_minor,
                        expenses_minor: totals.expenses_minor,
                    },
                )
            })
            .collect(),
    }))
}
