use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreate {
        pub kind: TransactionKind,
        /// Defaults to "General" when absent.
        pub category: Option<String>,
        /// Amount in minor units (cents). Must be >= 0.
        pub amount_minor: i64,
        pub description: Option<String>,
        /// RFC3339 timestamp. Defaults to now when absent.
        pub date: Option<DateTime<FixedOffset>>,
        pub tags: Option<Vec<String>>,
    }

    /// Patch body for `PUT /transactions/{id}`.
    ///
    /// Only the listed fields may appear; unknown fields are rejected so a
    /// client cannot accidentally clobber server-managed columns.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct TransactionUpdate {
        pub kind: Option<TransactionKind>,
        pub category: Option<String>,
        pub amount_minor: Option<i64>,
        pub description: Option<String>,
        pub date: Option<DateTime<FixedOffset>>,
        pub tags: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub category: String,
        pub amount_minor: i64,
        pub description: Option<String>,
        pub date: DateTime<Utc>,
        pub tags: Vec<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }

    /// Query string for `GET /transactions/stats`.
    ///
    /// Both bounds are optional and inclusive on the transaction `date`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionStatsQuery {
        pub start_date: Option<DateTime<FixedOffset>>,
        pub end_date: Option<DateTime<FixedOffset>>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCreate {
        pub name: String,
        pub category: String,
        /// Amount in minor units (cents). Must be >= 0.
        pub amount_minor: i64,
        pub period: BudgetPeriod,
        /// Defaults to now when absent.
        pub start_date: Option<DateTime<FixedOffset>>,
        pub end_date: Option<DateTime<FixedOffset>>,
        pub description: Option<String>,
    }

    /// Patch body for `PUT /budgets/{id}`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct BudgetUpdate {
        pub name: Option<String>,
        pub category: Option<String>,
        pub amount_minor: Option<i64>,
        pub period: Option<BudgetPeriod>,
        pub start_date: Option<DateTime<FixedOffset>>,
        pub end_date: Option<DateTime<FixedOffset>>,
        pub description: Option<String>,
        pub is_active: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub name: String,
        pub category: String,
        pub amount_minor: i64,
        pub period: BudgetPeriod,
        pub start_date: DateTime<Utc>,
        pub end_date: Option<DateTime<Utc>>,
        pub description: Option<String>,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListResponse {
        pub budgets: Vec<BudgetView>,
    }
}

pub mod savings_goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SavingsGoalCreate {
        pub name: String,
        /// Target in minor units (cents). Must be >= 0.
        pub target_amount_minor: i64,
        pub target_date: DateTime<FixedOffset>,
        pub description: Option<String>,
        /// Defaults to medium when absent.
        pub priority: Option<GoalPriority>,
        /// Defaults to "General" when absent.
        pub category: Option<String>,
    }

    /// Patch body for `PUT /savings-goals/{id}`.
    ///
    /// Deliberately omits `current_amount_minor` and `is_active`: the saved
    /// amount only grows through the deposit endpoint, which owns the
    /// active -> completed transition.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct SavingsGoalUpdate {
        pub name: Option<String>,
        pub target_amount_minor: Option<i64>,
        pub target_date: Option<DateTime<FixedOffset>>,
        pub description: Option<String>,
        pub priority: Option<GoalPriority>,
        pub category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SavingsGoalView {
        pub id: Uuid,
        pub name: String,
        pub target_amount_minor: i64,
        pub current_amount_minor: i64,
        pub target_date: DateTime<Utc>,
        pub description: Option<String>,
        pub priority: GoalPriority,
        pub category: String,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SavingsGoalListResponse {
        pub goals: Vec<SavingsGoalView>,
    }

    /// Body for `POST /savings-goals/{id}/deposit`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Deposit {
        /// Amount in minor units (cents). Must be >= 0.
        pub amount_minor: i64,
    }
}

pub mod stats {
    use super::*;

    /// Per-category income/expense buckets.
    #[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryTotals {
        pub income_minor: i64,
        pub expenses_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionStats {
        pub total_income_minor: i64,
        pub total_expenses_minor: i64,
        pub net_minor: i64,
        pub transaction_count: u64,
        pub category_breakdown: BTreeMap<String, CategoryTotals>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetStats {
        pub total_budgets: u64,
        pub total_budget_minor: i64,
        pub active_budgets: u64,
        pub category_breakdown: BTreeMap<String, i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SavingsGoalStats {
        pub total_goals: u64,
        pub active_goals: u64,
        pub completed_goals: u64,
        pub total_target_minor: i64,
        pub total_current_minor: i64,
        /// Whole-number percentage of the combined targets already saved.
        pub total_progress: i64,
    }
}

/// Confirmation body for delete endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Removed {
    pub message: String,
}
