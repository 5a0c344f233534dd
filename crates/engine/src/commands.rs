//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists. The `*Patch` structs enumerate
//! exactly the fields an owner may change in place; absent fields are left
//! untouched.

use chrono::{DateTime, Utc};

use crate::{BudgetPeriod, GoalPriority, TransactionKind};

/// Create a transaction.
#[derive(Clone, Debug)]
pub struct TransactionNew {
    pub kind: TransactionKind,
    /// Defaults to "General" when `None`.
    pub category: Option<String>,
    pub amount_minor: i64,
    pub description: Option<String>,
    /// Defaults to now when `None`.
    pub date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

/// In-place edit of a transaction.
#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub amount_minor: Option<i64>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

/// Create a budget.
#[derive(Clone, Debug)]
pub struct BudgetNew {
    pub name: String,
    pub category: String,
    pub amount_minor: i64,
    pub period: BudgetPeriod,
    /// Defaults to now when `None`.
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// In-place edit of a budget.
#[derive(Clone, Debug, Default)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount_minor: Option<i64>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Create a savings goal.
#[derive(Clone, Debug)]
pub struct SavingsGoalNew {
    pub name: String,
    pub target_amount_minor: i64,
    pub target_date: DateTime<Utc>,
    pub description: Option<String>,
    /// Defaults to medium when `None`.
    pub priority: Option<GoalPriority>,
    /// Defaults to "General" when `None`.
    pub category: Option<String>,
}

/// In-place edit of a savings goal.
///
/// Does not carry `current_amount_minor` or `is_active`: the saved amount
/// only moves through [`Engine::deposit`], which owns the
/// active -> completed transition.
///
/// [`Engine::deposit`]: crate::Engine::deposit
#[derive(Clone, Debug, Default)]
pub struct SavingsGoalPatch {
    pub name: Option<String>,
    pub target_amount_minor: Option<i64>,
    pub target_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub priority: Option<GoalPriority>,
    pub category: Option<String>,
}
