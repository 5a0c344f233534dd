//! Pure aggregation over in-memory record lists.
//!
//! Each function is a single linear pass; the maps are `BTreeMap` so JSON
//! output is deterministic. The inputs are whatever the store query returned
//! for one user, already filtered (date range, active flag) at query time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Budget, SavingsGoal, Transaction, TransactionKind};

/// Per-category income/expense buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub income_minor: i64,
    pub expenses_minor: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_income_minor: i64,
    pub total_expenses_minor: i64,
    /// Always `total_income_minor - total_expenses_minor`.
    pub net_minor: i64,
    pub transaction_count: u64,
    pub category_breakdown: BTreeMap<String, CategoryTotals>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStats {
    pub total_budgets: u64,
    pub total_budget_minor: i64,
    pub active_budgets: u64,
    pub category_breakdown: BTreeMap<String, i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoalStats {
    pub total_goals: u64,
    pub active_goals: u64,
    pub completed_goals: u64,
    pub total_target_minor: i64,
    pub total_current_minor: i64,
    /// `round(100 * current / target)` when target > 0, else 0.
    pub total_progress: i64,
}

/// Totals and per-category breakdown for a list of transactions.
pub fn transaction_stats(transactions: &[Transaction]) -> TransactionStats {
    let mut stats = TransactionStats {
        transaction_count: transactions.len() as u64,
        ..Default::default()
    };

    for tx in transactions {
        let bucket = stats.category_breakdown.entry(tx.category.clone()).or_default();
        match tx.kind {
            TransactionKind::Income => {
                stats.total_income_minor += tx.amount_minor;
                bucket.income_minor += tx.amount_minor;
            }
            TransactionKind::Expense => {
                stats.total_expenses_minor += tx.amount_minor;
                bucket.expenses_minor += tx.amount_minor;
            }
        }
    }

    stats.net_minor = stats.total_income_minor - stats.total_expenses_minor;
    stats
}

/// Totals for a list of budgets. Callers pass active budgets only.
pub fn budget_stats(budgets: &[Budget]) -> BudgetStats {
    let mut stats = BudgetStats {
        total_budgets: budgets.len() as u64,
        ..Default::default()
    };

    for budget in budgets {
        stats.total_budget_minor += budget.amount_minor;
        stats.active_budgets += 1;
        *stats
            .category_breakdown
            .entry(budget.category.clone())
            .or_default() += budget.amount_minor;
    }

    stats
}

/// Totals and overall progress for a list of savings goals.
pub fn savings_goal_stats(goals: &[SavingsGoal]) -> SavingsGoalStats {
    let mut stats = SavingsGoalStats {
        total_goals: goals.len() as u64,
        ..Default::default()
    };

    for goal in goals {
        stats.total_target_minor += goal.target_amount_minor;
        stats.total_current_minor += goal.current_amount_minor;
        if goal.is_active {
            stats.active_goals += 1;
        } else {
            stats.completed_goals += 1;
        }
    }

    if stats.total_target_minor > 0 {
        stats.total_progress =
            (100.0 * stats.total_current_minor as f64 / stats.total_target_minor as f64).round()
                as i64;
    }

    stats
}
