//! Domain logic for the personal finance tracker.
//!
//! The [`Engine`] owns the database connection and exposes every operation
//! the HTTP layer needs: per-user CRUD over transactions, budgets and
//! savings goals, the goal deposit transition, and the statistics
//! aggregations (pure functions in [`stats`]).

pub use budgets::{Budget, BudgetPeriod};
pub use commands::{
    BudgetNew, BudgetPatch, SavingsGoalNew, SavingsGoalPatch, TransactionNew, TransactionPatch,
};
pub use error::EngineError;
pub use ops::{DateRange, Engine, EngineBuilder};
pub use savings_goals::{GoalPriority, SavingsGoal};
pub use transactions::{Transaction, TransactionKind};

mod budgets;
mod commands;
mod error;
mod ops;
mod savings_goals;
pub mod stats;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
