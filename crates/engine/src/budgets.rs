//! Budget primitives.
//!
//! A `Budget` caps spending for one category over a recurring period.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl TryFrom<&str> for BudgetPeriod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(EngineError::InvalidField(format!(
                "invalid budget period: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: String,
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

impl Budget {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        name: String,
        category: String,
        amount_minor: i64,
        period: BudgetPeriod,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        description: Option<String>,
    ) -> ResultEngine<Self> {
        if amount_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            category,
            amount_minor,
            period,
            start_date,
            end_date,
            description,
            is_active: true,
            created_at: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub amount_minor: i64,
    pub period: String,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            user_id: ActiveValue::Set(budget.user_id.clone()),
            name: ActiveValue::Set(budget.name.clone()),
            category: ActiveValue::Set(budget.category.clone()),
            amount_minor: ActiveValue::Set(budget.amount_minor),
            period: ActiveValue::Set(budget.period.as_str().to_string()),
            start_date: ActiveValue::Set(budget.start_date),
            end_date: ActiveValue::Set(budget.end_date),
            description: ActiveValue::Set(budget.description.clone()),
            is_active: ActiveValue::Set(budget.is_active),
            created_at: ActiveValue::Set(budget.created_at),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("budget".to_string()))?,
            user_id: model.user_id,
            name: model.name,
            category: model.category,
            amount_minor: model.amount_minor,
            period: BudgetPeriod::try_from(model.period.as_str())?,
            start_date: model.start_date,
            end_date: model.end_date,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
        })
    }
}
