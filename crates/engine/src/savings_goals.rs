//! Savings goal primitives.
//!
//! A `SavingsGoal` accumulates deposits towards a target amount. Once the
//! saved amount reaches the target the goal flips to inactive; the
//! transition is one-way.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl GoalPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for GoalPriority {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(EngineError::InvalidField(format!(
                "invalid goal priority: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub user_id: String,
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

impl SavingsGoal {
    pub fn new(
        user_id: String,
        name: String,
        target_amount_minor: i64,
        target_date: DateTime<Utc>,
        description: Option<String>,
        priority: GoalPriority,
        category: String,
    ) -> ResultEngine<Self> {
        if target_amount_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "target_amount_minor must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            target_amount_minor,
            current_amount_minor: 0,
            target_date,
            description,
            priority,
            category,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount_minor >= self.target_amount_minor
    }

    pub fn remaining_minor(&self) -> i64 {
        self.target_amount_minor - self.current_amount_minor
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings_goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount_minor: i64,
    pub current_amount_minor: i64,
    pub target_date: DateTimeUtc,
    pub description: Option<String>,
    pub priority: String,
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SavingsGoal> for ActiveModel {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.to_string()),
            user_id: ActiveValue::Set(goal.user_id.clone()),
            name: ActiveValue::Set(goal.name.clone()),
            target_amount_minor: ActiveValue::Set(goal.target_amount_minor),
            current_amount_minor: ActiveValue::Set(goal.current_amount_minor),
            target_date: ActiveValue::Set(goal.target_date),
            description: ActiveValue::Set(goal.description.clone()),
            priority: ActiveValue::Set(goal.priority.as_str().to_string()),
            category: ActiveValue::Set(goal.category.clone()),
            is_active: ActiveValue::Set(goal.is_active),
            created_at: ActiveValue::Set(goal.created_at),
        }
    }
}

impl TryFrom<Model> for SavingsGoal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("savings goal".to_string()))?,
            user_id: model.user_id,
            name: model.name,
            target_amount_minor: model.target_amount_minor,
            current_amount_minor: model.current_amount_minor,
            target_date: model.target_date,
            description: model.description,
            priority: GoalPriority::try_from(model.priority.as_str())?,
            category: model.category,
            is_active: model.is_active,
            created_at: model.created_at,
        })
    }
}
