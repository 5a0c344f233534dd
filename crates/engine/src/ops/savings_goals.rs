//! Savings goal operations, including the deposit state transition.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    EngineError, GoalPriority, ResultEngine, SavingsGoal, SavingsGoalNew, SavingsGoalPatch,
    savings_goals, stats,
};

use super::{Engine, normalize_category, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// All savings goals for a user, newest first.
    pub async fn list_savings_goals(&self, user_id: &str) -> ResultEngine<Vec<SavingsGoal>> {
        let models = savings_goals::Entity::find()
            .filter(savings_goals::Column::UserId.eq(user_id))
            .order_by_desc(savings_goals::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(SavingsGoal::try_from).collect()
    }

    /// A single savings goal, after the ownership check.
    pub async fn savings_goal(&self, user_id: &str, id: Uuid) -> ResultEngine<SavingsGoal> {
        let model = self.require_goal(&self.database, user_id, id).await?;
        SavingsGoal::try_from(model)
    }

    /// Create a savings goal owned by `user_id` and return the stored record.
    pub async fn create_savings_goal(
        &self,
        user_id: &str,
        new: SavingsGoalNew,
    ) -> ResultEngine<SavingsGoal> {
        let goal = SavingsGoal::new(
            user_id.to_string(),
            normalize_required_name(&new.name, "savings goal")?,
            new.target_amount_minor,
            new.target_date,
            normalize_optional_text(new.description.as_deref()),
            new.priority.unwrap_or(GoalPriority::Medium),
            normalize_category(new.category.as_deref()),
        )?;

        savings_goals::ActiveModel::from(&goal)
            .insert(&self.database)
            .await?;
        Ok(goal)
    }

    /// Apply a patch to an owned savings goal; absent fields are untouched.
    ///
    /// The patch cannot touch `current_amount_minor` or `is_active`; those
    /// only move through [`Engine::deposit`].
    pub async fn update_savings_goal(
        &self,
        user_id: &str,
        id: Uuid,
        patch: SavingsGoalPatch,
    ) -> ResultEngine<SavingsGoal> {
        if let Some(target_amount_minor) = patch.target_amount_minor {
            if target_amount_minor < 0 {
                return Err(EngineError::InvalidAmount(
                    "target_amount_minor must be >= 0".to_string(),
                ));
            }
        }

        let model = self.require_goal(&self.database, user_id, id).await?;

        let mut active: savings_goals::ActiveModel = model.into();
        if let Some(name) = patch.name.as_deref() {
            active.name = ActiveValue::Set(normalize_required_name(name, "savings goal")?);
        }
        if let Some(target_amount_minor) = patch.target_amount_minor {
            active.target_amount_minor = ActiveValue::Set(target_amount_minor);
        }
        if let Some(target_date) = patch.target_date {
            active.target_date = ActiveValue::Set(target_date);
        }
        if let Some(description) = patch.description.as_deref() {
            active.description = ActiveValue::Set(normalize_optional_text(Some(description)));
        }
        if let Some(priority) = patch.priority {
            active.priority = ActiveValue::Set(priority.as_str().to_string());
        }
        if let Some(category) = patch.category.as_deref() {
            active.category = ActiveValue::Set(normalize_category(Some(category)));
        }

        let updated = active.update(&self.database).await?;
        SavingsGoal::try_from(updated)
    }

    /// Delete an owned savings goal.
    pub async fn delete_savings_goal(&self, user_id: &str, id: Uuid) -> ResultEngine<()> {
        let model = self.require_goal(&self.database, user_id, id).await?;

        savings_goals::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Add a non-negative amount to a goal's saved total.
    ///
    /// When the total reaches the target the goal flips to inactive; the
    /// transition is terminal, so further deposits (including 0) leave a
    /// completed goal completed. The read-modify-write runs inside one DB
    /// transaction so the total never decreases under concurrent deposits.
    pub async fn deposit(
        &self,
        user_id: &str,
        id: Uuid,
        amount_minor: i64,
    ) -> ResultEngine<SavingsGoal> {
        if amount_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "deposit amount_minor must be >= 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            match self.require_goal(&db_tx, user_id, id).await {
                Ok(model) => {
                    let current_amount_minor = model.current_amount_minor + amount_minor;
                    let completed = current_amount_minor >= model.target_amount_minor;

                    let mut active: savings_goals::ActiveModel = model.into();
                    active.current_amount_minor = ActiveValue::Set(current_amount_minor);
                    if completed {
                        active.is_active = ActiveValue::Set(false);
                    }

                    match active.update(&db_tx).await {
                        Ok(updated) => SavingsGoal::try_from(updated),
                        Err(err) => Err(err.into()),
                    }
                }
                Err(err) => Err(err),
            }
        })
    }

    /// Aggregate all of a user's savings goals.
    pub async fn savings_goal_stats(&self, user_id: &str) -> ResultEngine<stats::SavingsGoalStats> {
        let records: Vec<SavingsGoal> = savings_goals::Entity::find()
            .filter(savings_goals::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(SavingsGoal::try_from)
            .collect::<ResultEngine<_>>()?;

        Ok(stats::savings_goal_stats(&records))
    }
}
