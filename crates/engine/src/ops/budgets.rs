//! Budget operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{Budget, BudgetNew, BudgetPatch, EngineError, ResultEngine, budgets, stats};

use super::{Engine, normalize_category, normalize_optional_text, normalize_required_name};

impl Engine {
    /// All budgets for a user, newest first.
    pub async fn list_budgets(&self, user_id: &str) -> ResultEngine<Vec<Budget>> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .order_by_desc(budgets::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Budget::try_from).collect()
    }

    /// A single budget, after the ownership check.
    pub async fn budget(&self, user_id: &str, id: Uuid) -> ResultEngine<Budget> {
        let model = self.require_budget(&self.database, user_id, id).await?;
        Budget::try_from(model)
    }

    /// Create a budget owned by `user_id` and return the stored record.
    pub async fn create_budget(&self, user_id: &str, new: BudgetNew) -> ResultEngine<Budget> {
        let budget = Budget::new(
            user_id.to_string(),
            normalize_required_name(&new.name, "budget")?,
            normalize_category(Some(&new.category)),
            new.amount_minor,
            new.period,
            new.start_date.unwrap_or_else(Utc::now),
            new.end_date,
            normalize_optional_text(new.description.as_deref()),
        )?;

        budgets::ActiveModel::from(&budget)
            .insert(&self.database)
            .await?;
        Ok(budget)
    }

    /// Apply a patch to an owned budget; absent fields are untouched.
    pub async fn update_budget(
        &self,
        user_id: &str,
        id: Uuid,
        patch: BudgetPatch,
    ) -> ResultEngine<Budget> {
        if let Some(amount_minor) = patch.amount_minor {
            if amount_minor < 0 {
                return Err(EngineError::InvalidAmount(
                    "amount_minor must be >= 0".to_string(),
                ));
            }
        }

        let model = self.require_budget(&self.database, user_id, id).await?;

        let mut active: budgets::ActiveModel = model.into();
        if let Some(name) = patch.name.as_deref() {
            active.name = ActiveValue::Set(normalize_required_name(name, "budget")?);
        }
        if let Some(category) = patch.category.as_deref() {
            active.category = ActiveValue::Set(normalize_category(Some(category)));
        }
        if let Some(amount_minor) = patch.amount_minor {
            active.amount_minor = ActiveValue::Set(amount_minor);
        }
        if let Some(period) = patch.period {
            active.period = ActiveValue::Set(period.as_str().to_string());
        }
        if let Some(start_date) = patch.start_date {
            active.start_date = ActiveValue::Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = ActiveValue::Set(Some(end_date));
        }
        if let Some(description) = patch.description.as_deref() {
            active.description = ActiveValue::Set(normalize_optional_text(Some(description)));
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }

        let updated = active.update(&self.database).await?;
        Budget::try_from(updated)
    }

    /// Delete an owned budget.
    pub async fn delete_budget(&self, user_id: &str, id: Uuid) -> ResultEngine<()> {
        let model = self.require_budget(&self.database, user_id, id).await?;

        budgets::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Aggregate a user's active budgets.
    pub async fn budget_stats(&self, user_id: &str) -> ResultEngine<stats::BudgetStats> {
        let records: Vec<Budget> = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::IsActive.eq(true))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Budget::try_from)
            .collect::<ResultEngine<_>>()?;

        Ok(stats::budget_stats(&records))
    }
}
