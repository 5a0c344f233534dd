//! Transaction operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Transaction, TransactionNew, TransactionPatch, stats, transactions,
};

use super::{DateRange, Engine, normalize_category, normalize_optional_text};

impl Engine {
    /// All transactions for a user, newest `date` first.
    pub async fn list_transactions(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::Date)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    /// A single transaction, after the ownership check.
    pub async fn transaction(&self, user_id: &str, id: Uuid) -> ResultEngine<Transaction> {
        let model = self
            .require_transaction(&self.database, user_id, id)
            .await?;
        Transaction::try_from(model)
    }

    /// Create a transaction owned by `user_id` and return the stored record.
    pub async fn create_transaction(
        &self,
        user_id: &str,
        new: TransactionNew,
    ) -> ResultEngine<Transaction> {
        let tx = Transaction::new(
            user_id.to_string(),
            new.kind,
            normalize_category(new.category.as_deref()),
            new.amount_minor,
            normalize_optional_text(new.description.as_deref()),
            new.date.unwrap_or_else(Utc::now),
            new.tags,
        )?;

        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        Ok(tx)
    }

    /// Apply a patch to an owned transaction; absent fields are untouched.
    pub async fn update_transaction(
        &self,
        user_id: &str,
        id: Uuid,
        patch: TransactionPatch,
    ) -> ResultEngine<Transaction> {
        if let Some(amount_minor) = patch.amount_minor {
            if amount_minor < 0 {
                return Err(EngineError::InvalidAmount(
                    "amount_minor must be >= 0".to_string(),
                ));
            }
        }

        let model = self
            .require_transaction(&self.database, user_id, id)
            .await?;

        let mut active: transactions::ActiveModel = model.into();
        if let Some(kind) = patch.kind {
            active.kind = ActiveValue::Set(kind.as_str().to_string());
        }
        if let Some(category) = patch.category.as_deref() {
            active.category = ActiveValue::Set(normalize_category(Some(category)));
        }
        if let Some(amount_minor) = patch.amount_minor {
            active.amount_minor = ActiveValue::Set(amount_minor);
        }
        if let Some(description) = patch.description.as_deref() {
            active.description = ActiveValue::Set(normalize_optional_text(Some(description)));
        }
        if let Some(date) = patch.date {
            active.date = ActiveValue::Set(date);
        }
        if let Some(tags) = patch.tags.as_deref() {
            active.tags = ActiveValue::Set(transactions::encode_tags(tags));
        }

        let updated = active.update(&self.database).await?;
        Transaction::try_from(updated)
    }

    /// Delete an owned transaction.
    pub async fn delete_transaction(&self, user_id: &str, id: Uuid) -> ResultEngine<()> {
        let model = self
            .require_transaction(&self.database, user_id, id)
            .await?;

        transactions::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Aggregate a user's transactions, optionally restricted to an
    /// inclusive date range on `date`.
    pub async fn transaction_stats(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> ResultEngine<stats::TransactionStats> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
        if let Some(start) = range.start {
            query = query.filter(transactions::Column::Date.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(transactions::Column::Date.lte(end));
        }

        let records: Vec<Transaction> = query
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<_>>()?;

        Ok(stats::transaction_stats(&records))
    }
}
