//! The single ownership predicate gating every fetch-by-id.
//!
//! Records are scoped to exactly one user; a mismatch is reported as
//! `NotAuthorized`, a missing row as `NotFound`. All handlers go through the
//! `require_*` methods so the check cannot be forgotten at a call site.

use sea_orm::{ConnectionTrait, EntityTrait};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, budgets, savings_goals, transactions};

use super::Engine;

pub(super) trait Owned {
    fn owner(&self) -> &str;
}

impl Owned for transactions::Model {
    fn owner(&self) -> &str {
        &self.user_id
    }
}

impl Owned for budgets::Model {
    fn owner(&self) -> &str {
        &self.user_id
    }
}

impl Owned for savings_goals::Model {
    fn owner(&self) -> &str {
        &self.user_id
    }
}

/// `belongs_to(record, requester)`: the sole authorization boundary.
fn ensure_owner<T: Owned>(record: &T, user_id: &str, resource: &str) -> ResultEngine<()> {
    if record.owner() != user_id {
        return Err(EngineError::NotAuthorized(format!(
            "{resource} belongs to another user"
        )));
    }
    Ok(())
}

/// Generates a `require_*` method fetching a record by id and applying the
/// ownership check.
macro_rules! impl_require_owned {
    ($fn_name:ident, $entity:path, $model:ty, $resource:literal) => {
        pub(super) async fn $fn_name<C: ConnectionTrait>(
            &self,
            db: &C,
            user_id: &str,
            id: Uuid,
        ) -> ResultEngine<$model> {
            let model = <$entity>::find_by_id(id.to_string())
                .one(db)
                .await?
                .ok_or_else(|| EngineError::NotFound($resource.to_string()))?;
            ensure_owner(&model, user_id, $resource)?;
            Ok(model)
        }
    };
}

impl Engine {
    impl_require_owned!(
        require_transaction,
        transactions::Entity,
        transactions::Model,
        "transaction"
    );
    impl_require_owned!(require_budget, budgets::Entity, budgets::Model, "budget");
    impl_require_owned!(
        require_goal,
        savings_goals::Entity,
        savings_goals::Model,
        "savings goal"
    );
}
