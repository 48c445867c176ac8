//! Contract of the remote record store.
//!
//! The backend owns the durable copy of every record. The [`ExpenseStore`]
//! is the only caller of these operations; every call is scoped by the
//! session it receives.
//!
//! [`ExpenseStore`]: crate::ExpenseStore

use crate::{Expense, ExpensePatch, NewExpense, Session, StoreError};

// Single-threaded callers only, so the futures do not need to be `Send`.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// All records owned by the session user, newest date first.
    async fn list(&self, session: &Session) -> Result<Vec<Expense>, StoreError>;

    /// Inserts a record and returns the canonical row (id, created_at).
    async fn insert(&self, session: &Session, record: &NewExpense) -> Result<Expense, StoreError>;

    /// Replaces the supplied fields and returns the updated row.
    async fn update(
        &self,
        session: &Session,
        id: &str,
        patch: &ExpensePatch,
    ) -> Result<Expense, StoreError>;

    /// Hard-deletes a record.
    async fn delete(&self, session: &Session, id: &str) -> Result<(), StoreError>;
}
