//! In-memory expense list for the signed-in user.
//!
//! The store owns the canonical local copy of the records and is the only
//! caller of the [`RecordStore`]. Local state is changed only after the
//! remote call succeeds, so at every observable point it mirrors the
//! backend; nothing is applied optimistically.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    Category, Expense, ExpenseInput, ExpensePatch, Money, NewExpense, Notice, Notifier,
    RecordStore, ResultEngine, Session, aggregates,
    aggregates::{CategoryShare, PayeeTotal},
    notify::messages,
};

pub struct ExpenseStore<R, N> {
    remote: R,
    notifier: N,
    session: Option<Session>,
    expenses: Vec<Expense>,
    loading: bool,
}

impl<R: RecordStore, N: Notifier> ExpenseStore<R, N> {
    pub fn new(remote: R, notifier: N, session: Option<Session>) -> Self {
        Self {
            remote,
            notifier,
            session,
            expenses: Vec::new(),
            loading: true,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Replaces the session (sign-in, sign-out). The list is cleared and
    /// must be loaded again.
    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
        self.expenses.clear();
        self.loading = true;
    }

    /// Swaps in fresh credentials for the same user, keeping the list.
    ///
    /// A session for another user is treated like [`Self::set_session`].
    pub fn renew_session(&mut self, session: Session) {
        let same_user = self
            .session
            .as_ref()
            .is_some_and(|current| current.user_id == session.user_id);
        if same_user {
            self.session = Some(session);
        } else {
            self.set_session(Some(session));
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetches every record of the session user, newest first.
    ///
    /// On failure the list keeps its previous value, an error notice is
    /// emitted and the error is returned; there is no retry.
    pub async fn load(&mut self) -> ResultEngine<()> {
        let Some(session) = self.session.as_ref() else {
            self.expenses.clear();
            self.loading = false;
            return Ok(());
        };

        let result = self.remote.list(session).await;
        self.loading = false;
        match result {
            Ok(expenses) => {
                tracing::debug!(count = expenses.len(), "expenses loaded");
                self.expenses = expenses;
                Ok(())
            }
            Err(err) => {
                tracing::error!("error fetching expenses: {err}");
                self.notifier.notify(Notice::error(messages::LOAD_FAILED));
                Err(err.into())
            }
        }
    }

    /// Creates a record and prepends the canonical copy to the list.
    ///
    /// Returns `Ok(None)` when there is no session.
    pub async fn add(&mut self, input: ExpenseInput) -> ResultEngine<Option<Expense>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };

        let is_debt = input.category.is_debt();
        let record = NewExpense::from_input(&session.user_id, input);
        match self.remote.insert(session, &record).await {
            Ok(created) => {
                tracing::info!(id = %created.id, category = %created.category, "expense added");
                self.expenses.insert(0, created.clone());
                let message = if is_debt {
                    messages::DEBT_ADDED
                } else {
                    messages::EXPENSE_ADDED
                };
                self.notifier.notify(Notice::success(message));
                Ok(Some(created))
            }
            Err(err) => {
                tracing::error!("error adding expense: {err}");
                self.notifier.notify(Notice::error(messages::ADD_FAILED));
                Err(err.into())
            }
        }
    }

    /// Replaces the supplied fields of record `id`.
    pub async fn update(
        &mut self,
        id: &str,
        patch: ExpensePatch,
    ) -> ResultEngine<Option<Expense>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };

        match self.remote.update(session, id, &patch).await {
            Ok(updated) => {
                tracing::info!(id, "expense updated");
                self.replace_local(id, updated.clone());
                self.notifier
                    .notify(Notice::success(messages::EXPENSE_UPDATED));
                Ok(Some(updated))
            }
            Err(err) => {
                tracing::error!("error updating expense {id}: {err}");
                self.notifier.notify(Notice::error(messages::UPDATE_FAILED));
                Err(err.into())
            }
        }
    }

    /// Hard-deletes record `id`.
    pub async fn delete(&mut self, id: &str) -> ResultEngine<()> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };

        match self.remote.delete(session, id).await {
            Ok(()) => {
                tracing::info!(id, "expense deleted");
                self.expenses.retain(|e| e.id != id);
                self.notifier
                    .notify(Notice::success(messages::EXPENSE_DELETED));
                Ok(())
            }
            Err(err) => {
                tracing::error!("error deleting expense {id}: {err}");
                self.notifier.notify(Notice::error(messages::DELETE_FAILED));
                Err(err.into())
            }
        }
    }

    /// Marks a debt as paid and moves its date to `today`.
    ///
    /// Non-debt records are ignored. Settling an already paid debt only
    /// refreshes its date.
    pub async fn settle_debt(
        &mut self,
        debt: &Expense,
        today: NaiveDate,
    ) -> ResultEngine<Option<Expense>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };
        if !debt.is_debt() {
            return Ok(None);
        }

        let patch = ExpensePatch::settle(today);
        match self.remote.update(session, &debt.id, &patch).await {
            Ok(settled) => {
                tracing::info!(id = %debt.id, "debt settled");
                self.replace_local(&debt.id, settled.clone());
                self.notifier
                    .notify(Notice::success(messages::debt_settled(&debt.payee)));
                Ok(Some(settled))
            }
            Err(err) => {
                tracing::error!("error settling debt {}: {err}", debt.id);
                self.notifier.notify(Notice::error(messages::SETTLE_FAILED));
                Err(err.into())
            }
        }
    }

    fn replace_local(&mut self, id: &str, record: Expense) {
        if let Some(slot) = self.expenses.iter_mut().find(|e| e.id == id) {
            *slot = record;
        }
    }

    pub fn monthly_total(&self, today: NaiveDate) -> Money {
        aggregates::monthly_total(&self.expenses, today)
    }

    pub fn category_totals(&self) -> BTreeMap<Category, Money> {
        aggregates::category_totals(&self.expenses)
    }

    pub fn category_shares(&self) -> Vec<CategoryShare> {
        aggregates::category_shares(&self.category_totals())
    }

    pub fn payee_totals(&self) -> Vec<PayeeTotal> {
        aggregates::payee_totals(&self.expenses)
    }

    pub fn debts(&self) -> Vec<&Expense> {
        aggregates::debts(&self.expenses)
    }

    pub fn unpaid_debts_total(&self) -> Money {
        aggregates::unpaid_debts_total(&self.expenses)
    }

    pub fn unpaid_debts_count(&self) -> usize {
        aggregates::unpaid_debts_count(&self.expenses)
    }
}
