//! Dashboard flows that go through the expense store.
//!
//! Every flow comes in two halves. `begin_*` checks the dashboard and marks
//! the call as pending, so the caller can redraw before awaiting; the async
//! half runs the store call and settles the dashboard on its outcome.

use chrono::NaiveDate;
use engine::{
    Expense, ExpenseInput, ExpensePatch, ExpenseStore, Notifier, RecordStore, ResultEngine,
};

use super::{DashboardState, Tab};

/// What submitting the open form amounts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Save {
    Create(ExpenseInput),
    Update { id: String, patch: ExpensePatch },
    /// Edit form submitted without changes.
    Unchanged,
}

/// Validates the open form and marks it pending. `None` while the form is
/// incomplete or a save is already running.
pub fn begin_save(dashboard: &mut DashboardState) -> Option<Save> {
    let form = dashboard.form.as_mut()?;
    if form.pending {
        return None;
    }
    let input = form.submission()?;
    let save = match &form.editing {
        Some(current) => {
            let patch = input.changes_from(current);
            if patch.is_empty() {
                Save::Unchanged
            } else {
                Save::Update {
                    id: current.id.clone(),
                    patch,
                }
            }
        }
        None => Save::Create(input),
    };
    form.pending = true;
    Some(save)
}

/// The form closes once the store accepted the change; on failure it stays
/// open with the user's input.
pub async fn save<R: RecordStore, N: Notifier>(
    store: &mut ExpenseStore<R, N>,
    dashboard: &mut DashboardState,
    save: Save,
) -> ResultEngine<()> {
    let result = match save {
        Save::Create(input) => store.add(input).await.map(drop),
        Save::Update { id, patch } => store.update(&id, patch).await.map(drop),
        Save::Unchanged => Ok(()),
    };

    match &result {
        Ok(()) => dashboard.close_form(),
        Err(_) => {
            if let Some(form) = dashboard.form.as_mut() {
                form.pending = false;
            }
        }
    }
    result
}

/// Id of the record awaiting confirmation, if no delete is running yet.
pub fn begin_delete(dashboard: &mut DashboardState) -> Option<String> {
    if dashboard.busy {
        return None;
    }
    let id = dashboard.pending_delete.clone()?;
    dashboard.busy = true;
    Some(id)
}

/// The confirmation stays open when the delete fails.
pub async fn delete<R: RecordStore, N: Notifier>(
    store: &mut ExpenseStore<R, N>,
    dashboard: &mut DashboardState,
    id: &str,
) -> ResultEngine<()> {
    let result = store.delete(id).await;
    dashboard.busy = false;
    if result.is_ok() {
        dashboard.pending_delete = None;
        let len = dashboard.rows(store.expenses()).len();
        dashboard.clamp_selection(len);
    }
    result
}

/// The selected row of the debts tab, when it is a debt still to be paid.
pub fn begin_settle(dashboard: &mut DashboardState, expenses: &[Expense]) -> Option<Expense> {
    if dashboard.tab != Tab::Debts || dashboard.busy || dashboard.has_modal() {
        return None;
    }
    let debt = dashboard
        .selected_row(expenses)
        .filter(|debt| debt.is_unpaid_debt())
        .cloned()?;
    dashboard.busy = true;
    Some(debt)
}

pub async fn settle<R: RecordStore, N: Notifier>(
    store: &mut ExpenseStore<R, N>,
    dashboard: &mut DashboardState,
    debt: &Expense,
    today: NaiveDate,
) -> ResultEngine<()> {
    let result = store.settle_debt(debt, today).await;
    dashboard.busy = false;
    if let Some(settled) = result? {
        tracing::debug!(id = %settled.id, date = %settled.date, "settled debt moved to paid");
    }
    let len = dashboard.rows(store.expenses()).len();
    dashboard.clamp_selection(len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use chrono::DateTime;
    use engine::{
        Category, EngineError, Money, NewExpense, NoticeQueue, Session, StoreError, messages,
    };

    use super::*;

    #[derive(Default)]
    struct Backend {
        rows: RefCell<Vec<Expense>>,
        patches: RefCell<Vec<ExpensePatch>>,
        failing: Cell<bool>,
        calls: Cell<usize>,
    }

    #[derive(Clone, Default)]
    struct FakeRemote(Rc<Backend>);

    impl FakeRemote {
        fn check(&self) -> Result<(), StoreError> {
            self.0.calls.set(self.0.calls.get() + 1);
            if self.0.failing.get() {
                return Err(StoreError::Rejected("backend down".to_string()));
            }
            Ok(())
        }
    }

    impl RecordStore for FakeRemote {
        async fn list(&self, _session: &Session) -> Result<Vec<Expense>, StoreError> {
            self.check()?;
            Ok(self.0.rows.borrow().clone())
        }

        async fn insert(
            &self,
            _session: &Session,
            record: &NewExpense,
        ) -> Result<Expense, StoreError> {
            self.check()?;
            let id = format!("new-{}", self.0.calls.get());
            let row = Expense {
                id,
                user_id: record.user_id.clone(),
                amount: record.amount,
                category: record.category,
                payee: record.payee.clone(),
                notes: record.notes.clone(),
                date: record.date,
                created_at: created_at(),
                is_paid: record.is_paid,
            };
            self.0.rows.borrow_mut().insert(0, row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            _session: &Session,
            id: &str,
            patch: &ExpensePatch,
        ) -> Result<Expense, StoreError> {
            self.check()?;
            self.0.patches.borrow_mut().push(patch.clone());
            let mut rows = self.0.rows.borrow_mut();
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            if let Some(amount) = patch.amount {
                row.amount = amount;
            }
            if let Some(is_paid) = patch.is_paid {
                row.is_paid = is_paid;
            }
            if let Some(date) = patch.date {
                row.date = date;
            }
            Ok(row.clone())
        }

        async fn delete(&self, _session: &Session, id: &str) -> Result<(), StoreError> {
            self.check()?;
            self.0.rows.borrow_mut().retain(|row| row.id != id);
            Ok(())
        }
    }

    fn created_at() -> chrono::DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-01T09:00:00+03:00").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn record(id: &str, category: Category, is_paid: bool) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: "u1".to_string(),
            amount: Money::from_major(5_000),
            category,
            payee: "أبو حسن".to_string(),
            notes: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
            created_at: created_at(),
            is_paid,
        }
    }

    async fn store_with(
        rows: Vec<Expense>,
    ) -> (ExpenseStore<FakeRemote, NoticeQueue>, FakeRemote, NoticeQueue) {
        let remote = FakeRemote::default();
        *remote.0.rows.borrow_mut() = rows;
        let notices = NoticeQueue::new();
        let session = Session::new("u1", "sara@example.com", "token");
        let mut store = ExpenseStore::new(remote.clone(), notices.clone(), Some(session));
        store.load().await.unwrap();
        (store, remote, notices)
    }

    fn filled_create_form(dashboard: &mut DashboardState) {
        dashboard.open_create(today());
        let form = dashboard.form.as_mut().unwrap();
        form.amount = "25000".to_string();
        form.category = Some(Category::Groceries);
        form.payee = "سوق الخير".to_string();
    }

    #[tokio::test]
    async fn form_closes_after_a_successful_create() {
        let (mut store, _remote, notices) = store_with(Vec::new()).await;
        let mut dashboard = DashboardState::default();
        filled_create_form(&mut dashboard);

        let pending = begin_save(&mut dashboard).unwrap();
        assert!(dashboard.form.as_ref().unwrap().pending);
        assert!(begin_save(&mut dashboard).is_none());

        save(&mut store, &mut dashboard, pending).await.unwrap();

        assert!(dashboard.form.is_none());
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(notices.drain()[0].message, messages::EXPENSE_ADDED);
    }

    #[tokio::test]
    async fn failed_save_keeps_the_form_and_its_input() {
        let (mut store, remote, _notices) = store_with(Vec::new()).await;
        remote.0.failing.set(true);
        let mut dashboard = DashboardState::default();
        filled_create_form(&mut dashboard);

        let pending = begin_save(&mut dashboard).unwrap();
        let result = save(&mut store, &mut dashboard, pending).await;

        assert!(matches!(result, Err(EngineError::Store(StoreError::Rejected(_)))));
        let form = dashboard.form.as_ref().unwrap();
        assert!(!form.pending);
        assert_eq!(form.payee, "سوق الخير");
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn incomplete_form_is_not_submitted() {
        let mut dashboard = DashboardState::default();
        dashboard.open_create(today());
        assert!(begin_save(&mut dashboard).is_none());
        assert!(!dashboard.form.as_ref().unwrap().pending);
    }

    #[tokio::test]
    async fn untouched_edit_sends_nothing() {
        let (mut store, remote, _notices) =
            store_with(vec![record("e1", Category::Other, true)]).await;
        let mut dashboard = DashboardState::default();
        let current = store.expenses()[0].clone();
        dashboard.open_edit(&current);
        let calls = remote.0.calls.get();

        let pending = begin_save(&mut dashboard).unwrap();
        assert_eq!(pending, Save::Unchanged);
        save(&mut store, &mut dashboard, pending).await.unwrap();

        assert!(dashboard.form.is_none());
        assert_eq!(remote.0.calls.get(), calls);
    }

    #[tokio::test]
    async fn edit_leaves_the_stored_category_alone() {
        // A row whose category the client does not know is shown as "other".
        let (mut store, remote, _notices) =
            store_with(vec![record("e1", Category::Other, true)]).await;
        let mut dashboard = DashboardState::default();
        let current = store.expenses()[0].clone();
        dashboard.open_edit(&current);
        dashboard.form.as_mut().unwrap().amount = "7500".to_string();

        let pending = begin_save(&mut dashboard).unwrap();
        save(&mut store, &mut dashboard, pending).await.unwrap();

        let patches = remote.0.patches.borrow();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].amount, Some(Money::from_major(7_500)));
        assert_eq!(patches[0].category, None);
        assert_eq!(patches[0].payee, None);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_dialog_open() {
        let (mut store, remote, _notices) =
            store_with(vec![record("e1", Category::Groceries, true)]).await;
        let mut dashboard = DashboardState::default();
        dashboard.request_delete("e1");
        remote.0.failing.set(true);

        let id = begin_delete(&mut dashboard).unwrap();
        assert!(begin_delete(&mut dashboard).is_none());
        assert!(delete(&mut store, &mut dashboard, &id).await.is_err());

        assert!(!dashboard.busy);
        assert_eq!(dashboard.pending_delete.as_deref(), Some("e1"));
        assert_eq!(store.expenses().len(), 1);

        remote.0.failing.set(false);
        let id = begin_delete(&mut dashboard).unwrap();
        delete(&mut store, &mut dashboard, &id).await.unwrap();
        assert!(dashboard.pending_delete.is_none());
        assert!(store.expenses().is_empty());
    }

    #[tokio::test]
    async fn settle_needs_an_unpaid_debt_on_the_debts_tab() {
        let rows = vec![
            record("d1", Category::Debt, false),
            record("d2", Category::Debt, true),
        ];
        let (mut store, _remote, _notices) = store_with(rows).await;
        let mut dashboard = DashboardState::default();

        assert!(begin_settle(&mut dashboard, store.expenses()).is_none());

        dashboard.set_tab(Tab::Debts, true);
        dashboard.selected = 1;
        assert!(begin_settle(&mut dashboard, store.expenses()).is_none());
        assert!(!dashboard.busy);

        dashboard.selected = 0;
        let debt = begin_settle(&mut dashboard, store.expenses()).unwrap();
        assert_eq!(debt.id, "d1");
        assert!(dashboard.busy);

        settle(&mut store, &mut dashboard, &debt, today()).await.unwrap();

        assert!(!dashboard.busy);
        assert_eq!(store.unpaid_debts_count(), 0);
        let settled = store.expenses().iter().find(|e| e.id == "d1").unwrap();
        assert!(settled.is_paid);
        assert_eq!(settled.date, today());
    }

    #[tokio::test]
    async fn failed_settle_leaves_the_debt_unpaid() {
        let (mut store, remote, _notices) =
            store_with(vec![record("d1", Category::Debt, false)]).await;
        let mut dashboard = DashboardState::default();
        dashboard.set_tab(Tab::Debts, true);
        remote.0.failing.set(true);

        let debt = begin_settle(&mut dashboard, store.expenses()).unwrap();
        assert!(settle(&mut store, &mut dashboard, &debt, today()).await.is_err());

        assert!(!dashboard.busy);
        assert_eq!(store.unpaid_debts_count(), 1);
    }
}
