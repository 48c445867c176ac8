//! Dashboard state: active tab, history filters, row selection and the
//! modal (form or delete confirmation) currently open.

use chrono::NaiveDate;
use engine::{Category, Expense, aggregates};

use super::form::ExpenseFormState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    History,
    Debts,
    Reports,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Self::History => "السجل",
            Self::Debts => "الديون",
            Self::Reports => "التقارير",
        }
    }

    /// Tabs offered to the user, in display order.
    pub fn available(debt_tracking: bool) -> &'static [Tab] {
        if debt_tracking {
            &[Tab::History, Tab::Debts, Tab::Reports]
        } else {
            &[Tab::History, Tab::Reports]
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub tab: Tab,
    pub search: String,
    pub search_focused: bool,
    pub category_filter: Option<Category>,
    pub selected: usize,
    pub form: Option<ExpenseFormState>,
    pub pending_delete: Option<String>,
    /// Delete or settle call in flight.
    pub busy: bool,
}

impl DashboardState {
    pub fn set_tab(&mut self, tab: Tab, debt_tracking: bool) {
        if Tab::available(debt_tracking).contains(&tab) && self.tab != tab {
            self.tab = tab;
            self.selected = 0;
            self.search_focused = false;
        }
    }

    pub fn cycle_tab(&mut self, forward: bool, debt_tracking: bool) {
        let tabs = Tab::available(debt_tracking);
        let current = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (current + 1) % tabs.len()
        } else {
            (current + tabs.len() - 1) % tabs.len()
        };
        self.set_tab(tabs[next], debt_tracking);
    }

    /// "All" followed by every filterable category.
    pub fn cycle_filter(&mut self, forward: bool) {
        let options: Vec<Option<Category>> = std::iter::once(None)
            .chain(Category::filterable().map(Some))
            .collect();
        let current = options
            .iter()
            .position(|o| *o == self.category_filter)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.category_filter = options[next];
        self.selected = 0;
    }

    pub fn push_search(&mut self, ch: char) {
        if !ch.is_control() {
            self.search.push(ch);
            self.selected = 0;
        }
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    pub fn open_create(&mut self, today: NaiveDate) {
        self.form = Some(ExpenseFormState::create(today));
    }

    pub fn open_edit(&mut self, expense: &Expense) {
        self.form = Some(ExpenseFormState::edit(expense));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        if !self.busy {
            self.pending_delete = None;
        }
    }

    pub fn has_modal(&self) -> bool {
        self.form.is_some() || self.pending_delete.is_some()
    }

    /// Rows of the active list, in display order.
    pub fn rows<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        match self.tab {
            Tab::History => aggregates::history(expenses, &self.search, self.category_filter),
            Tab::Debts => {
                let partition = aggregates::partition_debts(&aggregates::debts(expenses));
                partition.unpaid.into_iter().chain(partition.paid).collect()
            }
            Tab::Reports => Vec::new(),
        }
    }

    pub fn selected_row<'a>(&self, expenses: &'a [Expense]) -> Option<&'a Expense> {
        self.rows(expenses).get(self.selected).copied()
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection inside the list after it shrank.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use engine::Money;

    use super::*;

    fn record(id: &str, category: Category, payee: &str, is_paid: bool) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: "u1".to_string(),
            amount: Money::from_major(1_000),
            category,
            payee: payee.to_string(),
            notes: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            created_at: DateTime::parse_from_rfc3339("2026-10-01T09:00:00+03:00").unwrap(),
            is_paid,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            record("a", Category::Groceries, "سوق الخير", true),
            record("b", Category::Debt, "أحمد", true),
            record("c", Category::Internet, "Earthlink", true),
            record("d", Category::Debt, "علي", false),
        ]
    }

    #[test]
    fn tabs_depend_on_debt_tracking() {
        let mut state = DashboardState::default();
        state.cycle_tab(true, true);
        assert_eq!(state.tab, Tab::Debts);

        let mut state = DashboardState::default();
        state.cycle_tab(true, false);
        assert_eq!(state.tab, Tab::Reports);
        state.set_tab(Tab::Debts, false);
        assert_eq!(state.tab, Tab::Reports);
    }

    #[test]
    fn history_rows_skip_debts_and_follow_search() {
        let expenses = sample();
        let mut state = DashboardState::default();
        let ids: Vec<_> = state.rows(&expenses).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);

        for ch in "EARTH".chars() {
            state.push_search(ch);
        }
        let ids: Vec<_> = state.rows(&expenses).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["c"]);
    }

    #[test]
    fn debt_rows_put_unpaid_first() {
        let expenses = sample();
        let mut state = DashboardState::default();
        state.set_tab(Tab::Debts, true);
        let ids: Vec<_> = state.rows(&expenses).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["d", "b"]);
        assert_eq!(state.selected_row(&expenses).map(|e| e.id.as_str()), Some("d"));
    }

    #[test]
    fn filter_cycles_through_all_and_skips_debt() {
        let mut state = DashboardState::default();
        let mut seen = Vec::new();
        for _ in 0..Category::filterable().count() + 1 {
            state.cycle_filter(true);
            seen.push(state.category_filter);
        }
        assert!(!seen.contains(&Some(Category::Debt)));
        assert_eq!(seen.last(), Some(&None));
        state.cycle_filter(false);
        assert_eq!(state.category_filter, Category::filterable().last());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = DashboardState::default();
        state.select_next(2);
        state.select_next(2);
        assert_eq!(state.selected, 1);
        state.clamp_selection(1);
        assert_eq!(state.selected, 0);
        state.select_prev();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn busy_delete_cannot_be_dismissed() {
        let mut state = DashboardState::default();
        state.request_delete("a");
        state.busy = true;
        state.cancel_delete();
        assert_eq!(state.pending_delete.as_deref(), Some("a"));
        state.busy = false;
        state.cancel_delete();
        assert!(!state.has_modal());
    }
}
