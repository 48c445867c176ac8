//! Expense records and the payloads used to create or change them.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::{Category, EngineError, Money, ResultEngine};

/// Canonical expense record as returned by the remote store.
///
/// `id`, `user_id` and `created_at` are assigned by the backend and never
/// change; everything else is mutable through [`ExpensePatch`].
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub amount: Money,
    pub category: Category,
    pub payee: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<FixedOffset>,
    /// Only meaningful for debts; always `true` for other categories.
    pub is_paid: bool,
}

impl Expense {
    #[must_use]
    pub fn is_debt(&self) -> bool {
        self.category.is_debt()
    }

    /// A debt that still has to be settled.
    #[must_use]
    pub fn is_unpaid_debt(&self) -> bool {
        self.is_debt() && !self.is_paid
    }
}

/// User-supplied fields of a new or edited expense.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseInput {
    pub amount: Money,
    pub category: Category,
    pub payee: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    /// Honoured only for debts; non-debt records are always paid.
    pub is_paid: Option<bool>,
}

impl ExpenseInput {
    /// Resolves the paid flag: debts default to unpaid, the rest are paid.
    #[must_use]
    pub fn resolved_is_paid(&self) -> bool {
        if self.category.is_debt() {
            self.is_paid.unwrap_or(false)
        } else {
            true
        }
    }

    /// Patch carrying only the fields that differ from `current`.
    ///
    /// Untouched fields stay off the wire, so values the client cannot
    /// represent (a category it does not know, say) survive an edit.
    #[must_use]
    pub fn changes_from(self, current: &Expense) -> ExpensePatch {
        ExpensePatch {
            amount: (self.amount != current.amount).then_some(self.amount),
            category: (self.category != current.category).then_some(self.category),
            payee: (self.payee != current.payee).then_some(self.payee),
            notes: (self.notes != current.notes).then_some(self.notes),
            date: (self.date != current.date).then_some(self.date),
            is_paid: self.is_paid.filter(|paid| *paid != current.is_paid),
        }
    }
}

/// Insert payload sent to the remote store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub user_id: String,
    pub amount: Money,
    pub category: Category,
    pub payee: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub is_paid: bool,
}

impl NewExpense {
    #[must_use]
    pub fn from_input(user_id: &str, input: ExpenseInput) -> Self {
        let is_paid = input.resolved_is_paid();
        Self {
            user_id: user_id.to_string(),
            amount: input.amount,
            category: input.category,
            payee: input.payee,
            notes: input.notes,
            date: input.date,
            is_paid,
        }
    }
}

/// Partial update: only `Some` fields are replaced.
///
/// `notes` is doubly optional so a patch can clear the notes
/// (`Some(None)`) as well as leave them untouched (`None`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<Money>,
    pub category: Option<Category>,
    pub payee: Option<String>,
    pub notes: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub is_paid: Option<bool>,
}

impl ExpensePatch {
    /// Patch applied when a debt is settled.
    #[must_use]
    pub fn settle(today: NaiveDate) -> Self {
        Self {
            is_paid: Some(true),
            date: Some(today),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Parses a calendar day in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| EngineError::InvalidDate(format!("{value}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(category: Category, is_paid: Option<bool>) -> ExpenseInput {
        ExpenseInput {
            amount: Money::from_major(1_000),
            category,
            payee: "x".to_string(),
            notes: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            is_paid,
        }
    }

    #[test]
    fn debts_default_to_unpaid() {
        assert!(!input(Category::Debt, None).resolved_is_paid());
        assert!(input(Category::Debt, Some(true)).resolved_is_paid());
    }

    #[test]
    fn non_debts_are_always_paid() {
        assert!(input(Category::Groceries, None).resolved_is_paid());
        assert!(input(Category::Bills, Some(false)).resolved_is_paid());
    }

    fn stored() -> Expense {
        Expense {
            id: "e1".to_string(),
            user_id: "u1".to_string(),
            amount: Money::from_major(1_000),
            category: Category::Groceries,
            payee: "x".to_string(),
            notes: Some("old".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            created_at: DateTime::parse_from_rfc3339("2026-10-01T08:00:00+03:00").unwrap(),
            is_paid: true,
        }
    }

    #[test]
    fn unchanged_input_yields_an_empty_patch() {
        let mut same = input(Category::Groceries, None);
        same.notes = Some("old".to_string());
        assert!(same.changes_from(&stored()).is_empty());
    }

    #[test]
    fn patch_only_carries_edited_fields() {
        let mut edited = input(Category::Groceries, None);
        edited.amount = Money::from_major(1_500);
        let patch = edited.changes_from(&stored());
        assert_eq!(patch.amount, Some(Money::from_major(1_500)));
        assert_eq!(patch.notes, Some(None));
        assert!(patch.category.is_none() && patch.payee.is_none() && patch.date.is_none());
        assert!(patch.is_paid.is_none());
    }

    #[test]
    fn settle_patch_touches_only_paid_flag_and_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let patch = ExpensePatch::settle(today);
        assert_eq!(patch.is_paid, Some(true));
        assert_eq!(patch.date, Some(today));
        assert!(patch.amount.is_none() && patch.payee.is_none() && patch.notes.is_none());
        assert!(ExpensePatch::default().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn parse_date_accepts_iso_days_only() {
        assert_eq!(
            parse_date(" 2026-02-28 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("28/02/2026").is_err());
    }
}
