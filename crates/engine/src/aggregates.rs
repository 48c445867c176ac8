//! Pure derived queries over an in-memory list of expenses.
//!
//! Every function here is a linear scan with no side effects; the store and
//! the views call them on each render.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use unicode_normalization::UnicodeNormalization;

use crate::{Category, Expense, Money};

/// Amount spent on one payee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayeeTotal {
    pub payee: String,
    pub amount: Money,
}

/// A category total with its share of the grand total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Money,
    /// Rounded percentage, 0..=100.
    pub percent: u8,
}

/// Debts split for display: unpaid first, then paid.
#[derive(Debug, Default, PartialEq)]
pub struct DebtPartition<'a> {
    pub unpaid: Vec<&'a Expense>,
    pub paid: Vec<&'a Expense>,
}

impl DebtPartition<'_> {
    pub fn is_empty(&self) -> bool {
        self.unpaid.is_empty() && self.paid.is_empty()
    }

    pub fn len(&self) -> usize {
        self.unpaid.len() + self.paid.len()
    }

    /// Row `index` in display order.
    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.unpaid
            .get(index)
            .or_else(|| self.paid.get(index.checked_sub(self.unpaid.len())?))
            .copied()
    }
}

/// First day of the month containing `today`.
#[must_use]
pub fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// Spending since the first day of the current month, unpaid debts excluded.
#[must_use]
pub fn monthly_total(expenses: &[Expense], today: NaiveDate) -> Money {
    let start = month_start(today);
    expenses
        .iter()
        .filter(|e| e.date >= start)
        .filter(|e| !e.is_unpaid_debt())
        .map(|e| e.amount)
        .sum()
}

/// Summed amount per category, unpaid debts excluded.
#[must_use]
pub fn category_totals(expenses: &[Expense]) -> BTreeMap<Category, Money> {
    let mut totals = BTreeMap::new();
    for expense in expenses.iter().filter(|e| !e.is_unpaid_debt()) {
        *totals.entry(expense.category).or_insert(Money::ZERO) += expense.amount;
    }
    totals
}

/// Category totals with their rounded share of the grand total.
#[must_use]
pub fn category_shares(totals: &BTreeMap<Category, Money>) -> Vec<CategoryShare> {
    let grand = totals.values().sum::<Money>().minor();
    totals
        .iter()
        .map(|(category, amount)| {
            let percent = if grand > 0 {
                ((amount.minor() as f64 / grand as f64) * 100.0)
                    .round()
                    .clamp(0.0, 100.0) as u8
            } else {
                0
            };
            CategoryShare {
                category: *category,
                amount: *amount,
                percent,
            }
        })
        .collect()
}

/// Summed amount per payee over every record, largest first.
///
/// Ties keep the order in which payees first appear in the list.
#[must_use]
pub fn payee_totals(expenses: &[Expense]) -> Vec<PayeeTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<PayeeTotal> = Vec::new();
    for expense in expenses {
        match index.get(expense.payee.as_str()) {
            Some(&idx) => totals[idx].amount += expense.amount,
            None => {
                index.insert(expense.payee.as_str(), totals.len());
                totals.push(PayeeTotal {
                    payee: expense.payee.clone(),
                    amount: expense.amount,
                });
            }
        }
    }
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

#[must_use]
pub fn debts(expenses: &[Expense]) -> Vec<&Expense> {
    expenses.iter().filter(|e| e.is_debt()).collect()
}

#[must_use]
pub fn unpaid_debts_total(expenses: &[Expense]) -> Money {
    expenses
        .iter()
        .filter(|e| e.is_unpaid_debt())
        .map(|e| e.amount)
        .sum()
}

#[must_use]
pub fn unpaid_debts_count(expenses: &[Expense]) -> usize {
    expenses.iter().filter(|e| e.is_unpaid_debt()).count()
}

#[must_use]
pub fn partition_debts<'a>(debts: &[&'a Expense]) -> DebtPartition<'a> {
    let (unpaid, paid): (Vec<&Expense>, Vec<&Expense>) =
        debts.iter().copied().partition(|d| !d.is_paid);
    DebtPartition { unpaid, paid }
}

/// Case- and compatibility-insensitive form used for search matching.
#[must_use]
pub fn normalize_search(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// History view: non-debt records matching the search text (payee or notes)
/// and the optional category.
#[must_use]
pub fn history<'a>(
    expenses: &'a [Expense],
    query: &str,
    category: Option<Category>,
) -> Vec<&'a Expense> {
    let needle = normalize_search(query.trim());
    expenses
        .iter()
        .filter(|e| !e.is_debt())
        .filter(|e| category.is_none_or(|c| e.category == c))
        .filter(|e| {
            needle.is_empty()
                || normalize_search(&e.payee).contains(&needle)
                || e
                    .notes
                    .as_deref()
                    .is_some_and(|notes| normalize_search(notes).contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset};

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn created() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-01T08:00:00+03:00").unwrap()
    }

    fn record(id: &str, amount: i64, category: Category, payee: &str, date: NaiveDate) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: "u1".to_string(),
            amount: Money::from_major(amount),
            category,
            payee: payee.to_string(),
            notes: None,
            date,
            created_at: created(),
            is_paid: !category.is_debt(),
        }
    }

    fn sample() -> Vec<Expense> {
        let mut paid_debt = record("d2", 4_000, Category::Debt, "علي", day(2026, 10, 3));
        paid_debt.is_paid = true;
        vec![
            record("e1", 25_000, Category::Groceries, "سوق الخير", day(2026, 10, 12)),
            record("d1", 10_000, Category::Debt, "أحمد", day(2026, 10, 10)),
            record("e2", 35_000, Category::Internet, "Earthlink", day(2026, 10, 1)),
            paid_debt,
            record("e3", 15_000, Category::Groceries, "سوق الخير", day(2026, 9, 30)),
        ]
    }

    #[test]
    fn monthly_total_starts_on_the_first_and_skips_unpaid_debts() {
        let total = monthly_total(&sample(), day(2026, 10, 15));
        assert_eq!(total, Money::from_major(25_000 + 35_000 + 4_000));
    }

    #[test]
    fn monthly_total_is_zero_for_an_empty_list() {
        assert_eq!(monthly_total(&[], day(2026, 10, 15)), Money::ZERO);
    }

    #[test]
    fn totals_saturate_on_huge_amounts() {
        let mut big = record("b1", 0, Category::Groceries, "تاجر", day(2026, 10, 2));
        big.amount = Money::new(i64::MAX / 2 + 1);
        let mut debt = record("b2", 0, Category::Debt, "تاجر", day(2026, 10, 3));
        debt.amount = big.amount;
        let list = vec![big.clone(), big.clone(), debt.clone(), debt];

        let ceiling = Money::new(i64::MAX);
        assert_eq!(monthly_total(&list, day(2026, 10, 15)), ceiling);
        assert_eq!(category_totals(&list)[&Category::Groceries], ceiling);
        assert_eq!(payee_totals(&list)[0].amount, ceiling);
        assert_eq!(unpaid_debts_total(&list), ceiling);

        let shares = category_shares(&category_totals(&list));
        assert_eq!(shares[0].percent, 100);
    }

    #[test]
    fn category_totals_skip_unpaid_debts() {
        let totals = category_totals(&sample());
        assert_eq!(totals[&Category::Groceries], Money::from_major(40_000));
        assert_eq!(totals[&Category::Internet], Money::from_major(35_000));
        assert_eq!(totals[&Category::Debt], Money::from_major(4_000));
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn category_shares_round_to_whole_percent() {
        let shares = category_shares(&category_totals(&sample()));
        let percents: Vec<_> = shares.iter().map(|s| (s.category, s.percent)).collect();
        assert_eq!(
            percents,
            vec![
                (Category::Groceries, 51),
                (Category::Internet, 44),
                (Category::Debt, 5),
            ]
        );
        assert!(category_shares(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn payee_totals_include_every_record_sorted_desc() {
        let totals = payee_totals(&sample());
        assert_eq!(totals[0].payee, "سوق الخير");
        assert_eq!(totals[0].amount, Money::from_major(40_000));
        assert_eq!(totals[1].payee, "Earthlink");
        assert_eq!(totals[2].payee, "أحمد");
        assert_eq!(totals[2].amount, Money::from_major(10_000));
        assert_eq!(totals.len(), 4);
    }

    #[test]
    fn payee_totals_keep_first_seen_order_on_ties() {
        let list = vec![
            record("a", 5, Category::Other, "b", day(2026, 10, 1)),
            record("b", 5, Category::Other, "a", day(2026, 10, 1)),
        ];
        let payees: Vec<_> = payee_totals(&list).into_iter().map(|t| t.payee).collect();
        assert_eq!(payees, vec!["b", "a"]);
    }

    #[test]
    fn debt_totals_only_count_unpaid() {
        let list = sample();
        assert_eq!(debts(&list).len(), 2);
        assert_eq!(unpaid_debts_total(&list), Money::from_major(10_000));
        assert_eq!(unpaid_debts_count(&list), 1);
    }

    #[test]
    fn partition_puts_unpaid_first() {
        let list = sample();
        let all_debts = debts(&list);
        let partition = partition_debts(&all_debts);
        assert_eq!(partition.unpaid.len(), 1);
        assert_eq!(partition.paid.len(), 1);
        assert_eq!(partition.get(0).map(|e| e.id.as_str()), Some("d1"));
        assert_eq!(partition.get(1).map(|e| e.id.as_str()), Some("d2"));
        assert!(partition.get(2).is_none());
        assert_eq!(partition.len(), 2);
    }

    #[test]
    fn history_excludes_debts_and_filters() {
        let mut list = sample();
        list[2].notes = Some("Monthly FIBER plan".to_string());

        let all = history(&list, "", None);
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| !e.is_debt()));

        let by_note = history(&list, "fiber", None);
        assert_eq!(by_note.len(), 1);
        assert_eq!(by_note[0].id, "e2");

        let by_payee = history(&list, "الخير", Some(Category::Groceries));
        assert_eq!(by_payee.len(), 2);

        assert!(history(&list, "الخير", Some(Category::Car)).is_empty());
        assert!(history(&list, "أحمد", None).is_empty());
    }

    #[test]
    fn search_normalization_folds_width_and_case() {
        assert_eq!(normalize_search("ＥＡＲＴＨ"), "earth");
    }
}
