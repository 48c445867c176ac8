//! Expense tracking core.
//!
//! The crate keeps the signed-in user's expense list in memory
//! ([`ExpenseStore`]), delegates persistence to a [`RecordStore`] and reports
//! outcomes through a [`Notifier`]. Derived figures (monthly total, category
//! and payee totals, debt totals) live in [`aggregates`] as pure functions.

pub use category::{CATEGORIES, Category, CategoryInfo};
pub use error::{EngineError, StoreError};
pub use expense::{Expense, ExpenseInput, ExpensePatch, NewExpense, parse_date};
pub use money::{CURRENCY_SUFFIX, Money, is_amount_digit};
pub use notify::{Notice, NoticeLevel, NoticeQueue, Notifier, messages};
pub use remote::RecordStore;
pub use session::Session;
pub use store::ExpenseStore;

pub mod aggregates;
mod category;
mod error;
mod expense;
mod money;
mod notify;
mod remote;
mod session;
mod store;

pub type ResultEngine<T> = Result<T, EngineError>;
