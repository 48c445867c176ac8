//! Create / edit form for a single expense.

use chrono::NaiveDate;
use engine::{Category, Expense, ExpenseInput, Money, is_amount_digit, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Category,
    Payee,
    Notes,
    Date,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Amount,
        FormField::Category,
        FormField::Payee,
        FormField::Notes,
        FormField::Date,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    /// Record being edited; `None` in create mode.
    pub editing: Option<Expense>,
    pub amount: String,
    pub category: Option<Category>,
    pub payee: String,
    pub notes: String,
    pub date: String,
    pub focus: FormField,
    /// A save is in flight.
    pub pending: bool,
}

impl ExpenseFormState {
    pub fn create(today: NaiveDate) -> Self {
        Self {
            editing: None,
            amount: String::new(),
            category: None,
            payee: String::new(),
            notes: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            focus: FormField::Amount,
            pending: false,
        }
    }

    pub fn edit(expense: &Expense) -> Self {
        Self {
            editing: Some(expense.clone()),
            amount: expense.amount.to_input_string(),
            category: Some(expense.category),
            payee: expense.payee.clone(),
            notes: expense.notes.clone().unwrap_or_default(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            focus: FormField::Amount,
            pending: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.id.as_str())
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "تعديل المصروف"
        } else {
            "إضافة مصروف جديد"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "تحديث المصروف"
        } else {
            "إضافة المصروف"
        }
    }

    pub fn payee_label(&self) -> &'static str {
        if self.category.is_some_and(Category::is_debt) {
            "اسم الشخص"
        } else {
            "اسم المحل / المستلم"
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Steps through the categories; the first step picks the first one.
    pub fn cycle_category(&mut self, forward: bool) {
        self.category = Some(match (self.category, forward) {
            (None, _) => Category::Groceries,
            (Some(current), true) => current.next(),
            (Some(current), false) => current.prev(),
        });
    }

    pub fn input(&mut self, ch: char) {
        match self.focus {
            FormField::Amount => {
                if is_amount_digit(ch) || ch == '.' || ch == '٫' {
                    self.amount.push(ch);
                }
            }
            FormField::Category => match ch {
                ' ' | 'l' => self.cycle_category(true),
                'h' => self.cycle_category(false),
                _ => {}
            },
            FormField::Payee => {
                if !ch.is_control() {
                    self.payee.push(ch);
                }
            }
            FormField::Notes => {
                if !ch.is_control() {
                    self.notes.push(ch);
                }
            }
            FormField::Date => {
                if ch.is_ascii_digit() || ch == '-' {
                    self.date.push(ch);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Category => {}
            FormField::Payee => {
                self.payee.pop();
            }
            FormField::Notes => {
                self.notes.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
        }
    }

    /// The input to send, or `None` while a required field is missing or
    /// does not parse.
    pub fn submission(&self) -> Option<ExpenseInput> {
        let amount = self.amount.trim().parse::<Money>().ok()?;
        let category = self.category?;
        let payee = self.payee.trim();
        if payee.is_empty() {
            return None;
        }
        let date = parse_date(self.date.trim()).ok()?;
        let notes = self.notes.trim();

        Some(ExpenseInput {
            amount,
            category,
            payee: payee.to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            date,
            is_paid: None,
        })
    }
}
