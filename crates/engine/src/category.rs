//! Fixed category table.
//!
//! Categories are a closed set; their labels and chart colors live in a
//! frozen lookup table rather than a registry.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Groceries,
    Household,
    Generator,
    Internet,
    Car,
    Debt,
    Bills,
    Other,
}

/// One row of the category table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: Category,
    pub value: &'static str,
    pub label: &'static str,
    /// Chart color as `0xRRGGBB`.
    pub color: u32,
}

/// All categories, in display order.
pub const CATEGORIES: [CategoryInfo; 8] = [
    CategoryInfo {
        category: Category::Groceries,
        value: "groceries",
        label: "مسواك",
        color: 0x10B981,
    },
    CategoryInfo {
        category: Category::Household,
        value: "household",
        label: "أغراض منزل",
        color: 0x8B5CF6,
    },
    CategoryInfo {
        category: Category::Generator,
        value: "generator",
        label: "مولدة",
        color: 0xF59E0B,
    },
    CategoryInfo {
        category: Category::Internet,
        value: "internet",
        label: "انترنت",
        color: 0x3B82F6,
    },
    CategoryInfo {
        category: Category::Car,
        value: "car",
        label: "سيارة",
        color: 0xEF4444,
    },
    CategoryInfo {
        category: Category::Debt,
        value: "debt",
        label: "تسديد ديون",
        color: 0xEC4899,
    },
    CategoryInfo {
        category: Category::Bills,
        value: "bills",
        label: "فواتير",
        color: 0x6366F1,
    },
    CategoryInfo {
        category: Category::Other,
        value: "other",
        label: "أخرى",
        color: 0x6B7280,
    },
];

impl Category {
    /// Every category in table order.
    pub fn all() -> impl Iterator<Item = Category> {
        CATEGORIES.iter().map(|info| info.category)
    }

    /// Categories offered by the history filter (debts have their own tab).
    pub fn filterable() -> impl Iterator<Item = Category> {
        Self::all().filter(|category| *category != Category::Debt)
    }

    #[must_use]
    pub fn info(self) -> &'static CategoryInfo {
        // The table is indexed by declaration order.
        &CATEGORIES[self as usize]
    }

    /// Canonical value stored by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.info().value
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.info().label
    }

    #[must_use]
    pub fn color(self) -> u32 {
        self.info().color
    }

    #[must_use]
    pub fn is_debt(self) -> bool {
        self == Category::Debt
    }

    /// Looks up a stored value; unknown values are `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        CATEGORIES
            .iter()
            .find(|info| info.value.eq_ignore_ascii_case(value))
            .map(|info| info.category)
    }

    /// Like [`Category::parse`] but falls back to [`Category::Other`].
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        Self::parse(value).unwrap_or(Category::Other)
    }

    /// Next category in table order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        CATEGORIES[(self as usize + 1) % CATEGORIES.len()].category
    }

    /// Previous category in table order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        CATEGORIES[(self as usize + CATEGORIES.len() - 1) % CATEGORIES.len()].category
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
