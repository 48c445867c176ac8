use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::EngineError;

/// Suffix appended to every formatted amount (Iraqi dinar).
pub const CURRENCY_SUFFIX: &str = "د.ع";

/// Signed money amount represented as **integer hundredths** of a dinar.
///
/// Use this type for **all** monetary values (record amounts, totals) to
/// avoid floating-point drift. The backend speaks JSON numbers, so the
/// conversion to and from `f64` happens only at the wire boundary.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::from_major(25_000);
/// assert_eq!(amount.minor(), 2_500_000);
/// assert_eq!(amount.to_string(), "25,000 د.ع");
/// ```
///
/// Parsing from user input (accepts Arabic-Indic digits; rejects > 2
/// decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
/// assert_eq!("١٠.٥".parse::<Money>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// assert!("2000000000000".parse::<Money>().is_err());
/// ```
///
/// Sums saturate at the `i64` bounds instead of overflowing; use
/// [`Money::checked_add`] when the caller needs to know.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a single record may carry: one trillion dinars.
    pub const MAX: Money = Money(100_000_000_000_000);

    /// Creates a new amount from hundredths.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates a new amount from whole dinars.
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Converts a wire amount, rounding to the nearest hundredth.
    ///
    /// Returns `None` for non-finite values and for amounts beyond
    /// [`Money::MAX`] in either direction.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let minor = (value * 100.0).round();
        if minor.abs() > Self::MAX.0 as f64 {
            return None;
        }
        Some(Self(minor as i64))
    }

    /// Returns the raw value in hundredths.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns the amount as a JSON-friendly number.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole dinars, rounded half away from zero.
    #[must_use]
    pub const fn rounded_major(self) -> i64 {
        let abs = self.0.unsigned_abs();
        let major = ((abs + 50) / 100) as i64;
        if self.0 < 0 { -major } else { major }
    }

    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Plain editable representation (`25000`, `12.5`), used to pre-fill forms.
    #[must_use]
    pub fn to_input_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (major, minor) = (abs / 100, abs % 100);
        match minor {
            0 => format!("{sign}{major}"),
            m if m % 10 == 0 => format!("{sign}{major}.{}", m / 10),
            m => format!("{sign}{major}.{m:02}"),
        }
    }
}

impl fmt::Display for Money {
    /// Formats as whole dinars with grouped thousands, e.g. `1,250,000 د.ع`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let major = self.rounded_major();
        let sign = if major < 0 { "-" } else { "" };
        let digits = major.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}{grouped} {CURRENCY_SUFFIX}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Whether `ch` is a digit the amount parser understands: ASCII,
/// Arabic-Indic or Eastern Arabic-Indic.
#[must_use]
pub fn is_amount_digit(ch: char) -> bool {
    ascii_digit(ch).is_some()
}

/// Maps Arabic-Indic and Eastern Arabic-Indic digits to ASCII.
fn ascii_digit(ch: char) -> Option<char> {
    match ch {
        '0'..='9' => Some(ch),
        '\u{0660}'..='\u{0669}' => char::from_digit(ch as u32 - 0x0660, 10),
        '\u{06F0}'..='\u{06F9}' => char::from_digit(ch as u32 - 0x06F0, 10),
        _ => None,
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into hundredths.
    ///
    /// Accepts `.` (or the Arabic decimal separator `٫`) and an optional
    /// leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - magnitude at most [`Money::MAX`]
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim_start())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim_start())
        } else {
            (false, trimmed)
        };
        if rest.is_empty() {
            return Err(empty());
        }

        let normalized = rest
            .chars()
            .map(|ch| match ch {
                '٫' | '.' => Some('.'),
                other => ascii_digit(other),
            })
            .collect::<Option<String>>()
            .ok_or_else(invalid)?;

        let mut parts = normalized.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let minor_str = parts.next();
        if parts.next().is_some() || major_str.is_empty() {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| overflow())?;
        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(frac) if frac.len() == 1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            Some(frac) if frac.len() == 2 => frac.parse::<i64>().map_err(|_| invalid())?,
            Some(_) => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
        };

        let total = major
            .checked_mul(100)
            .and_then(|v| v.checked_add(minor))
            .filter(|v| *v <= Self::MAX.0)
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_groups_thousands_and_rounds() {
        assert_eq!(Money::ZERO.to_string(), "0 د.ع");
        assert_eq!(Money::from_major(999).to_string(), "999 د.ع");
        assert_eq!(Money::from_major(25_000).to_string(), "25,000 د.ع");
        assert_eq!(Money::from_major(1_250_000).to_string(), "1,250,000 د.ع");
        assert_eq!(Money::new(1050).to_string(), "11 د.ع");
        assert_eq!(Money::new(1049).to_string(), "10 د.ع");
        assert_eq!(Money::from_major(-3_500).to_string(), "-3,500 د.ع");
    }

    #[test]
    fn parse_accepts_sign_and_arabic_digits() {
        assert_eq!("25000".parse::<Money>().unwrap(), Money::from_major(25_000));
        assert_eq!("10.5".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("+1.00".parse::<Money>().unwrap().minor(), 100);
        assert_eq!("-0.01".parse::<Money>().unwrap().minor(), -1);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor(), 230);
        assert_eq!("٢٥٠٠٠".parse::<Money>().unwrap(), Money::from_major(25_000));
        assert_eq!("۱۲٫۵".parse::<Money>().unwrap().minor(), 1250);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("-".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!("1,000".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".5".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn parse_rejects_amounts_beyond_the_cap() {
        assert_eq!("1000000000000".parse::<Money>().unwrap(), Money::MAX);
        assert!("1000000000000.01".parse::<Money>().is_err());
        assert!("90000000000000000".parse::<Money>().is_err());
        assert!("-90000000000000000".parse::<Money>().is_err());
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let huge = Money::new(i64::MAX - 10);
        assert_eq!(huge + huge, Money::new(i64::MAX));
        assert_eq!([huge, huge, huge].iter().sum::<Money>(), Money::new(i64::MAX));

        let mut total = huge;
        total += Money::MAX;
        assert_eq!(total, Money::new(i64::MAX));

        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(
            Money::MAX.checked_add(Money::new(1)),
            Some(Money::new(100_000_000_000_001))
        );
    }

    #[test]
    fn wire_conversion_rounds_to_hundredths() {
        assert_eq!(Money::from_f64(25000.0), Some(Money::from_major(25_000)));
        assert_eq!(Money::from_f64(0.125).map(Money::minor), Some(13));
        assert_eq!(Money::new(1250).to_f64(), 12.5);
    }

    #[test]
    fn wire_conversion_rejects_unrepresentable_amounts() {
        assert_eq!(Money::from_f64(f64::NAN), None);
        assert_eq!(Money::from_f64(f64::INFINITY), None);
        assert_eq!(Money::from_f64(1e20), None);
        assert_eq!(Money::from_f64(-1e20), None);
        assert_eq!(Money::from_f64(1e12), Some(Money::MAX));
    }

    #[test]
    fn amount_digits_cover_the_three_scripts() {
        assert!("0٩۵".chars().all(is_amount_digit));
        assert!(!"½²a".chars().any(is_amount_digit));
    }

    #[test]
    fn input_string_drops_trailing_zeros() {
        assert_eq!(Money::from_major(25_000).to_input_string(), "25000");
        assert_eq!(Money::new(1250).to_input_string(), "12.5");
        assert_eq!(Money::new(1205).to_input_string(), "12.05");
    }
}
