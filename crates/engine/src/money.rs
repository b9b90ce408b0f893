use std::fmt;

use crate::{EngineError, ResultEngine};

/// Currency of the ledger. Amounts are stored in minor units (centavos).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Currency {
    #[default]
    Php,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Php => "₱",
        }
    }
}

/// Signed money amount represented as **integer centavos**.
///
/// Use this type for all monetary values (budgets, entry amounts, derived
/// totals) to avoid floating-point drift. Totals such as "left to spend" can
/// legitimately be negative; entry amounts themselves are non-negative and
/// are validated where user input enters the system.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(1_234_56);
/// assert_eq!(amount.minor(), 123_456);
/// assert_eq!(amount.format(Currency::Php), "₱1,234.56");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer centavos.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in centavos.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Formats the amount with the currency symbol and digit grouping.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        format!(
            "{sign}{}{}.{cents:02}",
            currency.symbol(),
            group_digits(units)
        )
    }

    /// Parses a decimal string in major units into centavos.
    ///
    /// Accepts an optional leading `+`/`-`, grouping commas in the integer
    /// part, and at most two fractional digits after a `.`.
    pub fn parse_major(s: &str) -> ResultEngine<Money> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount(format!("invalid amount: {s}"));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?.replace(',', "");
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| invalid())?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => {
                        return Err(EngineError::InvalidAmount(
                            "too many decimals".to_string(),
                        ));
                    }
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(Currency::default()))
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

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_groups_digits() {
        assert_eq!(Money::new(0).format(Currency::Php), "₱0.00");
        assert_eq!(Money::new(1).format(Currency::Php), "₱0.01");
        assert_eq!(Money::new(105_000).format(Currency::Php), "₱1,050.00");
        assert_eq!(
            Money::new(123_456_789).format(Currency::Php),
            "₱1,234,567.89"
        );
        assert_eq!(Money::new(-50_000).format(Currency::Php), "-₱500.00");
    }

    #[test]
    fn parse_accepts_plain_and_grouped() {
        assert_eq!(Money::parse_major("10").unwrap().minor(), 1000);
        assert_eq!(Money::parse_major("10.5").unwrap().minor(), 1050);
        assert_eq!(Money::parse_major("1,050.25").unwrap().minor(), 105_025);
        assert_eq!(Money::parse_major("-0.01").unwrap().minor(), -1);
        assert_eq!(Money::parse_major("  2.30 ").unwrap().minor(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Money::parse_major("abc").is_err());
        assert!(Money::parse_major("").is_err());
        assert!(Money::parse_major("12.345").is_err());
        assert!(Money::parse_major("1.2.3").is_err());
        assert!(Money::parse_major("12abc").is_err());
    }
}
