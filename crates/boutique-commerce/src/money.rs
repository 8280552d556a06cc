//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so catalog prices compare and
//! sum exactly.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
    CAD,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
            Currency::CHF => "CHF ",
            Currency::CAD => "CA$",
        }
    }

    /// Number of minor units per major unit.
    pub fn minor_units(&self) -> i64 {
        100
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            "CHF" => Some(Currency::CHF),
            "CAD" => Some(Currency::CAD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use boutique_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(29.90, Currency::EUR);
    /// assert_eq!(price.amount_cents, 2990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_units() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Like [`Money::from_decimal`], but `None` for amounts that are not
    /// finite or do not fit in `i64` minor units.
    pub fn try_from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        let scaled = (amount * currency.minor_units() as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(scaled as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_units() as f64
    }

    /// Format as a display string (e.g., "€29.90").
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }

    /// Try to add another Money value, returning None on currency mismatch
    /// or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on currency mismatch
    /// or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Clamp into `[min, max]` by amount, keeping this value's currency.
    pub fn clamp_amount(&self, min: i64, max: i64) -> Money {
        Money::new(self.amount_cents.clamp(min, max.max(min)), self.currency)
    }
}

impl PartialOrd for Money {
    /// Amounts in different currencies are not comparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.amount_cents.cmp(&other.amount_cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::EUR);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(29.9, Currency::EUR);
        assert_eq!(m.amount_cents, 2990);
    }

    #[test]
    fn test_money_try_from_decimal() {
        assert_eq!(
            Money::try_from_decimal(29.9, Currency::EUR),
            Some(Money::new(2990, Currency::EUR))
        );
        assert!(Money::try_from_decimal(-1.0, Currency::EUR).unwrap().is_negative());
        assert_eq!(Money::try_from_decimal(1e30, Currency::EUR), None);
        assert_eq!(Money::try_from_decimal(f64::NAN, Currency::EUR), None);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(2990, Currency::EUR);
        assert_eq!(m.display(), "\u{20ac}29.90");

        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.to_string(), "$49.99");
    }

    #[test]
    fn test_money_try_add() {
        let a = Money::new(1000, Currency::EUR);
        let b = Money::new(500, Currency::EUR);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1500);

        let usd = Money::new(500, Currency::USD);
        assert!(a.try_add(&usd).is_none());
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::EUR);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(
            Money::new(2990, Currency::EUR).try_multiply(3).unwrap().amount_cents,
            8970
        );
    }

    #[test]
    fn test_money_try_sum() {
        let values = [
            Money::new(100, Currency::EUR),
            Money::new(250, Currency::EUR),
        ];
        let total = Money::try_sum(values.iter(), Currency::EUR).unwrap();
        assert_eq!(total.amount_cents, 350);

        let empty: [Money; 0] = [];
        assert!(Money::try_sum(empty.iter(), Currency::EUR).unwrap().is_zero());
    }

    #[test]
    fn test_money_ordering_same_currency_only() {
        let cheap = Money::new(100, Currency::EUR);
        let dear = Money::new(900, Currency::EUR);
        assert!(cheap < dear);
        assert_eq!(cheap.partial_cmp(&Money::new(100, Currency::USD)), None);
    }

    #[test]
    fn test_money_clamp_amount() {
        let m = Money::new(-50, Currency::EUR);
        assert_eq!(m.clamp_amount(0, 8900).amount_cents, 0);
        let m = Money::new(50_000, Currency::EUR);
        assert_eq!(m.clamp_amount(0, 8900).amount_cents, 8900);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
