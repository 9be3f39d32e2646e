use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Annual nominal percentage rate (APR).
///
/// Stored as a percentage figure (e.g., `19.99` for 19.99% APR).
/// The engine converts it to a monthly periodic rate by dividing by
/// 100 and by 12, the standard nominal-rate convention for consumer
/// debt statements.
///
/// # Examples
///
/// ```
/// use payoff_engine::core::rate::AnnualRate;
/// use rust_decimal_macros::dec;
///
/// let rate = AnnualRate::new(dec!(12));
/// assert_eq!(rate.monthly_periodic(), dec!(0.01));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnualRate(Decimal);

impl AnnualRate {
    /// A 0% rate.
    pub const ZERO: AnnualRate = AnnualRate(Decimal::ZERO);

    pub fn new(percent: impl Into<Decimal>) -> Self {
        Self(percent.into())
    }

    /// The rate as an annual percentage figure.
    pub fn as_percent(&self) -> Decimal {
        self.0
    }

    /// Monthly periodic rate: annual percentage / 100 / 12.
    pub fn monthly_periodic(&self) -> Decimal {
        self.0 / dec!(100) / dec!(12)
    }

    /// One month of interest on `balance`, rounded to cents.
    pub fn monthly_interest(&self, balance: Decimal) -> Decimal {
        (balance * self.monthly_periodic()).round_dp(2)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for AnnualRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<Decimal> for AnnualRate {
    fn from(percent: Decimal) -> Self {
        Self::new(percent)
    }
}
