use crate::core::rate::AnnualRate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Unique identifier for a debt within a portfolio.
///
/// Ids are caller-supplied and stable across the simulation: the
/// payoff order and every schedule line refer back to them.
///
/// # Examples
///
/// ```
/// use payoff_engine::core::debt::DebtId;
///
/// let visa = DebtId::new("visa");
/// let auto = DebtId::new("auto-loan");
/// assert_ne!(visa, auto);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(String);

impl DebtId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this debt id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DebtId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from structurally invalid debt records.
#[derive(Debug, Error)]
pub enum DebtError {
    #[error("debt '{id}' has a negative balance: {balance}")]
    NegativeBalance { id: DebtId, balance: Decimal },
    #[error("debt '{id}' has a negative interest rate: {rate}")]
    NegativeRate { id: DebtId, rate: AnnualRate },
    #[error("debt '{id}' has a negative minimum payment: {payment}")]
    NegativeMinimumPayment { id: DebtId, payment: Decimal },
    #[error("duplicate debt id '{0}'")]
    DuplicateId(DebtId),
}

/// One outstanding liability.
///
/// A debt carries the amount currently owed, its annual nominal rate,
/// and the minimum payment due every month it remains open. Debts are
/// immutable once created; the simulator works on its own copy of the
/// running balances and never mutates the caller's records.
///
/// # Examples
///
/// ```
/// use payoff_engine::core::debt::{Debt, DebtId};
/// use payoff_engine::core::rate::AnnualRate;
/// use rust_decimal_macros::dec;
///
/// let debt = Debt::new(
///     DebtId::new("visa"),
///     "Visa Card",
///     dec!(1200),
///     AnnualRate::new(dec!(19.99)),
///     dec!(35),
/// );
///
/// assert_eq!(debt.balance(), dec!(1200));
/// assert_eq!(debt.minimum_payment(), dec!(35));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Unique identifier for this debt.
    id: DebtId,
    /// Display label.
    name: String,
    /// Amount currently owed. Must be non-negative.
    balance: Decimal,
    /// Annual nominal percentage rate. Must be non-negative.
    annual_rate: AnnualRate,
    /// Amount due every month the debt remains open. Must be non-negative.
    minimum_payment: Decimal,
}

impl Debt {
    pub fn new(
        id: DebtId,
        name: impl Into<String>,
        balance: Decimal,
        annual_rate: AnnualRate,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            annual_rate,
            minimum_payment,
        }
    }

    /// Check this record for structural violations.
    pub fn validate(&self) -> Result<(), DebtError> {
        if self.balance < Decimal::ZERO {
            return Err(DebtError::NegativeBalance {
                id: self.id.clone(),
                balance: self.balance,
            });
        }
        if self.annual_rate.as_percent() < Decimal::ZERO {
            return Err(DebtError::NegativeRate {
                id: self.id.clone(),
                rate: self.annual_rate,
            });
        }
        if self.minimum_payment < Decimal::ZERO {
            return Err(DebtError::NegativeMinimumPayment {
                id: self.id.clone(),
                payment: self.minimum_payment,
            });
        }
        Ok(())
    }

    // --- Accessors ---

    pub fn id(&self) -> &DebtId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn annual_rate(&self) -> AnnualRate {
        self.annual_rate
    }

    pub fn minimum_payment(&self) -> Decimal {
        self.minimum_payment
    }
}

/// An ordered collection of debts submitted to the payoff engine.
///
/// Insertion order is significant: it is the deterministic tie-break
/// when two debts compare equal under a strategy's sort key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtPortfolio {
    debts: Vec<Debt>,
}

impl DebtPortfolio {
    pub fn new() -> Self {
        Self { debts: Vec::new() }
    }

    pub fn add(&mut self, debt: Debt) {
        self.debts.push(debt);
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    /// Total amount owed across all debts.
    pub fn total_balance(&self) -> Decimal {
        self.debts.iter().map(|d| d.balance()).sum()
    }

    /// Sum of the monthly minimum payments of all debts.
    pub fn total_minimum_payment(&self) -> Decimal {
        self.debts.iter().map(|d| d.minimum_payment()).sum()
    }

    /// Validate every debt and reject duplicate ids.
    pub fn validate(&self) -> Result<(), DebtError> {
        let mut seen: HashSet<&DebtId> = HashSet::new();
        for debt in &self.debts {
            debt.validate()?;
            if !seen.insert(debt.id()) {
                return Err(DebtError::DuplicateId(debt.id().clone()));
            }
        }
        Ok(())
    }
}

impl FromIterator<Debt> for DebtPortfolio {
    fn from_iter<T: IntoIterator<Item = Debt>>(iter: T) -> Self {
        Self {
            debts: iter.into_iter().collect(),
        }
    }
}
