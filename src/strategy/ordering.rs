use crate::core::debt::Debt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Debt payoff ordering strategy.
///
/// - `Snowball` targets the smallest starting balance first, retiring
///   accounts quickly so their minimums roll into the extra budget.
/// - `Avalanche` targets the highest annual rate first, minimizing
///   total interest paid.
///
/// # Examples
///
/// ```
/// use payoff_engine::strategy::ordering::Strategy;
///
/// let strategy: Strategy = "avalanche".parse().unwrap();
/// assert_eq!(strategy, Strategy::Avalanche);
/// assert!("cascade".parse::<Strategy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Snowball,
    Avalanche,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strategy string is not one of the two
/// recognized literals.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown strategy '{0}', expected 'snowball' or 'avalanche'")]
pub struct StrategyParseError(String);

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snowball" => Ok(Strategy::Snowball),
            "avalanche" => Ok(Strategy::Avalanche),
            other => Err(StrategyParseError(other.to_string())),
        }
    }
}

/// Compute the priority order in which debts receive extra payment.
///
/// Returns indices into `debts`, sorted ascending by starting balance
/// (snowball) or descending by annual rate (avalanche). The sort is
/// stable, so debts with equal keys keep their portfolio insertion
/// order — results are reproducible for identical inputs.
///
/// The order is computed once per simulation from starting values and
/// stays fixed for the run.
pub fn priority_order(debts: &[Debt], strategy: Strategy) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..debts.len()).collect();
    match strategy {
        Strategy::Snowball => {
            indices.sort_by(|&a, &b| debts[a].balance().cmp(&debts[b].balance()));
        }
        Strategy::Avalanche => {
            indices.sort_by(|&a, &b| debts[b].annual_rate().cmp(&debts[a].annual_rate()));
        }
    }
    indices
}
