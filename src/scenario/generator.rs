//! Random portfolio generation for stress testing.
//!
//! Produces structurally valid debt portfolios with minimum payments
//! sized so every debt amortizes on its own. Feeds the property tests,
//! benchmarks, and the CLI `generate` command.

use crate::core::debt::{Debt, DebtId, DebtPortfolio};
use crate::core::rate::AnnualRate;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating a random debt portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Number of debts to generate.
    pub debt_count: usize,
    /// Minimum starting balance.
    pub min_balance: Decimal,
    /// Maximum starting balance.
    pub max_balance: Decimal,
    /// Upper bound on the annual rate, in percent.
    pub max_rate: Decimal,
    /// Minimum payment as a fraction of the starting balance. Must
    /// exceed the highest monthly periodic rate or generated debts may
    /// never amortize.
    pub minimum_payment_ratio: Decimal,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            debt_count: 10,
            min_balance: Decimal::from(500),
            max_balance: Decimal::from(25_000),
            max_rate: Decimal::from(24),
            minimum_payment_ratio: dec!(0.03),
        }
    }
}

/// Floor for generated minimum payments.
const MINIMUM_PAYMENT_FLOOR: Decimal = dec!(25);

/// Generate a random portfolio for testing.
pub fn generate_random_portfolio(config: &PortfolioConfig) -> DebtPortfolio {
    let mut rng = rand::thread_rng();
    let mut portfolio = DebtPortfolio::new();

    let min_f64: f64 = config.min_balance.to_string().parse().unwrap_or(500.0);
    let max_f64: f64 = config.max_balance.to_string().parse().unwrap_or(25_000.0);
    let max_rate_f64: f64 = config.max_rate.to_string().parse().unwrap_or(24.0);

    for i in 0..config.debt_count {
        let balance_f64 = rng.gen_range(min_f64..max_f64);
        let balance = Decimal::from_f64_retain(balance_f64)
            .unwrap_or(Decimal::from(1000))
            .round_dp(2);

        let rate_f64 = rng.gen_range(0.0..max_rate_f64);
        let rate = Decimal::from_f64_retain(rate_f64)
            .unwrap_or(Decimal::from(12))
            .round_dp(2);

        let minimum_payment = (balance * config.minimum_payment_ratio)
            .round_dp(2)
            .max(MINIMUM_PAYMENT_FLOOR);

        portfolio.add(Debt::new(
            DebtId::new(format!("DEBT-{:03}", i)),
            format!("Account {:03}", i),
            balance,
            AnnualRate::new(rate),
            minimum_payment,
        ));
    }

    portfolio
}
