//! # payoff-engine
//!
//! Open debt payoff planning and amortization simulation engine.
//!
//! Given a portfolio of debts and a monthly extra-payment budget, this
//! engine produces a month-by-month payment schedule until every debt is
//! retired, under a smallest-balance-first ("snowball") or
//! highest-rate-first ("avalanche") ordering strategy.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: debts, rates, payment schedules
//! - **strategy** — Payoff ordering strategies and target selection
//! - **engine** — The month-by-month amortization simulator
//! - **scenario** — Random portfolio generation for stress testing

pub mod core;
pub mod engine;
pub mod scenario;
pub mod strategy;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::debt::{Debt, DebtId, DebtPortfolio};
    pub use crate::core::rate::AnnualRate;
    pub use crate::core::schedule::{MonthSnapshot, PaymentLine, PaymentSchedule};
    pub use crate::engine::simulator::{PayoffEngine, SimulationConfig, SimulationResult};
    pub use crate::engine::summary::{PayoffSummary, StrategyComparison};
    pub use crate::strategy::ordering::Strategy;
}
