use crate::core::debt::{DebtError, DebtId, DebtPortfolio};
use crate::core::schedule::{MonthSnapshot, PaymentLine, PaymentSchedule};
use crate::engine::summary::PayoffSummary;
use crate::strategy::ordering::{priority_order, Strategy};
use chrono::{Months, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Safety horizon: 600 months (50 years). Guarantees termination even
/// when interest outpaces payment capacity and balances never shrink.
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Errors that abort a simulation before any month is computed.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    InvalidDebt(#[from] DebtError),
}

/// Configuration for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Ordering strategy for the extra budget.
    pub strategy: Strategy,
    /// Monthly budget beyond all minimum payments. Negative values are
    /// clamped to zero.
    pub extra_payment: Decimal,
    /// Calendar date of the first simulated month.
    pub start_date: NaiveDate,
    /// Horizon after which the run is cut off with debts still open.
    pub max_months: u32,
}

impl SimulationConfig {
    /// A config with no extra budget, starting today, with the default
    /// safety horizon.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            extra_payment: Decimal::ZERO,
            start_date: Utc::now().date_naive(),
            max_months: DEFAULT_MAX_MONTHS,
        }
    }

    pub fn with_extra_payment(mut self, extra_payment: Decimal) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }
}

/// Aggregate output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Strategy the run was ordered under.
    strategy: Strategy,
    /// The extra budget actually applied (after clamping).
    extra_payment: Decimal,
    /// Number of debts submitted.
    debt_count: usize,
    /// Debt ids in the order each reached zero balance.
    payoff_order: Vec<DebtId>,
    /// Month-by-month payment breakdown.
    schedule: PaymentSchedule,
}

impl SimulationResult {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn extra_payment(&self) -> Decimal {
        self.extra_payment
    }

    pub fn payoff_order(&self) -> &[DebtId] {
        &self.payoff_order
    }

    pub fn schedule(&self) -> &PaymentSchedule {
        &self.schedule
    }

    /// Number of months simulated.
    pub fn total_months(&self) -> u32 {
        self.schedule.len() as u32
    }

    /// Sum of all interest line items across all months and debts.
    pub fn total_interest_paid(&self) -> Decimal {
        self.schedule.total_interest()
    }

    /// Sum of all payment line items across all months and debts.
    pub fn total_paid(&self) -> Decimal {
        self.schedule.total_paid()
    }

    /// True when every debt was retired within the horizon. False means
    /// the run hit the cap with balances still open — the inputs do not
    /// converge under this budget.
    pub fn is_complete(&self) -> bool {
        self.payoff_order.len() == self.debt_count
    }

    /// Debts still open when the run ended.
    pub fn open_debt_count(&self) -> usize {
        self.debt_count - self.payoff_order.len()
    }

    /// Fold the schedule into scalar totals.
    pub fn summary(&self) -> PayoffSummary {
        PayoffSummary::from_schedule(&self.schedule)
    }
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Payoff Simulation ===")?;
        writeln!(f, "Strategy:       {}", self.strategy)?;
        writeln!(f, "Extra Budget:   {}", self.extra_payment)?;
        writeln!(f, "Months:         {}", self.total_months())?;
        writeln!(f, "Total Paid:     {}", self.total_paid())?;
        writeln!(f, "Total Interest: {}", self.total_interest_paid())?;
        writeln!(f, "Complete:       {}", self.is_complete())?;
        let order: Vec<&str> = self.payoff_order.iter().map(|id| id.as_str()).collect();
        writeln!(f, "Payoff Order:   {}", order.join(" → "))?;
        Ok(())
    }
}

/// Working state of one debt during simulation. The engine copies the
/// portfolio into these on entry; caller records are never mutated.
struct DebtState {
    id: DebtId,
    balance: Decimal,
    periodic_rate: Decimal,
    minimum_payment: Decimal,
    closed: bool,
}

/// The core amortization engine.
///
/// Advances every open debt month by month: interest accrues on the
/// running balance, each debt pays its minimum, and the entire extra
/// budget goes to the first open debt in strategy order. When a debt
/// closes, its freed minimum joins the extra budget for all subsequent
/// months — the snowball mechanic shared by both strategies.
///
/// # Examples
///
/// ```
/// use payoff_engine::prelude::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let mut portfolio = DebtPortfolio::new();
/// portfolio.add(Debt::new(
///     DebtId::new("card"),
///     "Card",
///     dec!(500),
///     AnnualRate::new(dec!(12)),
///     dec!(50),
/// ));
///
/// let config = SimulationConfig::new(Strategy::Snowball)
///     .with_extra_payment(dec!(50))
///     .with_start_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
///
/// let result = PayoffEngine::simulate(&portfolio, &config).unwrap();
/// assert!(result.is_complete());
/// assert_eq!(result.total_months(), 6);
/// ```
pub struct PayoffEngine;

impl PayoffEngine {
    /// Simulate the payoff of `portfolio` under `config`.
    ///
    /// Structurally invalid input (negative amounts, duplicate ids)
    /// aborts before any month is computed. Reaching the horizon with
    /// debts still open is not an error; the caller detects it through
    /// [`SimulationResult::is_complete`].
    pub fn simulate(
        portfolio: &DebtPortfolio,
        config: &SimulationConfig,
    ) -> Result<SimulationResult, SimulationError> {
        portfolio.validate()?;

        let extra_budget = config.extra_payment.max(Decimal::ZERO);
        let order = priority_order(portfolio.debts(), config.strategy);

        let mut states: Vec<DebtState> = portfolio
            .debts()
            .iter()
            .map(|d| DebtState {
                id: d.id().clone(),
                balance: d.balance(),
                periodic_rate: d.annual_rate().monthly_periodic(),
                minimum_payment: d.minimum_payment(),
                closed: false,
            })
            .collect();

        let mut payoff_order: Vec<DebtId> = Vec::with_capacity(states.len());
        let mut extra_pool = extra_budget;

        // Debts submitted with a zero balance are already retired: they
        // enter the payoff order before month one, receive no payments,
        // and free their minimums like any other closure.
        for &idx in &order {
            let state = &mut states[idx];
            if state.balance.is_zero() {
                state.closed = true;
                payoff_order.push(state.id.clone());
                extra_pool += state.minimum_payment;
            }
        }

        let mut snapshots: Vec<MonthSnapshot> = Vec::new();
        let mut date = config.start_date;
        let mut month: u32 = 0;

        while month < config.max_months && states.iter().any(|s| !s.closed) {
            month += 1;
            let mut lines: Vec<PaymentLine> = Vec::new();
            let mut freed_minimums = Decimal::ZERO;
            let mut target_taken = false;

            for &idx in &order {
                if states[idx].closed {
                    continue;
                }
                let state = &mut states[idx];

                let interest = (state.balance * state.periodic_rate).round_dp(2);
                let mut payment = state.minimum_payment;
                if !target_taken {
                    // The whole extra pool funds exactly one debt per
                    // month: the first open debt in strategy order.
                    payment += extra_pool;
                    target_taken = true;
                }

                // A debt cannot be overpaid.
                let due = state.balance + interest;
                if payment > due {
                    payment = due;
                }

                let principal = payment - interest;
                state.balance -= principal;
                if state.balance <= Decimal::ZERO {
                    state.balance = Decimal::ZERO;
                    state.closed = true;
                    payoff_order.push(state.id.clone());
                    freed_minimums += state.minimum_payment;
                    debug!("debt {} retired in month {}", state.id, month);
                }

                lines.push(PaymentLine {
                    debt_id: state.id.clone(),
                    amount: payment,
                    interest,
                    principal,
                    balance: state.balance,
                });
            }

            snapshots.push(MonthSnapshot::new(month, date, lines));

            // Freed minimums snowball onto the next target from the
            // following month onward.
            extra_pool += freed_minimums;
            date = date.checked_add_months(Months::new(1)).unwrap_or(date);
        }

        debug!(
            "simulation finished after {} months, {}/{} debts retired",
            month,
            payoff_order.len(),
            states.len()
        );

        Ok(SimulationResult {
            strategy: config.strategy,
            extra_payment: extra_budget,
            debt_count: states.len(),
            payoff_order,
            schedule: PaymentSchedule::new(snapshots),
        })
    }
}
