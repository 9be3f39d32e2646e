use crate::core::debt::DebtPortfolio;
use crate::core::schedule::PaymentSchedule;
use crate::engine::simulator::{PayoffEngine, SimulationConfig, SimulationError, SimulationResult};
use crate::strategy::ordering::Strategy;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar totals folded from a payment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSummary {
    /// Number of simulated months.
    pub total_months: u32,
    /// Everything paid across all months and debts.
    pub total_paid: Decimal,
    /// Interest portion of the total.
    pub total_interest: Decimal,
    /// Principal portion of the total.
    pub total_principal: Decimal,
    /// Date of the final payment, if any month was simulated.
    pub debt_free_date: Option<NaiveDate>,
}

impl PayoffSummary {
    /// Pure reduction over the schedule; no other state involved.
    pub fn from_schedule(schedule: &PaymentSchedule) -> Self {
        PayoffSummary {
            total_months: schedule.len() as u32,
            total_paid: schedule.total_paid(),
            total_interest: schedule.total_interest(),
            total_principal: schedule.total_principal(),
            debt_free_date: schedule.last().map(|m| m.date()),
        }
    }

    /// Interest as a fraction of everything paid.
    pub fn interest_share(&self) -> f64 {
        if self.total_paid == Decimal::ZERO {
            return 0.0;
        }
        let ratio = self.total_interest / self.total_paid;
        ratio.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

impl std::fmt::Display for PayoffSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Payoff Summary ===")?;
        writeln!(f, "Months:          {}", self.total_months)?;
        writeln!(f, "Total Paid:      {}", self.total_paid)?;
        writeln!(f, "Total Interest:  {}", self.total_interest)?;
        writeln!(f, "Total Principal: {}", self.total_principal)?;
        writeln!(f, "Interest Share:  {:.1}%", self.interest_share() * 100.0)?;
        if let Some(date) = self.debt_free_date {
            writeln!(f, "Debt-Free Date:  {}", date)?;
        }
        Ok(())
    }
}

/// Side-by-side comparison of both strategies over one portfolio and
/// one extra budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub snowball: SimulationResult,
    pub avalanche: SimulationResult,
}

impl StrategyComparison {
    /// Run both strategies against the same inputs.
    pub fn run(
        portfolio: &DebtPortfolio,
        extra_payment: Decimal,
        start_date: NaiveDate,
    ) -> Result<Self, SimulationError> {
        let snowball = PayoffEngine::simulate(
            portfolio,
            &SimulationConfig::new(Strategy::Snowball)
                .with_extra_payment(extra_payment)
                .with_start_date(start_date),
        )?;
        let avalanche = PayoffEngine::simulate(
            portfolio,
            &SimulationConfig::new(Strategy::Avalanche)
                .with_extra_payment(extra_payment)
                .with_start_date(start_date),
        )?;
        Ok(StrategyComparison {
            snowball,
            avalanche,
        })
    }

    /// Extra interest the snowball ordering costs relative to avalanche.
    /// Positive means avalanche is cheaper.
    pub fn interest_difference(&self) -> Decimal {
        self.snowball.total_interest_paid() - self.avalanche.total_interest_paid()
    }

    /// Month-count difference (snowball minus avalanche).
    pub fn months_difference(&self) -> i64 {
        i64::from(self.snowball.total_months()) - i64::from(self.avalanche.total_months())
    }

    /// The strategy that pays less interest overall. Snowball wins ties:
    /// its early closures are worth keeping when the cost is equal.
    pub fn recommended(&self) -> Strategy {
        if self.avalanche.total_interest_paid() < self.snowball.total_interest_paid() {
            Strategy::Avalanche
        } else {
            Strategy::Snowball
        }
    }
}

impl std::fmt::Display for StrategyComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Strategy Comparison ===")?;
        writeln!(
            f,
            "Snowball:   {} months, {} interest",
            self.snowball.total_months(),
            self.snowball.total_interest_paid()
        )?;
        writeln!(
            f,
            "Avalanche:  {} months, {} interest",
            self.avalanche.total_months(),
            self.avalanche.total_interest_paid()
        )?;
        writeln!(f, "Interest Difference: {}", self.interest_difference())?;
        writeln!(f, "Recommended:         {}", self.recommended())?;
        Ok(())
    }
}
