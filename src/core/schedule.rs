use crate::core::debt::DebtId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-debt line item in one simulated month.
///
/// `amount` is the total paid against the debt that month, split into
/// its `interest` and `principal` portions; `balance` is what remains
/// owed after the payment. `amount == interest + principal` holds
/// exactly under decimal arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLine {
    pub debt_id: DebtId,
    pub amount: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub balance: Decimal,
}

/// One simulated month: an immutable snapshot of every payment made.
///
/// Month totals are derived by folding the lines rather than stored,
/// so a snapshot cannot drift out of agreement with its own breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    /// 1-based month index.
    month: u32,
    /// Calendar date of this payment cycle.
    date: NaiveDate,
    /// Per-debt breakdown, in strategy order.
    lines: Vec<PaymentLine>,
}

impl MonthSnapshot {
    pub fn new(month: u32, date: NaiveDate, lines: Vec<PaymentLine>) -> Self {
        Self { month, date, lines }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn lines(&self) -> &[PaymentLine] {
        &self.lines
    }

    /// The line for a specific debt, if it was open this month.
    pub fn line_for(&self, id: &DebtId) -> Option<&PaymentLine> {
        self.lines.iter().find(|line| &line.debt_id == id)
    }

    /// Total paid across all debts this month.
    pub fn total_paid(&self) -> Decimal {
        self.lines.iter().map(|line| line.amount).sum()
    }

    /// Interest portion of this month's payments.
    pub fn interest_paid(&self) -> Decimal {
        self.lines.iter().map(|line| line.interest).sum()
    }

    /// Principal portion of this month's payments.
    pub fn principal_paid(&self) -> Decimal {
        self.lines.iter().map(|line| line.principal).sum()
    }

    /// Combined balance still owed after this month's payments.
    pub fn remaining_balance(&self) -> Decimal {
        self.lines.iter().map(|line| line.balance).sum()
    }
}

/// The ordered sequence of monthly snapshots produced by a simulation.
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
///     dec!(300),
///     AnnualRate::ZERO,
///     dec!(100),
/// ));
///
/// let config = SimulationConfig::new(Strategy::Snowball)
///     .with_start_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// let result = PayoffEngine::simulate(&portfolio, &config).unwrap();
///
/// assert_eq!(result.schedule().len(), 3);
/// assert_eq!(result.schedule().total_paid(), dec!(300));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    months: Vec<MonthSnapshot>,
}

impl PaymentSchedule {
    pub fn new(months: Vec<MonthSnapshot>) -> Self {
        Self { months }
    }

    pub fn months(&self) -> &[MonthSnapshot] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonthSnapshot> {
        self.months.iter()
    }

    pub fn last(&self) -> Option<&MonthSnapshot> {
        self.months.last()
    }

    /// Total paid across the whole schedule.
    pub fn total_paid(&self) -> Decimal {
        self.months.iter().map(|m| m.total_paid()).sum()
    }

    /// Total interest paid across the whole schedule.
    pub fn total_interest(&self) -> Decimal {
        self.months.iter().map(|m| m.interest_paid()).sum()
    }

    /// Total principal repaid across the whole schedule.
    pub fn total_principal(&self) -> Decimal {
        self.months.iter().map(|m| m.principal_paid()).sum()
    }

    /// The recorded balance trajectory of one debt, month by month,
    /// for the months it was open.
    pub fn balances_for(&self, id: &DebtId) -> Vec<Decimal> {
        self.months
            .iter()
            .filter_map(|m| m.line_for(id).map(|line| line.balance))
            .collect()
    }
}
