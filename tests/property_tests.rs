use chrono::NaiveDate;
use payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use payoff_engine::core::rate::AnnualRate;
use payoff_engine::engine::simulator::{PayoffEngine, SimulationConfig};
use payoff_engine::strategy::ordering::Strategy;
use proptest::prelude::*;
use proptest::strategy::Strategy as _;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

/// Build a portfolio from (balance_cents, rate_basis_points) pairs.
///
/// Minimum payments are 4% of the starting balance (floored at 25),
/// which dominates the worst monthly periodic rate generated here
/// (24% / 12 = 2%), so every debt amortizes and runs converge well
/// inside the default horizon.
fn portfolio_from(specs: &[(u64, u32)]) -> DebtPortfolio {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(cents, basis_points))| {
            let balance = Decimal::new(cents as i64, 2);
            let rate = AnnualRate::new(Decimal::new(i64::from(basis_points), 2));
            let minimum = (balance * dec!(0.04)).round_dp(2).max(dec!(25));
            Debt::new(
                DebtId::new(format!("debt-{}", i)),
                format!("Debt {}", i),
                balance,
                rate,
                minimum,
            )
        })
        .collect()
}

/// Balance $100–$30,000 in cents; rate 0–24% in basis points.
fn arb_debt_spec() -> impl proptest::strategy::Strategy<Value = (u64, u32)> {
    (100_00u64..30_000_00u64, 0u32..2400u32)
}

fn arb_specs() -> impl proptest::strategy::Strategy<Value = Vec<(u64, u32)>> {
    prop::collection::vec(arb_debt_spec(), 1..8)
}

fn arb_strategy() -> impl proptest::strategy::Strategy<Value = Strategy> {
    prop_oneof![Just(Strategy::Snowball), Just(Strategy::Avalanche)]
}

/// Extra budget $0–$500 in cents.
fn arb_extra() -> impl proptest::strategy::Strategy<Value = Decimal> {
    (0u64..500_00u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Every payment splits exactly into interest + principal.
    //
    // Decimal arithmetic keeps the split exact; there is no tolerance.
    // ===================================================================
    #[test]
    fn payment_conservation(specs in arb_specs(), strategy in arb_strategy(), extra in arb_extra()) {
        let portfolio = portfolio_from(&specs);
        let config = SimulationConfig::new(strategy)
            .with_extra_payment(extra)
            .with_start_date(start());
        let result = PayoffEngine::simulate(&portfolio, &config).unwrap();

        for month in result.schedule().iter() {
            for line in month.lines() {
                prop_assert_eq!(
                    line.amount,
                    line.interest + line.principal,
                    "line for {} must conserve", line.debt_id
                );
            }
        }
    }

    // ===================================================================
    // INVARIANT 2: Balances never rise and never go negative.
    //
    // Holds whenever minimum payments cover accrued interest, which the
    // generator guarantees by construction.
    // ===================================================================
    #[test]
    fn balances_monotonic_and_non_negative(specs in arb_specs(), strategy in arb_strategy(), extra in arb_extra()) {
        let portfolio = portfolio_from(&specs);
        let config = SimulationConfig::new(strategy)
            .with_extra_payment(extra)
            .with_start_date(start());
        let result = PayoffEngine::simulate(&portfolio, &config).unwrap();

        for debt in portfolio.debts() {
            let balances = result.schedule().balances_for(debt.id());
            prop_assert!(balances.iter().all(|b| *b >= Decimal::ZERO));
            prop_assert!(
                balances.windows(2).all(|w| w[1] <= w[0]),
                "balances of {} must be non-increasing", debt.id()
            );
        }
    }

    // ===================================================================
    // INVARIANT 3: On convergence, the payoff order lists every debt
    // exactly once.
    // ===================================================================
    #[test]
    fn payoff_order_complete_and_unique(specs in arb_specs(), strategy in arb_strategy(), extra in arb_extra()) {
        let portfolio = portfolio_from(&specs);
        let config = SimulationConfig::new(strategy)
            .with_extra_payment(extra)
            .with_start_date(start());
        let result = PayoffEngine::simulate(&portfolio, &config).unwrap();

        prop_assert!(result.is_complete(), "amortizing portfolios must converge");
        prop_assert_eq!(result.payoff_order().len(), portfolio.len());
        let unique: HashSet<_> = result.payoff_order().iter().collect();
        prop_assert_eq!(unique.len(), portfolio.len(), "no id may repeat");
    }

    // ===================================================================
    // INVARIANT 4: The simulation is deterministic.
    //
    // Two runs over identical inputs produce deep-equal results. No
    // randomness, no hidden state.
    // ===================================================================
    #[test]
    fn simulation_is_deterministic(specs in arb_specs(), strategy in arb_strategy(), extra in arb_extra()) {
        let portfolio = portfolio_from(&specs);
        let config = SimulationConfig::new(strategy)
            .with_extra_payment(extra)
            .with_start_date(start());
        let first = PayoffEngine::simulate(&portfolio, &config).unwrap();
        let second = PayoffEngine::simulate(&portfolio, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    // ===================================================================
    // INVARIANT 5: A negative extra budget behaves exactly like zero.
    // ===================================================================
    #[test]
    fn negative_extra_equals_zero_extra(specs in arb_specs(), strategy in arb_strategy(), extra in arb_extra()) {
        let portfolio = portfolio_from(&specs);
        let negative = SimulationConfig::new(strategy)
            .with_extra_payment(-extra)
            .with_start_date(start());
        let zero = SimulationConfig::new(strategy).with_start_date(start());

        let clamped = PayoffEngine::simulate(&portfolio, &negative).unwrap();
        let baseline = PayoffEngine::simulate(&portfolio, &zero).unwrap();
        prop_assert_eq!(clamped, baseline);
    }

    // ===================================================================
    // INVARIANT 6: Extra budget never hurts.
    //
    // Adding budget can only shorten the payoff and reduce interest,
    // never the reverse.
    // ===================================================================
    #[test]
    fn extra_budget_never_hurts(specs in arb_specs(), strategy in arb_strategy(), extra in arb_extra()) {
        let portfolio = portfolio_from(&specs);
        let with_extra = SimulationConfig::new(strategy)
            .with_extra_payment(extra)
            .with_start_date(start());
        let without = SimulationConfig::new(strategy).with_start_date(start());

        let funded = PayoffEngine::simulate(&portfolio, &with_extra).unwrap();
        let baseline = PayoffEngine::simulate(&portfolio, &without).unwrap();

        prop_assert!(
            funded.total_months() <= baseline.total_months(),
            "extra {} lengthened payoff: {} > {}",
            extra, funded.total_months(), baseline.total_months()
        );
        prop_assert!(
            funded.total_interest_paid() <= baseline.total_interest_paid(),
            "extra {} increased interest", extra
        );
    }

    // ===================================================================
    // INVARIANT 7: The folded summary agrees with the schedule.
    //
    // On convergence, principal repaid equals what was borrowed.
    // ===================================================================
    #[test]
    fn summary_matches_schedule(specs in arb_specs(), strategy in arb_strategy(), extra in arb_extra()) {
        let portfolio = portfolio_from(&specs);
        let config = SimulationConfig::new(strategy)
            .with_extra_payment(extra)
            .with_start_date(start());
        let result = PayoffEngine::simulate(&portfolio, &config).unwrap();
        let summary = result.summary();

        prop_assert_eq!(summary.total_months, result.total_months());
        prop_assert_eq!(summary.total_paid, result.schedule().total_paid());
        prop_assert_eq!(summary.total_interest, result.schedule().total_interest());
        prop_assert_eq!(
            summary.total_paid,
            summary.total_interest + summary.total_principal
        );
        prop_assert_eq!(summary.total_principal, portfolio.total_balance());
    }

    // ===================================================================
    // INVARIANT 8: The horizon bounds every run.
    //
    // Even a portfolio that cannot converge produces at most max_months
    // snapshots, and the shortfall is visible on the result.
    // ===================================================================
    #[test]
    fn horizon_bounds_every_run(balance_cents in 1_000_00u64..100_000_00u64) {
        // 120% APR against a token minimum payment: balances only grow.
        let mut portfolio = DebtPortfolio::new();
        portfolio.add(Debt::new(
            DebtId::new("runaway"),
            "Runaway",
            Decimal::new(balance_cents as i64, 2),
            AnnualRate::new(dec!(120)),
            dec!(5),
        ));
        let config = SimulationConfig::new(Strategy::Avalanche)
            .with_start_date(start())
            .with_max_months(60);
        let result = PayoffEngine::simulate(&portfolio, &config).unwrap();

        prop_assert_eq!(result.total_months(), 60);
        prop_assert!(!result.is_complete());
        prop_assert_eq!(result.open_debt_count(), 1);
    }
}
