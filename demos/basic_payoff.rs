//! Basic payoff simulation example.
//!
//! Demonstrates how the engine turns a portfolio of debts and an extra
//! monthly budget into a full amortization schedule.

use chrono::NaiveDate;
use payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use payoff_engine::core::rate::AnnualRate;
use payoff_engine::engine::simulator::{PayoffEngine, SimulationConfig};
use payoff_engine::strategy::ordering::Strategy;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  payoff-engine: Basic Payoff Example      ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut portfolio = DebtPortfolio::new();
    portfolio.add(Debt::new(
        DebtId::new("store-card"),
        "Store Card",
        dec!(850),
        AnnualRate::new(dec!(26.99)),
        dec!(30),
    ));
    portfolio.add(Debt::new(
        DebtId::new("visa"),
        "Visa Card",
        dec!(4200),
        AnnualRate::new(dec!(19.99)),
        dec!(105),
    ));
    portfolio.add(Debt::new(
        DebtId::new("auto-loan"),
        "Auto Loan",
        dec!(11500),
        AnnualRate::new(dec!(6.4)),
        dec!(310),
    ));

    println!("Debts:          {}", portfolio.len());
    println!("Total Owed:     ${}", portfolio.total_balance());
    println!("Total Minimums: ${}/month\n", portfolio.total_minimum_payment());

    let config = SimulationConfig::new(Strategy::Snowball)
        .with_extra_payment(dec!(200))
        .with_start_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

    let result = PayoffEngine::simulate(&portfolio, &config).expect("valid portfolio");

    println!("{}", result);
    println!("{}", result.summary());

    // Show the first few months of the schedule
    println!("━━━ First Three Months ━━━\n");
    for month in result.schedule().iter().take(3) {
        println!("Month {} ({}):", month.month(), month.date());
        for line in month.lines() {
            println!(
                "  {:<12} paid {:>8}  (interest {:>7}, principal {:>8})  balance {:>9}",
                line.debt_id.as_str(),
                line.amount,
                line.interest,
                line.principal,
                line.balance
            );
        }
        println!();
    }
}
