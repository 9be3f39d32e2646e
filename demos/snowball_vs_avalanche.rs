//! Snowball vs avalanche comparison example.
//!
//! Runs both ordering strategies over the same portfolio and budget,
//! showing how the payoff order and total interest differ.

use chrono::NaiveDate;
use payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use payoff_engine::core::rate::AnnualRate;
use payoff_engine::engine::summary::StrategyComparison;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  payoff-engine: Snowball vs Avalanche     ║");
    println!("╚══════════════════════════════════════════╝\n");

    // Small balance at a low rate, large balance at a high rate:
    // the two strategies disagree about the target.
    let mut portfolio = DebtPortfolio::new();
    portfolio.add(Debt::new(
        DebtId::new("medical"),
        "Medical Bill",
        dec!(600),
        AnnualRate::new(dec!(0)),
        dec!(50),
    ));
    portfolio.add(Debt::new(
        DebtId::new("card"),
        "Credit Card",
        dec!(5200),
        AnnualRate::new(dec!(23.99)),
        dec!(130),
    ));
    portfolio.add(Debt::new(
        DebtId::new("personal"),
        "Personal Loan",
        dec!(2400),
        AnnualRate::new(dec!(11.5)),
        dec!(75),
    ));

    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let comparison =
        StrategyComparison::run(&portfolio, dec!(150), start).expect("valid portfolio");

    println!("{}", comparison);

    println!("━━━ Payoff Orders ━━━\n");
    let snowball: Vec<&str> = comparison
        .snowball
        .payoff_order()
        .iter()
        .map(|id| id.as_str())
        .collect();
    let avalanche: Vec<&str> = comparison
        .avalanche
        .payoff_order()
        .iter()
        .map(|id| id.as_str())
        .collect();
    println!("  snowball:  {}", snowball.join(" → "));
    println!("  avalanche: {}", avalanche.join(" → "));

    println!("\n━━━ Debt-Free Dates ━━━\n");
    for (name, result) in [
        ("snowball", &comparison.snowball),
        ("avalanche", &comparison.avalanche),
    ] {
        if let Some(date) = result.summary().debt_free_date {
            println!("  {:<10} {}", name, date);
        }
    }
}
