//! payoff-engine CLI
//!
//! Run debt payoff simulations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Simulate a payoff plan from a JSON file
//! payoff-engine simulate --input debts.json --strategy snowball --extra 200
//!
//! # Output as JSON
//! payoff-engine simulate --input debts.json --format json
//!
//! # Compare snowball vs avalanche
//! payoff-engine compare --input debts.json --extra 200
//!
//! # Generate a random portfolio for testing
//! payoff-engine generate --debts 10
//! ```

use chrono::{NaiveDate, Utc};
use payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use payoff_engine::core::rate::AnnualRate;
use payoff_engine::engine::simulator::{PayoffEngine, SimulationConfig, SimulationResult};
use payoff_engine::engine::summary::StrategyComparison;
use payoff_engine::scenario::generator::{generate_random_portfolio, PortfolioConfig};
use payoff_engine::strategy::ordering::Strategy;
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"payoff-engine — debt payoff planning and amortization simulation

USAGE:
    payoff-engine <COMMAND> [OPTIONS]

COMMANDS:
    simulate    Run a payoff simulation on a debt portfolio
    compare     Run both strategies and compare the outcomes
    generate    Generate a random debt portfolio (for testing)
    help        Show this message

OPTIONS (simulate):
    --input <FILE>        Path to JSON debts file
    --strategy <NAME>     snowball (default) or avalanche
    --extra <AMOUNT>      Extra monthly budget beyond minimums (default: 0)
    --start <YYYY-MM-DD>  Date of the first payment month (default: today)
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (compare):
    --input <FILE>        Path to JSON debts file
    --extra <AMOUNT>      Extra monthly budget beyond minimums (default: 0)
    --start <YYYY-MM-DD>  Date of the first payment month (default: today)

OPTIONS (generate):
    --debts <N>           Number of debts (default: 10)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    payoff-engine simulate --input debts.json --strategy avalanche --extra 250
    payoff-engine simulate --input debts.json --format json
    payoff-engine compare --input debts.json --extra 250
    payoff-engine generate --debts 5 --output test.json"#
    );
}

/// JSON schema for input debts.
#[derive(serde::Deserialize)]
struct DebtInput {
    id: String,
    #[serde(default)]
    name: Option<String>,
    balance: String,
    interest_rate: String,
    minimum_payment: String,
}

#[derive(serde::Deserialize)]
struct DebtsFile {
    debts: Vec<DebtInput>,
}

/// JSON output schema for simulation results.
#[derive(serde::Serialize)]
struct SimulationOutput {
    strategy: String,
    extra_payment: String,
    total_months: u32,
    total_paid: String,
    total_interest: String,
    complete: bool,
    payoff_order: Vec<String>,
    months: Vec<MonthOutput>,
}

#[derive(serde::Serialize)]
struct MonthOutput {
    month: u32,
    date: String,
    total_paid: String,
    interest: String,
    principal: String,
    remaining_balance: String,
    lines: Vec<LineOutput>,
}

#[derive(serde::Serialize)]
struct LineOutput {
    debt: String,
    amount: String,
    interest: String,
    principal: String,
    balance: String,
}

fn load_portfolio(path: &str) -> DebtPortfolio {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: DebtsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "debts": [
    {{ "id": "visa", "name": "Visa Card", "balance": "1200", "interest_rate": "19.99", "minimum_payment": "35" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut portfolio = DebtPortfolio::new();
    for debt in file.debts {
        let balance: Decimal = debt.balance.parse().unwrap_or_else(|e| {
            eprintln!("Invalid balance '{}': {}", debt.balance, e);
            process::exit(1);
        });
        let rate: Decimal = debt.interest_rate.parse().unwrap_or_else(|e| {
            eprintln!("Invalid interest rate '{}': {}", debt.interest_rate, e);
            process::exit(1);
        });
        let minimum_payment: Decimal = debt.minimum_payment.parse().unwrap_or_else(|e| {
            eprintln!("Invalid minimum payment '{}': {}", debt.minimum_payment, e);
            process::exit(1);
        });
        let name = debt.name.unwrap_or_else(|| debt.id.clone());
        portfolio.add(Debt::new(
            DebtId::new(&debt.id),
            name,
            balance,
            AnnualRate::new(rate),
            minimum_payment,
        ));
    }
    portfolio
}

fn parse_strategy(s: &str) -> Strategy {
    s.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    })
}

fn parse_amount(s: &str) -> Decimal {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid amount '{}': {}", s, e);
        process::exit(1);
    })
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|e| {
        eprintln!("Invalid date '{}': {} (expected YYYY-MM-DD)", s, e);
        process::exit(1);
    })
}

fn simulation_output(result: &SimulationResult) -> SimulationOutput {
    SimulationOutput {
        strategy: result.strategy().to_string(),
        extra_payment: result.extra_payment().to_string(),
        total_months: result.total_months(),
        total_paid: result.total_paid().to_string(),
        total_interest: result.total_interest_paid().to_string(),
        complete: result.is_complete(),
        payoff_order: result
            .payoff_order()
            .iter()
            .map(|id| id.to_string())
            .collect(),
        months: result
            .schedule()
            .iter()
            .map(|m| MonthOutput {
                month: m.month(),
                date: m.date().to_string(),
                total_paid: m.total_paid().to_string(),
                interest: m.interest_paid().to_string(),
                principal: m.principal_paid().to_string(),
                remaining_balance: m.remaining_balance().to_string(),
                lines: m
                    .lines()
                    .iter()
                    .map(|line| LineOutput {
                        debt: line.debt_id.to_string(),
                        amount: line.amount.to_string(),
                        interest: line.interest.to_string(),
                        principal: line.principal.to_string(),
                        balance: line.balance.to_string(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn cmd_simulate(args: &[String]) {
    let mut input_path = None;
    let mut strategy = Strategy::Snowball;
    let mut extra = Decimal::ZERO;
    let mut start_date = Utc::now().date_naive();
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--strategy" => {
                i += 1;
                strategy = parse_strategy(args.get(i).map(String::as_str).unwrap_or_else(|| {
                    eprintln!("--strategy requires 'snowball' or 'avalanche'");
                    process::exit(1);
                }));
            }
            "--extra" => {
                i += 1;
                extra = parse_amount(args.get(i).map(String::as_str).unwrap_or_else(|| {
                    eprintln!("--extra requires an amount");
                    process::exit(1);
                }));
            }
            "--start" => {
                i += 1;
                start_date = parse_date(args.get(i).map(String::as_str).unwrap_or_else(|| {
                    eprintln!("--start requires a date");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let portfolio = load_portfolio(&path);
    let config = SimulationConfig::new(strategy)
        .with_extra_payment(extra)
        .with_start_date(start_date);

    let result = PayoffEngine::simulate(&portfolio, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if format == "json" {
        let output = simulation_output(&result);
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", result);
        println!("{}", result.summary());
        if !result.is_complete() {
            eprintln!(
                "Warning: {} debt(s) still open after {} months — the plan does not converge under this budget.",
                result.open_debt_count(),
                result.total_months()
            );
        }
    }
}

fn cmd_compare(args: &[String]) {
    let mut input_path = None;
    let mut extra = Decimal::ZERO;
    let mut start_date = Utc::now().date_naive();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--extra" => {
                i += 1;
                extra = parse_amount(args.get(i).map(String::as_str).unwrap_or_else(|| {
                    eprintln!("--extra requires an amount");
                    process::exit(1);
                }));
            }
            "--start" => {
                i += 1;
                start_date = parse_date(args.get(i).map(String::as_str).unwrap_or_else(|| {
                    eprintln!("--start requires a date");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let portfolio = load_portfolio(&path);
    let comparison = StrategyComparison::run(&portfolio, extra, start_date).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!("{}", comparison);
}

fn cmd_generate(args: &[String]) {
    let mut debt_count = 10usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--debts" => {
                i += 1;
                debt_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--debts requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = PortfolioConfig {
        debt_count,
        ..Default::default()
    };
    let portfolio = generate_random_portfolio(&config);

    #[derive(serde::Serialize)]
    struct OutputDebt {
        id: String,
        name: String,
        balance: String,
        interest_rate: String,
        minimum_payment: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        debts: Vec<OutputDebt>,
    }

    let output = OutputFile {
        debts: portfolio
            .debts()
            .iter()
            .map(|d| OutputDebt {
                id: d.id().to_string(),
                name: d.name().to_string(),
                balance: d.balance().to_string(),
                interest_rate: d.annual_rate().as_percent().to_string(),
                minimum_payment: d.minimum_payment().to_string(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} debts → {}", portfolio.len(), path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simulate" => cmd_simulate(rest),
        "compare" => cmd_compare(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
