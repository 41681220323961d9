//! Ward demo - replays the classic memory and concurrency bugs against
//! the checked API and prints what happened instead.

use clap::{Parser, ValueEnum};
use std::process;
use tracing::Level;
use ward::scenarios::{Scenario, ScenarioParams, DEFAULT_SCALE_COUNT};
use ward::sync::{CounterConfig, CounterStrategy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// One atomic fetch-add per adjustment
    Atomic,
    /// Lock, update, unlock
    Mutex,
}

impl From<StrategyArg> for CounterStrategy {
    fn from(val: StrategyArg) -> Self {
        match val {
            StrategyArg::Atomic => CounterStrategy::Atomic,
            StrategyArg::Mutex => CounterStrategy::Mutex,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ward-demo")]
#[command(about = "Replay classic memory and concurrency bugs against checked APIs", long_about = None)]
#[command(version)]
struct Args {
    /// Scenario to run (all scenarios when omitted)
    #[arg(value_name = "SCENARIO")]
    scenario: Option<Scenario>,

    /// Adjustments per counter task
    #[arg(long, default_value_t = CounterConfig::DEFAULT_ITERATIONS)]
    iterations: u64,

    /// Incrementer/decrementer task pairs
    #[arg(long, default_value_t = CounterConfig::DEFAULT_PAIRS)]
    pairs: usize,

    /// Counter implementation
    #[arg(long, value_enum, default_value = "atomic")]
    strategy: StrategyArg,

    /// Element count for the scaled allocation
    #[arg(long, default_value_t = DEFAULT_SCALE_COUNT)]
    count: i32,

    /// Exit with status 1 if any contract violation was caught
    #[arg(long)]
    strict: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let params = ScenarioParams {
        scale_count: args.count,
        counter: CounterConfig::new(args.iterations)
            .with_pairs(args.pairs)
            .with_strategy(args.strategy.into()),
    };

    let scenarios = match args.scenario {
        Some(sc) => vec![sc],
        None => Scenario::ALL.to_vec(),
    };

    let mut violations = 0;
    for sc in scenarios {
        let outcome = sc.run(&params);
        if outcome.is_violation() {
            violations += 1;
        }
        println!("{outcome}");
    }

    if args.strict && violations > 0 {
        eprintln!("{violations} contract violation(s) caught");
        process::exit(1);
    }
}
