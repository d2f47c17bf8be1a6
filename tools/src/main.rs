//! desk-runner: headless runner for the fraud-review desk.
//!
//! Usage:
//!   desk-runner --seed 12345 --ticks 240
//!   desk-runner --seed 12345 --config desk.json --json
//!   desk-runner --seed 12345 --ipc-mode
//!   desk-runner --seed 12345 --review TXN0A1B2C3D4:reject --review TXN9Z8Y7X6W5:approve

use anyhow::Result;
use riskdesk_core::{
    command::DeskCommand,
    config::DeskConfig,
    engine::DeskEngine,
    event::{DeskEvent, Notification},
    model::{RiskLevel, TransactionStatus},
    query::TransactionFilter,
    snapshot::DashboardSnapshot,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    Command { command: DeskCommand },
    Filter { filter: TransactionFilter },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    snapshot:      DashboardSnapshot,
    notifications: Vec<Notification>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", default_seed());
    let ticks = parse_arg(&args, "--ticks", 240u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_mode = args.iter().any(|a| a == "--json");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => DeskConfig::load(&w[1])?,
        None => DeskConfig::default(),
    };
    let reviews = args
        .windows(2)
        .filter(|w| w[0] == "--review")
        .map(|w| DeskCommand::parse_review(&w[1]))
        .collect::<Result<Vec<_>, _>>()?;

    if !ipc_mode && !json_mode {
        println!("RiskDesk desk-runner");
        println!("  seed:      {seed}");
        println!("  ticks:     {ticks}");
        println!("  arrivals:  p={} every {}s", config.arrival_probability, config.tick_interval_secs);
        println!();
    }

    let mut engine = DeskEngine::build(seed, config)?;
    let mut events = engine.refresh()?;
    for review in reviews {
        match engine.handle(review) {
            Ok(reviewed) => events.extend(reviewed),
            Err(e) => log::warn!("Review skipped: {e}"),
        }
    }

    if ipc_mode {
        run_ipc_loop(&mut engine, events)?;
    } else {
        events.extend(engine.run_ticks(ticks)?);
        if json_mode {
            println!("{}", engine.snapshot().to_json_pretty()?);
        } else {
            print_summary(&engine, &events);
        }
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut DeskEngine, initial: Vec<DeskEvent>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    writeln!(stdout, "{}", serde_json::to_string(&ui_state(engine, &initial))?)?;
    stdout.flush()?;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&ui_state(engine, &[]))?)?;
            }
            IpcCommand::Tick { count } => {
                let events = engine.run_ticks(count)?;
                writeln!(stdout, "{}", serde_json::to_string(&ui_state(engine, &events))?)?;
            }
            IpcCommand::Command { command } => match engine.handle(command) {
                Ok(events) => {
                    writeln!(stdout, "{}", serde_json::to_string(&ui_state(engine, &events))?)?;
                }
                Err(e) => {
                    log::warn!("Command rejected: {e}");
                    writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                }
            },
            IpcCommand::Filter { filter } => {
                let matches = filter.apply(engine.state().transactions());
                let out = serde_json::json!({ "count": matches.len(), "transactions": matches });
                writeln!(stdout, "{}", out)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn ui_state(engine: &DeskEngine, events: &[DeskEvent]) -> UiState {
    UiState {
        snapshot:      engine.snapshot(),
        notifications: events.iter().filter_map(DeskEvent::notification).collect(),
    }
}

fn print_summary(engine: &DeskEngine, events: &[DeskEvent]) {
    let state = engine.state();
    let summary = engine.summary();
    let arrivals = events
        .iter()
        .filter(|e| matches!(e, DeskEvent::TransactionArrived { .. }))
        .count();
    let notifications: Vec<Notification> =
        events.iter().filter_map(DeskEvent::notification).collect();

    println!("=== RUN SUMMARY ===");
    println!("  run_id:         {}", engine.run_id);
    println!("  final tick:     {}", engine.clock.current_tick);
    println!("  transactions:   {}", summary.total_transactions);
    println!("  arrivals:       {arrivals}");
    println!(
        "  review queue:   {} ({:.1}% of total)",
        summary.flagged_for_review, summary.flagged_share_pct
    );
    println!("  critical risk:  {}", summary.critical_risk);
    println!("  active alerts:  {}", summary.active_alerts);
    println!("  notifications:  {}", notifications.len());

    println!();
    println!("=== BY TIER ===");
    for level in RiskLevel::ALL {
        let count = state.transactions().iter().filter(|t| t.risk_level == level).count();
        println!("  {:<14}{count}", level.as_str());
    }

    println!();
    println!("=== BY STATUS ===");
    for status in TransactionStatus::ALL {
        let count = state.transactions().iter().filter(|t| t.status == status).count();
        println!("  {:<14}{count}", status.as_str());
    }

    if let Some(metrics) = state.metrics() {
        println!();
        println!("=== METRICS (static snapshot) ===");
        println!("  total txns:     {}", metrics.total_transactions);
        println!("  false pos rate: {:.1}%", metrics.false_positive_rate * 100.0);
        println!("  blocked amount: ${:.1}M", metrics.blocked_amount / 1_000_000.0);
        println!("  review backlog: {}", metrics.review_backlog);
        println!("  response time:  {}m", metrics.response_time);
    }

    if let Some(txn) = state.selected() {
        println!();
        println!("=== SELECTED ===");
        println!(
            "  {} | {}{:.2} {} | score {:.3} ({}) | {}",
            txn.id,
            txn.currency.symbol(),
            txn.amount,
            txn.currency.code(),
            txn.risk_score,
            txn.risk_level.as_str(),
            txn.status.as_str()
        );
        for e in &txn.explanations {
            println!("    - {} ({:.3}): {}", e.feature, e.impact, e.description);
        }
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn default_seed() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
