use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use insurance_ledger::{Config, ContractError, EntityKind, Peer, SqliteLedger, TxFunction};

#[derive(Parser)]
#[command(name = "insurance-ledger", version, about = "Vehicle insurance ledger")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ledger database, overrides config and INSURANCE_LEDGER_DB
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed the bootstrap customer, policies and claim
    Init,
    /// Submit a transaction and commit its writes
    Submit {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Evaluate a query; nothing is committed
    Evaluate {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Committed writes of one key, oldest first
    History { key: String },
    /// List contract functions
    Functions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.ledger.path = db;
    }

    init_tracing(&config.log.level);

    match cli.cmd {
        Command::Init => run_submit(&config, "InitLedger", &[]),
        Command::Submit { function, args } => run_submit(&config, &function, &args),
        Command::Evaluate { function, args } => run_evaluate(&config, &function, &args),
        Command::History { key } => run_history(&config, &key),
        Command::Functions => {
            list_functions();
            Ok(())
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_peer(config: &Config) -> Result<Peer<SqliteLedger>> {
    let ledger = SqliteLedger::open(&config.ledger.path)
        .with_context(|| format!("Failed to open ledger {}", config.ledger.path.display()))?;
    Ok(Peer::new(ledger))
}

fn contract_error(function: &str, e: ContractError) -> anyhow::Error {
    anyhow!("{} failed [{}]: {}", function, e.code(), e)
}

fn run_submit(config: &Config, function: &str, args: &[String]) -> Result<()> {
    let mut peer = open_peer(config)?;

    let receipt = peer
        .submit(function, args)
        .map_err(|e| contract_error(function, e))?;

    println!("✓ {} committed", function);
    println!("  tx:             {}", receipt.tx_id);
    println!("  writes:         {}", receipt.writes);
    println!("  writes digest:  {}", receipt.write_set_digest);
    println!("  payload digest: {}", receipt.payload_digest);
    print_payload(&receipt.payload)?;

    Ok(())
}

fn run_evaluate(config: &Config, function: &str, args: &[String]) -> Result<()> {
    let peer = open_peer(config)?;

    let payload = peer
        .evaluate(function, args)
        .map_err(|e| contract_error(function, e))?;
    print_payload(&payload)?;

    Ok(())
}

fn run_history(config: &Config, key: &str) -> Result<()> {
    let peer = open_peer(config)?;
    let history = peer.ledger().get_history_for_key(key)?;

    if history.is_empty() {
        println!("No history for {}", key);
        return Ok(());
    }

    match EntityKind::split_key(key) {
        Some((kind, id)) => println!("📜 {} {} ({} writes)", kind, id, history.len()),
        None => println!("📜 {} ({} writes)", key, history.len()),
    }

    let entries: Vec<Value> = history
        .iter()
        .map(|entry| {
            json!({
                "txId": entry.tx_id,
                "committedAt": entry.committed_at.to_rfc3339(),
                "value": payload_value(&entry.value),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn list_functions() {
    println!("📜 Contract functions");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for f in TxFunction::ALL {
        println!(
            "{:<16} {:<9} {}",
            f.name(),
            f.intent().as_str(),
            f.params().join(", ")
        );
    }
}

/// JSON payloads print pretty; anything else prints as text
fn payload_value(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn print_payload(payload: &[u8]) -> Result<()> {
    if payload.is_empty() {
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&payload_value(payload))?);
    Ok(())
}
