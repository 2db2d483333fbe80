//! MargaNav - incremental grid navigation agent.
//!
//! Reads the handshake and per-turn observation batches on stdin, writes
//! one action per turn on stdout. Logging goes to stderr so the protocol
//! stream stays clean.

use std::io::{BufReader, Write};
use std::path::Path;

use tracing::info;

use marga_nav::config::{MargaConfig, StrategyKind};
use marga_nav::error::Result;
use marga_nav::{protocol, AgentController};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marga_nav=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let mut config = if args.len() > 1 && !args[1].starts_with("--") {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        MargaConfig::load(config_path)?
    } else if Path::new("marga.toml").exists() {
        info!("Loading configuration from marga.toml");
        MargaConfig::load(Path::new("marga.toml"))?
    } else {
        info!("Using default configuration");
        MargaConfig::default()
    };

    // Check for --strategy override
    if let Some(name) = args
        .iter()
        .position(|a| a == "--strategy")
        .and_then(|i| args.get(i + 1))
    {
        config.planner.strategy = StrategyKind::parse_name(name)?;
    }

    info!("MargaNav v{}", env!("CARGO_PKG_VERSION"));
    info!("Strategy: {:?}", config.planner.strategy);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut reader = BufReader::new(stdin.lock());
    let mut writer = stdout.lock();

    let handshake = protocol::read_handshake(&mut reader)?;
    info!(
        "Handshake: variant {}, goal ({}, {})",
        handshake.perception_variant, handshake.goal.x, handshake.goal.y
    );

    let mut agent = AgentController::new(handshake.goal, &config.planner);
    protocol::run(&mut reader, &mut writer, &mut agent)?;
    writer.flush()?;

    info!("MargaNav finished");
    Ok(())
}
