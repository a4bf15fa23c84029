use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use tokio::sync::watch;

mod bluetooth;
mod config;
mod display;
mod probe;
mod switcher;

use crate::config::ConfigStore;
use crate::probe::SystemRunner;
use crate::switcher::Switcher;

/// Connects Bluetooth accessories when a configured display is attached
/// and disconnects them when it goes away.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(pretty_env_logger::env_logger::Target::Stdout)
        .init();

    // no functional flags yet, but --help should work
    Cli::parse();

    info!("Starting service");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    match run(shutdown_rx).await {
        Ok(()) => {
            info!("Exiting service");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("An error occurred: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
    let store = ConfigStore::new(ConfigStore::default_path());
    let switcher = Switcher::new(store, SystemRunner)?;
    switcher.run_loop(shutdown).await
}
