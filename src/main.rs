use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use eclat_miner::engine::mine;
use eclat_miner::ingest::{build_transactions, read_purchase_log};
use eclat_miner::report::Reporter;
use eclat_miner::settings::Settings;

fn run() -> eclat_miner::Result<()> {
    let settings = Settings::load()?;
    info!(input = %settings.input.display(), constraints = ?settings.constraints, "starting");
    let records = read_purchase_log(&settings.input, &settings.log_options())?;
    let transactions = build_transactions(records);
    let mining = mine(&transactions, &settings.constraints)?;
    Reporter::new(&settings.results)?.write_all(&transactions, &mining)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "mining failed");
            ExitCode::FAILURE
        }
    }
}
