use anyhow::Result;
use reqwest::Client;

use crate::{
    config,
    infrastructure::{directories, logging},
    tasks::StageError,
};

/// Loads `.env` and starts tracing for one stage binary. Stage settings are
/// read afterwards so their errors reach the log.
pub fn bootstrap(log_file: &str) -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config();
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths, log_file)?;
    Ok(())
}

pub fn http_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(format!("site-screener/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Logs the outcome of a stage and hands back the summary if it finished.
/// An aborted stage, configuration errors included, does not fail the process.
pub fn report<T: std::fmt::Debug>(
    stage: &'static str,
    outcome: Result<T, StageError>,
) -> Option<T> {
    match outcome {
        Ok(summary) => {
            tracing::info!(target: "app", stage, ?summary, "stage finished");
            Some(summary)
        }
        Err(err) => {
            tracing::error!(target: "app", stage, error = %err, "stage aborted");
            None
        }
    }
}
