use std::{path::Path, sync::Arc};

use anyhow::Result;
use reqwest::Client;
use site_screener::{
    ai::GeminiClient,
    app, config,
    store::paths,
    tasks::{AnalysisSummary, Analyzer, StageError},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    app::bootstrap("analyse.log")?;
    let http = app::http_client()?;

    app::report("analyse", analyse(http).await);
    Ok(())
}

async fn analyse(http: Client) -> Result<AnalysisSummary, StageError> {
    let gemini = GeminiClient::new(http, &config::load_gemini_config())?;
    Analyzer::new(Arc::new(gemini))
        .run(
            Path::new(paths::WEBSITE_DATA_CSV),
            Path::new(paths::KEYWORDS_FILE),
            Path::new(paths::WEBSITE_APPROVAL_CSV),
        )
        .await
}
