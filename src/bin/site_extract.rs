use std::{path::Path, sync::Arc};

use anyhow::Result;
use reqwest::Client;
use site_screener::{
    app, config,
    store::paths,
    tasks::{default_targets, ExtractionSummary, Extractor, StageError},
    web_content::WebContentFetcher,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    app::bootstrap("extract.log")?;
    let http = app::http_client()?;

    app::report("extract", extract(http).await);
    Ok(())
}

async fn extract(http: Client) -> Result<ExtractionSummary, StageError> {
    let web = config::load_web_config()?;
    let fetcher = WebContentFetcher::new(http, web.clone());
    Extractor::new(Arc::new(fetcher), &web)
        .run(&default_targets(), Path::new(paths::WEBSITE_DATA_CSV))
        .await
}
