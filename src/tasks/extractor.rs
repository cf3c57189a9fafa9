use std::{path::Path, sync::Arc, time::Duration};

use tokio::time::sleep;

use crate::{
    config::WebContentConfig,
    domain::{WebsiteRecord, WebsiteTarget},
    store::website_data::write_website_data,
    web_content::{extract_page_text, parse_target_url, PageSource},
};

use super::StageError;

/// Sites reviewed by a default run.
pub fn default_targets() -> Vec<WebsiteTarget> {
    vec![
        WebsiteTarget::new("https://www.digitalsilk.com/", "reviews+digitalsilk@example.com"),
        WebsiteTarget::new("https://www.baunfire.com/", "reviews+baunfire@example.com"),
        WebsiteTarget::new("https://fourbynorth.com/", "reviews+fourbynorth@example.com"),
        WebsiteTarget::new("https://www.geeksforgeeks.org/", "reviews+geeksforgeeks@example.com"),
    ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub extracted: usize,
    pub invalid: usize,
    pub failed: usize,
    pub empty: usize,
}

pub struct Extractor {
    source: Arc<dyn PageSource>,
    request_delay: Duration,
}

impl Extractor {
    pub fn new(source: Arc<dyn PageSource>, config: &WebContentConfig) -> Self {
        Self {
            source,
            request_delay: config.request_delay,
        }
    }

    /// Visits each target in order and overwrites `output` with whatever
    /// could be extracted. Per-site failures are logged and skipped.
    pub async fn run(
        &self,
        targets: &[WebsiteTarget],
        output: &Path,
    ) -> Result<ExtractionSummary, StageError> {
        let mut summary = ExtractionSummary::default();
        let mut records = Vec::with_capacity(targets.len());

        for target in targets {
            let Some(url) = parse_target_url(&target.url) else {
                tracing::warn!(target: "extractor", url = %target.url, "Skipping invalid URL");
                summary.invalid += 1;
                continue;
            };

            tracing::info!(target: "extractor", url = %url, "Extracting data");
            match extract_page_text(self.source.as_ref(), &url).await {
                Ok(text) if text.is_empty() => {
                    tracing::warn!(target: "extractor", url = %url, "no text left after cleaning");
                    summary.empty += 1;
                }
                Ok(text) => {
                    tracing::debug!(target: "extractor", url = %url, chars = text.chars().count(), "extracted");
                    records.push(WebsiteRecord {
                        url: target.url.clone(),
                        text,
                        email: target.recipient_email.clone(),
                    });
                    summary.extracted += 1;
                }
                Err(err) => {
                    tracing::warn!(target: "extractor", url = %url, error = %format!("{err:#}"), "Error fetching page");
                    summary.failed += 1;
                }
            }

            if !self.request_delay.is_zero() {
                sleep(self.request_delay).await;
            }
        }

        write_website_data(output, &records)?;
        tracing::info!(target: "extractor", path = %output.display(), rows = records.len(), "Data saved");
        Ok(summary)
    }
}
