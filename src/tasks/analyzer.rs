use std::{path::Path, sync::Arc};

use crate::{
    ai::RelevanceScorer,
    domain::{Approval, ScoredRecord},
    store::{approvals::write_approvals, keywords::load_keywords, website_data::read_website_data},
};

use super::StageError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub rows: usize,
    pub approved: usize,
    pub rejected: usize,
    pub fallback_scores: usize,
}

pub struct Analyzer {
    scorer: Arc<dyn RelevanceScorer>,
}

impl Analyzer {
    pub fn new(scorer: Arc<dyn RelevanceScorer>) -> Self {
        Self { scorer }
    }

    /// Scores every row against every keyword and writes the approval sheet.
    ///
    /// A missing input or keyword file, or an empty keyword list, aborts
    /// before any model call. A failed or unusable model answer scores 0.
    pub async fn run(
        &self,
        input_csv: &Path,
        keywords_file: &Path,
        output_csv: &Path,
    ) -> Result<AnalysisSummary, StageError> {
        let keywords = load_keywords(keywords_file)
            .await
            .map_err(StageError::from_input)?;
        if keywords.is_empty() {
            return Err(StageError::NoKeywords(keywords_file.to_path_buf()));
        }

        let rows = read_website_data(input_csv).map_err(StageError::from_input)?;
        tracing::info!(
            target: "analyzer",
            rows = rows.len(),
            keywords = keywords.len(),
            "starting analysis"
        );

        let mut summary = AnalysisSummary::default();
        let mut results = Vec::with_capacity(rows.len());

        for row in rows {
            let mut scores = Vec::with_capacity(keywords.len());
            for keyword in &keywords {
                let score = match self.scorer.score(&row.text, keyword).await {
                    Ok(score) => score,
                    Err(err) => {
                        tracing::warn!(
                            target: "analyzer",
                            url = %row.url,
                            keyword = %keyword,
                            error = %err,
                            "scoring failed; using 0"
                        );
                        summary.fallback_scores += 1;
                        0
                    }
                };
                tracing::info!(target: "analyzer", url = %row.url, keyword = %keyword, score, "scored");
                scores.push(score);
            }

            let approval = Approval::from_scores(&scores);
            match approval {
                Approval::Approved => summary.approved += 1,
                Approval::Rejected => summary.rejected += 1,
            }
            summary.rows += 1;

            results.push(ScoredRecord {
                url: row.url,
                email: row.email,
                approval,
                scores,
            });
        }

        write_approvals(output_csv, &keywords, &results)?;
        tracing::info!(target: "analyzer", path = %output_csv.display(), "Analysis results saved");
        Ok(summary)
    }
}
