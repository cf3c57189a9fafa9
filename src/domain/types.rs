use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Minimum keyword score that counts as a pass.
pub const APPROVAL_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteTarget {
    pub url: String,
    pub recipient_email: String,
}

impl WebsiteTarget {
    pub fn new(url: impl Into<String>, recipient_email: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            recipient_email: recipient_email.into(),
        }
    }
}

/// One row of `website_data.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "email")]
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    Approved,
    Rejected,
}

impl Approval {
    /// Decides approval from per-keyword scores.
    ///
    /// The rule is `all(score >= 50) || any(score >= 50)`, which reduces to
    /// "at least one keyword passes". Whether strict-AND was intended is still
    /// open; see DESIGN.md.
    pub fn from_scores(scores: &[u8]) -> Self {
        let passes = |score: &u8| *score >= APPROVAL_THRESHOLD;
        if scores.iter().all(passes) || scores.iter().any(passes) {
            Approval::Approved
        } else {
            Approval::Rejected
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Approval::Approved => "Approved",
            Approval::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised approval status {0:?}")]
pub struct UnknownApproval(pub String);

impl FromStr for Approval {
    type Err = UnknownApproval;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Approved" => Ok(Approval::Approved),
            "Rejected" => Ok(Approval::Rejected),
            other => Err(UnknownApproval(other.to_string())),
        }
    }
}

/// Analyzer output row. `scores` follows the keyword order of the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredRecord {
    pub url: String,
    pub email: String,
    pub approval: Approval,
    pub scores: Vec<u8>,
}

/// A row of `website_approval.csv` as read back by the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRecord {
    pub url: String,
    pub email: String,
    pub approval: String,
    pub scores: Vec<Option<u8>>,
}

impl ApprovalRecord {
    pub fn approval(&self) -> Result<Approval, UnknownApproval> {
        self.approval.parse()
    }
}
