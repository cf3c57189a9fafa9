use std::path::Path;

use crate::domain::{ApprovalRecord, ScoredRecord};

use super::StoreError;

const URL: &str = "URL";
const EMAIL: &str = "Email";
const APPROVAL: &str = "Approval";

/// Approval sheet as read from disk: keyword columns in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalSheet {
    pub keywords: Vec<String>,
    pub records: Vec<ApprovalRecord>,
}

/// Overwrites `path` with `URL,Email,Approval,<keywords...>`.
pub fn write_approvals(
    path: &Path,
    keywords: &[String],
    records: &[ScoredRecord],
) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| StoreError::csv(path, err))?;

    let header = [URL, EMAIL, APPROVAL]
        .into_iter()
        .chain(keywords.iter().map(String::as_str));
    writer
        .write_record(header)
        .map_err(|err| StoreError::csv(path, err))?;

    for record in records {
        debug_assert_eq!(record.scores.len(), keywords.len());
        let mut row = vec![
            record.url.clone(),
            record.email.clone(),
            record.approval.to_string(),
        ];
        row.extend(record.scores.iter().map(u8::to_string));
        writer
            .write_record(&row)
            .map_err(|err| StoreError::csv(path, err))?;
    }

    writer.flush().map_err(|err| StoreError::io(path, err))?;
    Ok(())
}

/// Reads an approval sheet. Columns other than URL, Email and Approval are
/// treated as keyword scores; cells that are not an integer in 0..=100 read
/// as `None`. Short rows read missing cells as empty, and rows the parser
/// rejects are logged and dropped.
pub fn read_approvals(path: &Path) -> Result<ApprovalSheet, StoreError> {
    let mut reader = super::open_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|err| StoreError::csv(path, err))?
        .clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StoreError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
    };
    let url_idx = column(URL)?;
    let email_idx = column(EMAIL)?;
    let approval_idx = column(APPROVAL)?;

    let keyword_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| ![url_idx, email_idx, approval_idx].contains(idx))
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(target: "store", path = %path.display(), error = %err, "skipping unreadable row");
                continue;
            }
        };
        let cell = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        records.push(ApprovalRecord {
            url: cell(url_idx),
            email: cell(email_idx),
            approval: cell(approval_idx),
            scores: keyword_columns
                .iter()
                .map(|(idx, _)| {
                    row.get(*idx)
                        .and_then(|v| v.trim().parse::<u8>().ok())
                        .filter(|score| *score <= 100)
                })
                .collect(),
        });
    }

    Ok(ApprovalSheet {
        keywords: keyword_columns.into_iter().map(|(_, name)| name).collect(),
        records,
    })
}
