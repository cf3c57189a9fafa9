use std::{path::Path, sync::Arc};

use crate::{
    domain::EmailMessage, infrastructure::mailer::Mailer, store::approvals::read_approvals,
};

use super::StageError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationSummary {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

pub struct Notifier {
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Sends one review-result mail per row of the approval sheet.
    pub async fn run(&self, input_csv: &Path) -> Result<NotificationSummary, StageError> {
        let sheet = read_approvals(input_csv).map_err(StageError::from_input)?;
        let mut summary = NotificationSummary::default();

        for record in &sheet.records {
            let approval = match record.approval() {
                Ok(approval) => approval,
                Err(err) => {
                    tracing::warn!(target: "notifier", url = %record.url, error = %err, "Invalid approval status; skipping");
                    summary.skipped += 1;
                    continue;
                }
            };

            let message = EmailMessage::for_decision(approval, &record.email, &record.url);
            match self.mailer.send(&message).await {
                Ok(()) => {
                    tracing::info!(target: "notifier", recipient = %message.recipient, %approval, "Email sent successfully");
                    summary.sent += 1;
                }
                Err(err) => {
                    tracing::error!(target: "notifier", recipient = %message.recipient, error = %format!("{err:#}"), "Error sending email");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
