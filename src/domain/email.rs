use super::types::Approval;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Builds the review-result mail for `url`.
    pub fn for_decision(approval: Approval, recipient: &str, url: &str) -> Self {
        let (subject, body) = match approval {
            Approval::Approved => (
                "Welcome!".to_string(),
                format!("Congratulations! Your website {url} has been approved."),
            ),
            Approval::Rejected => (
                "Website Review Result".to_string(),
                format!(
                    "Thank you for submitting your website {url} for review. \
                     Unfortunately, it did not meet our criteria."
                ),
            ),
        };
        Self {
            recipient: recipient.to_string(),
            subject,
            body,
        }
    }
}
