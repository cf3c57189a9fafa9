pub mod email;
pub mod types;

pub use email::EmailMessage;
pub use types::{
    Approval, ApprovalRecord, ScoredRecord, UnknownApproval, WebsiteRecord, WebsiteTarget,
    APPROVAL_THRESHOLD,
};
