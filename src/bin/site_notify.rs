use std::{path::Path, sync::Arc};

use anyhow::Result;
use site_screener::{
    app, config,
    infrastructure::mailer::SmtpMailer,
    store::paths,
    tasks::{NotificationSummary, Notifier, StageError},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    app::bootstrap("notify.log")?;

    app::report("notify", notify().await);
    Ok(())
}

async fn notify() -> Result<NotificationSummary, StageError> {
    let smtp = config::load_smtp_config()?;
    let mailer = SmtpMailer::new(&smtp)?;
    Notifier::new(Arc::new(mailer))
        .run(Path::new(paths::WEBSITE_APPROVAL_CSV))
        .await
}
