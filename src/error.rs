use thiserror::Error;

use crate::campaign::RunSummary;
use crate::config::ConfigError;
use crate::mailer::MailError;
use crate::source::SourceError;
use crate::tracker::StoreError;

pub type CampaignResult<T> = Result<T, CampaignError>;

/// Failures that abort a campaign invocation.
///
/// Per-contact send failures are not represented here: the driver logs and
/// counts them, then moves on.
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Mail(#[from] MailError),
    #[error("live sending requires an SMTP mailer")]
    MailerRequired,
    #[error("SMTP relay rejected the connection test")]
    TransportUnavailable,
    /// Tracking failed after a delivery. `summary` covers the contacts
    /// handled so far, including the one whose record failed.
    #[error(
        "batch stopped after {sent} sent; resume from index {next}: {source}",
        sent = .summary.sent_count,
        next = .summary.next_start_index
    )]
    Interrupted {
        summary: RunSummary,
        #[source]
        source: StoreError,
    },
}
