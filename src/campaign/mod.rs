//! Batch sending of initial and follow-up outreach.
//!
//! A run processes a bounded slice of contacts strictly in order. Each
//! contact is rendered, delivered (or simulated in dry runs), and recorded
//! in the tracking store before the next one starts; a fixed delay separates
//! consecutive contacts but never follows the last one. A failed delivery is
//! logged and counted and the batch continues.

mod follow_up;
mod preview;

pub use follow_up::FollowUpSummary;
pub use preview::EmailPreview;

use serde::Serialize;

use crate::config::Settings;
use crate::error::{CampaignError, CampaignResult};
use crate::language;
use crate::mailer::{Mailer, OutgoingEmail};
use crate::models::Contact;
use crate::templates::TemplateRenderer;
use crate::tracker::ContactStore;

/// Outcome of one initial-send batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub sent_count: usize,
    pub failed_count: usize,
    /// Offset the next invocation should start from.
    pub next_start_index: usize,
}

pub struct CampaignDriver<'a> {
    settings: &'a Settings,
    store: &'a ContactStore,
    renderer: &'a TemplateRenderer,
    mailer: Option<&'a dyn Mailer>,
}

impl<'a> CampaignDriver<'a> {
    pub fn new(
        settings: &'a Settings,
        store: &'a ContactStore,
        renderer: &'a TemplateRenderer,
        mailer: Option<&'a dyn Mailer>,
    ) -> Self {
        Self {
            settings,
            store,
            renderer,
            mailer,
        }
    }

    /// Send initial emails to `contacts[start_index..start_index + max_sends]`.
    ///
    /// The slice is clamped to the list; a start past the end sends nothing
    /// and hands the same offset back.
    pub async fn run(
        &self,
        contacts: &[Contact],
        start_index: usize,
        max_sends: usize,
        dry_run: bool,
    ) -> CampaignResult<RunSummary> {
        self.ensure_transport(dry_run).await?;

        if start_index >= contacts.len() {
            log::warn!(
                "start index {} is beyond the number of contacts ({}); nothing to send",
                start_index,
                contacts.len()
            );
            return Ok(RunSummary {
                sent_count: 0,
                failed_count: 0,
                next_start_index: start_index,
            });
        }

        let end_index = start_index.saturating_add(max_sends).min(contacts.len());
        let batch = &contacts[start_index..end_index];
        let prefix = mode_prefix(dry_run);

        log::info!(
            "{}starting campaign: {} contacts (index {} to {})",
            prefix,
            batch.len(),
            start_index,
            end_index.saturating_sub(1)
        );

        let mut sent_count = 0;
        let mut failed_count = 0;

        for (position, contact) in batch.iter().enumerate() {
            let language = language::resolve(&contact.location);
            let rendered = self.renderer.render(
                language,
                &contact.greeting_name(),
                &contact.company_name,
                &contact.job_title,
                &self.settings.booking_link,
            );
            let email = OutgoingEmail::new(&contact.email, contact.display_name(), rendered);

            if self.deliver(&email, dry_run).await {
                sent_count += 1;
                if !dry_run
                    && let Err(source) = self.store.upsert_initial_send(
                        contact,
                        &email.subject,
                        language,
                        &self.settings.campaign_batch,
                    )
                {
                    let summary = RunSummary {
                        sent_count,
                        failed_count,
                        next_start_index: start_index + position + 1,
                    };
                    log::error!(
                        "failed to record send to {}: {}; next batch should start from index {}",
                        contact.email,
                        source,
                        summary.next_start_index
                    );
                    return Err(CampaignError::Interrupted { summary, source });
                }
            } else {
                failed_count += 1;
            }

            if position + 1 < batch.len() {
                self.pause(dry_run).await;
            }
        }

        log::info!(
            "{}campaign completed: sent {}, failed {}",
            prefix,
            sent_count,
            failed_count
        );
        log::info!("next batch should start from index {}", end_index);

        Ok(RunSummary {
            sent_count,
            failed_count,
            next_start_index: end_index,
        })
    }

    /// Live runs need a transport that accepts a session; checked before
    /// anything is sent.
    async fn ensure_transport(&self, dry_run: bool) -> CampaignResult<()> {
        if dry_run {
            return Ok(());
        }

        let Some(mailer) = self.mailer else {
            return Err(CampaignError::MailerRequired);
        };

        if !mailer.verify().await? {
            log::error!("mail relay rejected the connection test; nothing sent");
            return Err(CampaignError::TransportUnavailable);
        }
        Ok(())
    }

    /// Submit one message, or simulate it. Returns whether it counts as sent.
    async fn deliver(&self, email: &OutgoingEmail, dry_run: bool) -> bool {
        if dry_run {
            log::info!(
                "[DRY RUN] would send email to {} ({})",
                email.to_name,
                email.to
            );
            log::info!("[DRY RUN] subject: {}", email.subject);
            return true;
        }

        let Some(mailer) = self.mailer else {
            return false;
        };

        match mailer.send(email).await {
            Ok(()) => {
                log::info!("email sent to {} ({})", email.to_name, email.to);
                true
            }
            Err(err) => {
                log::error!(
                    "failed to send email to {} ({}): {}",
                    email.to_name,
                    email.to,
                    err
                );
                false
            }
        }
    }

    async fn pause(&self, dry_run: bool) {
        let delay = self.settings.delay_for(dry_run);
        if delay.is_zero() {
            return;
        }
        log::info!("waiting {} seconds before next email", delay.as_secs());
        tokio::time::sleep(delay).await;
    }
}

fn mode_prefix(dry_run: bool) -> &'static str {
    if dry_run { "[DRY RUN] " } else { "" }
}

#[cfg(test)]
pub(crate) fn test_settings(tracking_file: std::path::PathBuf) -> Settings {
    use crate::templates::SenderProfile;
    use std::time::Duration;

    Settings {
        sender: SenderProfile {
            name: "Hamza Mhirsi".into(),
            title: "CEO & Founder".into(),
            company: "Wraki".into(),
            website: "https://wraki.ma".into(),
        },
        booking_link: "https://cal.example/book".into(),
        send_delay: Duration::ZERO,
        dry_run_delay: Duration::ZERO,
        max_emails_per_day: 50,
        tracking_file,
        campaign_batch: "BATCH_TEST".into(),
        template_version: "1.0".into(),
    }
}
