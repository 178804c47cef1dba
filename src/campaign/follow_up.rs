use serde::Serialize;

use super::{CampaignDriver, mode_prefix};
use crate::error::CampaignResult;
use crate::mailer::OutgoingEmail;
use crate::models::FollowUpStage;

/// Outcome of one follow-up batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FollowUpSummary {
    /// Contacts the store reported as due.
    pub due_count: usize,
    /// Due contacts still owed an earlier stage.
    pub skipped_count: usize,
    pub sent_count: usize,
    pub failed_count: usize,
}

impl CampaignDriver<'_> {
    /// Send `stage` to up to `max_sends` contacts whose follow-up is due.
    ///
    /// Stages go out in order: a contact still waiting on an earlier stage is
    /// skipped rather than jumped ahead.
    pub async fn run_follow_ups(
        &self,
        stage: FollowUpStage,
        max_sends: usize,
        dry_run: bool,
    ) -> CampaignResult<FollowUpSummary> {
        self.ensure_transport(dry_run).await?;

        let due = self.store.scan_due_for_follow_up(stage)?;
        let mut summary = FollowUpSummary {
            due_count: due.len(),
            ..Default::default()
        };

        let (ready, out_of_order): (Vec<_>, Vec<_>) = due
            .into_iter()
            .partition(|record| record.pending_follow_up() == Some(stage));
        summary.skipped_count = out_of_order.len();

        let batch: Vec<_> = ready.into_iter().take(max_sends).collect();
        let prefix = mode_prefix(dry_run);

        log::info!(
            "{}sending {} to {} of {} due contacts",
            prefix,
            stage,
            batch.len(),
            summary.due_count
        );

        for (position, record) in batch.iter().enumerate() {
            let rendered = self.renderer.render_follow_up(
                stage,
                record.language,
                &record.greeting_name(),
                &record.company_name,
                &record.job_title,
                &self.settings.booking_link,
            );
            let to_name = if record.full_name.is_empty() {
                record.greeting_name()
            } else {
                record.full_name.clone()
            };
            let email = OutgoingEmail::new(&record.email, to_name, rendered);

            if self.deliver(&email, dry_run).await {
                summary.sent_count += 1;
                if !dry_run
                    && let Err(err) = self.store.log_follow_up(&record.email, stage)
                {
                    log::error!(
                        "{} sent to {} but not recorded; stopping: {}",
                        stage,
                        record.email,
                        err
                    );
                    return Err(err.into());
                }
            } else {
                summary.failed_count += 1;
            }

            if position + 1 < batch.len() {
                self.pause(dry_run).await;
            }
        }

        log::info!(
            "{}{} completed: sent {}, failed {}, skipped {}",
            prefix,
            stage,
            summary.sent_count,
            summary.failed_count,
            summary.skipped_count
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveDateTime};

    use crate::campaign::{CampaignDriver, test_settings};
    use crate::models::{Contact, FollowUpStage, Language};
    use crate::templates::TemplateRenderer;
    use crate::tracker::{Clock, ContactStore};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn dry_run_reports_due_contacts_without_logging() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path().join("t.csv"));

        let seed = ContactStore::with_clock(&settings.tracking_file, Arc::new(|| at(1))).unwrap();
        let contact = Contact {
            first_name: "Rania".into(),
            email: "rania@example.com".into(),
            ..Default::default()
        };
        seed.upsert_initial_send(&contact, "Hi", Language::French, "B1")
            .unwrap();

        let later: Clock = Arc::new(|| at(10));
        let store = ContactStore::with_clock(&settings.tracking_file, later).unwrap();
        let renderer = TemplateRenderer::new(settings.sender.clone());
        let driver = CampaignDriver::new(&settings, &store, &renderer, None);

        let summary = driver
            .run_follow_ups(FollowUpStage::First, 10, true)
            .await
            .unwrap();

        assert_eq!(summary.due_count, 1);
        assert_eq!(summary.sent_count, 1);
        let record = store.find_by_email("rania@example.com").unwrap().unwrap();
        assert!(!record.follow_up_1_sent);
    }
}
