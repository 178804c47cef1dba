//! Contact tracking store.
//!
//! The store is a single CSV table keyed by email address. It is small
//! (hundreds to low thousands of rows), so every operation reads the whole
//! table and every mutation rewrites it:
//!
//! - Reads are linear scans over the parsed rows.
//! - Rewrites go to a temporary file in the table's directory which is then
//!   renamed over the table, so readers only ever see a complete table.
//! - A missing table is created with a header-only body when the store opens.
//!
//! Timestamps come from the store's [`Clock`], which defaults to local wall
//! time and is replaceable for tests.

pub mod error;
pub mod record;
pub mod update;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Days, Local, NaiveDateTime};
use tempfile::NamedTempFile;

use crate::models::{Contact, FollowUpStage, Language, LeadStatus};
pub use error::{StoreError, StoreResult};
pub use record::{COLUMNS, ContactRecord, INITIAL_FOLLOW_UP_DAYS, contact_id};
pub use update::ContactUpdate;

/// Source of "now" for every mutation.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Lead score recorded when a contact replies.
pub const REPLY_SCORE: u32 = 80;
/// Lead score recorded when a meeting is scheduled.
pub const MEETING_SCORE: u32 = 100;

pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

pub struct ContactStore {
    path: PathBuf,
    clock: Clock,
    template_version: String,
}

impl ContactStore {
    /// Open the table at `path`, creating it with a header row if absent.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::with_clock(path, local_clock())
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Clock) -> StoreResult<Self> {
        let store = Self {
            path: path.into(),
            clock,
            template_version: "1.0".to_string(),
        };
        store.ensure_exists()?;
        Ok(store)
    }

    /// Template version stamped on newly created records.
    pub fn template_version(mut self, version: impl Into<String>) -> Self {
        self.template_version = version.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    fn ensure_exists(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        self.write_all(&[])?;
        log::info!("created tracking table at {}", self.path.display());
        Ok(())
    }

    /// Read every record in file order.
    pub fn load_all(&self) -> StoreResult<Vec<ContactRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let mut reader = csv::Reader::from_reader(file);
        reader
            .deserialize::<ContactRecord>()
            .map(|row| row.map_err(|e| StoreError::csv(&self.path, e)))
            .collect()
    }

    /// Replace the whole table with `records`.
    fn write_all(&self, records: &[ContactRecord]) -> StoreResult<()> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut staging =
            NamedTempFile::new_in(&directory).map_err(|e| StoreError::io(&directory, e))?;
        let staging_path = staging.path().to_path_buf();

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(staging.as_file_mut());
            writer
                .write_record(COLUMNS)
                .map_err(|e| StoreError::csv(&self.path, e))?;
            for record in records {
                writer
                    .serialize(record)
                    .map_err(|e| StoreError::csv(&self.path, e))?;
            }
            writer
                .flush()
                .map_err(|e| StoreError::io(&staging_path, e))?;
        }

        staging
            .as_file()
            .sync_all()
            .map_err(|e| StoreError::io(&staging_path, e))?;

        // staging files are created 0600; keep the table's own mode
        if let Ok(metadata) = std::fs::metadata(&self.path)
            && metadata.is_file()
        {
            staging
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| StoreError::io(&staging_path, e))?;
        }

        staging
            .persist(&self.path)
            .map_err(|e| StoreError::Persist {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(())
    }

    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<ContactRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|record| record.matches_email(email)))
    }

    /// Record an initial email sent to `contact`.
    ///
    /// Unknown addresses get a fresh record scheduled for a first follow-up
    /// three days out. Known addresses have their initial-send columns
    /// refreshed without touching follow-up progress.
    pub fn upsert_initial_send(
        &self,
        contact: &Contact,
        subject: &str,
        language: Language,
        campaign_batch: &str,
    ) -> StoreResult<()> {
        let now = self.now();
        let mut records = self.load_all()?;

        match records
            .iter_mut()
            .find(|record| record.matches_email(&contact.email))
        {
            Some(record) => {
                let next_follow_up_date = if record.accepts_follow_ups() {
                    Some(now.checked_add_days(Days::new(INITIAL_FOLLOW_UP_DAYS)))
                } else {
                    None
                };

                ContactUpdate {
                    initial_email_sent: Some(true),
                    initial_email_date: Some(now),
                    initial_email_subject: Some(subject.to_string()),
                    last_contact_date: Some(now),
                    next_follow_up_date,
                    ..Default::default()
                }
                .apply_to(record);
                record.updated_date = now;
                log::info!("updated existing contact: {}", contact.email);
            }
            None => {
                records.push(ContactRecord::new_initial_send(
                    contact,
                    subject,
                    language,
                    campaign_batch,
                    &self.template_version,
                    now,
                ));
                log::info!("added new contact to tracking: {}", contact.email);
            }
        }

        self.write_all(&records)
    }

    /// Merge `update` into the record for `email` and rewrite the table.
    ///
    /// Returns `false` without touching the table when no record matches.
    pub fn apply_update(&self, email: &str, update: ContactUpdate) -> StoreResult<bool> {
        let now = self.now();
        let mut records = self.load_all()?;

        let Some(record) = records.iter_mut().find(|record| record.matches_email(email)) else {
            log::debug!("no tracked contact for {}; update ignored", email);
            return Ok(false);
        };

        update.apply_to(record);
        record.updated_date = now;

        self.write_all(&records)?;
        Ok(true)
    }

    /// Contacts due for `stage`: initial email sent, stage not sent, no reply,
    /// not unsubscribed, and their scheduled follow-up date has passed.
    pub fn scan_due_for_follow_up(&self, stage: FollowUpStage) -> StoreResult<Vec<ContactRecord>> {
        let now = self.now();

        Ok(self
            .load_all()?
            .into_iter()
            .filter(|record| {
                record.initial_email_sent
                    && !record.follow_up_sent(stage)
                    && !record.replied
                    && !record.unsubscribed
                    && record
                        .next_follow_up_date
                        .is_some_and(|due| now >= due)
            })
            .collect())
    }

    /// Record a follow-up send and schedule the next stage, if any.
    pub fn log_follow_up(&self, email: &str, stage: FollowUpStage) -> StoreResult<bool> {
        let now = self.now();
        let Some(current) = self.find_by_email(email)? else {
            log::debug!("no tracked contact for {}; {} not logged", email, stage);
            return Ok(false);
        };

        let next_follow_up_date = match stage.days_until_next() {
            Some(days) if current.accepts_follow_ups() => {
                now.checked_add_days(Days::new(days as u64))
            }
            _ => None,
        };

        let update = ContactUpdate {
            last_contact_date: Some(now),
            lead_status: Some(current.lead_status.escalate(stage.lead_status())),
            next_follow_up_date: Some(next_follow_up_date),
            ..Default::default()
        }
        .follow_up_sent(stage, now);

        self.apply_update(email, update)
    }

    /// Record a reply: the contact becomes HOT with a score of 80 and leaves
    /// the follow-up schedule.
    pub fn log_reply(&self, email: &str, reply_content: &str) -> StoreResult<bool> {
        let update = ContactUpdate {
            replied: Some(true),
            reply_date: Some(self.now()),
            reply_content: Some(reply_content.to_string()),
            lead_status: Some(LeadStatus::Hot),
            lead_score: Some(REPLY_SCORE),
            next_follow_up_date: Some(None),
            ..Default::default()
        };
        self.apply_update(email, update)
    }

    /// Record a scheduled meeting: the contact becomes QUALIFIED with a score
    /// of 100.
    pub fn log_meeting_scheduled(&self, email: &str, meeting_date: &str) -> StoreResult<bool> {
        let update = ContactUpdate {
            meeting_scheduled: Some(true),
            meeting_date: Some(meeting_date.to_string()),
            lead_status: Some(LeadStatus::Qualified),
            lead_score: Some(MEETING_SCORE),
            ..Default::default()
        };
        self.apply_update(email, update)
    }

    pub fn mark_unsubscribed(&self, email: &str) -> StoreResult<bool> {
        let update = ContactUpdate {
            unsubscribed: Some(true),
            next_follow_up_date: Some(None),
            ..Default::default()
        };
        self.apply_update(email, update)
    }

    pub fn mark_bounced(&self, email: &str, bounce_status: &str) -> StoreResult<bool> {
        let update = ContactUpdate {
            bounce_status: Some(bounce_status.to_string()),
            ..Default::default()
        };
        self.apply_update(email, update)
    }
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore")
            .field("path", &self.path)
            .field("template_version", &self.template_version)
            .finish_non_exhaustive()
    }
}
