use chrono::NaiveDateTime;

use super::record::ContactRecord;
use crate::models::{FollowUpStage, Language, LeadStatus};

/// A partial set of field changes merged into a tracked contact.
///
/// `None` leaves the column untouched. `next_follow_up_date` is doubly
/// optional so an update can clear the schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub language: Option<Language>,
    pub initial_email_sent: Option<bool>,
    pub initial_email_date: Option<NaiveDateTime>,
    pub initial_email_subject: Option<String>,
    pub follow_up_1_sent: Option<bool>,
    pub follow_up_1_date: Option<NaiveDateTime>,
    pub follow_up_2_sent: Option<bool>,
    pub follow_up_2_date: Option<NaiveDateTime>,
    pub follow_up_3_sent: Option<bool>,
    pub follow_up_3_date: Option<NaiveDateTime>,
    pub email_opened: Option<bool>,
    pub email_clicked: Option<bool>,
    pub replied: Option<bool>,
    pub reply_date: Option<NaiveDateTime>,
    pub reply_content: Option<String>,
    pub meeting_scheduled: Option<bool>,
    pub meeting_date: Option<String>,
    pub lead_status: Option<LeadStatus>,
    pub lead_score: Option<u32>,
    pub notes: Option<String>,
    pub last_contact_date: Option<NaiveDateTime>,
    pub next_follow_up_date: Option<Option<NaiveDateTime>>,
    pub campaign_batch: Option<String>,
    pub email_template_version: Option<String>,
    pub unsubscribed: Option<bool>,
    pub bounce_status: Option<String>,
}

macro_rules! merge_fields {
    ($record:expr, $update:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $update.$field {
                $record.$field = value;
            }
        )+
    };
}

macro_rules! merge_dates {
    ($record:expr, $update:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $update.$field {
                $record.$field = Some(value);
            }
        )+
    };
}

impl ContactUpdate {
    /// Mark a follow-up stage as sent at `at`.
    pub fn follow_up_sent(mut self, stage: FollowUpStage, at: NaiveDateTime) -> Self {
        match stage {
            FollowUpStage::First => {
                self.follow_up_1_sent = Some(true);
                self.follow_up_1_date = Some(at);
            }
            FollowUpStage::Second => {
                self.follow_up_2_sent = Some(true);
                self.follow_up_2_date = Some(at);
            }
            FollowUpStage::Third => {
                self.follow_up_3_sent = Some(true);
                self.follow_up_3_date = Some(at);
            }
        }
        self
    }

    /// Merge into `record`. Does not touch `updated_date`; the store stamps it.
    pub fn apply_to(self, record: &mut ContactRecord) {
        merge_fields!(record, self;
            language,
            initial_email_sent,
            initial_email_subject,
            follow_up_1_sent,
            follow_up_2_sent,
            follow_up_3_sent,
            email_opened,
            email_clicked,
            replied,
            reply_content,
            meeting_scheduled,
            meeting_date,
            lead_status,
            lead_score,
            notes,
            next_follow_up_date,
            campaign_batch,
            email_template_version,
            unsubscribed,
            bounce_status,
        );

        merge_dates!(record, self;
            initial_email_date,
            follow_up_1_date,
            follow_up_2_date,
            follow_up_3_date,
            reply_date,
            last_contact_date,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;
    use chrono::NaiveDate;

    fn record() -> ContactRecord {
        let now = NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let contact = Contact {
            email: "lina@example.com".into(),
            ..Default::default()
        };
        ContactRecord::new_initial_send(&contact, "Hi", Language::English, "B1", "1.0", now)
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut record = record();
        let before = record.clone();
        ContactUpdate::default().apply_to(&mut record);
        assert_eq!(record, before);
    }

    #[test]
    fn merges_only_provided_fields() {
        let mut record = record();
        let update = ContactUpdate {
            notes: Some("met at expo".into()),
            next_follow_up_date: Some(None),
            ..Default::default()
        };
        update.apply_to(&mut record);

        assert_eq!(record.notes, "met at expo");
        assert_eq!(record.next_follow_up_date, None);
        assert_eq!(record.initial_email_subject, "Hi");
    }

    #[test]
    fn follow_up_sent_targets_the_stage_columns() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut record = record();
        ContactUpdate::default()
            .follow_up_sent(FollowUpStage::Second, at)
            .apply_to(&mut record);

        assert!(!record.follow_up_1_sent);
        assert!(record.follow_up_2_sent);
        assert_eq!(record.follow_up_2_date, Some(at));
    }
}
