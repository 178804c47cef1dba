//! Tracking table row and its text encoding.
//!
//! Booleans are stored as the literal strings `True` / `False` and timestamps
//! as ISO-8601 local date-times with microseconds, the format the tracking
//! sheet has always used. Conversion happens only in the serde helpers below.

use chrono::{Days, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use crate::models::{self, Contact, FollowUpStage, Language, LeadStatus};

/// Tracking table columns, in file order.
pub const COLUMNS: [&str; 38] = [
    "contact_id",
    "first_name",
    "last_name",
    "full_name",
    "company_name",
    "job_title",
    "location",
    "email",
    "language",
    "phone",
    "linkedin_profile",
    "initial_email_sent",
    "initial_email_date",
    "initial_email_subject",
    "follow_up_1_sent",
    "follow_up_1_date",
    "follow_up_2_sent",
    "follow_up_2_date",
    "follow_up_3_sent",
    "follow_up_3_date",
    "email_opened",
    "email_clicked",
    "replied",
    "reply_date",
    "reply_content",
    "meeting_scheduled",
    "meeting_date",
    "lead_status",
    "lead_score",
    "notes",
    "last_contact_date",
    "next_follow_up_date",
    "campaign_batch",
    "email_template_version",
    "unsubscribed",
    "bounce_status",
    "created_date",
    "updated_date",
];

/// Days between the initial email and the first follow-up.
pub const INITIAL_FOLLOW_UP_DAYS: u64 = 3;

/// One tracked contact. Field order must match [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub contact_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub email: String,
    #[serde(deserialize_with = "parse_or_default")]
    pub language: Language,
    pub phone: String,
    pub linkedin_profile: String,

    #[serde(with = "text_bool")]
    pub initial_email_sent: bool,
    #[serde(with = "timestamp")]
    pub initial_email_date: Option<NaiveDateTime>,
    pub initial_email_subject: String,

    #[serde(with = "text_bool")]
    pub follow_up_1_sent: bool,
    #[serde(with = "timestamp")]
    pub follow_up_1_date: Option<NaiveDateTime>,
    #[serde(with = "text_bool")]
    pub follow_up_2_sent: bool,
    #[serde(with = "timestamp")]
    pub follow_up_2_date: Option<NaiveDateTime>,
    #[serde(with = "text_bool")]
    pub follow_up_3_sent: bool,
    #[serde(with = "timestamp")]
    pub follow_up_3_date: Option<NaiveDateTime>,

    #[serde(with = "text_bool")]
    pub email_opened: bool,
    #[serde(with = "text_bool")]
    pub email_clicked: bool,
    #[serde(with = "text_bool")]
    pub replied: bool,
    #[serde(with = "timestamp")]
    pub reply_date: Option<NaiveDateTime>,
    pub reply_content: String,
    #[serde(with = "text_bool")]
    pub meeting_scheduled: bool,
    /// Free text as entered by the operator ("2025-03-04 14:00", "next Tuesday").
    pub meeting_date: String,

    #[serde(deserialize_with = "parse_or_default")]
    pub lead_status: LeadStatus,
    #[serde(deserialize_with = "parse_or_default")]
    pub lead_score: u32,
    pub notes: String,
    #[serde(with = "timestamp")]
    pub last_contact_date: Option<NaiveDateTime>,
    #[serde(with = "timestamp")]
    pub next_follow_up_date: Option<NaiveDateTime>,

    pub campaign_batch: String,
    pub email_template_version: String,
    #[serde(with = "text_bool")]
    pub unsubscribed: bool,
    pub bounce_status: String,

    #[serde(with = "timestamp::required")]
    pub created_date: NaiveDateTime,
    #[serde(with = "timestamp::required")]
    pub updated_date: NaiveDateTime,
}

impl ContactRecord {
    /// Build the record written on the first initial send to `contact`.
    pub fn new_initial_send(
        contact: &Contact,
        subject: &str,
        language: Language,
        campaign_batch: &str,
        template_version: &str,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            contact_id: contact_id(&contact.email),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            full_name: contact.full_name.clone(),
            company_name: contact.company_name.clone(),
            job_title: contact.job_title.clone(),
            location: contact.location.clone(),
            email: contact.email.clone(),
            language,
            phone: contact.phone.clone(),
            linkedin_profile: contact.linkedin.clone(),
            initial_email_sent: true,
            initial_email_date: Some(now),
            initial_email_subject: subject.to_string(),
            follow_up_1_sent: false,
            follow_up_1_date: None,
            follow_up_2_sent: false,
            follow_up_2_date: None,
            follow_up_3_sent: false,
            follow_up_3_date: None,
            email_opened: false,
            email_clicked: false,
            replied: false,
            reply_date: None,
            reply_content: String::new(),
            meeting_scheduled: false,
            meeting_date: String::new(),
            lead_status: LeadStatus::Cold,
            lead_score: 0,
            notes: String::new(),
            last_contact_date: Some(now),
            next_follow_up_date: now.checked_add_days(Days::new(INITIAL_FOLLOW_UP_DAYS)),
            campaign_batch: campaign_batch.to_string(),
            email_template_version: template_version.to_string(),
            unsubscribed: false,
            bounce_status: String::new(),
            created_date: now,
            updated_date: now,
        }
    }

    pub fn matches_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    pub fn follow_up_sent(&self, stage: FollowUpStage) -> bool {
        match stage {
            FollowUpStage::First => self.follow_up_1_sent,
            FollowUpStage::Second => self.follow_up_2_sent,
            FollowUpStage::Third => self.follow_up_3_sent,
        }
    }

    pub fn follow_up_date(&self, stage: FollowUpStage) -> Option<NaiveDateTime> {
        match stage {
            FollowUpStage::First => self.follow_up_1_date,
            FollowUpStage::Second => self.follow_up_2_date,
            FollowUpStage::Third => self.follow_up_3_date,
        }
    }

    pub fn follow_ups_sent(&self) -> usize {
        FollowUpStage::ALL
            .iter()
            .filter(|stage| self.follow_up_sent(**stage))
            .count()
    }

    /// Earliest follow-up stage that has not been sent yet.
    pub fn pending_follow_up(&self) -> Option<FollowUpStage> {
        FollowUpStage::ALL
            .into_iter()
            .find(|stage| !self.follow_up_sent(*stage))
    }

    /// Whether the contact may still receive scheduled follow-ups.
    pub fn accepts_follow_ups(&self) -> bool {
        !self.replied && !self.unsubscribed && !self.follow_up_3_sent
    }

    pub fn greeting_name(&self) -> String {
        models::greeting_name(&self.first_name, &self.full_name)
    }
}

/// Stable contact id: `CT_<local part>_<4 digits>`.
///
/// The digits come from a SHA-256 of the lowercased address so ids survive
/// process restarts.
pub fn contact_id(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let local_part = normalized.split('@').next().unwrap_or_default();

    let digest = Sha256::digest(normalized.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let bucket = u64::from_be_bytes(prefix) % 10_000;

    format!("CT_{local_part}_{bucket:04}")
}

fn parse_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + Default,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }

    trimmed
        .parse::<T>()
        .map_err(|_| serde::de::Error::custom(format!("invalid value '{trimmed}'")))
}

mod text_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim() {
            "True" => Ok(true),
            "False" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'True' or 'False', found '{other}'"
            ))),
        }
    }
}

pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn format(value: &NaiveDateTime) -> String {
        value.format(FORMAT).to_string()
    }

    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        raw.trim().parse::<NaiveDateTime>()
    }

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&format(value)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        parse(&raw).map(Some).map_err(serde::de::Error::custom)
    }

    pub mod required {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &NaiveDateTime,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&super::format(value))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<NaiveDateTime, D::Error> {
            let raw = String::deserialize(deserializer)?;
            super::parse(&raw).map_err(serde::de::Error::custom)
        }
    }
}
