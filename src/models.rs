use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Campaign Enums =====

/// Languages a campaign can write in.
///
/// Variant order is the reporting order used by the stats report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Arabic,
    French,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Arabic, Language::French];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Arabic => "arabic",
            Language::French => "french",
        }
    }

    /// Text direction for HTML bodies.
    pub fn direction(&self) -> &'static str {
        match self {
            Language::Arabic => "rtl",
            Language::English | Language::French => "ltr",
        }
    }

    /// BCP 47 tag used for the `lang` attribute.
    pub fn html_lang(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
            Language::French => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "" => Ok(Language::English),
            "arabic" => Ok(Language::Arabic),
            "french" => Ok(Language::French),
            _ => Err(()),
        }
    }
}

/// Coarse qualification stage of a contact.
///
/// Ordered so that a later variant is a stronger lead.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadStatus {
    #[default]
    Cold,
    Warm,
    Hot,
    Qualified,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::Cold,
        LeadStatus::Warm,
        LeadStatus::Hot,
        LeadStatus::Qualified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Cold => "COLD",
            LeadStatus::Warm => "WARM",
            LeadStatus::Hot => "HOT",
            LeadStatus::Qualified => "QUALIFIED",
        }
    }

    /// Move towards `target` without ever demoting the current status.
    pub fn escalate(self, target: LeadStatus) -> LeadStatus {
        self.max(target)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COLD" | "" => Ok(LeadStatus::Cold),
            "WARM" => Ok(LeadStatus::Warm),
            "HOT" => Ok(LeadStatus::Hot),
            "QUALIFIED" => Ok(LeadStatus::Qualified),
            _ => Err(()),
        }
    }
}

/// One of the three reminder emails sent after the initial outreach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FollowUpStage {
    First,
    Second,
    Third,
}

impl FollowUpStage {
    pub const ALL: [FollowUpStage; 3] = [
        FollowUpStage::First,
        FollowUpStage::Second,
        FollowUpStage::Third,
    ];

    pub fn number(&self) -> u8 {
        match self {
            FollowUpStage::First => 1,
            FollowUpStage::Second => 2,
            FollowUpStage::Third => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(FollowUpStage::First),
            2 => Some(FollowUpStage::Second),
            3 => Some(FollowUpStage::Third),
            _ => None,
        }
    }

    /// Days until the next stage becomes due, counted from this stage's send.
    ///
    /// `None` for the final stage.
    pub fn days_until_next(&self) -> Option<i64> {
        match self {
            FollowUpStage::First => Some(5),
            FollowUpStage::Second => Some(7),
            FollowUpStage::Third => None,
        }
    }

    /// Status a contact is escalated to once this stage has been sent.
    pub fn lead_status(&self) -> LeadStatus {
        match self {
            FollowUpStage::First => LeadStatus::Cold,
            FollowUpStage::Second | FollowUpStage::Third => LeadStatus::Warm,
        }
    }
}

impl fmt::Display for FollowUpStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "follow-up {}", self.number())
    }
}

// ===== Source Contacts =====

/// Name used in a greeting line: the first name, else the first word of the
/// full name, else "there".
pub fn greeting_name(first_name: &str, full_name: &str) -> String {
    let first_name = first_name.trim();
    if !first_name.is_empty() {
        return first_name.to_string();
    }

    full_name
        .split_whitespace()
        .next()
        .unwrap_or("there")
        .to_string()
}

/// A prospect read from a source contact list, before any tracking exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub linkedin: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    /// Name used in the greeting line.
    ///
    /// Falls back to the first word of the full name, then to "there".
    pub fn greeting_name(&self) -> String {
        greeting_name(&self.first_name, &self.full_name)
    }

    /// Name used in log lines.
    pub fn display_name(&self) -> String {
        if !self.full_name.is_empty() {
            return self.full_name.clone();
        }

        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
