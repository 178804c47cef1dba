//! Campaign statistics over the tracking table.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::{Language, LeadStatus};
use crate::tracker::ContactRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignStats {
    pub total_contacts: usize,
    pub emails_sent: usize,
    pub follow_ups_sent: usize,
    pub replies: usize,
    pub meetings_scheduled: usize,
    pub unsubscribed: usize,
    pub by_language: BTreeMap<Language, usize>,
    pub by_status: BTreeMap<LeadStatus, usize>,
    /// Percentage of initial sends that got a reply; absent with no sends.
    pub reply_rate: Option<f64>,
    pub meeting_rate: Option<f64>,
}

impl CampaignStats {
    /// Single pass over `records`.
    pub fn aggregate(records: &[ContactRecord]) -> Self {
        let mut stats = Self {
            total_contacts: 0,
            emails_sent: 0,
            follow_ups_sent: 0,
            replies: 0,
            meetings_scheduled: 0,
            unsubscribed: 0,
            by_language: Language::ALL.iter().map(|l| (*l, 0)).collect(),
            by_status: LeadStatus::ALL.iter().map(|s| (*s, 0)).collect(),
            reply_rate: None,
            meeting_rate: None,
        };

        for record in records {
            stats.total_contacts += 1;
            stats.emails_sent += usize::from(record.initial_email_sent);
            stats.follow_ups_sent += record.follow_ups_sent();
            stats.replies += usize::from(record.replied);
            stats.meetings_scheduled += usize::from(record.meeting_scheduled);
            stats.unsubscribed += usize::from(record.unsubscribed);
            *stats.by_language.entry(record.language).or_default() += 1;
            *stats.by_status.entry(record.lead_status).or_default() += 1;
        }

        stats.reply_rate = rate(stats.replies, stats.emails_sent);
        stats.meeting_rate = rate(stats.meetings_scheduled, stats.emails_sent);
        stats
    }
}

fn rate(count: usize, sent: usize) -> Option<f64> {
    (sent > 0).then(|| (count as f64 * 100.0) / sent as f64)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for CampaignStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "COLD EMAIL CAMPAIGN STATISTICS")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total Contacts:       {}", self.total_contacts)?;
        writeln!(f, "Initial Emails Sent:  {}", self.emails_sent)?;
        writeln!(f, "Follow-ups Sent:      {}", self.follow_ups_sent)?;
        writeln!(f, "Replies Received:     {}", self.replies)?;
        writeln!(f, "Meetings Scheduled:   {}", self.meetings_scheduled)?;
        writeln!(f, "Unsubscribed:         {}", self.unsubscribed)?;

        writeln!(f, "\nBy Language:")?;
        for (language, count) in &self.by_language {
            writeln!(f, "   {}: {}", title_case(language.as_str()), count)?;
        }

        writeln!(f, "\nBy Lead Status:")?;
        for (status, count) in &self.by_status {
            writeln!(f, "   {}: {}", status, count)?;
        }

        if let (Some(reply_rate), Some(meeting_rate)) = (self.reply_rate, self.meeting_rate) {
            writeln!(f, "\nReply Rate:   {:.1}%", reply_rate)?;
            writeln!(f, "Meeting Rate: {:.1}%", meeting_rate)?;
        }

        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_rates_but_seeded_buckets() {
        let stats = CampaignStats::aggregate(&[]);
        assert_eq!(stats.reply_rate, None);
        assert_eq!(stats.meeting_rate, None);
        assert_eq!(stats.by_language.len(), 3);
        assert_eq!(stats.by_status[&LeadStatus::Qualified], 0);
        assert!(!stats.to_string().contains("Reply Rate"));
    }

    #[test]
    fn title_cases_language_names() {
        assert_eq!(title_case("arabic"), "Arabic");
        assert_eq!(title_case(""), "");
    }
}
