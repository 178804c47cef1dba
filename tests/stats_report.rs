use std::sync::Arc;

use chrono::NaiveDate;
use cold_outreach::models::{Contact, FollowUpStage, Language, LeadStatus};
use cold_outreach::stats::CampaignStats;
use cold_outreach::tracker::ContactStore;

fn seeded_store(dir: &tempfile::TempDir) -> ContactStore {
    let at = NaiveDate::from_ymd_opt(2025, 2, 3)
        .unwrap()
        .and_hms_opt(11, 0, 0)
        .unwrap();
    let store = ContactStore::with_clock(dir.path().join("t.csv"), Arc::new(move || at)).unwrap();

    let locations = [
        "Casablanca, Morocco",
        "Paris, France",
        "London, United Kingdom",
        "Dubai, UAE",
        "Dakar, Senegal",
    ];
    for (i, location) in locations.iter().enumerate() {
        let contact = Contact {
            first_name: format!("C{i}"),
            location: location.to_string(),
            email: format!("c{i}@example.com"),
            ..Default::default()
        };
        let language = cold_outreach::language::resolve(location);
        store
            .upsert_initial_send(&contact, "Hi", language, "B1")
            .unwrap();
    }
    store
}

#[test]
fn rates_are_percentages_of_initial_sends() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    store.log_reply("c0@example.com", "yes").unwrap();
    store.log_reply("c1@example.com", "tell me more").unwrap();
    store.log_meeting_scheduled("c1@example.com", "Friday").unwrap();
    store.log_follow_up("c2@example.com", FollowUpStage::First).unwrap();
    store.log_follow_up("c2@example.com", FollowUpStage::Second).unwrap();
    store.mark_unsubscribed("c4@example.com").unwrap();

    let stats = CampaignStats::aggregate(&store.load_all().unwrap());

    assert_eq!(stats.total_contacts, 5);
    assert_eq!(stats.emails_sent, 5);
    assert_eq!(stats.follow_ups_sent, 2);
    assert_eq!(stats.replies, 2);
    assert_eq!(stats.meetings_scheduled, 1);
    assert_eq!(stats.unsubscribed, 1);
    assert_eq!(stats.reply_rate, Some(40.0));
    assert_eq!(stats.meeting_rate, Some(20.0));

    assert_eq!(stats.by_language[&Language::Arabic], 2);
    assert_eq!(stats.by_language[&Language::French], 2);
    assert_eq!(stats.by_language[&Language::English], 1);

    assert_eq!(stats.by_status[&LeadStatus::Cold], 2);
    assert_eq!(stats.by_status[&LeadStatus::Warm], 1);
    assert_eq!(stats.by_status[&LeadStatus::Hot], 1);
    assert_eq!(stats.by_status[&LeadStatus::Qualified], 1);

    let report = stats.to_string();
    assert!(report.contains("Reply Rate:   40.0%"));
    assert!(report.contains("Meeting Rate: 20.0%"));
    assert!(report.contains("   Arabic: 2"));
}

#[test]
fn empty_store_omits_rates() {
    let dir = tempfile::tempdir().unwrap();
    let store = ContactStore::open(dir.path().join("empty.csv")).unwrap();

    let stats = CampaignStats::aggregate(&store.load_all().unwrap());

    assert_eq!(stats.total_contacts, 0);
    assert_eq!(stats.reply_rate, None);
    assert_eq!(stats.meeting_rate, None);
}

#[test]
fn json_report_uses_storage_spellings() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);

    let stats = CampaignStats::aggregate(&store.load_all().unwrap());
    let json = serde_json::to_value(&stats).unwrap();

    assert_eq!(json["by_language"]["arabic"], 2);
    assert_eq!(json["by_status"]["COLD"], 5);
    assert_eq!(json["reply_rate"], 0.0);
}
