use std::sync::{Arc, Mutex};

use chrono::{Days, NaiveDate, NaiveDateTime};
use cold_outreach::models::{Contact, FollowUpStage, Language, LeadStatus};
use cold_outreach::tracker::{COLUMNS, Clock, ContactStore};

struct TestClock(Arc<Mutex<NaiveDateTime>>);

impl TestClock {
    fn start() -> Self {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_micro_opt(9, 30, 0, 123_456)
            .unwrap();
        Self(Arc::new(Mutex::new(start)))
    }

    fn clock(&self) -> Clock {
        let now = self.0.clone();
        Arc::new(move || *now.lock().unwrap())
    }

    fn advance_days(&self, days: u64) {
        let mut now = self.0.lock().unwrap();
        *now = now.checked_add_days(Days::new(days)).unwrap();
    }

    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}

fn contact(email: &str) -> Contact {
    Contact {
        first_name: "Meriem".into(),
        last_name: "Alaoui".into(),
        full_name: "Meriem Alaoui".into(),
        company_name: "Atlas Notaires".into(),
        job_title: "Managing Partner".into(),
        location: "Rabat, Morocco".into(),
        email: email.into(),
        ..Default::default()
    }
}

fn store_in(dir: &tempfile::TempDir, clock: &TestClock) -> ContactStore {
    ContactStore::with_clock(dir.path().join("campaign_tracking.csv"), clock.clock())
        .unwrap()
        .template_version("2.1")
}

#[test]
fn initial_send_schedules_first_follow_up_three_days_out() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::start();
    let store = store_in(&dir, &clock);

    store
        .upsert_initial_send(&contact("meriem@atlas.ma"), "Hello", Language::Arabic, "BATCH_007")
        .unwrap();

    let record = store.find_by_email("meriem@atlas.ma").unwrap().unwrap();
    assert!(record.initial_email_sent);
    assert_eq!(
        record.next_follow_up_date,
        record.created_date.checked_add_days(Days::new(3))
    );
    assert_eq!(record.lead_status, LeadStatus::Cold);
    assert_eq!(record.lead_score, 0);
    assert_eq!(record.language, Language::Arabic);
    assert_eq!(record.campaign_batch, "BATCH_007");
    assert_eq!(record.email_template_version, "2.1");
    assert!(record.contact_id.starts_with("CT_meriem_"));
}

#[test]
fn repeated_initial_send_updates_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::start();
    let store = store_in(&dir, &clock);
    let created = clock.now();

    store
        .upsert_initial_send(&contact("meriem@atlas.ma"), "First", Language::Arabic, "B1")
        .unwrap();
    store
        .log_follow_up("meriem@atlas.ma", FollowUpStage::First)
        .unwrap();

    clock.advance_days(2);
    store
        .upsert_initial_send(&contact("MERIEM@atlas.ma"), "Second", Language::English, "B2")
        .unwrap();

    let records = store.load_all().unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.initial_email_subject, "Second");
    assert_eq!(record.created_date, created);
    assert_eq!(record.updated_date, clock.now());
    assert!(record.follow_up_1_sent, "follow-up progress must survive");
    assert_eq!(record.language, Language::Arabic);
    assert_eq!(record.campaign_batch, "B1");
}

#[test]
fn due_scan_excludes_replied_unsubscribed_and_not_yet_due() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::start();
    let store = store_in(&dir, &clock);

    for email in ["due@x.ma", "replied@x.ma", "gone@x.ma"] {
        store
            .upsert_initial_send(&contact(email), "Hi", Language::Arabic, "B1")
            .unwrap();
    }
    store.log_reply("replied@x.ma", "Interested").unwrap();
    store.mark_unsubscribed("gone@x.ma").unwrap();

    clock.advance_days(2);
    assert!(
        store
            .scan_due_for_follow_up(FollowUpStage::First)
            .unwrap()
            .is_empty()
    );

    clock.advance_days(1);
    let due = store.scan_due_for_follow_up(FollowUpStage::First).unwrap();
    let emails: Vec<_> = due.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(emails, vec!["due@x.ma"]);
    assert!(due.iter().all(|r| !r.replied && !r.unsubscribed));
}

#[test]
fn follow_up_cadence_and_status_transitions() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::start();
    let store = store_in(&dir, &clock);
    let email = "meriem@atlas.ma";

    store
        .upsert_initial_send(&contact(email), "Hi", Language::Arabic, "B1")
        .unwrap();

    clock.advance_days(3);
    store.log_follow_up(email, FollowUpStage::First).unwrap();
    let record = store.find_by_email(email).unwrap().unwrap();
    assert!(record.follow_up_1_sent);
    assert_eq!(record.follow_up_1_date, Some(clock.now()));
    assert_eq!(record.lead_status, LeadStatus::Cold);
    assert_eq!(
        record.next_follow_up_date,
        clock.now().checked_add_days(Days::new(5))
    );

    clock.advance_days(5);
    store.log_follow_up(email, FollowUpStage::Second).unwrap();
    let record = store.find_by_email(email).unwrap().unwrap();
    assert_eq!(record.lead_status, LeadStatus::Warm);
    assert_eq!(
        record.next_follow_up_date,
        clock.now().checked_add_days(Days::new(7))
    );

    clock.advance_days(7);
    store.log_follow_up(email, FollowUpStage::Third).unwrap();
    let record = store.find_by_email(email).unwrap().unwrap();
    assert!(record.follow_up_3_sent);
    assert_eq!(record.next_follow_up_date, None);
    assert_eq!(record.follow_ups_sent(), 3);
}

#[test]
fn reply_and_meeting_override_prior_status() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::start();
    let store = store_in(&dir, &clock);
    let email = "meriem@atlas.ma";

    store
        .upsert_initial_send(&contact(email), "Hi", Language::Arabic, "B1")
        .unwrap();
    store.log_meeting_scheduled(email, "2025-04-10 15:00").unwrap();

    let record = store.find_by_email(email).unwrap().unwrap();
    assert_eq!(record.lead_status, LeadStatus::Qualified);
    assert_eq!(record.lead_score, 100);
    assert_eq!(record.meeting_date, "2025-04-10 15:00");

    store.log_reply(email, "Thanks, see you then").unwrap();
    let record = store.find_by_email(email).unwrap().unwrap();
    assert_eq!(record.lead_status, LeadStatus::Hot);
    assert_eq!(record.lead_score, 80);
    assert!(record.replied);
    assert_eq!(record.reply_date, Some(clock.now()));
    assert_eq!(record.next_follow_up_date, None);

    store.log_meeting_scheduled(email, "next Tuesday").unwrap();
    let record = store.find_by_email(email).unwrap().unwrap();
    assert_eq!(record.lead_status, LeadStatus::Qualified);
    assert_eq!(record.lead_score, 100);
}

#[test]
fn unsubscribe_and_bounce_leave_lead_status_alone() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::start();
    let store = store_in(&dir, &clock);
    let email = "meriem@atlas.ma";

    store
        .upsert_initial_send(&contact(email), "Hi", Language::Arabic, "B1")
        .unwrap();
    store.log_reply(email, "").unwrap();
    store.mark_bounced(email, "hard").unwrap();
    store.mark_unsubscribed(email).unwrap();

    let record = store.find_by_email(email).unwrap().unwrap();
    assert!(record.unsubscribed);
    assert_eq!(record.bounce_status, "hard");
    assert_eq!(record.lead_status, LeadStatus::Hot);
}

#[test]
fn update_for_unknown_email_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::start();
    let store = store_in(&dir, &clock);

    store
        .upsert_initial_send(&contact("meriem@atlas.ma"), "Hi", Language::Arabic, "B1")
        .unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    clock.advance_days(1);
    assert!(!store.log_reply("nobody@x.ma", "hello").unwrap());
    assert!(!store.mark_unsubscribed("nobody@x.ma").unwrap());

    let after = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn missing_table_is_created_with_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.csv");
    assert!(!path.exists());

    let store = ContactStore::open(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert_eq!(contents.trim_end(), COLUMNS.join(","));
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn table_uses_text_booleans_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::start();
    let store = store_in(&dir, &clock);

    store
        .upsert_initial_send(&contact("meriem@atlas.ma"), "Hi", Language::Arabic, "B1")
        .unwrap();

    let contents = std::fs::read_to_string(store.path()).unwrap();
    let row = contents.lines().nth(1).unwrap();
    assert!(row.contains(",True,2025-04-01T09:30:00.123456,Hi,False,"));
    assert!(!row.contains("true"));
}
