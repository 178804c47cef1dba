use std::io::Write;

use cold_outreach::source::{SourceError, load_contacts};

const EXPORT: &str = "\
First Name,Last Name,Full Name,Company Name,Job Title,Location,LinkedIn Profile,Find Work Email,Find Email,Work Email
Youssef,Benali,Youssef Benali,Atlas Legal,Partner,\"Casablanca, Morocco\",https://linkedin.com/in/ybenali,✅ youssef@atlas-legal.ma,,
,,Nadia Haddad,Haddad & Co,CFO,\"Beirut, Lebanon\",,No email found,nadia@haddad.lb,
Marc,Dubois,Marc Dubois,Dubois SARL,CEO,\"Lyon, France\",,❌,,
Sam,Lee,Sam Lee,Lee Ltd,COO,London,,,,sam@lee.co.uk
";

fn write_export(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("prospects.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();
    path
}

#[test]
fn loads_only_rows_with_a_usable_email() {
    let dir = tempfile::tempdir().unwrap();
    let contacts = load_contacts(write_export(&dir)).unwrap();

    let emails: Vec<_> = contacts.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(
        emails,
        vec!["youssef@atlas-legal.ma", "nadia@haddad.lb", "sam@lee.co.uk"]
    );

    let youssef = &contacts[0];
    assert_eq!(youssef.company_name, "Atlas Legal");
    assert_eq!(youssef.location, "Casablanca, Morocco");
    assert_eq!(youssef.linkedin, "https://linkedin.com/in/ybenali");
}

#[test]
fn greeting_falls_back_to_full_name() {
    let dir = tempfile::tempdir().unwrap();
    let contacts = load_contacts(write_export(&dir)).unwrap();

    assert_eq!(contacts[0].greeting_name(), "Youssef");
    assert_eq!(contacts[1].greeting_name(), "Nadia");
}

#[test]
fn missing_file_is_a_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_contacts(dir.path().join("nope.csv"));
    assert!(matches!(result, Err(SourceError::Open { .. })));
}
