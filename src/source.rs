//! Prospect list loading.
//!
//! Source lists are spreadsheet exports from enrichment tools. Each tool adds
//! its own "email" column, so a row may carry several candidates; the first
//! usable one in [`EMAIL_COLUMNS`] order wins.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Contact;

/// Candidate email columns, highest priority first.
pub const EMAIL_COLUMNS: [&str; 10] = [
    "Find Work Email",
    "Find Work Email (2)",
    "Find Work Email (3)",
    "Find Work Email (4)",
    "Find Work Email (5)",
    "Find Email",
    "Find Work Email (6)",
    "Find work email",
    "Find Work Email (7)",
    "Work Email",
];

/// Lowercased markers enrichment tools write in place of an address.
const NOT_FOUND_SENTINELS: [&str; 3] = ["no email", "not found", "❌"];
const VERIFIED_GLYPH: &str = "✅";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open contact list {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read contact list {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Header name → column index for one source file.
struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (position, name) in headers.iter().enumerate() {
            // duplicate headers: keep the leftmost
            index.entry(name.trim().to_string()).or_insert(position);
        }
        Self(index)
    }

    fn get<'r>(&self, row: &'r csv::StringRecord, name: &str) -> &'r str {
        self.0
            .get(name)
            .and_then(|position| row.get(*position))
            .map(str::trim)
            .unwrap_or_default()
    }
}

/// Clean one candidate cell, returning the address if it is usable.
pub fn clean_email(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || !value.contains('@') {
        return None;
    }

    let lowered = value.to_lowercase();
    if NOT_FOUND_SENTINELS
        .iter()
        .any(|sentinel| lowered.contains(sentinel))
    {
        return None;
    }

    Some(value.replace(VERIFIED_GLYPH, "").trim().to_string())
}

/// First usable email in `row`, scanning [`EMAIL_COLUMNS`] in order.
fn extract_email(columns: &Columns, row: &csv::StringRecord) -> Option<String> {
    EMAIL_COLUMNS
        .iter()
        .find_map(|name| clean_email(columns.get(row, name)))
}

/// Load every contact with a usable email from the list at `path`.
pub fn load_contacts(path: impl AsRef<Path>) -> Result<Vec<Contact>, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let contacts = contacts_from_reader(file).map_err(|source| SourceError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "loaded {} contacts with valid emails from {}",
        contacts.len(),
        path.display()
    );
    Ok(contacts)
}

/// Parse a contact list from any reader. Rows without a usable email are
/// skipped.
pub fn contacts_from_reader<R: Read>(reader: R) -> Result<Vec<Contact>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::new(reader.headers()?);

    let mut contacts = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row?;
        let Some(email) = extract_email(&columns, &row) else {
            skipped += 1;
            continue;
        };

        contacts.push(Contact {
            first_name: columns.get(&row, "First Name").to_string(),
            last_name: columns.get(&row, "Last Name").to_string(),
            full_name: columns.get(&row, "Full Name").to_string(),
            company_name: columns.get(&row, "Company Name").to_string(),
            job_title: columns.get(&row, "Job Title").to_string(),
            location: columns.get(&row, "Location").to_string(),
            linkedin: columns.get(&row, "LinkedIn Profile").to_string(),
            phone: columns.get(&row, "Phone").to_string(),
            email,
        });
    }

    if skipped > 0 {
        log::debug!("skipped {} rows without a usable email", skipped);
    }

    Ok(contacts)
}
