use std::fmt;

use serde::Serialize;

use super::CampaignDriver;
use crate::language;
use crate::models::{Contact, Language};
use crate::templates::RenderedEmail;

/// A rendered initial email for one contact, not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailPreview {
    /// Zero-based position in the source list.
    pub index: usize,
    pub name: String,
    pub email: String,
    pub language: Language,
    #[serde(flatten)]
    pub rendered: RenderedEmail,
}

impl fmt::Display for EmailPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Contact {}: {} ({}) [{}] ---",
            self.index + 1,
            self.name,
            self.email,
            self.language
        )?;
        writeln!(f, "Subject: {}", self.rendered.subject)?;
        writeln!(f, "Text Body:\n{}", self.rendered.text_body)?;
        write!(f, "\n{}\n", "=".repeat(80))
    }
}

impl CampaignDriver<'_> {
    /// Render the first `count` contacts exactly as a send would.
    pub fn preview(&self, contacts: &[Contact], count: usize) -> Vec<EmailPreview> {
        contacts
            .iter()
            .take(count)
            .enumerate()
            .map(|(index, contact)| {
                let language = language::resolve(&contact.location);
                EmailPreview {
                    index,
                    name: contact.display_name(),
                    email: contact.email.clone(),
                    language,
                    rendered: self.renderer.render(
                        language,
                        &contact.greeting_name(),
                        &contact.company_name,
                        &contact.job_title,
                        &self.settings.booking_link,
                    ),
                }
            })
            .collect()
    }
}
