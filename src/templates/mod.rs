//! Outreach email rendering.
//!
//! Every email is authored once as HTML; the plain-text alternative is derived
//! from that HTML with [`html::html_to_text`] so the two parts never diverge.

pub mod copy;
pub mod html;

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::models::{FollowUpStage, Language};
use copy::{follow_up_copy, initial_copy};
use html::{Document, escape_html, html_to_text, render_document};

/// Identity printed in the signature block of every email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderProfile {
    pub name: String,
    pub title: String,
    pub company: String,
    pub website: String,
}

/// A fully rendered message: subject plus HTML and plain-text bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Per-recipient values substituted into the copy.
struct Recipient<'a> {
    first_name: &'a str,
    company_name: &'a str,
    job_title: &'a str,
}

/// Renders localized outreach emails for a fixed sender.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    sender: SenderProfile,
}

impl TemplateRenderer {
    pub fn new(sender: SenderProfile) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> &SenderProfile {
        &self.sender
    }

    /// Render the initial outreach email.
    ///
    /// Missing recipient fields are substituted as empty strings.
    pub fn render(
        &self,
        language: Language,
        first_name: &str,
        company_name: &str,
        job_title: &str,
        booking_link: &str,
    ) -> RenderedEmail {
        let copy = initial_copy(language);
        let recipient = Recipient {
            first_name,
            company_name,
            job_title,
        };

        let paragraphs = [
            copy.introduction,
            copy.value_proposition,
            copy.relevance,
            copy.call_to_action,
        ];

        self.compose(
            language,
            &recipient,
            copy.subject,
            copy.greeting,
            &paragraphs,
            copy.cta_button,
            copy.booking_prompt,
            copy.closing,
            booking_link,
        )
    }

    /// Render the reminder email for a follow-up stage.
    pub fn render_follow_up(
        &self,
        stage: FollowUpStage,
        language: Language,
        first_name: &str,
        company_name: &str,
        job_title: &str,
        booking_link: &str,
    ) -> RenderedEmail {
        let copy = follow_up_copy(language);
        let recipient = Recipient {
            first_name,
            company_name,
            job_title,
        };

        self.compose(
            language,
            &recipient,
            copy.subject(stage),
            copy.greeting,
            copy.body(stage),
            copy.cta_button,
            copy.booking_prompt,
            copy.closing,
            booking_link,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn compose(
        &self,
        language: Language,
        recipient: &Recipient<'_>,
        subject: &str,
        greeting: &str,
        paragraphs: &[&str],
        cta_button: &str,
        booking_prompt: &str,
        closing: &str,
        booking_link: &str,
    ) -> RenderedEmail {
        let subject = self.fill(subject, recipient);
        let paragraphs: Vec<String> = paragraphs
            .iter()
            .map(|paragraph| escape_html(&self.fill(paragraph, recipient)))
            .collect();

        let signature = vec![
            escape_html(&self.sender.name),
            escape_html(&format!("{}, {}", self.sender.title, self.sender.company)),
            escape_html(display_website(&self.sender.website)),
        ];

        let escaped_subject = escape_html(&subject);
        let greeting = escape_html(&self.fill(greeting, recipient));
        let brand = escape_html(&self.sender.company.to_uppercase());
        let cta_button = escape_html(cta_button);
        let booking_prompt = escape_html(booking_prompt);
        let booking_link = escape_html(booking_link);
        let closing = escape_html(closing);

        let html_body = render_document(&Document {
            language,
            title: &escaped_subject,
            brand: &brand,
            greeting: &greeting,
            paragraphs: &paragraphs,
            cta_button: &cta_button,
            booking_prompt: &booking_prompt,
            booking_link: &booking_link,
            closing: &closing,
            signature: &signature,
        });
        let text_body = html_to_text(&html_body);

        RenderedEmail {
            subject,
            html_body,
            text_body,
        }
    }

    /// Substitute placeholders in one pass; inserted values are never
    /// rescanned. Unknown placeholders are left as written.
    fn fill(&self, template: &str, recipient: &Recipient<'_>) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures<'_>| {
                let value = match &caps[1] {
                    "first_name" => recipient.first_name.trim(),
                    "company" => recipient.company_name.trim(),
                    "job_title" => recipient.job_title.trim(),
                    "sender_name" => self.sender.name.as_str(),
                    "sender_title" => self.sender.title.as_str(),
                    "sender_company" => self.sender.company.as_str(),
                    _ => return caps[0].to_string(),
                };
                value.to_string()
            })
            .into_owned()
    }
}

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{([a-z_]+)\}").expect("Invalid placeholder regex")
    })
}

fn display_website(website: &str) -> &str {
    website
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
}
