//! HTML layout and HTML → plain text derivation.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Language;

static HEAD_REGEX: OnceLock<Regex> = OnceLock::new();
static LINE_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();
static BLOCK_END_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn head_regex() -> &'static Regex {
    HEAD_REGEX.get_or_init(|| Regex::new(r"(?is)<head\b.*?</head>").expect("Invalid head regex"))
}

fn line_break_regex() -> &'static Regex {
    LINE_BREAK_REGEX.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid br regex"))
}

fn block_end_regex() -> &'static Regex {
    BLOCK_END_REGEX.get_or_init(|| {
        Regex::new(r"(?i)</(?:p|div|h[1-6]|li|tr|table)\s*>").expect("Invalid block regex")
    })
}

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"))
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn unescape_html(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Derive the plain-text body from an HTML body.
///
/// Drops the document head, turns line breaks and closing block tags into
/// newlines, strips every remaining tag, unescapes entities, trims each line
/// and collapses runs of blank lines into a single paragraph break.
pub fn html_to_text(html: &str) -> String {
    let without_head = head_regex().replace_all(html, "");
    let with_breaks = line_break_regex().replace_all(&without_head, "\n");
    let with_blocks = block_end_regex().replace_all(&with_breaks, "\n");
    let stripped = tag_regex().replace_all(&with_blocks, "");
    let unescaped = unescape_html(&stripped);

    let mut text = String::with_capacity(unescaped.len());
    let mut previous_was_blank = true;

    for line in unescaped.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !previous_was_blank {
                text.push('\n');
            }
            previous_was_blank = true;
            continue;
        }

        text.push_str(trimmed);
        text.push('\n');
        previous_was_blank = false;
    }

    text.trim_end().to_string()
}

/// Pre-escaped building blocks of one email document.
pub struct Document<'a> {
    pub language: Language,
    pub title: &'a str,
    pub brand: &'a str,
    pub greeting: &'a str,
    pub paragraphs: &'a [String],
    pub cta_button: &'a str,
    pub booking_prompt: &'a str,
    pub booking_link: &'a str,
    pub closing: &'a str,
    pub signature: &'a [String],
}

/// Render the shared email layout.
///
/// Every argument is inserted verbatim, callers escape dynamic values.
pub fn render_document(doc: &Document<'_>) -> String {
    let align = if doc.language == Language::Arabic {
        "right"
    } else {
        "left"
    };

    let paragraphs: String = doc
        .paragraphs
        .iter()
        .map(|paragraph| {
            format!(
                "        <p style=\"color: #2c2c2c; font-size: 15px; line-height: 1.6; margin: 0 0 16px 0;\">{paragraph}</p>\n"
            )
        })
        .collect();

    let signature: String = doc
        .signature
        .iter()
        .map(|line| format!("          {line}<br>\n"))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{dir}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
</head>
<body dir="{dir}" style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #e8eaf0;">
  <div style="max-width: 600px; margin: 20px auto; background-color: #ffffff; border-radius: 8px; overflow: hidden; text-align: {align};">
    <div style="background: #37474f; padding: 20px 40px; text-align: center;">
      <h1 style="color: #ffffff; margin: 0; font-size: 22px; letter-spacing: 2px;">{brand}</h1>
    </div>
    <div style="padding: 30px 40px;">
      <div>
        <p style="color: #1a1a1a; font-size: 15px; line-height: 1.6; margin: 0 0 16px 0; font-weight: 600;">{greeting}</p>
{paragraphs}      </div>
      <div style="text-align: center; margin: 25px 0;">
        <a href="{link}" style="display: inline-block; background: #37474f; color: #ffffff; text-decoration: none; padding: 12px 24px; border-radius: 4px; font-weight: 700;">{cta}</a>
      </div>
      <p style="color: #607d8b; font-size: 13px; margin: 0 0 20px 0;">{prompt} <a href="{link}" style="color: #37474f;">{link}</a></p>
      <div style="color: #2c2c2c; font-size: 14px; line-height: 1.5;">
        <p style="margin: 0 0 8px 0;">{closing}</p>
        <p style="margin: 0; font-weight: 700;">
{signature}        </p>
      </div>
    </div>
  </div>
</body>
</html>
"#,
        lang = doc.language.html_lang(),
        dir = doc.language.direction(),
        title = doc.title,
        brand = doc.brand,
        align = align,
        greeting = doc.greeting,
        paragraphs = paragraphs,
        link = doc.booking_link,
        cta = doc.cta_button,
        prompt = doc.booking_prompt,
        closing = doc.closing,
        signature = signature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_round_trips_through_text_derivation() {
        let html = format!("<p>{}</p>", escape_html("Tom & Jerry's <Co>"));
        assert_eq!(html, "<p>Tom &amp; Jerry&#39;s &lt;Co&gt;</p>");
        assert_eq!(html_to_text(&html), "Tom & Jerry's <Co>");
    }

    #[test]
    fn html_to_text_keeps_paragraph_breaks() {
        let html = "<html><head><title>Ignored</title></head><body>\n<div>\n<p>One</p>\n<p>Two<br>Three</p>\n</div>\n</body></html>";
        assert_eq!(html_to_text(html), "One\n\nTwo\nThree");
    }

    #[test]
    fn html_to_text_drops_attributes() {
        let html = r#"<p style="color: red">Book <a href="https://example.com">here</a></p>"#;
        assert_eq!(html_to_text(html), "Book here");
    }
}
