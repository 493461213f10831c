use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::text::element_text;

pub const NO_TITLE: &str = "No title found";
pub const NO_DESCRIPTION: &str = "No description found";
pub const NO_CONTACT: &str = "Contact info not found";
pub const NO_SERVICES: &str = "Services not specified";

pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const SERVICE_TERMS: &[&str] = &["therapy", "counseling", "support", "hotline", "chat"];

/// Checked in order; the first non-blank match wins.
const DESCRIPTION_SELECTORS: &[&str] = &[
    r#"meta[name="description"]"#,
    ".description",
    "#about",
    "article",
];

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").unwrap())
}

/// First `<h1>`, trimmed. A blank heading gives an empty title; only a
/// missing one gets the sentinel.
pub fn title(doc: &Html) -> String {
    let h1 = Selector::parse("h1").unwrap();
    doc.select(&h1)
        .next()
        .map(element_text)
        .unwrap_or_else(|| NO_TITLE.to_string())
}

pub fn description(doc: &Html) -> String {
    DESCRIPTION_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|sel| {
            let el = doc.select(&sel).next()?;
            let text = match el.value().name() {
                "meta" => el.value().attr("content").unwrap_or_default().trim().to_string(),
                _ => element_text(el),
            };
            if text.is_empty() {
                None
            } else {
                Some(truncate_chars(&text, DESCRIPTION_MAX_CHARS))
            }
        })
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

pub fn contact(visible: &str) -> String {
    let mut parts = Vec::new();
    if let Some(m) = phone_re().find(visible) {
        parts.push(format!("Phone: {}", m.as_str()));
    }
    if let Some(m) = email_re().find(visible) {
        parts.push(format!("Email: {}", m.as_str()));
    }
    if parts.is_empty() {
        NO_CONTACT.to_string()
    } else {
        parts.join(", ")
    }
}

pub fn services(visible: &str) -> String {
    let lower = visible.to_lowercase();
    let found: Vec<&str> = SERVICE_TERMS
        .iter()
        .copied()
        .filter(|term| lower.contains(term))
        .collect();
    if found.is_empty() {
        NO_SERVICES.to_string()
    } else {
        found.join(", ")
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}
