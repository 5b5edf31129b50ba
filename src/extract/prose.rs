use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use super::{normalize_ws, FieldSpec, Locator};
use crate::error::{ExtractError, Result};
use crate::record::{Record, Value};

/// Rules for one prose page: the field that receives the `<h1>` text (the
/// structural anchor), the label whose following paragraph serves as the
/// pattern blob, and the declared fields.
pub struct ProfileRules {
    pub heading_field: &'static str,
    pub blob_anchor: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// Extract a flat profile record from a prose page. The run fails only when
/// the primary heading is absent; every other field degrades to an empty
/// string when its label or pattern finds nothing.
pub fn extract_profile(doc: &Html, rules: &ProfileRules) -> Result<Record> {
    let heading = heading_text(doc)
        .ok_or_else(|| ExtractError::anchor_missing("primary heading (h1)"))?;

    let paragraphs = paragraph_texts(doc);
    let blob = measurement_blob(&paragraphs, rules.blob_anchor);

    let mut record = Record::with_capacity(rules.fields.len() + 1);
    record.push(rules.heading_field, Value::Text(heading));

    for field in &rules.fields {
        let raw = match &field.locator {
            Locator::Label { label, delimiter, stop } => {
                let v = label_value(&paragraphs, label, *delimiter, *stop);
                if v.is_empty() {
                    debug!(field = field.name, label = *label, "label not found in prose");
                }
                v
            }
            Locator::Pattern { pattern, group } => {
                pattern_capture(blob.as_deref().unwrap_or(""), pattern, *group)
            }
            other => {
                debug!(field = field.name, ?other, "unsupported locator in prose context");
                String::new()
            }
        };
        record.push(field.name, field.coerce_text(&raw));
    }

    Ok(record)
}

fn heading_text(doc: &Html) -> Option<String> {
    let h1 = Selector::parse("h1").unwrap();
    doc.select(&h1)
        .map(|e| normalize_ws(&e.text().collect::<String>()))
        .find(|t| !t.is_empty())
}

fn paragraph_texts(doc: &Html) -> Vec<String> {
    let p = Selector::parse("p").unwrap();
    doc.select(&p)
        .map(|e| normalize_ws(&e.text().collect::<String>()))
        .collect()
}

/// Text after `label` and its delimiter within the first paragraph that
/// contains the label, cut at `stop` when present. Case-sensitive substring
/// match, which is known to bind to the wrong block when the label word also
/// appears in page chrome.
fn label_value(
    paragraphs: &[String],
    label: &str,
    delimiter: char,
    stop: Option<&str>,
) -> String {
    let Some(text) = paragraphs.iter().find(|t| t.contains(label)) else {
        return String::new();
    };
    let start = text.find(label).map(|i| i + label.len()).unwrap_or(0);
    let mut rest = &text[start..];
    if let Some(i) = rest.find(delimiter) {
        rest = &rest[i + delimiter.len_utf8()..];
    }
    if let Some(marker) = stop {
        if let Some(i) = rest.find(marker) {
            rest = &rest[..i];
        }
    }
    rest.trim().to_string()
}

/// The paragraph following the one that contains `anchor`, normalized. This
/// is where height/weight live on player pages.
fn measurement_blob(paragraphs: &[String], anchor: &str) -> Option<String> {
    let idx = paragraphs.iter().position(|t| t.contains(anchor))?;
    paragraphs.get(idx + 1).cloned()
}

fn pattern_capture(blob: &str, pattern: &str, group: usize) -> String {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            debug!(pattern, error = %e, "invalid capture pattern");
            return String::new();
        }
    };
    re.captures(blob)
        .and_then(|c| c.get(group))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
