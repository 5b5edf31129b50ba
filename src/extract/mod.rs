pub mod prose;
pub mod resultset;
pub mod table;

use crate::record::{Record, Value};

/// Where a field's raw value lives within a document. The mapping from field
/// name to source location is data, so a markup shift means editing a table,
/// not chasing inline selector logic.
#[derive(Debug, Clone)]
pub enum Locator {
    /// Nth cell of the selected table row.
    Column(usize),
    /// Text following `label` within the first paragraph containing it,
    /// taken after `delimiter` and cut at `stop` when present.
    Label {
        label: &'static str,
        delimiter: char,
        stop: Option<&'static str>,
    },
    /// First match of `pattern` against the designated text blob.
    Pattern { pattern: &'static str, group: usize },
    /// Header-matched index within a located result-set row.
    HeaderColumn(&'static str),
    /// Composite string rendered over the raw record, e.g.
    /// `"{DRAFT_YEAR} R{DRAFT_ROUND} Pick {DRAFT_NUMBER}"`. Falls back to
    /// `fallback` when the first referenced key is null or empty.
    Template {
        template: &'static str,
        fallback: &'static str,
    },
}

/// Typed conversion from raw text fragment to final field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerce {
    /// Trim only.
    Raw,
    /// Parse to a number, null on failure.
    Number,
    /// Pre-formatted percentage text, kept as-is.
    Percent,
}

/// One declared output field: name, location, coercion, and an optional
/// post-processing transform (boilerplate stripping, slugging).
#[derive(Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub locator: Locator,
    pub coerce: Coerce,
    pub transform: Option<fn(&str) -> String>,
}

impl FieldSpec {
    pub fn column(name: &'static str, index: usize, coerce: Coerce) -> Self {
        FieldSpec { name, locator: Locator::Column(index), coerce, transform: None }
    }

    pub fn label(name: &'static str, label: &'static str) -> Self {
        FieldSpec {
            name,
            locator: Locator::Label { label, delimiter: ':', stop: None },
            coerce: Coerce::Raw,
            transform: None,
        }
    }

    pub fn label_until(name: &'static str, label: &'static str, stop: &'static str) -> Self {
        FieldSpec {
            name,
            locator: Locator::Label { label, delimiter: ':', stop: Some(stop) },
            coerce: Coerce::Raw,
            transform: None,
        }
    }

    pub fn pattern(name: &'static str, pattern: &'static str, group: usize) -> Self {
        FieldSpec {
            name,
            locator: Locator::Pattern { pattern, group },
            coerce: Coerce::Raw,
            transform: None,
        }
    }

    pub fn header(name: &'static str, column: &'static str) -> Self {
        FieldSpec {
            name,
            locator: Locator::HeaderColumn(column),
            coerce: Coerce::Raw,
            transform: None,
        }
    }

    pub fn template(name: &'static str, template: &'static str, fallback: &'static str) -> Self {
        FieldSpec {
            name,
            locator: Locator::Template { template, fallback },
            coerce: Coerce::Raw,
            transform: None,
        }
    }

    pub fn with_transform(mut self, f: fn(&str) -> String) -> Self {
        self.transform = Some(f);
        self
    }

    /// Coerce a raw text fragment into this field's final value.
    pub fn coerce_text(&self, raw: &str) -> Value {
        let trimmed = raw.trim();
        let text = match self.transform {
            Some(f) if !trimmed.is_empty() => f(trimmed),
            _ => trimmed.to_string(),
        };
        match self.coerce {
            Coerce::Raw | Coerce::Percent => Value::Text(text),
            Coerce::Number => parse_number(&text),
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("locator", &self.locator)
            .field("coerce", &self.coerce)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Collapse runs of whitespace (including embedded newlines) to single
/// spaces and trim. Source markup routinely breaks one logical sentence
/// across several lines.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_number(s: &str) -> Value {
    let cleaned = s.replace(',', "");
    cleaned.parse::<f64>().map(Value::Number).unwrap_or(Value::Null)
}

/// Render `{KEY}` placeholders against an already-assembled record. Returns
/// the fallback when the first referenced key resolves to nothing, matching
/// the "Undrafted" behavior of composite draft strings.
pub fn render_template(template: &str, fallback: &str, record: &Record) -> Value {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut first = true;

    while let Some(open) = rest.find('{') {
        let Some(close_rel) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let key = &rest[open + 1..open + close_rel];
        let rendered = record.get(key).and_then(Value::render);
        match rendered {
            Some(v) => out.push_str(&v),
            None if first => return Value::Text(fallback.to_string()),
            None => {}
        }
        first = false;
        rest = &rest[open + close_rel + 1..];
    }
    out.push_str(rest);
    Value::Text(out)
}
