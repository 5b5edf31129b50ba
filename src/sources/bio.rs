//! Profile facts from the basketball-reference player page, where every
//! field is embedded in prose and anchored by a label ("Position:",
//! "Born:", ...) or a pattern over the height/weight line.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::error::Result;
use crate::extract::prose::{extract_profile, ProfileRules};
use crate::extract::FieldSpec;
use crate::record::Record;

pub const PLAYER_URL: &str = "https://www.basketball-reference.com/players/j/jamesle01.html";

// Field separator used within a single profile line.
const FIELD_MARK: &str = "▪";

static DRAFT_BOILERPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",?\s*\d{4} NBA [Dd]raft\.?\s*$").unwrap());
static TEAM_SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]").unwrap());

pub fn extract(doc: &Html) -> Result<Record> {
    extract_profile(doc, &rules())
}

pub fn rules() -> ProfileRules {
    ProfileRules {
        heading_field: "name",
        blob_anchor: "Position",
        fields: vec![
            FieldSpec::label_until("position", "Position", FIELD_MARK),
            FieldSpec::label("shoots", "Shoots").with_transform(shooting_hand),
            FieldSpec::pattern("height", r"\b(\d{1,2}-\d{1,2})\b", 1),
            FieldSpec::pattern("weight", r"(\d{2,3}lb)", 1),
            FieldSpec::pattern("height_metric", r"\((\d{2,3}cm),\s*(\d{2,3}kg)\)", 1),
            FieldSpec::pattern("weight_metric", r"\((\d{2,3}cm),\s*(\d{2,3}kg)\)", 2),
            FieldSpec::label_until("team", "Team", FIELD_MARK).with_transform(team_slug),
            FieldSpec::label_until("born", "Born", FIELD_MARK),
            FieldSpec::label_until("draft", "Draft", FIELD_MARK).with_transform(strip_draft_boilerplate),
        ],
    }
}

fn shooting_hand(s: &str) -> String {
    format!("{} Handed", s)
}

/// "Los Angeles Lakers" -> "lakers": last word, lowercased, non-alphanumerics
/// dropped. Downstream uses the slug as a schedule lookup key.
fn team_slug(s: &str) -> String {
    let last = s.split_whitespace().last().unwrap_or("").to_lowercase();
    TEAM_SLUG_RE.replace_all(&last, "").into_owned()
}

/// The draft line ends with a boilerplate "..., 2003 NBA draft." sentence
/// that restates the year already implied by the rest of the value.
fn strip_draft_boilerplate(s: &str) -> String {
    DRAFT_BOILERPLATE_RE.replace(s, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    fn parse_fixture() -> Html {
        let html = std::fs::read_to_string("tests/fixtures/bio.html").unwrap();
        Html::parse_document(&html)
    }

    #[test]
    fn name_comes_from_heading() {
        let r = extract(&parse_fixture()).unwrap();
        assert_eq!(r.get("name"), Some(&Value::Text("LeBron James".into())));
    }

    #[test]
    fn position_and_shooting_hand() {
        let r = extract(&parse_fixture()).unwrap();
        assert_eq!(r.get("position"), Some(&Value::Text("Power Forward".into())));
        assert_eq!(r.get("shoots"), Some(&Value::Text("Right Handed".into())));
    }

    #[test]
    fn measurements_from_the_sibling_blob() {
        let r = extract(&parse_fixture()).unwrap();
        assert_eq!(r.get("height"), Some(&Value::Text("6-9".into())));
        assert_eq!(r.get("weight"), Some(&Value::Text("250lb".into())));
        assert_eq!(r.get("height_metric"), Some(&Value::Text("206cm".into())));
        assert_eq!(r.get("weight_metric"), Some(&Value::Text("113kg".into())));
    }

    #[test]
    fn team_is_slugged() {
        let r = extract(&parse_fixture()).unwrap();
        assert_eq!(r.get("team"), Some(&Value::Text("lakers".into())));
    }

    #[test]
    fn draft_boilerplate_is_stripped() {
        let r = extract(&parse_fixture()).unwrap();
        assert_eq!(
            r.get("draft"),
            Some(&Value::Text(
                "Cleveland Cavaliers, 1st round (1st pick, 1st overall)".into()
            ))
        );
    }

    #[test]
    fn slug_handles_punctuated_team_names() {
        assert_eq!(team_slug("Philadelphia 76ers"), "76ers");
        assert_eq!(team_slug("Los Angeles Lakers"), "lakers");
    }

    #[test]
    fn undrafted_page_keeps_the_field_empty() {
        let html = std::fs::read_to_string("tests/fixtures/bio.html")
            .unwrap()
            .lines()
            .filter(|l| !l.contains("Draft"))
            .collect::<Vec<_>>()
            .join("\n");
        let r = extract(&Html::parse_document(&html)).unwrap();
        assert_eq!(r.get("draft"), Some(&Value::Text(String::new())));
    }
}
