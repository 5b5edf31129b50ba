//! Cleaned player records from the stats API result-set payloads:
//! `commonplayerinfo` for the profile card and `playercareerstats` for
//! career totals and the per-season aggregation.

use serde::Serialize;

use crate::error::Result;
use crate::extract::resultset::{find_set, project, single_row, sum_column, StatsPayload};
use crate::extract::FieldSpec;
use crate::record::Record;

pub const DEFAULT_PLAYER_ID: u32 = 2544;

pub fn info_url(player_id: u32) -> String {
    format!("https://stats.nba.com/stats/commonplayerinfo?LeagueID=00&PlayerID={player_id}")
}

pub fn career_url(player_id: u32) -> String {
    format!("https://stats.nba.com/stats/playercareerstats?PerMode=Totals&PlayerID={player_id}")
}

/// Profile card: `CommonPlayerInfo` projection merged with the headline
/// per-game averages. Both set names are stable upstream contracts, so
/// either one missing fails the run.
pub fn extract_info(payload: &StatsPayload) -> Result<Record> {
    let raw = single_row(payload, "CommonPlayerInfo")?;
    let mut record = project(&raw, &info_fields());

    let headline = single_row(payload, "PlayerHeadlineStats")?;
    let averages = project(&headline, &headline_fields());
    for (name, value) in averages.iter() {
        record.push(name, value.clone());
    }
    Ok(record)
}

#[derive(Debug, Serialize)]
pub struct CareerTotals {
    pub totals: Record,
    pub seasons: usize,
    pub minutes_played: f64,
}

/// Career totals projection plus a fold across the per-season rows.
pub fn extract_totals(payload: &StatsPayload) -> Result<CareerTotals> {
    let raw = single_row(payload, "CareerTotalsRegularSeason")?;
    let totals = project(&raw, &totals_fields());

    let seasons_set = find_set(payload, "SeasonTotalsRegularSeason")?;
    Ok(CareerTotals {
        totals,
        seasons: seasons_set.row_set.len(),
        minutes_played: sum_column(seasons_set, "MIN"),
    })
}

fn info_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::template("name", "{FIRST_NAME} {LAST_NAME}", ""),
        FieldSpec::header("team", "TEAM_NAME"),
        FieldSpec::header("jersey", "JERSEY"),
        FieldSpec::header("position", "POSITION"),
        FieldSpec::header("height", "HEIGHT"),
        FieldSpec::header("weight", "WEIGHT"),
        FieldSpec::header("country", "COUNTRY"),
        FieldSpec::header("last_attended", "LAST_AFFILIATION"),
        FieldSpec::header("birthdate", "BIRTHDATE"),
        FieldSpec::template("draft", "{DRAFT_YEAR} R{DRAFT_ROUND} Pick {DRAFT_NUMBER}", "Undrafted")
            .with_transform(clean_draft),
        FieldSpec::template("experience", "{SEASON_EXP} Years", ""),
    ]
}

fn headline_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::header("ppg", "PTS"),
        FieldSpec::header("rpg", "REB"),
        FieldSpec::header("apg", "AST"),
        FieldSpec::header("pie", "PIE"),
    ]
}

fn totals_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::header("games", "GP"),
        FieldSpec::header("minutes", "MIN"),
        FieldSpec::header("points", "PTS"),
        FieldSpec::header("rebounds", "REB"),
        FieldSpec::header("assists", "AST"),
        FieldSpec::header("steals", "STL"),
        FieldSpec::header("blocks", "BLK"),
    ]
}

/// Undrafted players carry the literal "Undrafted" in every draft column,
/// which would otherwise render as "Undrafted RUndrafted Pick Undrafted".
fn clean_draft(s: &str) -> String {
    if s.starts_with("Undrafted") {
        "Undrafted".to_string()
    } else {
        s.to_string()
    }
}
