//! Most recent game lines from the basketball-reference game log table.
//!
//! Game rows carry exactly 26 data cells; header, spacer, and inactive rows
//! do not, which is the whole qualification rule.

use scraper::Html;

use crate::error::Result;
use crate::extract::table::extract_rows;
use crate::extract::{Coerce, FieldSpec};
use crate::record::Record;

pub const GAMELOG_URL: &str = "https://www.basketball-reference.com/players/j/jamesle01.html";

const ROW_SCOPE: &str = "tr";
const GAME_CELLS: usize = 26;
pub const DEFAULT_LIMIT: usize = 5;

pub fn extract(doc: &Html, limit: usize) -> Result<Vec<Record>> {
    extract_rows(doc, ROW_SCOPE, GAME_CELLS, &game_fields(), limit)
}

fn game_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::column("date", 0, Coerce::Raw),
        FieldSpec::column("team", 1, Coerce::Raw),
        FieldSpec::column("opponent", 3, Coerce::Raw),
        FieldSpec::column("result", 4, Coerce::Raw),
        FieldSpec::column("minutes", 5, Coerce::Raw),
        FieldSpec::column("field_goals", 6, Coerce::Number),
        FieldSpec::column("field_goal_attempts", 7, Coerce::Number),
        FieldSpec::column("field_goal_pct", 8, Coerce::Percent),
        FieldSpec::column("three_pointers", 9, Coerce::Number),
        FieldSpec::column("three_point_attempts", 10, Coerce::Number),
        FieldSpec::column("three_point_pct", 11, Coerce::Percent),
        FieldSpec::column("free_throws", 12, Coerce::Number),
        FieldSpec::column("free_throw_attempts", 13, Coerce::Number),
        FieldSpec::column("free_throw_pct", 14, Coerce::Percent),
        FieldSpec::column("offensive_rebounds", 15, Coerce::Number),
        FieldSpec::column("defensive_rebounds", 16, Coerce::Number),
        FieldSpec::column("total_rebounds", 17, Coerce::Number),
        FieldSpec::column("assists", 18, Coerce::Number),
        FieldSpec::column("steals", 19, Coerce::Number),
        FieldSpec::column("blocks", 20, Coerce::Number),
        FieldSpec::column("turnovers", 21, Coerce::Number),
        FieldSpec::column("fouls", 22, Coerce::Number),
        FieldSpec::column("points", 23, Coerce::Number),
        FieldSpec::column("game_score", 24, Coerce::Number),
        FieldSpec::column("plus_minus", 25, Coerce::Number),
    ]
}
