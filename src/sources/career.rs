//! Career and current-season stat lines from the nbcsports player page.
//!
//! The stats table's `<tfoot>` holds the summary rows. Rows qualify only
//! when they carry the full 21-cell shape, so footer spacer rows can never
//! shift which row gets picked.

use scraper::Html;
use serde::Serialize;

use crate::error::Result;
use crate::extract::table::{extract_row, RowPick, RowRule};
use crate::extract::{Coerce, FieldSpec};
use crate::record::Record;

pub const STATS_URL: &str = "https://www.nbcsports.com/nba/lebron-james/9844/stats";

const FOOTER_SCOPE: &str = "tfoot tr";
const STAT_CELLS: usize = 21;

#[derive(Debug, Serialize)]
pub struct CareerStats {
    pub career: Record,
    pub current_season: Record,
}

pub fn extract(doc: &Html) -> Result<CareerStats> {
    let fields = stat_fields();
    let career = extract_row(
        doc,
        &RowRule::new(FOOTER_SCOPE, STAT_CELLS, RowPick::Last),
        &fields,
    )?;
    let current_season = extract_row(
        doc,
        &RowRule::new(FOOTER_SCOPE, STAT_CELLS, RowPick::Nth(1)),
        &fields,
    )?;
    Ok(CareerStats { career, current_season })
}

/// Column order is stable across summary rows of the same table; cells 0-1
/// hold the row label and team.
fn stat_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::column("games", 2, Coerce::Number),
        FieldSpec::column("minutes", 3, Coerce::Number),
        FieldSpec::column("points", 4, Coerce::Number),
        FieldSpec::column("rebounds", 5, Coerce::Number),
        FieldSpec::column("offensive_rebounds", 6, Coerce::Number),
        FieldSpec::column("assists", 7, Coerce::Number),
        FieldSpec::column("steals", 8, Coerce::Number),
        FieldSpec::column("blocks", 9, Coerce::Number),
        FieldSpec::column("fouls", 10, Coerce::Number),
        FieldSpec::column("turnovers", 11, Coerce::Number),
        FieldSpec::column("field_goals_made", 12, Coerce::Number),
        FieldSpec::column("field_goals_attempted", 13, Coerce::Number),
        FieldSpec::column("field_goal_pct", 14, Coerce::Percent),
        FieldSpec::column("three_pointers_made", 15, Coerce::Number),
        FieldSpec::column("three_pointers_attempted", 16, Coerce::Number),
        FieldSpec::column("three_point_pct", 17, Coerce::Percent),
        FieldSpec::column("free_throws_made", 18, Coerce::Number),
        FieldSpec::column("free_throws_attempted", 19, Coerce::Number),
        FieldSpec::column("free_throw_pct", 20, Coerce::Percent),
    ]
}
