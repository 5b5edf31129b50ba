use serde::Deserialize;
use tracing::debug;

use super::{render_template, FieldSpec, Locator};
use crate::error::{ExtractError, Result};
use crate::record::{Record, Value};

/// Payload shape shared by the stats endpoints: named result sets, each a
/// header-name array parallel to an array of row-value arrays.
#[derive(Debug, Deserialize)]
pub struct StatsPayload {
    #[serde(rename = "resultSets")]
    pub result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<serde_json::Value>>,
}

pub fn parse_payload(body: &str) -> Result<StatsPayload> {
    Ok(serde_json::from_str(body)?)
}

/// Exact-name lookup. Absence signals an incompatible upstream change, not
/// data sparsity, so it fails the run.
pub fn find_set<'a>(payload: &'a StatsPayload, name: &str) -> Result<&'a ResultSet> {
    payload
        .result_sets
        .iter()
        .find(|set| set.name == name)
        .ok_or_else(|| ExtractError::ResultSetNotFound { name: name.to_string() })
}

/// One record per row, headers zipped 1:1 with positional values. Duplicate
/// headers keep the first occurrence; short rows pad with null.
pub fn records(set: &ResultSet) -> Vec<Record> {
    set.row_set.iter().map(|row| zip_row(&set.headers, row)).collect()
}

/// All rows of the named set as records, in payload order.
pub fn extract_records(payload: &StatsPayload, name: &str) -> Result<Vec<Record>> {
    Ok(records(find_set(payload, name)?))
}

/// The first row of the named set as a record. An empty row set means the
/// upstream sent an incomplete payload.
pub fn single_row(payload: &StatsPayload, name: &str) -> Result<Record> {
    let set = find_set(payload, name)?;
    let row = set
        .row_set
        .first()
        .ok_or_else(|| ExtractError::row_not_found(format!("result set {name:?} has no rows")))?;
    Ok(zip_row(&set.headers, row))
}

/// Numeric fold across every row of `header`'s column. A non-numeric or
/// missing value contributes zero for that row only.
pub fn sum_column(set: &ResultSet, header: &str) -> f64 {
    let Some(idx) = set.headers.iter().position(|h| h == header) else {
        debug!(set = %set.name, header, "aggregation column not in headers");
        return 0.0;
    };
    set.row_set
        .iter()
        .map(|row| row.get(idx).and_then(serde_json::Value::as_f64).unwrap_or(0.0))
        .sum()
}

/// Second-stage projection: canonical key → output key renaming with
/// numeric/null pass-through, plus composite templates rendered over the
/// raw record.
pub fn project(raw: &Record, fields: &[FieldSpec]) -> Record {
    let mut out = Record::with_capacity(fields.len());
    for field in fields {
        let value = match &field.locator {
            Locator::HeaderColumn(column) => {
                raw.get(column).cloned().unwrap_or(Value::Null)
            }
            Locator::Template { template, fallback } => {
                render_template(template, fallback, raw)
            }
            other => {
                debug!(field = field.name, ?other, "unsupported locator in projection");
                Value::Null
            }
        };
        let value = match (&value, field.transform) {
            (Value::Text(s), Some(f)) if !s.is_empty() => Value::Text(f(s)),
            _ => value,
        };
        out.push(field.name, value);
    }
    out
}

fn zip_row(headers: &[String], row: &[serde_json::Value]) -> Record {
    let mut record = Record::with_capacity(headers.len());
    for (i, header) in headers.iter().enumerate() {
        if record.get(header).is_some() {
            // First occurrence wins on duplicate headers.
            continue;
        }
        let value = row.get(i).map(Value::from).unwrap_or(Value::Null);
        record.push(header.clone(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> StatsPayload {
        let body = serde_json::json!({
            "resultSets": [
                {
                    "name": "CareerTotalsRegularSeason",
                    "headers": ["PTS", "REB"],
                    "rowSet": [[100, 50]]
                },
                {
                    "name": "SeasonTotalsRegularSeason",
                    "headers": ["SEASON_ID", "MIN", "PTS"],
                    "rowSet": [
                        ["2003-04", 3122, 1654],
                        ["2004-05", null, 2175],
                        ["2005-06", "DNP", 2478]
                    ]
                }
            ]
        });
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn cleaned_projection_renames_canonical_keys() {
        let p = payload();
        let raw = single_row(&p, "CareerTotalsRegularSeason").unwrap();
        let fields = vec![
            FieldSpec::header("points", "PTS"),
            FieldSpec::header("rebounds", "REB"),
        ];
        let cleaned = project(&raw, &fields);
        assert_eq!(cleaned.get("points"), Some(&Value::Number(100.0)));
        assert_eq!(cleaned.get("rebounds"), Some(&Value::Number(50.0)));
    }

    #[test]
    fn missing_set_is_fatal() {
        let p = payload();
        let err = extract_records(&p, "CareerTotalsPostSeason").unwrap_err();
        assert_eq!(err.kind(), "result_set_not_found");
    }

    #[test]
    fn one_record_per_row() {
        let p = payload();
        let rows = extract_records(&p, "SeasonTotalsRegularSeason").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("SEASON_ID"), Some(&Value::Text("2003-04".into())));
        assert_eq!(rows[2].get("PTS"), Some(&Value::Number(2478.0)));
    }

    #[test]
    fn sum_treats_non_numeric_as_zero() {
        let p = payload();
        let set = find_set(&p, "SeasonTotalsRegularSeason").unwrap();
        // null and "DNP" rows contribute zero minutes
        assert_eq!(sum_column(set, "MIN"), 3122.0);
        assert_eq!(sum_column(set, "PTS"), 1654.0 + 2175.0 + 2478.0);
    }

    #[test]
    fn sum_of_absent_column_is_zero() {
        let p = payload();
        let set = find_set(&p, "SeasonTotalsRegularSeason").unwrap();
        assert_eq!(sum_column(set, "BLK"), 0.0);
    }

    #[test]
    fn duplicate_headers_first_occurrence_wins() {
        let body = serde_json::json!({
            "resultSets": [{
                "name": "Dup",
                "headers": ["PTS", "PTS"],
                "rowSet": [[10, 99]]
            }]
        });
        let p: StatsPayload = serde_json::from_value(body).unwrap();
        let r = single_row(&p, "Dup").unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("PTS"), Some(&Value::Number(10.0)));
    }

    #[test]
    fn short_rows_pad_with_null() {
        let body = serde_json::json!({
            "resultSets": [{
                "name": "Short",
                "headers": ["A", "B", "C"],
                "rowSet": [[1]]
            }]
        });
        let p: StatsPayload = serde_json::from_value(body).unwrap();
        let r = single_row(&p, "Short").unwrap();
        assert_eq!(r.get("B"), Some(&Value::Null));
        assert_eq!(r.get("C"), Some(&Value::Null));
    }

    #[test]
    fn empty_row_set_is_fatal() {
        let body = serde_json::json!({
            "resultSets": [{ "name": "Empty", "headers": ["A"], "rowSet": [] }]
        });
        let p: StatsPayload = serde_json::from_value(body).unwrap();
        let err = single_row(&p, "Empty").unwrap_err();
        assert_eq!(err.kind(), "row_not_found");
    }

    #[test]
    fn composite_template_with_fallback() {
        let mut raw = Record::new();
        raw.push("DRAFT_YEAR", Value::Text("Undrafted".into()));
        raw.push("SEASON_EXP", Value::Number(3.0));
        let fields = vec![
            FieldSpec::template("experience", "{SEASON_EXP} Years", ""),
        ];
        let cleaned = project(&raw, &fields);
        assert_eq!(cleaned.get("experience"), Some(&Value::Text("3 Years".into())));
    }
}
