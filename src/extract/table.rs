use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{normalize_ws, FieldSpec, Locator};
use crate::error::{ExtractError, Result};
use crate::record::Record;

/// Which row to take among those that qualify.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowPick {
    First,
    /// Zero-based index into the qualifying subset.
    Nth(usize),
    Last,
}

/// Row selection rule: a CSS scope for candidate rows, the exact cell count
/// a row must have to qualify, and which qualifying row to take. The cell
/// count guards against header/spacer rows that share the same tag but a
/// different shape.
#[derive(Debug, Clone)]
pub struct RowRule {
    pub scope: &'static str,
    pub cells: usize,
    pub pick: RowPick,
}

impl RowRule {
    pub fn new(scope: &'static str, cells: usize, pick: RowPick) -> Self {
        RowRule { scope, cells, pick }
    }
}

/// Extract one record from the row selected by `rule`. Fails with
/// `RowNotFound` when no candidate qualifies or the pick is out of range;
/// an out-of-range column index only empties that field.
pub fn extract_row(doc: &Html, rule: &RowRule, fields: &[FieldSpec]) -> Result<Record> {
    let rows = qualifying_rows(doc, rule.scope, rule.cells)?;
    let picked = match rule.pick {
        RowPick::First => rows.first(),
        RowPick::Nth(n) => rows.get(n),
        RowPick::Last => rows.last(),
    };
    let row = picked.ok_or_else(|| {
        ExtractError::row_not_found(format!(
            "{} with {} cells (pick {:?}, {} qualifying)",
            rule.scope,
            rule.cells,
            rule.pick,
            rows.len()
        ))
    })?;
    Ok(slice_row(row, fields))
}

/// Extract a record per qualifying row, in document order, capped at `limit`.
pub fn extract_rows(
    doc: &Html,
    scope: &'static str,
    cells: usize,
    fields: &[FieldSpec],
    limit: usize,
) -> Result<Vec<Record>> {
    let rows = qualifying_rows(doc, scope, cells)?;
    Ok(rows.iter().take(limit).map(|row| slice_row(row, fields)).collect())
}

fn qualifying_rows<'a>(
    doc: &'a Html,
    scope: &str,
    cells: usize,
) -> Result<Vec<ElementRef<'a>>> {
    let row_sel = Selector::parse(scope)
        .map_err(|e| ExtractError::row_not_found(format!("{scope} (bad selector: {e})")))?;
    let rows: Vec<ElementRef<'a>> = doc
        .select(&row_sel)
        .filter(|row| cell_count(row) == cells)
        .collect();
    debug!(scope, cells, qualifying = rows.len(), "row qualification");
    Ok(rows)
}

fn slice_row(row: &ElementRef, fields: &[FieldSpec]) -> Record {
    let cells = cell_texts(row);
    let mut record = Record::with_capacity(fields.len());
    for field in fields {
        let raw = match &field.locator {
            Locator::Column(i) => cells.get(*i).map(String::as_str).unwrap_or(""),
            other => {
                debug!(field = field.name, ?other, "non-positional locator in table context");
                ""
            }
        };
        record.push(field.name, field.coerce_text(raw));
    }
    record
}

fn cell_count(row: &ElementRef) -> usize {
    let td = Selector::parse("td").unwrap();
    row.select(&td).count()
}

fn cell_texts(row: &ElementRef) -> Vec<String> {
    let td = Selector::parse("td").unwrap();
    row.select(&td)
        .map(|cell| normalize_ws(&cell.text().collect::<String>()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Coerce;
    use crate::record::Value;

    const TABLE: &str = r#"
        <table>
          <tbody>
            <tr><td>2023-24</td><td>LAL</td><td>71</td></tr>
          </tbody>
          <tfoot>
            <tr><th>spacer</th></tr>
            <tr><td>2024-25</td><td>LAL</td><td>70</td></tr>
            <tr><td>Career</td><td>—</td><td>1562</td></tr>
          </tfoot>
        </table>"#;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::column("season", 0, Coerce::Raw),
            FieldSpec::column("team", 1, Coerce::Raw),
            FieldSpec::column("games", 2, Coerce::Number),
        ]
    }

    #[test]
    fn last_qualifying_footer_row() {
        let doc = Html::parse_document(TABLE);
        let rule = RowRule::new("tfoot tr", 3, RowPick::Last);
        let r = extract_row(&doc, &rule, &fields()).unwrap();
        assert_eq!(r.get("season"), Some(&Value::Text("Career".into())));
        assert_eq!(r.get("games"), Some(&Value::Number(1562.0)));
    }

    #[test]
    fn nth_skips_non_qualifying_spacer() {
        let doc = Html::parse_document(TABLE);
        // The th-only spacer row has zero td cells, so index 0 of the
        // qualifying subset is the 2024-25 row.
        let rule = RowRule::new("tfoot tr", 3, RowPick::First);
        let r = extract_row(&doc, &rule, &fields()).unwrap();
        assert_eq!(r.get("season"), Some(&Value::Text("2024-25".into())));
    }

    #[test]
    fn wrong_cell_count_is_row_not_found() {
        let doc = Html::parse_document(TABLE);
        let rule = RowRule::new("tfoot tr", 21, RowPick::Last);
        let err = extract_row(&doc, &rule, &fields()).unwrap_err();
        assert_eq!(err.kind(), "row_not_found");
    }

    #[test]
    fn out_of_range_column_is_empty_not_fatal() {
        let doc = Html::parse_document(TABLE);
        let rule = RowRule::new("tfoot tr", 3, RowPick::Last);
        let specs = vec![FieldSpec::column("nope", 40, Coerce::Raw)];
        let r = extract_row(&doc, &rule, &specs).unwrap();
        assert_eq!(r.get("nope"), Some(&Value::Text(String::new())));
    }

    #[test]
    fn shape_matches_declared_fields_exactly() {
        let doc = Html::parse_document(TABLE);
        let rule = RowRule::new("tfoot tr", 3, RowPick::Last);
        let r = extract_row(&doc, &rule, &fields()).unwrap();
        let names: Vec<&str> = r.names().collect();
        assert_eq!(names, vec!["season", "team", "games"]);
    }

    #[test]
    fn extract_rows_caps_at_limit_in_document_order() {
        let doc = Html::parse_document(TABLE);
        let rows = extract_rows(&doc, "tr", 3, &fields(), 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("season"), Some(&Value::Text("2023-24".into())));
        assert_eq!(rows[1].get("season"), Some(&Value::Text("2024-25".into())));
    }

    #[test]
    fn rerun_is_identical() {
        let doc = Html::parse_document(TABLE);
        let rule = RowRule::new("tfoot tr", 3, RowPick::Last);
        let a = extract_row(&doc, &rule, &fields()).unwrap();
        let b = extract_row(&doc, &rule, &fields()).unwrap();
        assert_eq!(a, b);
    }
}
