//! Balance-sheet workbook parsing.
//!
//! Source layout: the `Bilanço` sheet's first column holds Turkish account
//! labels; every other column header is a `YEAR/MONTH` period like
//! `2024/12`. Cells are numeric or blank. Blank and non-numeric cells are
//! treated as absent, never as zero.

use std::path::Path;
use std::sync::OnceLock;

use calamine::{open_workbook_auto, Data, Reader};
use regex::Regex;

use super::EtlError;

/// Sheet holding the balance sheet in the downloaded workbooks.
pub const BALANCE_SHEET: &str = "Bilanço";

/// A parsed sheet: per-column periods plus labelled value rows.
#[derive(Debug, Default)]
pub struct Statement {
    /// (year, quarter) per data column; None where the header was malformed
    /// (that column is skipped, the rest of the sheet still loads).
    pub periods: Vec<Option<(i32, i32)>>,
    pub rows: Vec<StatementRow>,
}

#[derive(Debug)]
pub struct StatementRow {
    /// Trimmed source-language label from the first column.
    pub label: String,
    /// One cell per data column; None = blank or non-numeric.
    pub values: Vec<Option<f64>>,
}

/// Parse a `YEAR/MONTH` column header into (year, quarter).
///
/// Returns None for anything that is not two '/'-separated integers with a
/// plausible month; callers skip the column rather than aborting the load.
pub fn parse_period_header(header: &str) -> Option<(i32, i32)> {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    let re = HEADER_RE.get_or_init(|| Regex::new(r"^(\d{4})/(\d{1,2})$").expect("valid regex"));

    let captures = re.captures(header.trim())?;
    let year: i32 = captures[1].parse().ok()?;
    let month: i32 = captures[2].parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, (month - 1) / 3 + 1))
}

/// Read and parse the balance sheet of one workbook.
pub fn read_statement(path: &Path) -> Result<Statement, EtlError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| EtlError::Workbook {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range(BALANCE_SHEET)
        .map_err(|e| EtlError::Workbook {
            path: path.display().to_string(),
            message: format!("sheet '{}': {}", BALANCE_SHEET, e),
        })?;

    Ok(parse_rows(range.rows()))
}

/// Parse a header row plus data rows into a [`Statement`].
pub fn parse_rows<'a, I>(mut rows: I) -> Statement
where
    I: Iterator<Item = &'a [Data]>,
{
    let Some(header) = rows.next() else {
        return Statement::default();
    };

    let periods: Vec<Option<(i32, i32)>> = header
        .iter()
        .skip(1)
        .map(|cell| {
            let text = cell_to_string(cell);
            let parsed = parse_period_header(&text);
            if parsed.is_none() && !text.trim().is_empty() {
                log::warn!("skipping column with malformed period header '{}'", text);
            }
            parsed
        })
        .collect();

    let mut out_rows = Vec::new();
    for row in rows {
        let Some(first) = row.first() else {
            continue;
        };
        let label = cell_to_string(first).trim().to_string();
        if label.is_empty() {
            continue;
        }

        let mut values: Vec<Option<f64>> = row.iter().skip(1).map(numeric_cell).collect();
        values.resize(periods.len(), None);
        out_rows.push(StatementRow { label, values });
    }

    Statement {
        periods,
        rows: out_rows,
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format!("{}", f),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({:?})", e),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Coerce a cell to a number; blank and non-numeric cells are absent.
fn numeric_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(n) => Some(*n as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement_from(cells: Vec<Vec<Data>>) -> Statement {
        parse_rows(cells.iter().map(|r| r.as_slice()))
    }

    #[test]
    fn test_parse_period_header() {
        assert_eq!(parse_period_header("2024/12"), Some((2024, 4)));
        assert_eq!(parse_period_header("2024/1"), Some((2024, 1)));
        assert_eq!(parse_period_header("2024/3"), Some((2024, 1)));
        assert_eq!(parse_period_header("2024/4"), Some((2024, 2)));
        assert_eq!(parse_period_header("2006/6"), Some((2006, 2)));
        assert_eq!(parse_period_header(" 2023/9 "), Some((2023, 3)));
    }

    #[test]
    fn test_parse_period_header_rejects_malformed() {
        assert_eq!(parse_period_header("2024"), None);
        assert_eq!(parse_period_header("2024/12/31"), None);
        assert_eq!(parse_period_header("Q4 2024"), None);
        assert_eq!(parse_period_header("2024/13"), None);
        assert_eq!(parse_period_header("2024/0"), None);
        assert_eq!(parse_period_header(""), None);
    }

    #[test]
    fn test_parse_rows_basic() {
        let statement = statement_from(vec![
            vec![
                Data::String("Kalem".into()),
                Data::String("2024/12".into()),
                Data::String("2024/9".into()),
            ],
            vec![
                Data::String("Toplam Varlıklar".into()),
                Data::Float(1000.0),
                Data::Float(900.0),
            ],
        ]);

        assert_eq!(statement.periods, vec![Some((2024, 4)), Some((2024, 3))]);
        assert_eq!(statement.rows.len(), 1);
        assert_eq!(statement.rows[0].label, "Toplam Varlıklar");
        assert_eq!(statement.rows[0].values, vec![Some(1000.0), Some(900.0)]);
    }

    #[test]
    fn test_malformed_header_skips_only_that_column() {
        let statement = statement_from(vec![
            vec![
                Data::String("Kalem".into()),
                Data::String("not-a-period".into()),
                Data::String("2024/12".into()),
            ],
            vec![
                Data::String("Toplam Varlıklar".into()),
                Data::Float(5.0),
                Data::Float(1000.0),
            ],
        ]);

        assert_eq!(statement.periods, vec![None, Some((2024, 4))]);
        assert_eq!(statement.rows[0].values, vec![Some(5.0), Some(1000.0)]);
    }

    #[test]
    fn test_blank_and_text_cells_are_absent_not_zero() {
        let statement = statement_from(vec![
            vec![
                Data::String("Kalem".into()),
                Data::String("2024/12".into()),
                Data::String("2024/9".into()),
                Data::String("2024/6".into()),
            ],
            vec![
                Data::String("Toplam Özkaynaklar".into()),
                Data::Empty,
                Data::String("n/a".into()),
                Data::String("750.5".into()),
            ],
        ]);

        assert_eq!(
            statement.rows[0].values,
            vec![None, None, Some(750.5)],
            "blank/non-numeric cells must be absent; numeric strings coerce"
        );
    }

    #[test]
    fn test_labels_trimmed_and_blank_rows_dropped() {
        let statement = statement_from(vec![
            vec![Data::String("Kalem".into()), Data::String("2024/12".into())],
            vec![Data::String("  Toplam Varlıklar ".into()), Data::Int(7)],
            vec![Data::Empty, Data::Float(3.0)],
        ]);

        assert_eq!(statement.rows.len(), 1);
        assert_eq!(statement.rows[0].label, "Toplam Varlıklar");
        assert_eq!(statement.rows[0].values, vec![Some(7.0)]);
    }

    #[test]
    fn test_short_rows_padded_with_absent() {
        let statement = statement_from(vec![
            vec![
                Data::String("Kalem".into()),
                Data::String("2024/12".into()),
                Data::String("2024/9".into()),
            ],
            vec![Data::String("Toplam Varlıklar".into()), Data::Float(1.0)],
        ]);

        assert_eq!(statement.rows[0].values, vec![Some(1.0), None]);
    }
}
