mod chart;
mod loader;
mod stats;
mod tui;
mod types;

use rayon::prelude::*;
use thiserror::Error;

pub use chart::{LABEL_WIDTH, render_bars};
pub use loader::{list_spreadsheets, load, sheet_names};
pub use stats::{
    Bin, CategoricalSummary, ColumnSummary, NumericSummary, bin_values, rank_values,
    summarize_categorical, summarize_numeric,
};
pub use tui::run_tui;
pub use types::{ColumnKind, MISSING_LABEL, Value, classify};

pub const DEFAULT_BIN_COUNT: usize = 10;
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("table has no columns")]
    EmptyTable,
    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An in-memory sheet: named columns over equal-length rows of tagged
/// values. Row order is preserved throughout analysis.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Ragged rows are padded with `Missing` (or truncated) to the header
    /// width so every column has one value per row.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<Value>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, Value::Missing);
        }
        Table { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column(&self, idx: usize) -> Vec<Value> {
        self.rows.iter().map(|row| row[idx].clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub kind: ColumnKind,
    pub summary: ColumnSummary,
    /// Rendered bar-chart lines; empty when there is nothing to chart.
    pub chart: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TableReport {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnReport>,
}

/// Analyzes every column of `table` in table order: classify, summarize,
/// bin or rank, then render the distribution as text bars. Columns are
/// independent, so the per-column work fans out across threads; the output
/// order still mirrors the table.
pub fn analyze(
    table: &Table,
    bin_count: usize,
    top_n: usize,
    max_bar_width: usize,
) -> Result<TableReport, SheetError> {
    if table.column_count() == 0 {
        return Err(SheetError::EmptyTable);
    }

    let columns: Vec<ColumnReport> = (0..table.column_count())
        .into_par_iter()
        .map(|idx| {
            let values = table.column(idx);
            let kind = classify(&values);
            let (summary, entries) = match kind {
                ColumnKind::Numeric => {
                    let numbers = stats::numeric_values(&values);
                    let bins = bin_values(&numbers, bin_count);
                    (
                        ColumnSummary::Numeric(summarize_numeric(&values)),
                        chart::bin_entries(&bins),
                    )
                }
                ColumnKind::Categorical => {
                    let summary = summarize_categorical(&values, top_n);
                    let entries = summary.top.clone();
                    (ColumnSummary::Categorical(summary), entries)
                }
            };
            ColumnReport {
                name: table.headers[idx].clone(),
                kind,
                summary,
                chart: render_bars(&entries, max_bar_width),
            }
        })
        .collect();

    Ok(TableReport {
        row_count: table.row_count(),
        column_count: table.column_count(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: Vec<Vec<Value>>) -> Table {
        Table::new(headers.iter().map(|s| s.to_string()).collect(), rows)
    }

    #[test]
    fn empty_table_is_an_error() {
        let t = table(&[], vec![]);
        assert!(matches!(analyze(&t, 10, 10, 40), Err(SheetError::EmptyTable)));
    }

    #[test]
    fn zero_rows_yield_not_applicable_reports() {
        let t = table(&["a", "b"], vec![]);
        let report = analyze(&t, 10, 10, 40).unwrap();
        assert_eq!(report.row_count, 0);
        assert_eq!(report.column_count, 2);
        for col in &report.columns {
            assert_eq!(col.kind, ColumnKind::Categorical);
            assert!(col.chart.is_empty());
            match &col.summary {
                ColumnSummary::Categorical(s) => {
                    assert_eq!(s.unique_count, 0);
                    assert!(s.top.is_empty());
                }
                ColumnSummary::Numeric(_) => panic!("empty column classified numeric"),
            }
        }
    }

    #[test]
    fn numeric_column_gets_bins_and_summary() {
        let rows = (1..=5).map(|n| vec![Value::Number(n as f64)]).collect();
        let t = table(&["n"], rows);
        let report = analyze(&t, 5, 10, 20).unwrap();
        let col = &report.columns[0];
        assert_eq!(col.kind, ColumnKind::Numeric);
        assert_eq!(col.chart.len(), 5);
        match &col.summary {
            ColumnSummary::Numeric(Some(s)) => {
                assert_eq!((s.min, s.max, s.mean), (1.0, 5.0, 3.0));
                assert!((s.std_dev.unwrap() - 1.5811388300841898).abs() < 1e-12);
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[test]
    fn all_missing_column_reports_missing_bucket() {
        let rows = (0..3).map(|_| vec![Value::Missing]).collect();
        let t = table(&["m"], rows);
        let report = analyze(&t, 10, 10, 20).unwrap();
        let col = &report.columns[0];
        assert_eq!(col.kind, ColumnKind::Categorical);
        match &col.summary {
            ColumnSummary::Categorical(s) => {
                assert_eq!(s.unique_count, 1);
                assert_eq!(s.top, vec![(MISSING_LABEL.to_string(), 3)]);
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[test]
    fn mixed_column_is_ranked_not_binned() {
        let rows = vec![
            vec![Value::Number(1.0)],
            vec![Value::Text("x".to_string())],
            vec![Value::Text("x".to_string())],
        ];
        let t = table(&["mix"], rows);
        let report = analyze(&t, 10, 10, 20).unwrap();
        let col = &report.columns[0];
        assert_eq!(col.kind, ColumnKind::Categorical);
        match &col.summary {
            ColumnSummary::Categorical(s) => {
                assert_eq!(s.top[0], ("x".to_string(), 2));
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[test]
    fn report_preserves_column_order() {
        let rows = vec![vec![Value::Number(1.0), Value::Text("x".to_string())]];
        let t = table(&["first", "second"], rows);
        let report = analyze(&t, 10, 10, 20).unwrap();
        let names: Vec<&str> = report.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn analysis_is_deterministic() {
        let rows = vec![
            vec![Value::Number(1.0), Value::Text("a".to_string())],
            vec![Value::Number(2.0), Value::Text("b".to_string())],
            vec![Value::Missing, Value::Text("a".to_string())],
        ];
        let t = table(&["n", "c"], rows);
        let first = analyze(&t, 10, 10, 30).unwrap();
        let second = analyze(&t, 10, 10, 30).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let t = table(&["a", "b"], vec![vec![Value::Number(1.0)]]);
        assert_eq!(t.rows()[0].len(), 2);
        assert!(t.rows()[0][1].is_missing());
    }
}
