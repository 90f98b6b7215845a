use crate::{SheetError, Table, Value};
use calamine::{Data, Reader, open_workbook_auto};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

const EXTENSIONS: [&str; 6] = ["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

fn load_err(path: &Path, reason: impl Display) -> SheetError {
    SheetError::Load {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Spreadsheet files under `dir`, sorted by name. The directory is created
/// when absent so a first run has somewhere to drop files into.
pub fn list_spreadsheets(dir: &Path) -> Result<Vec<PathBuf>, SheetError> {
    fs::create_dir_all(dir)?;
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Sheet names in workbook order. A CSV file exposes a single pseudo-sheet
/// named after the file stem.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, SheetError> {
    if is_csv(path) {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("data")
            .to_string();
        return Ok(vec![stem]);
    }
    let workbook = open_workbook_auto(path).map_err(|e| load_err(path, e))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Loads one sheet into a `Table`. The first row is the header row; every
/// cell is tagged exactly once here so analysis never re-parses strings.
pub fn load(path: &Path, sheet: &str) -> Result<Table, SheetError> {
    if is_csv(path) {
        return load_csv(path);
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| load_err(path, e))?;
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| load_err(path, e))?;

    let mut rows_iter = range.rows();
    let headers = match rows_iter.next() {
        Some(row) => row
            .iter()
            .enumerate()
            .map(|(i, cell)| header_label(cell, i))
            .collect(),
        None => Vec::new(),
    };

    let rows: Vec<Vec<Value>> = rows_iter
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

fn load_csv(path: &Path) -> Result<Table, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| load_err(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| load_err(path, e))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if h.trim().is_empty() {
                format!("column{}", i + 1)
            } else {
                h.trim().to_string()
            }
        })
        .collect();

    let rows: Vec<Vec<Value>> = reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| load_err(path, e))?;
            Ok(record.iter().map(Value::parse).collect::<Vec<Value>>())
        })
        .collect::<Result<_, SheetError>>()?;

    Ok(Table::new(headers, rows))
}

fn header_label(cell: &Data, idx: usize) -> String {
    let label = cell.to_string();
    let label = label.trim();
    if label.is_empty() {
        format!("column{}", idx + 1)
    } else {
        label.to_string()
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Missing,
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) if f.is_finite() => Value::Number(*f),
        Data::Float(_) => Value::Missing,
        Data::Bool(b) => Value::Text(b.to_string()),
        // Excel serial number; good enough for binning and ranking.
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::String(s) => Value::parse(s),
    }
}
