use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use super::model::{Cell, ColumnKey, Demographic, SurveyTable};

/// Cell contents treated as "no answer".
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null", "None", "#N/A"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected two header rows (section, field), found {0}")]
    MissingHeader(usize),
    #[error("column {0} has no section name")]
    EmptySection(usize),
    #[error("duplicate column {0}")]
    DuplicateColumn(ColumnKey),
    #[error("required demographic column 基本資料 / {0} is missing")]
    MissingDemographic(&'static str),
    #[error("data row {row} has {found} fields but the header has {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a survey export from disk.
pub fn load_file(path: &Path) -> Result<SurveyTable, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_bytes(&bytes)
}

/// Parse a CSV export whose first two rows are the section and field headers.
///
/// ```text
/// 基本資料,基本資料,基本資料,滿意度,滿意度,回饋
/// 班級,學系,年級,課程內容,教學方式,建議
/// A,CS,1,4,5,很好
/// ```
///
/// Blank section cells inherit the section to their left, which is how
/// spreadsheet tools export merged header cells.
pub fn load_bytes(bytes: &[u8]) -> Result<SurveyTable, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();
    let section_row = match records.next() {
        Some(r) => r?,
        None => return Err(LoadError::MissingHeader(0)),
    };
    let field_row = match records.next() {
        Some(r) => r?,
        None => return Err(LoadError::MissingHeader(1)),
    };

    let columns = build_column_keys(&section_row, &field_row)?;
    for demo in Demographic::ALL {
        if !columns.contains(&demo.key()) {
            return Err(LoadError::MissingDemographic(demo.field()));
        }
    }

    // Raw trimmed text first, typed per column afterwards.
    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for (row_no, record) in records.enumerate() {
        let record = record?;
        if record.len() > columns.len() {
            return Err(LoadError::RaggedRow {
                row: row_no + 1,
                found: record.len(),
                expected: columns.len(),
            });
        }
        // The csv crate yields a single empty field for blank lines.
        if record.len() <= 1 && record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let mut row: Vec<Option<String>> = record.iter().map(normalize).collect();
        row.resize(columns.len(), None);
        raw_rows.push(row);
    }

    let numeric: Vec<bool> = columns
        .iter()
        .enumerate()
        .map(|(idx, key)| !key.is_demographic() && column_is_numeric(&raw_rows, idx))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&numeric)
                .map(|(value, &is_numeric)| type_cell(value, is_numeric))
                .collect()
        })
        .collect();

    Ok(SurveyTable::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_column_keys(
    section_row: &csv::StringRecord,
    field_row: &csv::StringRecord,
) -> Result<Vec<ColumnKey>, LoadError> {
    let width = section_row.len().max(field_row.len());
    let mut columns = Vec::with_capacity(width);
    let mut seen = HashSet::with_capacity(width);
    let mut current_section: Option<String> = None;

    for idx in 0..width {
        let section = section_row.get(idx).unwrap_or("").trim();
        if !section.is_empty() {
            current_section = Some(section.to_string());
        }
        let section = current_section
            .clone()
            .ok_or(LoadError::EmptySection(idx))?;
        // Blank field cells (often trailing spreadsheet columns) get a
        // positional name so they stay distinct.
        let field = match field_row.get(idx).unwrap_or("").trim() {
            "" => format!("Unnamed: {idx}"),
            field => field.to_string(),
        };

        let key = ColumnKey::new(section, field);
        if !seen.insert(key.clone()) {
            return Err(LoadError::DuplicateColumn(key));
        }
        columns.push(key);
    }
    Ok(columns)
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn column_is_numeric(rows: &[Vec<Option<String>>], idx: usize) -> bool {
    rows.iter()
        .filter_map(|row| row[idx].as_deref())
        .all(|v| v.parse::<f64>().is_ok())
}

fn type_cell(value: Option<String>, numeric: bool) -> Cell {
    match value {
        None => Cell::Missing,
        Some(v) if numeric => v.parse::<f64>().map(Cell::Number).unwrap_or(Cell::Text(v)),
        Some(v) => Cell::Text(v),
    }
}
