use std::fmt;

// ---------------------------------------------------------------------------
// Reserved demographic section
// ---------------------------------------------------------------------------

/// Section holding the respondent's demographics. Used for filtering only.
pub const DEMOGRAPHIC_SECTION: &str = "基本資料";

/// The three demographic fields every survey export must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Demographic {
    Class,
    Department,
    Grade,
}

impl Demographic {
    pub const ALL: [Demographic; 3] = [
        Demographic::Class,
        Demographic::Department,
        Demographic::Grade,
    ];

    /// Field name as it appears in the second header row.
    pub fn field(self) -> &'static str {
        match self {
            Demographic::Class => "班級",
            Demographic::Department => "學系",
            Demographic::Grade => "年級",
        }
    }

    /// Label for the filter widget.
    pub fn filter_label(self) -> &'static str {
        match self {
            Demographic::Class => "過濾班級",
            Demographic::Department => "過濾學系",
            Demographic::Grade => "過濾年級",
        }
    }

    pub fn key(self) -> ColumnKey {
        ColumnKey::new(DEMOGRAPHIC_SECTION, self.field())
    }
}

// ---------------------------------------------------------------------------
// ColumnKey – (section, field) pair from the two header rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey {
    pub section: String,
    pub field: String,
}

impl ColumnKey {
    pub fn new(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            field: field.into(),
        }
    }

    pub fn is_demographic(&self) -> bool {
        self.section == DEMOGRAPHIC_SECTION
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.section, self.field)
    }
}

// ---------------------------------------------------------------------------
// Cell – a single answer
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Column typing is decided once at load time,
/// so a column holds either `Number` or `Text` cells (plus `Missing`).
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            // Integral scores print without a trailing ".0".
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Missing => write!(f, "<missing>"),
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyTable – the complete loaded export
// ---------------------------------------------------------------------------

/// Row-major table keyed by two-level column headers.
///
/// Never mutated after loading; filtering builds a new table.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyTable {
    columns: Vec<ColumnKey>,
    rows: Vec<Vec<Cell>>,
}

impl SurveyTable {
    /// Build a table. Every row must have one cell per column.
    pub fn new(columns: Vec<ColumnKey>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, key: &ColumnKey) -> Option<usize> {
        self.columns.iter().position(|c| c == key)
    }

    /// Iterate the cells of one column; empty when the key is unknown.
    pub fn column<'a>(&'a self, key: &ColumnKey) -> impl Iterator<Item = &'a Cell> + 'a {
        let idx = self.column_index(key);
        self.rows
            .iter()
            .filter_map(move |row| idx.map(|i| &row[i]))
    }

    /// Same columns, subset of rows.
    pub fn with_rows(&self, rows: Vec<Vec<Cell>>) -> Self {
        Self::new(self.columns.clone(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup_by_key() {
        let table = SurveyTable::new(
            vec![Demographic::Class.key(), ColumnKey::new("滿意度", "整體")],
            vec![
                vec![Cell::Text("A".into()), Cell::Number(4.0)],
                vec![Cell::Text("B".into()), Cell::Missing],
            ],
        );
        let scores: Vec<_> = table.column(&ColumnKey::new("滿意度", "整體")).collect();
        assert_eq!(scores, vec![&Cell::Number(4.0), &Cell::Missing]);
        assert_eq!(table.column(&ColumnKey::new("x", "y")).count(), 0);
    }

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Cell::Number(5.0).to_string(), "5");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
    }
}
