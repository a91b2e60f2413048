use crate::data::model::{Cell, ColumnKey, SurveyTable};

/// Columns of one section split by the type of their (filtered) values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGroup {
    pub numeric: Vec<ColumnKey>,
    pub text: Vec<ColumnKey>,
}

/// Classify the section's fields against the filtered table.
///
/// A column is numeric when it has at least one answer and every answer is a
/// number. A column with no answers at all is text: there is nothing to
/// average.
pub fn classify_columns(table: &SurveyTable, section: &str, fields: &[String]) -> ColumnGroup {
    let mut group = ColumnGroup::default();
    for field in fields {
        let key = ColumnKey::new(section, field.as_str());
        if is_numeric(table, &key) {
            group.numeric.push(key);
        } else {
            group.text.push(key);
        }
    }
    group
}

fn is_numeric(table: &SurveyTable, key: &ColumnKey) -> bool {
    let mut answered = table.column(key).filter(|c| !c.is_missing()).peekable();
    answered.peek().is_some() && answered.all(|c| matches!(c, Cell::Number(_)))
}
