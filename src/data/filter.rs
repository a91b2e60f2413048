use std::collections::{BTreeMap, BTreeSet};

use super::model::{Demographic, SurveyTable};

// ---------------------------------------------------------------------------
// Filter predicate: which demographic values are accepted
// ---------------------------------------------------------------------------

/// Accepted values for the three demographic fields.
/// An empty set means "no filter" for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub class: BTreeSet<String>,
    pub department: BTreeSet<String>,
    pub grade: BTreeSet<String>,
}

impl FilterSelection {
    pub fn accepted(&self, field: Demographic) -> &BTreeSet<String> {
        match field {
            Demographic::Class => &self.class,
            Demographic::Department => &self.department,
            Demographic::Grade => &self.grade,
        }
    }

    pub fn accepted_mut(&mut self, field: Demographic) -> &mut BTreeSet<String> {
        match field {
            Demographic::Class => &mut self.class,
            Demographic::Department => &mut self.department,
            Demographic::Grade => &mut self.grade,
        }
    }

    /// Whether no field constrains the rows.
    pub fn is_identity(&self) -> bool {
        Demographic::ALL.iter().all(|&f| self.accepted(f).is_empty())
    }

    /// Toggle a single value in a field's accepted set.
    pub fn toggle(&mut self, field: Demographic, value: &str) {
        let accepted = self.accepted_mut(field);
        if !accepted.remove(value) {
            accepted.insert(value.to_string());
        }
    }
}

/// Return a new table holding only the rows that pass every active filter.
///
/// A row passes a field's filter when:
/// * the accepted set is empty → passes (no constraint)
/// * the row's trimmed value is in the accepted set → passes
/// * the value is missing → fails
pub fn apply_filters(table: &SurveyTable, selection: &FilterSelection) -> SurveyTable {
    if selection.is_identity() {
        return table.clone();
    }

    let active: Vec<(usize, &BTreeSet<String>)> = Demographic::ALL
        .iter()
        .filter(|&&f| !selection.accepted(f).is_empty())
        .filter_map(|&f| {
            table
                .column_index(&f.key())
                .map(|idx| (idx, selection.accepted(f)))
        })
        .collect();

    let rows = table
        .rows()
        .iter()
        .filter(|row| {
            active.iter().all(|(idx, accepted)| {
                row[*idx]
                    .as_text()
                    .is_some_and(|v| accepted.contains(v.trim()))
            })
        })
        .cloned()
        .collect();

    table.with_rows(rows)
}

/// Sorted distinct non-missing values of each demographic field, used to
/// populate the multi-select widgets.
pub fn filter_options(table: &SurveyTable) -> BTreeMap<Demographic, Vec<String>> {
    Demographic::ALL
        .iter()
        .map(|&field| {
            let values: BTreeSet<String> = table
                .column(&field.key())
                .filter(|c| !c.is_missing())
                .map(|c| c.to_string().trim().to_string())
                .collect();
            (field, values.into_iter().collect())
        })
        .collect()
}
