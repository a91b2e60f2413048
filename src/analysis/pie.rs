use std::collections::HashMap;

use crate::data::model::{ColumnKey, SurveyTable};

/// Default cap on distinct answers for a pie chart.
pub const MAX_PIE_CATEGORIES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the answered rows, 0–100.
    pub percent: f64,
}

impl PieSlice {
    /// One-decimal percentage label, e.g. `"33.3%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PieOutcome {
    Pie {
        title: String,
        slices: Vec<PieSlice>,
    },
    /// Too many distinct answers to chart.
    Skipped { title: String, distinct: usize },
    /// Every answer is missing.
    NoAnswers { title: String },
}

impl PieOutcome {
    pub fn title(&self) -> &str {
        match self {
            PieOutcome::Pie { title, .. }
            | PieOutcome::Skipped { title, .. }
            | PieOutcome::NoAnswers { title } => title,
        }
    }
}

/// Count values in descending frequency; ties keep first-occurrence order.
pub fn value_counts(values: impl IntoIterator<Item = String>) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    // Stable sort keeps insertion order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Build the pie (or the reason there is none) for one categorical column.
pub fn pie_chart(table: &SurveyTable, key: &ColumnKey, max_categories: usize) -> PieOutcome {
    let title = key.field.clone();
    let counts = value_counts(
        table
            .column(key)
            .filter(|c| !c.is_missing())
            .map(|c| c.to_string()),
    );

    if counts.is_empty() {
        return PieOutcome::NoAnswers { title };
    }
    if counts.len() > max_categories {
        return PieOutcome::Skipped {
            title,
            distinct: counts.len(),
        };
    }

    let total: usize = counts.iter().map(|(_, c)| c).sum();
    let slices = counts
        .into_iter()
        .map(|(label, count)| PieSlice {
            label,
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect();
    PieOutcome::Pie { title, slices }
}

/// Pie outcomes for every categorical column, in group order.
pub fn pie_charts(
    table: &SurveyTable,
    text: &[ColumnKey],
    max_categories: usize,
) -> Vec<PieOutcome> {
    text.iter()
        .map(|key| pie_chart(table, key, max_categories))
        .collect()
}
