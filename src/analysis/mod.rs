/// Analysis layer: everything between the filtered table and the charts.
///
/// ```text
///   SurveyTable ──filter──► filtered SurveyTable
///                                 │
///                             classify (section fields)
///                      ┌──────────┴──────────┐
///                   numeric                 text
///                      │               ┌─────┴──────┐
///                    radar            pie      word frequency → cloud
/// ```
///
/// [`render`] runs the whole chain and never fails: every "nothing to show"
/// case becomes a [`Notice`].
pub mod classify;
pub mod cloud;
pub mod pie;
pub mod radar;
pub mod text;

use crate::config::Settings;
use crate::data::filter::{apply_filters, FilterSelection};
use crate::data::model::SurveyTable;
use crate::data::sections::SectionMap;

use classify::{classify_columns, ColumnGroup};
use pie::PieOutcome;
use radar::RadarChart;
use text::{Tokenizer, WordCloudOutcome};

/// Informational "nothing to show" states.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    NoMatchingRows,
    UnknownSection(String),
    NoNumericData,
    TooManyCategories { field: String, distinct: usize },
    NoAnswers { field: String },
    InsufficientText,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::NoMatchingRows => write!(f, "沒有符合篩選條件的資料。"),
            Notice::UnknownSection(s) => write!(f, "找不到主題區塊「{s}」。"),
            Notice::NoNumericData => write!(f, "此區塊沒有數值欄位，略過雷達圖。"),
            Notice::TooManyCategories { field, distinct } => {
                write!(f, "「{field}」有 {distinct} 種回答，類別過多，略過圓餅圖。")
            }
            Notice::NoAnswers { field } => write!(f, "「{field}」沒有任何回答。"),
            Notice::InsufficientText => write!(f, "{}", text::INSUFFICIENT_TEXT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarView {
    pub title: String,
    pub chart: RadarChart,
}

/// Everything the UI needs to draw one section.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub section: String,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub group: ColumnGroup,
    pub radar: Option<RadarView>,
    pub pies: Vec<PieOutcome>,
    /// `None` when the section has no text columns.
    pub word_cloud: Option<WordCloudOutcome>,
    pub notices: Vec<Notice>,
}

/// Filter the table, classify the section's columns and build every chart.
pub fn render(
    table: &SurveyTable,
    sections: &SectionMap,
    filters: &FilterSelection,
    section: &str,
    tokenizer: &dyn Tokenizer,
    settings: &Settings,
) -> ViewModel {
    let filtered = apply_filters(table, filters);
    let mut notices = Vec::new();
    if filtered.is_empty() {
        notices.push(Notice::NoMatchingRows);
    }

    let fields: &[String] = match sections.fields(section) {
        Some(fields) => fields,
        None => {
            notices.push(Notice::UnknownSection(section.to_string()));
            &[]
        }
    };
    let group = classify_columns(&filtered, section, fields);
    log::debug!(
        "Rendering section {section:?}: {}/{} rows, {} numeric, {} text columns",
        filtered.len(),
        table.len(),
        group.numeric.len(),
        group.text.len()
    );

    let radar = radar::radar_chart(&filtered, &group.numeric).map(|chart| RadarView {
        title: radar::radar_title(section),
        chart,
    });
    if radar.is_none() {
        notices.push(Notice::NoNumericData);
    }

    let pies = pie::pie_charts(&filtered, &group.text, settings.max_pie_categories);
    for outcome in &pies {
        match outcome {
            PieOutcome::Skipped { title, distinct } => notices.push(Notice::TooManyCategories {
                field: title.clone(),
                distinct: *distinct,
            }),
            PieOutcome::NoAnswers { title } => notices.push(Notice::NoAnswers {
                field: title.clone(),
            }),
            PieOutcome::Pie { .. } => {}
        }
    }

    let word_cloud = if group.text.is_empty() {
        None
    } else {
        let freq = text::word_frequency(&filtered, &group.text, tokenizer);
        log::debug!("{} distinct tokens in section {section:?}", freq.len());
        let outcome = text::word_cloud(&freq, settings.cloud_max_words, settings.top_words);
        if outcome == WordCloudOutcome::InsufficientText {
            notices.push(Notice::InsufficientText);
        }
        Some(outcome)
    };

    ViewModel {
        section: section.to_string(),
        total_rows: table.len(),
        filtered_rows: filtered.len(),
        group,
        radar,
        pies,
        word_cloud,
        notices,
    }
}
