use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::text::{JiebaTokenizer, Tokenizer};
use crate::analysis::{render, ViewModel};
use crate::config::Settings;
use crate::data::filter::{filter_options, FilterSelection};
use crate::data::loader::load_file;
use crate::data::model::{Demographic, SurveyTable};
use crate::data::sections::SectionMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Loaded survey (None until user loads a file). Never mutated.
    pub table: Option<SurveyTable>,

    /// Section → fields of the loaded survey.
    pub sections: SectionMap,

    /// Distinct values offered by each demographic filter.
    pub filter_options: BTreeMap<Demographic, Vec<String>>,

    /// Currently selected section.
    pub section: Option<String>,

    /// Accepted demographic values.
    pub filters: FilterSelection,

    /// Charts for the current inputs, rebuilt when `dirty`.
    pub view: Option<ViewModel>,
    dirty: bool,

    tokenizer: Box<dyn Tokenizer>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set when no CJK font could be installed.
    pub font_warning: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let tokenizer: Box<dyn Tokenizer> = match &settings.user_dictionary {
            Some(path) => match JiebaTokenizer::with_user_dictionary(path) {
                Ok(t) => Box::new(t),
                Err(e) => {
                    log::warn!("{e:#}; falling back to the bundled dictionary");
                    Box::new(JiebaTokenizer::new())
                }
            },
            None => Box::new(JiebaTokenizer::new()),
        };
        Self::with_tokenizer(settings, tokenizer)
    }

    pub fn with_tokenizer(settings: Settings, tokenizer: Box<dyn Tokenizer>) -> Self {
        Self {
            settings,
            table: None,
            sections: SectionMap::default(),
            filter_options: BTreeMap::new(),
            section: None,
            filters: FilterSelection::default(),
            view: None,
            dirty: false,
            tokenizer,
            status_message: None,
            font_warning: None,
        }
    }

    /// Load a survey export from disk and make it current.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let table = load_file(path).with_context(|| format!("loading {}", path.display()))?;
        log::info!(
            "Loaded {} rows, {} columns from {}",
            table.len(),
            table.columns().len(),
            path.display()
        );
        self.set_table(table);
        Ok(())
    }

    /// Ingest a newly loaded table, reset section and filters.
    pub fn set_table(&mut self, table: SurveyTable) {
        self.sections = SectionMap::from_table(&table);
        self.filter_options = filter_options(&table);
        self.section = self.sections.first_section().map(str::to_owned);
        self.filters = FilterSelection::default();
        log::info!(
            "Sections: {:?}",
            self.sections.sections().collect::<Vec<_>>()
        );

        self.table = Some(table);
        self.status_message = None;
        self.dirty = true;
    }

    pub fn select_section(&mut self, section: &str) {
        if self.section.as_deref() != Some(section) && self.sections.contains(section) {
            self.section = Some(section.to_string());
            self.dirty = true;
        }
    }

    /// Toggle a single value in a demographic filter.
    pub fn toggle_filter_value(&mut self, field: Demographic, value: &str) {
        self.filters.toggle(field, value);
        self.dirty = true;
    }

    /// Drop a demographic filter (accept every value).
    pub fn clear_filter(&mut self, field: Demographic) {
        if !self.filters.accepted(field).is_empty() {
            self.filters.accepted_mut(field).clear();
            self.dirty = true;
        }
    }

    /// Recompute the view model if any input changed since the last call.
    pub fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.view = match (&self.table, &self.section) {
            (Some(table), Some(section)) => Some(render(
                table,
                &self.sections,
                &self.filters,
                section,
                self.tokenizer.as_ref(),
                &self.settings,
            )),
            _ => None,
        };
    }
}
