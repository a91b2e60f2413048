use super::model::SurveyTable;

/// Section name → field names, in first-seen column order.
/// The demographic section is never listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<(String, Vec<String>)>,
}

impl SectionMap {
    /// Walk the columns once, appending each field to its section the first
    /// time it is seen.
    pub fn from_table(table: &SurveyTable) -> Self {
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();
        for key in table.columns() {
            if key.is_demographic() {
                continue;
            }
            let idx = match entries.iter().position(|(s, _)| *s == key.section) {
                Some(idx) => idx,
                None => {
                    entries.push((key.section.clone(), Vec::new()));
                    entries.len() - 1
                }
            };
            let fields = &mut entries[idx].1;
            if !fields.contains(&key.field) {
                fields.push(key.field.clone());
            }
        }
        SectionMap { entries }
    }

    /// Section names in first-seen order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    pub fn fields(&self, section: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(s, _)| s == section)
            .map(|(_, f)| f.as_slice())
    }

    pub fn contains(&self, section: &str) -> bool {
        self.fields(section).is_some()
    }

    pub fn first_section(&self) -> Option<&str> {
        self.entries.first().map(|(s, _)| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::{ColumnKey, Demographic};

    fn table_with(columns: Vec<ColumnKey>) -> SurveyTable {
        SurveyTable::new(columns, Vec::new())
    }

    #[test]
    fn groups_fields_by_section_in_first_seen_order() {
        let table = table_with(vec![
            Demographic::Class.key(),
            ColumnKey::new("滿意度", "內容"),
            ColumnKey::new("回饋", "建議"),
            Demographic::Grade.key(),
            ColumnKey::new("滿意度", "方式"),
        ]);
        let map = SectionMap::from_table(&table);

        assert_eq!(map.sections().collect::<Vec<_>>(), vec!["滿意度", "回饋"]);
        assert_eq!(map.fields("滿意度").unwrap(), ["內容", "方式"]);
        assert_eq!(map.fields("回饋").unwrap(), ["建議"]);
        assert!(!map.contains("基本資料"));
        assert_eq!(map.first_section(), Some("滿意度"));
    }

    #[test]
    fn is_deterministic() {
        let table = table_with(vec![
            ColumnKey::new("b", "2"),
            ColumnKey::new("a", "1"),
            ColumnKey::new("b", "1"),
        ]);
        assert_eq!(SectionMap::from_table(&table), SectionMap::from_table(&table));
    }

    #[test]
    fn reordering_changes_position_not_presence() {
        let forward = SectionMap::from_table(&table_with(vec![
            ColumnKey::new("s", "x"),
            ColumnKey::new("s", "y"),
        ]));
        let backward = SectionMap::from_table(&table_with(vec![
            ColumnKey::new("s", "y"),
            ColumnKey::new("s", "x"),
        ]));
        assert_eq!(forward.fields("s").unwrap(), ["x", "y"]);
        assert_eq!(backward.fields("s").unwrap(), ["y", "x"]);
    }

    #[test]
    fn demographic_only_table_yields_empty_map() {
        let table = table_with(Demographic::ALL.iter().map(|d| d.key()).collect());
        let map = SectionMap::from_table(&table);
        assert!(map.is_empty());
        assert_eq!(map.first_section(), None);
        assert!(SectionMap::from_table(&table_with(Vec::new())).is_empty());
    }
}
