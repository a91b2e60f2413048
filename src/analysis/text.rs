use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use jieba_rs::Jieba;

use crate::data::model::{ColumnKey, SurveyTable};

// ---------------------------------------------------------------------------
// Tokenizers
// ---------------------------------------------------------------------------

/// Splits free text into words.
pub trait Tokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

/// Chinese segmentation backed by jieba's bundled dictionary.
pub struct JiebaTokenizer {
    jieba: Jieba,
}

impl JiebaTokenizer {
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }

    /// Add user-supplied words (e.g. course names written in traditional
    /// characters) on top of the bundled dictionary.
    pub fn with_user_dictionary(path: &Path) -> Result<Self> {
        let mut tokenizer = Self::new();
        let file = File::open(path)
            .with_context(|| format!("opening user dictionary {}", path.display()))?;
        tokenizer
            .jieba
            .load_dict(&mut BufReader::new(file))
            .with_context(|| format!("loading user dictionary {}", path.display()))?;
        Ok(tokenizer)
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for JiebaTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(self.jieba.cut(text, true).into_iter())
    }
}

/// Splits on whitespace; for pre-segmented or non-CJK answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(text.split_whitespace())
    }
}

// ---------------------------------------------------------------------------
// Word frequency
// ---------------------------------------------------------------------------

/// Token counts that remember the order in which tokens first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl WordFrequency {
    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.counts.len());
                self.counts.push((token.to_string(), 1));
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).map(|&i| self.counts[i].1)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tokens in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// The `n` most frequent tokens; ties keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.counts.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

/// Single characters (and blanks left over after trimming) are noise.
fn is_countable(token: &str) -> bool {
    token.chars().count() > 1
}

/// Tokenize every answer of every text column into one frequency map.
pub fn word_frequency(
    table: &SurveyTable,
    columns: &[ColumnKey],
    tokenizer: &dyn Tokenizer,
) -> WordFrequency {
    let mut freq = WordFrequency::default();
    for key in columns {
        for cell in table.column(key).filter(|c| !c.is_missing()) {
            let text = cell.to_string();
            for token in tokenizer.tokenize(&text) {
                let token = token.trim();
                if is_countable(token) {
                    freq.add(token);
                }
            }
        }
    }
    freq
}

// ---------------------------------------------------------------------------
// Word cloud outcome
// ---------------------------------------------------------------------------

/// Notice shown when nothing survives tokenization.
pub const INSUFFICIENT_TEXT: &str = "沒有足夠文字資料可產出文字雲。";

#[derive(Debug, Clone, PartialEq)]
pub enum WordCloudOutcome {
    InsufficientText,
    Ready {
        /// Words for the cloud, most frequent first.
        frequencies: Vec<(String, usize)>,
        /// Rows of the frequency table.
        top: Vec<(String, usize)>,
    },
}

pub fn word_cloud(freq: &WordFrequency, max_words: usize, top_n: usize) -> WordCloudOutcome {
    if freq.is_empty() {
        return WordCloudOutcome::InsufficientText;
    }
    WordCloudOutcome::Ready {
        frequencies: freq.most_common(max_words),
        top: freq.most_common(top_n),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::Cell;

    /// Deterministic stand-in for a segmenter: splits on a fixed vocabulary.
    struct VocabularyTokenizer(&'static [&'static str]);

    impl Tokenizer for VocabularyTokenizer {
        fn tokenize<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
            let vocab = self.0;
            let mut tokens = Vec::new();
            let mut rest = text;
            while !rest.is_empty() {
                let len = vocab
                    .iter()
                    .find(|w| rest.starts_with(**w))
                    .map(|w| w.len())
                    .unwrap_or_else(|| rest.chars().next().map_or(1, char::len_utf8));
                tokens.push(&rest[..len]);
                rest = &rest[len..];
            }
            Box::new(tokens.into_iter())
        }
    }

    fn text_table(values: &[Option<&str>]) -> (SurveyTable, ColumnKey) {
        let key = ColumnKey::new("回饋", "心得");
        let rows = values
            .iter()
            .map(|v| vec![v.map_or(Cell::Missing, |s| Cell::Text(s.to_string()))])
            .collect();
        (SurveyTable::new(vec![key.clone()], rows), key)
    }

    #[test]
    fn counts_shared_words_across_rows() {
        let (table, key) = text_table(&[Some("我喜歡程式設計"), Some("程式設計很有趣"), None]);
        let tokenizer = VocabularyTokenizer(&["喜歡", "程式設計", "有趣"]);
        let freq = word_frequency(&table, &[key], &tokenizer);

        assert_eq!(freq.get("程式設計"), Some(2));
        assert_eq!(freq.get("喜歡"), Some(1));
        assert_eq!(freq.get("我"), None);
        assert_eq!(freq.get("很"), None);
        assert_eq!(
            freq.iter().collect::<Vec<_>>(),
            vec![("喜歡", 1), ("程式設計", 2), ("有趣", 1)]
        );
    }

    #[test]
    fn most_common_breaks_ties_by_first_seen() {
        let mut freq = WordFrequency::default();
        for t in ["乙乙", "甲甲", "丙丙", "甲甲", "乙乙", "丁丁"] {
            freq.add(t);
        }
        assert_eq!(
            freq.most_common(3),
            vec![
                ("乙乙".to_string(), 2),
                ("甲甲".to_string(), 2),
                ("丙丙".to_string(), 1)
            ]
        );
    }

    #[test]
    fn empty_frequency_is_insufficient() {
        let (table, key) = text_table(&[Some("好"), Some("a b c")]);
        let freq = word_frequency(&table, &[key], &WhitespaceTokenizer);
        assert!(freq.is_empty());
        assert_eq!(word_cloud(&freq, 200, 20), WordCloudOutcome::InsufficientText);
    }

    #[test]
    fn top_table_is_capped() {
        let mut freq = WordFrequency::default();
        for i in 0..30 {
            freq.add(&format!("w{i:02}"));
        }
        let WordCloudOutcome::Ready { frequencies, top } = word_cloud(&freq, 25, 20) else {
            panic!("expected a cloud");
        };
        assert_eq!(frequencies.len(), 25);
        assert_eq!(top.len(), 20);
        assert_eq!(top[0].0, "w00");
    }

    #[test]
    fn jieba_segments_simplified_chinese() {
        let tokenizer = JiebaTokenizer::new();
        let tokens: Vec<&str> = tokenizer.tokenize("我们中出了一个叛徒").collect();
        assert_eq!(tokens.concat(), "我们中出了一个叛徒");
        assert!(tokens.iter().any(|t| t.chars().count() > 1));
    }

    #[test]
    fn jieba_counts_traditional_feedback_deterministically() {
        let answers = [Some("我喜歡程式設計"), Some("程式設計很有趣")];
        let (table, key) = text_table(&answers);

        let tokenizer = JiebaTokenizer::new();
        for answer in answers.into_iter().flatten() {
            assert_eq!(tokenizer.tokenize(answer).collect::<String>(), answer);
        }

        let first = word_frequency(&table, &[key.clone()], &tokenizer);
        let again = word_frequency(&table, &[key], &JiebaTokenizer::new());
        assert_eq!(first, again);
        assert!(!first.is_empty());
        assert!(first.iter().all(|(t, _)| t.chars().count() > 1));
        assert_eq!(word_cloud(&first, 200, 20), word_cloud(&again, 200, 20));
    }

    #[test]
    fn user_dictionary_errors_are_reported() {
        let err = JiebaTokenizer::with_user_dictionary(Path::new("/no/such/dict.txt"))
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("opening user dictionary"));
    }

    proptest! {
        #[test]
        fn single_character_tokens_never_counted(text in "[ab甲乙 ]{0,40}") {
            let (table, key) = text_table(&[Some(text.as_str())]);
            let freq = word_frequency(&table, &[key], &WhitespaceTokenizer);
            prop_assert!(freq.iter().all(|(t, _)| t.chars().count() > 1));

            let vocab = VocabularyTokenizer(&["ab", "甲乙"]);
            let (table, key) = text_table(&[Some(text.as_str())]);
            let freq = word_frequency(&table, &[key], &vocab);
            prop_assert!(freq.iter().all(|(t, _)| t.chars().count() > 1));
        }
    }
}
