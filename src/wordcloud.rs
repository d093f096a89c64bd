//! Word weights for a text column's corpus.
//!
//! Tokenising follows the usual word-cloud conventions: runs of word
//! characters (apostrophes allowed after the first character), English stop
//! words removed, possessive `'s` stripped, bare numbers dropped, case
//! variants folded under their most frequent spelling and simple plurals
//! folded into their singular.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub const MAX_WORDS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordCloudError {
    #[error("no valid data for word cloud")]
    EmptyCorpus,
    #[error("not enough words for word cloud")]
    NoWords,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordWeight {
    pub word: String,
    pub count: usize,
    /// `count` relative to the most frequent word, in `(0, 1]`.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloud {
    /// Heaviest first; ties keep first-seen order.
    pub words: Vec<WordWeight>,
}

impl WordCloud {
    pub fn weight_of(&self, word: &str) -> Option<f64> {
        self.words
            .iter()
            .find(|entry| entry.word == word)
            .map(|entry| entry.weight)
    }
}

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves",
    "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd", "she'll", "she's",
    "should", "shouldn't", "since", "so", "some", "such", "than", "that", "that's", "the",
    "their", "theirs", "them", "themselves", "then", "there", "there's", "therefore", "these",
    "they", "they'd", "they'll", "they're", "they've", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've",
    "were", "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while",
    "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "www", "you",
    "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

fn stopwords() -> &'static HashSet<&'static str> {
    static STOPWORD_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOPWORD_SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

fn word_pattern() -> &'static Regex {
    static WORD_PATTERN: OnceLock<Regex> = OnceLock::new();
    WORD_PATTERN.get_or_init(|| Regex::new(r"\w[\w']+").expect("word pattern is valid"))
}

/// Builds word weights from `corpus`.
pub fn generate(corpus: &str) -> Result<WordCloud, WordCloudError> {
    if corpus.trim().is_empty() {
        return Err(WordCloudError::EmptyCorpus);
    }

    let tokens = tokenize(corpus);
    let counts = fold_variants(&tokens);
    if counts.is_empty() {
        return Err(WordCloudError::NoWords);
    }

    let ranked = counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(MAX_WORDS)
        .collect::<Vec<_>>();
    let max_count = ranked.first().map(|(_, count)| *count).unwrap_or(1) as f64;
    let words = ranked
        .into_iter()
        .map(|(word, count)| WordWeight {
            word,
            count,
            weight: count as f64 / max_count,
        })
        .collect();
    Ok(WordCloud { words })
}

fn tokenize(corpus: &str) -> Vec<String> {
    let stop = stopwords();
    word_pattern()
        .find_iter(corpus)
        .map(|m| m.as_str())
        .filter(|word| !stop.contains(word.to_lowercase().as_str()))
        .map(|word| {
            if word.to_lowercase().ends_with("'s") {
                word[..word.len() - 2].to_string()
            } else {
                word.to_string()
            }
        })
        .filter(|word| !word.chars().all(char::is_numeric))
        .collect()
}

/// Spellings of one lowercase word, in first-seen order.
struct Variants {
    key: String,
    spellings: Vec<(String, usize)>,
}

impl Variants {
    fn add(&mut self, spelling: &str, count: usize) {
        match self.spellings.iter_mut().find(|(s, _)| s == spelling) {
            Some((_, existing)) => *existing += count,
            None => self.spellings.push((spelling.to_string(), count)),
        }
    }

    fn total(&self) -> usize {
        self.spellings.iter().map(|(_, count)| count).sum()
    }

    /// Most frequent spelling; the earliest wins a tie.
    fn representative(&self) -> String {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.spellings {
            if best.is_none_or(|current| entry.1 > current.1) {
                best = Some(entry);
            }
        }
        best.map(|(spelling, _)| spelling.clone())
            .unwrap_or_else(|| self.key.clone())
    }
}

fn fold_variants(tokens: &[String]) -> Vec<(String, usize)> {
    let mut groups: Vec<Variants> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        let key = token.to_lowercase();
        let idx = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push(Variants {
                key,
                spellings: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].add(token, 1);
    }

    let mut merged = vec![false; groups.len()];
    for idx in 0..groups.len() {
        let key = groups[idx].key.clone();
        if !key.ends_with('s') || key.ends_with("ss") {
            continue;
        }
        let singular = &key[..key.len() - 1];
        let Some(&target) = positions.get(singular) else {
            continue;
        };
        if merged[target] {
            continue;
        }
        let plurals = std::mem::take(&mut groups[idx].spellings);
        for (spelling, count) in plurals {
            let trimmed = &spelling[..spelling.len() - 1];
            groups[target].add(trimmed, count);
        }
        merged[idx] = true;
    }

    groups
        .iter()
        .zip(&merged)
        .filter(|(_, gone)| !**gone)
        .map(|(group, _)| (group.representative(), group.total()))
        .collect()
}
