//! Insertion-ordered occurrence counting.

use std::collections::HashMap;

/// Counts occurrences of strings, remembering the order keys first appeared.
///
/// Ranking is stable: entries with equal counts keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `key`.
    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        if let Some(&pos) = self.positions.get(&key) {
            self.entries[pos].1 += 1;
        } else {
            self.positions.insert(key.clone(), self.entries.len());
            self.entries.push((key, 1));
        }
    }

    /// Occurrence count for `key`, if it was seen.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.positions.get(key).map(|&pos| self.entries[pos].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterate over `(key, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// The `n` highest counts, descending, ties in first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Entries with a count strictly greater than `min`, descending, stable on ties.
    pub fn above(&self, min: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().filter(|(_, c)| *c > min).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Keys with exactly `count` occurrences, in first-seen order.
    pub fn with_count(&self, count: usize) -> impl Iterator<Item = &str> {
        self.iter().filter(move |(_, c)| *c == count).map(|(k, _)| k)
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<S: Into<String>> Extend<S> for FrequencyTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}
