//! Artist lookup and search suggestions.

use std::collections::HashMap;
use std::ops::Range;

use crate::dataset::Dataset;
use crate::filter::ArtistFilter;
use crate::record::RecordId;

/// One suggestion row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistMatch {
    /// Artist name.
    pub name: String,
    /// Number of songs crediting the artist.
    pub count: usize,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    folded: String,
    ids: Vec<RecordId>,
}

/// Every artist of the dataset with the records that credit them.
///
/// Co-artist credits (`"A, B"`) are split so each name maps to every song it
/// appears on. Entries are ranked by song count, most prolific first, with
/// ties kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ArtistIndex {
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
}

impl ArtistIndex {
    /// Index every record of `dataset`.
    pub fn build(dataset: &Dataset) -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for (id, record) in dataset.iter() {
            for name in record.artist_names() {
                let slot = *slots.entry(name.to_owned()).or_insert_with(|| {
                    entries.push(Entry {
                        name: name.to_owned(),
                        folded: name.to_lowercase(),
                        ids: Vec::new(),
                    });
                    entries.len() - 1
                });
                let ids = &mut entries[slot].ids;
                // A name repeated within one credit still counts once.
                if ids.last() != Some(&id) {
                    ids.push(id);
                }
            }
        }

        entries.sort_by(|a, b| b.ids.len().cmp(&a.ids.len()));
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();

        Self { entries, by_name }
    }

    /// Number of distinct artists.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no record credits any artist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records crediting an artist, by exact name.
    pub fn lookup(&self, name: &str) -> Option<&[RecordId]> {
        self.by_name
            .get(name)
            .map(|i| self.entries[*i].ids.as_slice())
    }

    /// Filter for an artist name. An unknown name gives a filter that
    /// matches nothing.
    pub fn filter_for(&self, name: &str) -> ArtistFilter {
        ArtistFilter::new(name, self.lookup(name).map(<[_]>::to_vec).unwrap_or_default())
    }

    /// Artists whose name contains `query`, ignoring case, most prolific
    /// first. An empty query suggests nothing.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<ArtistMatch> {
        if query.is_empty() {
            return Vec::new();
        }
        let folded = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.folded.contains(&folded))
            .take(limit)
            .map(|e| ArtistMatch {
                name: e.name.clone(),
                count: e.ids.len(),
            })
            .collect()
    }
}

/// Byte ranges of `text` matching `query` case-insensitively, left to right
/// and non-overlapping. Ranges always fall on char boundaries.
pub fn match_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    if query.is_empty() {
        return ranges;
    }
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();

    let mut start = 0;
    while start < text.len() {
        if let Some(end) = match_at(&text[start..], &needle) {
            ranges.push(start..start + end);
            start += end;
        } else {
            start += text[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    ranges
}

/// Length in bytes of the prefix of `haystack` that folds to `needle`.
fn match_at(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, c) in haystack.char_indices() {
        if matched == needle.len() {
            return Some(offset);
        }
        for folded in c.to_lowercase() {
            if needle.get(matched) != Some(&folded) {
                return None;
            }
            matched += 1;
        }
    }
    (matched == needle.len()).then_some(haystack.len())
}
