//! Text search over song summaries.

use crate::ast::SongSummary;

/// Case-insensitive filter over titles and artists.
///
/// Every whitespace-separated term of a query must appear in the title or the
/// artist. A blank query matches every song.
///
/// ```rust
/// use chordsheet::{SearchIndex, SongSummary};
///
/// let index = SearchIndex::new(vec![SongSummary {
///     id: "grace".to_string(),
///     title: "Amazing Grace".to_string(),
///     artist: Some("Traditional".to_string()),
///     key: None,
/// }]);
/// assert_eq!(index.search("grace trad").len(), 1);
/// assert!(index.search("rising").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    summary: SongSummary,
    haystack: String,
}

impl SearchIndex {
    /// Build an index; songs keep the order they are given in.
    pub fn new(summaries: Vec<SongSummary>) -> Self {
        let entries = summaries
            .into_iter()
            .map(|summary| {
                let mut haystack = summary.title.to_lowercase();
                if let Some(artist) = &summary.artist {
                    haystack.push('\n');
                    haystack.push_str(&artist.to_lowercase());
                }
                Entry { summary, haystack }
            })
            .collect();
        Self { entries }
    }

    pub fn search(&self, query: &str) -> Vec<&SongSummary> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        self.entries
            .iter()
            .filter(|entry| terms.iter().all(|term| entry.haystack.contains(term.as_str())))
            .map(|entry| &entry.summary)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
