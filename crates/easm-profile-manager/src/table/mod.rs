use std::collections::HashSet;

use crate::models::{ProfileRecord, SelectionKey};

/// Keeps rows where any column contains `query` as typed, ignoring case.
/// An empty query keeps every row.
pub fn filter<'a>(records: &'a [ProfileRecord], query: &str) -> Vec<&'a ProfileRecord> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .columns()
                .iter()
                .any(|column| column.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Rows picked for a bulk action, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: Vec<SelectionKey>,
    seen: HashSet<SelectionKey>,
}

impl Selection {
    /// Every selectable row of `records`. Placeholder rows are skipped.
    pub fn all<'a>(records: impl IntoIterator<Item = &'a ProfileRecord>) -> Self {
        let mut selection = Self::default();
        for record in records.into_iter().filter(|r| !r.placeholder) {
            selection.insert(record.key());
        }
        selection
    }

    pub fn insert(&mut self, key: SelectionKey) {
        if self.seen.insert(key.clone()) {
            self.keys.push(key);
        }
    }

    pub fn contains(&self, key: &SelectionKey) -> bool {
        self.seen.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<SelectionKey> for Selection {
    fn from_iter<I: IntoIterator<Item = SelectionKey>>(iter: I) -> Self {
        let mut selection = Self::default();
        for key in iter {
            selection.insert(key);
        }
        selection
    }
}
