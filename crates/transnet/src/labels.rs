// Label table: string-to-column interning in first-seen order.

use crate::{NetworkError, Resource};
use hashbrown::HashMap;

/// Interned transition labels.
///
/// Each distinct label owns one column of the transition table. Columns are
/// handed out in the order labels are first seen, never by string order, and
/// are stable for the lifetime of the table. Lookup is exact string
/// equality; callers normalize case or whitespace upstream if they need to.
#[derive(Debug, Clone)]
pub struct LabelTable {
    /// Maps column index to its label.
    labels: Vec<String>,
    /// Maps a label to its column index.
    indices: HashMap<String, usize>,
    /// Maximum number of columns.
    capacity: usize,
}

impl LabelTable {
    /// Create an empty table that accepts at most `capacity` distinct labels.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Return the column of `label`, assigning the next free one if it is new.
    ///
    /// Fails with [`NetworkError::CapacityExceeded`] when a new label arrives
    /// and every column is already taken. The table is unchanged on failure.
    pub fn intern(&mut self, label: &str) -> Result<usize, NetworkError> {
        if let Some(&idx) = self.indices.get(label) {
            return Ok(idx);
        }
        if self.labels.len() >= self.capacity {
            return Err(NetworkError::CapacityExceeded {
                resource: Resource::Labels,
                limit: self.capacity,
            });
        }
        let idx = self.labels.len();
        self.labels.push(label.to_string());
        self.indices.insert(label.to_string(), idx);
        Ok(idx)
    }

    /// Column of an already interned label.
    #[inline]
    pub fn get(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Label stored at `index`.
    #[inline]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Labels in column order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interns_in_first_seen_order() {
        let mut table = LabelTable::with_capacity(4);
        assert_eq!(table.intern("x").unwrap(), 0);
        assert_eq!(table.intern("b").unwrap(), 1);
        assert_eq!(table.intern("a").unwrap(), 2);
        assert_eq!(table.iter().collect::<Vec<_>>(), ["x", "b", "a"]);
    }

    #[test]
    fn repeated_label_keeps_its_column() {
        let mut table = LabelTable::with_capacity(2);
        let first = table.intern("ung").unwrap();
        assert_eq!(table.intern("ung").unwrap(), first);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn lookup_is_exact() {
        let mut table = LabelTable::with_capacity(3);
        table.intern("Haus").unwrap();
        assert_eq!(table.get("Haus"), Some(0));
        assert_eq!(table.get("haus"), None);
        assert_eq!(table.get("Haus "), None);
        assert_eq!(table.label(0), Some("Haus"));
        assert_eq!(table.label(1), None);
    }

    #[test]
    fn full_table_rejects_new_labels_only() {
        let mut table = LabelTable::with_capacity(1);
        table.intern("a").unwrap();
        assert_eq!(
            table.intern("b"),
            Err(NetworkError::CapacityExceeded {
                resource: Resource::Labels,
                limit: 1,
            })
        );
        // Known labels still resolve once the table is full.
        assert_eq!(table.intern("a").unwrap(), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn multibyte_labels() {
        let mut table = LabelTable::with_capacity(2);
        table.intern("\u{00e4}n").unwrap();
        assert_eq!(table.get("\u{00e4}n"), Some(0));
        assert!(!table.is_empty());
        assert_eq!(table.capacity(), 2);
    }
}
