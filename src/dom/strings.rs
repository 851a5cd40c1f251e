//! String interning pool
//!
//! Deduplicated storage for element and attribute names. Builder output
//! repeats names heavily (sibling elements share a tag), so each unique
//! name is stored once and referenced by id.
//!
//! Uses hash-based lookup to avoid storing duplicate string data.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// String interning pool
///
/// Memory layout:
/// - `entries`: (offset, len) into `data` for each interned id
/// - `data`: concatenated string bytes
/// - `hash_index`: hash -> list of ids (handles rare collisions)
#[derive(Debug, Default)]
pub struct StringPool {
    /// Entries indexed by string id
    entries: Vec<(u32, u32)>,
    /// Buffer holding all interned string bytes
    data: Vec<u8>,
    /// Hash of string content -> list of ids with that hash
    hash_index: HashMap<u64, Vec<u32>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        StringPool {
            entries: Vec::with_capacity(64),
            data: Vec::with_capacity(1024),
            hash_index: HashMap::new(),
        }
    }

    /// Compute hash of string content
    #[inline]
    fn compute_hash(s: &[u8]) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning its id
    ///
    /// Repeated content shares a single entry.
    pub fn intern(&mut self, s: &str) -> u32 {
        let hash = Self::compute_hash(s.as_bytes());

        // Check for an existing entry with the same content
        if let Some(ids) = self.hash_index.get(&hash) {
            for &id in ids {
                if self.get(id) == Some(s) {
                    return id;
                }
            }
        }

        let offset = self.data.len() as u32;
        let len = s.len() as u32;
        self.data.extend_from_slice(s.as_bytes());

        let id = self.entries.len() as u32;
        self.entries.push((offset, len));
        self.hash_index.entry(hash).or_default().push(id);

        id
    }

    /// Look up the id of already-interned content without inserting
    pub fn lookup(&self, s: &str) -> Option<u32> {
        let hash = Self::compute_hash(s.as_bytes());
        let ids = self.hash_index.get(&hash)?;
        ids.iter().copied().find(|&id| self.get(id) == Some(s))
    }

    /// Resolve an id back to its string
    pub fn get(&self, id: u32) -> Option<&str> {
        let &(offset, len) = self.entries.get(id as usize)?;
        let start = offset as usize;
        let end = start + len as usize;
        if end <= self.data.len() {
            std::str::from_utf8(&self.data[start..end]).ok()
        } else {
            None
        }
    }

    /// Number of unique strings stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_get() {
        let mut pool = StringPool::new();
        let id = pool.intern("book");
        assert_eq!(pool.get(id), Some("book"));
    }

    #[test]
    fn test_intern_duplicate() {
        let mut pool = StringPool::new();
        let id1 = pool.intern("author");
        let id2 = pool.intern("author");
        assert_eq!(id1, id2);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_intern_different() {
        let mut pool = StringPool::new();
        let id1 = pool.intern("book");
        let id2 = pool.intern("publisher");
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_lookup() {
        let mut pool = StringPool::new();
        let id = pool.intern("title");
        assert_eq!(pool.lookup("title"), Some(id));
        assert_eq!(pool.lookup("missing"), None);
    }

    #[test]
    fn test_empty_string() {
        let mut pool = StringPool::new();
        let id = pool.intern("");
        assert_eq!(pool.get(id), Some(""));
        assert_eq!(pool.intern(""), id);
    }

    #[test]
    fn test_unknown_id() {
        let pool = StringPool::new();
        assert_eq!(pool.get(7), None);
    }
}
