//! Closure capture sets
//!
//! A closure captures every variable it reads (or calls through) that is
//! declared outside of it. Captures are kept in declaration order so the
//! code generator can lay out closure environments deterministically.

use super::symbols::SymbolId;
use mocha_parser::Span;

/// Ordered, duplicate-free list of captured symbols
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureSet {
    /// (declaration span, symbol), sorted by span
    entries: Vec<(Span, SymbolId)>,
}

impl CaptureSet {
    /// Create an empty capture set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol declared at `declared_at`. Returns false if already present.
    pub fn insert(&mut self, symbol: SymbolId, declared_at: Span) -> bool {
        let key = (declared_at, symbol);
        match self.entries.binary_search(&key) {
            Ok(_) => false,
            Err(index) => {
                self.entries.insert(index, key);
                true
            }
        }
    }

    /// Check if a symbol is captured
    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.entries.iter().any(|&(_, s)| s == symbol)
    }

    /// Captured symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.entries.iter().map(|&(_, s)| s)
    }

    /// Get number of captures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no captures
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_by_declaration() {
        let mut set = CaptureSet::new();
        assert!(set.insert(SymbolId(7), Span::new(40, 41, 3, 1)));
        assert!(set.insert(SymbolId(2), Span::new(10, 11, 1, 11)));
        assert!(set.insert(SymbolId(5), Span::new(20, 21, 2, 1)));

        let order: Vec<SymbolId> = set.iter().collect();
        assert_eq!(order, vec![SymbolId(2), SymbolId(5), SymbolId(7)]);
    }

    #[test]
    fn test_deduplicated() {
        let mut set = CaptureSet::new();
        let span = Span::new(0, 1, 1, 1);
        assert!(set.insert(SymbolId(1), span));
        assert!(!set.insert(SymbolId(1), span));
        assert_eq!(set.len(), 1);
        assert!(set.contains(SymbolId(1)));
        assert!(!set.contains(SymbolId(2)));
    }
}
