//! Ordered filter selection.

use serde::{Deserialize, Serialize};

use super::catalog::Filter;

/// Filters in the order the user picked them.
///
/// Duplicates are allowed. The sequence only grows by [`FilterSequence::push`]
/// and is only emptied as a whole by [`FilterSequence::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSequence {
    filters: Vec<Filter>,
}

impl FilterSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter at the end.
    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn as_slice(&self) -> &[Filter] {
        &self.filters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }
}

impl FromIterator<Filter> for FilterSequence {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self { filters: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a FilterSequence {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::pixel::Channel;

    #[test]
    fn test_push_keeps_order_and_duplicates() {
        let mut seq = FilterSequence::new();
        seq.push(Filter::Negative);
        seq.push(Filter::increase(Channel::Red, 50));
        seq.push(Filter::Negative);

        assert_eq!(seq.len(), 3);
        assert_eq!(
            seq.as_slice(),
            &[Filter::Negative, Filter::increase(Channel::Red, 50), Filter::Negative]
        );
    }

    #[test]
    fn test_clear() {
        let mut seq: FilterSequence = [Filter::BlackAndWhite, Filter::Negative].into_iter().collect();
        assert!(!seq.is_empty());
        seq.clear();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let seq: FilterSequence = [Filter::Negative].into_iter().collect();
        assert_eq!(serde_json::to_string(&seq).unwrap(), r#"[{"kind":"negative"}]"#);
    }
}
