//! Case-insensitive search over lesson items

use super::content::{CommandEntry, ConceptCard, Module, YamlExample};

/// Item that can be matched by a search query
pub trait Searchable {
    fn label(&self) -> &str;
    fn description(&self) -> &str;

    /// Whether the label or description contains the lowercase query
    fn matches(&self, query_lower: &str) -> bool {
        self.label().to_lowercase().contains(query_lower)
            || self.description().to_lowercase().contains(query_lower)
    }
}

impl Searchable for CommandEntry {
    fn label(&self) -> &str {
        &self.command
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Searchable for ConceptCard {
    fn label(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.summary
    }
}

impl Searchable for YamlExample {
    fn label(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Searchable for Module {
    fn label(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.summary
    }
}

/// Indices of matching items, in their original order
///
/// A blank query matches everything.
pub fn filter_indices<T: Searchable>(items: &[T], query: &str) -> Vec<usize> {
    let blank = query.trim().is_empty();
    let query = query.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| blank || item.matches(&query))
        .map(|(idx, _)| idx)
        .collect()
}
