//! Generated plan model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single packing or health recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub item: String,
    pub why: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ChecklistEntry {
    #[must_use]
    pub fn new(item: &str, why: &str, tags: &[&str]) -> Self {
        Self {
            item: item.to_string(),
            why: why.to_string(),
            tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        }
    }
}

/// A real point of interest returned by a place-search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub url: String,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    #[serde(default)]
    pub category: String,
}

/// Insertion-ordered `category -> items` mapping.
///
/// Serializes as a map whose key order is the insertion order, so exports
/// list categories in the order the assemblers produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sections<T> {
    entries: IndexMap<String, Vec<T>>,
}

impl<T> Default for Sections<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T> Sections<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of a category, creating it (empty, at the end) if missing
    pub fn entry(&mut self, category: &str) -> &mut Vec<T> {
        self.entries.entry(category.to_string()).or_default()
    }

    /// Replace a category's items, keeping its position if it already exists
    pub fn insert(&mut self, category: &str, items: Vec<T>) {
        self.entries.insert(category.to_string(), items);
    }

    /// Append every category of `other`, merging into existing ones
    pub fn extend(&mut self, other: Sections<T>) {
        for (category, items) in other.entries {
            self.entries.entry(category).or_default().extend(items);
        }
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&[T]> {
        self.entries.get(category).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.entries
            .iter()
            .map(|(category, items)| (category.as_str(), items.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<T>)> {
        self.entries
            .iter_mut()
            .map(|(category, items)| (category.as_str(), items))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of items across categories
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<T> FromIterator<(String, Vec<T>)> for Sections<T> {
    fn from_iter<I: IntoIterator<Item = (String, Vec<T>)>>(iter: I) -> Self {
        let mut sections = Sections::new();
        for (category, items) in iter {
            sections.entries.entry(category).or_default().extend(items);
        }
        sections
    }
}

/// Aggregate output of one plan generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub packing: Sections<ChecklistEntry>,
    pub health: Sections<ChecklistEntry>,
    pub places: Sections<String>,
    pub transport: Sections<String>,
    pub food: Sections<String>,
    #[serde(default)]
    pub enriched: Sections<PlaceSuggestion>,
    pub reminders: Vec<String>,
}

impl GeneratedPlan {
    /// True when at least one enrichment section holds suggestions
    #[must_use]
    pub fn has_enrichment(&self) -> bool {
        self.enriched.item_count() > 0
    }
}
