//! Checklist assembly
//!
//! Every assembler is a pure function from trip attributes to a
//! [`Sections`] of [`ChecklistEntry`] built from fixed templates.
//! Deduplication runs once per category after all assemblers contributed.

pub mod health;
pub mod packing;

use std::collections::HashSet;

use crate::models::{ChecklistEntry, Sections};
use crate::text::normalize_text;

pub use health::health_checklist;
pub use packing::{
    accessibility_module, activity_modules, base_packing, carry_on_module, packing_checklist,
    weather_module,
};

/// Drop entries whose normalized item text was already seen.
/// The first occurrence wins and order is otherwise preserved.
#[must_use]
pub fn dedup_entries(entries: Vec<ChecklistEntry>) -> Vec<ChecklistEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(normalize_text(&entry.item)))
        .collect()
}

/// Deduplicate every category independently
pub fn dedup_sections(sections: &mut Sections<ChecklistEntry>) {
    for (_, entries) in sections.iter_mut() {
        *entries = dedup_entries(std::mem::take(entries));
    }
}
