//! `TravelBuddi` - rule-based travel planning prompts
//!
//! This library turns a validated trip request into packing, health,
//! transport and food checklists, optionally enriched with real places from
//! a place-search API, and exports the result as Markdown, JSON, CSV or ZIP.

pub mod api;
pub mod cache;
pub mod checklist;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod food;
pub mod guides;
pub mod logging;
pub mod models;
pub mod planner;
pub mod region;
pub mod text;
pub mod web;

// Re-export core types for public API
pub use cache::ResponseCache;
pub use config::TravelBuddiConfig;
pub use enrichment::{PlaceEnricher, PlaceSearchProvider, ProviderKind};
pub use error::TravelBuddiError;
pub use models::{ChecklistEntry, GeneratedPlan, PlaceSuggestion, Sections, TripRequest};
pub use planner::{generate_plan, generate_plan_with_enrichment};
pub use region::{Region, classify_region};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelBuddiError>;
