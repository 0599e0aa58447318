//! Data models for `TravelBuddi`
//!
//! - Trip: the validated form submission and its enumerated choices
//! - Plan: checklist entries, place suggestions and the aggregate plan

pub mod plan;
pub mod trip;

pub use plan::{ChecklistEntry, GeneratedPlan, PlaceSuggestion, Sections};
pub use trip::{
    Accommodation, Activity, Luggage, TripRequest, TripRequestDraft, TripStyle, WeatherFeel,
};
