//! Export artifacts
//!
//! Every exporter is a deterministic function of the trip request and the
//! generated plan:
//! - Markdown document ([`plan_to_markdown`])
//! - JSON document with the input and the plan ([`export_to_json`])
//! - CSV checklists keyed by filename ([`plan_to_csv`])
//! - ZIP archive bundling all of the above ([`build_export_zip`])

pub mod archive;
pub mod csv;
pub mod json;
pub mod markdown;

pub use archive::build_export_zip;
pub use self::csv::plan_to_csv;
pub use json::{PlanExport, export_to_json};
pub use markdown::plan_to_markdown;

pub const MARKDOWN_FILE: &str = "travel_plan.md";
pub const JSON_FILE: &str = "travel_plan.json";
pub const PACKING_CSV_FILE: &str = "packing_checklist.csv";
pub const HEALTH_CSV_FILE: &str = "health_checklist.csv";
pub const REMINDERS_CSV_FILE: &str = "reminders.csv";

/// Download name of the bundled archive
pub const ARCHIVE_FILE: &str = "travel_plan.zip";

/// Archive members, in the order they are written
pub const EXPORT_FILES: [&str; 5] = [
    MARKDOWN_FILE,
    JSON_FILE,
    PACKING_CSV_FILE,
    HEALTH_CSV_FILE,
    REMINDERS_CSV_FILE,
];

/// One rendered export file
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub name: &'static str,
    pub contents: String,
}

impl ExportFile {
    #[must_use]
    pub fn new(name: &'static str, contents: String) -> Self {
        Self { name, contents }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{
        Activity, GeneratedPlan, PlaceSuggestion, Sections, TripRequest, TripRequestDraft,
    };
    use crate::planner::generate_plan;

    pub fn sample_request() -> TripRequest {
        let mut draft: TripRequestDraft = serde_json::from_value(serde_json::json!({
            "origin": "London, UK",
            "destination": "Tokyo, Japan",
            "start_date": "2026-02-10",
            "end_date": "2026-02-14",
            "travelers": 2,
            "rain_likelihood": 40,
            "dietary_notes": "vegetarian",
        }))
        .unwrap();
        draft.activities = vec![Activity::CityExploring, Activity::FoodTour];
        TripRequest::try_from(draft).unwrap()
    }

    pub fn sample_plan() -> GeneratedPlan {
        generate_plan(&sample_request())
    }

    pub fn enriched_plan() -> GeneratedPlan {
        let mut plan = sample_plan();
        let mut enriched = Sections::new();
        enriched.insert(
            "Top attractions",
            vec![
                PlaceSuggestion {
                    name: "Senso-ji".to_string(),
                    address: "2-3-1 Asakusa, Taito City".to_string(),
                    url: "https://maps.google.com/?cid=1".to_string(),
                    rating: Some(4.5),
                    rating_count: Some(81234),
                    category: "Top attractions".to_string(),
                },
                PlaceSuggestion {
                    name: "Tokyo Tower".to_string(),
                    address: String::new(),
                    url: String::new(),
                    rating: Some(7.0),
                    rating_count: None,
                    category: "Top attractions".to_string(),
                },
            ],
        );
        enriched.insert("Nightlife", Vec::new());
        plan.enriched = enriched;
        plan
    }
}
