//! Places-to-visit, transport prompts and trip reminders

use crate::models::{Activity, Sections};
use crate::region::Region;

pub const INTEREST_CATEGORY: &str = "Ideas based on your interests";
pub const EASY_WINS_CATEGORY: &str = "Easy wins anywhere";
pub const DESTINATION_PROMPTS_CATEGORY: &str = "Destination prompts";
pub const RIDE_OPTIONS_CATEGORY: &str = "Taxi / ride options";
pub const SAFETY_CATEGORY: &str = "Safety checklist";

/// Interest ideas, in the order they are listed
const INTEREST_IDEAS: [(Activity, &[&str]); 5] = [
    (
        Activity::MuseumsArt,
        &[
            "One flagship museum + one small gallery.",
            "Check late-night openings/free entry windows.",
        ],
    ),
    (
        Activity::FoodTour,
        &[
            "Market visit early in the trip.",
            "Street-food area with high turnover + visible cooking.",
        ],
    ),
    (
        Activity::Hiking,
        &[
            "Half-day hike first; then full-day route.",
            "Download offline trail maps; check daylight hours.",
        ],
    ),
    (
        Activity::Beach,
        &[
            "One calm beach (morning) + one lively beach (afternoon).",
            "Pick a sunset spot.",
        ],
    ),
    (
        Activity::ThemeParks,
        &[
            "Buy timed-entry tickets early if needed.",
            "Arrive before opening for first rides.",
        ],
    ),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

#[must_use]
pub fn places_to_visit(activities: &[Activity], destination: &str) -> Sections<String> {
    let destination = destination.trim();
    let mut ideas: Vec<String> = INTEREST_IDEAS
        .iter()
        .filter(|(activity, _)| activities.contains(activity))
        .flat_map(|(_, items)| strings(items))
        .collect();

    if ideas.is_empty() {
        ideas.push(
            "Each day: 1 landmark, 1 local experience, 1 nature break (park/river).".to_string(),
        );
    }

    let mut sections = Sections::new();
    sections.insert(INTEREST_CATEGORY, ideas);
    sections.insert(
        EASY_WINS_CATEGORY,
        strings(&[
            "Do a walking tour on day 1 (fast orientation).",
            "Pick one neighborhood to wander with no agenda.",
            "Bookmark 2–3 indoor options for bad weather.",
        ]),
    );
    sections.insert(
        DESTINATION_PROMPTS_CATEGORY,
        vec![
            format!("Search: “best neighborhoods in {destination}” and save 2–3 to explore."),
            format!("Search: “day trips from {destination}” and pick one that matches your pace."),
            format!("Search: “local events in {destination} during your dates”."),
        ],
    );
    sections
}

#[must_use]
pub fn transport_guide(region: Region, destination: &str) -> Sections<String> {
    let destination = destination.trim();
    let mut sections = Sections::new();
    sections.insert(RIDE_OPTIONS_CATEGORY, strings(region.ride_hailing()));
    sections.insert(
        SAFETY_CATEGORY,
        strings(&[
            "Prefer official taxi ranks or app-dispatched rides.",
            "If street taxis: confirm meter or agree price before starting.",
            "Share trip details; sit in back if solo.",
            "At airports: use official/prepaid counters or hotel transfers.",
        ]),
    );
    sections.insert(
        DESTINATION_PROMPTS_CATEGORY,
        vec![
            format!("Search: “official taxi number in {destination}” and save it."),
            format!(
                "Search: “airport to city center transport {destination}” (compare train/bus/taxi)."
            ),
            "Download the local public transit app.".to_string(),
        ],
    );
    sections
}

#[must_use]
pub fn reminders() -> Vec<String> {
    strings(&[
        "Download offline maps + save key addresses (hotel, embassy, venues).",
        "Set up roaming/eSIM plan before departure.",
        "Enable contactless payments; consider notifying your bank.",
        "Save local emergency number + key contacts.",
    ])
}
