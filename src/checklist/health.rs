//! Health and vaccine prompts. Never medical advice: every entry points the
//! traveler at official sources or a clinician.

use crate::models::{ChecklistEntry, Sections};
use crate::region::Region;

use super::dedup_sections;

pub const COMMON_CATEGORY: &str = "Health & vaccines (checklist)";
pub const DESTINATION_CATEGORY: &str = "Destination prompts (verify with clinician)";

fn common_prompts() -> Vec<ChecklistEntry> {
    vec![
        ChecklistEntry::new(
            "Check official travel health advice for your destination",
            "Guidance changes; use official sources",
            &["health"],
        ),
        ChecklistEntry::new(
            "Confirm routine vaccines are up to date",
            "Baseline protection",
            &["health"],
        ),
        ChecklistEntry::new(
            "Carry personal meds in original packaging",
            "Helps at borders and in emergencies",
            &["health"],
        ),
        ChecklistEntry::new(
            "Consider a basic first-aid kit",
            "Blisters, minor cuts, headaches",
            &["health"],
        ),
        ChecklistEntry::new(
            "Verify if proof of vaccination is required for entry/transit",
            "Some routes have requirements",
            &["health", "docs"],
        ),
    ]
}

fn region_prompts(region: Region) -> Vec<ChecklistEntry> {
    match region {
        Region::SeAsia => vec![
            ChecklistEntry::new(
                "Ask a clinician about mosquito-borne illness prevention",
                "Repellent + behavior planning",
                &["health"],
            ),
            ChecklistEntry::new("Food/water hygiene plan", "Reduce stomach issues", &["health"]),
        ],
        Region::SouthAsia => vec![
            ChecklistEntry::new(
                "Ask a clinician about stomach illness prevention",
                "Hygiene and contingency meds",
                &["health"],
            ),
            ChecklistEntry::new("Heat and hydration strategy", "High temps can be risky", &["health"]),
        ],
        Region::Latam => vec![
            ChecklistEntry::new(
                "Ask a clinician about mosquito-borne illness prevention",
                "Repellent + clothing",
                &["health"],
            ),
            ChecklistEntry::new(
                "Altitude planning (if relevant)",
                "Some areas require acclimatization",
                &["health"],
            ),
        ],
        Region::Mena => vec![ChecklistEntry::new(
            "Heat and sun plan",
            "Hydration + shade + sunscreen",
            &["health"],
        )],
        Region::Unknown => vec![ChecklistEntry::new(
            "If unsure, consult a travel clinic 4–8 weeks before travel",
            "Some vaccines need time/boosters",
            &["health"],
        )],
        Region::UkIe | Region::Eu | Region::UsCanada | Region::EastAsia | Region::Oceania => {
            Vec::new()
        }
    }
}

/// Health checklist for a region. Both categories are always present.
#[must_use]
pub fn health_checklist(region: Region) -> Sections<ChecklistEntry> {
    let mut sections = Sections::new();
    sections.insert(COMMON_CATEGORY, common_prompts());
    sections.insert(DESTINATION_CATEGORY, region_prompts(region));
    dedup_sections(&mut sections);
    sections
}
