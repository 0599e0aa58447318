//! Plan assembly
//!
//! Composes the rule-based modules into a [`GeneratedPlan`] and optionally
//! layers place-search suggestions on top of it.

use tracing::{info, instrument, warn};

use crate::checklist::{health_checklist, packing_checklist};
use crate::enrichment::PlaceEnricher;
use crate::food::food_guide;
use crate::guides::{places_to_visit, reminders, transport_guide};
use crate::models::{GeneratedPlan, TripRequest};
use crate::region::classify_region;

/// Build the offline plan. Pure and deterministic.
#[must_use]
#[instrument(skip(request), fields(destination = request.destination()))]
pub fn generate_plan(request: &TripRequest) -> GeneratedPlan {
    let region = classify_region(request.destination());
    info!(
        "Generating plan for {} ({} days, region {})",
        request.destination(),
        request.trip_length_days(),
        region
    );

    GeneratedPlan {
        packing: packing_checklist(request),
        health: health_checklist(region),
        places: places_to_visit(request.activities(), request.destination()),
        transport: transport_guide(region, request.destination()),
        food: food_guide(request.destination(), request.dietary_notes()),
        enriched: Default::default(),
        reminders: reminders(),
    }
}

/// Build the offline plan, then try to enrich it.
///
/// Enrichment failures never fail the plan: the offline plan is returned
/// with the user-facing warning instead.
pub async fn generate_plan_with_enrichment(
    request: &TripRequest,
    enricher: Option<&PlaceEnricher>,
) -> (GeneratedPlan, Option<String>) {
    let mut plan = generate_plan(request);

    let Some(enricher) = enricher else {
        return (plan, None);
    };

    match enricher.enrich(request).await {
        Ok(enriched) => {
            plan.enriched = enriched;
            (plan, None)
        }
        Err(e) => {
            warn!("{} enrichment failed: {}", enricher.provider_name(), e);
            (plan, Some(e.user_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::{Coordinates, InterestSection, PlaceSearchProvider, SearchQuery};
    use crate::food::LOCAL_FOODS_CATEGORY;
    use crate::models::{Activity, PlaceSuggestion, TripRequestDraft, WeatherFeel};
    use crate::text::normalize_text;
    use crate::{Result, TravelBuddiError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rstest::rstest;
    use std::collections::HashSet;

    fn draft(destination: &str) -> TripRequestDraft {
        serde_json::from_value(serde_json::json!({
            "origin": "London, UK",
            "destination": destination,
            "start_date": "2026-02-10",
            "end_date": "2026-02-14",
        }))
        .unwrap()
    }

    fn request(destination: &str) -> TripRequest {
        TripRequest::try_from(draft(destination)).unwrap()
    }

    #[rstest]
    #[case("Tokyo, Japan", vec![Activity::Hiking, Activity::Camping], WeatherFeel::Cold, 90)]
    #[case("Bangkok, Thailand", vec![Activity::Beach, Activity::WaterSports], WeatherFeel::Hot, 70)]
    #[case("Reykjavik", vec![Activity::SkiSnow, Activity::Hiking, Activity::Camping], WeatherFeel::Cold, 0)]
    #[case("Paris, France", vec![], WeatherFeel::Mild, 100)]
    fn test_no_duplicate_items_per_category(
        #[case] destination: &str,
        #[case] activities: Vec<Activity>,
        #[case] weather: WeatherFeel,
        #[case] rain: i64,
    ) {
        let mut draft = draft(destination);
        draft.activities = activities;
        draft.weather = weather;
        draft.rain_likelihood = rain;
        draft.end_date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        draft.mobility_notes = "wheelchair".to_string();
        let plan = generate_plan(&TripRequest::try_from(draft).unwrap());

        for sections in [&plan.packing, &plan.health] {
            for (category, entries) in sections.iter() {
                let mut seen = HashSet::new();
                for entry in entries {
                    assert!(
                        seen.insert(normalize_text(&entry.item)),
                        "duplicate '{}' in {}",
                        entry.item,
                        category
                    );
                }
            }
        }
    }

    #[test]
    fn test_tokyo_gets_japanese_food() {
        let plan = generate_plan(&request("Tokyo, Japan"));
        let foods = plan.food.get(LOCAL_FOODS_CATEGORY).unwrap();
        assert!(!foods.is_empty());
        assert!(foods.iter().any(|food| food.contains("Sushi")));
        assert!(plan.transport.item_count() > 0);
        assert!(!plan.has_enrichment());
    }

    #[test]
    fn test_heavy_rain_adds_rain_gear() {
        let mut draft = draft("Lisbon");
        draft.rain_likelihood = 75;
        let plan = generate_plan(&TripRequest::try_from(draft).unwrap());
        let all_items: Vec<&str> = plan
            .packing
            .iter()
            .flat_map(|(_, entries)| entries.iter().map(|entry| entry.item.as_str()))
            .collect();
        assert!(all_items.contains(&"Compact umbrella"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let trip = request("Mexico City");
        assert_eq!(generate_plan(&trip), generate_plan(&trip));
    }

    struct BrokenProvider;

    #[async_trait]
    impl PlaceSearchProvider for BrokenProvider {
        fn name(&self) -> &'static str {
            "Broken"
        }

        fn cache_namespace(&self) -> String {
            "broken".to_string()
        }

        async fn geocode(&self, _destination: &str) -> Result<Coordinates> {
            Err(TravelBuddiError::api("Broken geocode rejected the API key (401)"))
        }

        async fn search(
            &self,
            _section: InterestSection,
            _query: &SearchQuery<'_>,
        ) -> Result<Vec<PlaceSuggestion>> {
            Ok(Vec::new())
        }
    }

    struct OnePlaceProvider;

    #[async_trait]
    impl PlaceSearchProvider for OnePlaceProvider {
        fn name(&self) -> &'static str {
            "One"
        }

        fn cache_namespace(&self) -> String {
            "one".to_string()
        }

        async fn geocode(&self, _destination: &str) -> Result<Coordinates> {
            Ok(Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            })
        }

        async fn search(
            &self,
            section: InterestSection,
            _query: &SearchQuery<'_>,
        ) -> Result<Vec<PlaceSuggestion>> {
            Ok(vec![PlaceSuggestion {
                name: format!("Best of {}", section.key()),
                address: String::new(),
                url: String::new(),
                rating: None,
                rating_count: None,
                category: section.label().to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_failed_enrichment_keeps_offline_plan() {
        let trip = request("Tokyo, Japan");
        let enricher = PlaceEnricher::new(Box::new(BrokenProvider), 5, 8);

        let (plan, warning) = generate_plan_with_enrichment(&trip, Some(&enricher)).await;

        assert_eq!(plan, generate_plan(&trip));
        let warning = warning.unwrap();
        assert!(warning.contains("Broken geocode"));
        assert!(warning.contains("offline plan"));
    }

    #[tokio::test]
    async fn test_successful_enrichment_fills_sections() {
        let trip = request("Tokyo, Japan");
        let enricher = PlaceEnricher::new(Box::new(OnePlaceProvider), 5, 8);

        let (plan, warning) = generate_plan_with_enrichment(&trip, Some(&enricher)).await;

        assert!(warning.is_none());
        assert!(plan.has_enrichment());
        assert_eq!(
            plan.enriched.get("Top attractions").unwrap()[0].name,
            "Best of attractions"
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_warning_hides_api_key() {
        let key = "SUPERSECRETKEY123";
        let client = crate::enrichment::OpenTripMapClient::new(
            key.to_string(),
            "http://127.0.0.1:1/places".to_string(),
            2,
        )
        .unwrap();
        let enricher = PlaceEnricher::new(Box::new(client), 5, 8);

        let trip = request("Tokyo, Japan");
        let (_, warning) = generate_plan_with_enrichment(&trip, Some(&enricher)).await;

        let warning = warning.unwrap();
        assert!(warning.contains("OpenTripMap geoname lookup"));
        assert!(!warning.contains(key));
    }

    #[tokio::test]
    async fn test_without_enricher_plan_is_offline() {
        let trip = request("Oslo");
        let (plan, warning) = generate_plan_with_enrichment(&trip, None).await;
        assert!(warning.is_none());
        assert!(!plan.has_enrichment());
    }
}
