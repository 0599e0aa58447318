//! Place-search enrichment
//!
//! Optional augmentation of the offline plan with real points of interest:
//! - Resolve the destination to a coordinate with the provider's geocoder
//! - Run one category search per interest section around that coordinate
//! - Deduplicate by (category, name, address) and cap each section
//!
//! Any HTTP or parsing failure aborts enrichment with an error naming the
//! failing call. Nothing is retried; identical calls are memoized in a
//! [`ResponseCache`] when one is attached.

pub mod google_places;
pub mod opentripmap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::cache::ResponseCache;
use crate::config::EnrichmentConfig;
use crate::models::{PlaceSuggestion, Sections, TripRequest};
use crate::text::normalize_text;
use crate::{Result, TravelBuddiError};

pub use google_places::GooglePlacesClient;
pub use opentripmap::OpenTripMapClient;

/// Which place-search back end to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// No network calls; the plan stays offline
    #[default]
    Offline,
    #[serde(rename = "opentripmap")]
    OpenTripMap,
    GooglePlaces,
}

impl ProviderKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Offline => "Offline (no API)",
            ProviderKind::OpenTripMap => "OpenTripMap",
            ProviderKind::GooglePlaces => "Google Places (New)",
        }
    }

    /// Environment variable consulted when no key is configured
    #[must_use]
    pub fn api_key_env_var(self) -> Option<&'static str> {
        match self {
            ProviderKind::Offline => None,
            ProviderKind::OpenTripMap => Some("OPENTRIPMAP_API_KEY"),
            ProviderKind::GooglePlaces => Some("GOOGLE_PLACES_API_KEY"),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = TravelBuddiError;

    fn from_str(value: &str) -> Result<Self> {
        match normalize_text(value).as_str() {
            "offline" | "none" => Ok(ProviderKind::Offline),
            "opentripmap" => Ok(ProviderKind::OpenTripMap),
            "google-places" | "google" => Ok(ProviderKind::GooglePlaces),
            other => Err(TravelBuddiError::config(format!(
                "Unknown place-search provider '{other}'. Use offline, opentripmap or google-places"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Interest sections searched during enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterestSection {
    Attractions,
    Museums,
    Nightlife,
    Food,
    Beaches,
    Hikes,
    Taxi,
}

impl InterestSection {
    pub const ALL: [InterestSection; 7] = [
        InterestSection::Attractions,
        InterestSection::Museums,
        InterestSection::Nightlife,
        InterestSection::Food,
        InterestSection::Beaches,
        InterestSection::Hikes,
        InterestSection::Taxi,
    ];

    /// Heading used as the plan category and the suggestion's category label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            InterestSection::Attractions => "Top attractions",
            InterestSection::Museums => "Museums",
            InterestSection::Nightlife => "Nightlife",
            InterestSection::Food => "Food & restaurants",
            InterestSection::Beaches => "Beaches",
            InterestSection::Hikes => "Hikes & nature",
            InterestSection::Taxi => "Taxi & transport",
        }
    }

    /// Short stable key for cache keys and logs
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            InterestSection::Attractions => "attractions",
            InterestSection::Museums => "museums",
            InterestSection::Nightlife => "nightlife",
            InterestSection::Food => "food",
            InterestSection::Beaches => "beaches",
            InterestSection::Hikes => "hikes",
            InterestSection::Taxi => "taxi",
        }
    }
}

/// Parameters of one category search
#[derive(Debug, Clone)]
pub struct SearchQuery<'a> {
    pub destination: &'a str,
    pub center: Coordinates,
    pub radius_m: u32,
    pub limit: usize,
}

/// A place-search back end
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    /// Provider name used in error messages and logs
    fn name(&self) -> &'static str;

    /// Distinguishes cache entries of differently configured clients
    fn cache_namespace(&self) -> String;

    /// Resolve a free-text destination to a coordinate
    async fn geocode(&self, destination: &str) -> Result<Coordinates>;

    /// Search one interest section around the query's center.
    /// Sections the back end has no category for return an empty list.
    async fn search(
        &self,
        section: InterestSection,
        query: &SearchQuery<'_>,
    ) -> Result<Vec<PlaceSuggestion>>;
}

/// Stable fingerprint of an API key, so cache keys never hold the key itself
#[must_use]
pub fn key_fingerprint(api_key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    api_key.hash(&mut hasher);
    hasher.finish()
}

pub(crate) fn http_client(timeout_seconds: u32) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(concat!("TravelBuddi/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| TravelBuddiError::api(format!("Failed to create HTTP client: {e}")))
}

/// Turn a non-success status into an error naming the failing call
pub(crate) async fn check_status(
    provider: &str,
    call: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(match status.as_u16() {
        401 | 403 => TravelBuddiError::api(format!(
            "{provider} {call} rejected the API key ({status})"
        )),
        429 => TravelBuddiError::api(format!("{provider} {call} hit the rate limit ({status})")),
        _ => TravelBuddiError::api(format!("{provider} {call} failed with {status}: {body}")),
    })
}

/// Drop nameless and repeated suggestions, then cap the list.
/// Identity is the normalized (category, name, address) triple.
#[must_use]
pub fn dedup_and_truncate(
    suggestions: Vec<PlaceSuggestion>,
    max_results: usize,
) -> Vec<PlaceSuggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|place| !place.name.trim().is_empty())
        .filter(|place| {
            seen.insert((
                normalize_text(&place.category),
                normalize_text(&place.name),
                normalize_text(&place.address),
            ))
        })
        .take(max_results)
        .collect()
}

/// Runs enrichment against one provider
pub struct PlaceEnricher {
    provider: Box<dyn PlaceSearchProvider>,
    cache: Option<Arc<ResponseCache>>,
    radius_km: u32,
    max_results: usize,
}

impl PlaceEnricher {
    pub fn new(provider: Box<dyn PlaceSearchProvider>, radius_km: u32, max_results: usize) -> Self {
        Self {
            provider,
            cache: None,
            radius_km,
            max_results,
        }
    }

    /// Memoize identical provider calls in `cache`
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the enricher the configuration selects.
    /// Returns `Ok(None)` for the offline provider.
    pub fn from_config(config: &EnrichmentConfig) -> Result<Option<Self>> {
        if config.provider == ProviderKind::Offline {
            return Ok(None);
        }

        let api_key = config.resolved_api_key().ok_or_else(|| {
            TravelBuddiError::config(format!("An API key is required for {}", config.provider))
        })?;

        let provider: Box<dyn PlaceSearchProvider> = match config.provider {
            ProviderKind::OpenTripMap => Box::new(OpenTripMapClient::new(
                api_key,
                config.opentripmap_base_url.clone(),
                config.timeout_seconds,
            )?),
            ProviderKind::GooglePlaces => Box::new(GooglePlacesClient::new(
                api_key,
                config.google_places_base_url.clone(),
                config.timeout_seconds,
                config.cost_saver,
            )?),
            ProviderKind::Offline => return Ok(None),
        };

        Ok(Some(Self::new(provider, config.radius_km, config.max_results)))
    }

    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Suggestions per interest section, in section order.
    /// Sections with no results are kept as empty lists.
    #[instrument(skip(self, request), fields(provider = self.provider.name(), destination = request.destination()))]
    pub async fn enrich(&self, request: &TripRequest) -> Result<Sections<PlaceSuggestion>> {
        let center = self.geocode(request.destination()).await?;
        debug!(
            "Resolved destination to ({:.4}, {:.4})",
            center.latitude, center.longitude
        );

        let query = SearchQuery {
            destination: request.destination(),
            center,
            radius_m: self.radius_km.saturating_mul(1000),
            limit: self.max_results,
        };

        let mut sections = Sections::new();
        for section in InterestSection::ALL {
            let found = self.search(section, &query).await?;
            sections.insert(section.label(), dedup_and_truncate(found, self.max_results));
        }

        info!(
            "Enriched plan with {} suggestions across {} sections",
            sections.item_count(),
            sections.len()
        );
        Ok(sections)
    }

    async fn geocode(&self, destination: &str) -> Result<Coordinates> {
        let key = format!("{}|geocode|{destination}", self.provider.cache_namespace());
        if let Some(hit) = self.cached::<Coordinates>(&key) {
            return Ok(hit);
        }
        let center = self.provider.geocode(destination).await?;
        self.remember(&key, &center);
        Ok(center)
    }

    async fn search(
        &self,
        section: InterestSection,
        query: &SearchQuery<'_>,
    ) -> Result<Vec<PlaceSuggestion>> {
        let key = format!(
            "{}|search|{}|{}|{:.6}|{:.6}|{}|{}",
            self.provider.cache_namespace(),
            section.key(),
            query.destination,
            query.center.latitude,
            query.center.longitude,
            query.radius_m,
            query.limit
        );
        if let Some(hit) = self.cached::<Vec<PlaceSuggestion>>(&key) {
            return Ok(hit);
        }
        let found = self.provider.search(section, query).await?;
        self.remember(&key, &found);
        Ok(found)
    }

    fn cached<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        match cache.get(key) {
            Ok(hit) => hit,
            Err(e) => {
                debug!("Ignoring unreadable cache entry {}: {}", key, e);
                cache.remove(key);
                None
            }
        }
    }

    fn remember<T: Serialize + fmt::Debug>(&self, key: &str, value: &T) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(key, value) {
                debug!("Could not cache {}: {}", key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, TripRequestDraft};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        calls: Arc<AtomicUsize>,
        fail_on: Option<InterestSection>,
    }

    #[async_trait]
    impl PlaceSearchProvider for FakeProvider {
        fn name(&self) -> &'static str {
            "Fake"
        }

        fn cache_namespace(&self) -> String {
            "fake".to_string()
        }

        async fn geocode(&self, _destination: &str) -> Result<Coordinates> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Coordinates {
                latitude: 35.68,
                longitude: 139.76,
            })
        }

        async fn search(
            &self,
            section: InterestSection,
            query: &SearchQuery<'_>,
        ) -> Result<Vec<PlaceSuggestion>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(section) {
                return Err(TravelBuddiError::api(format!(
                    "Fake search ({}) failed with 500",
                    section.key()
                )));
            }
            let place = |name: &str, address: &str| PlaceSuggestion {
                name: name.to_string(),
                address: address.to_string(),
                url: String::new(),
                rating: None,
                rating_count: None,
                category: section.label().to_string(),
            };
            let mut found = vec![
                place("Senso-ji", "Asakusa"),
                place("senso-ji ", " ASAKUSA"),
                place("", "nameless"),
            ];
            for i in 0..query.limit + 5 {
                found.push(place(&format!("Place {i}"), ""));
            }
            Ok(found)
        }
    }

    fn request(activities: Vec<Activity>) -> TripRequest {
        TripRequest::try_from(TripRequestDraft {
            origin: "London, UK".to_string(),
            destination: "Tokyo, Japan".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            travelers: 1,
            trip_style: crate::models::TripStyle::MidRange,
            accommodation: crate::models::Accommodation::Hotel,
            luggage: crate::models::Luggage::CarryOnOnly,
            weather: crate::models::WeatherFeel::Mild,
            rain_likelihood: 30,
            activities,
            dietary_notes: String::new(),
            mobility_notes: String::new(),
            health_notes: String::new(),
            budget_notes: String::new(),
        })
        .unwrap()
    }

    fn enricher(calls: Arc<AtomicUsize>, fail_on: Option<InterestSection>) -> PlaceEnricher {
        PlaceEnricher::new(Box::new(FakeProvider { calls, fail_on }), 5, 4)
    }

    #[test]
    fn test_dedup_and_truncate() {
        let place = |category: &str, name: &str, address: &str| PlaceSuggestion {
            name: name.to_string(),
            address: address.to_string(),
            url: String::new(),
            rating: None,
            rating_count: None,
            category: category.to_string(),
        };
        let places = vec![
            place("Museums", "Louvre", "Paris"),
            place("museums", " LOUVRE", "paris "),
            place("Museums", "Louvre", "Lens"),
            place("Museums", "  ", "nowhere"),
            place("Museums", "Orsay", "Paris"),
        ];
        let kept = dedup_and_truncate(places.clone(), 10);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[1].address, "Lens");

        assert_eq!(dedup_and_truncate(places, 2).len(), 2);
    }

    #[tokio::test]
    async fn test_enrich_dedups_and_caps_each_section() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sections = enricher(calls.clone(), None)
            .enrich(&request(vec![Activity::MuseumsArt]))
            .await
            .unwrap();

        assert_eq!(
            sections.categories().collect::<Vec<_>>(),
            [
                "Top attractions",
                "Museums",
                "Nightlife",
                "Food & restaurants",
                "Beaches",
                "Hikes & nature",
                "Taxi & transport"
            ]
        );
        for (_, places) in sections.iter() {
            assert_eq!(places.len(), 4);
            assert_eq!(places[0].name, "Senso-ji");
            assert_eq!(places[1].name, "Place 0");
        }
        // one geocode + seven searches
        assert_eq!(calls.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_every_section_is_searched_without_activities() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sections = enricher(calls, None).enrich(&request(vec![])).await.unwrap();
        assert_eq!(sections.len(), InterestSection::ALL.len());
        assert!(sections.get("Beaches").is_some());
        assert!(sections.get("Hikes & nature").is_some());
    }

    #[tokio::test]
    async fn test_failing_call_aborts_with_its_name() {
        let calls = Arc::new(AtomicUsize::new(0));
        let err = enricher(calls, Some(InterestSection::Food))
            .enrich(&request(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, TravelBuddiError::Api { .. }));
        assert!(err.to_string().contains("Fake search (food)"));
    }

    #[tokio::test]
    async fn test_cache_avoids_repeated_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(ResponseCache::new(Duration::from_secs(60)));
        let enricher = enricher(calls.clone(), None).with_cache(cache.clone());
        let trip = request(vec![]);

        let first = enricher.enrich(&trip).await.unwrap();
        let after_first = calls.load(Ordering::SeqCst);
        let second = enricher.enrich(&trip).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), after_first);
        assert_eq!(cache.len(), after_first);
    }

    #[test]
    fn test_offline_config_builds_no_enricher() {
        let config = EnrichmentConfig::default();
        assert!(PlaceEnricher::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!(
            "OpenTripMap".parse::<ProviderKind>().unwrap(),
            ProviderKind::OpenTripMap
        );
        assert_eq!(
            "google-places".parse::<ProviderKind>().unwrap(),
            ProviderKind::GooglePlaces
        );
        assert!("bing".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_key_fingerprint_is_stable() {
        assert_eq!(key_fingerprint("abc"), key_fingerprint("abc"));
        assert_ne!(key_fingerprint("abc"), key_fingerprint("abd"));
    }
}
