use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use super::{
    Coordinates, InterestSection, PlaceSearchProvider, SearchQuery, check_status, http_client,
    key_fingerprint,
};
use crate::models::PlaceSuggestion;
use crate::{Result, TravelBuddiError};

const PROVIDER: &str = "Google Places";

/// Google's hard cap on `maxResultCount`
const MAX_RESULT_COUNT: usize = 20;

const GEOCODE_FIELDS: &str = "places.displayName,places.location";
const COST_SAVER_FIELDS: &str = "places.displayName,places.formattedAddress,places.googleMapsUri";
const FULL_FIELDS: &str = "places.displayName,places.formattedAddress,places.googleMapsUri,places.rating,places.userRatingCount";

/// Google Places API (New) client
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    cost_saver: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<GooglePlace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePlace {
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub google_maps_uri: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u64>,
    pub location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub struct LocalizedText {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl GooglePlacesClient {
    pub fn new(
        api_key: String,
        base_url: String,
        timeout_seconds: u32,
        cost_saver: bool,
    ) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            cost_saver,
        })
    }

    /// Text query for a section
    #[must_use]
    pub fn text_query(section: InterestSection, destination: &str) -> String {
        match section {
            InterestSection::Attractions => format!("top tourist attractions in {destination}"),
            InterestSection::Museums => format!("museums in {destination}"),
            InterestSection::Nightlife => format!("bars and nightclubs in {destination}"),
            InterestSection::Food => format!("best local restaurants in {destination}"),
            InterestSection::Beaches => format!("beaches near {destination}"),
            InterestSection::Hikes => format!("hiking trails near {destination}"),
            InterestSection::Taxi => format!("taxi service in {destination}"),
        }
    }

    fn field_mask(&self) -> &'static str {
        if self.cost_saver {
            COST_SAVER_FIELDS
        } else {
            FULL_FIELDS
        }
    }

    async fn search_text(&self, call: &str, field_mask: &str, body: Value) -> Result<SearchTextResponse> {
        let url = format!("{}/places:searchText", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", field_mask)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                TravelBuddiError::api(format!("{PROVIDER} {call} request failed: {e}"))
            })?;

        check_status(PROVIDER, call, response)
            .await?
            .json()
            .await
            .map_err(|e| {
                let e = e.without_url();
                TravelBuddiError::api(format!("Failed to parse {PROVIDER} {call} response: {e}"))
            })
    }
}

#[async_trait]
impl PlaceSearchProvider for GooglePlacesClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn cache_namespace(&self) -> String {
        format!(
            "google-places:{:x}:{}",
            key_fingerprint(&self.api_key),
            if self.cost_saver { "lean" } else { "full" }
        )
    }

    #[instrument(skip(self))]
    async fn geocode(&self, destination: &str) -> Result<Coordinates> {
        let body = json!({
            "textQuery": destination,
            "maxResultCount": 1,
        });

        let response = self
            .search_text("destination lookup", GEOCODE_FIELDS, body)
            .await?;

        response
            .places
            .into_iter()
            .find_map(|place| place.location)
            .map(|location| Coordinates {
                latitude: location.latitude,
                longitude: location.longitude,
            })
            .ok_or_else(|| {
                TravelBuddiError::api(format!(
                    "{PROVIDER} destination lookup could not resolve '{destination}'"
                ))
            })
    }

    #[instrument(skip(self, query), fields(section = section.key()))]
    async fn search(
        &self,
        section: InterestSection,
        query: &SearchQuery<'_>,
    ) -> Result<Vec<PlaceSuggestion>> {
        let body = json!({
            "textQuery": Self::text_query(section, query.destination),
            "maxResultCount": query.limit.clamp(1, MAX_RESULT_COUNT),
            "locationBias": {
                "circle": {
                    "center": {
                        "latitude": query.center.latitude,
                        "longitude": query.center.longitude,
                    },
                    "radius": f64::from(query.radius_m),
                }
            }
        });

        let call = format!("text search ({})", section.key());
        let response = self.search_text(&call, self.field_mask(), body).await?;

        info!(
            "Found {} {} places from {}",
            response.places.len(),
            section.key(),
            PROVIDER
        );
        Ok(response
            .places
            .into_iter()
            .map(|place| place.into_suggestion(section))
            .collect())
    }
}

impl GooglePlace {
    #[must_use]
    pub fn into_suggestion(self, section: InterestSection) -> PlaceSuggestion {
        PlaceSuggestion {
            name: self
                .display_name
                .map(|name| name.text.trim().to_string())
                .unwrap_or_default(),
            address: self.formatted_address.unwrap_or_default(),
            url: self.google_maps_uri.unwrap_or_default(),
            rating: self.rating,
            rating_count: self.user_rating_count,
            category: section.label().to_string(),
        }
    }
}
