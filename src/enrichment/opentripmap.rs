use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{
    Coordinates, InterestSection, PlaceSearchProvider, SearchQuery, check_status, http_client,
    key_fingerprint,
};
use crate::models::PlaceSuggestion;
use crate::{Result, TravelBuddiError};

const PROVIDER: &str = "OpenTripMap";

/// OpenTripMap places API client
pub struct OpenTripMapClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// `/geoname` response. Unknown names come back without coordinates.
#[derive(Debug, Deserialize)]
pub struct GeonameResponse {
    pub name: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub error: Option<String>,
}

/// One feature of a `/radius` response (`format=json`)
#[derive(Debug, Deserialize)]
pub struct OpenTripMapPlace {
    pub xid: String,
    #[serde(default)]
    pub name: String,
    pub rate: Option<f64>,
    pub kinds: Option<String>,
    pub dist: Option<f64>,
}

impl OpenTripMapClient {
    pub fn new(api_key: String, base_url: String, timeout_seconds: u32) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// OpenTripMap category filter for a section, if it has one
    #[must_use]
    pub fn kinds_for(section: InterestSection) -> Option<&'static str> {
        match section {
            InterestSection::Attractions => Some("interesting_places"),
            InterestSection::Museums => Some("museums"),
            InterestSection::Nightlife => Some("bars,pubs,nightclubs"),
            InterestSection::Food => Some("restaurants,cafes,fast_food"),
            InterestSection::Beaches => Some("beaches"),
            InterestSection::Hikes => Some("natural"),
            InterestSection::Taxi => None,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, call: &str, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
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
impl PlaceSearchProvider for OpenTripMapClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn cache_namespace(&self) -> String {
        format!("opentripmap:{:x}", key_fingerprint(&self.api_key))
    }

    #[instrument(skip(self))]
    async fn geocode(&self, destination: &str) -> Result<Coordinates> {
        let url = format!(
            "{}/geoname?name={}&apikey={}",
            self.base_url,
            urlencoding::encode(destination),
            urlencoding::encode(&self.api_key)
        );

        let geoname: GeonameResponse = self.get_json("geoname lookup", &url).await?;
        geoname.into_coordinates(destination)
    }

    #[instrument(skip(self, query), fields(section = section.key()))]
    async fn search(
        &self,
        section: InterestSection,
        query: &SearchQuery<'_>,
    ) -> Result<Vec<PlaceSuggestion>> {
        let Some(kinds) = Self::kinds_for(section) else {
            debug!("{} has no category for {}", PROVIDER, section.key());
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/radius?radius={}&lon={}&lat={}&kinds={}&format=json&limit={}&apikey={}",
            self.base_url,
            query.radius_m,
            query.center.longitude,
            query.center.latitude,
            urlencoding::encode(kinds),
            query.limit,
            urlencoding::encode(&self.api_key)
        );

        let call = format!("radius search ({})", section.key());
        let places: Vec<OpenTripMapPlace> = self.get_json(&call, &url).await?;

        info!("Found {} {} places from {}", places.len(), section.key(), PROVIDER);
        Ok(places
            .into_iter()
            .map(|place| place.into_suggestion(section))
            .collect())
    }
}

impl GeonameResponse {
    pub fn into_coordinates(self, destination: &str) -> Result<Coordinates> {
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(TravelBuddiError::api(format!(
                "{PROVIDER} geoname lookup could not resolve '{destination}'{}",
                self.error.map(|e| format!(": {e}")).unwrap_or_default()
            ))),
        }
    }
}

impl OpenTripMapPlace {
    /// Convert to a uniform suggestion. OpenTripMap has no addresses or
    /// review counts; `rate` is its own 0-7 popularity score.
    #[must_use]
    pub fn into_suggestion(self, section: InterestSection) -> PlaceSuggestion {
        PlaceSuggestion {
            url: format!("https://opentripmap.com/en/card/{}", self.xid),
            name: self.name.trim().to_string(),
            address: String::new(),
            rating: self.rate,
            rating_count: None,
            category: section.label().to_string(),
        }
    }
}
