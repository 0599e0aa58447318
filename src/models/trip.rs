//! Trip request model and its validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TravelBuddiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStyle {
    Budget,
    #[serde(rename = "Mid-range")]
    MidRange,
    Luxury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accommodation {
    Hotel,
    Hostel,
    #[serde(rename = "Airbnb/Apartment")]
    Apartment,
    Resort,
    #[serde(rename = "Visiting friends/family")]
    FriendsFamily,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Luggage {
    Backpack,
    #[serde(rename = "Carry-on only")]
    CarryOnOnly,
    #[serde(rename = "Checked bag")]
    CheckedBag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherFeel {
    Cold,
    Mild,
    Hot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    #[serde(rename = "City exploring")]
    CityExploring,
    Business,
    Beach,
    Hiking,
    #[serde(rename = "Ski/Snow")]
    SkiSnow,
    Nightlife,
    #[serde(rename = "Museums/Art")]
    MuseumsArt,
    #[serde(rename = "Food tour")]
    FoodTour,
    #[serde(rename = "Theme parks")]
    ThemeParks,
    #[serde(rename = "Road trip")]
    RoadTrip,
    Camping,
    #[serde(rename = "Water sports")]
    WaterSports,
}

impl TripStyle {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TripStyle::Budget => "Budget",
            TripStyle::MidRange => "Mid-range",
            TripStyle::Luxury => "Luxury",
        }
    }
}

impl Accommodation {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Accommodation::Hotel => "Hotel",
            Accommodation::Hostel => "Hostel",
            Accommodation::Apartment => "Airbnb/Apartment",
            Accommodation::Resort => "Resort",
            Accommodation::FriendsFamily => "Visiting friends/family",
            Accommodation::Other => "Other",
        }
    }
}

impl Luggage {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Luggage::Backpack => "Backpack",
            Luggage::CarryOnOnly => "Carry-on only",
            Luggage::CheckedBag => "Checked bag",
        }
    }
}

impl WeatherFeel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WeatherFeel::Cold => "Cold",
            WeatherFeel::Mild => "Mild",
            WeatherFeel::Hot => "Hot",
        }
    }
}

impl Activity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Activity::CityExploring => "City exploring",
            Activity::Business => "Business",
            Activity::Beach => "Beach",
            Activity::Hiking => "Hiking",
            Activity::SkiSnow => "Ski/Snow",
            Activity::Nightlife => "Nightlife",
            Activity::MuseumsArt => "Museums/Art",
            Activity::FoodTour => "Food tour",
            Activity::ThemeParks => "Theme parks",
            Activity::RoadTrip => "Road trip",
            Activity::Camping => "Camping",
            Activity::WaterSports => "Water sports",
        }
    }
}

impl fmt::Display for TripStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Luggage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for WeatherFeel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form submission, before validation.
///
/// Everything the external form collector may leave out has a default that
/// matches the form's initial state.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRequestDraft {
    pub origin: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    #[serde(default = "default_trip_style")]
    pub trip_style: TripStyle,
    #[serde(default = "default_accommodation")]
    pub accommodation: Accommodation,
    #[serde(default = "default_luggage")]
    pub luggage: Luggage,
    #[serde(default = "default_weather")]
    pub weather: WeatherFeel,
    #[serde(default = "default_rain_likelihood")]
    pub rain_likelihood: i64,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub dietary_notes: String,
    #[serde(default)]
    pub mobility_notes: String,
    #[serde(default)]
    pub health_notes: String,
    #[serde(default)]
    pub budget_notes: String,
}

fn default_travelers() -> u32 {
    1
}

fn default_trip_style() -> TripStyle {
    TripStyle::MidRange
}

fn default_accommodation() -> Accommodation {
    Accommodation::Hotel
}

fn default_luggage() -> Luggage {
    Luggage::CarryOnOnly
}

fn default_weather() -> WeatherFeel {
    WeatherFeel::Mild
}

fn default_rain_likelihood() -> i64 {
    30
}

/// A validated trip request.
///
/// Fields are private so the invariants established by
/// [`TripRequest::try_from`] hold for the value's whole lifetime:
/// origin and destination are non-empty, `end_date >= start_date`,
/// `travelers >= 1`, rain likelihood is within `0..=100`, activities hold no
/// duplicates and every text field is trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TripRequestDraft")]
pub struct TripRequest {
    origin: String,
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    travelers: u32,
    trip_style: TripStyle,
    accommodation: Accommodation,
    luggage: Luggage,
    weather: WeatherFeel,
    rain_likelihood: u8,
    activities: Vec<Activity>,
    dietary_notes: String,
    mobility_notes: String,
    health_notes: String,
    budget_notes: String,
}

impl TryFrom<TripRequestDraft> for TripRequest {
    type Error = TravelBuddiError;

    fn try_from(draft: TripRequestDraft) -> Result<Self, Self::Error> {
        let origin = draft.origin.trim().to_string();
        let destination = draft.destination.trim().to_string();

        if origin.is_empty() || destination.is_empty() {
            return Err(TravelBuddiError::validation(
                "Please enter both departure and destination.",
            ));
        }
        if draft.end_date < draft.start_date {
            return Err(TravelBuddiError::validation(
                "End date must be on/after start date.",
            ));
        }
        if draft.travelers == 0 {
            return Err(TravelBuddiError::validation(
                "At least one traveler is required.",
            ));
        }

        let mut activities: Vec<Activity> = Vec::with_capacity(draft.activities.len());
        for activity in draft.activities {
            if !activities.contains(&activity) {
                activities.push(activity);
            }
        }

        Ok(Self {
            origin,
            destination,
            start_date: draft.start_date,
            end_date: draft.end_date,
            travelers: draft.travelers,
            trip_style: draft.trip_style,
            accommodation: draft.accommodation,
            luggage: draft.luggage,
            weather: draft.weather,
            rain_likelihood: draft.rain_likelihood.clamp(0, 100) as u8,
            activities,
            dietary_notes: draft.dietary_notes.trim().to_string(),
            mobility_notes: draft.mobility_notes.trim().to_string(),
            health_notes: draft.health_notes.trim().to_string(),
            budget_notes: draft.budget_notes.trim().to_string(),
        })
    }
}

impl TripRequest {
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    #[must_use]
    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    #[must_use]
    pub fn trip_style(&self) -> TripStyle {
        self.trip_style
    }

    #[must_use]
    pub fn accommodation(&self) -> Accommodation {
        self.accommodation
    }

    #[must_use]
    pub fn luggage(&self) -> Luggage {
        self.luggage
    }

    #[must_use]
    pub fn weather(&self) -> WeatherFeel {
        self.weather
    }

    #[must_use]
    pub fn rain_likelihood(&self) -> u8 {
        self.rain_likelihood
    }

    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    #[must_use]
    pub fn dietary_notes(&self) -> &str {
        &self.dietary_notes
    }

    #[must_use]
    pub fn mobility_notes(&self) -> &str {
        &self.mobility_notes
    }

    #[must_use]
    pub fn health_notes(&self) -> &str {
        &self.health_notes
    }

    #[must_use]
    pub fn budget_notes(&self) -> &str {
        &self.budget_notes
    }

    /// Inclusive trip length in days, never less than one
    #[must_use]
    pub fn trip_length_days(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(1)
    }

    /// Parse and validate a JSON form submission.
    /// Shape errors and rule violations both surface as validation errors.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let draft: TripRequestDraft = serde_json::from_str(text)
            .map_err(|e| TravelBuddiError::validation(format!("Malformed trip request: {e}")))?;
        Self::try_from(draft)
    }

    pub fn from_json_value(value: serde_json::Value) -> crate::Result<Self> {
        let draft: TripRequestDraft = serde_json::from_value(value)
            .map_err(|e| TravelBuddiError::validation(format!("Malformed trip request: {e}")))?;
        Self::try_from(draft)
    }
}
