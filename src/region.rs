//! Destination region inference
//!
//! Maps a free-text destination onto a closed set of coarse regions by
//! keyword substring matching. Regions are tested in declaration order of
//! [`Region::PRIORITY`]; the first one with a matching keyword wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::text::normalize_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    UkIe,
    Eu,
    UsCanada,
    Latam,
    Mena,
    SouthAsia,
    SeAsia,
    EastAsia,
    Oceania,
    Unknown,
}

impl Region {
    /// Matching order. `Unknown` is the fallback and never matched by keyword.
    pub const PRIORITY: [Region; 9] = [
        Region::UkIe,
        Region::Eu,
        Region::UsCanada,
        Region::Latam,
        Region::Mena,
        Region::SouthAsia,
        Region::SeAsia,
        Region::EastAsia,
        Region::Oceania,
    ];

    /// Stable label used in exports and the HTTP API
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Region::UkIe => "uk_ie",
            Region::Eu => "eu",
            Region::UsCanada => "us_canada",
            Region::Latam => "latam",
            Region::Mena => "mena",
            Region::SouthAsia => "south_asia",
            Region::SeAsia => "se_asia",
            Region::EastAsia => "east_asia",
            Region::Oceania => "oceania",
            Region::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Region::UkIe => &[
                "uk",
                "united kingdom",
                "england",
                "scotland",
                "wales",
                "northern ireland",
                "ireland",
                "dublin",
                "london",
            ],
            Region::Eu => &[
                "france",
                "germany",
                "italy",
                "spain",
                "portugal",
                "netherlands",
                "belgium",
                "austria",
                "switzerland",
                "sweden",
                "norway",
                "denmark",
                "finland",
                "poland",
                "czech",
                "hungary",
                "greece",
                "croatia",
                "romania",
            ],
            Region::UsCanada => &[
                "united states",
                "usa",
                "new york",
                "los angeles",
                "san francisco",
                "canada",
                "toronto",
                "vancouver",
                "montreal",
            ],
            Region::Latam => &[
                "mexico",
                "brazil",
                "argentina",
                "chile",
                "colombia",
                "peru",
                "costa rica",
            ],
            Region::Mena => &[
                "uae",
                "dubai",
                "abu dhabi",
                "qatar",
                "doha",
                "saudi",
                "riyadh",
                "jeddah",
                "egypt",
                "cairo",
                "morocco",
                "marrakesh",
            ],
            Region::SouthAsia => &[
                "india",
                "delhi",
                "mumbai",
                "bangalore",
                "pakistan",
                "lahore",
                "karachi",
                "bangladesh",
                "dhaka",
                "nepal",
                "kathmandu",
                "sri lanka",
                "colombo",
            ],
            Region::SeAsia => &[
                "thailand",
                "bangkok",
                "vietnam",
                "hanoi",
                "ho chi minh",
                "philippines",
                "manila",
                "indonesia",
                "jakarta",
                "bali",
                "malaysia",
                "kuala lumpur",
                "singapore",
            ],
            Region::EastAsia => &[
                "japan",
                "tokyo",
                "osaka",
                "kyoto",
                "china",
                "beijing",
                "shanghai",
                "hong kong",
                "taiwan",
                "taipei",
                "korea",
                "seoul",
            ],
            Region::Oceania => &[
                "australia",
                "sydney",
                "melbourne",
                "new zealand",
                "auckland",
                "wellington",
            ],
            Region::Unknown => &[],
        }
    }

    /// Taxi and ride-hailing options commonly available in the region
    #[must_use]
    pub fn ride_hailing(self) -> &'static [&'static str] {
        match self {
            Region::UkIe => &[
                "Uber (varies by city)",
                "Bolt (some cities)",
                "Free Now (some cities)",
                "Local licensed minicabs",
            ],
            Region::Eu => &[
                "Bolt (many cities)",
                "Uber (many cities)",
                "Free Now (some cities)",
                "Licensed taxi ranks",
            ],
            Region::UsCanada => &["Uber", "Lyft", "Airport shuttles", "Licensed taxis"],
            Region::Latam => &[
                "Uber (some cities)",
                "DiDi (some cities)",
                "Cabify (some cities)",
                "Use official taxi apps where available",
            ],
            Region::Mena => &[
                "Careem (some cities)",
                "Uber (some cities)",
                "Official airport taxis",
                "Hotel-arranged transfers",
            ],
            Region::SouthAsia => &[
                "Uber (some cities)",
                "Ola (some cities)",
                "Official prepaid taxi counters (airports)",
                "Hotel transfers",
            ],
            Region::SeAsia => &[
                "Grab (many countries)",
                "Gojek (some countries)",
                "Official airport taxis",
                "Metered taxis where common",
            ],
            Region::EastAsia => &[
                "Official taxi services",
                "Public transport apps",
                "Some cities: Uber (limited)",
                "Hotel-arranged cars",
            ],
            Region::Oceania => &[
                "Uber",
                "Local taxi companies",
                "Airport shuttles",
                "Public transit cards/passes",
            ],
            Region::Unknown => &[
                "Official airport taxi",
                "Hotel-arranged transfer",
                "Licensed taxi ranks",
                "Reputable local ride-hailing app",
            ],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a destination. Total: anything unmatched is [`Region::Unknown`].
#[must_use]
pub fn classify_region(destination: &str) -> Region {
    let normalized = normalize_text(destination);
    Region::PRIORITY
        .into_iter()
        .find(|region| {
            region
                .keywords()
                .iter()
                .any(|keyword| normalized.contains(keyword))
        })
        .unwrap_or(Region::Unknown)
}
