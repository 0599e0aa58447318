//! Packing list templates

use crate::models::{Activity, ChecklistEntry, Luggage, Sections, TripRequest, TripStyle, WeatherFeel};

use super::dedup_sections;

pub const WEATHER_CATEGORY: &str = "Weather add-ons";
pub const ACTIVITY_CATEGORY: &str = "Activity add-ons";
pub const CARRY_ON_CATEGORY: &str = "Carry-on strategy";
pub const ACCESSIBILITY_CATEGORY: &str = "Accessibility";

/// Rain likelihood (percent) from which rain gear is always suggested
pub const RAIN_THRESHOLD: u8 = 60;

/// Trips at least this long get a laundry kit (unless travelling luxury)
pub const LONG_TRIP_DAYS: i64 = 7;

#[must_use]
pub fn base_packing() -> Sections<ChecklistEntry> {
    let mut sections = Sections::new();
    sections.insert(
        "Documents & money",
        vec![
            ChecklistEntry::new("Passport/ID", "Core ID for travel, hotels, and emergencies", &["docs"]),
            ChecklistEntry::new(
                "Travel insurance details",
                "Helps with medical issues, delays, and lost items",
                &["docs", "health"],
            ),
            ChecklistEntry::new(
                "Payment cards + some cash",
                "Backup when terminals fail or tips are cash-based",
                &["money"],
            ),
            ChecklistEntry::new(
                "Copies of key docs (digital + paper)",
                "Recovery if originals are lost",
                &["docs"],
            ),
        ],
    );
    sections.insert(
        "Tech",
        vec![
            ChecklistEntry::new("Phone + charger", "Navigation, tickets, communication", &["tech"]),
            ChecklistEntry::new("Power adapter (if needed)", "Sockets differ by country/region", &["tech"]),
            ChecklistEntry::new("Power bank", "Long days out; helps with maps and photos", &["tech"]),
            ChecklistEntry::new("Headphones", "Flights, commutes, calls", &["tech"]),
        ],
    );
    sections.insert(
        "Toiletries",
        vec![
            ChecklistEntry::new("Toothbrush/toothpaste", "Basics", &["toiletries"]),
            ChecklistEntry::new("Deodorant", "Basics", &["toiletries"]),
            ChecklistEntry::new("Sunscreen", "Sun exposure even in cities", &["toiletries", "health"]),
            ChecklistEntry::new("Hand sanitizer", "Useful in transit", &["toiletries", "health"]),
        ],
    );
    sections.insert(
        "Clothing (base)",
        vec![
            ChecklistEntry::new("Underwear/socks", "Comfort and hygiene", &["clothes"]),
            ChecklistEntry::new("Everyday outfit(s)", "Mix-and-match layers", &["clothes"]),
            ChecklistEntry::new("Sleepwear", "Comfort", &["clothes"]),
        ],
    );
    sections.insert(
        "Safety & misc",
        vec![
            ChecklistEntry::new("Reusable water bottle", "Hydration + savings", &["misc", "health"]),
            ChecklistEntry::new("Small day bag", "Day trips, museums, markets", &["misc"]),
            ChecklistEntry::new("Small lock (optional)", "Hostels/shared storage", &["safety"]),
        ],
    );
    sections
}

#[must_use]
pub fn weather_module(weather: WeatherFeel, rain_likelihood: u8) -> Sections<ChecklistEntry> {
    let mut items = match weather {
        WeatherFeel::Cold => vec![
            ChecklistEntry::new("Warm jacket", "Core warmth layer", &["weather", "cold"]),
            ChecklistEntry::new("Thermal base layer", "Warmth without bulk", &["weather", "cold"]),
            ChecklistEntry::new("Gloves + beanie", "Extremities lose heat fast", &["weather", "cold"]),
        ],
        WeatherFeel::Hot => vec![
            ChecklistEntry::new("Breathable tops", "Heat comfort", &["weather", "hot"]),
            ChecklistEntry::new("Hat/cap", "Sun protection", &["weather", "hot"]),
            ChecklistEntry::new(
                "Lightweight sandals (optional)",
                "Heat-friendly footwear",
                &["weather", "hot"],
            ),
        ],
        WeatherFeel::Mild => vec![
            ChecklistEntry::new("Light jacket", "Evenings can be cooler", &["weather", "mild"]),
            ChecklistEntry::new("Layering top", "Flexible comfort", &["weather", "mild"]),
        ],
    };

    if rain_likelihood >= RAIN_THRESHOLD {
        items.extend([
            ChecklistEntry::new("Compact umbrella", "Quick rain coverage", &["weather", "rain"]),
            ChecklistEntry::new("Light rain jacket", "Hands-free rain protection", &["weather", "rain"]),
            ChecklistEntry::new(
                "Water-resistant shoes (optional)",
                "Avoid soaked feet on long days",
                &["weather", "rain"],
            ),
        ]);
    }

    let mut sections = Sections::new();
    sections.insert(WEATHER_CATEGORY, items);
    sections
}

#[must_use]
pub fn activity_modules(
    activities: &[Activity],
    trip_days: i64,
    trip_style: TripStyle,
) -> Sections<ChecklistEntry> {
    let has = |activity: Activity| activities.contains(&activity);
    let mut items = Vec::new();

    if has(Activity::Business) {
        items.extend([
            ChecklistEntry::new("Business outfit", "Meetings/dinners", &["activity", "business"]),
            ChecklistEntry::new(
                "Portable steamer (optional)",
                "Keep clothes crisp if you care",
                &["activity", "business"],
            ),
        ]);
    }
    if has(Activity::Hiking) {
        items.extend([
            ChecklistEntry::new(
                "Comfortable walking/hiking shoes",
                "Injury prevention + comfort",
                &["activity", "hiking"],
            ),
            ChecklistEntry::new(
                "Lightweight rain/wind layer",
                "Weather changes fast outdoors",
                &["activity", "hiking"],
            ),
            ChecklistEntry::new(
                "Blister care (plasters/moleskin)",
                "Stops small pain becoming a problem",
                &["activity", "hiking", "health"],
            ),
        ]);
    }
    if has(Activity::Beach) || has(Activity::WaterSports) {
        items.extend([
            ChecklistEntry::new("Swimwear", "Beach/pool", &["activity", "beach"]),
            ChecklistEntry::new("Quick-dry towel (optional)", "Convenient on day trips", &["activity", "beach"]),
            ChecklistEntry::new(
                "Waterproof phone pouch (optional)",
                "Protects phone near water",
                &["activity", "beach", "tech"],
            ),
        ]);
    }
    if has(Activity::SkiSnow) {
        items.extend([
            ChecklistEntry::new("Ski socks", "Warmth + fit", &["activity", "snow"]),
            ChecklistEntry::new("Neck gaiter/buff", "Wind protection", &["activity", "snow"]),
            ChecklistEntry::new(
                "Goggles (if not renting)",
                "Eye protection in snow glare",
                &["activity", "snow"],
            ),
        ]);
    }
    if has(Activity::Nightlife) {
        items.extend([
            ChecklistEntry::new("One nicer outfit", "Dress codes vary", &["activity", "nightlife"]),
            ChecklistEntry::new(
                "Small crossbody/secure wallet",
                "Crowded areas",
                &["activity", "nightlife", "safety"],
            ),
        ]);
    }
    if has(Activity::RoadTrip) {
        items.extend([
            ChecklistEntry::new("Phone mount (optional)", "Safer navigation", &["activity", "roadtrip"]),
            ChecklistEntry::new(
                "Offline maps downloaded",
                "Coverage gaps happen",
                &["activity", "roadtrip", "tech"],
            ),
        ]);
    }
    if has(Activity::Camping) {
        items.extend([
            ChecklistEntry::new("Headlamp", "Hands-free light", &["activity", "camping"]),
            ChecklistEntry::new(
                "Light first-aid kit",
                "Remote areas",
                &["activity", "camping", "health"],
            ),
        ]);
    }

    if trip_days >= LONG_TRIP_DAYS && trip_style != TripStyle::Luxury {
        items.push(ChecklistEntry::new(
            "Laundry kit (small detergent sheets)",
            "Light packing for longer trips",
            &["misc"],
        ));
    }

    let mut sections = Sections::new();
    sections.insert(ACTIVITY_CATEGORY, items);
    sections
}

#[must_use]
pub fn carry_on_module(luggage: Luggage) -> Sections<ChecklistEntry> {
    let mut sections = Sections::new();
    if luggage == Luggage::CarryOnOnly {
        sections.insert(
            CARRY_ON_CATEGORY,
            vec![
                ChecklistEntry::new(
                    "Solid toiletries (or <100ml liquids)",
                    "Avoid liquid limits issues",
                    &["luggage"],
                ),
                ChecklistEntry::new("Wear bulkiest shoes on travel day", "Saves bag space", &["luggage"]),
                ChecklistEntry::new("One versatile jacket", "Reduces overpacking", &["luggage"]),
            ],
        );
    }
    sections
}

#[must_use]
pub fn accessibility_module(mobility_notes: &str) -> Sections<ChecklistEntry> {
    let mut sections = Sections::new();
    if !mobility_notes.trim().is_empty() {
        sections.insert(
            ACCESSIBILITY_CATEGORY,
            vec![ChecklistEntry::new(
                "Any mobility aids / supports you rely on",
                "Consistency and comfort",
                &["accessibility"],
            )],
        );
    }
    sections
}

/// Full, deduplicated packing list for a trip
#[must_use]
pub fn packing_checklist(request: &TripRequest) -> Sections<ChecklistEntry> {
    let mut packing = base_packing();
    packing.extend(weather_module(request.weather(), request.rain_likelihood()));
    packing.extend(activity_modules(
        request.activities(),
        request.trip_length_days(),
        request.trip_style(),
    ));
    packing.extend(carry_on_module(request.luggage()));
    packing.extend(accessibility_module(request.mobility_notes()));
    dedup_sections(&mut packing);
    packing
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn items(sections: &Sections<ChecklistEntry>, category: &str) -> Vec<String> {
        sections
            .get(category)
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.item.clone())
            .collect()
    }

    #[rstest]
    #[case(WeatherFeel::Cold)]
    #[case(WeatherFeel::Mild)]
    #[case(WeatherFeel::Hot)]
    fn test_heavy_rain_always_adds_rain_gear(#[case] weather: WeatherFeel) {
        let sections = weather_module(weather, 60);
        let names = items(&sections, WEATHER_CATEGORY);
        assert!(names.contains(&"Compact umbrella".to_string()));
        assert!(names.contains(&"Light rain jacket".to_string()));
    }

    #[test]
    fn test_light_rain_adds_no_rain_gear() {
        let sections = weather_module(WeatherFeel::Hot, 59);
        let entries = sections.get(WEATHER_CATEGORY).unwrap();
        assert!(entries.iter().all(|entry| !entry.tags.contains(&"rain".to_string())));
    }

    #[test]
    fn test_activity_category_always_present() {
        let sections = activity_modules(&[], 3, TripStyle::Budget);
        assert_eq!(sections.get(ACTIVITY_CATEGORY).unwrap().len(), 0);
    }

    #[test]
    fn test_water_sports_shares_beach_items() {
        let sections = activity_modules(&[Activity::WaterSports], 3, TripStyle::Budget);
        assert!(items(&sections, ACTIVITY_CATEGORY).contains(&"Swimwear".to_string()));
    }

    #[rstest]
    #[case(7, TripStyle::Budget, true)]
    #[case(6, TripStyle::Budget, false)]
    #[case(14, TripStyle::MidRange, true)]
    #[case(14, TripStyle::Luxury, false)]
    fn test_laundry_kit_for_long_trips(
        #[case] days: i64,
        #[case] style: TripStyle,
        #[case] expected: bool,
    ) {
        let sections = activity_modules(&[], days, style);
        let has_laundry = items(&sections, ACTIVITY_CATEGORY)
            .iter()
            .any(|item| item.starts_with("Laundry kit"));
        assert_eq!(has_laundry, expected);
    }

    #[test]
    fn test_carry_on_only_for_carry_on_luggage() {
        assert!(carry_on_module(Luggage::CheckedBag).is_empty());
        assert_eq!(
            carry_on_module(Luggage::CarryOnOnly)
                .get(CARRY_ON_CATEGORY)
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn test_accessibility_needs_notes() {
        assert!(accessibility_module("   ").is_empty());
        assert!(accessibility_module("knee support").get(ACCESSIBILITY_CATEGORY).is_some());
    }
}
