//! Country food matching and the food guide
//!
//! Coverage is deliberately narrow: only the countries in
//! [`FOOD_STARTERS_BY_COUNTRY`] are recognized, by substring of the
//! normalized destination. Cities alone ("Osaka") do not match.

use crate::models::Sections;
use crate::text::normalize_text;

pub const LOCAL_FOODS_CATEGORY: &str = "Local foods (starter list)";
pub const GAME_PLAN_CATEGORY: &str = "Food game plan";

/// Starter dishes per country, tested in this order
pub const FOOD_STARTERS_BY_COUNTRY: [(&str, [&str; 5]); 9] = [
    ("japan", ["Ramen", "Sushi", "Okonomiyaki", "Tempura", "Kaiseki (if splurging)"]),
    (
        "italy",
        [
            "Regional pasta specialty",
            "Pizza (local style)",
            "Gelato",
            "Aperitivo snacks",
            "Espresso + pastry",
        ],
    ),
    (
        "mexico",
        [
            "Tacos (regional)",
            "Mole (where common)",
            "Pozole",
            "Tamales",
            "Street elote/esquites",
        ],
    ),
    (
        "thailand",
        ["Pad kra pao", "Som tam", "Tom yum", "Khao soi (north)", "Mango sticky rice"],
    ),
    (
        "france",
        [
            "Boulangerie bread/pastries",
            "Cheese plate",
            "Regional stew/specialty",
            "Crêpes (if common)",
            "Local wine (optional)",
        ],
    ),
    (
        "india",
        ["Regional thali", "Chaat", "Dosa (south)", "Biryani (where famous)", "Masala chai"],
    ),
    (
        "spain",
        [
            "Tapas crawl",
            "Paella (where typical)",
            "Jamón",
            "Tortilla española",
            "Churros con chocolate",
        ],
    ),
    (
        "vietnam",
        ["Phở", "Bánh mì", "Bún chả", "Gỏi cuốn (fresh rolls)", "Cà phê sữa đá"],
    ),
    (
        "greece",
        [
            "Souvlaki/gyros",
            "Greek salad",
            "Seafood (coast/islands)",
            "Moussaka",
            "Baklava",
        ],
    ),
];

const GENERIC_STARTERS: [&str; 5] = [
    "Signature stew/soup of the region",
    "Famous street-food item",
    "Local dessert/pastry",
    "Common breakfast item",
    "Seasonal specialty (ask what’s best right now)",
];

/// Country key whose name appears in the destination, if any
#[must_use]
pub fn match_food_country(destination: &str) -> Option<&'static str> {
    let normalized = normalize_text(destination);
    FOOD_STARTERS_BY_COUNTRY
        .iter()
        .map(|(country, _)| *country)
        .find(|country| normalized.contains(country))
}

/// Starter dishes for a destination: the country list, or the generic list
#[must_use]
pub fn local_food_starters(destination: &str) -> Vec<String> {
    let starters = match_food_country(destination)
        .and_then(|key| {
            FOOD_STARTERS_BY_COUNTRY
                .iter()
                .find(|(country, _)| *country == key)
        })
        .map_or(&GENERIC_STARTERS, |(_, dishes)| dishes);
    starters.iter().map(|dish| (*dish).to_string()).collect()
}

#[must_use]
pub fn food_guide(destination: &str, dietary_notes: &str) -> Sections<String> {
    let mut prompts = vec![
        "Ask locals: “What’s the one dish this city does best?”".to_string(),
        "Try: one market meal, one street snack, one sit-down specialty.".to_string(),
    ];
    let dietary_notes = dietary_notes.trim();
    if !dietary_notes.is_empty() {
        prompts.push(format!("Diet note: {dietary_notes}"));
    }

    let mut sections = Sections::new();
    sections.insert(LOCAL_FOODS_CATEGORY, local_food_starters(destination));
    sections.insert(GAME_PLAN_CATEGORY, prompts);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Tokyo, Japan", Some("japan"))]
    #[case("Hanoi, VIETNAM", Some("vietnam"))]
    #[case("Athens, Greece", Some("greece"))]
    #[case("Osaka", None)]
    #[case("Lisbon, Portugal", None)]
    fn test_match_food_country(#[case] destination: &str, #[case] expected: Option<&str>) {
        assert_eq!(match_food_country(destination), expected);
    }

    #[test]
    fn test_japan_starters() {
        let sections = food_guide("Tokyo, Japan", "");
        let starters = sections.get(LOCAL_FOODS_CATEGORY).unwrap();
        assert_eq!(starters[0], "Ramen");
        assert_eq!(starters.len(), 5);
    }

    #[test]
    fn test_unmatched_destination_gets_generic_list() {
        let sections = food_guide("Reykjavik", "");
        let starters = sections.get(LOCAL_FOODS_CATEGORY).unwrap();
        assert_eq!(starters[0], "Signature stew/soup of the region");
    }

    #[test]
    fn test_diet_note_is_appended() {
        let sections = food_guide("Rome, Italy", " vegetarian ");
        let plan = sections.get(GAME_PLAN_CATEGORY).unwrap();
        assert_eq!(plan.last().unwrap(), "Diet note: vegetarian");

        let sections = food_guide("Rome, Italy", "");
        assert_eq!(sections.get(GAME_PLAN_CATEGORY).unwrap().len(), 2);
    }
}
