use crate::models::{ChecklistEntry, GeneratedPlan, PlaceSuggestion, Sections, TripRequest};

/// Render the plan as a Markdown checklist document
#[must_use]
pub fn plan_to_markdown(request: &TripRequest, plan: &GeneratedPlan) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "# Travel Plan: {} → {}",
        request.origin(),
        request.destination()
    ));
    lines.push(String::new());
    lines.push(format!(
        "- Dates: {} to {}",
        request.start_date().format("%Y-%m-%d"),
        request.end_date().format("%Y-%m-%d")
    ));
    lines.push(format!("- Travelers: {}", request.travelers()));
    lines.push(format!(
        "- Style: {} | Accommodation: {} | Luggage: {}",
        request.trip_style(),
        request.accommodation(),
        request.luggage()
    ));
    lines.push(format!(
        "- Weather: {} | Rain likelihood: {}%",
        request.weather(),
        request.rain_likelihood()
    ));
    lines.push(format!("- Activities: {}", activities_line(request)));
    if !request.dietary_notes().is_empty() {
        lines.push(format!("- Dietary notes: {}", request.dietary_notes()));
    }
    if !request.health_notes().is_empty() {
        lines.push(format!("- Health notes: {}", request.health_notes()));
    }
    lines.push(String::new());

    if plan.has_enrichment() {
        lines.push("## Quick picks (from API)".to_string());
        for (section, places) in plan.enriched.iter() {
            if places.is_empty() {
                continue;
            }
            lines.push(format!("### {section}"));
            lines.extend(places.iter().map(place_line));
            lines.push(String::new());
        }
    }

    lines.push("## Packing List".to_string());
    push_checklist(&mut lines, &plan.packing);

    lines.push("## Health & Vaccines (Verify)".to_string());
    push_checklist(&mut lines, &plan.health);

    lines.push("## Places to Visit (Prompts)".to_string());
    push_bullets(&mut lines, &plan.places);

    lines.push("## Transport / Taxi (Prompts)".to_string());
    push_bullets(&mut lines, &plan.transport);

    lines.push("## Food Not to Miss".to_string());
    push_bullets(&mut lines, &plan.food);

    lines.push("## Reminders".to_string());
    lines.extend(plan.reminders.iter().map(|reminder| format!("- [ ] {reminder}")));
    lines.push(String::new());

    lines.join("\n")
}

fn activities_line(request: &TripRequest) -> String {
    if request.activities().is_empty() {
        return "None selected".to_string();
    }
    request
        .activities()
        .iter()
        .map(|activity| activity.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_checklist(lines: &mut Vec<String>, sections: &Sections<ChecklistEntry>) {
    for (category, entries) in sections.iter() {
        lines.push(format!("### {category}"));
        lines.extend(
            entries
                .iter()
                .map(|entry| format!("- [ ] **{}** — {}", entry.item, entry.why)),
        );
        lines.push(String::new());
    }
}

fn push_bullets(lines: &mut Vec<String>, sections: &Sections<String>) {
    for (category, items) in sections.iter() {
        lines.push(format!("### {category}"));
        lines.extend(items.iter().map(|item| format!("- {item}")));
        lines.push(String::new());
    }
}

/// Bullet for one suggestion. Address and rating are omitted when missing.
fn place_line(place: &PlaceSuggestion) -> String {
    let mut meta = Vec::new();
    if !place.address.is_empty() {
        meta.push(place.address.clone());
    }
    match (place.rating, place.rating_count) {
        (Some(rating), Some(count)) => meta.push(format!("⭐ {rating} ({count})")),
        (Some(rating), None) => meta.push(format!("⭐ {rating}")),
        _ => {}
    }

    let title = if place.url.is_empty() {
        place.name.clone()
    } else {
        format!("[{}]({})", place.name, place.url)
    };

    if meta.is_empty() {
        format!("- {title}")
    } else {
        format!("- {title} — {}", meta.join(" — "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::{enriched_plan, sample_plan, sample_request};

    #[test]
    fn test_header_and_summary() {
        let markdown = plan_to_markdown(&sample_request(), &sample_plan());
        let mut lines = markdown.lines();

        assert_eq!(lines.next(), Some("# Travel Plan: London, UK → Tokyo, Japan"));
        assert!(markdown.contains("- Dates: 2026-02-10 to 2026-02-14\n"));
        assert!(markdown.contains("- Travelers: 2\n"));
        assert!(markdown.contains(
            "- Style: Mid-range | Accommodation: Hotel | Luggage: Carry-on only\n"
        ));
        assert!(markdown.contains("- Weather: Mild | Rain likelihood: 40%\n"));
        assert!(markdown.contains("- Activities: City exploring, Food tour\n"));
        assert!(markdown.contains("- Dietary notes: vegetarian\n"));
        assert!(!markdown.contains("- Health notes:"));
        assert!(markdown.ends_with('\n'));
    }

    #[test]
    fn test_sections_in_order() {
        let markdown = plan_to_markdown(&sample_request(), &sample_plan());
        let headings = [
            "## Packing List",
            "## Health & Vaccines (Verify)",
            "## Places to Visit (Prompts)",
            "## Transport / Taxi (Prompts)",
            "## Food Not to Miss",
            "## Reminders",
        ];
        let positions: Vec<usize> = headings
            .iter()
            .map(|heading| markdown.find(heading).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!markdown.contains("## Quick picks"));
    }

    #[test]
    fn test_checklist_item_format() {
        let plan = sample_plan();
        let markdown = plan_to_markdown(&sample_request(), &plan);
        let entry = &plan.packing.iter().next().unwrap().1[0];
        assert!(markdown.contains(&format!("- [ ] **{}** — {}", entry.item, entry.why)));
        assert!(markdown.contains("- [ ] Set up roaming/eSIM plan before departure."));
    }

    #[test]
    fn test_quick_picks_rendering() {
        let markdown = plan_to_markdown(&sample_request(), &enriched_plan());

        assert!(markdown.contains("## Quick picks (from API)\n### Top attractions\n"));
        assert!(markdown.contains(
            "- [Senso-ji](https://maps.google.com/?cid=1) — 2-3-1 Asakusa, Taito City — ⭐ 4.5 (81234)"
        ));
        assert!(markdown.contains("- Tokyo Tower — ⭐ 7\n"));
        // empty sections are skipped
        assert!(!markdown.contains("### Nightlife"));
        let quick_picks = markdown.find("## Quick picks").unwrap();
        assert!(quick_picks < markdown.find("## Packing List").unwrap());
    }

    #[test]
    fn test_no_activities() {
        let draft = serde_json::json!({
            "origin": "Oslo",
            "destination": "Bergen",
            "start_date": "2026-06-01",
            "end_date": "2026-06-01",
        });
        let request: TripRequest = serde_json::from_value(draft).unwrap();
        let markdown = plan_to_markdown(&request, &GeneratedPlan::default());
        assert!(markdown.contains("- Activities: None selected\n"));
    }
}
