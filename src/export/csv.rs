use csv::Writer;

use super::{ExportFile, HEALTH_CSV_FILE, PACKING_CSV_FILE, REMINDERS_CSV_FILE};
use crate::models::{ChecklistEntry, GeneratedPlan, Sections};
use crate::{Result, TravelBuddiError};

const CHECKLIST_HEADER: [&str; 4] = ["category", "item", "why", "tags"];

/// Packing, health and reminder tables as CSV text
pub fn plan_to_csv(plan: &GeneratedPlan) -> Result<Vec<ExportFile>> {
    Ok(vec![
        ExportFile::new(PACKING_CSV_FILE, checklist_csv(&plan.packing)?),
        ExportFile::new(HEALTH_CSV_FILE, checklist_csv(&plan.health)?),
        ExportFile::new(REMINDERS_CSV_FILE, reminders_csv(&plan.reminders)?),
    ])
}

fn checklist_csv(sections: &Sections<ChecklistEntry>) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(CHECKLIST_HEADER)?;
    for (category, entries) in sections.iter() {
        for entry in entries {
            let tags = entry.tags.join(",");
            writer.write_record([
                category,
                entry.item.as_str(),
                entry.why.as_str(),
                tags.as_str(),
            ])?;
        }
    }
    finish(writer)
}

fn reminders_csv(reminders: &[String]) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["reminder"])?;
    for reminder in reminders {
        writer.write_record([reminder])?;
    }
    finish(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| TravelBuddiError::export(format!("CSV writer failed: {}", e.error())))?;
    String::from_utf8(bytes)
        .map_err(|e| TravelBuddiError::export(format!("CSV output is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::sample_plan;

    fn file<'a>(files: &'a [ExportFile], name: &str) -> &'a str {
        &files.iter().find(|file| file.name == name).unwrap().contents
    }

    #[test]
    fn test_three_files() {
        let files = plan_to_csv(&sample_plan()).unwrap();
        let names: Vec<&str> = files.iter().map(|file| file.name).collect();
        assert_eq!(names, [PACKING_CSV_FILE, HEALTH_CSV_FILE, REMINDERS_CSV_FILE]);
    }

    #[test]
    fn test_checklist_rows() {
        let plan = sample_plan();
        let files = plan_to_csv(&plan).unwrap();

        let mut reader = csv::Reader::from_reader(file(&files, PACKING_CSV_FILE).as_bytes());
        assert_eq!(reader.headers().unwrap(), &CHECKLIST_HEADER[..]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.unwrap()).collect();
        let expected: usize = plan.packing.item_count();
        assert_eq!(rows.len(), expected);

        let (category, entries) = plan.packing.iter().next().unwrap();
        assert_eq!(&rows[0][0], category);
        assert_eq!(&rows[0][1], entries[0].item);
        assert_eq!(&rows[0][3], entries[0].tags.join(","));
    }

    #[test]
    fn test_quotes_fields_with_commas() {
        let mut packing = Sections::new();
        packing.insert(
            "Essentials",
            vec![ChecklistEntry::new("Phone, charger", "Power", &["tech", "core"])],
        );
        let plan = GeneratedPlan {
            packing,
            ..GeneratedPlan::default()
        };
        let files = plan_to_csv(&plan).unwrap();
        let mut lines = file(&files, PACKING_CSV_FILE).lines();
        assert_eq!(lines.next(), Some("category,item,why,tags"));
        assert_eq!(
            lines.next(),
            Some("Essentials,\"Phone, charger\",Power,\"tech,core\"")
        );
    }

    #[test]
    fn test_reminders_file() {
        let plan = sample_plan();
        let files = plan_to_csv(&plan).unwrap();
        let lines: Vec<&str> = file(&files, REMINDERS_CSV_FILE).lines().collect();
        assert_eq!(lines[0], "reminder");
        assert_eq!(lines.len(), plan.reminders.len() + 1);
    }
}
