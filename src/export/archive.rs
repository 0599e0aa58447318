use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::{JSON_FILE, MARKDOWN_FILE, export_to_json, plan_to_csv, plan_to_markdown};
use crate::Result;
use crate::models::{GeneratedPlan, TripRequest};

/// Deflate-compressed archive holding the Markdown, JSON and CSV exports
pub fn build_export_zip(request: &TripRequest, plan: &GeneratedPlan) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file(MARKDOWN_FILE, options)?;
    zip.write_all(plan_to_markdown(request, plan).as_bytes())?;

    zip.start_file(JSON_FILE, options)?;
    zip.write_all(export_to_json(request, plan)?.as_bytes())?;

    for file in plan_to_csv(plan)? {
        zip.start_file(file.name, options)?;
        zip.write_all(file.contents.as_bytes())?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!("Built export archive ({} bytes)", bytes.len());
    Ok(bytes)
}
