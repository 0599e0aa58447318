use serde::Serialize;

use crate::Result;
use crate::models::{GeneratedPlan, TripRequest};

/// `{ "input": ..., "plan": ... }` document
#[derive(Debug, Clone, Serialize)]
pub struct PlanExport<'a> {
    pub input: &'a TripRequest,
    pub plan: &'a GeneratedPlan,
}

impl<'a> PlanExport<'a> {
    #[must_use]
    pub fn new(input: &'a TripRequest, plan: &'a GeneratedPlan) -> Self {
        Self { input, plan }
    }
}

/// Pretty-printed JSON export. Dates are `YYYY-MM-DD` strings.
pub fn export_to_json(request: &TripRequest, plan: &GeneratedPlan) -> Result<String> {
    Ok(serde_json::to_string_pretty(&PlanExport::new(request, plan))?)
}
