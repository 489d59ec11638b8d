//! Typed endpoint wrappers for the emissions API
//!
//! Thin methods over [`ApiClient`]: one per REST endpoint, each with its
//! request/response schema from [`crate::types`]. Payloads are validated
//! before anything goes over the wire.

use crate::error::Error;
use crate::fetch::ApiClient;
use crate::types::{
    ActivityInput, ActivityRecord, DashboardSummary, EmissionFactor, InputsPage, NewReport, Report,
};

/// Client for the factor catalog, activity inputs, dashboard and reports
pub struct EmissionsApi {
    client: ApiClient,
}

impl EmissionsApi {
    /// Create a new emissions API client
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the emission factor catalog
    pub async fn factors(&self) -> Result<Vec<EmissionFactor>, Error> {
        self.client.get("/api/factors").send_json().await
    }

    /// Submit a new activity record. Validation failures are returned
    /// without touching the network.
    pub async fn submit_input(&self, input: &ActivityInput) -> Result<ActivityRecord, Error> {
        input.validate()?;
        self.client.post("/api/inputs").json(input)?.send_json().await
    }

    /// Fetch one page of historical activity records
    pub async fn inputs(&self, page: u32, per_page: u32) -> Result<InputsPage, Error> {
        self.client
            .get("/api/inputs")
            .query("page", page)
            .query("per_page", per_page)
            .send_json()
            .await
    }

    /// Fetch the dashboard summary: per-scope totals plus the monthly series
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, Error> {
        self.client.get("/api/dashboard/summary").send_json().await
    }

    /// Fetch all generated reports
    pub async fn reports(&self) -> Result<Vec<Report>, Error> {
        self.client.get("/api/reports").send_json().await
    }

    /// Generate a new report over a date range. Validation failures are
    /// returned without touching the network.
    pub async fn generate_report(&self, request: &NewReport) -> Result<Report, Error> {
        request.validate()?;
        self.client
            .post("/api/reports")
            .json(request)?
            .send_json()
            .await
    }

    /// Fetch a single report by ID
    pub async fn report(&self, id: i64) -> Result<Report, Error> {
        self.client
            .get(&format!("/api/reports/{}", id))
            .send_json()
            .await
    }
}
