//! Typed schemas for every API boundary
//!
//! Request payloads carry their own client-side checks; a record that fails
//! `validate()` never reaches the network layer.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| Error::validation(format!("{} must be a YYYY-MM-DD date", field)))
}

/// User profile returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: i64,

    /// The user's display name
    #[serde(default)]
    pub username: Option<String>,

    /// The user's email address
    #[serde(default)]
    pub email: Option<String>,

    /// The company the account belongs to
    #[serde(default)]
    pub company_name: Option<String>,
}

/// GHG Protocol emission scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Scope {
    /// Scope 1: direct emissions
    One,
    /// Scope 2: indirect emissions from purchased energy
    Two,
    /// Scope 3: other indirect emissions
    Three,
}

impl Scope {
    /// The scope number as it appears on the wire
    pub fn number(self) -> u8 {
        u8::from(self)
    }
}

impl TryFrom<u8> for Scope {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Scope::One),
            2 => Ok(Scope::Two),
            3 => Ok(Scope::Three),
            other => Err(format!("invalid emission scope: {}", other)),
        }
    }
}

impl From<Scope> for u8 {
    fn from(scope: Scope) -> u8 {
        match scope {
            Scope::One => 1,
            Scope::Two => 2,
            Scope::Three => 3,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope {}", self.number())
    }
}

/// An emission factor from the server catalog. Read-only; fetched, never
/// mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// The factor ID
    pub id: i64,

    /// Human-readable name, e.g. "Grid Electricity (UK Average)"
    pub name: String,

    /// Grouping used by the input form, e.g. "Fuel" or "Electricity"
    pub category: String,

    /// The GHG Protocol scope this factor belongs to
    pub scope: Scope,

    /// The activity unit the factor applies to, e.g. "kWh" or "liter"
    pub unit: String,

    /// Conversion coefficient, kg CO2e per activity unit
    #[serde(default)]
    pub factor_value: Option<f64>,

    /// Unit of the converted quantity
    #[serde(default)]
    pub co2e_unit: Option<String>,

    /// Where the factor was published, e.g. "DEFRA 2023"
    #[serde(default)]
    pub source: Option<String>,
}

/// A new activity record, submitted as a full unit. The server looks up the
/// factor and does the emission arithmetic; the client only validates shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityInput {
    /// The emission factor this activity is recorded against
    pub factor_id: i64,

    /// The measured activity quantity; must be positive
    pub activity_value: f64,

    /// The unit of the measured quantity
    pub activity_unit: String,

    /// Start of the period the activity covers, YYYY-MM-DD
    pub date_period_start: String,
}

impl ActivityInput {
    /// Client-side schema check, run before submission
    pub fn validate(&self) -> Result<(), Error> {
        if self.factor_id <= 0 {
            return Err(Error::validation("factor_id is required"));
        }
        if !self.activity_value.is_finite() || self.activity_value <= 0.0 {
            return Err(Error::validation("activity_value must be a positive number"));
        }
        if self.activity_unit.trim().is_empty() {
            return Err(Error::validation("activity_unit is required"));
        }
        parse_date("date_period_start", &self.date_period_start)?;
        Ok(())
    }
}

/// A stored activity record as echoed back by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// The record ID
    pub id: i64,

    /// The emission factor the activity was recorded against
    pub factor_id: i64,

    /// The measured activity quantity
    pub activity_value: f64,

    /// The unit of the measured quantity
    pub activity_unit: String,

    /// Start of the period the activity covers
    pub date_period_start: String,

    /// Emissions computed server-side for this record
    #[serde(default)]
    pub calculated_emissions_kg: Option<f64>,
}

/// One page of historical activity records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputsPage {
    /// The records on this page
    pub inputs: Vec<ActivityRecord>,

    /// Total number of pages
    pub total_pages: u32,

    /// The page this response covers
    pub current_page: u32,

    /// Total number of records across all pages
    pub total_items: u64,
}

/// Emissions totals per scope for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeSummary {
    /// Scope 1 total, kg CO2e
    pub scope1: f64,

    /// Scope 2 total, kg CO2e
    pub scope2: f64,

    /// Scope 3 total, kg CO2e
    pub scope3: f64,

    /// Grand total across all scopes, kg CO2e
    pub total: f64,
}

/// One month of aggregated emissions in the dashboard time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEmissions {
    /// The month, formatted YYYY-MM
    pub month: String,

    /// Total emissions for the month, kg CO2e
    pub total_emissions: f64,
}

/// High-level dashboard statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Per-scope totals
    pub scope_summary: ScopeSummary,

    /// Monthly totals, oldest first
    pub time_series: Vec<MonthlyEmissions>,
}

/// A generated emissions report. Immutable once generated; the grand total
/// is computed server-side and exporters render it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The report ID
    pub id: i64,

    /// Report name chosen by the user
    pub report_name: String,

    /// Start of the reporting period, YYYY-MM-DD
    pub start_date: String,

    /// End of the reporting period, YYYY-MM-DD
    pub end_date: String,

    /// Scope 1 total, kg CO2e
    pub total_scope1_kg: f64,

    /// Scope 2 total, kg CO2e
    pub total_scope2_kg: f64,

    /// Scope 3 total, kg CO2e
    pub total_scope3_kg: f64,

    /// Grand total, kg CO2e; authoritative, never recomputed client-side
    pub total_all_scopes_kg: f64,

    /// Generation timestamp, ISO 8601
    pub generated_at: String,
}

/// Request payload for report generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    /// Report name chosen by the user
    pub report_name: String,

    /// Start of the reporting period, YYYY-MM-DD
    pub start_date: String,

    /// End of the reporting period, YYYY-MM-DD
    pub end_date: String,
}

impl NewReport {
    /// Client-side schema check, run before submission
    pub fn validate(&self) -> Result<(), Error> {
        if self.report_name.trim().is_empty() {
            return Err(Error::validation("report_name is required"));
        }
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if end < start {
            return Err(Error::validation("end_date must not precede start_date"));
        }
        Ok(())
    }
}
