use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::CaseType;
use crate::common::{Person, PersonExport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum LabourSubtype {
    WrongfulTermination,
    WageDispute,
    WorkplaceDiscrimination,
    Other,
}

impl LabourSubtype {
    pub const ALL: [LabourSubtype; 4] = [
        LabourSubtype::WrongfulTermination,
        LabourSubtype::WageDispute,
        LabourSubtype::WorkplaceDiscrimination,
        LabourSubtype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabourSubtype::WrongfulTermination => "WrongfulTermination",
            LabourSubtype::WageDispute => "WageDispute",
            LabourSubtype::WorkplaceDiscrimination => "WorkplaceDiscrimination",
            LabourSubtype::Other => "Other",
        }
    }
}

impl fmt::Display for LabourSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Extension payloads ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct WrongfulTerminationDetail {
    pub termination_date: Option<NaiveDate>,
    pub termination_reason_stated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct WageDisputeDetail {
    pub disputed_amount: Option<f64>,
    pub wage_dispute_type: Option<String>,
}

/// Discrimination extension with its claimed grounds (value children).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkplaceDiscriminationDetail {
    pub incident_details: Option<String>,
    pub grounds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LabourDetail {
    WrongfulTermination(WrongfulTerminationDetail),
    WageDispute(WageDisputeDetail),
    WorkplaceDiscrimination(WorkplaceDiscriminationDetail),
}

impl LabourDetail {
    pub fn subtype(&self) -> LabourSubtype {
        match self {
            LabourDetail::WrongfulTermination(_) => LabourSubtype::WrongfulTermination,
            LabourDetail::WageDispute(_) => LabourSubtype::WageDispute,
            LabourDetail::WorkplaceDiscrimination(_) => LabourSubtype::WorkplaceDiscrimination,
        }
    }
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct LabourDisputeCaseRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub case_type: CaseType,
    pub subtype: LabourSubtype,
    pub employee_id: Option<Uuid>,
    pub employer_details: Option<String>,
    pub employment_start_date: Option<NaiveDate>,
    pub detail_id: Option<Uuid>,
    pub other_details: Option<String>,
}

// ── Assembled case ──────────────────────────────────────────────────

/// The employee is a shared person record; `None` after the person has
/// been detached from the case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabourDisputeCase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subtype: LabourSubtype,
    pub employee: Option<Person>,
    pub employer_details: Option<String>,
    pub employment_start_date: Option<NaiveDate>,
    pub other_details: Option<String>,
    pub detail: Option<LabourDetail>,
}

// ── Export shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrongfulTerminationExport {
    pub termination_date: Option<String>,
    pub termination_reason_stated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabourDetailExport {
    WrongfulTermination(WrongfulTerminationExport),
    WageDispute(WageDisputeDetail),
    WorkplaceDiscrimination(WorkplaceDiscriminationDetail),
}

impl From<LabourDetail> for LabourDetailExport {
    fn from(d: LabourDetail) -> Self {
        match d {
            LabourDetail::WrongfulTermination(w) => {
                LabourDetailExport::WrongfulTermination(WrongfulTerminationExport {
                    termination_date: w.termination_date.map(|d| d.to_string()),
                    termination_reason_stated: w.termination_reason_stated,
                })
            }
            LabourDetail::WageDispute(w) => LabourDetailExport::WageDispute(w),
            LabourDetail::WorkplaceDiscrimination(w) => {
                LabourDetailExport::WorkplaceDiscrimination(w)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabourDisputeCaseExport {
    pub id: String,
    pub case_type: CaseType,
    pub subtype: LabourSubtype,
    pub created_at: String,
    pub updated_at: String,
    pub employee: Option<PersonExport>,
    pub employer_details: Option<String>,
    pub employment_start_date: Option<String>,
    pub other_details: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<LabourDetailExport>,
}

impl From<LabourDisputeCase> for LabourDisputeCaseExport {
    fn from(c: LabourDisputeCase) -> Self {
        Self {
            id: c.id.to_string(),
            case_type: CaseType::LabourDispute,
            subtype: c.subtype,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            employee: c.employee.map(Into::into),
            employer_details: c.employer_details,
            employment_start_date: c.employment_start_date.map(|d| d.to_string()),
            other_details: c.other_details,
            detail: c.detail.map(Into::into),
        }
    }
}
