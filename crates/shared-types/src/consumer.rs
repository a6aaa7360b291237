use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::CaseType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum ConsumerSubtype {
    ProductDefect,
    ServiceDeficiency,
    UnfairTradePractice,
    Other,
}

impl ConsumerSubtype {
    pub const ALL: [ConsumerSubtype; 4] = [
        ConsumerSubtype::ProductDefect,
        ConsumerSubtype::ServiceDeficiency,
        ConsumerSubtype::UnfairTradePractice,
        ConsumerSubtype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumerSubtype::ProductDefect => "ProductDefect",
            ConsumerSubtype::ServiceDeficiency => "ServiceDeficiency",
            ConsumerSubtype::UnfairTradePractice => "UnfairTradePractice",
            ConsumerSubtype::Other => "Other",
        }
    }
}

impl fmt::Display for ConsumerSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Extension payloads ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct ProductDefectDetail {
    pub product_type: Option<String>,
    pub defect_nature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct ServiceDeficiencyDetail {
    pub service_type: Option<String>,
    pub deficiency_nature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct UnfairTradePracticeDetail {
    pub practice_type: Option<String>,
    pub misleading_aspect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsumerDetail {
    ProductDefect(ProductDefectDetail),
    ServiceDeficiency(ServiceDeficiencyDetail),
    UnfairTradePractice(UnfairTradePracticeDetail),
}

impl ConsumerDetail {
    pub fn subtype(&self) -> ConsumerSubtype {
        match self {
            ConsumerDetail::ProductDefect(_) => ConsumerSubtype::ProductDefect,
            ConsumerDetail::ServiceDeficiency(_) => ConsumerSubtype::ServiceDeficiency,
            ConsumerDetail::UnfairTradePractice(_) => ConsumerSubtype::UnfairTradePractice,
        }
    }
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct ConsumerDisputeCaseRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub case_type: CaseType,
    pub subtype: ConsumerSubtype,
    pub product_service_details: String,
    pub purchase_date: Option<NaiveDate>,
    pub compensation_claimed: Option<f64>,
    pub detail_id: Option<Uuid>,
    pub other_details: Option<String>,
}

// ── Assembled case ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerDisputeCase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subtype: ConsumerSubtype,
    pub product_service_details: String,
    pub purchase_date: Option<NaiveDate>,
    pub compensation_claimed: Option<f64>,
    pub other_details: Option<String>,
    pub detail: Option<ConsumerDetail>,
}

// ── Export shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerDetailExport {
    ProductDefect(ProductDefectDetail),
    ServiceDeficiency(ServiceDeficiencyDetail),
    UnfairTradePractice(UnfairTradePracticeDetail),
}

impl From<ConsumerDetail> for ConsumerDetailExport {
    fn from(d: ConsumerDetail) -> Self {
        match d {
            ConsumerDetail::ProductDefect(p) => ConsumerDetailExport::ProductDefect(p),
            ConsumerDetail::ServiceDeficiency(s) => ConsumerDetailExport::ServiceDeficiency(s),
            ConsumerDetail::UnfairTradePractice(u) => ConsumerDetailExport::UnfairTradePractice(u),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerDisputeCaseExport {
    pub id: String,
    pub case_type: CaseType,
    pub subtype: ConsumerSubtype,
    pub created_at: String,
    pub updated_at: String,
    pub product_service_details: String,
    pub purchase_date: Option<String>,
    pub compensation_claimed: Option<f64>,
    pub other_details: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ConsumerDetailExport>,
}

impl From<ConsumerDisputeCase> for ConsumerDisputeCaseExport {
    fn from(c: ConsumerDisputeCase) -> Self {
        Self {
            id: c.id.to_string(),
            case_type: CaseType::ConsumerDispute,
            subtype: c.subtype,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            product_service_details: c.product_service_details,
            purchase_date: c.purchase_date.map(|d| d.to_string()),
            compensation_claimed: c.compensation_claimed,
            other_details: c.other_details,
            detail: c.detail.map(Into::into),
        }
    }
}
