use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::CaseType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum PublicLawSubtype {
    Constitutional,
    Taxation,
    Environmental,
    Other,
}

impl PublicLawSubtype {
    pub const ALL: [PublicLawSubtype; 4] = [
        PublicLawSubtype::Constitutional,
        PublicLawSubtype::Taxation,
        PublicLawSubtype::Environmental,
        PublicLawSubtype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PublicLawSubtype::Constitutional => "Constitutional",
            PublicLawSubtype::Taxation => "Taxation",
            PublicLawSubtype::Environmental => "Environmental",
            PublicLawSubtype::Other => "Other",
        }
    }
}

impl fmt::Display for PublicLawSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appellate forum a taxation matter has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum AppealStage {
    FirstAppeal,
    Tribunal,
    HighCourt,
    SupremeCourt,
}

impl AppealStage {
    pub const ALL: [AppealStage; 4] = [
        AppealStage::FirstAppeal,
        AppealStage::Tribunal,
        AppealStage::HighCourt,
        AppealStage::SupremeCourt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppealStage::FirstAppeal => "FirstAppeal",
            AppealStage::Tribunal => "Tribunal",
            AppealStage::HighCourt => "HighCourt",
            AppealStage::SupremeCourt => "SupremeCourt",
        }
    }
}

// ── Extension payloads ──────────────────────────────────────────────

/// Constitutional challenge with the fundamental rights invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstitutionalDetail {
    pub government_action_challenged: Option<String>,
    pub fundamental_rights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct TaxationDetail {
    pub assessment_year: Option<String>,
    pub disputed_amount: Option<f64>,
    pub tax_authority: Option<String>,
    pub appeal_stage: Option<AppealStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct EnvironmentalDetail {
    pub pollution_type: Option<String>,
    pub regulatory_authority: Option<String>,
    pub penalty_imposed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PublicLawDetail {
    Constitutional(ConstitutionalDetail),
    Taxation(TaxationDetail),
    Environmental(EnvironmentalDetail),
}

impl PublicLawDetail {
    pub fn subtype(&self) -> PublicLawSubtype {
        match self {
            PublicLawDetail::Constitutional(_) => PublicLawSubtype::Constitutional,
            PublicLawDetail::Taxation(_) => PublicLawSubtype::Taxation,
            PublicLawDetail::Environmental(_) => PublicLawSubtype::Environmental,
        }
    }
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct PublicLawCaseRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub case_type: CaseType,
    pub subtype: PublicLawSubtype,
    pub detail_id: Option<Uuid>,
    pub other_details: Option<String>,
}

// ── Assembled case ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicLawCase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subtype: PublicLawSubtype,
    pub other_details: Option<String>,
    pub detail: Option<PublicLawDetail>,
}

// ── Export shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicLawDetailExport {
    Constitutional(ConstitutionalDetail),
    Taxation(TaxationDetail),
    Environmental(EnvironmentalDetail),
}

impl From<PublicLawDetail> for PublicLawDetailExport {
    fn from(d: PublicLawDetail) -> Self {
        match d {
            PublicLawDetail::Constitutional(c) => PublicLawDetailExport::Constitutional(c),
            PublicLawDetail::Taxation(t) => PublicLawDetailExport::Taxation(t),
            PublicLawDetail::Environmental(e) => PublicLawDetailExport::Environmental(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicLawCaseExport {
    pub id: String,
    pub case_type: CaseType,
    pub subtype: PublicLawSubtype,
    pub created_at: String,
    pub updated_at: String,
    pub other_details: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<PublicLawDetailExport>,
}

impl From<PublicLawCase> for PublicLawCaseExport {
    fn from(c: PublicLawCase) -> Self {
        Self {
            id: c.id.to_string(),
            case_type: CaseType::PublicLaw,
            subtype: c.subtype,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            other_details: c.other_details,
            detail: c.detail.map(Into::into),
        }
    }
}
