use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::CaseType;
use crate::common::{PropertyDetail, PropertyDetailExport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum CivilSubtype {
    ContractDispute,
    PropertyDispute,
    MoneyRecovery,
    TortClaim,
    Other,
}

impl CivilSubtype {
    pub const ALL: [CivilSubtype; 5] = [
        CivilSubtype::ContractDispute,
        CivilSubtype::PropertyDispute,
        CivilSubtype::MoneyRecovery,
        CivilSubtype::TortClaim,
        CivilSubtype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CivilSubtype::ContractDispute => "ContractDispute",
            CivilSubtype::PropertyDispute => "PropertyDispute",
            CivilSubtype::MoneyRecovery => "MoneyRecovery",
            CivilSubtype::TortClaim => "TortClaim",
            CivilSubtype::Other => "Other",
        }
    }
}

impl fmt::Display for CivilSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Extension payloads ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct ContractDisputeDetail {
    pub contract_type: Option<String>,
    pub breach_details: Option<String>,
}

/// The property-dispute extension has no scalar payload; it anchors the
/// collection of disputed properties (shared entities, linked by id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDisputeDetail {
    pub properties: Vec<PropertyDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct MoneyRecoveryDetail {
    pub principal_amount: Option<f64>,
    pub debt_documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct TortClaimDetail {
    pub tort_type: Option<String>,
    pub damages_claimed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CivilDetail {
    ContractDispute(ContractDisputeDetail),
    PropertyDispute(PropertyDisputeDetail),
    MoneyRecovery(MoneyRecoveryDetail),
    TortClaim(TortClaimDetail),
}

impl CivilDetail {
    pub fn subtype(&self) -> CivilSubtype {
        match self {
            CivilDetail::ContractDispute(_) => CivilSubtype::ContractDispute,
            CivilDetail::PropertyDispute(_) => CivilSubtype::PropertyDispute,
            CivilDetail::MoneyRecovery(_) => CivilSubtype::MoneyRecovery,
            CivilDetail::TortClaim(_) => CivilSubtype::TortClaim,
        }
    }
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct CivilCaseRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub case_type: CaseType,
    pub subtype: CivilSubtype,
    pub relief_sought: String,
    pub claim_amount: Option<f64>,
    pub settlement_attempts: bool,
    pub detail_id: Option<Uuid>,
    pub other_details: Option<String>,
}

// ── Assembled case ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivilCase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subtype: CivilSubtype,
    pub relief_sought: String,
    pub claim_amount: Option<f64>,
    pub settlement_attempts: bool,
    pub other_details: Option<String>,
    pub detail: Option<CivilDetail>,
}

// ── Export shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDisputeExport {
    pub properties: Vec<PropertyDetailExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CivilDetailExport {
    ContractDispute(ContractDisputeDetail),
    PropertyDispute(PropertyDisputeExport),
    MoneyRecovery(MoneyRecoveryDetail),
    TortClaim(TortClaimDetail),
}

impl From<CivilDetail> for CivilDetailExport {
    fn from(d: CivilDetail) -> Self {
        match d {
            CivilDetail::ContractDispute(c) => CivilDetailExport::ContractDispute(c),
            CivilDetail::PropertyDispute(p) => CivilDetailExport::PropertyDispute(PropertyDisputeExport {
                properties: p.properties.into_iter().map(Into::into).collect(),
            }),
            CivilDetail::MoneyRecovery(m) => CivilDetailExport::MoneyRecovery(m),
            CivilDetail::TortClaim(t) => CivilDetailExport::TortClaim(t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CivilCaseExport {
    pub id: String,
    pub case_type: CaseType,
    pub subtype: CivilSubtype,
    pub created_at: String,
    pub updated_at: String,
    pub relief_sought: String,
    pub claim_amount: Option<f64>,
    pub settlement_attempts: bool,
    pub other_details: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<CivilDetailExport>,
}

impl From<CivilCase> for CivilCaseExport {
    fn from(c: CivilCase) -> Self {
        Self {
            id: c.id.to_string(),
            case_type: CaseType::Civil,
            subtype: c.subtype,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            relief_sought: c.relief_sought,
            claim_amount: c.claim_amount,
            settlement_attempts: c.settlement_attempts,
            other_details: c.other_details,
            detail: c.detail.map(Into::into),
        }
    }
}
