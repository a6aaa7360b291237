use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::CaseType;
use crate::common::{Person, PersonExport, PropertyDetail, PropertyDetailExport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum PropertyLawSubtype {
    TitleDispute,
    EvictionSuit,
    PartitionSuit,
    Other,
}

impl PropertyLawSubtype {
    pub const ALL: [PropertyLawSubtype; 4] = [
        PropertyLawSubtype::TitleDispute,
        PropertyLawSubtype::EvictionSuit,
        PropertyLawSubtype::PartitionSuit,
        PropertyLawSubtype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyLawSubtype::TitleDispute => "TitleDispute",
            PropertyLawSubtype::EvictionSuit => "EvictionSuit",
            PropertyLawSubtype::PartitionSuit => "PartitionSuit",
            PropertyLawSubtype::Other => "Other",
        }
    }
}

impl fmt::Display for PropertyLawSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Extension payloads ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct TitleDisputeDetail {
    pub claim_basis: Option<String>,
    pub possession_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct EvictionSuitDetail {
    pub eviction_grounds: Option<String>,
    pub arrears_amount: Option<f64>,
}

/// Partition extension; co-owners are shared person records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionSuitDetail {
    pub share_claimed: Option<String>,
    pub co_owners: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyLawDetail {
    TitleDispute(TitleDisputeDetail),
    EvictionSuit(EvictionSuitDetail),
    PartitionSuit(PartitionSuitDetail),
}

impl PropertyLawDetail {
    pub fn subtype(&self) -> PropertyLawSubtype {
        match self {
            PropertyLawDetail::TitleDispute(_) => PropertyLawSubtype::TitleDispute,
            PropertyLawDetail::EvictionSuit(_) => PropertyLawSubtype::EvictionSuit,
            PropertyLawDetail::PartitionSuit(_) => PropertyLawSubtype::PartitionSuit,
        }
    }
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct PropertyLawCaseRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub case_type: CaseType,
    pub subtype: PropertyLawSubtype,
    pub detail_id: Option<Uuid>,
    pub other_details: Option<String>,
}

// ── Assembled case ──────────────────────────────────────────────────

/// Every property-law case carries the disputed properties on the base
/// record, whichever subtype it has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyLawCase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subtype: PropertyLawSubtype,
    pub other_details: Option<String>,
    pub properties: Vec<PropertyDetail>,
    pub detail: Option<PropertyLawDetail>,
}

// ── Export shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionSuitExport {
    pub share_claimed: Option<String>,
    pub co_owners: Vec<PersonExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyLawDetailExport {
    TitleDispute(TitleDisputeDetail),
    EvictionSuit(EvictionSuitDetail),
    PartitionSuit(PartitionSuitExport),
}

impl From<PropertyLawDetail> for PropertyLawDetailExport {
    fn from(d: PropertyLawDetail) -> Self {
        match d {
            PropertyLawDetail::TitleDispute(t) => PropertyLawDetailExport::TitleDispute(t),
            PropertyLawDetail::EvictionSuit(e) => PropertyLawDetailExport::EvictionSuit(e),
            PropertyLawDetail::PartitionSuit(p) => {
                PropertyLawDetailExport::PartitionSuit(PartitionSuitExport {
                    share_claimed: p.share_claimed,
                    co_owners: p.co_owners.into_iter().map(Into::into).collect(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyLawCaseExport {
    pub id: String,
    pub case_type: CaseType,
    pub subtype: PropertyLawSubtype,
    pub created_at: String,
    pub updated_at: String,
    pub properties: Vec<PropertyDetailExport>,
    pub other_details: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<PropertyLawDetailExport>,
}

impl From<PropertyLawCase> for PropertyLawCaseExport {
    fn from(c: PropertyLawCase) -> Self {
        Self {
            id: c.id.to_string(),
            case_type: CaseType::PropertyLaw,
            subtype: c.subtype,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            properties: c.properties.into_iter().map(Into::into).collect(),
            other_details: c.other_details,
            detail: c.detail.map(Into::into),
        }
    }
}
