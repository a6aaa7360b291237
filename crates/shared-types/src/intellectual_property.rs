use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::CaseType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum IpSubtype {
    Patent,
    Trademark,
    Copyright,
    Other,
}

impl IpSubtype {
    pub const ALL: [IpSubtype; 4] = [
        IpSubtype::Patent,
        IpSubtype::Trademark,
        IpSubtype::Copyright,
        IpSubtype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IpSubtype::Patent => "Patent",
            IpSubtype::Trademark => "Trademark",
            IpSubtype::Copyright => "Copyright",
            IpSubtype::Other => "Other",
        }
    }
}

impl fmt::Display for IpSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Extension payloads ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct PatentDetail {
    pub invention_details: Option<String>,
    pub dispute_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct TrademarkDetail {
    pub trademark_description: Option<String>,
    pub dispute_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct CopyrightDetail {
    pub work_type: Option<String>,
    pub infringing_work_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IpDetail {
    Patent(PatentDetail),
    Trademark(TrademarkDetail),
    Copyright(CopyrightDetail),
}

impl IpDetail {
    pub fn subtype(&self) -> IpSubtype {
        match self {
            IpDetail::Patent(_) => IpSubtype::Patent,
            IpDetail::Trademark(_) => IpSubtype::Trademark,
            IpDetail::Copyright(_) => IpSubtype::Copyright,
        }
    }
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct IntellectualPropertyCaseRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub case_type: CaseType,
    pub subtype: IpSubtype,
    pub ip_owner_details: Option<String>,
    pub detail_id: Option<Uuid>,
    pub other_details: Option<String>,
}

// ── Assembled case ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntellectualPropertyCase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subtype: IpSubtype,
    pub ip_owner_details: Option<String>,
    pub other_details: Option<String>,
    pub detail: Option<IpDetail>,
}

// ── Export shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IpDetailExport {
    Patent(PatentDetail),
    Trademark(TrademarkDetail),
    Copyright(CopyrightDetail),
}

impl From<IpDetail> for IpDetailExport {
    fn from(d: IpDetail) -> Self {
        match d {
            IpDetail::Patent(p) => IpDetailExport::Patent(p),
            IpDetail::Trademark(t) => IpDetailExport::Trademark(t),
            IpDetail::Copyright(c) => IpDetailExport::Copyright(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntellectualPropertyCaseExport {
    pub id: String,
    pub case_type: CaseType,
    pub subtype: IpSubtype,
    pub created_at: String,
    pub updated_at: String,
    pub ip_owner_details: Option<String>,
    pub other_details: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<IpDetailExport>,
}

impl From<IntellectualPropertyCase> for IntellectualPropertyCaseExport {
    fn from(c: IntellectualPropertyCase) -> Self {
        Self {
            id: c.id.to_string(),
            case_type: CaseType::IntellectualProperty,
            subtype: c.subtype,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            ip_owner_details: c.ip_owner_details,
            other_details: c.other_details,
            detail: c.detail.map(Into::into),
        }
    }
}
