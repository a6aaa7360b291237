use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::CaseType;
use crate::common::{ChildDetail, ChildDetailExport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum FamilyLawSubtype {
    Divorce,
    Maintenance,
    ChildCustody,
    DomesticViolence,
    Other,
}

impl FamilyLawSubtype {
    pub const ALL: [FamilyLawSubtype; 5] = [
        FamilyLawSubtype::Divorce,
        FamilyLawSubtype::Maintenance,
        FamilyLawSubtype::ChildCustody,
        FamilyLawSubtype::DomesticViolence,
        FamilyLawSubtype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyLawSubtype::Divorce => "Divorce",
            FamilyLawSubtype::Maintenance => "Maintenance",
            FamilyLawSubtype::ChildCustody => "ChildCustody",
            FamilyLawSubtype::DomesticViolence => "DomesticViolence",
            FamilyLawSubtype::Other => "Other",
        }
    }
}

impl fmt::Display for FamilyLawSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of abuse recorded on a domestic-violence matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum ViolenceType {
    Physical,
    Emotional,
    Sexual,
    Financial,
    Verbal,
    Other,
}

impl ViolenceType {
    pub const ALL: [ViolenceType; 6] = [
        ViolenceType::Physical,
        ViolenceType::Emotional,
        ViolenceType::Sexual,
        ViolenceType::Financial,
        ViolenceType::Verbal,
        ViolenceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolenceType::Physical => "Physical",
            ViolenceType::Emotional => "Emotional",
            ViolenceType::Sexual => "Sexual",
            ViolenceType::Financial => "Financial",
            ViolenceType::Verbal => "Verbal",
            ViolenceType::Other => "Other",
        }
    }
}

// ── Extension payloads ──────────────────────────────────────────────

/// Divorce extension with its pleaded grounds (value children).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivorceDetail {
    pub divorce_type: Option<String>,
    pub grounds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct MaintenanceDetail {
    pub maintenance_for: Option<String>,
    pub amount_claimed: Option<f64>,
}

/// Custody extension; the children are shared entities linked by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildCustodyDetail {
    pub visitation_rights_proposed: Option<String>,
    pub children: Vec<ChildDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticViolenceDetail {
    pub protection_order_sought: bool,
    pub violence_types: Vec<ViolenceType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FamilyDetail {
    Divorce(DivorceDetail),
    Maintenance(MaintenanceDetail),
    ChildCustody(ChildCustodyDetail),
    DomesticViolence(DomesticViolenceDetail),
}

impl FamilyDetail {
    pub fn subtype(&self) -> FamilyLawSubtype {
        match self {
            FamilyDetail::Divorce(_) => FamilyLawSubtype::Divorce,
            FamilyDetail::Maintenance(_) => FamilyLawSubtype::Maintenance,
            FamilyDetail::ChildCustody(_) => FamilyLawSubtype::ChildCustody,
            FamilyDetail::DomesticViolence(_) => FamilyLawSubtype::DomesticViolence,
        }
    }
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct FamilyLawCaseRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub case_type: CaseType,
    pub subtype: FamilyLawSubtype,
    pub marriage_date: Option<NaiveDate>,
    pub children_involved: bool,
    pub detail_id: Option<Uuid>,
    pub other_details: Option<String>,
}

// ── Assembled case ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyLawCase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subtype: FamilyLawSubtype,
    pub marriage_date: Option<NaiveDate>,
    pub children_involved: bool,
    pub other_details: Option<String>,
    pub detail: Option<FamilyDetail>,
}

// ── Export shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildCustodyExport {
    pub visitation_rights_proposed: Option<String>,
    pub children: Vec<ChildDetailExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyDetailExport {
    Divorce(DivorceDetail),
    Maintenance(MaintenanceDetail),
    ChildCustody(ChildCustodyExport),
    DomesticViolence(DomesticViolenceDetail),
}

impl From<FamilyDetail> for FamilyDetailExport {
    fn from(d: FamilyDetail) -> Self {
        match d {
            FamilyDetail::Divorce(v) => FamilyDetailExport::Divorce(v),
            FamilyDetail::Maintenance(m) => FamilyDetailExport::Maintenance(m),
            FamilyDetail::ChildCustody(c) => FamilyDetailExport::ChildCustody(ChildCustodyExport {
                visitation_rights_proposed: c.visitation_rights_proposed,
                children: c.children.into_iter().map(Into::into).collect(),
            }),
            FamilyDetail::DomesticViolence(v) => FamilyDetailExport::DomesticViolence(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyLawCaseExport {
    pub id: String,
    pub case_type: CaseType,
    pub subtype: FamilyLawSubtype,
    pub created_at: String,
    pub updated_at: String,
    pub marriage_date: Option<String>,
    pub children_involved: bool,
    pub other_details: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<FamilyDetailExport>,
}

impl From<FamilyLawCase> for FamilyLawCaseExport {
    fn from(c: FamilyLawCase) -> Self {
        Self {
            id: c.id.to_string(),
            case_type: CaseType::FamilyLaw,
            subtype: c.subtype,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            marriage_date: c.marriage_date.map(|d| d.to_string()),
            children_involved: c.children_involved,
            other_details: c.other_details,
            detail: c.detail.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violence_types_export_as_plain_strings() {
        let detail = FamilyDetailExport::DomesticViolence(DomesticViolenceDetail {
            protection_order_sought: true,
            violence_types: vec![ViolenceType::Verbal, ViolenceType::Financial],
        });
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(
            value["domestic_violence"]["violence_types"],
            serde_json::json!(["Verbal", "Financial"])
        );
    }
}
