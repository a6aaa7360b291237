use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::CaseType;
use crate::common::{Person, PersonExport};

// ── Reference enums ─────────────────────────────────────────────────

/// Classifier for criminal cases. `Other` carries no extension record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum CriminalSubtype {
    MurderHomicide,
    Theft,
    Assault,
    Fraud,
    Other,
}

impl CriminalSubtype {
    pub const ALL: [CriminalSubtype; 5] = [
        CriminalSubtype::MurderHomicide,
        CriminalSubtype::Theft,
        CriminalSubtype::Assault,
        CriminalSubtype::Fraud,
        CriminalSubtype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CriminalSubtype::MurderHomicide => "MurderHomicide",
            CriminalSubtype::Theft => "Theft",
            CriminalSubtype::Assault => "Assault",
            CriminalSubtype::Fraud => "Fraud",
            CriminalSubtype::Other => "Other",
        }
    }
}

impl fmt::Display for CriminalSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum BailStatus {
    NotApplied,
    Applied,
    Granted,
    Rejected,
}

impl BailStatus {
    pub const ALL: [BailStatus; 4] = [
        BailStatus::NotApplied,
        BailStatus::Applied,
        BailStatus::Granted,
        BailStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BailStatus::NotApplied => "NotApplied",
            BailStatus::Applied => "Applied",
            BailStatus::Granted => "Granted",
            BailStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum InvestigationStatus {
    Ongoing,
    Completed,
    Closed,
}

impl InvestigationStatus {
    pub const ALL: [InvestigationStatus; 3] = [
        InvestigationStatus::Ongoing,
        InvestigationStatus::Completed,
        InvestigationStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestigationStatus::Ongoing => "Ongoing",
            InvestigationStatus::Completed => "Completed",
            InvestigationStatus::Closed => "Closed",
        }
    }
}

// ── Extension payloads ──────────────────────────────────────────────

/// Murder/homicide extension. The victim is a shared person record,
/// resolved by reference when the case is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MurderHomicideDetail {
    pub victim: Person,
    pub weapon_used: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct TheftDetail {
    pub property_type: Option<String>,
    pub estimated_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct AssaultDetail {
    pub injury_severity: Option<String>,
    pub weapon_used: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct FraudDetail {
    pub amount_involved: Option<f64>,
    pub fraud_type: Option<String>,
}

/// The one extension a criminal case may carry. The variant tag is the
/// single source of truth for which extension table the record lives in,
/// so a case can never hold two populated extensions at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CriminalDetail {
    MurderHomicide(MurderHomicideDetail),
    Theft(TheftDetail),
    Assault(AssaultDetail),
    Fraud(FraudDetail),
}

impl CriminalDetail {
    /// The subtype this extension belongs to.
    pub fn subtype(&self) -> CriminalSubtype {
        match self {
            CriminalDetail::MurderHomicide(_) => CriminalSubtype::MurderHomicide,
            CriminalDetail::Theft(_) => CriminalSubtype::Theft,
            CriminalDetail::Assault(_) => CriminalSubtype::Assault,
            CriminalDetail::Fraud(_) => CriminalSubtype::Fraud,
        }
    }
}

// ── Child collections ───────────────────────────────────────────────

/// A charge pressed in a criminal case. Owned by the case: deleted with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct CriminalCharge {
    pub id: Uuid,
    pub case_id: Uuid,
    pub charge_name: String,
}

/// A category of evidence collected for a criminal case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct CriminalEvidence {
    pub id: Uuid,
    pub case_id: Uuid,
    pub evidence_type: String,
}

// ── DB row struct ───────────────────────────────────────────────────

/// Flat DB row for a criminal case. `detail_id` points into the extension
/// table selected by `subtype`; NULL for `Other` and for detached cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::FromRow))]
pub struct CriminalCaseRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub case_type: CaseType,
    pub subtype: CriminalSubtype,
    pub fir_number: String,
    pub police_station: Option<String>,
    pub arrest_date: Option<NaiveDate>,
    pub bail_status: Option<BailStatus>,
    pub investigation_status: InvestigationStatus,
    pub chargesheet_filed: bool,
    pub chargesheet_date: Option<NaiveDate>,
    pub witness_count: i32,
    pub detail_id: Option<Uuid>,
    pub other_details: Option<String>,
}

// ── Assembled case ──────────────────────────────────────────────────

/// A criminal case with its extension and child collections resolved.
///
/// `detail` is `Some` exactly when an extension is attached; it is `None`
/// for `Other` cases and for cases whose extension was later detached.
/// When present, `detail.subtype()` equals `subtype` (enforced on attach).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriminalCase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subtype: CriminalSubtype,
    pub fir_number: String,
    pub police_station: Option<String>,
    pub arrest_date: Option<NaiveDate>,
    pub bail_status: Option<BailStatus>,
    pub investigation_status: InvestigationStatus,
    pub chargesheet_filed: bool,
    pub chargesheet_date: Option<NaiveDate>,
    pub witness_count: i32,
    pub other_details: Option<String>,
    pub detail: Option<CriminalDetail>,
    pub charges: Vec<CriminalCharge>,
    pub evidence_types: Vec<CriminalEvidence>,
}

// ── Export shapes ───────────────────────────────────────────────────

/// Extension sub-object as it appears in the export: a single key named
/// after the subtype (`"theft": {…}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriminalDetailExport {
    MurderHomicide(MurderHomicideExport),
    Theft(TheftDetail),
    Assault(AssaultDetail),
    Fraud(FraudDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MurderHomicideExport {
    pub victim_details: PersonExport,
    pub weapon_used: Option<String>,
}

impl From<CriminalDetail> for CriminalDetailExport {
    fn from(d: CriminalDetail) -> Self {
        match d {
            CriminalDetail::MurderHomicide(m) => {
                CriminalDetailExport::MurderHomicide(MurderHomicideExport {
                    victim_details: m.victim.into(),
                    weapon_used: m.weapon_used,
                })
            }
            CriminalDetail::Theft(t) => CriminalDetailExport::Theft(t),
            CriminalDetail::Assault(a) => CriminalDetailExport::Assault(a),
            CriminalDetail::Fraud(f) => CriminalDetailExport::Fraud(f),
        }
    }
}

/// JSON export shape for a criminal case. Timestamps are RFC 3339 text,
/// dates ISO `YYYY-MM-DD`, unset optionals explicit nulls; child
/// collections flatten to their value lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriminalCaseExport {
    pub id: String,
    pub case_type: CaseType,
    pub subtype: CriminalSubtype,
    pub created_at: String,
    pub updated_at: String,
    pub fir_number: String,
    pub police_station: Option<String>,
    pub arrest_date: Option<String>,
    pub bail_status: Option<BailStatus>,
    pub investigation_status: InvestigationStatus,
    pub chargesheet_filed: bool,
    pub chargesheet_date: Option<String>,
    pub witness_count: i32,
    pub charges: Vec<String>,
    pub evidence_types: Vec<String>,
    pub other_details: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub detail: Option<CriminalDetailExport>,
}

impl From<CriminalCase> for CriminalCaseExport {
    fn from(c: CriminalCase) -> Self {
        Self {
            id: c.id.to_string(),
            case_type: CaseType::Criminal,
            subtype: c.subtype,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            fir_number: c.fir_number,
            police_station: c.police_station,
            arrest_date: c.arrest_date.map(|d| d.to_string()),
            bail_status: c.bail_status,
            investigation_status: c.investigation_status,
            chargesheet_filed: c.chargesheet_filed,
            chargesheet_date: c.chargesheet_date.map(|d| d.to_string()),
            witness_count: c.witness_count,
            charges: c.charges.into_iter().map(|ch| ch.charge_name).collect(),
            evidence_types: c
                .evidence_types
                .into_iter()
                .map(|e| e.evidence_type)
                .collect(),
            other_details: c.other_details,
            detail: c.detail.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_tag_maps_to_subtype() {
        let theft = CriminalDetail::Theft(TheftDetail {
            property_type: Some("Vehicle".to_string()),
            estimated_value: Some(42_000.0),
        });
        assert_eq!(theft.subtype(), CriminalSubtype::Theft);
    }

    #[test]
    fn export_emits_single_subtype_key() {
        let detail = CriminalDetailExport::Theft(TheftDetail {
            property_type: Some("Jewellery".to_string()),
            estimated_value: None,
        });
        let value = serde_json::to_value(&detail).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("theft"));
        assert_eq!(value["theft"]["estimated_value"], serde_json::Value::Null);
    }

    #[test]
    fn export_without_detail_has_no_extension_key() {
        let case = CriminalCase {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            subtype: CriminalSubtype::Other,
            fir_number: "FIR-1234/2026".to_string(),
            police_station: None,
            arrest_date: None,
            bail_status: None,
            investigation_status: InvestigationStatus::Ongoing,
            chargesheet_filed: false,
            chargesheet_date: None,
            witness_count: 0,
            other_details: Some("unclassified".to_string()),
            detail: None,
            charges: vec![],
            evidence_types: vec![],
        };
        let value = serde_json::to_value(CriminalCaseExport::from(case)).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["murder_homicide", "theft", "assault", "fraud"] {
            assert!(!obj.contains_key(key));
        }
        assert_eq!(value["police_station"], serde_json::Value::Null);
    }
}
