use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::civil::{CivilCase, CivilCaseExport};
use crate::consumer::{ConsumerDisputeCase, ConsumerDisputeCaseExport};
use crate::criminal::{CriminalCase, CriminalCaseExport};
use crate::family::{FamilyLawCase, FamilyLawCaseExport};
use crate::intellectual_property::{IntellectualPropertyCase, IntellectualPropertyCaseExport};
use crate::labour::{LabourDisputeCase, LabourDisputeCaseExport};
use crate::property::{PropertyLawCase, PropertyLawCaseExport};
use crate::public_law::{PublicLawCase, PublicLawCaseExport};

/// Top-level legal domain discriminator. Every case row stores its
/// domain's fixed value; it never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "store", derive(sqlx::Type))]
pub enum CaseType {
    Criminal,
    Civil,
    FamilyLaw,
    PropertyLaw,
    ConsumerDispute,
    LabourDispute,
    IntellectualProperty,
    PublicLaw,
}

impl CaseType {
    pub const ALL: [CaseType; 8] = [
        CaseType::Criminal,
        CaseType::Civil,
        CaseType::FamilyLaw,
        CaseType::PropertyLaw,
        CaseType::ConsumerDispute,
        CaseType::LabourDispute,
        CaseType::IntellectualProperty,
        CaseType::PublicLaw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::Criminal => "Criminal",
            CaseType::Civil => "Civil",
            CaseType::FamilyLaw => "FamilyLaw",
            CaseType::PropertyLaw => "PropertyLaw",
            CaseType::ConsumerDispute => "ConsumerDispute",
            CaseType::LabourDispute => "LabourDispute",
            CaseType::IntellectualProperty => "IntellectualProperty",
            CaseType::PublicLaw => "PublicLaw",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled case from any of the eight domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegalCase {
    Criminal(CriminalCase),
    Civil(CivilCase),
    FamilyLaw(FamilyLawCase),
    PropertyLaw(PropertyLawCase),
    ConsumerDispute(ConsumerDisputeCase),
    LabourDispute(LabourDisputeCase),
    IntellectualProperty(IntellectualPropertyCase),
    PublicLaw(PublicLawCase),
}

impl LegalCase {
    pub fn case_type(&self) -> CaseType {
        match self {
            LegalCase::Criminal(_) => CaseType::Criminal,
            LegalCase::Civil(_) => CaseType::Civil,
            LegalCase::FamilyLaw(_) => CaseType::FamilyLaw,
            LegalCase::PropertyLaw(_) => CaseType::PropertyLaw,
            LegalCase::ConsumerDispute(_) => CaseType::ConsumerDispute,
            LegalCase::LabourDispute(_) => CaseType::LabourDispute,
            LegalCase::IntellectualProperty(_) => CaseType::IntellectualProperty,
            LegalCase::PublicLaw(_) => CaseType::PublicLaw,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            LegalCase::Criminal(c) => c.id,
            LegalCase::Civil(c) => c.id,
            LegalCase::FamilyLaw(c) => c.id,
            LegalCase::PropertyLaw(c) => c.id,
            LegalCase::ConsumerDispute(c) => c.id,
            LegalCase::LabourDispute(c) => c.id,
            LegalCase::IntellectualProperty(c) => c.id,
            LegalCase::PublicLaw(c) => c.id,
        }
    }
}

/// Export shape for any domain. Serializes as the domain object itself;
/// the embedded `case_type` field identifies the domain on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LegalCaseExport {
    Criminal(CriminalCaseExport),
    Civil(CivilCaseExport),
    FamilyLaw(FamilyLawCaseExport),
    PropertyLaw(PropertyLawCaseExport),
    ConsumerDispute(ConsumerDisputeCaseExport),
    LabourDispute(LabourDisputeCaseExport),
    IntellectualProperty(IntellectualPropertyCaseExport),
    PublicLaw(PublicLawCaseExport),
}

impl From<LegalCase> for LegalCaseExport {
    fn from(case: LegalCase) -> Self {
        match case {
            LegalCase::Criminal(c) => LegalCaseExport::Criminal(c.into()),
            LegalCase::Civil(c) => LegalCaseExport::Civil(c.into()),
            LegalCase::FamilyLaw(c) => LegalCaseExport::FamilyLaw(c.into()),
            LegalCase::PropertyLaw(c) => LegalCaseExport::PropertyLaw(c.into()),
            LegalCase::ConsumerDispute(c) => LegalCaseExport::ConsumerDispute(c.into()),
            LegalCase::LabourDispute(c) => LegalCaseExport::LabourDispute(c.into()),
            LegalCase::IntellectualProperty(c) => LegalCaseExport::IntellectualProperty(c.into()),
            LegalCase::PublicLaw(c) => LegalCaseExport::PublicLaw(c.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_type_wire_names_match_storage_checks() {
        for ct in CaseType::ALL {
            let json = serde_json::to_string(&ct).unwrap();
            assert_eq!(json, format!("\"{}\"", ct.as_str()));
        }
    }

    #[test]
    fn all_covers_every_domain() {
        assert_eq!(CaseType::ALL.len(), 8);
    }
}
