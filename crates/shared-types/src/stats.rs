use serde::{Deserialize, Serialize};

use crate::case::CaseType;

/// Case counts per domain (home dashboard / distribution chart).
/// `by_case_type` maps domain name to count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseTypeDistribution {
    pub total: i64,
    pub by_case_type: serde_json::Value,
}

/// Subtype breakdown for a single domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStatistics {
    pub case_type: CaseType,
    pub total: i64,
    pub by_subtype: serde_json::Value,
}

/// Criminal dashboard aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriminalStatistics {
    pub total: i64,
    pub by_subtype: serde_json::Value,
    pub by_investigation_status: serde_json::Value,
    pub by_bail_status: serde_json::Value,
    pub chargesheet_filed: i64,
    pub chargesheet_pending: i64,
}

/// Civil dashboard aggregates. `avg_claim_amount` is computed over cases
/// with a claim amount only; `None` when no such case exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivilStatistics {
    pub total: i64,
    pub by_subtype: serde_json::Value,
    pub avg_claim_amount: Option<f64>,
    pub settlement_attempted: i64,
    pub settlement_not_attempted: i64,
}

/// Family-law dashboard aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyLawStatistics {
    pub total: i64,
    pub by_subtype: serde_json::Value,
    pub children_involved: i64,
    pub children_not_involved: i64,
}

/// Property-law dashboard aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyLawStatistics {
    pub total: i64,
    pub by_subtype: serde_json::Value,
    pub properties_in_dispute: i64,
}

/// Consumer dashboard aggregates. `total_compensation_claimed` sums only
/// the cases that claim compensation; `None` when no such case exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerStatistics {
    pub total: i64,
    pub by_subtype: serde_json::Value,
    pub total_compensation_claimed: Option<f64>,
}
