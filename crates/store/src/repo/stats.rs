use shared_types::{
    AppError, CaseType, CaseTypeDistribution, CivilStatistics, ConsumerStatistics,
    CriminalStatistics, DomainStatistics, FamilyLawStatistics, PropertyLawStatistics,
};
use sqlx::{Pool, Sqlite};

use crate::error_convert::SqlxErrorExt;

// Read-only aggregate queries behind the dashboards. NULL numerics are
// excluded by SQL AVG/SUM semantics; counts group stored enum text.

fn case_table(case_type: CaseType) -> &'static str {
    match case_type {
        CaseType::Criminal => "criminal_cases",
        CaseType::Civil => "civil_cases",
        CaseType::FamilyLaw => "family_law_cases",
        CaseType::PropertyLaw => "property_law_cases",
        CaseType::ConsumerDispute => "consumer_dispute_cases",
        CaseType::LabourDispute => "labour_dispute_cases",
        CaseType::IntellectualProperty => "intellectual_property_cases",
        CaseType::PublicLaw => "public_law_cases",
    }
}

async fn count_all(pool: &Pool<Sqlite>, table: &str) -> Result<i64, AppError> {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

async fn count_where(pool: &Pool<Sqlite>, table: &str, predicate: &str) -> Result<i64, AppError> {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE {predicate}"))
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

async fn group_counts(
    pool: &Pool<Sqlite>,
    table: &str,
    column: &str,
) -> Result<serde_json::Value, AppError> {
    let rows: Vec<(String, i64)> = sqlx::query_as(&format!(
        "SELECT {column}, COUNT(*) FROM {table} \
         WHERE {column} IS NOT NULL GROUP BY {column} ORDER BY {column}"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let mut map = serde_json::Map::new();
    for (key, count) in rows {
        map.insert(key, count.into());
    }
    Ok(serde_json::Value::Object(map))
}

/// Case counts per domain plus the overall total (home dashboard).
pub async fn case_type_distribution(pool: &Pool<Sqlite>) -> Result<CaseTypeDistribution, AppError> {
    let mut by_case_type = serde_json::Map::new();
    let mut total = 0i64;
    for case_type in CaseType::ALL {
        let count = count_all(pool, case_table(case_type)).await?;
        by_case_type.insert(case_type.as_str().to_string(), count.into());
        total += count;
    }
    Ok(CaseTypeDistribution {
        total,
        by_case_type: serde_json::Value::Object(by_case_type),
    })
}

/// Subtype counts for one domain.
pub async fn subtype_breakdown(
    pool: &Pool<Sqlite>,
    case_type: CaseType,
) -> Result<DomainStatistics, AppError> {
    let table = case_table(case_type);
    Ok(DomainStatistics {
        case_type,
        total: count_all(pool, table).await?,
        by_subtype: group_counts(pool, table, "subtype").await?,
    })
}

/// Criminal dashboard: subtype, investigation and bail breakdowns plus
/// chargesheet progress.
pub async fn criminal_statistics(pool: &Pool<Sqlite>) -> Result<CriminalStatistics, AppError> {
    Ok(CriminalStatistics {
        total: count_all(pool, "criminal_cases").await?,
        by_subtype: group_counts(pool, "criminal_cases", "subtype").await?,
        by_investigation_status: group_counts(pool, "criminal_cases", "investigation_status")
            .await?,
        by_bail_status: group_counts(pool, "criminal_cases", "bail_status").await?,
        chargesheet_filed: count_where(pool, "criminal_cases", "chargesheet_filed = TRUE").await?,
        chargesheet_pending: count_where(pool, "criminal_cases", "chargesheet_filed = FALSE")
            .await?,
    })
}

/// Civil dashboard: subtype breakdown, average claim over cases that state
/// one, and settlement-attempt counts.
pub async fn civil_statistics(pool: &Pool<Sqlite>) -> Result<CivilStatistics, AppError> {
    let avg_claim_amount: Option<f64> = sqlx::query_scalar("SELECT AVG(claim_amount) FROM civil_cases")
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(CivilStatistics {
        total: count_all(pool, "civil_cases").await?,
        by_subtype: group_counts(pool, "civil_cases", "subtype").await?,
        avg_claim_amount,
        settlement_attempted: count_where(pool, "civil_cases", "settlement_attempts = TRUE")
            .await?,
        settlement_not_attempted: count_where(pool, "civil_cases", "settlement_attempts = FALSE")
            .await?,
    })
}

/// Family-law dashboard: subtype breakdown and children-involved counts.
pub async fn family_law_statistics(pool: &Pool<Sqlite>) -> Result<FamilyLawStatistics, AppError> {
    Ok(FamilyLawStatistics {
        total: count_all(pool, "family_law_cases").await?,
        by_subtype: group_counts(pool, "family_law_cases", "subtype").await?,
        children_involved: count_where(pool, "family_law_cases", "children_involved = TRUE")
            .await?,
        children_not_involved: count_where(pool, "family_law_cases", "children_involved = FALSE")
            .await?,
    })
}

/// Property-law dashboard: subtype breakdown and disputed property count.
pub async fn property_law_statistics(
    pool: &Pool<Sqlite>,
) -> Result<PropertyLawStatistics, AppError> {
    Ok(PropertyLawStatistics {
        total: count_all(pool, "property_law_cases").await?,
        by_subtype: group_counts(pool, "property_law_cases", "subtype").await?,
        properties_in_dispute: count_all(pool, "property_case_properties").await?,
    })
}

/// Consumer dashboard: subtype breakdown and total compensation claimed
/// over cases that claim any.
pub async fn consumer_statistics(pool: &Pool<Sqlite>) -> Result<ConsumerStatistics, AppError> {
    let total_compensation_claimed: Option<f64> =
        sqlx::query_scalar("SELECT SUM(compensation_claimed) FROM consumer_dispute_cases")
            .fetch_one(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    Ok(ConsumerStatistics {
        total: count_all(pool, "consumer_dispute_cases").await?,
        by_subtype: group_counts(pool, "consumer_dispute_cases", "subtype").await?,
        total_compensation_claimed,
    })
}
