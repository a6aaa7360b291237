use chrono::{DateTime, Utc};
use shared_types::{
    AppError, CivilCase, CivilCaseRow, CivilDetail, CivilSubtype, PropertyDetail,
    PropertyDisputeDetail,
};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a civil case row. The caller owns the id; timestamps are stamped here.
pub async fn insert_case(conn: &mut SqliteConnection, row: &CivilCaseRow) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO civil_cases
            (id, created_at, updated_at, case_type, subtype, relief_sought,
             claim_amount, settlement_attempts, detail_id, other_details)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(row.id)
    .bind(now)
    .bind(now)
    .bind(row.case_type)
    .bind(row.subtype)
    .bind(&row.relief_sought)
    .bind(row.claim_amount)
    .bind(row.settlement_attempts)
    .bind(row.detail_id)
    .bind(&row.other_details)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Insert an extension record into the table matching the detail's tag and
/// return its new id. Disputed properties must already be persisted; only
/// the link rows are written here.
pub async fn insert_detail(
    conn: &mut SqliteConnection,
    detail: &CivilDetail,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    match detail {
        CivilDetail::ContractDispute(c) => {
            sqlx::query(
                "INSERT INTO civil_contract_dispute_details (id, contract_type, breach_details) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&c.contract_type)
            .bind(&c.breach_details)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        CivilDetail::PropertyDispute(p) => {
            sqlx::query("INSERT INTO civil_property_dispute_details (id) VALUES ($1)")
                .bind(id)
                .execute(&mut *conn)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            for property in &p.properties {
                sqlx::query(
                    "INSERT INTO civil_dispute_properties (id, dispute_id, property_id) \
                     VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(property.id)
                .execute(&mut *conn)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            }
        }
        CivilDetail::MoneyRecovery(m) => {
            sqlx::query(
                "INSERT INTO civil_money_recovery_details (id, principal_amount, debt_documentation) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(m.principal_amount)
            .bind(&m.debt_documentation)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        CivilDetail::TortClaim(t) => {
            sqlx::query(
                "INSERT INTO civil_tort_claim_details (id, tort_type, damages_claimed) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&t.tort_type)
            .bind(t.damages_claimed)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
    }
    Ok(id)
}

/// Point a case at its extension record and refresh updated_at.
pub async fn set_detail_id(
    conn: &mut SqliteConnection,
    case_id: Uuid,
    detail_id: Option<Uuid>,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query("UPDATE civil_cases SET detail_id = $1, updated_at = $2 WHERE id = $3")
        .bind(detail_id)
        .bind(now)
        .bind(case_id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Fetch the flat case row.
pub async fn find_row(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<CivilCaseRow>, AppError> {
    sqlx::query_as::<_, CivilCaseRow>(
        r#"
        SELECT id, created_at, updated_at, case_type, subtype, relief_sought,
               claim_amount, settlement_attempts, detail_id, other_details
        FROM civil_cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Assemble the full case with the extension selected by subtype.
pub async fn load(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<CivilCase>, AppError> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let detail = match row.detail_id {
        None => None,
        Some(detail_id) => load_detail(pool, row.subtype, detail_id).await?,
    };

    Ok(Some(CivilCase {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        subtype: row.subtype,
        relief_sought: row.relief_sought,
        claim_amount: row.claim_amount,
        settlement_attempts: row.settlement_attempts,
        other_details: row.other_details,
        detail,
    }))
}

async fn load_detail(
    pool: &Pool<Sqlite>,
    subtype: CivilSubtype,
    detail_id: Uuid,
) -> Result<Option<CivilDetail>, AppError> {
    let detail = match subtype {
        CivilSubtype::ContractDispute => sqlx::query_as::<_, shared_types::ContractDisputeDetail>(
            "SELECT contract_type, breach_details FROM civil_contract_dispute_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(CivilDetail::ContractDispute),
        CivilSubtype::PropertyDispute => {
            let exists: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM civil_property_dispute_details WHERE id = $1")
                    .bind(detail_id)
                    .fetch_optional(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
            match exists {
                None => None,
                Some(_) => {
                    let properties = sqlx::query_as::<_, PropertyDetail>(
                        r#"
                        SELECT p.id, p.address, p.value
                        FROM property_details p
                        JOIN civil_dispute_properties l ON l.property_id = p.id
                        WHERE l.dispute_id = $1
                        "#,
                    )
                    .bind(detail_id)
                    .fetch_all(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                    Some(CivilDetail::PropertyDispute(PropertyDisputeDetail {
                        properties,
                    }))
                }
            }
        }
        CivilSubtype::MoneyRecovery => sqlx::query_as::<_, shared_types::MoneyRecoveryDetail>(
            "SELECT principal_amount, debt_documentation FROM civil_money_recovery_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(CivilDetail::MoneyRecovery),
        CivilSubtype::TortClaim => sqlx::query_as::<_, shared_types::TortClaimDetail>(
            "SELECT tort_type, damages_claimed FROM civil_tort_claim_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(CivilDetail::TortClaim),
        CivilSubtype::Other => None,
    };
    Ok(detail)
}

/// Attach an extension to a case that has none; tags must agree.
#[tracing::instrument(skip(pool, detail))]
pub async fn attach_detail(
    pool: &Pool<Sqlite>,
    case_id: Uuid,
    detail: &CivilDetail,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(CivilSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM civil_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let Some((subtype, existing)) = row else {
        return Err(AppError::not_found("Case not found"));
    };
    if existing.is_some() {
        return Err(AppError::conflict("Case already has an extension attached"));
    }
    if detail.subtype() != subtype {
        let mut fields = HashMap::new();
        fields.insert(
            "subtype".to_string(),
            format!(
                "case subtype is {} but detail is {}",
                subtype.as_str(),
                detail.subtype().as_str()
            ),
        );
        return Err(AppError::validation(
            "Extension does not match case subtype",
            fields,
        ));
    }

    let detail_id = insert_detail(&mut *tx, detail).await?;
    set_detail_id(&mut *tx, case_id, Some(detail_id)).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Delete a case. Civil cases have no base-level children; the extension
/// row (and its property links) survives the case.
#[tracing::instrument(skip(pool))]
pub async fn delete_case(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM civil_cases WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

/// Delete a case's extension (with its property link rows) and clear the
/// reference. Shared property records survive.
#[tracing::instrument(skip(pool))]
pub async fn delete_detail(pool: &Pool<Sqlite>, case_id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(CivilSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM civil_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let (subtype, detail_id) = match row {
        Some((subtype, Some(detail_id))) => (subtype, detail_id),
        _ => return Ok(false),
    };

    match subtype {
        CivilSubtype::ContractDispute => {
            sqlx::query("DELETE FROM civil_contract_dispute_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        CivilSubtype::PropertyDispute => {
            sqlx::query("DELETE FROM civil_dispute_properties WHERE dispute_id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            sqlx::query("DELETE FROM civil_property_dispute_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        CivilSubtype::MoneyRecovery => {
            sqlx::query("DELETE FROM civil_money_recovery_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        CivilSubtype::TortClaim => {
            sqlx::query("DELETE FROM civil_tort_claim_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        CivilSubtype::Other => return Ok(false),
    }

    set_detail_id(&mut *tx, case_id, None).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(true)
}
