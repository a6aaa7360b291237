use chrono::{DateTime, Utc};
use shared_types::{
    AppError, ConsumerDetail, ConsumerDisputeCase, ConsumerDisputeCaseRow, ConsumerSubtype,
};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a consumer-dispute case row. The caller owns the id; timestamps are stamped here.
pub async fn insert_case(
    conn: &mut SqliteConnection,
    row: &ConsumerDisputeCaseRow,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO consumer_dispute_cases
            (id, created_at, updated_at, case_type, subtype,
             product_service_details, purchase_date, compensation_claimed,
             detail_id, other_details)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(row.id)
    .bind(now)
    .bind(now)
    .bind(row.case_type)
    .bind(row.subtype)
    .bind(&row.product_service_details)
    .bind(row.purchase_date)
    .bind(row.compensation_claimed)
    .bind(row.detail_id)
    .bind(&row.other_details)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Insert an extension record into the table matching the detail's tag and
/// return its new id.
pub async fn insert_detail(
    conn: &mut SqliteConnection,
    detail: &ConsumerDetail,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    match detail {
        ConsumerDetail::ProductDefect(p) => {
            sqlx::query(
                "INSERT INTO consumer_product_defect_details (id, product_type, defect_nature) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&p.product_type)
            .bind(&p.defect_nature)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        ConsumerDetail::ServiceDeficiency(s) => {
            sqlx::query(
                "INSERT INTO consumer_service_deficiency_details (id, service_type, deficiency_nature) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&s.service_type)
            .bind(&s.deficiency_nature)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        ConsumerDetail::UnfairTradePractice(u) => {
            sqlx::query(
                "INSERT INTO consumer_unfair_trade_details (id, practice_type, misleading_aspect) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&u.practice_type)
            .bind(&u.misleading_aspect)
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
    sqlx::query("UPDATE consumer_dispute_cases SET detail_id = $1, updated_at = $2 WHERE id = $3")
        .bind(detail_id)
        .bind(now)
        .bind(case_id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Fetch the flat case row.
pub async fn find_row(
    pool: &Pool<Sqlite>,
    id: Uuid,
) -> Result<Option<ConsumerDisputeCaseRow>, AppError> {
    sqlx::query_as::<_, ConsumerDisputeCaseRow>(
        r#"
        SELECT id, created_at, updated_at, case_type, subtype,
               product_service_details, purchase_date, compensation_claimed,
               detail_id, other_details
        FROM consumer_dispute_cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Assemble the full case with the extension selected by subtype.
pub async fn load(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<ConsumerDisputeCase>, AppError> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let detail = match row.detail_id {
        None => None,
        Some(detail_id) => load_detail(pool, row.subtype, detail_id).await?,
    };

    Ok(Some(ConsumerDisputeCase {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        subtype: row.subtype,
        product_service_details: row.product_service_details,
        purchase_date: row.purchase_date,
        compensation_claimed: row.compensation_claimed,
        other_details: row.other_details,
        detail,
    }))
}

async fn load_detail(
    pool: &Pool<Sqlite>,
    subtype: ConsumerSubtype,
    detail_id: Uuid,
) -> Result<Option<ConsumerDetail>, AppError> {
    let detail = match subtype {
        ConsumerSubtype::ProductDefect => sqlx::query_as::<_, shared_types::ProductDefectDetail>(
            "SELECT product_type, defect_nature FROM consumer_product_defect_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(ConsumerDetail::ProductDefect),
        ConsumerSubtype::ServiceDeficiency => {
            sqlx::query_as::<_, shared_types::ServiceDeficiencyDetail>(
                "SELECT service_type, deficiency_nature FROM consumer_service_deficiency_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?
            .map(ConsumerDetail::ServiceDeficiency)
        }
        ConsumerSubtype::UnfairTradePractice => {
            sqlx::query_as::<_, shared_types::UnfairTradePracticeDetail>(
                "SELECT practice_type, misleading_aspect FROM consumer_unfair_trade_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?
            .map(ConsumerDetail::UnfairTradePractice)
        }
        ConsumerSubtype::Other => None,
    };
    Ok(detail)
}

/// Attach an extension to a case that has none; tags must agree.
#[tracing::instrument(skip(pool, detail))]
pub async fn attach_detail(
    pool: &Pool<Sqlite>,
    case_id: Uuid,
    detail: &ConsumerDetail,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(ConsumerSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM consumer_dispute_cases WHERE id = $1")
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

/// Delete a case. Consumer cases have no base-level children; the
/// extension row survives the case.
#[tracing::instrument(skip(pool))]
pub async fn delete_case(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM consumer_dispute_cases WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

/// Delete a case's extension record and clear the reference.
#[tracing::instrument(skip(pool))]
pub async fn delete_detail(pool: &Pool<Sqlite>, case_id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(ConsumerSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM consumer_dispute_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let (subtype, detail_id) = match row {
        Some((subtype, Some(detail_id))) => (subtype, detail_id),
        _ => return Ok(false),
    };

    let table = match subtype {
        ConsumerSubtype::ProductDefect => "consumer_product_defect_details",
        ConsumerSubtype::ServiceDeficiency => "consumer_service_deficiency_details",
        ConsumerSubtype::UnfairTradePractice => "consumer_unfair_trade_details",
        ConsumerSubtype::Other => return Ok(false),
    };
    sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
        .bind(detail_id)
        .execute(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    set_detail_id(&mut *tx, case_id, None).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(true)
}
