use chrono::{DateTime, Utc};
use shared_types::{
    AppError, IntellectualPropertyCase, IntellectualPropertyCaseRow, IpDetail, IpSubtype,
};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert an IP case row. The caller owns the id; timestamps are stamped here.
pub async fn insert_case(
    conn: &mut SqliteConnection,
    row: &IntellectualPropertyCaseRow,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO intellectual_property_cases
            (id, created_at, updated_at, case_type, subtype, ip_owner_details,
             detail_id, other_details)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(row.id)
    .bind(now)
    .bind(now)
    .bind(row.case_type)
    .bind(row.subtype)
    .bind(&row.ip_owner_details)
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
    detail: &IpDetail,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    match detail {
        IpDetail::Patent(p) => {
            sqlx::query(
                "INSERT INTO ip_patent_details (id, invention_details, dispute_type) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&p.invention_details)
            .bind(&p.dispute_type)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        IpDetail::Trademark(t) => {
            sqlx::query(
                "INSERT INTO ip_trademark_details (id, trademark_description, dispute_type) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&t.trademark_description)
            .bind(&t.dispute_type)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        IpDetail::Copyright(c) => {
            sqlx::query(
                "INSERT INTO ip_copyright_details (id, work_type, infringing_work_details) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&c.work_type)
            .bind(&c.infringing_work_details)
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
    sqlx::query(
        "UPDATE intellectual_property_cases SET detail_id = $1, updated_at = $2 WHERE id = $3",
    )
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
) -> Result<Option<IntellectualPropertyCaseRow>, AppError> {
    sqlx::query_as::<_, IntellectualPropertyCaseRow>(
        r#"
        SELECT id, created_at, updated_at, case_type, subtype, ip_owner_details,
               detail_id, other_details
        FROM intellectual_property_cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Assemble the full case with the extension selected by subtype.
pub async fn load(
    pool: &Pool<Sqlite>,
    id: Uuid,
) -> Result<Option<IntellectualPropertyCase>, AppError> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let detail = match row.detail_id {
        None => None,
        Some(detail_id) => load_detail(pool, row.subtype, detail_id).await?,
    };

    Ok(Some(IntellectualPropertyCase {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        subtype: row.subtype,
        ip_owner_details: row.ip_owner_details,
        other_details: row.other_details,
        detail,
    }))
}

async fn load_detail(
    pool: &Pool<Sqlite>,
    subtype: IpSubtype,
    detail_id: Uuid,
) -> Result<Option<IpDetail>, AppError> {
    let detail = match subtype {
        IpSubtype::Patent => sqlx::query_as::<_, shared_types::PatentDetail>(
            "SELECT invention_details, dispute_type FROM ip_patent_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(IpDetail::Patent),
        IpSubtype::Trademark => sqlx::query_as::<_, shared_types::TrademarkDetail>(
            "SELECT trademark_description, dispute_type FROM ip_trademark_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(IpDetail::Trademark),
        IpSubtype::Copyright => sqlx::query_as::<_, shared_types::CopyrightDetail>(
            "SELECT work_type, infringing_work_details FROM ip_copyright_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(IpDetail::Copyright),
        IpSubtype::Other => None,
    };
    Ok(detail)
}

/// Attach an extension to a case that has none; tags must agree.
#[tracing::instrument(skip(pool, detail))]
pub async fn attach_detail(
    pool: &Pool<Sqlite>,
    case_id: Uuid,
    detail: &IpDetail,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(IpSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM intellectual_property_cases WHERE id = $1")
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

/// Delete a case. The extension row survives the case.
#[tracing::instrument(skip(pool))]
pub async fn delete_case(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM intellectual_property_cases WHERE id = $1")
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

    let row: Option<(IpSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM intellectual_property_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let (subtype, detail_id) = match row {
        Some((subtype, Some(detail_id))) => (subtype, detail_id),
        _ => return Ok(false),
    };

    let table = match subtype {
        IpSubtype::Patent => "ip_patent_details",
        IpSubtype::Trademark => "ip_trademark_details",
        IpSubtype::Copyright => "ip_copyright_details",
        IpSubtype::Other => return Ok(false),
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
