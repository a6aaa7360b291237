use chrono::{DateTime, Utc};
use shared_types::{
    AppError, PartitionSuitDetail, Person, PropertyDetail, PropertyLawCase, PropertyLawCaseRow,
    PropertyLawDetail, PropertyLawSubtype,
};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a property-law case row. The caller owns the id; timestamps are stamped here.
pub async fn insert_case(
    conn: &mut SqliteConnection,
    row: &PropertyLawCaseRow,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO property_law_cases
            (id, created_at, updated_at, case_type, subtype, detail_id, other_details)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(row.id)
    .bind(now)
    .bind(now)
    .bind(row.case_type)
    .bind(row.subtype)
    .bind(row.detail_id)
    .bind(&row.other_details)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Link an already-persisted property record to a case.
pub async fn insert_case_property(
    conn: &mut SqliteConnection,
    case_id: Uuid,
    property_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO property_case_properties (id, case_id, property_id) VALUES ($1, $2, $3)",
    )
    .bind(Uuid::new_v4())
    .bind(case_id)
    .bind(property_id)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Insert an extension record into the table matching the detail's tag and
/// return its new id. Partition co-owners must already be persisted.
pub async fn insert_detail(
    conn: &mut SqliteConnection,
    detail: &PropertyLawDetail,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    match detail {
        PropertyLawDetail::TitleDispute(t) => {
            sqlx::query(
                "INSERT INTO property_title_dispute_details (id, claim_basis, possession_status) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&t.claim_basis)
            .bind(&t.possession_status)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        PropertyLawDetail::EvictionSuit(e) => {
            sqlx::query(
                "INSERT INTO property_eviction_suit_details (id, eviction_grounds, arrears_amount) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&e.eviction_grounds)
            .bind(e.arrears_amount)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        PropertyLawDetail::PartitionSuit(p) => {
            sqlx::query(
                "INSERT INTO property_partition_suit_details (id, share_claimed) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(&p.share_claimed)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            for person in &p.co_owners {
                sqlx::query(
                    "INSERT INTO property_partition_co_owners (id, partition_id, person_id) \
                     VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(person.id)
                .execute(&mut *conn)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            }
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
    sqlx::query("UPDATE property_law_cases SET detail_id = $1, updated_at = $2 WHERE id = $3")
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
) -> Result<Option<PropertyLawCaseRow>, AppError> {
    sqlx::query_as::<_, PropertyLawCaseRow>(
        r#"
        SELECT id, created_at, updated_at, case_type, subtype, detail_id, other_details
        FROM property_law_cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Assemble the full case: base row, disputed properties, and the
/// extension selected by subtype.
pub async fn load(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<PropertyLawCase>, AppError> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let properties = sqlx::query_as::<_, PropertyDetail>(
        r#"
        SELECT p.id, p.address, p.value
        FROM property_details p
        JOIN property_case_properties l ON l.property_id = p.id
        WHERE l.case_id = $1
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let detail = match row.detail_id {
        None => None,
        Some(detail_id) => load_detail(pool, row.subtype, detail_id).await?,
    };

    Ok(Some(PropertyLawCase {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        subtype: row.subtype,
        other_details: row.other_details,
        properties,
        detail,
    }))
}

async fn load_detail(
    pool: &Pool<Sqlite>,
    subtype: PropertyLawSubtype,
    detail_id: Uuid,
) -> Result<Option<PropertyLawDetail>, AppError> {
    let detail = match subtype {
        PropertyLawSubtype::TitleDispute => sqlx::query_as::<_, shared_types::TitleDisputeDetail>(
            "SELECT claim_basis, possession_status FROM property_title_dispute_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(PropertyLawDetail::TitleDispute),
        PropertyLawSubtype::EvictionSuit => sqlx::query_as::<_, shared_types::EvictionSuitDetail>(
            "SELECT eviction_grounds, arrears_amount FROM property_eviction_suit_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(PropertyLawDetail::EvictionSuit),
        PropertyLawSubtype::PartitionSuit => {
            let share: Option<(Option<String>,)> = sqlx::query_as(
                "SELECT share_claimed FROM property_partition_suit_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            match share {
                None => None,
                Some((share_claimed,)) => {
                    let co_owners = sqlx::query_as::<_, Person>(
                        r#"
                        SELECT p.id, p.name, p.contact_info
                        FROM persons p
                        JOIN property_partition_co_owners l ON l.person_id = p.id
                        WHERE l.partition_id = $1
                        "#,
                    )
                    .bind(detail_id)
                    .fetch_all(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                    Some(PropertyLawDetail::PartitionSuit(PartitionSuitDetail {
                        share_claimed,
                        co_owners,
                    }))
                }
            }
        }
        PropertyLawSubtype::Other => None,
    };
    Ok(detail)
}

/// Attach an extension to a case that has none; tags must agree.
#[tracing::instrument(skip(pool, detail))]
pub async fn attach_detail(
    pool: &Pool<Sqlite>,
    case_id: Uuid,
    detail: &PropertyLawDetail,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(PropertyLawSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM property_law_cases WHERE id = $1")
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

/// Delete a case and its property links. The shared property records and
/// the extension row survive.
#[tracing::instrument(skip(pool))]
pub async fn delete_case(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    sqlx::query("DELETE FROM property_case_properties WHERE case_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    let result = sqlx::query("DELETE FROM property_law_cases WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

/// Delete a case's extension (with its co-owner links) and clear the
/// reference. Shared person records survive.
#[tracing::instrument(skip(pool))]
pub async fn delete_detail(pool: &Pool<Sqlite>, case_id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(PropertyLawSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM property_law_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let (subtype, detail_id) = match row {
        Some((subtype, Some(detail_id))) => (subtype, detail_id),
        _ => return Ok(false),
    };

    match subtype {
        PropertyLawSubtype::TitleDispute => {
            sqlx::query("DELETE FROM property_title_dispute_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        PropertyLawSubtype::EvictionSuit => {
            sqlx::query("DELETE FROM property_eviction_suit_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        PropertyLawSubtype::PartitionSuit => {
            sqlx::query("DELETE FROM property_partition_co_owners WHERE partition_id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            sqlx::query("DELETE FROM property_partition_suit_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        PropertyLawSubtype::Other => return Ok(false),
    }

    set_detail_id(&mut *tx, case_id, None).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(true)
}
