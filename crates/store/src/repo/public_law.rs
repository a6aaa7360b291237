use chrono::{DateTime, Utc};
use shared_types::{
    AppError, ConstitutionalDetail, PublicLawCase, PublicLawCaseRow, PublicLawDetail,
    PublicLawSubtype,
};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a public-law case row. The caller owns the id; timestamps are stamped here.
pub async fn insert_case(
    conn: &mut SqliteConnection,
    row: &PublicLawCaseRow,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO public_law_cases
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

/// Insert an extension record into the table matching the detail's tag,
/// together with any fundamental rights, and return its new id.
pub async fn insert_detail(
    conn: &mut SqliteConnection,
    detail: &PublicLawDetail,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    match detail {
        PublicLawDetail::Constitutional(c) => {
            sqlx::query(
                "INSERT INTO public_constitutional_details (id, government_action_challenged) \
                 VALUES ($1, $2)",
            )
            .bind(id)
            .bind(&c.government_action_challenged)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            for right in &c.fundamental_rights {
                sqlx::query(
                    "INSERT INTO public_fundamental_rights (id, constitutional_id, right_name) \
                     VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(right)
                .execute(&mut *conn)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            }
        }
        PublicLawDetail::Taxation(t) => {
            sqlx::query(
                "INSERT INTO public_taxation_details \
                 (id, assessment_year, disputed_amount, tax_authority, appeal_stage) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(id)
            .bind(&t.assessment_year)
            .bind(t.disputed_amount)
            .bind(&t.tax_authority)
            .bind(t.appeal_stage)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        PublicLawDetail::Environmental(e) => {
            sqlx::query(
                "INSERT INTO public_environmental_details \
                 (id, pollution_type, regulatory_authority, penalty_imposed) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(&e.pollution_type)
            .bind(&e.regulatory_authority)
            .bind(e.penalty_imposed)
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
    sqlx::query("UPDATE public_law_cases SET detail_id = $1, updated_at = $2 WHERE id = $3")
        .bind(detail_id)
        .bind(now)
        .bind(case_id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Fetch the flat case row.
pub async fn find_row(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<PublicLawCaseRow>, AppError> {
    sqlx::query_as::<_, PublicLawCaseRow>(
        r#"
        SELECT id, created_at, updated_at, case_type, subtype, detail_id, other_details
        FROM public_law_cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Assemble the full case with the extension selected by subtype.
pub async fn load(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<PublicLawCase>, AppError> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let detail = match row.detail_id {
        None => None,
        Some(detail_id) => load_detail(pool, row.subtype, detail_id).await?,
    };

    Ok(Some(PublicLawCase {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        subtype: row.subtype,
        other_details: row.other_details,
        detail,
    }))
}

async fn load_detail(
    pool: &Pool<Sqlite>,
    subtype: PublicLawSubtype,
    detail_id: Uuid,
) -> Result<Option<PublicLawDetail>, AppError> {
    let detail = match subtype {
        PublicLawSubtype::Constitutional => {
            let action: Option<(Option<String>,)> = sqlx::query_as(
                "SELECT government_action_challenged FROM public_constitutional_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            match action {
                None => None,
                Some((government_action_challenged,)) => {
                    let fundamental_rights: Vec<String> = sqlx::query_scalar(
                        "SELECT right_name FROM public_fundamental_rights WHERE constitutional_id = $1",
                    )
                    .bind(detail_id)
                    .fetch_all(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                    Some(PublicLawDetail::Constitutional(ConstitutionalDetail {
                        government_action_challenged,
                        fundamental_rights,
                    }))
                }
            }
        }
        PublicLawSubtype::Taxation => sqlx::query_as::<_, shared_types::TaxationDetail>(
            "SELECT assessment_year, disputed_amount, tax_authority, appeal_stage \
             FROM public_taxation_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(PublicLawDetail::Taxation),
        PublicLawSubtype::Environmental => sqlx::query_as::<_, shared_types::EnvironmentalDetail>(
            "SELECT pollution_type, regulatory_authority, penalty_imposed \
             FROM public_environmental_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(PublicLawDetail::Environmental),
        PublicLawSubtype::Other => None,
    };
    Ok(detail)
}

/// Attach an extension to a case that has none; tags must agree.
#[tracing::instrument(skip(pool, detail))]
pub async fn attach_detail(
    pool: &Pool<Sqlite>,
    case_id: Uuid,
    detail: &PublicLawDetail,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(PublicLawSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM public_law_cases WHERE id = $1")
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

/// Delete a case. The extension row and its rights survive the case.
#[tracing::instrument(skip(pool))]
pub async fn delete_case(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM public_law_cases WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

/// Delete a case's extension (with its rights rows) and clear the reference.
#[tracing::instrument(skip(pool))]
pub async fn delete_detail(pool: &Pool<Sqlite>, case_id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(PublicLawSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM public_law_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let (subtype, detail_id) = match row {
        Some((subtype, Some(detail_id))) => (subtype, detail_id),
        _ => return Ok(false),
    };

    match subtype {
        PublicLawSubtype::Constitutional => {
            sqlx::query("DELETE FROM public_fundamental_rights WHERE constitutional_id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            sqlx::query("DELETE FROM public_constitutional_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        PublicLawSubtype::Taxation => {
            sqlx::query("DELETE FROM public_taxation_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        PublicLawSubtype::Environmental => {
            sqlx::query("DELETE FROM public_environmental_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        PublicLawSubtype::Other => return Ok(false),
    }

    set_detail_id(&mut *tx, case_id, None).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(true)
}
