use chrono::{DateTime, Utc};
use shared_types::{
    AppError, LabourDetail, LabourDisputeCase, LabourDisputeCaseRow, LabourSubtype,
    WorkplaceDiscriminationDetail,
};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;
use crate::repo::person;

/// Insert a labour-dispute case row; timestamps are stamped here. The
/// employee, if referenced, must already be persisted.
pub async fn insert_case(
    conn: &mut SqliteConnection,
    row: &LabourDisputeCaseRow,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO labour_dispute_cases
            (id, created_at, updated_at, case_type, subtype, employee_id,
             employer_details, employment_start_date, detail_id, other_details)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(row.id)
    .bind(now)
    .bind(now)
    .bind(row.case_type)
    .bind(row.subtype)
    .bind(row.employee_id)
    .bind(&row.employer_details)
    .bind(row.employment_start_date)
    .bind(row.detail_id)
    .bind(&row.other_details)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Insert an extension record into the table matching the detail's tag,
/// together with any discrimination grounds, and return its new id.
pub async fn insert_detail(
    conn: &mut SqliteConnection,
    detail: &LabourDetail,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    match detail {
        LabourDetail::WrongfulTermination(w) => {
            sqlx::query(
                "INSERT INTO labour_wrongful_termination_details \
                 (id, termination_date, termination_reason_stated) VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(w.termination_date)
            .bind(&w.termination_reason_stated)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        LabourDetail::WageDispute(w) => {
            sqlx::query(
                "INSERT INTO labour_wage_dispute_details (id, disputed_amount, wage_dispute_type) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(w.disputed_amount)
            .bind(&w.wage_dispute_type)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        LabourDetail::WorkplaceDiscrimination(w) => {
            sqlx::query(
                "INSERT INTO labour_discrimination_details (id, incident_details) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(&w.incident_details)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            for ground in &w.grounds {
                sqlx::query(
                    "INSERT INTO labour_discrimination_grounds (id, discrimination_id, ground) \
                     VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(ground)
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
    sqlx::query("UPDATE labour_dispute_cases SET detail_id = $1, updated_at = $2 WHERE id = $3")
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
) -> Result<Option<LabourDisputeCaseRow>, AppError> {
    sqlx::query_as::<_, LabourDisputeCaseRow>(
        r#"
        SELECT id, created_at, updated_at, case_type, subtype, employee_id,
               employer_details, employment_start_date, detail_id, other_details
        FROM labour_dispute_cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Assemble the full case: base row, employee person record, and the
/// extension selected by subtype.
pub async fn load(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<LabourDisputeCase>, AppError> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let employee = match row.employee_id {
        None => None,
        Some(person_id) => person::find_person(pool, person_id).await?,
    };

    let detail = match row.detail_id {
        None => None,
        Some(detail_id) => load_detail(pool, row.subtype, detail_id).await?,
    };

    Ok(Some(LabourDisputeCase {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        subtype: row.subtype,
        employee,
        employer_details: row.employer_details,
        employment_start_date: row.employment_start_date,
        other_details: row.other_details,
        detail,
    }))
}

async fn load_detail(
    pool: &Pool<Sqlite>,
    subtype: LabourSubtype,
    detail_id: Uuid,
) -> Result<Option<LabourDetail>, AppError> {
    let detail = match subtype {
        LabourSubtype::WrongfulTermination => {
            sqlx::query_as::<_, shared_types::WrongfulTerminationDetail>(
                "SELECT termination_date, termination_reason_stated \
                 FROM labour_wrongful_termination_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?
            .map(LabourDetail::WrongfulTermination)
        }
        LabourSubtype::WageDispute => sqlx::query_as::<_, shared_types::WageDisputeDetail>(
            "SELECT disputed_amount, wage_dispute_type FROM labour_wage_dispute_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(LabourDetail::WageDispute),
        LabourSubtype::WorkplaceDiscrimination => {
            let incident: Option<(Option<String>,)> = sqlx::query_as(
                "SELECT incident_details FROM labour_discrimination_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            match incident {
                None => None,
                Some((incident_details,)) => {
                    let grounds: Vec<String> = sqlx::query_scalar(
                        "SELECT ground FROM labour_discrimination_grounds WHERE discrimination_id = $1",
                    )
                    .bind(detail_id)
                    .fetch_all(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                    Some(LabourDetail::WorkplaceDiscrimination(
                        WorkplaceDiscriminationDetail {
                            incident_details,
                            grounds,
                        },
                    ))
                }
            }
        }
        LabourSubtype::Other => None,
    };
    Ok(detail)
}

/// Attach an extension to a case that has none; tags must agree.
#[tracing::instrument(skip(pool, detail))]
pub async fn attach_detail(
    pool: &Pool<Sqlite>,
    case_id: Uuid,
    detail: &LabourDetail,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(LabourSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM labour_dispute_cases WHERE id = $1")
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

/// Delete a case. The employee person record and the extension row
/// survive the case.
#[tracing::instrument(skip(pool))]
pub async fn delete_case(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM labour_dispute_cases WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

/// Delete a case's extension (with its grounds) and clear the reference.
#[tracing::instrument(skip(pool))]
pub async fn delete_detail(pool: &Pool<Sqlite>, case_id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(LabourSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM labour_dispute_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let (subtype, detail_id) = match row {
        Some((subtype, Some(detail_id))) => (subtype, detail_id),
        _ => return Ok(false),
    };

    match subtype {
        LabourSubtype::WrongfulTermination => {
            sqlx::query("DELETE FROM labour_wrongful_termination_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        LabourSubtype::WageDispute => {
            sqlx::query("DELETE FROM labour_wage_dispute_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        LabourSubtype::WorkplaceDiscrimination => {
            sqlx::query("DELETE FROM labour_discrimination_grounds WHERE discrimination_id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            sqlx::query("DELETE FROM labour_discrimination_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        LabourSubtype::Other => return Ok(false),
    }

    set_detail_id(&mut *tx, case_id, None).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(true)
}
