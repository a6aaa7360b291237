use chrono::{DateTime, Utc};
use shared_types::{
    AppError, ChildCustodyDetail, ChildDetail, DivorceDetail, DomesticViolenceDetail, FamilyDetail,
    FamilyLawCase, FamilyLawCaseRow, FamilyLawSubtype, ViolenceType,
};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a family-law case row. The caller owns the id; timestamps are stamped here.
pub async fn insert_case(
    conn: &mut SqliteConnection,
    row: &FamilyLawCaseRow,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO family_law_cases
            (id, created_at, updated_at, case_type, subtype, marriage_date,
             children_involved, detail_id, other_details)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(row.id)
    .bind(now)
    .bind(now)
    .bind(row.case_type)
    .bind(row.subtype)
    .bind(row.marriage_date)
    .bind(row.children_involved)
    .bind(row.detail_id)
    .bind(&row.other_details)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Insert an extension record into the table matching the detail's tag,
/// together with its sub-children (grounds, custody links, violence types),
/// and return its new id. Custody children must already be persisted.
pub async fn insert_detail(
    conn: &mut SqliteConnection,
    detail: &FamilyDetail,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    match detail {
        FamilyDetail::Divorce(d) => {
            sqlx::query("INSERT INTO family_divorce_details (id, divorce_type) VALUES ($1, $2)")
                .bind(id)
                .bind(&d.divorce_type)
                .execute(&mut *conn)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            for ground in &d.grounds {
                sqlx::query(
                    "INSERT INTO family_divorce_grounds (id, divorce_id, ground) VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(ground)
                .execute(&mut *conn)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            }
        }
        FamilyDetail::Maintenance(m) => {
            sqlx::query(
                "INSERT INTO family_maintenance_details (id, maintenance_for, amount_claimed) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&m.maintenance_for)
            .bind(m.amount_claimed)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        FamilyDetail::ChildCustody(c) => {
            sqlx::query(
                "INSERT INTO family_child_custody_details (id, visitation_rights_proposed) \
                 VALUES ($1, $2)",
            )
            .bind(id)
            .bind(&c.visitation_rights_proposed)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            for child in &c.children {
                sqlx::query(
                    "INSERT INTO family_custody_children (id, custody_id, child_id) \
                     VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(child.id)
                .execute(&mut *conn)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            }
        }
        FamilyDetail::DomesticViolence(v) => {
            sqlx::query(
                "INSERT INTO family_domestic_violence_details (id, protection_order_sought) \
                 VALUES ($1, $2)",
            )
            .bind(id)
            .bind(v.protection_order_sought)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            for violence_type in &v.violence_types {
                sqlx::query(
                    "INSERT INTO family_violence_types (id, domestic_violence_id, violence_type) \
                     VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(violence_type)
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
    sqlx::query("UPDATE family_law_cases SET detail_id = $1, updated_at = $2 WHERE id = $3")
        .bind(detail_id)
        .bind(now)
        .bind(case_id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Fetch the flat case row.
pub async fn find_row(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<FamilyLawCaseRow>, AppError> {
    sqlx::query_as::<_, FamilyLawCaseRow>(
        r#"
        SELECT id, created_at, updated_at, case_type, subtype, marriage_date,
               children_involved, detail_id, other_details
        FROM family_law_cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Assemble the full case with the extension selected by subtype.
pub async fn load(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<FamilyLawCase>, AppError> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let detail = match row.detail_id {
        None => None,
        Some(detail_id) => load_detail(pool, row.subtype, detail_id).await?,
    };

    Ok(Some(FamilyLawCase {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        subtype: row.subtype,
        marriage_date: row.marriage_date,
        children_involved: row.children_involved,
        other_details: row.other_details,
        detail,
    }))
}

async fn load_detail(
    pool: &Pool<Sqlite>,
    subtype: FamilyLawSubtype,
    detail_id: Uuid,
) -> Result<Option<FamilyDetail>, AppError> {
    let detail = match subtype {
        FamilyLawSubtype::Divorce => {
            let divorce_type: Option<(Option<String>,)> =
                sqlx::query_as("SELECT divorce_type FROM family_divorce_details WHERE id = $1")
                    .bind(detail_id)
                    .fetch_optional(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
            match divorce_type {
                None => None,
                Some((divorce_type,)) => {
                    let grounds: Vec<String> = sqlx::query_scalar(
                        "SELECT ground FROM family_divorce_grounds WHERE divorce_id = $1",
                    )
                    .bind(detail_id)
                    .fetch_all(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                    Some(FamilyDetail::Divorce(DivorceDetail {
                        divorce_type,
                        grounds,
                    }))
                }
            }
        }
        FamilyLawSubtype::Maintenance => sqlx::query_as::<_, shared_types::MaintenanceDetail>(
            "SELECT maintenance_for, amount_claimed FROM family_maintenance_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(FamilyDetail::Maintenance),
        FamilyLawSubtype::ChildCustody => {
            let visitation: Option<(Option<String>,)> = sqlx::query_as(
                "SELECT visitation_rights_proposed FROM family_child_custody_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            match visitation {
                None => None,
                Some((visitation_rights_proposed,)) => {
                    let children = sqlx::query_as::<_, ChildDetail>(
                        r#"
                        SELECT c.id, c.age
                        FROM child_details c
                        JOIN family_custody_children l ON l.child_id = c.id
                        WHERE l.custody_id = $1
                        "#,
                    )
                    .bind(detail_id)
                    .fetch_all(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                    Some(FamilyDetail::ChildCustody(ChildCustodyDetail {
                        visitation_rights_proposed,
                        children,
                    }))
                }
            }
        }
        FamilyLawSubtype::DomesticViolence => {
            let sought: Option<(bool,)> = sqlx::query_as(
                "SELECT protection_order_sought FROM family_domestic_violence_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            match sought {
                None => None,
                Some((protection_order_sought,)) => {
                    let violence_types: Vec<ViolenceType> = sqlx::query_scalar(
                        "SELECT violence_type FROM family_violence_types WHERE domestic_violence_id = $1",
                    )
                    .bind(detail_id)
                    .fetch_all(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                    Some(FamilyDetail::DomesticViolence(DomesticViolenceDetail {
                        protection_order_sought,
                        violence_types,
                    }))
                }
            }
        }
        FamilyLawSubtype::Other => None,
    };
    Ok(detail)
}

/// Attach an extension to a case that has none; tags must agree.
#[tracing::instrument(skip(pool, detail))]
pub async fn attach_detail(
    pool: &Pool<Sqlite>,
    case_id: Uuid,
    detail: &FamilyDetail,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(FamilyLawSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM family_law_cases WHERE id = $1")
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

/// Delete a case. Family-law cases have no base-level children; the
/// extension row and its sub-children survive the case.
#[tracing::instrument(skip(pool))]
pub async fn delete_case(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM family_law_cases WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

/// Delete a case's extension with its sub-children and clear the
/// reference. Shared child records survive; only custody links go.
#[tracing::instrument(skip(pool))]
pub async fn delete_detail(pool: &Pool<Sqlite>, case_id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(FamilyLawSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM family_law_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let (subtype, detail_id) = match row {
        Some((subtype, Some(detail_id))) => (subtype, detail_id),
        _ => return Ok(false),
    };

    match subtype {
        FamilyLawSubtype::Divorce => {
            sqlx::query("DELETE FROM family_divorce_grounds WHERE divorce_id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            sqlx::query("DELETE FROM family_divorce_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        FamilyLawSubtype::Maintenance => {
            sqlx::query("DELETE FROM family_maintenance_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        FamilyLawSubtype::ChildCustody => {
            sqlx::query("DELETE FROM family_custody_children WHERE custody_id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            sqlx::query("DELETE FROM family_child_custody_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        FamilyLawSubtype::DomesticViolence => {
            sqlx::query("DELETE FROM family_violence_types WHERE domestic_violence_id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
            sqlx::query("DELETE FROM family_domestic_violence_details WHERE id = $1")
                .bind(detail_id)
                .execute(&mut *tx)
                .await
                .map_err(SqlxErrorExt::into_app_error)?;
        }
        FamilyLawSubtype::Other => return Ok(false),
    }

    set_detail_id(&mut *tx, case_id, None).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(true)
}
