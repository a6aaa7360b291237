use chrono::{DateTime, Utc};
use shared_types::{
    AppError, CriminalCase, CriminalCaseRow, CriminalCharge, CriminalDetail, CriminalEvidence,
    CriminalSubtype,
};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;
use crate::repo::person;

#[derive(sqlx::FromRow)]
struct MurderHomicideRow {
    victim_id: Uuid,
    weapon_used: Option<String>,
}

/// Insert a criminal case row. The caller owns the id; timestamps are stamped here.
pub async fn insert_case(
    conn: &mut SqliteConnection,
    row: &CriminalCaseRow,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO criminal_cases
            (id, created_at, updated_at, case_type, subtype, fir_number,
             police_station, arrest_date, bail_status, investigation_status,
             chargesheet_filed, chargesheet_date, witness_count, detail_id,
             other_details)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(row.id)
    .bind(now)
    .bind(now)
    .bind(row.case_type)
    .bind(row.subtype)
    .bind(&row.fir_number)
    .bind(&row.police_station)
    .bind(row.arrest_date)
    .bind(row.bail_status)
    .bind(row.investigation_status)
    .bind(row.chargesheet_filed)
    .bind(row.chargesheet_date)
    .bind(row.witness_count)
    .bind(row.detail_id)
    .bind(&row.other_details)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(now)
}

/// Insert a charge owned by a case.
pub async fn insert_charge(
    conn: &mut SqliteConnection,
    charge: &CriminalCharge,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO criminal_charges (id, case_id, charge_name) VALUES ($1, $2, $3)")
        .bind(charge.id)
        .bind(charge.case_id)
        .bind(&charge.charge_name)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Insert an evidence entry owned by a case.
pub async fn insert_evidence(
    conn: &mut SqliteConnection,
    evidence: &CriminalEvidence,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO criminal_evidence (id, case_id, evidence_type) VALUES ($1, $2, $3)")
        .bind(evidence.id)
        .bind(evidence.case_id)
        .bind(&evidence.evidence_type)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Insert an extension record into the table matching the detail's tag and
/// return its new id. A murder/homicide victim must already be persisted.
pub async fn insert_detail(
    conn: &mut SqliteConnection,
    detail: &CriminalDetail,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    match detail {
        CriminalDetail::MurderHomicide(m) => {
            sqlx::query(
                "INSERT INTO criminal_murder_homicide_details (id, victim_id, weapon_used) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(m.victim.id)
            .bind(&m.weapon_used)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        CriminalDetail::Theft(t) => {
            sqlx::query(
                "INSERT INTO criminal_theft_details (id, property_type, estimated_value) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&t.property_type)
            .bind(t.estimated_value)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        CriminalDetail::Assault(a) => {
            sqlx::query(
                "INSERT INTO criminal_assault_details (id, injury_severity, weapon_used) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(&a.injury_severity)
            .bind(&a.weapon_used)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
        CriminalDetail::Fraud(f) => {
            sqlx::query(
                "INSERT INTO criminal_fraud_details (id, amount_involved, fraud_type) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(f.amount_involved)
            .bind(&f.fraud_type)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        }
    }
    Ok(id)
}

/// Point a case at its extension record (or clear the reference with None)
/// and refresh updated_at.
pub async fn set_detail_id(
    conn: &mut SqliteConnection,
    case_id: Uuid,
    detail_id: Option<Uuid>,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    sqlx::query("UPDATE criminal_cases SET detail_id = $1, updated_at = $2 WHERE id = $3")
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
) -> Result<Option<CriminalCaseRow>, AppError> {
    sqlx::query_as::<_, CriminalCaseRow>(
        r#"
        SELECT id, created_at, updated_at, case_type, subtype, fir_number,
               police_station, arrest_date, bail_status, investigation_status,
               chargesheet_filed, chargesheet_date, witness_count, detail_id,
               other_details
        FROM criminal_cases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Assemble the full case: base row, the extension selected by subtype,
/// and the charge/evidence collections.
pub async fn load(pool: &Pool<Sqlite>, id: Uuid) -> Result<Option<CriminalCase>, AppError> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(None);
    };

    let detail = match row.detail_id {
        None => None,
        Some(detail_id) => load_detail(pool, row.subtype, detail_id).await?,
    };

    let charges = sqlx::query_as::<_, CriminalCharge>(
        "SELECT id, case_id, charge_name FROM criminal_charges WHERE case_id = $1",
    )
    .bind(id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let evidence_types = sqlx::query_as::<_, CriminalEvidence>(
        "SELECT id, case_id, evidence_type FROM criminal_evidence WHERE case_id = $1",
    )
    .bind(id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(Some(CriminalCase {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        subtype: row.subtype,
        fir_number: row.fir_number,
        police_station: row.police_station,
        arrest_date: row.arrest_date,
        bail_status: row.bail_status,
        investigation_status: row.investigation_status,
        chargesheet_filed: row.chargesheet_filed,
        chargesheet_date: row.chargesheet_date,
        witness_count: row.witness_count,
        other_details: row.other_details,
        detail,
        charges,
        evidence_types,
    }))
}

async fn load_detail(
    pool: &Pool<Sqlite>,
    subtype: CriminalSubtype,
    detail_id: Uuid,
) -> Result<Option<CriminalDetail>, AppError> {
    let detail = match subtype {
        CriminalSubtype::MurderHomicide => {
            let row = sqlx::query_as::<_, MurderHomicideRow>(
                "SELECT victim_id, weapon_used FROM criminal_murder_homicide_details WHERE id = $1",
            )
            .bind(detail_id)
            .fetch_optional(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
            match row {
                None => None,
                Some(m) => {
                    let victim = person::find_person(pool, m.victim_id)
                        .await?
                        .ok_or_else(|| AppError::not_found("Victim record missing"))?;
                    Some(CriminalDetail::MurderHomicide(
                        shared_types::MurderHomicideDetail {
                            victim,
                            weapon_used: m.weapon_used,
                        },
                    ))
                }
            }
        }
        CriminalSubtype::Theft => sqlx::query_as::<_, shared_types::TheftDetail>(
            "SELECT property_type, estimated_value FROM criminal_theft_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(CriminalDetail::Theft),
        CriminalSubtype::Assault => sqlx::query_as::<_, shared_types::AssaultDetail>(
            "SELECT injury_severity, weapon_used FROM criminal_assault_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(CriminalDetail::Assault),
        CriminalSubtype::Fraud => sqlx::query_as::<_, shared_types::FraudDetail>(
            "SELECT amount_involved, fraud_type FROM criminal_fraud_details WHERE id = $1",
        )
        .bind(detail_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .map(CriminalDetail::Fraud),
        // The schema forbids a detail reference on Other.
        CriminalSubtype::Other => None,
    };
    Ok(detail)
}

/// Attach an extension to a case that has none. The detail's tag must match
/// the stored subtype; shared entities in the payload must already exist.
#[tracing::instrument(skip(pool, detail))]
pub async fn attach_detail(
    pool: &Pool<Sqlite>,
    case_id: Uuid,
    detail: &CriminalDetail,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(CriminalSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM criminal_cases WHERE id = $1")
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

/// Delete a case and its child collections. The extension row, if any,
/// survives as an independently addressable orphan; only the reference to
/// it disappears with the case row.
#[tracing::instrument(skip(pool))]
pub async fn delete_case(pool: &Pool<Sqlite>, id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    sqlx::query("DELETE FROM criminal_charges WHERE case_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    sqlx::query("DELETE FROM criminal_evidence WHERE case_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    let result = sqlx::query("DELETE FROM criminal_cases WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

/// Delete a case's extension record and clear the reference to it. The
/// case itself survives. Returns false when no extension was attached.
#[tracing::instrument(skip(pool))]
pub async fn delete_detail(pool: &Pool<Sqlite>, case_id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row: Option<(CriminalSubtype, Option<Uuid>)> =
        sqlx::query_as("SELECT subtype, detail_id FROM criminal_cases WHERE id = $1")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    let (subtype, detail_id) = match row {
        Some((subtype, Some(detail_id))) => (subtype, detail_id),
        _ => return Ok(false),
    };

    let table = match subtype {
        CriminalSubtype::MurderHomicide => "criminal_murder_homicide_details",
        CriminalSubtype::Theft => "criminal_theft_details",
        CriminalSubtype::Assault => "criminal_assault_details",
        CriminalSubtype::Fraud => "criminal_fraud_details",
        CriminalSubtype::Other => return Ok(false),
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
