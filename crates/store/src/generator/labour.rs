use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use shared_types::{
    AppError, CaseType, LabourDetail, LabourDisputeCase, LabourDisputeCaseRow, LabourSubtype,
    WageDisputeDetail, WorkplaceDiscriminationDetail, WrongfulTerminationDetail,
};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use super::{amount, coin, date_back, pick, random_person, COMPANY_NAMES};
use crate::error_convert::SqlxErrorExt;
use crate::repo::labour as repo;

const DISCRIMINATION_GROUNDS: &[&str] = &["Gender", "Caste", "Religion", "Disability"];
const TERMINATION_REASONS: &[&str] = &[
    "Redundancy",
    "Alleged misconduct",
    "Performance concerns",
    "No reason stated",
];
const WAGE_DISPUTE_TYPES: &[&str] = &[
    "Unpaid overtime",
    "Withheld final settlement",
    "Minimum wage shortfall",
    "Unauthorised deductions",
];
const INCIDENT_DETAILS: &[&str] = &[
    "Repeatedly passed over for promotion",
    "Hostile remarks by supervisor on record",
    "Denied facilities extended to peers",
];

/// Generate a labour-dispute case with a uniformly chosen subtype.
pub async fn generate_labour_dispute_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<LabourDisputeCase, AppError> {
    let subtype = LabourSubtype::ALL[rng.gen_range(0..LabourSubtype::ALL.len())];
    generate_labour_dispute_case_with(pool, rng, subtype).await
}

/// Generate a labour-dispute case with the given subtype. The employee is
/// always a freshly persisted shared person record. One transaction.
pub async fn generate_labour_dispute_case_with(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    subtype: LabourSubtype,
) -> Result<LabourDisputeCase, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let employee = random_person(&mut *tx, rng).await?;
    let row = LabourDisputeCaseRow {
        id,
        created_at: now,
        updated_at: now,
        case_type: CaseType::LabourDispute,
        subtype,
        employee_id: Some(employee.id),
        employer_details: Some(pick(rng, COMPANY_NAMES)),
        // Employment begun between twenty years and one month ago.
        employment_start_date: coin(rng).then(|| date_back(rng, 30, 20 * 365)),
        detail_id: None,
        other_details: (subtype == LabourSubtype::Other)
            .then(|| "General industrial dispute".to_string()),
    };
    let created_at = repo::insert_case(&mut *tx, &row).await?;

    let detail = match subtype {
        LabourSubtype::WrongfulTermination => Some(LabourDetail::WrongfulTermination(
            WrongfulTerminationDetail {
                termination_date: coin(rng).then(|| date_back(rng, 1, 2 * 365)),
                termination_reason_stated: coin(rng).then(|| pick(rng, TERMINATION_REASONS)),
            },
        )),
        LabourSubtype::WageDispute => Some(LabourDetail::WageDispute(WageDisputeDetail {
            disputed_amount: coin(rng).then(|| amount(rng, 10_000.0, 1_000_000.0)),
            wage_dispute_type: coin(rng).then(|| pick(rng, WAGE_DISPUTE_TYPES)),
        })),
        LabourSubtype::WorkplaceDiscrimination => {
            let mut grounds = Vec::new();
            for _ in 0..rng.gen_range(1..=2) {
                grounds.push(pick(rng, DISCRIMINATION_GROUNDS));
            }
            Some(LabourDetail::WorkplaceDiscrimination(
                WorkplaceDiscriminationDetail {
                    incident_details: coin(rng).then(|| pick(rng, INCIDENT_DETAILS)),
                    grounds,
                },
            ))
        }
        LabourSubtype::Other => None,
    };

    let updated_at = match &detail {
        Some(detail) => {
            let detail_id = repo::insert_detail(&mut *tx, detail).await?;
            repo::set_detail_id(&mut *tx, id, Some(detail_id)).await?
        }
        None => created_at,
    };

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(LabourDisputeCase {
        id,
        created_at,
        updated_at,
        subtype,
        employee: Some(employee),
        employer_details: row.employer_details,
        employment_start_date: row.employment_start_date,
        other_details: row.other_details,
        detail,
    })
}
