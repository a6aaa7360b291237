use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use shared_types::{
    AppError, CaseType, CivilCase, CivilCaseRow, CivilDetail, CivilSubtype, ContractDisputeDetail,
    MoneyRecoveryDetail, PropertyDisputeDetail, TortClaimDetail,
};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use super::{amount, coin, pick, random_property};
use crate::error_convert::SqlxErrorExt;
use crate::repo::civil as repo;

const RELIEF_SOUGHT: &[&str] = &[
    "Specific performance of the agreement dated last year",
    "Recovery of possession together with mesne profits",
    "Permanent injunction restraining the defendant",
    "Declaration of title and consequential relief",
    "Damages with interest and costs",
];
const CONTRACT_TYPES: &[&str] = &["Sale", "Lease", "Service", "Construction", "Partnership"];
const BREACH_DETAILS: &[&str] = &[
    "Delivery withheld despite full payment",
    "Work abandoned midway without notice",
    "Payment milestones repeatedly missed",
];
const DEBT_DOCUMENTATION: &[&str] = &[
    "Promissory note",
    "Loan agreement",
    "Dishonoured cheque",
    "Ledger extract",
];
const TORT_TYPES: &[&str] = &["Negligence", "Nuisance", "Defamation", "Trespass"];

/// Generate a civil case with a uniformly chosen subtype.
pub async fn generate_civil_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<CivilCase, AppError> {
    let subtype = CivilSubtype::ALL[rng.gen_range(0..CivilSubtype::ALL.len())];
    generate_civil_case_with(pool, rng, subtype).await
}

/// Generate a civil case with the given subtype. A property dispute gets
/// 1-3 freshly persisted shared property records. One transaction.
pub async fn generate_civil_case_with(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    subtype: CivilSubtype,
) -> Result<CivilCase, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let row = CivilCaseRow {
        id,
        created_at: now,
        updated_at: now,
        case_type: CaseType::Civil,
        subtype,
        relief_sought: pick(rng, RELIEF_SOUGHT),
        claim_amount: coin(rng).then(|| amount(rng, 10_000.0, 1_000_000.0)),
        settlement_attempts: coin(rng),
        detail_id: None,
        other_details: (subtype == CivilSubtype::Other)
            .then(|| "Miscellaneous civil matter".to_string()),
    };
    let created_at = repo::insert_case(&mut *tx, &row).await?;

    let detail = match subtype {
        CivilSubtype::ContractDispute => Some(CivilDetail::ContractDispute(ContractDisputeDetail {
            contract_type: coin(rng).then(|| pick(rng, CONTRACT_TYPES)),
            breach_details: coin(rng).then(|| pick(rng, BREACH_DETAILS)),
        })),
        CivilSubtype::PropertyDispute => {
            let mut properties = Vec::new();
            for _ in 0..rng.gen_range(1..=3) {
                properties.push(random_property(&mut *tx, rng).await?);
            }
            Some(CivilDetail::PropertyDispute(PropertyDisputeDetail {
                properties,
            }))
        }
        CivilSubtype::MoneyRecovery => Some(CivilDetail::MoneyRecovery(MoneyRecoveryDetail {
            principal_amount: coin(rng).then(|| amount(rng, 25_000.0, 5_000_000.0)),
            debt_documentation: coin(rng).then(|| pick(rng, DEBT_DOCUMENTATION)),
        })),
        CivilSubtype::TortClaim => Some(CivilDetail::TortClaim(TortClaimDetail {
            tort_type: coin(rng).then(|| pick(rng, TORT_TYPES)),
            damages_claimed: coin(rng).then(|| amount(rng, 50_000.0, 2_000_000.0)),
        })),
        CivilSubtype::Other => None,
    };

    let updated_at = match &detail {
        Some(detail) => {
            let detail_id = repo::insert_detail(&mut *tx, detail).await?;
            repo::set_detail_id(&mut *tx, id, Some(detail_id)).await?
        }
        None => created_at,
    };

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(CivilCase {
        id,
        created_at,
        updated_at,
        subtype,
        relief_sought: row.relief_sought,
        claim_amount: row.claim_amount,
        settlement_attempts: row.settlement_attempts,
        other_details: row.other_details,
        detail,
    })
}
