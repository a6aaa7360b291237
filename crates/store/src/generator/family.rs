use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use shared_types::{
    AppError, CaseType, ChildCustodyDetail, DivorceDetail, DomesticViolenceDetail, FamilyDetail,
    FamilyLawCase, FamilyLawCaseRow, FamilyLawSubtype, MaintenanceDetail, ViolenceType,
};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use super::{amount, coin, date_back, pick, random_child};
use crate::error_convert::SqlxErrorExt;
use crate::repo::family as repo;

const DIVORCE_TYPES: &[&str] = &["Contested", "Mutual Consent"];
const DIVORCE_GROUNDS: &[&str] = &["Cruelty", "Desertion", "Adultery", "Mutual Consent"];
const MAINTENANCE_FOR: &[&str] = &["Spouse", "Children", "Spouse and Children", "Parents"];
const VISITATION_PROPOSALS: &[&str] = &[
    "Alternate weekends with school holidays shared equally",
    "Supervised visitation twice a month",
    "Weekday evenings and alternating festivals",
];

/// Generate a family-law case with a uniformly chosen subtype.
pub async fn generate_family_law_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<FamilyLawCase, AppError> {
    let subtype = FamilyLawSubtype::ALL[rng.gen_range(0..FamilyLawSubtype::ALL.len())];
    generate_family_law_case_with(pool, rng, subtype).await
}

/// Generate a family-law case with the given subtype. Divorce gets 1-2
/// grounds, custody 1-4 shared child records, domestic violence 1-3
/// violence types. One transaction.
pub async fn generate_family_law_case_with(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    subtype: FamilyLawSubtype,
) -> Result<FamilyLawCase, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let row = FamilyLawCaseRow {
        id,
        created_at: now,
        updated_at: now,
        case_type: CaseType::FamilyLaw,
        subtype,
        // Marriages between thirty years and one year ago.
        marriage_date: coin(rng).then(|| date_back(rng, 365, 30 * 365)),
        children_involved: coin(rng),
        detail_id: None,
        other_details: (subtype == FamilyLawSubtype::Other)
            .then(|| "General family matter".to_string()),
    };
    let created_at = repo::insert_case(&mut *tx, &row).await?;

    let detail = match subtype {
        FamilyLawSubtype::Divorce => {
            let mut grounds = Vec::new();
            for _ in 0..rng.gen_range(1..=2) {
                grounds.push(pick(rng, DIVORCE_GROUNDS));
            }
            Some(FamilyDetail::Divorce(DivorceDetail {
                divorce_type: coin(rng).then(|| pick(rng, DIVORCE_TYPES)),
                grounds,
            }))
        }
        FamilyLawSubtype::Maintenance => Some(FamilyDetail::Maintenance(MaintenanceDetail {
            maintenance_for: coin(rng).then(|| pick(rng, MAINTENANCE_FOR)),
            amount_claimed: coin(rng).then(|| amount(rng, 5_000.0, 200_000.0)),
        })),
        FamilyLawSubtype::ChildCustody => {
            let mut children = Vec::new();
            for _ in 0..rng.gen_range(1..=4) {
                children.push(random_child(&mut *tx, rng).await?);
            }
            Some(FamilyDetail::ChildCustody(ChildCustodyDetail {
                visitation_rights_proposed: coin(rng).then(|| pick(rng, VISITATION_PROPOSALS)),
                children,
            }))
        }
        FamilyLawSubtype::DomesticViolence => {
            let mut violence_types = Vec::new();
            for _ in 0..rng.gen_range(1..=3) {
                violence_types.push(ViolenceType::ALL[rng.gen_range(0..ViolenceType::ALL.len())]);
            }
            Some(FamilyDetail::DomesticViolence(DomesticViolenceDetail {
                protection_order_sought: coin(rng),
                violence_types,
            }))
        }
        FamilyLawSubtype::Other => None,
    };

    let updated_at = match &detail {
        Some(detail) => {
            let detail_id = repo::insert_detail(&mut *tx, detail).await?;
            repo::set_detail_id(&mut *tx, id, Some(detail_id)).await?
        }
        None => created_at,
    };

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(FamilyLawCase {
        id,
        created_at,
        updated_at,
        subtype,
        marriage_date: row.marriage_date,
        children_involved: row.children_involved,
        other_details: row.other_details,
        detail,
    })
}
