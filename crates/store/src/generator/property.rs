use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use shared_types::{
    AppError, CaseType, EvictionSuitDetail, PartitionSuitDetail, PropertyLawCase,
    PropertyLawCaseRow, PropertyLawDetail, PropertyLawSubtype, TitleDisputeDetail,
};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use super::{amount, coin, pick, random_person, random_property};
use crate::error_convert::SqlxErrorExt;
use crate::repo::property as repo;

const CLAIM_BASES: &[&str] = &[
    "Registered sale deed",
    "Adverse possession",
    "Inheritance",
    "Unregistered agreement to sell",
];
const POSSESSION_STATUSES: &[&str] = &[
    "Plaintiff in possession",
    "Defendant in possession",
    "Joint possession",
    "Vacant",
];
const EVICTION_GROUNDS: &[&str] = &[
    "Arrears of rent",
    "Bona fide personal requirement",
    "Subletting without consent",
    "Material damage to premises",
];
const SHARES_CLAIMED: &[&str] = &["One half", "One third", "One quarter", "Equal shares"];

/// Generate a property-law case with a uniformly chosen subtype.
pub async fn generate_property_law_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<PropertyLawCase, AppError> {
    let subtype = PropertyLawSubtype::ALL[rng.gen_range(0..PropertyLawSubtype::ALL.len())];
    generate_property_law_case_with(pool, rng, subtype).await
}

/// Generate a property-law case with the given subtype. Every case links
/// 1-3 shared property records; a partition suit additionally gets 2-5
/// co-owner person records. One transaction.
pub async fn generate_property_law_case_with(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    subtype: PropertyLawSubtype,
) -> Result<PropertyLawCase, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let row = PropertyLawCaseRow {
        id,
        created_at: now,
        updated_at: now,
        case_type: CaseType::PropertyLaw,
        subtype,
        detail_id: None,
        other_details: (subtype == PropertyLawSubtype::Other)
            .then(|| "General property matter".to_string()),
    };
    let created_at = repo::insert_case(&mut *tx, &row).await?;

    let mut properties = Vec::new();
    for _ in 0..rng.gen_range(1..=3) {
        let property = random_property(&mut *tx, rng).await?;
        repo::insert_case_property(&mut *tx, id, property.id).await?;
        properties.push(property);
    }

    let detail = match subtype {
        PropertyLawSubtype::TitleDispute => Some(PropertyLawDetail::TitleDispute(
            TitleDisputeDetail {
                claim_basis: coin(rng).then(|| pick(rng, CLAIM_BASES)),
                possession_status: coin(rng).then(|| pick(rng, POSSESSION_STATUSES)),
            },
        )),
        PropertyLawSubtype::EvictionSuit => Some(PropertyLawDetail::EvictionSuit(
            EvictionSuitDetail {
                eviction_grounds: coin(rng).then(|| pick(rng, EVICTION_GROUNDS)),
                arrears_amount: coin(rng).then(|| amount(rng, 10_000.0, 500_000.0)),
            },
        )),
        PropertyLawSubtype::PartitionSuit => {
            let mut co_owners = Vec::new();
            for _ in 0..rng.gen_range(2..=5) {
                co_owners.push(random_person(&mut *tx, rng).await?);
            }
            Some(PropertyLawDetail::PartitionSuit(PartitionSuitDetail {
                share_claimed: coin(rng).then(|| pick(rng, SHARES_CLAIMED)),
                co_owners,
            }))
        }
        PropertyLawSubtype::Other => None,
    };

    let updated_at = match &detail {
        Some(detail) => {
            let detail_id = repo::insert_detail(&mut *tx, detail).await?;
            repo::set_detail_id(&mut *tx, id, Some(detail_id)).await?
        }
        None => created_at,
    };

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(PropertyLawCase {
        id,
        created_at,
        updated_at,
        subtype,
        other_details: row.other_details,
        properties,
        detail,
    })
}
