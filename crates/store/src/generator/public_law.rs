use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use shared_types::{
    AppealStage, AppError, CaseType, ConstitutionalDetail, EnvironmentalDetail, PublicLawCase,
    PublicLawCaseRow, PublicLawDetail, PublicLawSubtype, TaxationDetail,
};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use super::{amount, coin, pick};
use crate::error_convert::SqlxErrorExt;
use crate::repo::public_law as repo;

const FUNDAMENTAL_RIGHTS: &[&str] = &["Equality", "Freedom of Speech", "Life and Liberty"];
const GOVERNMENT_ACTIONS: &[&str] = &[
    "Land acquisition notification without hearing",
    "Blanket internet shutdown order",
    "Retrospective levy on completed transactions",
];
const TAX_AUTHORITIES: &[&str] = &[
    "Income Tax Department",
    "State GST Authority",
    "Municipal Assessment Office",
];
const POLLUTION_TYPES: &[&str] = &["Air", "Water", "Soil", "Noise"];
const REGULATORY_AUTHORITIES: &[&str] = &[
    "State Pollution Control Board",
    "National Green Tribunal Registry",
    "Coastal Zone Management Authority",
];

/// Generate a public-law case with a uniformly chosen subtype.
pub async fn generate_public_law_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<PublicLawCase, AppError> {
    let subtype = PublicLawSubtype::ALL[rng.gen_range(0..PublicLawSubtype::ALL.len())];
    generate_public_law_case_with(pool, rng, subtype).await
}

/// Generate a public-law case with the given subtype. A constitutional
/// matter invokes 1-2 fundamental rights; taxation always carries an
/// appeal stage. One transaction.
pub async fn generate_public_law_case_with(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    subtype: PublicLawSubtype,
) -> Result<PublicLawCase, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let row = PublicLawCaseRow {
        id,
        created_at: now,
        updated_at: now,
        case_type: CaseType::PublicLaw,
        subtype,
        detail_id: None,
        other_details: (subtype == PublicLawSubtype::Other)
            .then(|| "General administrative challenge".to_string()),
    };
    let created_at = repo::insert_case(&mut *tx, &row).await?;

    let detail = match subtype {
        PublicLawSubtype::Constitutional => {
            let mut fundamental_rights = Vec::new();
            for _ in 0..rng.gen_range(1..=2) {
                fundamental_rights.push(pick(rng, FUNDAMENTAL_RIGHTS));
            }
            Some(PublicLawDetail::Constitutional(ConstitutionalDetail {
                government_action_challenged: coin(rng).then(|| pick(rng, GOVERNMENT_ACTIONS)),
                fundamental_rights,
            }))
        }
        PublicLawSubtype::Taxation => {
            let year = Utc::now().year() - rng.gen_range(1..=6);
            Some(PublicLawDetail::Taxation(TaxationDetail {
                assessment_year: coin(rng).then(|| format!("{}-{}", year, (year + 1) % 100)),
                disputed_amount: coin(rng).then(|| amount(rng, 50_000.0, 10_000_000.0)),
                tax_authority: coin(rng).then(|| pick(rng, TAX_AUTHORITIES)),
                appeal_stage: Some(AppealStage::ALL[rng.gen_range(0..AppealStage::ALL.len())]),
            }))
        }
        PublicLawSubtype::Environmental => Some(PublicLawDetail::Environmental(
            EnvironmentalDetail {
                pollution_type: coin(rng).then(|| pick(rng, POLLUTION_TYPES)),
                regulatory_authority: coin(rng).then(|| pick(rng, REGULATORY_AUTHORITIES)),
                penalty_imposed: coin(rng).then(|| amount(rng, 25_000.0, 5_000_000.0)),
            },
        )),
        PublicLawSubtype::Other => None,
    };

    let updated_at = match &detail {
        Some(detail) => {
            let detail_id = repo::insert_detail(&mut *tx, detail).await?;
            repo::set_detail_id(&mut *tx, id, Some(detail_id)).await?
        }
        None => created_at,
    };

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(PublicLawCase {
        id,
        created_at,
        updated_at,
        subtype,
        other_details: row.other_details,
        detail,
    })
}
