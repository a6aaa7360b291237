use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use shared_types::{
    AppError, CaseType, CopyrightDetail, IntellectualPropertyCase, IntellectualPropertyCaseRow,
    IpDetail, IpSubtype, PatentDetail, TrademarkDetail,
};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use super::{coin, pick, COMPANY_NAMES};
use crate::error_convert::SqlxErrorExt;
use crate::repo::intellectual_property as repo;

const IP_DISPUTE_TYPES: &[&str] = &["Infringement", "Invalidity", "Licensing", "Ownership"];
const INVENTION_DETAILS: &[&str] = &[
    "Drip irrigation controller with moisture feedback",
    "Compostable food-grade packaging laminate",
    "Low-bandwidth video codec for rural telephony",
];
const TRADEMARK_DESCRIPTIONS: &[&str] = &[
    "Word mark with stylised peacock device",
    "Label mark for packaged spices",
    "Sound mark used in radio spots",
];
const WORK_TYPES: &[&str] = &["Literary", "Musical", "Cinematograph Film", "Software"];
const INFRINGING_WORK_DETAILS: &[&str] = &[
    "Verbatim reproduction sold through street vendors",
    "Unlicensed streaming on a regional platform",
    "Derivative translation published without consent",
];

/// Generate an IP case with a uniformly chosen subtype.
pub async fn generate_intellectual_property_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<IntellectualPropertyCase, AppError> {
    let subtype = IpSubtype::ALL[rng.gen_range(0..IpSubtype::ALL.len())];
    generate_intellectual_property_case_with(pool, rng, subtype).await
}

/// Generate an IP case with the given subtype. One transaction.
pub async fn generate_intellectual_property_case_with(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    subtype: IpSubtype,
) -> Result<IntellectualPropertyCase, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let row = IntellectualPropertyCaseRow {
        id,
        created_at: now,
        updated_at: now,
        case_type: CaseType::IntellectualProperty,
        subtype,
        ip_owner_details: coin(rng).then(|| pick(rng, COMPANY_NAMES)),
        detail_id: None,
        other_details: (subtype == IpSubtype::Other)
            .then(|| "Unregistered rights dispute".to_string()),
    };
    let created_at = repo::insert_case(&mut *tx, &row).await?;

    let detail = match subtype {
        IpSubtype::Patent => Some(IpDetail::Patent(PatentDetail {
            invention_details: coin(rng).then(|| pick(rng, INVENTION_DETAILS)),
            dispute_type: coin(rng).then(|| pick(rng, IP_DISPUTE_TYPES)),
        })),
        IpSubtype::Trademark => Some(IpDetail::Trademark(TrademarkDetail {
            trademark_description: coin(rng).then(|| pick(rng, TRADEMARK_DESCRIPTIONS)),
            dispute_type: coin(rng).then(|| pick(rng, IP_DISPUTE_TYPES)),
        })),
        IpSubtype::Copyright => Some(IpDetail::Copyright(CopyrightDetail {
            work_type: coin(rng).then(|| pick(rng, WORK_TYPES)),
            infringing_work_details: coin(rng).then(|| pick(rng, INFRINGING_WORK_DETAILS)),
        })),
        IpSubtype::Other => None,
    };

    let updated_at = match &detail {
        Some(detail) => {
            let detail_id = repo::insert_detail(&mut *tx, detail).await?;
            repo::set_detail_id(&mut *tx, id, Some(detail_id)).await?
        }
        None => created_at,
    };

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(IntellectualPropertyCase {
        id,
        created_at,
        updated_at,
        subtype,
        ip_owner_details: row.ip_owner_details,
        other_details: row.other_details,
        detail,
    })
}
