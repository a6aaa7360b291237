use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use shared_types::{
    AppError, CaseType, ConsumerDetail, ConsumerDisputeCase, ConsumerDisputeCaseRow,
    ConsumerSubtype, ProductDefectDetail, ServiceDeficiencyDetail, UnfairTradePracticeDetail,
};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use super::{amount, coin, date_back, pick};
use crate::error_convert::SqlxErrorExt;
use crate::repo::consumer as repo;

const PRODUCT_SERVICE_DETAILS: &[&str] = &[
    "Refrigerator purchased from an authorised dealer",
    "Package holiday booked through a travel portal",
    "Health insurance policy renewal",
    "Flat booked in an under-construction project",
    "Mobile handset bought online",
];
const PRODUCT_TYPES: &[&str] = &["Appliance", "Electronics", "Vehicle", "Furniture"];
const DEFECT_NATURES: &[&str] = &[
    "Manufacturing defect",
    "Non-functional on delivery",
    "Repeated breakdowns within warranty",
];
const SERVICE_TYPES: &[&str] = &["Banking", "Insurance", "Telecom", "Travel", "Real Estate"];
const DEFICIENCY_NATURES: &[&str] = &[
    "Delay in delivery of service",
    "Claim wrongly repudiated",
    "Promised amenities not provided",
];
const PRACTICE_TYPES: &[&str] = &[
    "False advertising",
    "Bait and switch",
    "Hidden charges",
];
const MISLEADING_ASPECTS: &[&str] = &[
    "Discount shown against inflated price",
    "Warranty terms misrepresented",
    "Country of origin concealed",
];

/// Generate a consumer-dispute case with a uniformly chosen subtype.
pub async fn generate_consumer_dispute_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<ConsumerDisputeCase, AppError> {
    let subtype = ConsumerSubtype::ALL[rng.gen_range(0..ConsumerSubtype::ALL.len())];
    generate_consumer_dispute_case_with(pool, rng, subtype).await
}

/// Generate a consumer-dispute case with the given subtype. One transaction.
pub async fn generate_consumer_dispute_case_with(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    subtype: ConsumerSubtype,
) -> Result<ConsumerDisputeCase, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let row = ConsumerDisputeCaseRow {
        id,
        created_at: now,
        updated_at: now,
        case_type: CaseType::ConsumerDispute,
        subtype,
        product_service_details: pick(rng, PRODUCT_SERVICE_DETAILS),
        // Purchases within the last five years.
        purchase_date: coin(rng).then(|| date_back(rng, 0, 5 * 365)),
        compensation_claimed: coin(rng).then(|| amount(rng, 1_000.0, 500_000.0)),
        detail_id: None,
        other_details: (subtype == ConsumerSubtype::Other)
            .then(|| "General consumer grievance".to_string()),
    };
    let created_at = repo::insert_case(&mut *tx, &row).await?;

    let detail = match subtype {
        ConsumerSubtype::ProductDefect => Some(ConsumerDetail::ProductDefect(ProductDefectDetail {
            product_type: coin(rng).then(|| pick(rng, PRODUCT_TYPES)),
            defect_nature: coin(rng).then(|| pick(rng, DEFECT_NATURES)),
        })),
        ConsumerSubtype::ServiceDeficiency => {
            Some(ConsumerDetail::ServiceDeficiency(ServiceDeficiencyDetail {
                service_type: coin(rng).then(|| pick(rng, SERVICE_TYPES)),
                deficiency_nature: coin(rng).then(|| pick(rng, DEFICIENCY_NATURES)),
            }))
        }
        ConsumerSubtype::UnfairTradePractice => Some(ConsumerDetail::UnfairTradePractice(
            UnfairTradePracticeDetail {
                practice_type: coin(rng).then(|| pick(rng, PRACTICE_TYPES)),
                misleading_aspect: coin(rng).then(|| pick(rng, MISLEADING_ASPECTS)),
            },
        )),
        ConsumerSubtype::Other => None,
    };

    let updated_at = match &detail {
        Some(detail) => {
            let detail_id = repo::insert_detail(&mut *tx, detail).await?;
            repo::set_detail_id(&mut *tx, id, Some(detail_id)).await?
        }
        None => created_at,
    };

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(ConsumerDisputeCase {
        id,
        created_at,
        updated_at,
        subtype,
        product_service_details: row.product_service_details,
        purchase_date: row.purchase_date,
        compensation_claimed: row.compensation_claimed,
        other_details: row.other_details,
        detail,
    })
}
