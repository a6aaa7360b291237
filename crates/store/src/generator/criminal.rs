use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use shared_types::{
    AssaultDetail, AppError, BailStatus, CaseType, CriminalCase, CriminalCaseRow, CriminalCharge,
    CriminalDetail, CriminalEvidence, CriminalSubtype, FraudDetail, InvestigationStatus,
    MurderHomicideDetail, TheftDetail,
};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use super::{amount, coin, date_back, pick, random_person};
use crate::error_convert::SqlxErrorExt;
use crate::repo::criminal as repo;

const CHARGE_NAMES: &[&str] = &[
    "Theft",
    "Assault",
    "Fraud",
    "Property Damage",
    "Disorderly Conduct",
];
const EVIDENCE_TYPES: &[&str] = &["Documentary", "Physical", "Digital", "Testimonial"];
const POLICE_STATIONS: &[&str] = &[
    "Koramangala PS",
    "Connaught Place PS",
    "Bandra PS",
    "Salt Lake PS",
    "T Nagar PS",
];
const WEAPONS: &[&str] = &["Knife", "Firearm", "Blunt Object", "None Identified"];
const PROPERTY_TYPES: &[&str] = &["Vehicle", "Jewellery", "Electronics", "Cash", "Machinery"];
const INJURY_SEVERITIES: &[&str] = &["Minor", "Grievous", "Critical"];
const FRAUD_TYPES: &[&str] = &[
    "Cheque Fraud",
    "Investment Fraud",
    "Identity Fraud",
    "Forgery",
];

fn fir_number(rng: &mut StdRng) -> String {
    format!("FIR-{}/{}", rng.gen_range(1000..=9999), Utc::now().year())
}

/// Generate a criminal case with a uniformly chosen subtype.
pub async fn generate_criminal_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<CriminalCase, AppError> {
    let subtype = CriminalSubtype::ALL[rng.gen_range(0..CriminalSubtype::ALL.len())];
    generate_criminal_case_with(pool, rng, subtype).await
}

/// Generate a criminal case with the given subtype: base row, 1-3 charges,
/// 1-3 evidence entries, and the matching extension. One transaction.
pub async fn generate_criminal_case_with(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    subtype: CriminalSubtype,
) -> Result<CriminalCase, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let row = CriminalCaseRow {
        id,
        created_at: now,
        updated_at: now,
        case_type: CaseType::Criminal,
        subtype,
        fir_number: fir_number(rng),
        police_station: coin(rng).then(|| pick(rng, POLICE_STATIONS)),
        arrest_date: coin(rng).then(|| date_back(rng, 1, 365)),
        bail_status: Some(BailStatus::ALL[rng.gen_range(0..BailStatus::ALL.len())]),
        investigation_status: InvestigationStatus::ALL
            [rng.gen_range(0..InvestigationStatus::ALL.len())],
        chargesheet_filed: coin(rng),
        chargesheet_date: coin(rng).then(|| date_back(rng, 1, 180)),
        witness_count: rng.gen_range(0..=12),
        detail_id: None,
        other_details: (subtype == CriminalSubtype::Other)
            .then(|| "Unclassified offence pending review".to_string()),
    };
    let created_at = repo::insert_case(&mut *tx, &row).await?;

    let mut charges = Vec::new();
    for _ in 0..rng.gen_range(1..=3) {
        let charge = CriminalCharge {
            id: Uuid::new_v4(),
            case_id: id,
            charge_name: pick(rng, CHARGE_NAMES),
        };
        repo::insert_charge(&mut *tx, &charge).await?;
        charges.push(charge);
    }

    let mut evidence_types = Vec::new();
    for _ in 0..rng.gen_range(1..=3) {
        let evidence = CriminalEvidence {
            id: Uuid::new_v4(),
            case_id: id,
            evidence_type: pick(rng, EVIDENCE_TYPES),
        };
        repo::insert_evidence(&mut *tx, &evidence).await?;
        evidence_types.push(evidence);
    }

    let detail = match subtype {
        CriminalSubtype::MurderHomicide => {
            let victim = random_person(&mut *tx, rng).await?;
            Some(CriminalDetail::MurderHomicide(MurderHomicideDetail {
                victim,
                weapon_used: coin(rng).then(|| pick(rng, WEAPONS)),
            }))
        }
        CriminalSubtype::Theft => Some(CriminalDetail::Theft(TheftDetail {
            property_type: coin(rng).then(|| pick(rng, PROPERTY_TYPES)),
            estimated_value: coin(rng).then(|| amount(rng, 5_000.0, 2_000_000.0)),
        })),
        CriminalSubtype::Assault => Some(CriminalDetail::Assault(AssaultDetail {
            injury_severity: coin(rng).then(|| pick(rng, INJURY_SEVERITIES)),
            weapon_used: coin(rng).then(|| pick(rng, WEAPONS)),
        })),
        CriminalSubtype::Fraud => Some(CriminalDetail::Fraud(FraudDetail {
            amount_involved: coin(rng).then(|| amount(rng, 10_000.0, 5_000_000.0)),
            fraud_type: coin(rng).then(|| pick(rng, FRAUD_TYPES)),
        })),
        CriminalSubtype::Other => None,
    };

    let updated_at = match &detail {
        Some(detail) => {
            let detail_id = repo::insert_detail(&mut *tx, detail).await?;
            repo::set_detail_id(&mut *tx, id, Some(detail_id)).await?
        }
        None => created_at,
    };

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(CriminalCase {
        id,
        created_at,
        updated_at,
        subtype,
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
    })
}
