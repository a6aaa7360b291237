//! Synthetic case generation for test and demo datasets.
//!
//! Every generator takes an explicit seedable RNG so datasets are
//! reproducible. One case is one transaction: a failure rolls the whole
//! graph back and no partial rows remain.

mod civil;
mod consumer;
mod criminal;
mod family;
mod intellectual_property;
mod labour;
mod property;
mod public_law;

pub use civil::{generate_civil_case, generate_civil_case_with};
pub use consumer::{generate_consumer_dispute_case, generate_consumer_dispute_case_with};
pub use criminal::{generate_criminal_case, generate_criminal_case_with};
pub use family::{generate_family_law_case, generate_family_law_case_with};
pub use intellectual_property::{
    generate_intellectual_property_case, generate_intellectual_property_case_with,
};
pub use labour::{generate_labour_dispute_case, generate_labour_dispute_case_with};
pub use property::{generate_property_law_case, generate_property_law_case_with};
pub use public_law::{generate_public_law_case, generate_public_law_case_with};

use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{AppError, CaseType, ChildDetail, LegalCase, Person, PropertyDetail};
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::repo::person;

pub(crate) const PERSON_NAMES: &[&str] = &[
    "Arjun Mehta",
    "Priya Sharma",
    "Rohan Verma",
    "Ananya Iyer",
    "Vikram Singh",
    "Deepa Nair",
    "Suresh Reddy",
    "Kavita Joshi",
    "Imran Khan",
    "Lakshmi Menon",
];

pub(crate) const STREET_ADDRESSES: &[&str] = &[
    "14 MG Road, Bengaluru",
    "221 Park Street, Kolkata",
    "7 Linking Road, Mumbai",
    "3 Civil Lines, Delhi",
    "55 Anna Salai, Chennai",
    "12 Banjara Hills, Hyderabad",
];

pub(crate) const COMPANY_NAMES: &[&str] = &[
    "Sundaram Textiles Pvt Ltd",
    "Apex Infra Projects",
    "Nimbus Software Services",
    "Gupta & Sons Trading Co",
    "Coastal Agro Exports",
];

/// Coin flip used for every optional scalar field.
pub(crate) fn coin(rng: &mut StdRng) -> bool {
    rng.gen_bool(0.5)
}

/// Uniform pick from a fixed candidate list.
pub(crate) fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values[rng.gen_range(0..values.len())].to_string()
}

/// Monetary amount in [lo, hi) rounded to two decimals.
pub(crate) fn amount(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    (rng.gen_range(lo..hi) * 100.0).round() / 100.0
}

/// A date between `max_days_back` and `min_days_back` days ago.
pub(crate) fn date_back(rng: &mut StdRng, min_days_back: i64, max_days_back: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(rng.gen_range(min_days_back..=max_days_back))
}

/// Insert a random person; contact info is coin-flipped.
pub(crate) async fn random_person(
    conn: &mut SqliteConnection,
    rng: &mut StdRng,
) -> Result<Person, AppError> {
    let name = pick(rng, PERSON_NAMES);
    let contact = if coin(rng) {
        Some(format!("+91-98{:08}", rng.gen_range(0..100_000_000u64)))
    } else {
        None
    };
    person::insert_person(conn, &name, contact.as_deref()).await
}

/// Insert a random property record; both fields are coin-flipped.
pub(crate) async fn random_property(
    conn: &mut SqliteConnection,
    rng: &mut StdRng,
) -> Result<PropertyDetail, AppError> {
    let address = coin(rng).then(|| pick(rng, STREET_ADDRESSES));
    let value = coin(rng).then(|| amount(rng, 500_000.0, 20_000_000.0));
    person::insert_property_detail(conn, address.as_deref(), value).await
}

/// Insert a random minor for custody matters.
pub(crate) async fn random_child(
    conn: &mut SqliteConnection,
    rng: &mut StdRng,
) -> Result<ChildDetail, AppError> {
    person::insert_child_detail(conn, rng.gen_range(1..=17)).await
}

/// Generate one case in a uniformly chosen domain.
pub async fn generate_legal_case(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
) -> Result<LegalCase, AppError> {
    let case_type = CaseType::ALL[rng.gen_range(0..CaseType::ALL.len())];
    match case_type {
        CaseType::Criminal => Ok(LegalCase::Criminal(generate_criminal_case(pool, rng).await?)),
        CaseType::Civil => Ok(LegalCase::Civil(generate_civil_case(pool, rng).await?)),
        CaseType::FamilyLaw => Ok(LegalCase::FamilyLaw(
            generate_family_law_case(pool, rng).await?,
        )),
        CaseType::PropertyLaw => Ok(LegalCase::PropertyLaw(
            generate_property_law_case(pool, rng).await?,
        )),
        CaseType::ConsumerDispute => Ok(LegalCase::ConsumerDispute(
            generate_consumer_dispute_case(pool, rng).await?,
        )),
        CaseType::LabourDispute => Ok(LegalCase::LabourDispute(
            generate_labour_dispute_case(pool, rng).await?,
        )),
        CaseType::IntellectualProperty => Ok(LegalCase::IntellectualProperty(
            generate_intellectual_property_case(pool, rng).await?,
        )),
        CaseType::PublicLaw => Ok(LegalCase::PublicLaw(
            generate_public_law_case(pool, rng).await?,
        )),
    }
}

/// Generate `count` random cases, skipping and logging per-case failures.
///
/// Each case runs on an RNG derived from the batch RNG, so a case that
/// aborts mid-construction cannot shift its siblings' random streams:
/// the same batch seed always visits the same domain/subtype sequence.
pub async fn create_test_dataset(
    pool: &Pool<Sqlite>,
    rng: &mut StdRng,
    count: usize,
) -> Vec<LegalCase> {
    tracing::info!(count, "generating random legal cases");
    let mut cases = Vec::with_capacity(count);

    for i in 0..count {
        let mut case_rng = StdRng::seed_from_u64(rng.gen());
        match generate_legal_case(pool, &mut case_rng).await {
            Ok(case) => {
                tracing::info!(
                    case_type = %case.case_type(),
                    id = %case.id(),
                    "created case {}/{}",
                    i + 1,
                    count
                );
                cases.push(case);
            }
            Err(err) => {
                tracing::warn!(%err, "error creating case {}/{}", i + 1, count);
            }
        }
    }

    tracing::info!(
        generated = cases.len(),
        requested = count,
        "dataset generation finished"
    );
    cases
}
