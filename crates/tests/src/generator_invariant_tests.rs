use shared_types::{
    CivilSubtype, ConsumerSubtype, CriminalSubtype, FamilyLawSubtype, IpSubtype, LabourSubtype,
    LegalCase, PropertyLawSubtype, PublicLawSubtype,
};

use crate::common::{rng, test_pool};

/// Generated non-Other cases carry exactly the extension their subtype
/// selects; Other cases carry none. The tagged representation makes a
/// second extension unrepresentable, so tag agreement is the whole check.
#[tokio::test]
async fn generated_cases_satisfy_subtype_exclusivity() {
    let pool = test_pool().await;
    let mut rng = rng(7);

    let cases = store::generator::create_test_dataset(&pool, &mut rng, 32).await;
    assert_eq!(cases.len(), 32);

    for case in &cases {
        match case {
            LegalCase::Criminal(c) => {
                if c.subtype == CriminalSubtype::Other {
                    assert!(c.detail.is_none());
                } else {
                    let detail = c.detail.as_ref().expect("missing criminal extension");
                    assert_eq!(detail.subtype(), c.subtype);
                }
            }
            LegalCase::Civil(c) => {
                if c.subtype == CivilSubtype::Other {
                    assert!(c.detail.is_none());
                } else {
                    let detail = c.detail.as_ref().expect("missing civil extension");
                    assert_eq!(detail.subtype(), c.subtype);
                }
            }
            LegalCase::FamilyLaw(c) => {
                if c.subtype == FamilyLawSubtype::Other {
                    assert!(c.detail.is_none());
                } else {
                    let detail = c.detail.as_ref().expect("missing family extension");
                    assert_eq!(detail.subtype(), c.subtype);
                }
            }
            LegalCase::PropertyLaw(c) => {
                if c.subtype == PropertyLawSubtype::Other {
                    assert!(c.detail.is_none());
                } else {
                    let detail = c.detail.as_ref().expect("missing property extension");
                    assert_eq!(detail.subtype(), c.subtype);
                }
            }
            LegalCase::ConsumerDispute(c) => {
                if c.subtype == ConsumerSubtype::Other {
                    assert!(c.detail.is_none());
                } else {
                    let detail = c.detail.as_ref().expect("missing consumer extension");
                    assert_eq!(detail.subtype(), c.subtype);
                }
            }
            LegalCase::LabourDispute(c) => {
                if c.subtype == LabourSubtype::Other {
                    assert!(c.detail.is_none());
                } else {
                    let detail = c.detail.as_ref().expect("missing labour extension");
                    assert_eq!(detail.subtype(), c.subtype);
                }
            }
            LegalCase::IntellectualProperty(c) => {
                if c.subtype == IpSubtype::Other {
                    assert!(c.detail.is_none());
                } else {
                    let detail = c.detail.as_ref().expect("missing IP extension");
                    assert_eq!(detail.subtype(), c.subtype);
                }
            }
            LegalCase::PublicLaw(c) => {
                if c.subtype == PublicLawSubtype::Other {
                    assert!(c.detail.is_none());
                } else {
                    let detail = c.detail.as_ref().expect("missing public-law extension");
                    assert_eq!(detail.subtype(), c.subtype);
                }
            }
        }
    }
}

/// The stored case_type column always matches the domain table the case
/// lives in, and the stored subtype round-trips through the row struct.
#[tokio::test]
async fn stored_case_type_matches_domain() {
    let pool = test_pool().await;
    let mut rng = rng(13);

    let case = store::generator::generate_criminal_case(&pool, &mut rng)
        .await
        .expect("generation failed");
    let row = store::repo::criminal::find_row(&pool, case.id)
        .await
        .expect("lookup failed")
        .expect("row missing");
    assert_eq!(row.case_type, shared_types::CaseType::Criminal);
    assert_eq!(row.subtype, case.subtype);

    let case = store::generator::generate_public_law_case(&pool, &mut rng)
        .await
        .expect("generation failed");
    let row = store::repo::public_law::find_row(&pool, case.id)
        .await
        .expect("lookup failed")
        .expect("row missing");
    assert_eq!(row.case_type, shared_types::CaseType::PublicLaw);
    assert_eq!(row.subtype, case.subtype);
}

/// Reloading a freshly generated case reproduces the returned assembly,
/// children compared as sets.
#[tokio::test]
async fn load_reproduces_generated_case() {
    let pool = test_pool().await;
    let mut rng = rng(23);

    let case = store::generator::generate_criminal_case_with(
        &pool,
        &mut rng,
        CriminalSubtype::MurderHomicide,
    )
    .await
    .expect("generation failed");

    let loaded = store::repo::criminal::load(&pool, case.id)
        .await
        .expect("load failed")
        .expect("case missing");

    assert_eq!(loaded.detail, case.detail);
    assert_eq!(loaded.fir_number, case.fir_number);

    let mut generated_charges: Vec<String> =
        case.charges.iter().map(|c| c.charge_name.clone()).collect();
    let mut loaded_charges: Vec<String> =
        loaded.charges.iter().map(|c| c.charge_name.clone()).collect();
    generated_charges.sort();
    loaded_charges.sort();
    assert_eq!(generated_charges, loaded_charges);
}
