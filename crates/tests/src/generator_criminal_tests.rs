use shared_types::{CriminalDetail, CriminalSubtype};

use crate::common::{rng, test_pool};

const CHARGE_CANDIDATES: &[&str] = &[
    "Theft",
    "Assault",
    "Fraud",
    "Property Damage",
    "Disorderly Conduct",
];
const EVIDENCE_CANDIDATES: &[&str] = &["Documentary", "Physical", "Digital", "Testimonial"];

#[tokio::test]
async fn theft_case_carries_theft_extension_only() {
    let pool = test_pool().await;
    let mut rng = rng(11);

    let case =
        store::generator::generate_criminal_case_with(&pool, &mut rng, CriminalSubtype::Theft)
            .await
            .expect("generation failed");

    assert_eq!(case.subtype, CriminalSubtype::Theft);
    match &case.detail {
        Some(CriminalDetail::Theft(_)) => {}
        other => panic!("expected theft extension, got {other:?}"),
    }

    // The export shape carries the theft sub-object and no other
    // extension key.
    let value = serde_json::to_value(shared_types::CriminalCaseExport::from(case.clone()))
        .expect("export serialization failed");
    let obj = value.as_object().unwrap();
    assert!(obj.contains_key("theft"));
    for key in ["murder_homicide", "assault", "fraud"] {
        assert!(!obj.contains_key(key), "unexpected extension key {key}");
    }
    assert!(value["theft"].get("property_type").is_some());
    assert!(value["theft"].get("estimated_value").is_some());
}

#[tokio::test]
async fn charges_and_evidence_come_from_fixed_candidate_lists() {
    let pool = test_pool().await;
    let mut rng = rng(17);

    for _ in 0..8 {
        let case = store::generator::generate_criminal_case(&pool, &mut rng)
            .await
            .expect("generation failed");

        let count = case.charges.len();
        assert!((1..=3).contains(&count), "charge count {count} out of range");
        for charge in &case.charges {
            assert!(
                CHARGE_CANDIDATES.contains(&charge.charge_name.as_str()),
                "unexpected charge {}",
                charge.charge_name
            );
            assert!(!charge.charge_name.is_empty());
        }

        let count = case.evidence_types.len();
        assert!(
            (1..=3).contains(&count),
            "evidence count {count} out of range"
        );
        for evidence in &case.evidence_types {
            assert!(EVIDENCE_CANDIDATES.contains(&evidence.evidence_type.as_str()));
        }
    }
}

#[tokio::test]
async fn fir_number_has_expected_shape() {
    let pool = test_pool().await;
    let mut rng = rng(19);

    let case = store::generator::generate_criminal_case(&pool, &mut rng)
        .await
        .expect("generation failed");
    let fir = &case.fir_number;
    assert!(fir.starts_with("FIR-"), "unexpected FIR number {fir}");
    assert!(fir.contains('/'), "unexpected FIR number {fir}");
}

#[tokio::test]
async fn murder_case_persists_victim_as_shared_person() {
    let pool = test_pool().await;
    let mut rng = rng(29);

    let case = store::generator::generate_criminal_case_with(
        &pool,
        &mut rng,
        CriminalSubtype::MurderHomicide,
    )
    .await
    .expect("generation failed");

    let Some(CriminalDetail::MurderHomicide(murder)) = &case.detail else {
        panic!("expected murder/homicide extension");
    };
    let stored = store::repo::person::find_person(&pool, murder.victim.id)
        .await
        .expect("lookup failed")
        .expect("victim not persisted");
    assert_eq!(stored, murder.victim);
}
