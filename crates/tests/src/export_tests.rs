use shared_types::{CriminalDetail, CriminalSubtype, LegalCase};

use crate::common::{rng, test_pool};

#[tokio::test]
async fn export_reproduces_extension_after_reload() {
    let pool = test_pool().await;
    let mut rng = rng(53);

    let case =
        store::generator::generate_criminal_case_with(&pool, &mut rng, CriminalSubtype::Theft)
            .await
            .expect("generation failed");
    let loaded = store::repo::criminal::load(&pool, case.id)
        .await
        .unwrap()
        .expect("case missing");

    let exported = serde_json::to_value(store::export::export_case(&LegalCase::Criminal(
        case.clone(),
    )))
    .unwrap();
    let reloaded = serde_json::to_value(store::export::export_case(&LegalCase::Criminal(loaded)))
        .unwrap();

    // The extension sub-object survives the storage round trip untouched.
    assert_eq!(exported["theft"], reloaded["theft"]);
    let Some(CriminalDetail::Theft(theft)) = &case.detail else {
        panic!("expected theft extension");
    };
    assert_eq!(
        exported["theft"]["property_type"],
        serde_json::json!(theft.property_type)
    );
    assert_eq!(
        exported["theft"]["estimated_value"],
        serde_json::json!(theft.estimated_value)
    );

    // Children are unordered; compare as sets.
    let mut exported_charges: Vec<String> = exported["charges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    let mut reloaded_charges: Vec<String> = reloaded["charges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    exported_charges.sort();
    reloaded_charges.sort();
    assert_eq!(exported_charges, reloaded_charges);
}

#[tokio::test]
async fn unset_optionals_export_as_explicit_nulls() {
    let pool = test_pool().await;

    // Seeds are cheap; find a generated case with an unset arrest date so
    // the null marker is observable.
    for seed in 0..32 {
        let mut rng = rng(seed);
        let case = store::generator::generate_criminal_case(&pool, &mut rng)
            .await
            .expect("generation failed");
        if case.arrest_date.is_some() {
            continue;
        }
        let value =
            serde_json::to_value(store::export::export_case(&LegalCase::Criminal(case))).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("arrest_date"));
        assert_eq!(value["arrest_date"], serde_json::Value::Null);
        return;
    }
    panic!("no case with unset arrest date in 32 seeds");
}

#[tokio::test]
async fn batch_export_writes_one_object_per_case() {
    let pool = test_pool().await;
    let mut rng = rng(59);

    let cases = store::generator::create_test_dataset(&pool, &mut rng, 6).await;
    let mut buffer = Vec::new();
    store::export::write_json(&cases, &mut buffer).expect("export failed");

    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("invalid JSON");
    let array = value.as_array().expect("expected a JSON array");
    assert_eq!(array.len(), cases.len());

    for (case, object) in cases.iter().zip(array) {
        assert_eq!(object["case_type"], case.case_type().as_str());
        assert_eq!(object["id"], case.id().to_string());
        // Timestamps render as RFC 3339 text.
        assert!(object["created_at"].as_str().unwrap().contains('T'));
    }
}

#[tokio::test]
async fn other_subtype_exports_without_extension_key() {
    let pool = test_pool().await;
    let mut rng = rng(61);

    let case =
        store::generator::generate_civil_case_with(&pool, &mut rng, shared_types::CivilSubtype::Other)
            .await
            .expect("generation failed");
    let value =
        serde_json::to_value(store::export::export_case(&LegalCase::Civil(case))).unwrap();
    let obj = value.as_object().unwrap();
    for key in ["contract_dispute", "property_dispute", "money_recovery", "tort_claim"] {
        assert!(!obj.contains_key(key), "unexpected extension key {key}");
    }
    assert_eq!(value["subtype"], "Other");
}
