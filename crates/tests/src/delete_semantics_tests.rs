use shared_types::{CriminalSubtype, PropertyLawDetail, PropertyLawSubtype};

use crate::common::{count_all, count_where, rng, test_pool};

#[tokio::test]
async fn deleting_a_case_cascades_children_but_detaches_extension() {
    let pool = test_pool().await;
    let mut rng = rng(41);

    let case =
        store::generator::generate_criminal_case_with(&pool, &mut rng, CriminalSubtype::Theft)
            .await
            .expect("generation failed");
    let row = store::repo::criminal::find_row(&pool, case.id)
        .await
        .unwrap()
        .unwrap();
    let detail_id = row.detail_id.expect("theft case must carry a detail");

    assert!(store::repo::criminal::delete_case(&pool, case.id)
        .await
        .expect("delete failed"));

    // Children are gone with the case.
    let charges = count_where(
        &pool,
        "SELECT COUNT(*) FROM criminal_charges WHERE case_id = $1",
        case.id,
    )
    .await;
    let evidence = count_where(
        &pool,
        "SELECT COUNT(*) FROM criminal_evidence WHERE case_id = $1",
        case.id,
    )
    .await;
    assert_eq!(charges, 0);
    assert_eq!(evidence, 0);

    // The extension record survives as an orphan.
    let orphaned = count_where(
        &pool,
        "SELECT COUNT(*) FROM criminal_theft_details WHERE id = $1",
        detail_id,
    )
    .await;
    assert_eq!(orphaned, 1);

    assert!(store::repo::criminal::load(&pool, case.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn deleting_an_extension_nulls_the_reference_and_keeps_the_case() {
    let pool = test_pool().await;
    let mut rng = rng(43);

    let case =
        store::generator::generate_criminal_case_with(&pool, &mut rng, CriminalSubtype::Fraud)
            .await
            .expect("generation failed");
    let detail_id = store::repo::criminal::find_row(&pool, case.id)
        .await
        .unwrap()
        .unwrap()
        .detail_id
        .expect("fraud case must carry a detail");

    assert!(store::repo::criminal::delete_detail(&pool, case.id)
        .await
        .expect("detach failed"));

    let row = store::repo::criminal::find_row(&pool, case.id)
        .await
        .unwrap()
        .unwrap();
    assert!(row.detail_id.is_none());
    assert_eq!(row.subtype, CriminalSubtype::Fraud);

    let remaining = count_where(
        &pool,
        "SELECT COUNT(*) FROM criminal_fraud_details WHERE id = $1",
        detail_id,
    )
    .await;
    assert_eq!(remaining, 0);

    // Detaching twice is a no-op.
    assert!(!store::repo::criminal::delete_detail(&pool, case.id)
        .await
        .expect("second detach errored"));
}

#[tokio::test]
async fn shared_entities_survive_case_deletion() {
    let pool = test_pool().await;
    let mut rng = rng(47);

    let case = store::generator::generate_property_law_case_with(
        &pool,
        &mut rng,
        PropertyLawSubtype::PartitionSuit,
    )
    .await
    .expect("generation failed");

    let Some(PropertyLawDetail::PartitionSuit(partition)) = &case.detail else {
        panic!("expected partition extension");
    };
    let co_owner_count = partition.co_owners.len() as i64;
    let property_count = case.properties.len() as i64;
    assert_eq!(count_all(&pool, "persons").await, co_owner_count);
    assert_eq!(count_all(&pool, "property_details").await, property_count);

    assert!(store::repo::property::delete_case(&pool, case.id)
        .await
        .expect("delete failed"));

    // Link rows from the case are gone, the shared records are not.
    let links = count_where(
        &pool,
        "SELECT COUNT(*) FROM property_case_properties WHERE case_id = $1",
        case.id,
    )
    .await;
    assert_eq!(links, 0);
    assert_eq!(count_all(&pool, "persons").await, co_owner_count);
    assert_eq!(count_all(&pool, "property_details").await, property_count);

    // The orphaned partition extension still holds its co-owner links.
    assert_eq!(
        count_all(&pool, "property_partition_co_owners").await,
        co_owner_count
    );
}
