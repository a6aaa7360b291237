use shared_types::{
    CivilDetail, CivilSubtype, CriminalSubtype, FamilyDetail, FamilyLawSubtype, LabourDetail,
    LabourSubtype, PropertyLawDetail, PropertyLawSubtype, PublicLawDetail, PublicLawSubtype,
};

use crate::common::{rng, test_pool};

// Documented child-collection bounds, exercised per subtype over a
// handful of seeds each.

#[tokio::test]
async fn divorce_grounds_stay_in_bounds() {
    let pool = test_pool().await;
    for seed in 0..6 {
        let mut rng = rng(seed);
        let case = store::generator::generate_family_law_case_with(
            &pool,
            &mut rng,
            FamilyLawSubtype::Divorce,
        )
        .await
        .expect("generation failed");
        let Some(FamilyDetail::Divorce(divorce)) = &case.detail else {
            panic!("expected divorce extension");
        };
        assert!((1..=2).contains(&divorce.grounds.len()));
        for ground in &divorce.grounds {
            assert!(["Cruelty", "Desertion", "Adultery", "Mutual Consent"]
                .contains(&ground.as_str()));
        }
    }
}

#[tokio::test]
async fn custody_children_stay_in_bounds() {
    let pool = test_pool().await;
    for seed in 0..6 {
        let mut rng = rng(seed);
        let case = store::generator::generate_family_law_case_with(
            &pool,
            &mut rng,
            FamilyLawSubtype::ChildCustody,
        )
        .await
        .expect("generation failed");
        let Some(FamilyDetail::ChildCustody(custody)) = &case.detail else {
            panic!("expected custody extension");
        };
        assert!((1..=4).contains(&custody.children.len()));
        for child in &custody.children {
            assert!((1..=17).contains(&child.age));
        }
    }
}

#[tokio::test]
async fn violence_types_stay_in_bounds() {
    let pool = test_pool().await;
    for seed in 0..6 {
        let mut rng = rng(seed);
        let case = store::generator::generate_family_law_case_with(
            &pool,
            &mut rng,
            FamilyLawSubtype::DomesticViolence,
        )
        .await
        .expect("generation failed");
        let Some(FamilyDetail::DomesticViolence(dv)) = &case.detail else {
            panic!("expected domestic-violence extension");
        };
        assert!((1..=3).contains(&dv.violence_types.len()));
    }
}

#[tokio::test]
async fn partition_co_owners_stay_in_bounds() {
    let pool = test_pool().await;
    for seed in 0..6 {
        let mut rng = rng(seed);
        let case = store::generator::generate_property_law_case_with(
            &pool,
            &mut rng,
            PropertyLawSubtype::PartitionSuit,
        )
        .await
        .expect("generation failed");
        assert!((1..=3).contains(&case.properties.len()));
        let Some(PropertyLawDetail::PartitionSuit(partition)) = &case.detail else {
            panic!("expected partition extension");
        };
        assert!((2..=5).contains(&partition.co_owners.len()));
    }
}

#[tokio::test]
async fn dispute_properties_stay_in_bounds() {
    let pool = test_pool().await;
    for seed in 0..6 {
        let mut rng = rng(seed);
        let case = store::generator::generate_civil_case_with(
            &pool,
            &mut rng,
            CivilSubtype::PropertyDispute,
        )
        .await
        .expect("generation failed");
        let Some(CivilDetail::PropertyDispute(dispute)) = &case.detail else {
            panic!("expected property-dispute extension");
        };
        assert!((1..=3).contains(&dispute.properties.len()));
    }
}

#[tokio::test]
async fn discrimination_grounds_stay_in_bounds() {
    let pool = test_pool().await;
    for seed in 0..6 {
        let mut rng = rng(seed);
        let case = store::generator::generate_labour_dispute_case_with(
            &pool,
            &mut rng,
            LabourSubtype::WorkplaceDiscrimination,
        )
        .await
        .expect("generation failed");
        let Some(LabourDetail::WorkplaceDiscrimination(discrimination)) = &case.detail else {
            panic!("expected discrimination extension");
        };
        assert!((1..=2).contains(&discrimination.grounds.len()));
        for ground in &discrimination.grounds {
            assert!(["Gender", "Caste", "Religion", "Disability"].contains(&ground.as_str()));
        }
    }
}

#[tokio::test]
async fn fundamental_rights_stay_in_bounds() {
    let pool = test_pool().await;
    for seed in 0..6 {
        let mut rng = rng(seed);
        let case = store::generator::generate_public_law_case_with(
            &pool,
            &mut rng,
            PublicLawSubtype::Constitutional,
        )
        .await
        .expect("generation failed");
        let Some(PublicLawDetail::Constitutional(constitutional)) = &case.detail else {
            panic!("expected constitutional extension");
        };
        assert!((1..=2).contains(&constitutional.fundamental_rights.len()));
        for right in &constitutional.fundamental_rights {
            assert!(
                ["Equality", "Freedom of Speech", "Life and Liberty"].contains(&right.as_str())
            );
        }
    }
}

#[tokio::test]
async fn other_subtype_cases_have_no_detail_rows() {
    let pool = test_pool().await;
    let mut rng = rng(31);

    let case =
        store::generator::generate_criminal_case_with(&pool, &mut rng, CriminalSubtype::Other)
            .await
            .expect("generation failed");
    assert!(case.detail.is_none());

    let row = store::repo::criminal::find_row(&pool, case.id)
        .await
        .expect("lookup failed")
        .expect("row missing");
    assert!(row.detail_id.is_none());
}
