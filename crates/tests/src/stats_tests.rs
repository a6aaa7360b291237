use chrono::Utc;
use pretty_assertions::assert_eq;
use shared_types::{CaseType, CivilCaseRow, CivilSubtype, ConsumerDisputeCaseRow, ConsumerSubtype};
use uuid::Uuid;

use crate::common::{rng, test_pool};

fn civil_row(subtype: CivilSubtype, claim_amount: Option<f64>, settled: bool) -> CivilCaseRow {
    let now = Utc::now();
    CivilCaseRow {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        case_type: CaseType::Civil,
        subtype,
        relief_sought: "Recovery of dues".to_string(),
        claim_amount,
        settlement_attempts: settled,
        detail_id: None,
        other_details: None,
    }
}

fn consumer_row(compensation: Option<f64>) -> ConsumerDisputeCaseRow {
    let now = Utc::now();
    ConsumerDisputeCaseRow {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        case_type: CaseType::ConsumerDispute,
        subtype: ConsumerSubtype::Other,
        product_service_details: "Defective appliance".to_string(),
        purchase_date: None,
        compensation_claimed: compensation,
        detail_id: None,
        other_details: None,
    }
}

#[tokio::test]
async fn civil_average_excludes_null_claims() {
    let pool = test_pool().await;

    {
        let mut conn = pool.acquire().await.expect("no connection");
        for row in [
            civil_row(CivilSubtype::MoneyRecovery, Some(100_000.0), true),
            civil_row(CivilSubtype::MoneyRecovery, Some(200_000.0), false),
            civil_row(CivilSubtype::TortClaim, None, false),
        ] {
            store::repo::civil::insert_case(&mut conn, &row)
                .await
                .expect("insert failed");
        }
    }

    let stats = store::repo::stats::civil_statistics(&pool)
        .await
        .expect("stats query failed");
    assert_eq!(stats.total, 3);
    // The NULL claim is excluded, not treated as zero.
    assert_eq!(stats.avg_claim_amount, Some(150_000.0));
    assert_eq!(stats.settlement_attempted, 1);
    assert_eq!(stats.settlement_not_attempted, 2);
    assert_eq!(stats.by_subtype["MoneyRecovery"], 2);
    assert_eq!(stats.by_subtype["TortClaim"], 1);
}

#[tokio::test]
async fn civil_average_is_none_without_claims() {
    let pool = test_pool().await;

    {
        let mut conn = pool.acquire().await.expect("no connection");
        let row = civil_row(CivilSubtype::Other, None, false);
        store::repo::civil::insert_case(&mut conn, &row)
            .await
            .expect("insert failed");
    }

    let stats = store::repo::stats::civil_statistics(&pool)
        .await
        .expect("stats query failed");
    assert_eq!(stats.avg_claim_amount, None);
}

#[tokio::test]
async fn consumer_compensation_sums_only_stated_claims() {
    let pool = test_pool().await;

    {
        let mut conn = pool.acquire().await.expect("no connection");
        for row in [
            consumer_row(Some(40_000.0)),
            consumer_row(Some(2_500.0)),
            consumer_row(None),
        ] {
            store::repo::consumer::insert_case(&mut conn, &row)
                .await
                .expect("insert failed");
        }
    }

    let stats = store::repo::stats::consumer_statistics(&pool)
        .await
        .expect("stats query failed");
    assert_eq!(stats.total, 3);
    assert_eq!(stats.total_compensation_claimed, Some(42_500.0));
}

#[tokio::test]
async fn criminal_statistics_partition_the_case_set() {
    let pool = test_pool().await;
    let mut rng = rng(73);

    for _ in 0..6 {
        store::generator::generate_criminal_case(&pool, &mut rng)
            .await
            .expect("generation failed");
    }

    let stats = store::repo::stats::criminal_statistics(&pool)
        .await
        .expect("stats query failed");
    assert_eq!(stats.total, 6);
    assert_eq!(stats.chargesheet_filed + stats.chargesheet_pending, 6);

    let by_subtype_total: i64 = stats
        .by_subtype
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_i64().unwrap())
        .sum();
    assert_eq!(by_subtype_total, 6);
}

#[tokio::test]
async fn case_type_distribution_counts_every_domain_table() {
    let pool = test_pool().await;
    let mut rng = rng(79);

    let cases = store::generator::create_test_dataset(&pool, &mut rng, 10).await;
    assert_eq!(cases.len(), 10);

    let distribution = store::repo::stats::case_type_distribution(&pool)
        .await
        .expect("stats query failed");
    assert_eq!(distribution.total, 10);

    let map = distribution.by_case_type.as_object().unwrap();
    assert_eq!(map.len(), CaseType::ALL.len());
    let sum: i64 = map.values().map(|v| v.as_i64().unwrap()).sum();
    assert_eq!(sum, 10);
}

#[tokio::test]
async fn subtype_breakdown_reads_any_domain() {
    let pool = test_pool().await;
    let mut rng = rng(83);

    store::generator::generate_family_law_case(&pool, &mut rng)
        .await
        .expect("generation failed");

    let breakdown = store::repo::stats::subtype_breakdown(&pool, CaseType::FamilyLaw)
        .await
        .expect("stats query failed");
    assert_eq!(breakdown.case_type, CaseType::FamilyLaw);
    assert_eq!(breakdown.total, 1);
    let sum: i64 = breakdown
        .by_subtype
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_i64().unwrap())
        .sum();
    assert_eq!(sum, 1);
}
