use shared_types::{CriminalSubtype, LegalCase};

use crate::common::{count_all, rng, test_pool};

#[tokio::test]
async fn clean_batch_returns_every_requested_case() {
    let pool = test_pool().await;
    let mut rng = rng(67);

    let cases = store::generator::create_test_dataset(&pool, &mut rng, 12).await;
    assert_eq!(cases.len(), 12);
}

/// A single failing case is logged and skipped; its siblings are
/// unaffected. The batch generator derives one RNG per case from the
/// batch seed, so the same seed visits the same domain sequence whether
/// or not a case fails, which makes the expected count exact.
#[tokio::test]
async fn batch_skips_failing_cases_and_keeps_the_rest() {
    const SEED: u64 = 99;
    const COUNT: usize = 24;

    // Calibration run: how many criminal cases does this seed produce?
    let pool = test_pool().await;
    let mut batch_rng = rng(SEED);
    let cases = store::generator::create_test_dataset(&pool, &mut batch_rng, COUNT).await;
    assert_eq!(cases.len(), COUNT);
    let criminal_cases = cases
        .iter()
        .filter(|c| matches!(c, LegalCase::Criminal(_)))
        .count();

    // Sabotaged run on a fresh database: every criminal insert aborts.
    let pool = test_pool().await;
    sqlx::query(
        "CREATE TRIGGER block_criminal_inserts \
         BEFORE INSERT ON criminal_cases \
         BEGIN SELECT RAISE(ABORT, 'criminal inserts disabled'); END",
    )
    .execute(&pool)
    .await
    .expect("trigger creation failed");

    let mut batch_rng = rng(SEED);
    let survivors = store::generator::create_test_dataset(&pool, &mut batch_rng, COUNT).await;

    assert_eq!(survivors.len(), COUNT - criminal_cases);
    assert!(survivors
        .iter()
        .all(|c| !matches!(c, LegalCase::Criminal(_))));
    assert_eq!(count_all(&pool, "criminal_cases").await, 0);
}

/// A failure mid-graph rolls the whole case back; no partial rows remain.
#[tokio::test]
async fn failed_case_leaves_no_partial_rows() {
    let pool = test_pool().await;

    // Base insert succeeds, the first charge insert aborts.
    sqlx::query(
        "CREATE TRIGGER block_charge_inserts \
         BEFORE INSERT ON criminal_charges \
         BEGIN SELECT RAISE(ABORT, 'charge inserts disabled'); END",
    )
    .execute(&pool)
    .await
    .expect("trigger creation failed");

    let mut rng = rng(71);
    let result =
        store::generator::generate_criminal_case_with(&pool, &mut rng, CriminalSubtype::Theft)
            .await;
    assert!(result.is_err());

    assert_eq!(count_all(&pool, "criminal_cases").await, 0);
    assert_eq!(count_all(&pool, "criminal_charges").await, 0);
    assert_eq!(count_all(&pool, "criminal_evidence").await, 0);
    assert_eq!(count_all(&pool, "criminal_theft_details").await, 0);
}
