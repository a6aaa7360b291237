use chrono::Utc;
use shared_types::{
    AppErrorKind, AssaultDetail, CaseType, CriminalCaseRow, CriminalDetail, CriminalSubtype,
    InvestigationStatus, TheftDetail,
};
use uuid::Uuid;

use crate::common::test_pool;

/// Bare theft case with no extension attached, inserted through the repo.
async fn bare_theft_case(pool: &sqlx::Pool<sqlx::Sqlite>) -> Uuid {
    let now = Utc::now();
    let row = CriminalCaseRow {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        case_type: CaseType::Criminal,
        subtype: CriminalSubtype::Theft,
        fir_number: "FIR-4242/2026".to_string(),
        police_station: None,
        arrest_date: None,
        bail_status: None,
        investigation_status: InvestigationStatus::Ongoing,
        chargesheet_filed: false,
        chargesheet_date: None,
        witness_count: 0,
        detail_id: None,
        other_details: None,
    };
    {
        let mut conn = pool.acquire().await.expect("no connection");
        store::repo::criminal::insert_case(&mut conn, &row)
            .await
            .expect("insert failed");
    }
    row.id
}

#[tokio::test]
async fn attach_rejects_mismatched_subtype() {
    let pool = test_pool().await;
    let case_id = bare_theft_case(&pool).await;

    let detail = CriminalDetail::Assault(AssaultDetail {
        injury_severity: Some("Minor".to_string()),
        weapon_used: None,
    });
    let err = store::repo::criminal::attach_detail(&pool, case_id, &detail)
        .await
        .expect_err("mismatched attach must fail");
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("subtype"));

    // Nothing was attached.
    let row = store::repo::criminal::find_row(&pool, case_id)
        .await
        .unwrap()
        .unwrap();
    assert!(row.detail_id.is_none());
}

#[tokio::test]
async fn attach_then_detach_round_trips() {
    let pool = test_pool().await;
    let case_id = bare_theft_case(&pool).await;

    let detail = CriminalDetail::Theft(TheftDetail {
        property_type: Some("Vehicle".to_string()),
        estimated_value: Some(250_000.0),
    });
    store::repo::criminal::attach_detail(&pool, case_id, &detail)
        .await
        .expect("attach failed");

    let loaded = store::repo::criminal::load(&pool, case_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.detail.as_ref(), Some(&detail));

    // A second attach is a conflict while one is present.
    let err = store::repo::criminal::attach_detail(&pool, case_id, &detail)
        .await
        .expect_err("double attach must fail");
    assert_eq!(err.kind, AppErrorKind::Conflict);

    // Detach clears the reference but keeps the case.
    assert!(store::repo::criminal::delete_detail(&pool, case_id)
        .await
        .expect("detach failed"));
    let loaded = store::repo::criminal::load(&pool, case_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.subtype, CriminalSubtype::Theft);
    assert!(loaded.detail.is_none());

    // And a fresh attach is possible again.
    store::repo::criminal::attach_detail(&pool, case_id, &detail)
        .await
        .expect("re-attach failed");
}

#[tokio::test]
async fn storage_rejects_other_subtype_with_detail_reference() {
    let pool = test_pool().await;
    let now = Utc::now();
    let row = CriminalCaseRow {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        case_type: CaseType::Criminal,
        subtype: CriminalSubtype::Other,
        fir_number: "FIR-1111/2026".to_string(),
        police_station: None,
        arrest_date: None,
        bail_status: None,
        investigation_status: InvestigationStatus::Closed,
        chargesheet_filed: false,
        chargesheet_date: None,
        witness_count: 0,
        detail_id: Some(Uuid::new_v4()),
        other_details: None,
    };

    let mut conn = pool.acquire().await.expect("no connection");
    let err = store::repo::criminal::insert_case(&mut conn, &row)
        .await
        .expect_err("CHECK constraint must reject the row");
    assert_eq!(err.kind, AppErrorKind::ValidationError);
}
