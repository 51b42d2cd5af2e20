mod common;

use common::{filled_case_report, memory_store};
use spasi_core::{
    CaseFilter, CaseRepository, CaseRow, CaseStatus, Disease, FormKind, InMemoryRemoteStore,
    RemoteStore, StaticAuth, SyncEngine, case_report_sections,
};
use std::sync::Arc;

#[tokio::test]
async fn a_submission_shadows_the_same_patients_draft() {
    let store = memory_store();
    let engine = SyncEngine::builder(Arc::clone(&store)).build();
    let values = filled_case_report("Siti Rahayu");

    let draft = engine
        .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
        .await
        .unwrap();
    let submitted = engine
        .submit(&values, Disease::CampakRubela, FormKind::Mr01, None, &case_report_sections())
        .await
        .unwrap();

    let repository = CaseRepository::new(store);
    let filter = CaseFilter::for_form(Disease::CampakRubela, FormKind::Mr01);
    let listed = repository.list_cases(&filter).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, submitted.id);
    assert_ne!(listed[0].id, draft.id);
    assert_eq!(listed[0].status, CaseStatus::Submitted);
    assert_eq!(listed[0].patient_name.as_deref(), Some("Siti Rahayu"));
}

#[tokio::test]
async fn draft_only_patients_are_invisible_to_reporting() {
    let store = memory_store();
    let engine = SyncEngine::builder(Arc::clone(&store)).build();

    engine
        .save_draft(
            &filled_case_report("Budi Santoso"),
            Disease::CampakRubela,
            FormKind::Mr01,
            None,
        )
        .await
        .unwrap();

    let repository = CaseRepository::new(store);
    let filter = CaseFilter::for_form(Disease::CampakRubela, FormKind::Mr01);
    assert!(repository.list_cases(&filter).unwrap().is_empty());
    assert!(repository.weekly_report(&filter).unwrap().weeks.is_empty());
}

#[tokio::test]
async fn listing_filters_by_disease_and_form() {
    let store = memory_store();
    let engine = SyncEngine::builder(Arc::clone(&store)).build();
    let sections = case_report_sections();

    engine
        .submit(
            &filled_case_report("Siti Rahayu"),
            Disease::CampakRubela,
            FormKind::Mr01,
            None,
            &sections,
        )
        .await
        .unwrap();
    engine
        .submit(
            &filled_case_report("Budi Santoso"),
            Disease::Difteri,
            FormKind::Mr01,
            None,
            &sections,
        )
        .await
        .unwrap();

    let repository = CaseRepository::new(store);
    let campak = repository
        .list_cases(&CaseFilter::for_form(Disease::CampakRubela, FormKind::Mr01))
        .unwrap();
    assert_eq!(campak.len(), 1);
    assert_eq!(campak[0].patient_name.as_deref(), Some("Siti Rahayu"));

    let everything = repository.list_cases(&CaseFilter::default()).unwrap();
    assert_eq!(everything.len(), 2);
}

#[tokio::test]
async fn weekly_report_counts_per_week_and_disease() {
    let store = memory_store();
    let engine = SyncEngine::builder(Arc::clone(&store)).build();
    let sections = case_report_sections();

    engine
        .submit(
            &filled_case_report("Siti Rahayu"),
            Disease::CampakRubela,
            FormKind::Mr01,
            None,
            &sections,
        )
        .await
        .unwrap();
    engine
        .submit(
            &filled_case_report("Budi Santoso"),
            Disease::Difteri,
            FormKind::Mr01,
            None,
            &sections,
        )
        .await
        .unwrap();

    let repository = CaseRepository::new(store);
    let report = repository.weekly_report(&CaseFilter::default()).unwrap();

    // Both submissions happened just now, so they land in the same week.
    assert_eq!(report.weeks.len(), 1);
    let week = &report.weeks[0];
    assert_eq!(week.total, 2);
    assert_eq!(week.by_disease.get(&Disease::CampakRubela), Some(&1));
    assert_eq!(week.by_disease.get(&Disease::Difteri), Some(&1));
}

#[tokio::test]
async fn merged_listing_includes_remote_only_cases() {
    let store = memory_store();
    let remote = Arc::new(InMemoryRemoteStore::new());
    remote
        .create(CaseRow {
            disease: Some(Disease::CampakRubela),
            form: Some(FormKind::Mr01),
            status: Some(CaseStatus::Submitted),
            user_id: Some("user_1".to_string()),
            pasien_nama: Some("Citra Dewi".to_string()),
            pending_sync: Some(false),
            ..CaseRow::default()
        })
        .await
        .unwrap();

    let repository = CaseRepository::new(store)
        .with_remote(remote.clone())
        .with_auth(Arc::new(StaticAuth::signed_in("user_1")));
    let filter = CaseFilter::for_form(Disease::CampakRubela, FormKind::Mr01);

    let merged = repository.list_cases_merged(&filter).await.unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].patient_name.as_deref(), Some("Citra Dewi"));

    // The week convention is shared with the local-only view.
    let report = repository.weekly_report_merged(&filter).await.unwrap();
    assert_eq!(report.weeks.len(), 1);
    assert_eq!(report.weeks[0].total, 1);

    // Local-only listing knows nothing about the remote case.
    assert!(repository.list_cases(&filter).unwrap().is_empty());
}

#[tokio::test]
async fn merged_listing_degrades_when_the_remote_is_down() {
    let store = memory_store();
    let engine = SyncEngine::builder(Arc::clone(&store)).build();
    engine
        .submit(
            &filled_case_report("Siti Rahayu"),
            Disease::CampakRubela,
            FormKind::Mr01,
            None,
            &case_report_sections(),
        )
        .await
        .unwrap();

    let remote = Arc::new(InMemoryRemoteStore::new());
    remote.set_offline(true);
    let repository = CaseRepository::new(store)
        .with_remote(remote)
        .with_auth(Arc::new(StaticAuth::signed_in("user_1")));

    let filter = CaseFilter::for_form(Disease::CampakRubela, FormKind::Mr01);
    let listed = repository.list_cases_merged(&filter).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].patient_name.as_deref(), Some("Siti Rahayu"));
}

#[tokio::test]
async fn deleting_a_case_removes_it_from_listings() {
    let store = memory_store();
    let engine = SyncEngine::builder(Arc::clone(&store)).build();
    let submitted = engine
        .submit(
            &filled_case_report("Siti Rahayu"),
            Disease::CampakRubela,
            FormKind::Mr01,
            None,
            &case_report_sections(),
        )
        .await
        .unwrap();

    let repository = CaseRepository::new(store);
    repository.delete_case(&submitted.id).unwrap();
    assert!(repository.get_case(&submitted.id).unwrap().is_none());
    let filter = CaseFilter::for_form(Disease::CampakRubela, FormKind::Mr01);
    assert!(repository.list_cases(&filter).unwrap().is_empty());
}
