mod common;

use async_trait::async_trait;
use common::{filled_case_report, memory_store};
use spasi_core::{
    CaseRow, CaseStatus, Disease, FormKind, InMemoryRemoteStore, RemoteError, RemoteResult,
    RemoteStore, SpasiError, StaticAuth, SyncDisposition, SyncEngine, case_report_sections,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn engine_with_remote(remote: Arc<dyn RemoteStore>) -> SyncEngine {
    SyncEngine::builder(memory_store())
        .with_remote(remote)
        .with_auth(Arc::new(StaticAuth::signed_in("user_1")))
        .build()
}

#[tokio::test]
async fn offline_submit_still_persists_locally() {
    let remote = Arc::new(InMemoryRemoteStore::new());
    remote.set_offline(true);
    let engine = engine_with_remote(remote.clone());

    let values = filled_case_report("Siti Rahayu");
    let outcome = engine
        .submit(&values, Disease::CampakRubela, FormKind::Mr01, None, &case_report_sections())
        .await
        .unwrap();

    assert!(outcome.disposition.is_pending());
    let record = engine.store().get_case(&outcome.id).unwrap().unwrap();
    assert_eq!(record.status, CaseStatus::Submitted);
    assert!(record.pending_sync);
    assert!(record.submitted_at.is_some());
    assert_eq!(remote.len().await, 0);
}

#[tokio::test]
async fn remote_create_adopts_the_authoritative_id() {
    let remote = Arc::new(InMemoryRemoteStore::new());
    let engine = engine_with_remote(remote.clone());

    let values = filled_case_report("Siti Rahayu");
    let outcome = engine
        .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
        .await
        .unwrap();

    assert!(outcome.disposition.is_synced());
    assert!(outcome.id.starts_with("case_"), "got {}", outcome.id);

    // Exactly one local record, under the remote id, fully synced.
    let summaries = engine.store().list_summaries().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, outcome.id);
    assert!(!summaries[0].pending_sync);
    assert_eq!(remote.len().await, 1);
}

#[tokio::test]
async fn resaving_the_same_id_is_idempotent() {
    let engine = SyncEngine::builder(memory_store()).build();
    let values = filled_case_report("Siti Rahayu");

    let first = engine
        .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
        .await
        .unwrap();
    assert_eq!(first.disposition, SyncDisposition::LocalOnly);

    let second = engine
        .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, Some(&first.id))
        .await
        .unwrap();
    assert_eq!(second.id, first.id);

    let record = engine.store().get_case(&first.id).unwrap().unwrap();
    assert_eq!(record.values, values);
    assert!(!record.pending_sync);
    assert_eq!(engine.store().list_summaries().unwrap().len(), 1);
}

#[tokio::test]
async fn submitting_a_synced_draft_updates_in_place() {
    let remote = Arc::new(InMemoryRemoteStore::new());
    let engine = engine_with_remote(remote.clone());
    let values = filled_case_report("Siti Rahayu");

    let draft = engine
        .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
        .await
        .unwrap();
    let submitted = engine
        .submit(
            &values,
            Disease::CampakRubela,
            FormKind::Mr01,
            Some(&draft.id),
            &case_report_sections(),
        )
        .await
        .unwrap();

    assert!(submitted.disposition.is_synced());
    assert_eq!(submitted.id, draft.id);
    assert_eq!(remote.len().await, 1);
    let row = remote.get(&draft.id).await.unwrap().unwrap();
    assert_eq!(row.status, Some(CaseStatus::Submitted));
    let record = engine.store().get_case(&draft.id).unwrap().unwrap();
    assert_eq!(record.status, CaseStatus::Submitted);
}

#[tokio::test]
async fn invalid_submission_aborts_before_any_write() {
    let engine = SyncEngine::builder(memory_store()).build();
    let mut values = filled_case_report("Siti Rahayu");
    values.set("Nama_kasus", "");
    values.set("Keadaan_saat_ini", "");

    let err = engine
        .submit(&values, Disease::CampakRubela, FormKind::Mr01, None, &case_report_sections())
        .await
        .unwrap_err();

    match err {
        SpasiError::Validation { errors, sections } => {
            assert!(errors.contains("Nama_kasus"));
            assert_eq!(sections, ["INFO KASUS", "INFO KONDISI AKHIR"]);
        }
        other => panic!("expected a validation error, got {other}"),
    }
    assert!(engine.store().list_summaries().unwrap().is_empty());
}

#[tokio::test]
async fn local_only_saves_are_terminal_successes() {
    let engine = SyncEngine::builder(memory_store()).build();
    let values = filled_case_report("Siti Rahayu");
    let outcome = engine
        .save_draft(&values, Disease::Difteri, FormKind::Mr01, None)
        .await
        .unwrap();
    assert_eq!(outcome.disposition, SyncDisposition::LocalOnly);
    let record = engine.store().get_case(&outcome.id).unwrap().unwrap();
    assert!(!record.pending_sync);
}

#[test]
fn generated_ids_never_collide() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(SyncEngine::generate_case_id(CaseStatus::Draft)));
    }
    assert_eq!(seen.len(), 10_000);
}

/// Remote double whose calls take long enough to observe an in-flight save.
struct SlowRemote {
    delay: Duration,
    inner: InMemoryRemoteStore,
}

#[async_trait]
impl RemoteStore for SlowRemote {
    async fn create(&self, row: CaseRow) -> RemoteResult<CaseRow> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(row).await
    }

    async fn update(&self, id: &str, row: CaseRow) -> RemoteResult<CaseRow> {
        tokio::time::sleep(self.delay).await;
        self.inner.update(id, row).await
    }

    async fn get(&self, id: &str) -> RemoteResult<Option<CaseRow>> {
        self.inner.get(id).await
    }

    async fn list_by_owner(&self, owner_user_id: &str) -> RemoteResult<Vec<CaseRow>> {
        self.inner.list_by_owner(owner_user_id).await
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn autosave_tick_skips_while_a_save_is_in_flight() {
    let remote = Arc::new(SlowRemote {
        delay: Duration::from_millis(300),
        inner: InMemoryRemoteStore::new(),
    });
    let engine = Arc::new(engine_with_remote(remote));
    let values = filled_case_report("Siti Rahayu");

    let explicit = {
        let engine = Arc::clone(&engine);
        let values = values.clone();
        tokio::spawn(async move {
            engine
                .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
                .await
        })
    };

    // Give the explicit save time to take the gate and park in the remote call.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let skipped = engine
        .try_save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
        .await
        .unwrap();
    assert!(skipped.is_none(), "tick must skip, not queue");

    let outcome = explicit.await.unwrap().unwrap();
    assert!(outcome.disposition.is_synced());

    // With the gate free again the tick goes through.
    let saved = engine
        .try_save_draft(&values, Disease::CampakRubela, FormKind::Mr01, Some(&outcome.id))
        .await
        .unwrap();
    assert!(saved.is_some());
}

#[tokio::test(start_paused = true)]
async fn autosave_persists_a_dirty_session() {
    use spasi_core::{FormSession, spawn_autosave};
    use tokio::sync::RwLock;

    let store = memory_store();
    let engine = Arc::new(SyncEngine::builder(Arc::clone(&store)).build());
    let session = Arc::new(RwLock::new(FormSession::new(
        Disease::CampakRubela,
        FormKind::Mr01,
    )));
    session
        .write()
        .await
        .set_value("Nama_kasus", "Siti Rahayu")
        .unwrap();

    let handle = spawn_autosave(
        Arc::clone(&session),
        Arc::clone(&engine),
        Duration::from_secs(30),
    );
    tokio::time::sleep(Duration::from_secs(31)).await;
    handle.abort();

    let session = session.read().await;
    let case_id = session.case_id().expect("autosave assigned a case id");
    assert!(session.last_saved().is_some());
    let record = store.get_case(case_id).unwrap().unwrap();
    assert_eq!(record.status, CaseStatus::Draft);
    assert_eq!(record.values.text("Nama_kasus"), Some("Siti Rahayu"));
}

#[tokio::test]
async fn remote_timeout_degrades_to_pending() {
    let remote = Arc::new(SlowRemote {
        delay: Duration::from_millis(500),
        inner: InMemoryRemoteStore::new(),
    });
    let engine = SyncEngine::builder(memory_store())
        .with_remote(remote)
        .with_remote_timeout(Duration::from_millis(50))
        .build();

    let values = filled_case_report("Siti Rahayu");
    let outcome = engine
        .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
        .await
        .unwrap();
    assert!(matches!(
        outcome.disposition,
        SyncDisposition::Pending(RemoteError::Timeout(_))
    ));
    let record = engine.store().get_case(&outcome.id).unwrap().unwrap();
    assert!(record.pending_sync);
}

#[tokio::test]
async fn load_values_prefers_the_remote_copy() {
    let remote = Arc::new(InMemoryRemoteStore::new());
    let engine = engine_with_remote(remote.clone());
    let values = filled_case_report("Siti Rahayu");

    let outcome = engine
        .save_draft(&values, Disease::CampakRubela, FormKind::Mr01, None)
        .await
        .unwrap();

    let loaded = engine.load_values(&outcome.id).await.unwrap();
    assert_eq!(loaded.text("pasien_nama"), Some("Siti Rahayu"));

    // Remote unreachable: the local cache still answers.
    remote.set_offline(true);
    let loaded = engine.load_values(&outcome.id).await.unwrap();
    assert_eq!(
        spasi_core::patient_name(&loaded).as_deref(),
        Some("Siti Rahayu")
    );
}
