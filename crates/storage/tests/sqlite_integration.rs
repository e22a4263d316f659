use chrono::Duration;
use storage::repository::{SessionRepository, StorageError};
use storage::sqlite::SqliteRepository;
use storybook_core::model::{LetterForm, ModuleId, SessionId, SessionRecord};
use storybook_core::time::fixed_now;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_persists_progress_and_letter() {
    let repo = connect("memdb_roundtrip").await;

    let mut record = SessionRecord::new(SessionId::new(), fixed_now());
    record.state.progress_mut().complete(ModuleId::Elf);
    record.state.progress_mut().complete(ModuleId::Reindeer);
    record.state.letter = Some(
        LetterForm {
            name: Some("Alex".into()),
            feeling: Some("happy".into()),
            wish: Some("a bike".into()),
            memory: Some("sledding".into()),
            ..LetterForm::default()
        }
        .validate()
        .unwrap(),
    );
    repo.upsert_session(&record).await.unwrap();

    let fetched = repo
        .get_session(record.id())
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(fetched, record);
    let progress = fetched.state.progress.unwrap();
    assert_eq!(progress.percent(), 50);
    assert!(fetched.state.letter.unwrap().submitted);
}

#[tokio::test]
async fn sqlite_upsert_overwrites_state_but_keeps_created_at() {
    let repo = connect("memdb_upsert").await;

    let mut record = SessionRecord::new(SessionId::new(), fixed_now());
    repo.upsert_session(&record).await.unwrap();

    record.state.progress_mut().complete(ModuleId::Elf);
    record.touch(fixed_now() + Duration::minutes(10));
    repo.upsert_session(&record).await.unwrap();

    let fetched = repo.get_session(record.id()).await.unwrap().unwrap();
    assert_eq!(fetched.created_at(), fixed_now());
    assert_eq!(fetched.updated_at(), fixed_now() + Duration::minutes(10));
    assert!(fetched.state.progress.unwrap().is_completed(ModuleId::Elf));
}

#[tokio::test]
async fn sqlite_deletes_sessions_and_purges_idle_ones() {
    let repo = connect("memdb_purge").await;

    let stale = SessionRecord::new(SessionId::new(), fixed_now());
    let mut active = SessionRecord::new(SessionId::new(), fixed_now());
    active.touch(fixed_now() + Duration::hours(4));
    let doomed = SessionRecord::new(SessionId::new(), fixed_now());
    for record in [&stale, &active, &doomed] {
        repo.upsert_session(record).await.unwrap();
    }

    repo.delete_session(doomed.id()).await.unwrap();
    assert!(matches!(
        repo.delete_session(doomed.id()).await,
        Err(StorageError::NotFound)
    ));

    let removed = repo
        .delete_idle_sessions(fixed_now() + Duration::hours(2))
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert!(repo.get_session(stale.id()).await.unwrap().is_none());
    assert!(repo.get_session(active.id()).await.unwrap().is_some());
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    assert!(repo.get_session(SessionId::new()).await.unwrap().is_none());
}
