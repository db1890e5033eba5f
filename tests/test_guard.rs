use std::collections::HashSet;

use async_trait::async_trait;
use lecturer_assess_be::{
    errors::AppError,
    guard::{
        FilePreferenceStore, GuardDecision, MemoryPreferenceStore, PreferenceStore,
        RedisPreferenceStore, SubmissionGuard,
    },
    models::redis::RedisKey,
};
use uuid::Uuid;

/// Store whose reads and/or writes always fail.
struct BrokenStore {
    fail_reads: bool,
    fail_writes: bool,
    inner: MemoryPreferenceStore,
}

#[async_trait]
impl PreferenceStore for BrokenStore {
    async fn rated_modules(&self) -> Result<HashSet<Uuid>, AppError> {
        if self.fail_reads {
            return Err(AppError::Io(std::io::Error::other("disk unavailable")));
        }
        self.inner.rated_modules().await
    }

    async fn record_rated(&self, module_id: Uuid) -> Result<(), AppError> {
        if self.fail_writes {
            return Err(AppError::Io(std::io::Error::other("disk full")));
        }
        self.inner.record_rated(module_id).await
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.inner.clear().await
    }
}

fn temp_path() -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("lecturer-assess-{}", Uuid::new_v4()))
        .join("preferences.json")
}

#[tokio::test]
async fn test_unrated_module_is_permitted() {
    let guard = SubmissionGuard::new(MemoryPreferenceStore::new());

    assert_eq!(guard.check(Uuid::new_v4()).await, GuardDecision::Permit);
}

#[tokio::test]
async fn test_recorded_module_stays_rated_until_cleared() {
    let guard = SubmissionGuard::new(MemoryPreferenceStore::new());
    let module_id = Uuid::new_v4();
    let other = Uuid::new_v4();

    assert!(guard.record(module_id).await);

    for _ in 0..3 {
        assert_eq!(guard.check(module_id).await, GuardDecision::AlreadyRated);
    }
    assert!(guard.check(other).await.is_permitted());

    guard.clear().await.unwrap();
    assert_eq!(guard.check(module_id).await, GuardDecision::Permit);
}

#[tokio::test]
async fn test_recording_twice_is_harmless() {
    let store = MemoryPreferenceStore::new();
    let guard = SubmissionGuard::new(store.clone());
    let module_id = Uuid::new_v4();

    assert!(guard.record(module_id).await);
    assert!(guard.record(module_id).await);

    assert_eq!(store.rated_modules().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_read_failure_fails_open() {
    let store = MemoryPreferenceStore::new();
    let module_id = Uuid::new_v4();
    store.record_rated(module_id).await.unwrap();

    let guard = SubmissionGuard::new(BrokenStore {
        fail_reads: true,
        fail_writes: false,
        inner: store,
    });

    assert_eq!(guard.check(module_id).await, GuardDecision::Permit);
}

#[tokio::test]
async fn test_write_failure_is_swallowed() {
    let guard = SubmissionGuard::new(BrokenStore {
        fail_reads: false,
        fail_writes: true,
        inner: MemoryPreferenceStore::new(),
    });
    let module_id = Uuid::new_v4();

    assert!(!guard.record(module_id).await);
    assert_eq!(guard.check(module_id).await, GuardDecision::Permit);
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let path = temp_path();
    let module_id = Uuid::new_v4();

    let first = SubmissionGuard::new(FilePreferenceStore::new(&path));
    assert_eq!(first.check(module_id).await, GuardDecision::Permit);
    assert!(first.record(module_id).await);

    let second = SubmissionGuard::new(FilePreferenceStore::new(&path));
    assert_eq!(second.check(module_id).await, GuardDecision::AlreadyRated);

    second.clear().await.unwrap();
    assert_eq!(first.check(module_id).await, GuardDecision::Permit);

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[tokio::test]
async fn test_corrupt_file_fails_open() {
    let path = temp_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"not json at all").unwrap();

    let store = FilePreferenceStore::new(&path);
    assert!(store.rated_modules().await.is_err());

    let guard = SubmissionGuard::new(store);
    assert_eq!(guard.check(Uuid::new_v4()).await, GuardDecision::Permit);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_redis_key_is_scoped_per_client() {
    assert_eq!(
        RedisKey::rated_modules("device-1"),
        "client:device-1:rated_modules"
    );
}

// Needs a live server; skipped unless REDIS_URL is set
#[tokio::test]
async fn test_redis_store_round_trip() {
    let Ok(redis_url) = std::env::var("REDIS_URL") else {
        return;
    };

    let client_id = format!("test-{}", Uuid::new_v4());
    let store = RedisPreferenceStore::connect(&redis_url, client_id.clone())
        .await
        .unwrap();
    let module_id = Uuid::new_v4();

    assert!(store.rated_modules().await.unwrap().is_empty());

    let guard = SubmissionGuard::new(store.clone());
    assert!(guard.record(module_id).await);
    assert!(guard.record(module_id).await);
    assert_eq!(guard.check(module_id).await, GuardDecision::AlreadyRated);

    // A second handle on the same client id sees the same record
    let reopened = RedisPreferenceStore::connect(&redis_url, client_id).await.unwrap();
    assert_eq!(
        reopened.rated_modules().await.unwrap(),
        HashSet::from([module_id])
    );

    guard.clear().await.unwrap();
    assert!(store.rated_modules().await.unwrap().is_empty());
}
