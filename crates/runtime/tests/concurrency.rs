//! Concurrent writers through the service must not lose points or unlocks.

use std::sync::Arc;
use std::thread;

use clouds_core::{ProgressionConfig, ProgressionRecord};
use clouds_runtime::{
    FileProgressionRepository, InMemoryProgressionRepo, ProgressionRepository, ProgressionService,
    RepositoryError, UserId,
};

const THREADS: usize = 8;
const AWARDS_PER_THREAD: usize = 5;

fn hammer(repository: Arc<dyn ProgressionRepository>) -> ProgressionRecord {
    let service = ProgressionService::new(repository, ProgressionConfig::default())
        .with_max_attempts(1_000);
    let user = UserId::from("ava");
    service.load_or_create(&user).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = service.clone();
            let user = user.clone();
            thread::spawn(move || {
                for _ in 0..AWARDS_PER_THREAD {
                    service.award_points(&user, 5).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    service.load_or_create(&user).unwrap().record
}

#[test]
fn in_memory_concurrent_awards_lose_nothing() {
    let record = hammer(Arc::new(InMemoryProgressionRepo::new()));

    assert_eq!(record.faith_points, (THREADS * AWARDS_PER_THREAD * 5) as u32);
    assert!(record.has_filter(&"Glamour Wings".into()));
    assert!(record.has_filter(&"Dreamy Halo".into()));
}

#[test]
fn file_concurrent_awards_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let record = hammer(Arc::new(FileProgressionRepository::new(dir.path()).unwrap()));

    assert_eq!(record.faith_points, 200);
    assert_eq!(record.unlocked_filters.len(), 3);
}

#[test]
fn stale_writer_gets_version_conflict() {
    let repo = InMemoryProgressionRepo::new();
    let user = UserId::from("ava");
    let created = repo.create(&user, &ProgressionRecord::new()).unwrap();

    repo.update(&user, created.version, &ProgressionRecord::new().with_points(15))
        .unwrap();
    let err = repo
        .update(&user, created.version, &ProgressionRecord::new().with_points(10))
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(matches!(err, RepositoryError::VersionConflict { .. }));
}
