use std::sync::Arc;

use clouds_content::Catalog;
use clouds_core::{LevelId, LevelStatus, ProgressionConfig};
use clouds_runtime::{
    FileProgressionRepository, ProgressionRepository, ProgressionService, RepositoryError,
    UserId,
};

#[test]
fn records_survive_a_new_repository_instance() {
    let dir = tempfile::tempdir().unwrap();
    let user = UserId::from("angel sister");

    {
        let repo = Arc::new(FileProgressionRepository::new(dir.path()).unwrap());
        let service = ProgressionService::new(repo, ProgressionConfig::default());
        service.complete_tutorial(&user).unwrap();
        service
            .complete_level(&user, &LevelId::from(ProgressionConfig::OFFICE_INFERNO))
            .unwrap();
    }

    let repo = FileProgressionRepository::new(dir.path()).unwrap();
    let stored = repo.get(&user).unwrap().unwrap();

    assert_eq!(stored.version, 3);
    assert_eq!(stored.record.faith_points, 95);
    assert!(stored.record.tutorial_completed);
    assert_eq!(repo.list_users().unwrap(), vec![user]);
}

#[test]
fn create_refuses_existing_user() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(FileProgressionRepository::new(dir.path()).unwrap());
    let service = ProgressionService::new(repo, ProgressionConfig::default());
    let user = UserId::from("ava");

    service.create(&user).unwrap();
    let err = service.create(&user).unwrap_err();

    assert!(matches!(
        err,
        clouds_runtime::ServiceError::Repository(RepositoryError::AlreadyExists(_))
    ));
}

#[test]
fn scored_challenge_through_builtin_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::builtin().unwrap();
    let level = LevelId::from(ProgressionConfig::OFFICE_INFERNO);
    let correct = catalog.challenge(&level).unwrap().score(&[1, 0, 1]).unwrap();

    let repo = Arc::new(FileProgressionRepository::new(dir.path()).unwrap());
    let service = ProgressionService::new(repo, catalog.into_config());
    let user = UserId::from("ava");
    let applied = service.complete_challenge(&user, &level, correct).unwrap();

    assert_eq!(applied.record().faith_points, 50);
    let board = service.levels(&user).unwrap();
    assert_eq!(board[0].status, LevelStatus::Completed);
    assert_eq!(board[1].status, LevelStatus::Locked);
}
