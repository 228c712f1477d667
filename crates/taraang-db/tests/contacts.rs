//! Contact submission storage against an in-memory database.

use taraang_core::contact::ContactSubmission;
use taraang_db::migrations::migration_status;
use taraang_db::{Database, DbConfig, DbError};

fn submission(name: &str) -> ContactSubmission {
    ContactSubmission {
        name: name.to_string(),
        email: "rao@example.com".to_string(),
        phone: "98765 43210".to_string(),
        event_type: "Wedding".to_string(),
        message: "Catering for 300 guests in March".to_string(),
    }
}

#[tokio::test]
async fn test_insert_and_read_back() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let repo = db.contacts();

    let stored = repo.insert(&submission("A. Rao")).await.unwrap();
    let fetched = repo.get(&stored.id).await.unwrap();

    assert_eq!(fetched.submission, submission("A. Rao"));
    assert_eq!(fetched.id, stored.id);
    assert_eq!(
        fetched.created_at.timestamp_millis(),
        stored.created_at.timestamp_millis()
    );
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_recent_is_newest_first() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let repo = db.contacts();
    for name in ["First", "Second", "Third"] {
        repo.insert(&submission(name)).await.unwrap();
    }

    let recent = repo.recent(2).await.unwrap();
    let names: Vec<&str> = recent.iter().map(|s| s.submission.name.as_str()).collect();
    assert_eq!(names, vec!["Third", "Second"]);
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_missing_submission() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let err = db.contacts().get("nope").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.run_migrations().await.unwrap();
    let (embedded, applied) = migration_status(db.pool()).await.unwrap();
    assert_eq!(embedded, 1);
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn test_file_database_persists() {
    let path = std::env::temp_dir().join(format!("taraang-db-{}.sqlite", uuid::Uuid::new_v4()));
    {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.contacts().insert(&submission("A. Rao")).await.unwrap();
        db.close().await;
    }
    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    assert_eq!(db.contacts().count().await.unwrap(), 1);
    db.close().await;

    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}
