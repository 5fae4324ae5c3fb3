//! Todo store integration tests
//!
//! Drives the public API end to end against a temporary directory.

use std::collections::HashSet;
use std::sync::Arc;

use tempfile::TempDir;
use todostore::config::StorageConfig;
use todostore::error::Result;
use todostore::{FileStore, Sequence, Todo, TodoError, TodoStore};

async fn open_store(temp_dir: &TempDir) -> Result<FileStore> {
    FileStore::open(&StorageConfig::under(temp_dir.path())).await
}

#[tokio::test]
async fn test_create_then_read_one() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await?;

    let created = store.create("hello").await?;
    let read = store.read_one(&created.id).await?;

    assert_eq!(read, Todo::new(created.id.clone(), "hello"));
    Ok(())
}

#[tokio::test]
async fn test_read_all_returns_created_records() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await?;

    store.create("first").await?;
    store.create("second").await?;
    store.create("third").await?;

    let all = store.read_all().await?;
    let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["00001", "00002", "00003"]);
    assert_eq!(all[0].text, "first");
    assert_eq!(all[1].text, "second");
    assert_eq!(all[2].text, "third");
    Ok(())
}

#[tokio::test]
async fn test_update_then_read_one() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await?;
    store.create("old text").await?;

    store.update("00001", "new text").await?;

    assert_eq!(store.read_one("00001").await?, Todo::new("00001", "new text"));
    Ok(())
}

#[tokio::test]
async fn test_delete_is_not_idempotent() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await?;
    store.create("short lived").await?;
    store.create("survivor").await?;

    store.delete("00001").await?;

    assert!(matches!(store.read_one("00001").await, Err(TodoError::NotFound(_))));
    assert!(matches!(store.delete("00001").await, Err(TodoError::NotFound(_))));
    assert_eq!(store.read_all().await?, vec![Todo::new("00002", "survivor")]);
    Ok(())
}

#[tokio::test]
async fn test_counter_continues_from_disk() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig::under(temp_dir.path());
    let store = FileStore::open(&config).await?;
    std::fs::write(&config.counter_file, "00041").unwrap();

    let todo = store.create("next").await?;
    assert_eq!(todo.id, "00042");
    Ok(())
}

#[tokio::test]
async fn test_records_survive_reopen() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = open_store(&temp_dir).await?;
        store.create("persistent").await?;
    }

    {
        let store = open_store(&temp_dir).await?;
        assert_eq!(store.read_all().await?, vec![Todo::new("00001", "persistent")]);
        assert_eq!(store.create("after reopen").await?.id, "00002");
    }
    Ok(())
}

#[tokio::test]
async fn test_overflow_is_reported() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig::under(temp_dir.path());
    let store = FileStore::open(&config).await?;
    std::fs::write(&config.counter_file, "99999").unwrap();

    let err = store.create("one too many").await.unwrap_err();
    assert!(matches!(err, TodoError::CounterOverflow { .. }));
    assert!(store.read_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_huge_counter_is_overflow_not_wraparound() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig::under(temp_dir.path());
    let store = FileStore::open(&config).await?;

    for contents in ["100000".to_string(), u64::MAX.to_string()] {
        std::fs::write(&config.counter_file, &contents).unwrap();

        let err = store.create("never stored").await.unwrap_err();
        assert!(matches!(err, TodoError::CounterOverflow { .. }));
        assert_eq!(std::fs::read_to_string(&config.counter_file).unwrap(), contents);
    }
    assert!(store.read_all().await?.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_never_collide() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(open_store(&temp_dir).await?);

    let handles: Vec<_> = (0..40)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(&format!("todo {}", n)).await })
        })
        .collect();

    let mut created = Vec::new();
    for handle in handles {
        created.push(handle.await.expect("task panicked")?);
    }

    let ids: HashSet<_> = created.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids.len(), 40);

    let all = store.read_all().await?;
    assert_eq!(all.len(), 40);
    for todo in &created {
        assert!(all.contains(todo));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stores_sharing_a_sequence() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig::under(temp_dir.path());
    std::fs::create_dir_all(&config.data_dir).unwrap();

    let sequence = Arc::new(Sequence::new(config.counter_file.clone()));
    let a = FileStore::with_sequence(config.data_dir.clone(), Arc::clone(&sequence));
    let b = FileStore::with_sequence(config.data_dir.clone(), Arc::clone(&sequence));

    let (x, y) = tokio::join!(a.create("from a"), b.create("from b"));
    let (x, y) = (x?, y?);

    assert_ne!(x.id, y.id);
    assert_eq!(sequence.current().await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await?;

    assert!(store.read_one("nonexistent").await.unwrap_err().is_not_found());
    assert!(store.update("nonexistent", "x").await.unwrap_err().is_not_found());
    assert!(store.delete("nonexistent").await.unwrap_err().is_not_found());
    assert!(store.read_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_store_as_trait_object() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store: Box<dyn TodoStore> = Box::new(open_store(&temp_dir).await?);

    let todo = store.create("dyn").await?;
    assert_eq!(store.read_one(&todo.id).await?.text, "dyn");
    Ok(())
}
