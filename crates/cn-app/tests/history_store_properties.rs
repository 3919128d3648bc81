//! HistoryStore behaviour, checked on every persistence backend.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use cn_app::HistoryStore;
use cn_core::ports::{ClipboardHistoryRepositoryPort, ClockPort};
use cn_core::{EntryId, EntryPatch};
use cn_infra::db::{init_db_pool, DieselSqliteExecutor, SqliteHistoryRepository};
use cn_infra::{InMemoryHistoryRepository, JsonFileHistoryRepository};
use tempfile::TempDir;

/// Advances one millisecond per reading so insertion order is visible in timestamps.
struct SteppingClock(AtomicI64);

impl ClockPort for SteppingClock {
    fn now_ms(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    fn start_of_today_ms(&self) -> i64 {
        0
    }
}

struct Fixture {
    name: &'static str,
    store: Arc<HistoryStore>,
    _dir: Option<TempDir>,
}

async fn stores() -> Result<Vec<Fixture>> {
    let json_dir = TempDir::new()?;
    let json: Arc<dyn ClipboardHistoryRepositoryPort> = Arc::new(
        JsonFileHistoryRepository::open(json_dir.path().join("history.json"), 100).await?,
    );

    let db_dir = TempDir::new()?;
    let pool = init_db_pool(&db_dir.path().join("clipnest.db").to_string_lossy())?;
    let sqlite: Arc<dyn ClipboardHistoryRepositoryPort> = Arc::new(
        SqliteHistoryRepository::with_executor(DieselSqliteExecutor::new(pool)),
    );

    let memory: Arc<dyn ClipboardHistoryRepositoryPort> =
        Arc::new(InMemoryHistoryRepository::new());

    Ok(vec![
        fixture("memory", memory, None),
        fixture("file", json, Some(json_dir)),
        fixture("sqlite", sqlite, Some(db_dir)),
    ])
}

fn fixture(
    name: &'static str,
    repo: Arc<dyn ClipboardHistoryRepositoryPort>,
    dir: Option<TempDir>,
) -> Fixture {
    let clock = Arc::new(SteppingClock(AtomicI64::new(1_000)));
    Fixture {
        name,
        store: Arc::new(HistoryStore::new(repo, clock, 100)),
        _dir: dir,
    }
}

#[tokio::test]
async fn saving_twice_reuses_the_entry() -> Result<()> {
    for f in stores().await? {
        let first = f.store.save("same text").await?;
        let before = f.store.get_by_id(first).await?.unwrap();
        let second = f.store.save("same text").await?;

        assert_eq!(first, second, "{}", f.name);
        let after = f.store.get_by_id(first).await?.unwrap();
        assert_eq!(after.used_count, 2, "{}", f.name);
        assert_eq!(after.created_at, before.created_at, "{}", f.name);
        assert!(after.updated_at > before.updated_at, "{}", f.name);
        assert_eq!(f.store.list(50, 0).await?.len(), 1, "{}", f.name);
    }
    Ok(())
}

#[tokio::test]
async fn hello_world_scenario() -> Result<()> {
    for f in stores().await? {
        let hello = f.store.save("hello").await?;
        let world = f.store.save("world").await?;
        assert_ne!(hello, world, "{}", f.name);

        let listed: Vec<String> = f
            .store
            .list(50, 0)
            .await?
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(listed, vec!["world", "hello"], "{}", f.name);

        let found = f.store.search("HEL", 10).await?;
        assert_eq!(found.len(), 1, "{}", f.name);
        assert_eq!(found[0].id, hello, "{}", f.name);

        let stats = f.store.get_stats().await?;
        assert_eq!((stats.total, stats.favorites, stats.today), (2, 0, 2), "{}", f.name);
    }
    Ok(())
}

#[tokio::test]
async fn pinned_entries_lead_the_listing() -> Result<()> {
    for f in stores().await? {
        let old = f.store.save("old").await?;
        f.store.save("new").await?;
        let patch = EntryPatch {
            is_pinned: Some(true),
            ..Default::default()
        };
        assert!(f.store.update(old, patch).await?, "{}", f.name);

        let listed = f.store.list(50, 0).await?;
        assert_eq!(listed[0].id, old, "{}", f.name);

        let page = f.store.list(1, 1).await?;
        assert_eq!(page.len(), 1, "{}", f.name);
        assert_eq!(page[0].content, "new", "{}", f.name);
    }
    Ok(())
}

#[tokio::test]
async fn search_prefers_frequently_used_entries() -> Result<()> {
    for f in stores().await? {
        let popular = f.store.save("note popular").await?;
        for _ in 0..4 {
            f.store.save("note popular").await?;
        }
        f.store.save("note fresh").await?;

        let found = f.store.search("note", 10).await?;
        assert_eq!(found[0].id, popular, "{}", f.name);
        assert_eq!(found[0].used_count, 5, "{}", f.name);
    }
    Ok(())
}

#[tokio::test]
async fn long_content_gets_truncated_preview() -> Result<()> {
    for f in stores().await? {
        let long = "x".repeat(250);
        let short = "y".repeat(50);
        let long_id = f.store.save(&long).await?;
        let short_id = f.store.save(&short).await?;

        let long_entry = f.store.get_by_id(long_id).await?.unwrap();
        assert_eq!(long_entry.preview, format!("{}...", "x".repeat(100)), "{}", f.name);
        assert_eq!(long_entry.content, long, "{}", f.name);
        let short_entry = f.store.get_by_id(short_id).await?.unwrap();
        assert_eq!(short_entry.preview, short, "{}", f.name);
    }
    Ok(())
}

#[tokio::test]
async fn delete_and_clear() -> Result<()> {
    for f in stores().await? {
        let id = f.store.save("doomed").await?;
        assert!(!f.store.delete(EntryId::new(999)).await?, "{}", f.name);
        assert_eq!(f.store.list(50, 0).await?.len(), 1, "{}", f.name);

        assert!(f.store.delete(id).await?, "{}", f.name);
        assert!(f.store.get_by_id(id).await?.is_none(), "{}", f.name);

        f.store.save("a").await?;
        f.store.save("b").await?;
        assert!(f.store.clear_all().await?, "{}", f.name);
        let fresh = f.store.save("after clear").await?;
        assert_eq!(fresh, EntryId::FIRST, "{}", f.name);
    }
    Ok(())
}

#[tokio::test]
async fn editing_into_existing_content_is_refused() -> Result<()> {
    for f in stores().await? {
        let a = f.store.save("alpha").await?;
        let b = f.store.save("beta").await?;
        let patch = EntryPatch {
            content: Some("alpha".to_string()),
            ..Default::default()
        };

        assert!(!f.store.update(b, patch).await?, "{}", f.name);
        let beta = f.store.get_by_id(b).await?.unwrap();
        assert_eq!(beta.content, "beta", "{}", f.name);

        let rename = EntryPatch {
            content: Some("gamma".to_string()),
            ..Default::default()
        };
        assert!(f.store.update(a, rename).await?, "{}", f.name);
        assert_eq!(f.store.save("gamma").await?, a, "{}", f.name);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_identical_saves_create_one_entry() -> Result<()> {
    for f in stores().await? {
        let mut tasks = Vec::new();
        for _ in 0..8 {
            let store = f.store.clone();
            tasks.push(tokio::spawn(async move { store.save("racing").await }));
        }
        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await??);
        }

        assert!(ids.iter().all(|id| *id == ids[0]), "{}", f.name);
        let listed = f.store.list(50, 0).await?;
        assert_eq!(listed.len(), 1, "{}", f.name);
        assert_eq!(listed[0].used_count, 8, "{}", f.name);
    }
    Ok(())
}

#[tokio::test]
async fn favorites_are_listed_and_counted() -> Result<()> {
    for f in stores().await? {
        let fav = f.store.save("keep").await?;
        f.store.save("skip").await?;
        let patch = EntryPatch {
            is_favorite: Some(true),
            ..Default::default()
        };
        f.store.update(fav, patch).await?;

        let favorites = f.store.get_favorites().await?;
        assert_eq!(favorites.len(), 1, "{}", f.name);
        assert_eq!(favorites[0].id, fav, "{}", f.name);
        assert_eq!(f.store.get_stats().await?.favorites, 1, "{}", f.name);
    }
    Ok(())
}
