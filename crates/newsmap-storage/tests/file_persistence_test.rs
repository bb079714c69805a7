//! File-backed stores: durability across reopen, read pool visibility, config.

use newsmap_core::config::NewsmapConfig;
use newsmap_core::types::EventPayload;
use newsmap_storage::connection::pragmas::verify_wal_mode;
use newsmap_storage::migrations::current_version;
use newsmap_storage::MappingStore;

#[test]
fn mappings_survive_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("map.db");

    let event_ids = {
        let store = MappingStore::open(&path).unwrap();
        assert!(store.store_mappings("src:1", &[EventPayload::with_abstract("A")]));
        store.get_events_by_news_id("src:1").unwrap()
    };

    let store = MappingStore::open(&path).unwrap();
    assert_eq!(store.get_events_by_news_id("src:1").unwrap(), event_ids);
    assert_eq!(store.get_news_by_event_id(&event_ids[0]).unwrap(), vec!["src:1"]);
    assert_eq!(store.database().with_writer(current_version).unwrap(), 1);
}

#[test]
fn readers_see_committed_writes_immediately() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = MappingStore::open(&dir.path().join("map.db")).unwrap();
    assert!(store.database().path().is_some());
    assert!(store.database().with_writer(verify_wal_mode).unwrap());

    for i in 0..10 {
        let doc = format!("src:{i}");
        assert!(store.store_mappings(&doc, &[EventPayload::with_abstract("shared")]));
        // round-robin readers: each read may land on a different connection
        assert_eq!(store.get_events_by_news_id(&doc).unwrap().len(), 1);
    }
    assert_eq!(store.stats().unwrap().distinct_news, 10);
}

#[test]
fn store_opens_from_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("configured.db");
    let config = NewsmapConfig::from_toml(&format!(
        "[storage]\ndb_path = {:?}\nread_pool_size = 2\n\n[mapping]\nskip_malformed = false\n",
        db_path.display().to_string()
    ))
    .unwrap();

    let store = MappingStore::from_config(&config).unwrap();
    assert_eq!(store.database().path(), Some(db_path.as_path()));
    assert!(!store.mapping_config().effective_skip_malformed());
    assert!(!store.store_mappings("src:1", &[EventPayload::default()]));
    assert!(db_path.exists());
}

#[test]
fn unopenable_path_is_storage_unavailable() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("no/such/dir/map.db");
    match MappingStore::open(&missing) {
        Err(e) => {
            assert!(!e.is_transient());
            assert!(e.to_string().starts_with("storage unavailable"));
        }
        Ok(_) => panic!("opening under a missing directory must fail"),
    }
}
