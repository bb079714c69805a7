//! Concurrent re-processing of the same documents: losers of a race see a
//! no-op, never an error or a duplicate row.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use newsmap_core::canonical::canonical_event_id_from_abstract;
use newsmap_core::types::EventPayload;
use newsmap_storage::queries::news_event_mappings::count_mappings;
use newsmap_storage::MappingStore;

fn batch(doc: usize) -> Vec<EventPayload> {
    (0..5)
        .map(|i| EventPayload::with_abstract(format!("event {}", (doc + i) % 7)))
        .collect()
}

#[test]
fn shared_handle_many_threads_same_documents() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(MappingStore::open(&dir.path().join("map.db")).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut ok = true;
                for round in 0..10 {
                    let doc = (t + round) % 4;
                    ok &= store.store_mappings(&format!("src:{doc}"), &batch(doc));
                }
                ok
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().unwrap(), "every call must report success");
    }

    let mut expected = HashSet::new();
    for doc in 0..4 {
        for payload in batch(doc) {
            let id = canonical_event_id_from_abstract(payload.abstract_text.as_deref().unwrap()).unwrap();
            expected.insert((format!("src:{doc}"), id));
        }
    }
    let rows = store.database().with_writer(count_mappings).unwrap();
    assert_eq!(rows as usize, expected.len());
}

#[test]
fn independent_handles_on_one_file_race_on_the_same_pairs() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("map.db");
    // Open sequentially so only one handle creates the schema.
    let stores: Vec<Arc<MappingStore>> = (0..3)
        .map(|_| Arc::new(MappingStore::open(&path).unwrap()))
        .collect();

    let payloads: Vec<EventPayload> = ["A", "B", "C"]
        .iter()
        .map(|a| EventPayload::with_abstract(*a))
        .collect();
    let payloads = Arc::new(payloads);

    let handles: Vec<_> = (0..6)
        .map(|t| {
            let store = Arc::clone(&stores[t % stores.len()]);
            let payloads = Arc::clone(&payloads);
            thread::spawn(move || {
                (0..20).all(|_| store.store_mappings("src:shared", &payloads))
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().unwrap());
    }

    for store in &stores {
        assert_eq!(store.get_events_by_news_id("src:shared").unwrap().len(), 3);
    }
    let a = canonical_event_id_from_abstract("A").unwrap();
    assert_eq!(stores[0].get_news_by_event_id(&a).unwrap(), vec!["src:shared"]);
}
