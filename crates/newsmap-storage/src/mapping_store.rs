//! The news ↔ event relation store.
//!
//! Every write goes through one BEGIN IMMEDIATE transaction per batch and an
//! `ON CONFLICT DO NOTHING` insert, so re-running extraction for a document
//! (even concurrently, from another handle on the same file) never fails and
//! never duplicates a pair.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use newsmap_core::canonical::AbstractDigestDeriver;
use newsmap_core::config::{MappingConfig, NewsmapConfig};
use newsmap_core::errors::{MappingError, MappingResult, NewsmapErrorCode, PayloadError, StorageError};
use newsmap_core::traits::EventIdDeriver;
use newsmap_core::types::{
    validate_news_global_id, EventPayload, MappingStats, NewsEventMapping, SkippedEvent,
    StoreReport,
};
use rusqlite::Connection;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::news_event_mappings as q;

/// Persisted many-to-many mapping between news global ids and canonical
/// event ids.
pub struct MappingStore<D: EventIdDeriver = AbstractDigestDeriver> {
    db: DatabaseManager,
    deriver: D,
    config: MappingConfig,
}

impl MappingStore<AbstractDigestDeriver> {
    /// Open a file-backed store with default settings.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self::with_deriver(
            DatabaseManager::open(path)?,
            AbstractDigestDeriver,
            MappingConfig::default(),
        ))
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::with_deriver(
            DatabaseManager::open_in_memory()?,
            AbstractDigestDeriver,
            MappingConfig::default(),
        ))
    }

    /// Open the store described by a resolved configuration.
    pub fn from_config(config: &NewsmapConfig) -> Result<Self, StorageError> {
        let db = DatabaseManager::open_with_config(
            &config.storage.effective_db_path(),
            &config.storage,
        )?;
        Ok(Self::with_deriver(db, AbstractDigestDeriver, config.mapping.clone()))
    }
}

impl<D: EventIdDeriver> MappingStore<D> {
    /// Build a store over an open database with a custom id deriver.
    pub fn with_deriver(db: DatabaseManager, deriver: D, config: MappingConfig) -> Self {
        Self { db, deriver, config }
    }

    /// The underlying connection manager.
    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }

    /// Batch policy this store was opened with.
    pub fn mapping_config(&self) -> &MappingConfig {
        &self.config
    }

    /// Record the events extracted from one document.
    ///
    /// Returns `false` when nothing could be recorded (invalid id, storage
    /// failure, or a malformed payload in strict mode). The cause is logged;
    /// callers that need it use `try_store_mappings`.
    pub fn store_mappings(&self, news_global_id: &str, events: &[EventPayload]) -> bool {
        match self.try_store_mappings(news_global_id, events) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    news_global_id,
                    code = e.error_code(),
                    error = %e,
                    "news/event mappings not recorded"
                );
                false
            }
        }
    }

    /// Fallible form of `store_mappings`, returning what the batch did.
    pub fn try_store_mappings(
        &self,
        news_global_id: &str,
        events: &[EventPayload],
    ) -> MappingResult<StoreReport> {
        validate_news_global_id(news_global_id)?;

        let (event_ids, skipped) = self.derive_batch(news_global_id, events)?;
        if event_ids.is_empty() {
            return Ok(StoreReport {
                skipped,
                ..StoreReport::empty()
            });
        }

        let inserted = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let created_at = q::format_timestamp(batch_timestamp(tx)?);
                let mut inserted: usize = 0;
                for event_id in &event_ids {
                    if q::insert_if_absent(tx, news_global_id, event_id, &created_at)? {
                        inserted += 1;
                    }
                }
                Ok(inserted)
            })
        })?;

        let duplicates = event_ids.len() - inserted;
        tracing::debug!(
            news_global_id,
            inserted,
            duplicates,
            skipped = skipped.len(),
            "stored news/event mappings"
        );

        Ok(StoreReport {
            event_ids,
            inserted,
            duplicates,
            skipped,
        })
    }

    /// Record already-derived (news_global_id, event_id) pairs in one
    /// transaction. Returns the number of pairs that were new.
    pub fn add_mappings<N, E>(&self, pairs: &[(N, E)]) -> MappingResult<usize>
    where
        N: AsRef<str>,
        E: AsRef<str>,
    {
        for (index, (news_global_id, event_id)) in pairs.iter().enumerate() {
            validate_news_global_id(news_global_id.as_ref())?;
            if event_id.as_ref().trim().is_empty() {
                return Err(MappingError::MalformedPayload {
                    index,
                    source: PayloadError::InvalidField {
                        field: "event_id",
                        message: "must not be empty".to_string(),
                    },
                });
            }
        }
        if pairs.is_empty() {
            return Ok(0);
        }

        let inserted = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let created_at = q::format_timestamp(batch_timestamp(tx)?);
                q::insert_pairs(tx, pairs, &created_at)
            })
        })?;
        tracing::debug!(pairs = pairs.len(), inserted, "added precomputed mappings");
        Ok(inserted)
    }

    /// Event ids produced by a document, oldest first. Unknown ids yield an
    /// empty list.
    pub fn get_events_by_news_id(&self, news_global_id: &str) -> Result<Vec<String>, StorageError> {
        self.db
            .with_reader(|conn| q::events_by_news_id(conn, news_global_id))
    }

    /// Documents that produced an event, oldest first. Unknown ids yield an
    /// empty list.
    pub fn get_news_by_event_id(&self, event_id: &str) -> Result<Vec<String>, StorageError> {
        self.db.with_reader(|conn| q::news_by_event_id(conn, event_id))
    }

    /// Like `get_events_by_news_id`, with creation timestamps.
    pub fn get_mappings_by_news_id(
        &self,
        news_global_id: &str,
    ) -> Result<Vec<NewsEventMapping>, StorageError> {
        self.db
            .with_reader(|conn| q::mappings_by_news_id(conn, news_global_id))
    }

    /// Audit scan: up to `limit` rows created at or after `since`, oldest first.
    pub fn mappings_created_since(
        &self,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<NewsEventMapping>, StorageError> {
        self.db
            .with_reader(|conn| q::mappings_created_since(conn, since, limit))
    }

    /// Whether the exact pair has been recorded.
    pub fn contains_mapping(
        &self,
        news_global_id: &str,
        event_id: &str,
    ) -> Result<bool, StorageError> {
        self.db
            .with_reader(|conn| q::count_pair(conn, news_global_id, event_id))
            .map(|n| n > 0)
    }

    /// Total number of recorded pairs.
    pub fn mapping_count(&self) -> Result<u64, StorageError> {
        self.db.with_reader(q::count_mappings)
    }

    pub fn stats(&self) -> Result<MappingStats, StorageError> {
        self.db.with_reader(q::stats)
    }

    /// Derive ids for a batch, dropping repeats. Malformed payloads are
    /// skipped or abort the batch depending on the configured policy.
    fn derive_batch(
        &self,
        news_global_id: &str,
        events: &[EventPayload],
    ) -> MappingResult<(Vec<String>, Vec<SkippedEvent>)> {
        let skip_malformed = self.config.effective_skip_malformed();
        let mut seen = HashSet::with_capacity(events.len());
        let mut event_ids = Vec::with_capacity(events.len());
        let mut skipped = Vec::new();

        for (index, payload) in events.iter().enumerate() {
            match self.deriver.derive(payload) {
                Ok(event_id) => {
                    if seen.insert(event_id.clone()) {
                        event_ids.push(event_id);
                    }
                }
                Err(error) if skip_malformed => {
                    tracing::warn!(news_global_id, index, %error, "skipping malformed event");
                    skipped.push(SkippedEvent { index, error });
                }
                Err(source) => return Err(MappingError::MalformedPayload { index, source }),
            }
        }

        Ok((event_ids, skipped))
    }
}

/// Timestamp for a batch: now, but never earlier than the newest stored row,
/// so `created_at` stays non-decreasing across clock steps. Called inside the
/// write transaction.
fn batch_timestamp(conn: &Connection) -> Result<DateTime<Utc>, StorageError> {
    let now = Utc::now();
    Ok(match q::latest_created_at(conn)? {
        Some(latest) if latest > now => latest,
        _ => now,
    })
}
