//! news_event_mappings table queries.
//!
//! `created_at` is stored as RFC 3339 UTC with fixed microsecond precision,
//! so lexical order on the column equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use newsmap_core::errors::StorageError;
use newsmap_core::types::{MappingStats, NewsEventMapping};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::to_storage_err;

/// Render a timestamp in the stored format.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|ts| ts.with_timezone(&Utc))
}

/// Newest `created_at` in the table, if any. An unparseable value is logged
/// and treated as absent so one bad row cannot block later writes.
pub fn latest_created_at(conn: &Connection) -> Result<Option<DateTime<Utc>>, StorageError> {
    let latest: Option<String> = conn
        .query_row(
            "SELECT MAX(created_at) FROM news_event_mappings",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err("query latest created_at", e))?
        .flatten();

    Ok(latest.and_then(|value| match parse_timestamp(&value) {
        Ok(ts) => Some(ts),
        Err(error) => {
            tracing::warn!(created_at = %value, %error, "ignoring unparseable created_at");
            None
        }
    }))
}

/// Insert a pair unless it already exists. Returns `true` when a row was
/// created. An existing pair keeps its original `created_at`.
pub fn insert_if_absent(
    conn: &Connection,
    news_global_id: &str,
    event_id: &str,
    created_at: &str,
) -> Result<bool, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO news_event_mappings (news_global_id, event_id, created_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(news_global_id, event_id) DO NOTHING",
        )
        .map_err(|e| to_storage_err("prepare mapping insert", e))?;

    let changed = stmt
        .execute(params![news_global_id, event_id, created_at])
        .map_err(|e| to_storage_err("insert mapping", e))?;
    Ok(changed == 1)
}

/// Insert a batch of pairs with one shared timestamp. Returns the number of
/// rows created.
pub fn insert_pairs<N, E>(
    conn: &Connection,
    pairs: &[(N, E)],
    created_at: &str,
) -> Result<usize, StorageError>
where
    N: AsRef<str>,
    E: AsRef<str>,
{
    let mut inserted = 0;
    for (news_global_id, event_id) in pairs {
        if insert_if_absent(conn, news_global_id.as_ref(), event_id.as_ref(), created_at)? {
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Event ids mapped from a document, oldest first.
pub fn events_by_news_id(
    conn: &Connection,
    news_global_id: &str,
) -> Result<Vec<String>, StorageError> {
    query_strings(
        conn,
        "SELECT event_id FROM news_event_mappings
         WHERE news_global_id = ?1
         ORDER BY created_at ASC, id ASC",
        news_global_id,
    )
}

/// News ids that produced an event, oldest first.
pub fn news_by_event_id(conn: &Connection, event_id: &str) -> Result<Vec<String>, StorageError> {
    query_strings(
        conn,
        "SELECT news_global_id FROM news_event_mappings
         WHERE event_id = ?1
         ORDER BY created_at ASC, id ASC",
        event_id,
    )
}

/// Full mapping records for a document, oldest first.
pub fn mappings_by_news_id(
    conn: &Connection,
    news_global_id: &str,
) -> Result<Vec<NewsEventMapping>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT news_global_id, event_id, created_at FROM news_event_mappings
             WHERE news_global_id = ?1
             ORDER BY created_at ASC, id ASC",
        )
        .map_err(|e| to_storage_err("prepare mappings_by_news_id", e))?;

    let rows = stmt
        .query_map(params![news_global_id], mapping_from_row)
        .map_err(|e| to_storage_err("query mappings_by_news_id", e))?;
    collect(rows)
}

/// Chronological scan of rows created at or after `since`.
pub fn mappings_created_since(
    conn: &Connection,
    since: DateTime<Utc>,
    limit: usize,
) -> Result<Vec<NewsEventMapping>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT news_global_id, event_id, created_at FROM news_event_mappings
             WHERE created_at >= ?1
             ORDER BY created_at ASC, id ASC
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err("prepare mappings_created_since", e))?;

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt
        .query_map(params![format_timestamp(since), limit], mapping_from_row)
        .map_err(|e| to_storage_err("query mappings_created_since", e))?;
    collect(rows)
}

/// Number of rows for one exact pair (0 or 1 while the unique index holds).
pub fn count_pair(
    conn: &Connection,
    news_global_id: &str,
    event_id: &str,
) -> Result<u64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM news_event_mappings
         WHERE news_global_id = ?1 AND event_id = ?2",
        params![news_global_id, event_id],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as u64)
    .map_err(|e| to_storage_err("count pair", e))
}

/// Total rows in the table.
pub fn count_mappings(conn: &Connection) -> Result<u64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM news_event_mappings", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as u64)
    .map_err(|e| to_storage_err("count mappings", e))
}

/// Row count plus distinct documents and events.
pub fn stats(conn: &Connection) -> Result<MappingStats, StorageError> {
    conn.query_row(
        "SELECT COUNT(*), COUNT(DISTINCT news_global_id), COUNT(DISTINCT event_id)
         FROM news_event_mappings",
        [],
        |row| {
            Ok(MappingStats {
                total_mappings: row.get::<_, i64>(0)? as u64,
                distinct_news: row.get::<_, i64>(1)? as u64,
                distinct_events: row.get::<_, i64>(2)? as u64,
            })
        },
    )
    .map_err(|e| to_storage_err("query stats", e))
}

fn query_strings(conn: &Connection, sql: &str, key: &str) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err("prepare lookup", e))?;
    let rows = stmt
        .query_map(params![key], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err("query lookup", e))?;
    collect(rows)
}

fn mapping_from_row(row: &Row<'_>) -> rusqlite::Result<NewsEventMapping> {
    let created_at: String = row.get(2)?;
    let created_at = parse_timestamp(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(NewsEventMapping {
        news_global_id: row.get(0)?,
        event_id: row.get(1)?,
        created_at,
    })
}

fn collect<T, I>(rows: I) -> Result<Vec<T>, StorageError>
where
    I: Iterator<Item = rusqlite::Result<T>>,
{
    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| to_storage_err("read row", e))?);
    }
    Ok(result)
}
