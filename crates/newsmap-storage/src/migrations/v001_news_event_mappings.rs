//! v001: the news_event_mappings relation table.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS news_event_mappings (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    news_global_id  TEXT NOT NULL,
    event_id        TEXT NOT NULL,
    created_at      TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_nem_news_event
    ON news_event_mappings(news_global_id, event_id);
CREATE INDEX IF NOT EXISTS idx_nem_news ON news_event_mappings(news_global_id);
CREATE INDEX IF NOT EXISTS idx_nem_event ON news_event_mappings(event_id);
CREATE INDEX IF NOT EXISTS idx_nem_created_at ON news_event_mappings(created_at);
";
