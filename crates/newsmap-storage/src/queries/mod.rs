//! SQL queries, one module per table.

pub mod news_event_mappings;
