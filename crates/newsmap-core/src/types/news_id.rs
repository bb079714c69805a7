//! NewsGlobalId: the `source:localId` composite key of an ingested document.

use std::fmt;
use std::str::FromStr;

use crate::constants::NEWS_ID_SEPARATOR;
use crate::errors::MappingError;

/// A parsed news global id. The local id may itself contain `:`; the split
/// happens at the first separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewsGlobalId {
    source: String,
    local_id: String,
}

impl NewsGlobalId {
    /// Build an id from its two parts. Both must be non-blank and the source
    /// must not contain the separator.
    pub fn new(source: impl Into<String>, local_id: impl Into<String>) -> Result<Self, MappingError> {
        let source = source.into();
        let local_id = local_id.into();
        let rendered = format!("{source}{NEWS_ID_SEPARATOR}{local_id}");

        if source.trim().is_empty() {
            return Err(invalid(&rendered, "source is empty"));
        }
        if source.contains(NEWS_ID_SEPARATOR) {
            return Err(invalid(&rendered, "source must not contain ':'"));
        }
        if local_id.trim().is_empty() {
            return Err(invalid(&rendered, "local id is empty"));
        }
        Ok(Self { source, local_id })
    }

    /// Parse `source:localId`.
    pub fn parse(value: &str) -> Result<Self, MappingError> {
        match value.split_once(NEWS_ID_SEPARATOR) {
            Some((source, local_id)) => Self::new(source, local_id),
            None => Err(invalid(value, "missing ':' separator")),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }
}

impl fmt::Display for NewsGlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.source, NEWS_ID_SEPARATOR, self.local_id)
    }
}

impl FromStr for NewsGlobalId {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NewsGlobalId> for String {
    fn from(id: NewsGlobalId) -> Self {
        id.to_string()
    }
}

/// The store's own precondition: a non-blank id. The composite format is the
/// caller's convention and is checked by `NewsGlobalId::parse` only.
pub fn validate_news_global_id(value: &str) -> Result<(), MappingError> {
    if value.trim().is_empty() {
        return Err(invalid(value, "must not be empty"));
    }
    Ok(())
}

fn invalid(value: &str, reason: &str) -> MappingError {
    MappingError::InvalidNewsId {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
