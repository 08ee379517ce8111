//! Error types for the network boundary and for the aggregation core.

use heroes_shared::AppearanceType;

/// Failure reported by a [`CatalogSource`](crate::source::CatalogSource).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request never produced a response (connection, DNS, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote API answered with a non-2xx status other than 404.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The requested character or story does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl SourceError {
    /// Transport-class failures are worth offering a retry for.
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Transport(_) | SourceError::Status { .. })
    }
}

/// Errors surfaced by the aggregation core to its callers.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("fetching characters at offset {offset}: {source}")]
    Characters {
        offset: u32,
        #[source]
        source: SourceError,
    },

    #[error("searching characters named {name:?}: {source}")]
    Search {
        name: String,
        #[source]
        source: SourceError,
    },

    #[error("fetching character {id}: {source}")]
    Character {
        id: i64,
        #[source]
        source: SourceError,
    },

    #[error("fetching {kind} of character {character_id} at offset {offset}: {source}")]
    Page {
        character_id: i64,
        kind: AppearanceType,
        offset: u32,
        #[source]
        source: SourceError,
    },

    /// The server declared more items than pagination can reach.
    #[error(
        "inconsistent {kind} pagination for character {character_id}: \
         empty page at offset {offset} with declared total {total}"
    )]
    ProtocolInconsistency {
        character_id: i64,
        kind: AppearanceType,
        offset: u32,
        total: u32,
    },

    #[error("character {0} not found")]
    CharacterNotFound(i64),

    #[error("invalid character id {0}")]
    InvalidCharacterId(i64),

    /// A newer request on the same state was issued while this one was in
    /// flight. The result has been discarded and should be ignored.
    #[error("request superseded by a newer one")]
    Superseded,
}

impl ClientError {
    /// Whether retrying the exact same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Characters { source, .. }
            | ClientError::Search { source, .. }
            | ClientError::Character { source, .. }
            | ClientError::Page { source, .. } => source.is_transient(),
            ClientError::ProtocolInconsistency { .. } => true,
            ClientError::CharacterNotFound(_)
            | ClientError::InvalidCharacterId(_)
            | ClientError::Superseded => false,
        }
    }

    /// The boundary error wrapped by this one, if any.
    pub fn source_error(&self) -> Option<&SourceError> {
        match self {
            ClientError::Characters { source, .. }
            | ClientError::Search { source, .. }
            | ClientError::Character { source, .. }
            | ClientError::Page { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::CharacterNotFound(_))
            || matches!(self.source_error(), Some(SourceError::NotFound(_)))
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
