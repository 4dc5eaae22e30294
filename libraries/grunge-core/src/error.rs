/// Core error types for Grunge
use crate::types::{PlaylistId, TrackId};
use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias using `GrungeError`
pub type Result<T> = std::result::Result<T, GrungeError>;

/// Core error type for Grunge
///
/// Each variant maps to a stable [`code`](GrungeError::code) plus structured
/// [`params`](GrungeError::params), so callers never have to parse messages.
#[derive(Error, Debug)]
pub enum GrungeError {
    /// A playlist entry names a track that does not exist
    #[error("Track with ID {0} does not exist.")]
    TrackNotFound(TrackId),

    /// Two entries of one playlist share a position
    #[error("Duplicate combination of playlist_id and sequence_number for track {track_id}.")]
    DuplicateSequenceNumber {
        track_id: TrackId,
        sequence_number: i32,
    },

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// External identifier already taken
    #[error("{entity} with uuid {id} already exists")]
    Duplicate { entity: String, id: String },

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl GrungeError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a duplicate identifier error
    pub fn duplicate(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::Duplicate {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Playlist lookup failed
    pub fn playlist_not_found(id: PlaylistId) -> Self {
        Self::not_found("playlist", id)
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::TrackNotFound(_) => "track_not_found",
            Self::DuplicateSequenceNumber { .. } => "duplicate_sequence_number",
            Self::NotFound { .. } => "not_found",
            Self::Duplicate { .. } => "duplicate",
            Self::Database(_) => "internal_error",
        }
    }

    /// Parameters the message was built from
    pub fn params(&self) -> Value {
        match self {
            Self::TrackNotFound(track_id) => json!({ "track_id": track_id }),
            Self::DuplicateSequenceNumber {
                track_id,
                sequence_number,
            } => json!({ "track_id": track_id, "sequence_number": sequence_number }),
            Self::NotFound { entity, id } | Self::Duplicate { entity, id } => {
                json!({ "entity": entity, "id": id })
            }
            _ => json!({}),
        }
    }

    /// Whether the caller sent something the store rejected (as opposed to
    /// the store itself failing)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for GrungeError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
