//! Artist types

use super::ArtistId;
use serde::{Deserialize, Serialize};

/// An artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub uuid: ArtistId,
    pub name: String,
}
