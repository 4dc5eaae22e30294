//! Filtering and pagination for list endpoints

use super::{AlbumId, ArtistId};
use serde::{Deserialize, Serialize};

/// Exact-match artist filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistFilter {
    pub name: Option<String>,
}

/// Exact-match album filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumFilter {
    pub name: Option<String>,
    pub artist: Option<ArtistId>,
}

/// Exact-match track filter; `artist` matches the album's artist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackFilter {
    pub name: Option<String>,
    pub album: Option<AlbumId>,
    pub artist: Option<ArtistId>,
}

/// Pagination as requested by a client (`?limit=&offset=`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageRequest {
    /// Resolve against the configured page sizes
    ///
    /// A missing or non-positive limit falls back to `default_limit`; larger
    /// limits are capped at `max_limit`. Negative offsets become zero.
    pub fn resolve(self, default_limit: i64, max_limit: i64) -> Pagination {
        let limit = match self.limit {
            Some(limit) if limit > 0 => limit.min(max_limit),
            _ => default_limit,
        };

        Pagination {
            limit,
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

/// Resolved window applied as `LIMIT`/`OFFSET`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// One page of results plus the unpaginated total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: i64,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_limit_uses_default() {
        let page = PageRequest::default().resolve(50, 500);
        assert_eq!(page, Pagination { limit: 50, offset: 0 });
    }

    #[test]
    fn limit_is_capped() {
        let page = PageRequest {
            limit: Some(10_000),
            offset: Some(20),
        }
        .resolve(50, 500);
        assert_eq!(page, Pagination { limit: 500, offset: 20 });
    }

    #[test]
    fn non_positive_values_are_normalized() {
        let page = PageRequest {
            limit: Some(0),
            offset: Some(-5),
        }
        .resolve(25, 500);
        assert_eq!(page, Pagination { limit: 25, offset: 0 });
    }
}
