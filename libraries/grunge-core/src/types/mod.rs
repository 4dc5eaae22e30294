mod album;
mod artist;
mod ids;
mod import;
mod playlist;
mod query;
mod track;

pub use album::{Album, AlbumSummary};
pub use artist::Artist;
pub use ids::{AlbumId, ArtistId, PlaylistId, TrackId};
pub use import::{CatalogImport, ImportAlbum, ImportArtist, ImportSummary, ImportTrack};
pub use playlist::{CreatePlaylist, Playlist, PlaylistEntry, PlaylistTrack, UpdatePlaylist};
pub use query::{AlbumFilter, ArtistFilter, Page, PageRequest, Pagination, TrackFilter};
pub use track::{Track, TrackSummary};
