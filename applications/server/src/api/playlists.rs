/// Playlists API routes
///
/// Create, update and replace take an optional `tracks` list of
/// `{id, sequence_number}` entries that becomes the playlist's entire
/// membership. Storage applies each request in a single transaction, so a
/// rejected list leaves the playlist exactly as it was before the request.
use crate::{
    api::extract::{ApiJson, ApiQuery},
    error::{FieldErrors, Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use grunge_core::{
    storage::CatalogStore,
    types::{
        CreatePlaylist, Page, PageRequest, Playlist, PlaylistEntry, PlaylistId, TrackId,
        UpdatePlaylist,
    },
    GrungeError,
};
use serde::Deserialize;
use serde_json::Value;

const MAX_NAME_LENGTH: usize = 255;

const REQUIRED: &str = "This field is required.";
const INVALID_UUID: &str = "Must be a valid UUID.";

/// Body of every playlist write
///
/// Fields stay untyped JSON so that each bad field is reported under its own
/// name instead of failing the whole body. `null` counts as absent; `uuid`
/// is only read on create.
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistRequest {
    pub uuid: Option<Value>,
    pub name: Option<Value>,
    pub tracks: Option<Value>,
}

/// A request body that passed field validation
#[derive(Debug)]
struct ValidPlaylist {
    uuid: Option<PlaylistId>,
    name: Option<String>,
    tracks: Vec<PlaylistEntry>,
}

impl PlaylistRequest {
    fn validate(self, name_required: bool) -> Result<ValidPlaylist> {
        let mut errors = FieldErrors::new();

        let uuid = self.uuid.and_then(|value| parse_uuid(&mut errors, "uuid", value));
        let name = match self.name {
            Some(value) => parse_name(&mut errors, value),
            None => {
                if name_required {
                    add_error(&mut errors, "name", REQUIRED);
                }
                None
            }
        };
        let tracks = self
            .tracks
            .map(|value| parse_tracks(&mut errors, value))
            .unwrap_or_default();

        if !errors.is_empty() {
            return Err(ServerError::Validation(errors));
        }

        Ok(ValidPlaylist { uuid, name, tracks })
    }
}

fn add_error(errors: &mut FieldErrors, field: impl Into<String>, message: impl Into<String>) {
    errors.entry(field.into()).or_default().push(message.into());
}

fn parse_uuid<T: std::str::FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: Value,
) -> Option<T> {
    let parsed = value.as_str().and_then(|s| s.parse().ok());
    if parsed.is_none() {
        add_error(errors, field, INVALID_UUID);
    }
    parsed
}

fn parse_name(errors: &mut FieldErrors, value: Value) -> Option<String> {
    let Value::String(name) = value else {
        add_error(errors, "name", "Not a valid string.");
        return None;
    };

    match clean_name(&name) {
        Ok(name) => Some(name),
        Err(message) => {
            add_error(errors, "name", message);
            None
        }
    }
}

fn clean_name(name: &str) -> std::result::Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("This field may not be blank.".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_NAME_LENGTH
        ));
    }
    Ok(name.to_string())
}

/// Entry errors are keyed by position, e.g. `tracks[1].sequence_number`
fn parse_tracks(errors: &mut FieldErrors, value: Value) -> Vec<PlaylistEntry> {
    let Value::Array(items) = value else {
        add_error(errors, "tracks", "Expected a list of items.");
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(mut fields) = item else {
            add_error(errors, format!("tracks[{}]", index), "Expected an object.");
            continue;
        };

        let id_field = format!("tracks[{}].id", index);
        let track_id: Option<TrackId> = match fields.remove("id") {
            None | Some(Value::Null) => {
                add_error(errors, id_field, REQUIRED);
                None
            }
            Some(value) => parse_uuid(errors, &id_field, value),
        };

        let sequence_field = format!("tracks[{}].sequence_number", index);
        let sequence_number = match fields.remove("sequence_number") {
            None | Some(Value::Null) => {
                add_error(errors, sequence_field, REQUIRED);
                None
            }
            Some(value) => {
                let number = value.as_i64().and_then(|n| i32::try_from(n).ok());
                if number.is_none() {
                    add_error(errors, sequence_field, "A valid integer is required.");
                }
                number
            }
        };

        if let (Some(track_id), Some(sequence_number)) = (track_id, sequence_number) {
            entries.push(PlaylistEntry::new(track_id, sequence_number));
        }
    }

    entries
}

/// Unparseable ids cannot name an existing playlist
fn parse_id(id: &str) -> Result<PlaylistId> {
    id.parse()
        .map_err(|_| ServerError::from(GrungeError::not_found("playlist", id)))
}

fn log_rejection(action: &str, playlist: PlaylistId, err: &GrungeError) {
    if err.is_client_error() {
        tracing::warn!(%playlist, code = err.code(), "Rejected playlist {}: {}", action, err);
    }
}

/// GET /api/v1/playlists
pub async fn list_playlists(
    State(app_state): State<AppState>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> Result<Json<Page<Playlist>>> {
    let page = app_state.pagination(page);
    let playlists = app_state.db.list_playlists(page).await?;
    Ok(Json(playlists))
}

/// POST /api/v1/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<PlaylistRequest>,
) -> Result<(StatusCode, Json<Playlist>)> {
    let valid = req.validate(true)?;
    let create = CreatePlaylist {
        uuid: valid.uuid.unwrap_or_else(PlaylistId::generate),
        name: valid.name.ok_or_else(|| ServerError::field("name", REQUIRED))?,
        tracks: valid.tracks,
    };
    let uuid = create.uuid;

    let playlist = app_state
        .db
        .create_playlist(create)
        .await
        .map_err(|e| {
            log_rejection("create", uuid, &e);
            match e {
                GrungeError::Duplicate { .. } => {
                    ServerError::field("uuid", "playlist with this uuid already exists.")
                }
                other => other.into(),
            }
        })?;

    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/v1/playlists/:uuid
/// Get playlist details with tracks
pub async fn get_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Playlist>> {
    let playlist_id = parse_id(&id)?;
    let playlist = app_state
        .db
        .get_playlist(playlist_id)
        .await?
        .ok_or_else(|| GrungeError::playlist_not_found(playlist_id))?;

    Ok(Json(playlist))
}

/// PATCH /api/v1/playlists/:uuid
/// Partial update; the track list is replaced regardless
pub async fn update_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<PlaylistRequest>,
) -> Result<Json<Playlist>> {
    apply_update(&app_state, &id, req, false).await
}

/// PUT /api/v1/playlists/:uuid
/// Full update; `name` is required
pub async fn replace_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<PlaylistRequest>,
) -> Result<Json<Playlist>> {
    apply_update(&app_state, &id, req, true).await
}

async fn apply_update(
    app_state: &AppState,
    id: &str,
    req: PlaylistRequest,
    name_required: bool,
) -> Result<Json<Playlist>> {
    let playlist_id = parse_id(id)?;
    let valid = req.validate(name_required)?;
    let update = UpdatePlaylist {
        name: valid.name,
        tracks: valid.tracks,
    };

    let playlist = app_state
        .db
        .update_playlist(playlist_id, update)
        .await
        .map_err(|e| {
            log_rejection("update", playlist_id, &e);
            ServerError::from(e)
        })?;

    Ok(Json(playlist))
}

/// DELETE /api/v1/playlists/:uuid
/// Always 204: deleting something that is not there is not an error
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    if let Ok(playlist_id) = id.parse::<PlaylistId>() {
        app_state.db.delete_playlist(playlist_id).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}
