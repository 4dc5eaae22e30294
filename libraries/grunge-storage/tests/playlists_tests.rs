//! Integration tests for playlists vertical slice
//!
//! Tests playlist operations including:
//! - Create/update with an embedded track list
//! - Full replacement of membership on update
//! - Rollback of every write when a track list is rejected
//! - Idempotent delete with cascading membership removal


use grunge_core::{types::*, GrungeError};
use grunge_storage::playlists;
use test_helpers::*;

fn create_request(name: &str, tracks: Vec<PlaylistEntry>) -> CreatePlaylist {
    CreatePlaylist {
        uuid: PlaylistId::generate(),
        name: name.to_string(),
        tracks,
    }
}

#[tokio::test]
async fn test_create_playlist_with_tracks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 2).await;

    let playlist = playlists::create(
        pool,
        create_request(
            "P",
            vec![
                PlaylistEntry::new(tracks[0], 1),
                PlaylistEntry::new(tracks[1], 2),
            ],
        ),
    )
    .await
    .expect("Failed to create playlist");

    assert_eq!(playlist.name, "P");
    assert_eq!(playlist.track_ids(), tracks);
    assert_eq!(playlist.tracks[0].sequence_number, 1);
    assert_eq!(playlist.tracks[1].sequence_number, 2);
    assert_eq!(playlist.tracks[0].name, "Track 1");

    // Retrieve by uuid
    let retrieved = playlists::get_by_id(pool, playlist.uuid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(retrieved, playlist);
}

#[tokio::test]
async fn test_tracks_are_ordered_by_sequence_number_not_input_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 3).await;

    let playlist = playlists::create(
        pool,
        create_request(
            "Shuffled",
            vec![
                PlaylistEntry::new(tracks[0], 30),
                PlaylistEntry::new(tracks[1], 10),
                PlaylistEntry::new(tracks[2], 20),
            ],
        ),
    )
    .await
    .unwrap();

    assert_eq!(playlist.track_ids(), vec![tracks[1], tracks[2], tracks[0]]);
}

#[tokio::test]
async fn test_same_track_may_appear_at_two_positions() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 1).await;

    let playlist = playlists::create(
        pool,
        create_request(
            "Repeat",
            vec![
                PlaylistEntry::new(tracks[0], 1),
                PlaylistEntry::new(tracks[0], 2),
            ],
        ),
    )
    .await
    .unwrap();

    assert_eq!(playlist.tracks.len(), 2);
}

#[tokio::test]
async fn test_create_with_missing_track_persists_nothing() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 1).await;
    let missing = TrackId::generate();

    let result = playlists::create(
        pool,
        create_request(
            "Broken",
            vec![
                PlaylistEntry::new(tracks[0], 1),
                PlaylistEntry::new(missing, 2),
            ],
        ),
    )
    .await;

    match result {
        Err(GrungeError::TrackNotFound(id)) => assert_eq!(id, missing),
        other => panic!("expected TrackNotFound, got {:?}", other),
    }

    // The first association and the playlist row were rolled back
    assert_eq!(count_playlist_tracks(pool).await, 0);
    assert_eq!(count_playlists(pool).await, 0);
}

#[tokio::test]
async fn test_create_with_duplicate_sequence_number_persists_nothing() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 2).await;

    let result = playlists::create(
        pool,
        create_request(
            "Clash",
            vec![
                PlaylistEntry::new(tracks[0], 1),
                PlaylistEntry::new(tracks[1], 1),
            ],
        ),
    )
    .await;

    match result {
        Err(GrungeError::DuplicateSequenceNumber {
            track_id,
            sequence_number,
        }) => {
            assert_eq!(track_id, tracks[1]);
            assert_eq!(sequence_number, 1);
        }
        other => panic!("expected DuplicateSequenceNumber, got {:?}", other),
    }

    assert_eq!(count_playlist_tracks(pool).await, 0);
    assert_eq!(count_playlists(pool).await, 0);
}

#[tokio::test]
async fn test_missing_track_reported_before_later_duplicate() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 2).await;
    let missing = TrackId::generate();

    // Entries are applied in input order, so the unknown track wins
    let result = playlists::create(
        pool,
        create_request(
            "Order",
            vec![
                PlaylistEntry::new(tracks[0], 1),
                PlaylistEntry::new(missing, 2),
                PlaylistEntry::new(tracks[1], 1),
            ],
        ),
    )
    .await;

    assert!(matches!(result, Err(GrungeError::TrackNotFound(id)) if id == missing));
}

#[tokio::test]
async fn test_create_with_taken_uuid_is_duplicate() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = playlists::create(pool, create_request("First", vec![]))
        .await
        .unwrap();

    let result = playlists::create(
        pool,
        CreatePlaylist {
            uuid: first.uuid,
            name: "Second".to_string(),
            tracks: vec![],
        },
    )
    .await;

    assert!(matches!(result, Err(GrungeError::Duplicate { .. })));
    assert_eq!(count_playlists(pool).await, 1);
}

#[tokio::test]
async fn test_update_replaces_all_tracks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 4).await;

    let playlist = playlists::create(
        pool,
        create_request(
            "Before",
            vec![
                PlaylistEntry::new(tracks[0], 1),
                PlaylistEntry::new(tracks[1], 2),
            ],
        ),
    )
    .await
    .unwrap();

    let updated = playlists::update(
        pool,
        playlist.uuid,
        UpdatePlaylist {
            name: Some("After".to_string()),
            tracks: vec![
                PlaylistEntry::new(tracks[3], 1),
                PlaylistEntry::new(tracks[2], 2),
            ],
        },
    )
    .await
    .expect("Failed to update playlist");

    assert_eq!(updated.name, "After");
    assert_eq!(updated.track_ids(), vec![tracks[3], tracks[2]]);
    assert_eq!(count_playlist_tracks(pool).await, 2);
}

#[tokio::test]
async fn test_update_without_tracks_clears_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 2).await;

    let playlist = playlists::create(
        pool,
        create_request(
            "Full",
            vec![
                PlaylistEntry::new(tracks[0], 1),
                PlaylistEntry::new(tracks[1], 2),
            ],
        ),
    )
    .await
    .unwrap();

    let updated = playlists::update(pool, playlist.uuid, UpdatePlaylist::default())
        .await
        .unwrap();

    // Name untouched, membership gone
    assert_eq!(updated.name, "Full");
    assert!(updated.tracks.is_empty());
    assert_eq!(count_playlist_tracks(pool).await, 0);
}

#[tokio::test]
async fn test_failed_update_keeps_previous_state() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 2).await;

    let playlist = playlists::create(
        pool,
        create_request(
            "Stable",
            vec![
                PlaylistEntry::new(tracks[0], 1),
                PlaylistEntry::new(tracks[1], 2),
            ],
        ),
    )
    .await
    .unwrap();

    let result = playlists::update(
        pool,
        playlist.uuid,
        UpdatePlaylist {
            name: Some("Renamed".to_string()),
            tracks: vec![
                PlaylistEntry::new(tracks[1], 1),
                PlaylistEntry::new(TrackId::generate(), 2),
            ],
        },
    )
    .await;
    assert!(matches!(result, Err(GrungeError::TrackNotFound(_))));

    let current = playlists::get_by_id(pool, playlist.uuid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current, playlist);
}

#[tokio::test]
async fn test_update_unknown_playlist_is_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let result = playlists::update(pool, PlaylistId::generate(), UpdatePlaylist::default()).await;

    assert!(matches!(result, Err(GrungeError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_playlist_cascades_to_memberships() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 1).await;
    let playlist = playlists::create(
        pool,
        create_request("To Delete", vec![PlaylistEntry::new(tracks[0], 1)]),
    )
    .await
    .unwrap();

    let deleted = playlists::delete(pool, playlist.uuid)
        .await
        .expect("Failed to delete playlist");
    assert!(deleted);

    // Playlist should be gone
    assert!(playlists::get_by_id(pool, playlist.uuid)
        .await
        .unwrap()
        .is_none());

    // Verify playlist_tracks entries deleted (cascade)
    assert_eq!(count_playlist_tracks(pool).await, 0);

    // Track should still exist
    assert!(grunge_storage::tracks::get_by_id(pool, tracks[0])
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_delete_unknown_playlist_is_noop() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let deleted = playlists::delete(pool, PlaylistId::generate())
        .await
        .expect("Delete of unknown playlist should succeed");

    assert!(!deleted);
}

#[tokio::test]
async fn test_list_playlists_paginates_and_loads_tracks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let tracks = create_test_tracks(pool, 1).await;
    for n in 0..3 {
        playlists::create(
            pool,
            create_request(&format!("P{}", n), vec![PlaylistEntry::new(tracks[0], 1)]),
        )
        .await
        .unwrap();
    }

    let page = playlists::get_all(pool, Pagination { limit: 2, offset: 1 })
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].name, "P1");
    assert_eq!(page.results[1].name, "P2");
    assert!(page.results.iter().all(|p| p.tracks.len() == 1));
}
