//! Removal pass shared by the disliked and queue sweeps.
//!
//! Sweeps never fail because of a single track: removal errors are logged
//! and counted, and the pass moves on to the next track.

use tracing::warn;

use crate::model::{Playlist, Track, TrackIdSet};
use crate::spotify::PlaylistService;

/// Outcome of a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Playlists whose snapshot was scanned
    pub playlists_scanned: usize,
    /// Playlists skipped because a snapshot could not be loaded
    pub playlists_skipped: usize,
    /// Successful removal requests
    pub tracks_removed: usize,
    /// Removal requests the service rejected
    pub removals_failed: usize,
}

/// Remove every cached track of `playlist` whose ID is in `targets`.
///
/// Each match is logged at warn level with `reason` before its removal is
/// requested, one track per request.
pub(crate) async fn remove_matching<S: PlaylistService + ?Sized>(
    service: &S,
    playlist: &Playlist,
    cached: &[Track],
    targets: &TrackIdSet,
    reason: &str,
    report: &mut SweepReport,
) {
    report.playlists_scanned += 1;

    for track in cached.iter().filter(|t| targets.contains(t.id_key())) {
        warn!(
            playlist = %playlist.name,
            name = %track.name,
            artist = %track.first_artist(),
            album = %track.album.name,
            id = %track.id_key(),
            "{reason}"
        );

        match service
            .remove_tracks(&playlist.id, &[track.id_key().to_string()])
            .await
        {
            Ok(()) => report.tracks_removed += 1,
            Err(e) => {
                warn!(
                    playlist = %playlist.name,
                    id = %track.id_key(),
                    error = %e,
                    "Failed to remove track, continuing"
                );
                report.removals_failed += 1;
            }
        }
    }
}
