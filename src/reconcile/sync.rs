//! Cache synchronization.
//!
//! Refreshes snapshots whose cached length differs from the playlist's
//! declared track count. Equal counts are taken to mean "unchanged", so a
//! playlist where one track was swapped for another is not refetched.

use tracing::{debug, info};

use crate::cache::SnapshotStore;
use crate::error::{Result, ResultExt};
use crate::model::Playlist;
use crate::spotify::PlaylistService;

/// Outcome of a synchronization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Snapshots fetched and rewritten
    pub refreshed: usize,
    /// Snapshots left alone because the counts matched
    pub unchanged: usize,
}

/// Brings cached snapshots up to date with the remote playlists.
pub struct CacheSynchronizer<'a, S, C> {
    service: &'a S,
    cache: &'a C,
}

impl<'a, S: PlaylistService, C: SnapshotStore> CacheSynchronizer<'a, S, C> {
    pub fn new(service: &'a S, cache: &'a C) -> Self {
        Self { service, cache }
    }

    /// Refresh every stale snapshot.
    ///
    /// Fails fast: the first load, fetch or save error aborts the pass and
    /// leaves the remaining playlists untouched.
    pub async fn synchronize(&self, playlists: &[Playlist]) -> Result<SyncReport> {
        info!(playlists = playlists.len(), "Updating local cache of playlists");
        let mut report = SyncReport::default();

        for playlist in playlists {
            let cached = self
                .cache
                .load_snapshot(&playlist.name)
                .with_context(format!("loading snapshot for {}", playlist.name))?;

            if cached.len() == playlist.track_count {
                debug!(playlist = %playlist.name, tracks = cached.len(), "Snapshot up to date");
                report.unchanged += 1;
                continue;
            }

            info!(
                playlist = %playlist.name,
                cached = cached.len(),
                live = playlist.track_count,
                "Detected changes in playlist"
            );
            let tracks = self
                .service
                .list_tracks(&playlist.id)
                .await
                .with_context(format!("fetching tracks for {}", playlist.name))?;

            self.cache.save_snapshot(&playlist.name, &tracks)?;
            report.refreshed += 1;
            info!(playlist = %playlist.name, tracks = tracks.len(), "Done updating cache");
        }

        Ok(report)
    }
}
