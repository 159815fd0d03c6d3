//! Disliked-track propagation.
//!
//! Every playlist whose name starts with the disliked prefix is a deny-list.
//! Tracks found in any of them are removed from all other playlists the
//! current user owns. Membership is decided from cached snapshots only.

use tracing::{info, warn};

use super::rules::SweepRules;
use super::sweep::{SweepReport, remove_matching};
use crate::cache::SnapshotStore;
use crate::error::{Result, ResultExt};
use crate::model::{Playlist, Track, track_id_set};
use crate::spotify::PlaylistService;

/// Resolves the disliked set and sweeps it out of the user's playlists.
pub struct DislikedSweep<'a, S, C> {
    service: &'a S,
    cache: &'a C,
    rules: &'a SweepRules,
}

impl<'a, S: PlaylistService, C: SnapshotStore> DislikedSweep<'a, S, C> {
    pub fn new(service: &'a S, cache: &'a C, rules: &'a SweepRules) -> Self {
        Self {
            service,
            cache,
            rules,
        }
    }

    /// Collect the cached tracks of every disliked playlist.
    ///
    /// Duplicates are kept; they collapse when the ID set is built. Any load
    /// failure aborts.
    pub fn resolve(&self, playlists: &[Playlist]) -> Result<Vec<Track>> {
        info!("Building list of all disliked tracks");
        let mut disliked = Vec::new();

        for playlist in playlists.iter().filter(|p| self.rules.is_disliked(&p.name)) {
            let tracks = self
                .cache
                .load_snapshot(&playlist.name)
                .with_context(format!("loading disliked playlist {}", playlist.name))?;
            disliked.extend(tracks);
        }

        info!(tracks = disliked.len(), "Loaded disliked tracks");
        Ok(disliked)
    }

    /// Remove disliked tracks from every eligible playlist.
    ///
    /// A playlist is eligible when it is not itself a disliked playlist and
    /// is owned by `current_user`. Load and removal failures are logged and
    /// skipped, never returned.
    pub async fn sweep(
        &self,
        playlists: &[Playlist],
        disliked: &[Track],
        current_user: &str,
    ) -> Result<SweepReport> {
        info!("Scanning playlists for disliked tracks");
        let targets = track_id_set(disliked);
        let mut report = SweepReport::default();

        let eligible = playlists
            .iter()
            .filter(|p| !self.rules.is_disliked(&p.name))
            .filter(|p| p.owner_id == current_user);

        for playlist in eligible {
            info!(playlist = %playlist.name, "Scanning playlist for disliked tracks");

            let cached = match self.cache.load_snapshot(&playlist.name) {
                Ok(cached) => cached,
                Err(e) => {
                    warn!(playlist = %playlist.name, error = %e, "Skipping playlist, snapshot unreadable");
                    report.playlists_skipped += 1;
                    continue;
                }
            };

            remove_matching(
                self.service,
                playlist,
                &cached,
                &targets,
                "Disliked track found",
                &mut report,
            )
            .await;
        }

        Ok(report)
    }
}
