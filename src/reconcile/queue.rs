//! Queue promotion sweep.
//!
//! A queue playlist holds tracks the user has not rated yet, e.g.
//! "Favorites Queue" feeding "Favorites". Once a track shows up in the
//! destination playlist it has been promoted and is removed from the queue.

use tracing::{info, warn};

use super::rules::SweepRules;
use super::sweep::{SweepReport, remove_matching};
use crate::cache::SnapshotStore;
use crate::error::Result;
use crate::model::{Playlist, track_id_set};
use crate::spotify::PlaylistService;

/// Removes promoted tracks from the user's queue playlists.
pub struct QueueSweep<'a, S, C> {
    service: &'a S,
    cache: &'a C,
    rules: &'a SweepRules,
}

impl<'a, S: PlaylistService, C: SnapshotStore> QueueSweep<'a, S, C> {
    pub fn new(service: &'a S, cache: &'a C, rules: &'a SweepRules) -> Self {
        Self {
            service,
            cache,
            rules,
        }
    }

    /// Sweep every queue playlist owned by `current_user`.
    ///
    /// If either the destination or the queue snapshot cannot be loaded the
    /// queue is skipped. Removal failures are logged and skipped.
    pub async fn sweep(&self, playlists: &[Playlist], current_user: &str) -> Result<SweepReport> {
        let mut report = SweepReport::default();

        let eligible = playlists
            .iter()
            .filter(|p| self.rules.is_queue(&p.name))
            .filter(|p| p.owner_id == current_user);

        for playlist in eligible {
            info!(playlist = %playlist.name, "Processing queue playlist");

            let destination = self.rules.destination_name(&playlist.name);
            let promoted = match self.cache.load_snapshot(&destination) {
                Ok(tracks) => track_id_set(&tracks),
                Err(e) => {
                    warn!(
                        playlist = %playlist.name,
                        destination = %destination,
                        error = %e,
                        "Skipping queue, destination snapshot unreadable"
                    );
                    report.playlists_skipped += 1;
                    continue;
                }
            };

            let queued = match self.cache.load_snapshot(&playlist.name) {
                Ok(tracks) => tracks,
                Err(e) => {
                    warn!(playlist = %playlist.name, error = %e, "Skipping queue, snapshot unreadable");
                    report.playlists_skipped += 1;
                    continue;
                }
            };

            remove_matching(
                self.service,
                playlist,
                &queued,
                &promoted,
                "Queue track found in destination playlist",
                &mut report,
            )
            .await;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::traits::mocks::FakePlaylistService;
    use crate::test_utils::{playlist, seeded_cache, track};
    use std::fs;

    fn rules() -> SweepRules {
        SweepRules::new("user", "disliked_", " Queue")
    }

    #[tokio::test]
    async fn test_promoted_track_is_removed_from_queue() {
        let (cache, _dir) = seeded_cache(&[
            ("Favorites", vec![track("T9")]),
            ("Favorites Queue", vec![track("T9"), track("T8")]),
        ]);
        let service = FakePlaylistService::new();
        let rules = rules();
        let playlists = vec![
            playlist("fav", "Favorites", "user", 1),
            playlist("favq", "Favorites Queue", "user", 2),
        ];

        let report = QueueSweep::new(&service, &cache, &rules)
            .sweep(&playlists, "user")
            .await
            .unwrap();

        assert_eq!(
            service.removals(),
            vec![("favq".to_string(), "T9".to_string())]
        );
        assert_eq!(report.tracks_removed, 1);
        assert_eq!(report.playlists_scanned, 1);
    }

    #[tokio::test]
    async fn test_queue_owned_by_someone_else_is_untouched() {
        let (cache, _dir) = seeded_cache(&[
            ("Favorites", vec![track("T9")]),
            ("Favorites Queue", vec![track("T9")]),
        ]);
        let service = FakePlaylistService::new();
        let rules = rules();

        QueueSweep::new(&service, &cache, &rules)
            .sweep(&[playlist("favq", "Favorites Queue", "someone", 1)], "user")
            .await
            .unwrap();

        assert!(service.removals().is_empty());
    }

    #[tokio::test]
    async fn test_missing_destination_removes_nothing() {
        let (cache, _dir) = seeded_cache(&[("Favorites Queue", vec![track("T9")])]);
        let service = FakePlaylistService::new();
        let rules = rules();

        let report = QueueSweep::new(&service, &cache, &rules)
            .sweep(&[playlist("favq", "Favorites Queue", "user", 1)], "user")
            .await
            .unwrap();

        assert!(service.removals().is_empty());
        assert_eq!(report.playlists_scanned, 1);
    }

    #[tokio::test]
    async fn test_unreadable_destination_skips_queue_only() {
        let (cache, _dir) = seeded_cache(&[
            ("Chill", vec![track("T1")]),
            ("Chill Queue", vec![track("T1")]),
            ("Favorites Queue", vec![track("T9")]),
        ]);
        fs::write(cache.snapshot_path("Favorites"), b"{").unwrap();
        let service = FakePlaylistService::new();
        let rules = rules();
        let playlists = vec![
            playlist("favq", "Favorites Queue", "user", 1),
            playlist("chillq", "Chill Queue", "user", 1),
        ];

        let report = QueueSweep::new(&service, &cache, &rules)
            .sweep(&playlists, "user")
            .await
            .unwrap();

        assert_eq!(report.playlists_skipped, 1);
        assert_eq!(
            service.removals(),
            vec![("chillq".to_string(), "T1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unreadable_queue_snapshot_skips_queue_only() {
        let (cache, _dir) = seeded_cache(&[
            ("Favorites", vec![track("T9")]),
            ("Chill", vec![track("T1")]),
            ("Chill Queue", vec![track("T1")]),
        ]);
        fs::write(cache.snapshot_path("Favorites Queue"), b"[{").unwrap();
        let service = FakePlaylistService::new();
        let rules = rules();
        let playlists = vec![
            playlist("favq", "Favorites Queue", "user", 1),
            playlist("chillq", "Chill Queue", "user", 1),
        ];

        let report = QueueSweep::new(&service, &cache, &rules)
            .sweep(&playlists, "user")
            .await
            .unwrap();

        assert_eq!(report.playlists_skipped, 1);
        assert_eq!(report.playlists_scanned, 1);
        assert_eq!(
            service.removals(),
            vec![("chillq".to_string(), "T1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_removal_failure_continues_with_next_track() {
        let (cache, _dir) = seeded_cache(&[
            ("Favorites", vec![track("T1"), track("T2")]),
            ("Favorites Queue", vec![track("T1"), track("T2")]),
        ]);
        let service = FakePlaylistService::new().failing_removal("T1");
        let rules = rules();

        let report = QueueSweep::new(&service, &cache, &rules)
            .sweep(&[playlist("favq", "Favorites Queue", "user", 2)], "user")
            .await
            .unwrap();

        assert_eq!(service.removals().len(), 2);
        assert_eq!(report.removals_failed, 1);
        assert_eq!(report.tracks_removed, 1);
    }
}
