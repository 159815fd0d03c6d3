//! Reconciler - orchestrates a full sweep run
//!
//! 1. List the user's playlists
//! 2. Refresh stale snapshots
//! 3. Resolve the disliked set from the cache
//! 4. Sweep disliked tracks out of the user's playlists
//! 5. Sweep promoted tracks out of queue playlists
//! 6. Look for duplicates (placeholder)
//!
//! Steps 1-3 abort the run on failure; the sweeps only log their failures.

use tracing::info;

use super::disliked::DislikedSweep;
use super::duplicates::find_possible_duplicates;
use super::queue::QueueSweep;
use super::rules::SweepRules;
use super::sweep::SweepReport;
use super::sync::{CacheSynchronizer, SyncReport};
use crate::cache::SnapshotStore;
use crate::error::{Result, ResultExt};
use crate::spotify::PlaylistService;

/// Summary of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub playlists: usize,
    pub sync: SyncReport,
    /// Disliked tracks found across all disliked playlists (with duplicates)
    pub disliked_tracks: usize,
    pub disliked: SweepReport,
    pub queue: SweepReport,
}

/// Runs every reconciliation step in order against one service and cache
pub struct Reconciler<S, C> {
    service: S,
    cache: C,
    rules: SweepRules,
}

impl<S: PlaylistService, C: SnapshotStore> Reconciler<S, C> {
    pub fn new(service: S, cache: C, rules: SweepRules) -> Self {
        Self {
            service,
            cache,
            rules,
        }
    }

    /// Run all steps sequentially.
    pub async fn run(&self) -> Result<RunSummary> {
        let user = self.rules.username.as_str();

        let playlists = self
            .service
            .list_playlists(user)
            .await
            .with_context(format!("listing playlists for {}", user))?;

        let sync = CacheSynchronizer::new(&self.service, &self.cache)
            .synchronize(&playlists)
            .await?;

        let disliked_sweep = DislikedSweep::new(&self.service, &self.cache, &self.rules);
        let disliked_tracks = disliked_sweep.resolve(&playlists)?;
        let disliked = disliked_sweep
            .sweep(&playlists, &disliked_tracks, user)
            .await?;

        let queue = QueueSweep::new(&self.service, &self.cache, &self.rules)
            .sweep(&playlists, user)
            .await?;

        find_possible_duplicates(&playlists)?;

        let summary = RunSummary {
            playlists: playlists.len(),
            sync,
            disliked_tracks: disliked_tracks.len(),
            disliked,
            queue,
        };
        info!(
            playlists = summary.playlists,
            refreshed = summary.sync.refreshed,
            disliked_removed = summary.disliked.tracks_removed,
            queue_removed = summary.queue.tracks_removed,
            failed = summary.disliked.removals_failed + summary.queue.removals_failed,
            "Done processing"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::RemoteError;
    use crate::spotify::traits::mocks::FakePlaylistService;
    use crate::test_utils::{playlist, seeded_cache, track};

    fn rules() -> SweepRules {
        SweepRules::new("user", "disliked_", " Queue")
    }

    #[tokio::test]
    async fn test_full_run_against_empty_cache() {
        let (cache, _dir) = seeded_cache(&[]);
        let service = FakePlaylistService::new()
            .with_playlist(playlist("d1", "disliked_all", "user", 1), vec![track("T1")])
            .with_playlist(
                playlist("pl1", "Mix", "user", 3),
                vec![track("T1"), track("T2"), track("T9")],
            )
            .with_playlist(playlist("fav", "Favorites", "user", 1), vec![track("T9")])
            .with_playlist(
                playlist("favq", "Favorites Queue", "user", 2),
                vec![track("T9"), track("T8")],
            )
            .with_playlist(playlist("x", "Theirs", "someone", 1), vec![track("T1")]);

        let reconciler = Reconciler::new(service, cache, rules());
        let summary = reconciler.run().await.unwrap();

        assert_eq!(summary.playlists, 5);
        assert_eq!(summary.sync.refreshed, 5);
        assert_eq!(summary.disliked_tracks, 1);
        assert_eq!(summary.disliked.tracks_removed, 1);
        assert_eq!(summary.queue.tracks_removed, 1);
        assert_eq!(
            reconciler.service.removals(),
            vec![
                ("pl1".to_string(), "T1".to_string()),
                ("favq".to_string(), "T9".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_sweeps_read_the_cache_not_the_service() {
        // Counts match, so the stale cache wins over the live tracks
        let (cache, _dir) = seeded_cache(&[
            ("disliked_all", vec![track("OLD")]),
            ("Mix", vec![track("OLD")]),
        ]);
        let service = FakePlaylistService::new()
            .with_playlist(playlist("d1", "disliked_all", "user", 1), vec![track("NEW")])
            .with_playlist(playlist("pl1", "Mix", "user", 1), vec![track("NEW")]);

        let reconciler = Reconciler::new(service, cache, rules());
        reconciler.run().await.unwrap();

        assert!(reconciler.service.fetched().is_empty());
        assert_eq!(
            reconciler.service.removals(),
            vec![("pl1".to_string(), "OLD".to_string())]
        );
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_run() {
        let (cache, _dir) = seeded_cache(&[]);
        let service =
            FakePlaylistService::new().with_list_error(RemoteError::Network("down".into()));

        let reconciler = Reconciler::new(service, cache, rules());

        assert!(reconciler.run().await.is_err());
        assert!(reconciler.service.removals().is_empty());
    }

    #[tokio::test]
    async fn test_removal_failures_do_not_fail_run() {
        let (cache, _dir) = seeded_cache(&[]);
        let service = FakePlaylistService::new()
            .with_playlist(playlist("d1", "disliked_all", "user", 1), vec![track("T1")])
            .with_playlist(playlist("pl1", "Mix", "user", 1), vec![track("T1")])
            .failing_removal("T1");

        let reconciler = Reconciler::new(service, cache, rules());
        let summary = reconciler.run().await.unwrap();

        assert_eq!(summary.disliked.removals_failed, 1);
        assert_eq!(summary.disliked.tracks_removed, 0);
    }
}
