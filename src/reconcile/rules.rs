//! Naming conventions that select playlists for each sweep.

/// Explicit settings handed to the synchronizer and sweeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRules {
    /// The authenticated user; only their playlists are swept
    pub username: String,
    /// Playlists whose name starts with this hold disliked tracks (ex: `disliked_`)
    pub disliked_prefix: String,
    /// Playlists whose name ends with this are queues (ex: ` Queue`)
    pub queue_suffix: String,
}

impl SweepRules {
    pub fn new(
        username: impl Into<String>,
        disliked_prefix: impl Into<String>,
        queue_suffix: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            disliked_prefix: disliked_prefix.into(),
            queue_suffix: queue_suffix.into(),
        }
    }

    /// Whether a playlist name denotes a disliked-track bin.
    pub fn is_disliked(&self, playlist_name: &str) -> bool {
        playlist_name.starts_with(&self.disliked_prefix)
    }

    /// Whether a playlist name denotes a queue.
    pub fn is_queue(&self, playlist_name: &str) -> bool {
        playlist_name.ends_with(&self.queue_suffix)
    }

    /// Name of the playlist a queue promotes into.
    ///
    /// Removes the first occurrence of the suffix, which is not necessarily
    /// the trailing one.
    pub fn destination_name(&self, queue_name: &str) -> String {
        queue_name.replacen(&self.queue_suffix, "", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> SweepRules {
        SweepRules::new("user", "disliked_", " Queue")
    }

    #[test]
    fn test_disliked_prefix() {
        assert!(rules().is_disliked("disliked_rock"));
        assert!(!rules().is_disliked("rock disliked_"));
    }

    #[test]
    fn test_queue_suffix() {
        assert!(rules().is_queue("Favorites Queue"));
        assert!(!rules().is_queue("Queue Favorites"));
    }

    #[test]
    fn test_destination_name() {
        assert_eq!(rules().destination_name("Favorites Queue"), "Favorites");
    }

    #[test]
    fn test_destination_strips_first_occurrence_only() {
        assert_eq!(
            rules().destination_name("Old Queue Jams Queue"),
            "Old Jams Queue"
        );
    }
}
