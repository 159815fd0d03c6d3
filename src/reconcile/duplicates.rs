//! Duplicate track detection.

use tracing::warn;

use crate::error::Result;
use crate::model::Playlist;

/// Look for tracks duplicated across playlists.
///
/// Placeholder: detection is not implemented yet. Logs a warning and
/// always succeeds.
pub fn find_possible_duplicates(playlists: &[Playlist]) -> Result<()> {
    warn!(
        playlists = playlists.len(),
        "Duplicate track detection not implemented"
    );
    Ok(())
}
