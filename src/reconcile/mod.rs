//! Playlist reconciliation - keeps playlists in line with the user's conventions.
//!
//! # Policies
//!
//! - **Disliked propagation**: tracks in any playlist named with the disliked
//!   prefix are removed from every other playlist the user owns.
//! - **Queue promotion**: tracks in a queue playlist (named with the queue
//!   suffix) are removed once they appear in the destination playlist (the
//!   same name without the suffix).
//! - **Duplicates**: not implemented yet.
//!
//! All decisions are made from the local snapshot cache, refreshed first by
//! [`CacheSynchronizer`]. A run is deterministic for a fixed cache.
//!
//! # Usage
//!
//! ```ignore
//! let rules = SweepRules::new("user", "disliked_", " Queue");
//! let reconciler = Reconciler::new(client, TrackCache::new(cache_dir), rules);
//! let summary = reconciler.run().await?;
//! ```

pub mod disliked;
pub mod duplicates;
pub mod queue;
pub mod rules;
pub mod service;
pub mod sweep;
pub mod sync;

pub use disliked::DislikedSweep;
pub use duplicates::find_possible_duplicates;
pub use queue::QueueSweep;
pub use rules::SweepRules;
pub use service::{Reconciler, RunSummary};
pub use sweep::SweepReport;
pub use sync::{CacheSynchronizer, SyncReport};
