//! Remote playlist service (Spotify Web API).
//!
//! # Architecture
//!
//! Same layering as any external API we talk to:
//! - **DTOs** (`dto.rs`) - Exact API response shapes
//! - **Adapter** (`adapter.rs`) - Converts DTOs to [`crate::model`] types
//! - **Pagination** (`pagination.rs`) - Drains paged listings into one collection
//! - **Clients** (`client.rs`, `auth.rs`) - HTTP clients for the Web API and
//!   the accounts service
//! - **Traits** (`traits.rs`) - The narrow seams the reconciliation core and
//!   the login flow depend on
//!
//! The reconciliation core never sees this module's concrete types, only
//! [`PlaylistService`] and [`TokenExchange`].

mod adapter;
mod auth;
mod client;
pub mod dto;
mod error;
pub mod pagination;
pub mod traits;

pub use auth::SpotifyAuth;
pub use client::SpotifyClient;
pub use error::RemoteError;
pub use traits::{PlaylistService, TokenExchange};
