// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod google_identity;
pub mod session;
pub mod sync;
pub mod taxonomy;
pub mod youtube;

pub use google_identity::{GoogleClaims, GoogleIdentityVerifier};
pub use session::SessionStore;
pub use sync::{LoginOutcome, SyncService};
pub use taxonomy::ThemeService;
pub use youtube::YouTubeClient;
