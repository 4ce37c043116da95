// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and reload orchestration.
//!
//! Login: verify the ID token, resolve the durable user record, load that
//! user's themes, start a fresh session. Reload: fetch the complete
//! subscription collection and install it into the session that requested
//! it. Neither path retries; every sub-component failure propagates to the
//! caller with its own kind.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Subscription, Theme, User};
use crate::services::google_identity::GoogleIdentityVerifier;
use crate::services::session::SessionStore;
use crate::services::youtube::YouTubeClient;
use std::sync::Arc;

/// Composite result of a login: the resolved user plus their taxonomy.
/// Subscriptions start empty and are fetched by an explicit reload.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub themes: Vec<Theme>,
}

/// Orchestrates identity verification, the user store and subscription sync.
#[derive(Clone)]
pub struct SyncService {
    verifier: Arc<GoogleIdentityVerifier>,
    youtube: YouTubeClient,
    db: FirestoreDb,
    sessions: SessionStore,
}

impl SyncService {
    pub fn new(
        verifier: Arc<GoogleIdentityVerifier>,
        youtube: YouTubeClient,
        db: FirestoreDb,
        sessions: SessionStore,
    ) -> Self {
        Self {
            verifier,
            youtube,
            db,
            sessions,
        }
    }

    /// Sign a user in from a Google ID token.
    ///
    /// Registration is idempotent: the first login for a subject creates the
    /// record, every later one resolves to it unmodified.
    pub async fn login(&self, id_token: &str) -> Result<LoginOutcome, AppError> {
        let claims = self.verifier.verify_id_token(id_token).await?;

        let candidate = User {
            id: claims.subject,
            name: claims.name,
            email: claims.email,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let user = self.db.find_or_create_user(&candidate).await?;

        let themes = self.db.list_themes(&user.id).await?;
        self.sessions.begin(&user.id);

        tracing::info!(user_id = %user.id, themes = themes.len(), "Login complete");
        Ok(LoginOutcome { user, themes })
    }

    /// Rebuild the session's subscription collection from upstream.
    ///
    /// The fetch result replaces the collection wholesale, but only if the
    /// session is still the one that initiated the reload; a logout or
    /// re-login mid-fetch discards it. The fetched list is returned to the
    /// caller either way.
    pub async fn reload(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<Vec<Subscription>, AppError> {
        let epoch = self.sessions.ensure(user_id);

        let subscriptions = self.youtube.list_all_subscriptions(access_token).await?;

        if !self
            .sessions
            .install_if_current(user_id, epoch, subscriptions.clone())
        {
            tracing::debug!(user_id, "Session moved on during fetch; result not installed");
        }

        Ok(subscriptions)
    }

    /// The session's current subscription collection.
    pub fn subscriptions(&self, user_id: &str) -> Vec<Subscription> {
        self.sessions.subscriptions(user_id)
    }

    /// End the user's session, dropping its subscription collection.
    pub fn logout(&self, user_id: &str) {
        self.sessions.end(user_id);
        tracing::info!(user_id, "Session ended");
    }
}
