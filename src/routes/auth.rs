// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration route.
//!
//! Sign-in happens on the frontend via Google Sign-In; the client posts the
//! resulting ID token here. We verify it, resolve (or create) the durable
//! user record, and hand back a session JWT plus the user's taxonomy. The
//! subscription collection starts empty; the client triggers an explicit
//! reload to populate it.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::create_jwt;
use crate::models::Subscription;
use crate::routes::api::{ThemeResponse, UserResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/register", post(register))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    /// Google-issued ID token from the frontend sign-in flow.
    id_token: String,
}

/// Composite login result: session token, user, taxonomy, empty subscriptions.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: UserResponse,
    pub themes: Vec<ThemeResponse>,
    /// Always empty at login; filled by an explicit reload.
    pub subscriptions: Vec<Subscription>,
}

/// Register or sign in a user from a verified Google ID token.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let outcome = state.sync_service.login(&body.id_token).await?;

    let token = create_jwt(&outcome.user.id, &state.config.jwt_signing_key)
        .map_err(|e| crate::error::AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok(Json(RegisterResponse {
        token,
        user: UserResponse::from(outcome.user),
        themes: outcome.themes.into_iter().map(ThemeResponse::from).collect(),
        subscriptions: Vec::new(),
    }))
}
