// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Channel, Subscription, Theme, User};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user))
        .route("/api/subscriptions", get(get_subscriptions))
        .route("/api/subscriptions/reload", post(reload_subscriptions))
        .route("/api/themes", get(list_themes).post(create_theme))
        .route(
            "/api/themes/{theme_id}",
            get(get_theme).put(rename_theme).delete(delete_theme),
        )
        .route(
            "/api/themes/{theme_id}/channels",
            get(list_channels).post(add_channel),
        )
        .route(
            "/api/themes/{theme_id}/channels/{channel_id}",
            get(get_channel).delete(remove_channel),
        )
        .route("/api/logout", post(logout))
}

// ─── Response Types ──────────────────────────────────────────

/// User profile response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Channel entry within a theme.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChannelResponse {
    pub channel_id: String,
    pub channel_name: String,
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self {
            channel_id: channel.channel_id,
            channel_name: channel.channel_name,
        }
    }
}

/// Theme with its channel set.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ThemeResponse {
    pub id: String,
    pub name: String,
    pub channels: Vec<ChannelResponse>,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id,
            name: theme.name,
            channels: theme.channels.into_iter().map(ChannelResponse::from).collect(),
        }
    }
}

fn themes_response(themes: Vec<Theme>) -> Vec<ThemeResponse> {
    themes.into_iter().map(ThemeResponse::from).collect()
}

// ─── Users ───────────────────────────────────────────────────

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state.db.get_user(&user.user_id).await?.ok_or_else(|| {
        crate::error::AppError::NotFound(format!("User {}", user.user_id))
    })?;

    Ok(Json(UserResponse::from(profile)))
}

/// List all registered users.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get one user by id.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .db
        .get_user(&id)
        .await?
        .ok_or_else(|| crate::error::AppError::NotFound(format!("User {}", id)))?;

    Ok(Json(UserResponse::from(profile)))
}

// ─── Subscriptions ───────────────────────────────────────────

#[derive(Deserialize)]
struct ReloadRequest {
    /// YouTube-scoped OAuth access token from the frontend.
    access_token: String,
}

/// Get the session's current subscription collection.
///
/// Empty until the first reload of this session.
async fn get_subscriptions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Subscription>>> {
    Ok(Json(state.sync_service.subscriptions(&user.user_id)))
}

/// Re-fetch the complete subscription list and replace the session's copy.
///
/// On failure nothing is replaced; the previously fetched collection stays
/// as it was and the client may retry explicitly.
async fn reload_subscriptions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ReloadRequest>,
) -> Result<Json<Vec<Subscription>>> {
    if body.access_token.trim().is_empty() {
        return Err(crate::error::AppError::BadRequest(
            "access_token must not be empty".to_string(),
        ));
    }

    tracing::debug!(user_id = %user.user_id, "Reloading subscriptions");

    let subscriptions = state
        .sync_service
        .reload(&user.user_id, &body.access_token)
        .await?;

    Ok(Json(subscriptions))
}

// ─── Themes ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct ThemeNameRequest {
    name: String,
}

/// List the caller's themes.
async fn list_themes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ThemeResponse>>> {
    let themes = state.theme_service.list_themes(&user.user_id).await?;
    Ok(Json(themes_response(themes)))
}

/// Create a theme with an empty channel set.
async fn create_theme(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ThemeNameRequest>,
) -> Result<Json<ThemeResponse>> {
    let theme = state
        .theme_service
        .create_theme(&user.user_id, &body.name)
        .await?;
    Ok(Json(ThemeResponse::from(theme)))
}

/// Get one theme.
async fn get_theme(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(theme_id): Path<String>,
) -> Result<Json<ThemeResponse>> {
    let theme = state
        .theme_service
        .get_theme(&user.user_id, &theme_id)
        .await?;
    Ok(Json(ThemeResponse::from(theme)))
}

/// Rename a theme; id and channels are untouched.
async fn rename_theme(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(theme_id): Path<String>,
    Json(body): Json<ThemeNameRequest>,
) -> Result<Json<ThemeResponse>> {
    let theme = state
        .theme_service
        .rename_theme(&user.user_id, &theme_id, &body.name)
        .await?;
    Ok(Json(ThemeResponse::from(theme)))
}

/// Delete a theme; responds with the remaining themes.
async fn delete_theme(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(theme_id): Path<String>,
) -> Result<Json<Vec<ThemeResponse>>> {
    let remaining = state
        .theme_service
        .delete_theme(&user.user_id, &theme_id)
        .await?;
    Ok(Json(themes_response(remaining)))
}

// ─── Channels ────────────────────────────────────────────────

#[derive(Deserialize)]
struct AddChannelRequest {
    channel_id: String,
    channel_name: String,
}

/// List a theme's channels.
async fn list_channels(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(theme_id): Path<String>,
) -> Result<Json<Vec<ChannelResponse>>> {
    let theme = state
        .theme_service
        .get_theme(&user.user_id, &theme_id)
        .await?;
    Ok(Json(
        theme.channels.into_iter().map(ChannelResponse::from).collect(),
    ))
}

/// Add a channel to a theme. Adding an existing member is a no-op.
async fn add_channel(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(theme_id): Path<String>,
    Json(body): Json<AddChannelRequest>,
) -> Result<Json<ThemeResponse>> {
    let theme = state
        .theme_service
        .add_channel(&user.user_id, &theme_id, &body.channel_id, &body.channel_name)
        .await?;
    Ok(Json(ThemeResponse::from(theme)))
}

/// Get one channel within a theme.
async fn get_channel(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((theme_id, channel_id)): Path<(String, String)>,
) -> Result<Json<ChannelResponse>> {
    let channel = state
        .theme_service
        .get_channel(&user.user_id, &theme_id, &channel_id)
        .await?;
    Ok(Json(ChannelResponse::from(channel)))
}

/// Remove a channel from a theme. A non-member id is a no-op.
async fn remove_channel(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((theme_id, channel_id)): Path<(String, String)>,
) -> Result<Json<ThemeResponse>> {
    let theme = state
        .theme_service
        .remove_channel(&user.user_id, &theme_id, &channel_id)
        .await?;
    Ok(Json(ThemeResponse::from(theme)))
}

// ─── Logout ──────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogoutResponse {
    pub success: bool,
}

/// End the session, dropping its subscription collection.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<LogoutResponse> {
    state.sync_service.logout(&user.user_id);
    Json(LogoutResponse { success: true })
}
