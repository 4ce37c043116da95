// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Theme taxonomy operations.
//!
//! All operations are scoped to `(user_id, theme_id)`; referencing a theme
//! that does not exist under that user fails with `NotFound` and leaves
//! stored state untouched. Channel membership follows set semantics: a
//! duplicate add and a non-member remove are no-ops, not errors.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Channel, Theme};

/// High-level theme service over the themes collection.
#[derive(Clone)]
pub struct ThemeService {
    db: FirestoreDb,
}

impl ThemeService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// All themes owned by a user.
    pub async fn list_themes(&self, user_id: &str) -> Result<Vec<Theme>, AppError> {
        self.db.list_themes(user_id).await
    }

    /// One theme, or `NotFound` if it does not belong to this user.
    pub async fn get_theme(&self, user_id: &str, theme_id: &str) -> Result<Theme, AppError> {
        self.db
            .get_theme(user_id, theme_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Theme {}", theme_id)))
    }

    /// Create a theme with a fresh id and an empty channel set.
    pub async fn create_theme(&self, user_id: &str, name: &str) -> Result<Theme, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest(
                "Theme name must not be empty".to_string(),
            ));
        }

        let theme = Theme {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            channels: Vec::new(),
        };
        self.db.set_theme(&theme).await?;

        tracing::info!(user_id, theme_id = %theme.id, "Theme created");
        Ok(theme)
    }

    /// Rename a theme in place; its id and channels are unchanged.
    pub async fn rename_theme(
        &self,
        user_id: &str,
        theme_id: &str,
        new_name: &str,
    ) -> Result<Theme, AppError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::BadRequest(
                "Theme name must not be empty".to_string(),
            ));
        }

        let mut theme = self.get_theme(user_id, theme_id).await?;
        theme.name = new_name.to_string();
        self.db.set_theme(&theme).await?;
        Ok(theme)
    }

    /// Delete a theme (and its channel memberships with it); returns the
    /// user's remaining themes.
    pub async fn delete_theme(
        &self,
        user_id: &str,
        theme_id: &str,
    ) -> Result<Vec<Theme>, AppError> {
        // Existence check first so deleting someone else's theme id is
        // NotFound rather than a silent success.
        self.get_theme(user_id, theme_id).await?;
        self.db.delete_theme(user_id, theme_id).await?;

        tracing::info!(user_id, theme_id, "Theme deleted");
        self.db.list_themes(user_id).await
    }

    /// Add a channel to a theme's set. Adding an existing member returns the
    /// theme unchanged.
    pub async fn add_channel(
        &self,
        user_id: &str,
        theme_id: &str,
        channel_id: &str,
        channel_name: &str,
    ) -> Result<Theme, AppError> {
        if channel_id.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Channel id must not be empty".to_string(),
            ));
        }

        let mut theme = self.get_theme(user_id, theme_id).await?;
        let inserted = theme.add_channel(Channel {
            channel_id: channel_id.to_string(),
            channel_name: channel_name.to_string(),
        });

        if inserted {
            self.db.set_theme(&theme).await?;
        } else {
            tracing::debug!(user_id, theme_id, channel_id, "Channel already a member");
        }
        Ok(theme)
    }

    /// Remove a channel from a theme's set. A non-member id is a no-op.
    pub async fn remove_channel(
        &self,
        user_id: &str,
        theme_id: &str,
        channel_id: &str,
    ) -> Result<Theme, AppError> {
        let mut theme = self.get_theme(user_id, theme_id).await?;

        if theme.remove_channel(channel_id) {
            self.db.set_theme(&theme).await?;
        }
        Ok(theme)
    }

    /// One channel within a theme, or `NotFound`.
    pub async fn get_channel(
        &self,
        user_id: &str,
        theme_id: &str,
        channel_id: &str,
    ) -> Result<Channel, AppError> {
        let theme = self.get_theme(user_id, theme_id).await?;
        theme
            .channel(channel_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Channel {}", channel_id)))
    }
}
