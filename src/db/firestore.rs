// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (identity records keyed by provider subject)
//! - Themes (per-user taxonomy, keyed by `"{user_id}_{theme_id}"`)
//!
//! Subscriptions are deliberately absent: they are session state, rebuilt
//! from the upstream API on every reload.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Theme, User};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by provider subject.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Atomically find an existing user by subject or persist `candidate`.
    ///
    /// Runs in a Firestore transaction: the read registers the document for
    /// conflict detection, so two concurrent registrations of the same
    /// subject cannot both create a record. An existing record is returned
    /// unmodified (first write wins; `created_at` never changes).
    pub async fn find_or_create_user(&self, candidate: &User) -> Result<User, AppError> {
        let mut transaction = self
            .get_client()?
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let existing: Option<User> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&candidate.id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to read user in transaction: {}", e)))?;

        if let Some(user) = existing {
            // Nothing to write; release the transaction.
            let _ = transaction.rollback().await;
            tracing::debug!(user_id = %user.id, "Existing user resolved");
            return Ok(user);
        }

        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&candidate.id)
            .object(candidate)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add user to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(user_id = %candidate.id, "New user created");
        Ok(candidate.clone())
    }

    // ─── Theme Operations ────────────────────────────────────────

    /// Document ID for a theme: owner and theme id combined.
    fn theme_doc_id(user_id: &str, theme_id: &str) -> String {
        format!("{}_{}", user_id, theme_id)
    }

    /// Get one theme scoped to its owner.
    pub async fn get_theme(
        &self,
        user_id: &str,
        theme_id: &str,
    ) -> Result<Option<Theme>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::THEMES)
            .obj()
            .one(&Self::theme_doc_id(user_id, theme_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all themes owned by a user, ordered by name.
    pub async fn list_themes(&self, user_id: &str) -> Result<Vec<Theme>, AppError> {
        let uid = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::THEMES)
            .filter(move |q| q.field("user_id").eq(uid.clone()))
            .order_by([("name", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a theme document.
    pub async fn set_theme(&self, theme: &Theme) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::THEMES)
            .document_id(Self::theme_doc_id(&theme.user_id, &theme.id))
            .object(theme)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a theme and its embedded channel memberships.
    pub async fn delete_theme(&self, user_id: &str, theme_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::THEMES)
            .document_id(Self::theme_doc_id(user_id, theme_id))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
