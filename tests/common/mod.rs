// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use subthemes::config::Config;
use subthemes::db::FirestoreDb;
use subthemes::routes::create_router;
use subthemes::services::{
    GoogleIdentityVerifier, SessionStore, SyncService, ThemeService, YouTubeClient,
};
use subthemes::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test JWT session token.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
///
/// The YouTube client points at a closed local port so nothing in these
/// tests can reach the real API.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();

    let verifier = Arc::new(
        GoogleIdentityVerifier::new(&config).expect("Failed to build identity verifier"),
    );
    let youtube = YouTubeClient::with_base_url("http://127.0.0.1:9".to_string(), 5);
    let sessions = SessionStore::new();

    let sync_service = SyncService::new(verifier, youtube, db.clone(), sessions);
    let theme_service = ThemeService::new(db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        sync_service,
        theme_service,
    });

    (create_router(state.clone()), state)
}
