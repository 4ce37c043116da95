// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Subthemes: organize YouTube subscriptions into themes
//!
//! This crate provides the backend API for signing users in with Google,
//! synchronizing their full subscription list from the YouTube Data API,
//! and maintaining each user's theme/channel taxonomy.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{SyncService, ThemeService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub sync_service: SyncService,
    pub theme_service: ThemeService,
}
