// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process session state.
//!
//! Each signed-in user has a session holding the subscription collection for
//! the lifetime of that sign-in: created empty at login, replaced wholesale
//! by a reload, dropped at logout. Sessions are tagged with a globally
//! monotonic epoch so a fetch that outlives its session (logout or re-login
//! while pages were still streaming in) can never install its result into a
//! session that has moved on.

use crate::models::Subscription;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct Session {
    epoch: u64,
    subscriptions: Vec<Subscription>,
}

/// Shared per-user session map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    next_epoch: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session for a user, discarding any prior one.
    ///
    /// Returns the new session's epoch.
    pub fn begin(&self, user_id: &str) -> u64 {
        let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed) + 1;
        self.sessions.insert(
            user_id.to_string(),
            Session {
                epoch,
                subscriptions: Vec::new(),
            },
        );
        epoch
    }

    /// Epoch of the user's current session, starting one if absent.
    ///
    /// A session can be absent with a still-valid session token after a
    /// process restart; a reload then transparently re-establishes it.
    pub fn ensure(&self, user_id: &str) -> u64 {
        if let Some(session) = self.sessions.get(user_id) {
            return session.epoch;
        }
        self.begin(user_id)
    }

    /// Replace the session's subscription collection, but only if the
    /// session is still the one the fetch started under.
    ///
    /// Returns `false` (discarding the result) when the session ended or was
    /// replaced while the fetch was in flight.
    pub fn install_if_current(
        &self,
        user_id: &str,
        epoch: u64,
        subscriptions: Vec<Subscription>,
    ) -> bool {
        if let Some(mut session) = self.sessions.get_mut(user_id) {
            if session.epoch == epoch {
                session.subscriptions = subscriptions;
                return true;
            }
        }
        false
    }

    /// Current subscription collection; empty when nothing has been fetched.
    pub fn subscriptions(&self, user_id: &str) -> Vec<Subscription> {
        self.sessions
            .get(user_id)
            .map(|s| s.subscriptions.clone())
            .unwrap_or_default()
    }

    /// Drop the user's session (logout).
    pub fn end(&self, user_id: &str) {
        self.sessions.remove(user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(n: usize) -> Vec<Subscription> {
        (0..n)
            .map(|i| Subscription {
                kind: None,
                etag: None,
                id: Some(format!("sub-{}", i)),
                snippet: None,
                content_details: None,
            })
            .collect()
    }

    #[test]
    fn login_starts_empty() {
        let store = SessionStore::new();
        store.begin("u1");
        assert!(store.subscriptions("u1").is_empty());
    }

    #[test]
    fn install_replaces_wholesale() {
        let store = SessionStore::new();
        let epoch = store.begin("u1");

        assert!(store.install_if_current("u1", epoch, subs(3)));
        assert_eq!(store.subscriptions("u1").len(), 3);

        assert!(store.install_if_current("u1", epoch, subs(1)));
        assert_eq!(store.subscriptions("u1").len(), 1);
    }

    #[test]
    fn stale_epoch_is_discarded_after_relogin() {
        let store = SessionStore::new();
        let old = store.begin("u1");
        store.begin("u1"); // re-login while a fetch is in flight

        assert!(!store.install_if_current("u1", old, subs(5)));
        assert!(store.subscriptions("u1").is_empty());
    }

    #[test]
    fn logout_clears_and_blocks_late_install() {
        let store = SessionStore::new();
        let epoch = store.begin("u1");
        store.install_if_current("u1", epoch, subs(2));

        store.end("u1");
        assert!(store.subscriptions("u1").is_empty());
        assert!(!store.install_if_current("u1", epoch, subs(2)));

        // A later sign-in gets a fresh epoch, so the old one stays dead.
        let fresh = store.ensure("u1");
        assert_ne!(fresh, epoch);
        assert!(!store.install_if_current("u1", epoch, subs(2)));
    }

    #[test]
    fn ensure_reuses_live_session() {
        let store = SessionStore::new();
        let epoch = store.begin("u1");
        assert_eq!(store.ensure("u1"), epoch);
    }
}
