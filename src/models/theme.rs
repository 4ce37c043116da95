// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Theme taxonomy models.
//!
//! A theme is a user-defined named grouping of channels. Channel membership
//! is a set keyed by channel id: inserting an existing member is a no-op and
//! removing a non-member is a no-op.

use serde::{Deserialize, Serialize};

/// A channel reference inside a theme.
///
/// Distinct from a live [`Subscription`](crate::models::Subscription): this
/// is the durable taxonomy entry, holding only what the grouping needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// YouTube channel ID
    pub channel_id: String,
    /// Channel display name at the time it was added
    pub channel_name: String,
}

/// A named grouping of channels, owned by exactly one user.
///
/// Stored in Firestore under the document ID `"{user_id}_{theme_id}"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Theme ID, unique within the owning user
    pub id: String,
    /// Owning user's subject id
    pub user_id: String,
    /// Display name (mutable, need not be unique)
    pub name: String,
    /// Member channels; treated as a set keyed by `channel_id`
    pub channels: Vec<Channel>,
}

impl Theme {
    /// Look up a member channel by id.
    pub fn channel(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.channel_id == channel_id)
    }

    /// Insert a channel, preserving set semantics.
    ///
    /// Returns `false` (leaving the theme untouched) when a channel with the
    /// same id is already a member.
    pub fn add_channel(&mut self, channel: Channel) -> bool {
        if self.channel(&channel.channel_id).is_some() {
            return false;
        }
        self.channels.push(channel);
        true
    }

    /// Remove a channel by id. Returns `false` if it was not a member.
    pub fn remove_channel(&mut self, channel_id: &str) -> bool {
        let before = self.channels.len();
        self.channels.retain(|c| c.channel_id != channel_id);
        self.channels.len() != before
    }
}
