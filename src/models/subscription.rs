// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! YouTube subscription wire model.
//!
//! Kept in the nested shape the Data API returns so a page deserializes
//! directly. Every leaf is optional: the upstream omits thumbnail sizes,
//! descriptions and counters freely, and an absent field must never fail a
//! fetch. Subscriptions are never persisted; the collection lives only in
//! session state and is rebuilt wholesale on every reload.

use serde::{Deserialize, Serialize};

/// One subscription as returned by the upstream list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub kind: Option<String>,
    pub etag: Option<String>,
    /// Provider-issued subscription id
    pub id: Option<String>,
    pub snippet: Option<Snippet>,
    pub content_details: Option<ContentDetails>,
}

impl Subscription {
    /// Case-folded title used for the collection ordering invariant.
    pub fn title_key(&self) -> String {
        self.snippet
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or_default()
            .to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub published_at: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub resource_id: Option<ResourceId>,
    pub channel_id: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

/// Reference to the subscribed-to channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: Option<String>,
    pub channel_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

/// Aggregate counters for the subscribed channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    pub total_item_count: Option<u64>,
    pub new_item_count: Option<u64>,
    pub activity_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_item() {
        // Upstream items routinely omit thumbnails sizes and counters.
        let item: Subscription = serde_json::from_str(
            r#"{
                "id": "sub-1",
                "snippet": {"title": "Rust Weekly", "resourceId": {"channelId": "ch-1"}}
            }"#,
        )
        .unwrap();

        assert_eq!(item.title_key(), "rust weekly");
        let snippet = item.snippet.unwrap();
        assert!(snippet.thumbnails.is_none());
        assert_eq!(
            snippet.resource_id.unwrap().channel_id.as_deref(),
            Some("ch-1")
        );
        assert!(item.content_details.is_none());
    }

    #[test]
    fn title_key_is_empty_for_missing_title() {
        let item: Subscription = serde_json::from_str("{}").unwrap();
        assert_eq!(item.title_key(), "");
    }
}
