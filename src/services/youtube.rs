// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! YouTube Data API client for fetching the full subscription list.
//!
//! The upstream list endpoint is page-token based: each response either
//! carries a continuation cursor or marks the end of the collection. The
//! fetch is a bounded loop in strict cursor order; a configurable page
//! ceiling turns a cursor cycle or upstream bug into `FetchIncomplete`
//! instead of an endless loop. Any failure aborts the whole fetch; partial
//! results are never surfaced.

use crate::error::AppError;
use crate::models::Subscription;
use serde::Deserialize;
use std::time::Duration;

/// Maximum page size the subscriptions endpoint accepts.
const MAX_PAGE_SIZE: u32 = 50;

/// Upper bound on a single page request before it counts as an upstream failure.
const PAGE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Data API client.
#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    max_pages: u32,
}

impl YouTubeClient {
    /// Create a client against the production API.
    pub fn new(max_pages: u32) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), max_pages)
    }

    /// Create a client against an alternate base URL (tests).
    pub fn with_base_url(base_url: String, max_pages: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            max_pages,
        }
    }

    /// Fetch the complete subscription collection for the token's account.
    ///
    /// Pages are requested sequentially (each cursor comes from the prior
    /// response) and merged in arrival order, then the final collection is
    /// sorted by title, case-insensitive, ties keeping arrival order. An
    /// account with no subscriptions yields an empty collection, not an
    /// error. No retries: a reload is an explicit user action.
    pub async fn list_all_subscriptions(
        &self,
        access_token: &str,
    ) -> Result<Vec<Subscription>, AppError> {
        let mut all = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages_fetched = 0u32;

        loop {
            if pages_fetched >= self.max_pages {
                return Err(AppError::FetchIncomplete {
                    pages: pages_fetched,
                });
            }

            let page = self.list_page(access_token, page_token.as_deref()).await?;
            pages_fetched += 1;
            all.extend(page.items);

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        tracing::debug!(
            pages = pages_fetched,
            subscriptions = all.len(),
            "Subscription fetch complete"
        );

        sort_by_title(&mut all);
        Ok(all)
    }

    /// Request a single page of the subscriptions list.
    async fn list_page(
        &self,
        access_token: &str,
        page_token: Option<&str>,
    ) -> Result<SubscriptionsPage, AppError> {
        let url = format!("{}/subscriptions", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("part", "snippet,contentDetails".to_string()),
            ("mine", "true".to_string()),
            ("maxResults", MAX_PAGE_SIZE.to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&query)
            .timeout(PAGE_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::YouTubeApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json(
        &self,
        response: reqwest::Response,
    ) -> Result<SubscriptionsPage, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Expired or revoked access token; the user must re-authorize.
            if status.as_u16() == 401 {
                return Err(AppError::YouTubeApi(
                    "access token rejected (401)".to_string(),
                ));
            }

            return Err(AppError::YouTubeApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::YouTubeApi(format!("JSON parse error: {}", e)))
    }
}

/// One page of the upstream subscriptions list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionsPage {
    #[serde(default)]
    items: Vec<Subscription>,
    next_page_token: Option<String>,
}

/// Sort by lowercase title, ascending; stable, so equal titles keep arrival order.
fn sort_by_title(subs: &mut [Subscription]) {
    subs.sort_by_key(|s| s.title_key());
}
