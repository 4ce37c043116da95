// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription fetch tests against an in-process mock upstream.
//!
//! These tests verify that:
//! 1. Pagination runs to completion in cursor order and merges every page
//! 2. An empty account is a normal result, not an error
//! 3. A cursor that never ends trips the page ceiling (FetchIncomplete)
//! 4. Any upstream failure aborts the fetch with no partial result

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use subthemes::error::AppError;
use subthemes::services::YouTubeClient;

struct MockPage {
    items: usize,
    next: Option<&'static str>,
}

enum Mode {
    /// Serve these pages in order (requests past the end repeat the last).
    Pages(Vec<MockPage>),
    /// Every response carries a continuation cursor.
    EndlessCursor,
    /// First call succeeds with a cursor, later calls fail with this status.
    FailAfterFirst(u16),
    /// Every call fails with this status.
    AlwaysStatus(u16),
}

struct MockUpstream {
    mode: Mode,
    calls: AtomicUsize,
    tokens_seen: Mutex<Vec<Option<String>>>,
}

#[derive(Deserialize)]
struct PageParams {
    #[serde(rename = "pageToken")]
    page_token: Option<String>,
}

async fn subscriptions(
    State(state): State<Arc<MockUpstream>>,
    Query(params): Query<PageParams>,
) -> axum::response::Response {
    let call = state.calls.fetch_add(1, Ordering::SeqCst);
    state.tokens_seen.lock().unwrap().push(params.page_token);

    match &state.mode {
        Mode::Pages(pages) => {
            let idx = call.min(pages.len() - 1);
            let offset: usize = pages[..idx].iter().map(|p| p.items).sum();
            let page = &pages[idx];

            let items: Vec<Value> = (0..page.items)
                .map(|i| {
                    let g = offset + i;
                    // Titles descend as items arrive, with alternating case, so a
                    // correct (case-insensitive, ascending) sort must fully
                    // reverse the arrival order.
                    let word = if g % 2 == 0 { "Channel" } else { "channel" };
                    json!({
                        "kind": "youtube#subscription",
                        "id": format!("sub-{}", g),
                        "snippet": {
                            "title": format!("{} {:03}", word, 500 - g),
                            "resourceId": {
                                "kind": "youtube#channel",
                                "channelId": format!("ch-{}", g)
                            }
                        },
                        "contentDetails": {"totalItemCount": g, "newItemCount": 0}
                    })
                })
                .collect();

            let mut body = json!({
                "kind": "youtube#subscriptionListResponse",
                "items": items
            });
            if let Some(next) = page.next {
                body["nextPageToken"] = json!(next);
            }
            Json(body).into_response()
        }
        Mode::EndlessCursor => Json(json!({
            "items": [{"id": format!("sub-{}", call), "snippet": {"title": "Loop"}}],
            "nextPageToken": "again"
        }))
        .into_response(),
        Mode::FailAfterFirst(status) => {
            if call == 0 {
                Json(json!({
                    "items": [{"id": "sub-0", "snippet": {"title": "Page One"}}],
                    "nextPageToken": "page2"
                }))
                .into_response()
            } else {
                (
                    StatusCode::from_u16(*status).unwrap(),
                    "upstream exploded",
                )
                    .into_response()
            }
        }
        Mode::AlwaysStatus(status) => {
            (StatusCode::from_u16(*status).unwrap(), "nope").into_response()
        }
    }
}

/// Bind a mock upstream on an ephemeral port; returns its base URL.
async fn spawn_upstream(mode: Mode) -> (String, Arc<MockUpstream>) {
    let state = Arc::new(MockUpstream {
        mode,
        calls: AtomicUsize::new(0),
        tokens_seen: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/subscriptions", get(subscriptions))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

#[tokio::test]
async fn test_three_pages_merge_complete_and_sorted() {
    let (base, upstream) = spawn_upstream(Mode::Pages(vec![
        MockPage {
            items: 50,
            next: Some("page2"),
        },
        MockPage {
            items: 50,
            next: Some("page3"),
        },
        MockPage { items: 7, next: None },
    ]))
    .await;

    let client = YouTubeClient::with_base_url(base, 10);
    let subs = client.list_all_subscriptions("test-token").await.unwrap();

    // Exactly one request per page, in cursor order.
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        *upstream.tokens_seen.lock().unwrap(),
        vec![None, Some("page2".to_string()), Some("page3".to_string())]
    );

    // All 107 items, sorted case-insensitively by title. The mock's titles
    // descend with arrival order, so the sorted ids are exactly reversed.
    assert_eq!(subs.len(), 107);
    let ids: Vec<String> = subs.iter().map(|s| s.id.clone().unwrap()).collect();
    let expected: Vec<String> = (0..107).rev().map(|g| format!("sub-{}", g)).collect();
    assert_eq!(ids, expected);

    let keys: Vec<String> = subs.iter().map(|s| s.title_key()).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]), "titles not sorted");
}

#[tokio::test]
async fn test_empty_account_is_not_an_error() {
    let (base, upstream) =
        spawn_upstream(Mode::Pages(vec![MockPage { items: 0, next: None }])).await;

    let client = YouTubeClient::with_base_url(base, 10);
    let subs = client.list_all_subscriptions("test-token").await.unwrap();

    assert!(subs.is_empty());
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_runaway_cursor_hits_page_ceiling() {
    let (base, upstream) = spawn_upstream(Mode::EndlessCursor).await;

    let client = YouTubeClient::with_base_url(base, 5);
    let err = client
        .list_all_subscriptions("test-token")
        .await
        .unwrap_err();

    assert!(
        matches!(err, AppError::FetchIncomplete { pages: 5 }),
        "expected FetchIncomplete after 5 pages, got {:?}",
        err
    );
    // The ceiling bounds upstream calls too.
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_mid_fetch_failure_aborts_whole_fetch() {
    let (base, upstream) = spawn_upstream(Mode::FailAfterFirst(500)).await;

    let client = YouTubeClient::with_base_url(base, 10);
    let err = client
        .list_all_subscriptions("test-token")
        .await
        .unwrap_err();

    // Page one had already been merged; the caller still sees only the error.
    assert!(matches!(err, AppError::YouTubeApi(_)));
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rejected_token_surfaces_as_upstream_error() {
    let (base, _upstream) = spawn_upstream(Mode::AlwaysStatus(401)).await;

    let client = YouTubeClient::with_base_url(base, 10);
    let err = client
        .list_all_subscriptions("revoked-token")
        .await
        .unwrap_err();

    match err {
        AppError::YouTubeApi(msg) => assert!(msg.contains("401"), "message was: {}", msg),
        other => panic!("expected YouTubeApi, got {:?}", other),
    }
}
