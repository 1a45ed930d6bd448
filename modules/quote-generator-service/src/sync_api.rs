//! Client for the remote quote source.
//!
//! The remote is a placeholder posts API: each post's `title` becomes a quote
//! in the `server` category.

use crate::error::QuoteError;
use quote_generator_types::Quote;

pub const DEFAULT_SERVER_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Category assigned to every remote-sourced quote
pub const SERVER_CATEGORY: &str = "server";

/// Only this many remote entries are consumed per fetch
pub const MAX_SERVER_QUOTES: usize = 10;

/// A post from the remote API. Only the title is read.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ServerPost {
    pub title: Option<String>,
}

/// Fetch the current remote batch, mapped into quotes
pub async fn fetch_server_quotes(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Quote>, QuoteError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| QuoteError::Network(format!("Server request failed: {}", e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| QuoteError::Network(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        return Err(QuoteError::Network(format!(
            "Server error ({}): {}",
            status,
            truncate_error(&body)
        )));
    }

    parse_server_posts(&body)
}

/// Maps the first [`MAX_SERVER_QUOTES`] posts into quotes. Posts without a
/// string title are skipped.
pub fn parse_server_posts(body: &str) -> Result<Vec<Quote>, QuoteError> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| QuoteError::Network(format!("Invalid JSON: {}", e)))?;

    let items = json
        .as_array()
        .ok_or_else(|| QuoteError::Network("Expected a JSON array of posts".to_string()))?;

    Ok(items
        .iter()
        .take(MAX_SERVER_QUOTES)
        .filter_map(|item| serde_json::from_value::<ServerPost>(item.clone()).ok())
        .filter_map(|post| post.title)
        .map(|title| Quote::new(title, SERVER_CATEGORY))
        .collect())
}

/// Push the full local array upstream. The response body is ignored.
pub async fn push_local_quotes(
    client: &reqwest::Client,
    url: &str,
    quotes: &[Quote],
) -> Result<(), QuoteError> {
    let response = client
        .post(url)
        .json(quotes)
        .send()
        .await
        .map_err(|e| QuoteError::Network(format!("Server request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(QuoteError::Network(format!("Server rejected push ({})", status)));
    }
    Ok(())
}

fn truncate_error(s: &str) -> &str {
    match s.char_indices().nth(200) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::{closed_url, serve, test_client};
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::Json;
    use axum::routing::{get, post};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[test]
    fn test_parse_server_posts_maps_titles() {
        let body = r#"[
            {"userId":1,"id":1,"title":"first","body":"ignored"},
            {"userId":1,"id":2,"title":"second","body":"ignored"}
        ]"#;
        let quotes = parse_server_posts(body).unwrap();
        assert_eq!(
            quotes,
            vec![Quote::new("first", "server"), Quote::new("second", "server")]
        );
    }

    #[test]
    fn test_parse_server_posts_takes_first_ten() {
        let posts: Vec<serde_json::Value> = (0..25)
            .map(|i| serde_json::json!({"id": i, "title": format!("post {}", i)}))
            .collect();
        let body = serde_json::to_string(&posts).unwrap();

        let quotes = parse_server_posts(&body).unwrap();
        assert_eq!(quotes.len(), MAX_SERVER_QUOTES);
        assert_eq!(quotes[9].text, "post 9");
    }

    #[test]
    fn test_parse_server_posts_skips_untitled() {
        let body = r#"[{"id":1},{"id":2,"title":42},{"id":3,"title":"ok"}]"#;
        assert_eq!(parse_server_posts(body).unwrap(), vec![Quote::new("ok", "server")]);
    }

    #[test]
    fn test_parse_server_posts_rejects_garbage() {
        assert!(matches!(
            parse_server_posts("<html>"),
            Err(QuoteError::Network(_))
        ));
        assert!(matches!(
            parse_server_posts(r#"{"title":"x"}"#),
            Err(QuoteError::Network(_))
        ));
    }

    #[test]
    fn test_truncate_error() {
        let long = "x".repeat(500);
        assert_eq!(truncate_error(&long).len(), 200);
        assert_eq!(truncate_error("short"), "short");
    }

    #[tokio::test]
    async fn test_fetch_server_quotes_ok() {
        let router = axum::Router::new().route(
            "/posts",
            get(|| async {
                Json(serde_json::json!([
                    {"id": 1, "title": "first"},
                    {"id": 2, "title": "second"}
                ]))
            }),
        );
        let base = serve(router).await;

        let quotes = fetch_server_quotes(&test_client(), &format!("{}/posts", base))
            .await
            .unwrap();
        assert_eq!(
            quotes,
            vec![Quote::new("first", "server"), Quote::new("second", "server")]
        );
    }

    #[tokio::test]
    async fn test_fetch_server_quotes_non_success_status() {
        let router = axum::Router::new().route(
            "/posts",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(router).await;

        let err = fetch_server_quotes(&test_client(), &format!("{}/posts", base))
            .await
            .unwrap_err();
        match err {
            QuoteError::Network(msg) => {
                assert!(msg.contains("Server error (500"), "{}", msg);
                assert!(msg.contains("boom"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_server_quotes_connection_refused() {
        let err = fetch_server_quotes(&test_client(), &closed_url())
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Network(_)));
    }

    type Received = Arc<Mutex<Option<serde_json::Value>>>;

    async fn record_push(
        State(received): State<Received>,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        *received.lock().await = Some(body);
        (StatusCode::CREATED, Json(serde_json::json!({"id": 101})))
    }

    #[tokio::test]
    async fn test_push_local_quotes_posts_full_array() {
        let received: Received = Arc::new(Mutex::new(None));
        let router = axum::Router::new()
            .route("/posts", post(record_push))
            .with_state(received.clone());
        let base = serve(router).await;

        let quotes = vec![Quote::new("A", "x"), Quote::new("B", "y")];
        push_local_quotes(&test_client(), &format!("{}/posts", base), &quotes)
            .await
            .unwrap();

        let body = received.lock().await.take().unwrap();
        assert_eq!(body, serde_json::to_value(&quotes).unwrap());
    }

    #[tokio::test]
    async fn test_push_local_quotes_rejected() {
        let router = axum::Router::new().route(
            "/posts",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = serve(router).await;

        let result =
            push_local_quotes(&test_client(), &format!("{}/posts", base), &[]).await;
        assert!(matches!(result, Err(QuoteError::Network(_))));
    }
}
