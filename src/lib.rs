use std::sync::Arc;

use axum::{middleware, routing::get, Router};

pub mod config;
pub mod directory;
pub mod errors;
pub mod feed;
pub mod http;
pub mod logging;
pub mod render;

use feed::DirectorySource;

#[derive(Clone)]
pub struct AppState {
    pub directory_port: u16,
    pub source: Arc<dyn DirectorySource>,
}

impl AppState {
    pub fn new(directory_port: u16, source: Arc<dyn DirectorySource>) -> Self {
        Self {
            directory_port,
            source,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/directory.xml", get(http::handlers::directory_xml))
        .route("/health", get(http::handlers::health))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::directory::DirectoryEntry;
    use crate::errors::AppError;
    use crate::feed::{AtomFeedSource, DirectorySource};

    use super::*;

    struct StaticSource {
        entries: Vec<DirectoryEntry>,
    }

    #[async_trait::async_trait]
    impl DirectorySource for StaticSource {
        async fn load_entries(&self) -> Result<Vec<DirectoryEntry>, AppError> {
            Ok(self.entries.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl DirectorySource for FailingSource {
        async fn load_entries(&self) -> Result<Vec<DirectoryEntry>, AppError> {
            Err(AppError::feed_unavailable(
                "contacts.xml",
                "No such file or directory",
            ))
        }
    }

    fn app() -> Router {
        let source = StaticSource {
            entries: vec![
                DirectoryEntry::new("514-555-0199", "José Ruíz", "mobile"),
                DirectoryEntry::new("514-555-0100", "José Ruíz", "work"),
                DirectoryEntry::new("418-555-0123", "Ada Lovelace", ""),
            ],
        };
        build_app(AppState::new(5006, Arc::new(source)))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert_eq!(body, "{\"status\":\"ok\"}");
    }

    #[tokio::test]
    async fn root_get_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn prompt_mode_embeds_configured_port_not_request_port() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/directory.xml")
                    .method("GET")
                    .header(header::HOST, "phones.example.com:9999")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .expect("content type"),
            "text/xml"
        );
        let body = body_string(response).await;
        assert!(body.starts_with("<CiscoIPPhoneInput>"));
        assert!(body.contains("<URL>http://phones.example.com:5006/directory.xml</URL>"));
    }

    #[tokio::test]
    async fn listing_mode_filters_and_sorts_by_display_form() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/directory.xml?keyword=ruiz")
                    .method("GET")
                    .header(header::HOST, "phones.example.com:5006")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert_eq!(body.matches("<DirectoryEntry>").count(), 2);
        let mobile = body
            .find("<Name>Jose Ruiz (mobile)</Name>")
            .expect("mobile entry");
        let work = body.find("<Name>Jose Ruiz (work)</Name>").expect("work entry");
        assert!(mobile < work);
        assert!(!body.contains("Ada Lovelace"));
    }

    #[tokio::test]
    async fn empty_keyword_lists_every_record() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/directory.xml?keyword=")
                    .method("GET")
                    .header(header::HOST, "phones.example.com:5006")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.starts_with("<CiscoIPPhoneDirectory>"));
        assert_eq!(body.matches("<DirectoryEntry>").count(), 3);
    }

    #[tokio::test]
    async fn unmatched_keyword_renders_empty_listing() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/directory.xml?keyword=nobody")
                    .method("GET")
                    .header(header::HOST, "phones.example.com:5006")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.starts_with("<CiscoIPPhoneDirectory>"));
        assert_eq!(body.matches("<DirectoryEntry>").count(), 0);
    }

    #[tokio::test]
    async fn number_search_matches_digit_substring() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/directory.xml?keyword=4185550123")
                    .method("GET")
                    .header(header::HOST, "phones.example.com:5006")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert_eq!(body.matches("<DirectoryEntry>").count(), 1);
        assert!(body.contains("<Name>Ada Lovelace</Name>"));
    }

    #[tokio::test]
    async fn unreadable_feed_fails_the_request() {
        let app = build_app(AppState::new(5006, Arc::new(FailingSource)));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/directory.xml?keyword=ruiz")
                    .method("GET")
                    .header(header::HOST, "phones.example.com:5006")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        let body_json: serde_json::Value = serde_json::from_str(&body).expect("valid json response");
        assert_eq!(body_json["code"], "feed_unavailable");
    }

    #[tokio::test]
    async fn searches_a_feed_file_end_to_end() {
        let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:gd="http://schemas.google.com/g/2005">
  <entry>
    <title>José Ruíz</title>
    <gd:phoneNumber rel="work">514-555-0100</gd:phoneNumber>
    <gd:phoneNumber label="http://schemas.google.com/g/2005#mobile">(514) 555-0199</gd:phoneNumber>
  </entry>
</feed>"#;
        let file = tempfile::NamedTempFile::new().expect("temp file");
        std::fs::write(file.path(), feed).expect("write feed");

        let source = AtomFeedSource::new(file.path().to_path_buf());
        let app = build_app(AppState::new(5006, Arc::new(source)));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/directory.xml?keyword=ruiz")
                    .method("GET")
                    .header(header::HOST, "phones.example.com:5006")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert_eq!(body.matches("<DirectoryEntry>").count(), 2);
        assert!(body.contains("<Telephone>5145550100</Telephone>"));
        assert!(body.contains("<Telephone>5145550199</Telephone>"));
    }
}
