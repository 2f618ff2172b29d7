use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contact_form::ProxyEnvelope;
use serde_json::json;
use tracing::error;

use crate::{error::AppError, state::AppState, utils::parse_submission};

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request = parse_submission(&body)?;

    let access_key = state.config.access_key.as_deref().ok_or_else(|| {
        error!("Missing WEB3FORMS_ACCESS_KEY secret");
        AppError::MissingAccessKey
    })?;

    let envelope = ProxyEnvelope::new(access_key, request);
    let res = state.upstream.forward(&envelope).await?;

    Ok((StatusCode::OK, Json(json!({ "ok": true, "res": res }))))
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(json!({ "error": "Method not allowed" })),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, Response},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        app,
        config::{Config, DEFAULT_UPSTREAM_URL},
        upstream::Forward,
    };

    enum Planned {
        Accept(Value),
        Reject(Value),
    }

    struct MockForward {
        calls: AtomicUsize,
        seen: Mutex<Option<Value>>,
        planned: Planned,
    }

    impl MockForward {
        fn new(planned: Planned) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(None),
                planned,
            })
        }
    }

    #[async_trait]
    impl Forward for MockForward {
        async fn forward(&self, envelope: &ProxyEnvelope) -> Result<Value, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = Some(serde_json::to_value(envelope).unwrap());

            match &self.planned {
                Planned::Accept(body) => Ok(body.clone()),
                Planned::Reject(body) => Err(AppError::UpstreamRejected(body.clone())),
            }
        }
    }

    fn test_app(access_key: Option<&str>, upstream: Arc<MockForward>) -> Router {
        let config = Config {
            port: 0,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            access_key: access_key.map(str::to_string),
        };

        app(Arc::new(AppState { config, upstream }))
    }

    fn post_contact(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response<Body>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    const VALID_BODY: &str =
        r#"{"name":"Ada","email":"ada@example.com","subject":"","message":"Hello"}"#;

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let upstream = MockForward::new(Planned::Accept(json!({"success": true})));
        let app = test_app(Some("test-key"), upstream.clone());

        let request = Request::builder()
            .method("GET")
            .uri("/contact")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");

        let body = read_json(response).await;
        assert_eq!(body, json!({"error": "Method not allowed"}));
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let upstream = MockForward::new(Planned::Accept(json!({"success": true})));
        let app = test_app(Some("test-key"), upstream.clone());

        let response = app.oneshot(post_contact("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await, json!({"error": "Invalid JSON"}));
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_message_is_bad_request() {
        let upstream = MockForward::new(Planned::Accept(json!({"success": true})));
        let app = test_app(Some("test-key"), upstream.clone());

        let body = r#"{"name":"Ada","email":"ada@example.com"}"#;
        let response = app.oneshot(post_contact(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({"error": "Missing required fields"})
        );
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_secret_never_contacts_upstream() {
        let upstream = MockForward::new(Planned::Accept(json!({"success": true})));
        let app = test_app(None, upstream.clone());

        let response = app.oneshot(post_contact(VALID_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({"error": "Server misconfigured"})
        );
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_happy_path_wraps_upstream_reply() {
        let upstream = MockForward::new(Planned::Accept(json!({"success": true})));
        let app = test_app(Some("test-key"), upstream.clone());

        let response = app.oneshot(post_contact(VALID_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({"ok": true, "res": {"success": true}})
        );
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);

        let seen = upstream.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen["access_key"], "test-key");
        assert_eq!(seen["source"], contact_form::SOURCE_TAG);
        assert_eq!(seen["name"], "Ada");
    }

    #[tokio::test]
    async fn test_upstream_rejection_is_server_error() {
        let details = json!({"success": false, "message": "bad key"});
        let upstream = MockForward::new(Planned::Reject(details.clone()));
        let app = test_app(Some("test-key"), upstream);

        let response = app.oneshot(post_contact(VALID_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({"error": "Failed to send", "details": details})
        );
    }
}
