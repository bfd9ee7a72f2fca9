//! HTTP boundary: multipart upload in, JSON envelope out.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info, warn};

use crate::adapters::UploadStaging;
use crate::app::AppContext;
use crate::app::commands::report::{self, ReportRequest};
use crate::domain::config::{AllowedOrigins, ServerConfig};
use crate::domain::{AppError, ReportEnvelope};

const FILES_FIELD: &str = "files";
const DATA_FIELD: &str = "data";

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Result<Router, AppError> {
    let server = &ctx.config().server;
    let max_upload_bytes = server.max_upload_bytes;
    let cors = cors_layer(server)?;

    Ok(Router::new()
        .route("/report", post(report_handler))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(ctx))
}

fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]).allow_headers(Any);

    match server.allowed_origins()? {
        AllowedOrigins::Any => Ok(layer.allow_origin(Any)),
        AllowedOrigins::List(origins) => {
            let origins = origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|e| {
                        AppError::config_error(format!("Invalid origin '{}': {}", origin, e))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(layer.allow_origin(AllowOrigin::list(origins)))
        }
    }
}

/// Serve until interrupted.
pub async fn run(ctx: Arc<AppContext>, addr: SocketAddr) -> Result<(), AppError> {
    let app = router(ctx)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("costdraft listening on {}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", err);
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn report_handler(
    State(ctx): State<Arc<AppContext>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Json<ReportEnvelope>) {
    let outcome = match multipart {
        Ok(multipart) => handle_report(ctx, multipart).await,
        Err(rejection) => Err(AppError::Upload(rejection.body_text())),
    };

    if let Err(err) = &outcome {
        match err.status_code() {
            400 => warn!("report rejected: {}", err),
            _ => error!("report failed: {}", err),
        }
    }

    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    };
    (status, Json(ReportEnvelope::from_outcome(&outcome)))
}

async fn handle_report(ctx: Arc<AppContext>, mut multipart: Multipart) -> Result<String, AppError> {
    let mut staging = UploadStaging::new()?;
    let mut data = None;

    while let Some(field) =
        multipart.next_field().await.map_err(|e| AppError::Upload(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILES_FIELD) => {
                let Some(filename) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                let bytes = field.bytes().await.map_err(|e| AppError::Upload(e.body_text()))?;
                staging.stage(&filename, &bytes)?;
            }
            Some(DATA_FIELD) => {
                data = Some(field.text().await.map_err(|e| AppError::Upload(e.body_text()))?);
            }
            _ => {}
        }
    }

    let request = ReportRequest { documents: staging.paths().to_vec(), data };

    // The staging directory moves into the worker and is removed when it returns.
    tokio::task::spawn_blocking(move || {
        let outcome = report::execute(&ctx, &request);
        drop(staging);
        outcome
    })
    .await
    .map_err(|e| AppError::Io(std::io::Error::other(format!("report worker failed: {}", e))))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppConfig;
    use crate::testing::{
        FakeCompletionClient, FakeDocumentExtractor, test_context, test_context_with,
    };
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    const BOUNDARY: &str = "costdraft-test-boundary";

    enum Part<'a> {
        File { name: &'a str, content: &'a str },
        Data(&'a str),
    }

    fn multipart_body(parts: &[Part<'_>]) -> String {
        let mut body = String::new();
        for part in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match part {
                Part::File { name, content } => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                        name
                    ));
                    body.push_str("Content-Type: application/pdf\r\n\r\n");
                    body.push_str(content);
                }
                Part::Data(json) => {
                    body.push_str("Content-Disposition: form-data; name=\"data\"\r\n\r\n");
                    body.push_str(json);
                }
            }
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    fn upload(parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/report")
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn build_app(ctx: AppContext) -> Router {
        router(Arc::new(ctx)).unwrap()
    }

    fn default_app() -> Router {
        let client = FakeCompletionClient::replying("unused");
        build_app(test_context(client, FakeDocumentExtractor::new()))
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri("/report")
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    const PAYLOAD: &str = concat!(
        r#"{"project_info_payload":[{"question":"Project Type","answer":"Extension"}],"#,
        r#""cost_info_payload":[]}"#,
    );

    #[tokio::test]
    async fn successful_report_is_wrapped_in_result_envelope() {
        let client = FakeCompletionClient::replying("Feasibility Estimate: £42,000");
        let extractor = FakeDocumentExtractor::new().with_text("plan.pdf", "FLOOR PLAN");
        let app = build_app(test_context(client.clone(), extractor.clone()));

        let (status, body) = send(
            app,
            upload(&[Part::File { name: "plan.pdf", content: "%PDF" }, Part::Data(PAYLOAD)]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": "Feasibility Estimate: £42,000"}));
        assert_eq!(client.received()[0].messages[2].content, "FLOOR PLAN\n");
        let seen = extractor.seen_paths();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].exists());
    }

    #[tokio::test]
    async fn staged_uploads_are_removed_after_a_failed_request() {
        let extractor = FakeDocumentExtractor::new().with_text("plan.pdf", "FLOOR PLAN");
        let client = FakeCompletionClient::failing("boom");
        let app = build_app(test_context(client, extractor.clone()));

        let (status, _) = send(
            app,
            upload(&[Part::File { name: "plan.pdf", content: "%PDF" }, Part::Data(PAYLOAD)]),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let seen = extractor.seen_paths();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].exists());
    }

    #[tokio::test]
    async fn zero_files_is_a_client_error_without_completion() {
        let client = FakeCompletionClient::replying("unused");
        let app = build_app(test_context(client.clone(), FakeDocumentExtractor::new()));

        let (status, body) = send(app, upload(&[Part::Data(PAYLOAD)])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No valid PDF files uploaded"}));
        assert!(client.received().is_empty());
    }

    #[tokio::test]
    async fn only_non_pdf_files_is_a_client_error() {
        let client = FakeCompletionClient::replying("unused");
        let app = build_app(test_context(client.clone(), FakeDocumentExtractor::new()));

        let (status, body) = send(
            app,
            upload(&[Part::File { name: "photo.jpg", content: "jpeg" }, Part::Data(PAYLOAD)]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No valid PDF files uploaded"}));
    }

    #[tokio::test]
    async fn missing_data_field_is_a_client_error_without_completion() {
        let client = FakeCompletionClient::replying("unused");
        let app = build_app(test_context(client.clone(), FakeDocumentExtractor::new()));

        let (status, body) =
            send(app, upload(&[Part::File { name: "plan.pdf", content: "%PDF" }])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No JSON data provided"}));
        assert!(client.received().is_empty());
    }

    #[tokio::test]
    async fn non_multipart_request_gets_error_envelope() {
        let app = default_app();
        let request = Request::builder()
            .method("POST")
            .uri("/report")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Upload error"));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = default_app();
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn preflight_from_any_origin_is_allowed_by_default() {
        let response = default_app().oneshot(preflight("http://localhost:3000")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let methods = response.headers()["access-control-allow-methods"].to_str().unwrap();
        assert!(methods.contains("POST"));
    }

    #[tokio::test]
    async fn report_responses_carry_cors_header() {
        let client = FakeCompletionClient::replying("unused");
        let mut request = upload(&[Part::Data(PAYLOAD)]);
        request.headers_mut().insert("origin", HeaderValue::from_static("http://localhost:3000"));

        let app = build_app(test_context(client, FakeDocumentExtractor::new()));

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn configured_origins_restrict_preflight() {
        let mut config = AppConfig::default();
        config.server.allowed_origins = vec!["https://app.example.com".to_string()];
        let ctx = test_context_with(
            config,
            FakeCompletionClient::replying("unused"),
            FakeDocumentExtractor::new(),
        );
        let router = build_app(ctx);

        let allowed = router.clone().oneshot(preflight("https://app.example.com")).await.unwrap();
        let denied = router.oneshot(preflight("https://evil.example.com")).await.unwrap();

        assert_eq!(allowed.headers()["access-control-allow-origin"], "https://app.example.com");
        assert!(denied.headers().get("access-control-allow-origin").is_none());
    }
}
