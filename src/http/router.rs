//! Axum router for the MCP HTTP/JSON-RPC transport.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use serde_json::{Value, json};

use crate::mcp::{McpServer, SERVER_NAME, SERVER_VERSION};

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-API-Key";

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    /// The MCP request dispatcher.
    pub dispatcher: Arc<McpServer>,
}

/// Builds the axum `Router` with all MCP routes.
pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", mcp_routes())
        .route("/api/index", mcp_routes())
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

fn mcp_routes() -> MethodRouter<AppState> {
    get(handle_status).post(handle_rpc).options(handle_preflight)
}

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

async fn handle_status(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.dispatcher.registry();
    Json(json!({
        "name": SERVER_NAME,
        "version": SERVER_VERSION,
        "status": "running",
        "tools": registry.tools.len(),
        "resources": registry.resources.len()
    }))
}

async fn handle_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
        ],
    )
}

async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> Response {
    if body.is_empty() {
        return Json(json!({"error": "No data received"})).into_response();
    }

    let request: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "request body is not JSON");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response();
        }
    };

    Json(state.dispatcher.handle(request)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState {
            dispatcher: Arc::new(McpServer::new()),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn status_reports_registry_counts() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            body_json(response).await,
            json!({
                "name": "Vercel MCP Server",
                "version": "1.0.0",
                "status": "running",
                "tools": 4,
                "resources": 1
            })
        );
    }

    #[tokio::test]
    async fn preflight_sets_cors_headers() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
    }

    #[tokio::test]
    async fn post_dispatches_json_rpc() {
        let response = app()
            .oneshot(post(
                "/",
                r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"add_numbers","arguments":{"a":15,"b":25}}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["content"][0]["text"], "40");
    }

    #[tokio::test]
    async fn post_unknown_method_is_still_200() {
        let response = app()
            .oneshot(post("/", r#"{"jsonrpc":"2.0","id":1,"method":"foo/bar"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], -32601);
        assert_eq!(body["error"]["message"], "Method not found: foo/bar");
    }

    #[tokio::test]
    async fn post_empty_body() {
        let response = app().oneshot(post("/", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"error": "No data received"}));
    }

    #[tokio::test]
    async fn post_invalid_json_is_500() {
        let response = app().oneshot(post("/", "{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn api_index_path_is_served() {
        let response = app()
            .oneshot(post("/api/index", r#"{"jsonrpc":"2.0","id":"x","method":"initialize"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], "x");
        assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    }
}
