//! Application state and HTTP router construction
//!
//! The GraphQL handlers here are the auth-context boundary: each inbound
//! request derives its identity exactly once, before execution, and the
//! result is attached to the request data for every resolver. A missing or
//! malformed Authorization header means an anonymous request; a token that
//! fails verification rejects the request before any resolver runs.

use std::sync::Arc;

use async_graphql::ErrorExtensions;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLProtocol, GraphQLRequest, GraphQLResponse, GraphQLWebSocket};
use axum::Router;
use axum::extract::{State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Config;
use crate::db::Database;
use crate::graphql::CatalogSchema;
use crate::services::{AuthError, AuthService};

/// Shared state for HTTP handlers (GraphQL, health routes)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub auth: AuthService,
    pub schema: CatalogSchema,
}

/// Build the full Axum router: health, /graphql, /graphql/ws, layers.
/// Returns Router<()> (state fully applied) for use with axum::serve.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(api::health::router())
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/graphql/ws", get(graphql_ws_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Extract bearer token from Authorization header
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| h.starts_with("Bearer "))
        .map(|h| h[7..].to_string())
}

/// A GraphQL response rejecting the request before execution
fn auth_error_response(message: &str) -> GraphQLResponse {
    let error = async_graphql::Error::new(message)
        .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
        .into_server_error(async_graphql::Pos::default());
    async_graphql::Response::from_errors(vec![error]).into()
}

/// GraphQL query/mutation handler with per-request auth context
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(token) = extract_token(&headers) {
        match state.auth.authenticate(&token).await {
            Ok(Some(user)) => {
                tracing::debug!(username = %user.username, "request authenticated");
                request = request.data(user);
            }
            // verified token for a user that no longer exists: anonymous
            Ok(None) => {
                tracing::debug!("token verified but user no longer exists");
            }
            Err(AuthError::InvalidToken) => {
                tracing::debug!("token verification failed");
                return auth_error_response("invalid authentication token");
            }
            Err(e) => {
                tracing::error!(error = %e, "authentication lookup failed");
                return auth_error_response("authentication failed");
            }
        }
    }

    state.schema.execute(request).await.into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(
            GraphiQLSource::build()
                .endpoint("/graphql")
                .subscription_endpoint("/graphql/ws")
                .finish(),
        )
        .into_response()
    } else {
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}

/// GraphQL WebSocket handler for subscriptions with auth
async fn graphql_ws_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    protocol: GraphQLProtocol,
    ws: WebSocketUpgrade,
) -> axum::response::Response {
    // Derive identity from headers for the initial connection
    let auth_user = match extract_token(&headers) {
        Some(token) => match state.auth.authenticate(&token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!(error = %e, "websocket auth rejected");
                return (
                    axum::http::StatusCode::UNAUTHORIZED,
                    axum::Json(serde_json::json!({
                        "error": "invalid authentication token"
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let schema = state.schema.clone();
    let auth = state.auth.clone();

    ws.protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |socket| {
            let mut ws = GraphQLWebSocket::new(socket, schema, protocol);

            if let Some(user) = auth_user {
                let mut data = async_graphql::Data::default();
                data.insert(user);
                ws = ws.with_data(data);
            }

            // Handle connection_init for auth via payload
            ws.on_connection_init(move |params| {
                let auth = auth.clone();
                async move {
                    if let Some(token) = params
                        .get("Authorization")
                        .or_else(|| params.get("authorization"))
                        .and_then(|v| v.as_str())
                    {
                        let token = token.strip_prefix("Bearer ").unwrap_or(token);
                        match auth.authenticate(token).await {
                            Ok(Some(user)) => {
                                let mut data = async_graphql::Data::default();
                                data.insert(user);
                                return Ok(data);
                            }
                            Ok(None) => {}
                            Err(_) => {
                                return Err(async_graphql::Error::new(
                                    "invalid authentication token",
                                ));
                            }
                        }
                    }
                    Ok(async_graphql::Data::default())
                }
            })
            .serve()
        })
        .into_response()
}
