//! HTTP server answering with single-event SSE responses.
//!
//! `/tools` returns the capability descriptor and `/execute` runs one tool.
//! Each response is framed as a single `data: <json>\n\n` event, after which
//! the stream ends.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, HeaderValue, StatusCode},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{any, get, post},
    Router,
};
use futures::stream::{self, Stream};
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder;
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use super::idle_timeout::IdleTimeout;
use crate::domain::models::{ExecuteParams, HttpConfig};
use crate::services::Dispatcher;

/// Shared state for the SSE HTTP server.
pub struct SseState {
    pub dispatcher: Arc<Dispatcher>,
}

/// SSE HTTP Server.
pub struct SseHttpServer {
    config: HttpConfig,
    state: Arc<SseState>,
}

impl SseHttpServer {
    pub fn new(dispatcher: Arc<Dispatcher>, config: HttpConfig) -> Self {
        Self {
            config,
            state: Arc::new(SseState { dispatcher }),
        }
    }

    /// Build the router with all endpoints.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/tools", any(list_tools))
            .route("/execute", post(execute_tool).fallback(method_not_allowed))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
            .layer(DefaultBodyLimit::disable())
            .layer(TimeoutLayer::new(self.config.write_timeout()))
            .layer(RequestBodyTimeoutLayer::new(self.config.read_timeout()))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
    }

    /// Start the server.
    pub async fn serve(self) -> anyhow::Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server, stopping once `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.config.bind_address().parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    ///
    /// Request headers must arrive within `read_timeout`, and a keep-alive
    /// connection with no traffic for `idle_timeout` is closed. Once
    /// `shutdown` resolves no new connections are accepted and in-flight
    /// requests get up to `write_timeout` to finish.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let service = TowerToHyperService::new(self.build_router());
        let idle = self.config.idle_timeout();

        let mut builder = Builder::new(TokioExecutor::new());
        builder
            .http1()
            .timer(TokioTimer::new())
            .header_read_timeout(self.config.read_timeout());

        let graceful = GracefulShutdown::new();
        info!("MCP SSE HTTP server listening on {}", listener.local_addr()?);

        tokio::pin!(shutdown);
        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        continue;
                    }
                },
                () = &mut shutdown => break,
            };

            let io = TokioIo::new(IdleTimeout::new(stream, idle));
            let conn = builder.serve_connection(io, service.clone());
            let conn = graceful.watch(conn.into_owned());
            tokio::spawn(async move {
                if let Err(e) = conn.await {
                    debug!(%peer, error = %e, "connection closed");
                }
            });
        }
        drop(listener);

        let drain = self.config.write_timeout();
        tokio::select! {
            () = graceful.shutdown() => {}
            () = tokio::time::sleep(drain) => {
                warn!(grace = ?drain, "connections still open after shutdown grace period, closing");
            }
        }

        info!("MCP SSE HTTP server stopped");
        Ok(())
    }
}

/// Wrap a JSON payload as a one-shot event stream with the headers clients expect.
fn single_event(payload: String) -> Response {
    let event = Event::default().data(payload);
    event_response(stream::once(async move { Ok::<_, Infallible>(event) }))
}

fn event_response<S>(stream: S) -> Response
where
    S: Stream<Item = Result<Event, Infallible>> + Send + 'static,
{
    let mut response = Sse::new(stream).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    response
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn list_tools(State(state): State<Arc<SseState>>) -> Response {
    let payload = serde_json::to_string(state.dispatcher.describe()).unwrap_or_else(|e| {
        error!(error = %e, "failed to serialize tool definitions");
        r#"{"error":"Error Marshalling the Json"}"#.to_string()
    });
    info!("tool definitions sent");
    single_event(payload)
}

async fn execute_tool(
    State(state): State<Arc<SseState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "failed to read request body");
            return (StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text()).into_response();
        }
    };

    let params = match ExecuteParams::from_json(&body) {
        Ok(params) => params,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let response = state
        .dispatcher
        .execute(&params.tool_name, &params.arguments);
    let payload = response.to_json_or_fallback();

    info!(tool = %params.tool_name, "executed tool (SSE)");
    single_event(payload)
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Only POST method is valid")
}
