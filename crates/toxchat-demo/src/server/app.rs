use crate::models::{ChatConfig, ChatEvent};
use crate::server::{routes, static_files, websocket};
use crate::state::ChatAppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the Axum application
pub fn build_app(state: ChatAppState) -> Router {
    // CORS defaults to local origins; override only for explicit demo use.
    let allow_any_origin = std::env::var("TOXCHAT_ALLOW_ANY_ORIGIN")
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let cors = if allow_any_origin {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ]))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // API routes
    let api_routes = Router::new()
        // Health
        .route("/health", get(routes::health))
        // Readiness and busy flags
        .route("/status", get(routes::status))
        // Conversation
        .route("/transcript", get(routes::get_transcript))
        .route("/messages", post(routes::submit_message))
        // Statistics
        .route("/stats", get(routes::get_stats));

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(websocket::websocket_handler))
        .fallback(static_files::serve_static)
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run_server(config: ChatConfig, addr: SocketAddr) -> anyhow::Result<()> {
    let state = ChatAppState::new(&config)?;

    // Kick off the one-time model load. Readiness surfaces through
    // /api/status and the event stream; submissions are rejected until then.
    let lifecycle = state.lifecycle.clone();
    let event_bus = state.event_bus.clone();
    tokio::spawn(async move {
        lifecycle.start().await;
        match lifecycle.failure() {
            Some(error) => event_bus.publish(ChatEvent::ModelFailed { error }),
            None => event_bus.publish(ChatEvent::ModelReady),
        }
    });

    let app = build_app(state);

    tracing::info!("Starting toxchat server on {}", addr);
    tracing::info!("Open http://{} in your browser", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
