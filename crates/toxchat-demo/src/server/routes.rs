use crate::models::{ChatEvent, StatusResponse, SubmitRequest, SubmitResponse};
use crate::state::ChatAppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use toxchat_core::Error;
use uuid::Uuid;

// ============================================================================
// Health and status
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn status(State(state): State<ChatAppState>) -> impl IntoResponse {
    Json(StatusResponse {
        has_loaded: state.lifecycle.is_ready(),
        is_classifying: state.session.is_classifying(),
        load_error: state.lifecycle.failure(),
    })
}

// ============================================================================
// Conversation
// ============================================================================

pub async fn get_transcript(State(state): State<ChatAppState>) -> impl IntoResponse {
    Json(state.transcript.messages())
}

pub async fn submit_message(
    State(state): State<ChatAppState>,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    let submission_id = Uuid::new_v4();

    match state.session.submit(&req.text).await {
        Ok(outcome) => {
            state.metrics.record_verdict(&outcome.verdict);

            tracing::info!(
                %submission_id,
                is_toxic = outcome.verdict.is_toxic,
                "submission applied"
            );

            let messages = outcome.appended.to_vec();
            state.event_bus.publish(ChatEvent::MessagesAppended {
                messages: messages.clone(),
            });
            state.event_bus.publish(ChatEvent::StatsUpdate(
                state.metrics.snapshot(state.transcript.len()),
            ));

            (
                StatusCode::OK,
                Json(SubmitResponse {
                    messages,
                    clear_input: outcome.clear_input,
                    verdict: outcome.verdict,
                }),
            )
                .into_response()
        }
        Err(error) => {
            match error {
                Error::Model(_) | Error::Contract(_) => state.metrics.record_failure(),
                _ => state.metrics.record_rejection(),
            }

            tracing::warn!(%submission_id, %error, "submission not applied");

            (
                error_status(&error),
                Json(serde_json::json!({ "error": error.to_string() })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

pub async fn get_stats(State(state): State<ChatAppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot(state.transcript.len()))
}

fn error_status(error: &Error) -> StatusCode {
    match error {
        Error::ModelNotReady => StatusCode::SERVICE_UNAVAILABLE,
        Error::Busy => StatusCode::CONFLICT,
        Error::EmptyMessage => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Model(_) | Error::Contract(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
