use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::cta::{CallToActionError, CallToActionHandler};
use super::domain::{Answer, QuestionId, SessionId};
use super::service::{QualificationService, QualificationServiceError};
use super::session::SessionError;
use super::store::{SessionStore, SessionStoreError};

type SharedService<S, C> = Arc<QualificationService<S, C>>;

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub question: QuestionId,
    pub answer: Answer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub dragged: String,
    pub target: String,
}

/// Router builder exposing the wizard as HTTP endpoints.
pub fn qualification_router<S, C>(service: SharedService<S, C>) -> Router
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    Router::new()
        .route(
            "/api/v1/qualification/sessions",
            post(start_handler::<S, C>),
        )
        .route(
            "/api/v1/qualification/sessions/:session_id",
            get(view_handler::<S, C>),
        )
        .route(
            "/api/v1/qualification/sessions/:session_id/answers",
            post(answer_handler::<S, C>),
        )
        .route(
            "/api/v1/qualification/sessions/:session_id/priorities/reorder",
            post(reorder_handler::<S, C>),
        )
        .route(
            "/api/v1/qualification/sessions/:session_id/continue",
            post(continue_handler::<S, C>),
        )
        .route(
            "/api/v1/qualification/sessions/:session_id/back",
            post(back_handler::<S, C>),
        )
        .route(
            "/api/v1/qualification/sessions/:session_id/reset",
            post(reset_handler::<S, C>),
        )
        .route(
            "/api/v1/qualification/sessions/:session_id/result",
            get(result_handler::<S, C>),
        )
        .route(
            "/api/v1/qualification/sessions/:session_id/cta",
            post(cta_handler::<S, C>),
        )
        .with_state(service)
}

impl QualificationServiceError {
    /// HTTP status for this failure, shared by the router and `AppError`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(SessionStoreError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
            Self::Answer(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Session(SessionError::ResultNotReady) => StatusCode::CONFLICT,
            Self::CallToAction(CallToActionError::NoAction { .. }) => StatusCode::CONFLICT,
            Self::CallToAction(CallToActionError::Transport(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_response(error: QualificationServiceError) -> Response {
    let status = error.status_code();

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    outcome: Result<T, QualificationServiceError>,
) -> Response {
    match outcome {
        Ok(body) => (status, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn start_handler<S, C>(State(service): State<SharedService<S, C>>) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    respond(StatusCode::CREATED, service.start())
}

pub(crate) async fn view_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    respond(StatusCode::OK, service.view(&SessionId(session_id)))
}

pub(crate) async fn answer_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<AnswerRequest>,
) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    let id = SessionId(session_id);
    respond(
        StatusCode::OK,
        service.answer(&id, request.question, request.answer),
    )
}

pub(crate) async fn reorder_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<ReorderRequest>,
) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    let id = SessionId(session_id);
    respond(
        StatusCode::OK,
        service.reorder_priority(&id, &request.dragged, &request.target),
    )
}

pub(crate) async fn continue_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    respond(StatusCode::OK, service.continue_stage(&SessionId(session_id)))
}

pub(crate) async fn back_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    respond(StatusCode::OK, service.back(&SessionId(session_id)))
}

pub(crate) async fn reset_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    respond(StatusCode::CREATED, service.reset(&SessionId(session_id)))
}

pub(crate) async fn result_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    let id = SessionId(session_id);
    match service.result(&id) {
        Ok(result) => {
            let payload = json!({
                "sessionId": id,
                "badge": result.badge_label(),
                "showSuccessMetrics": result.category.shows_success_metrics(),
                "result": result,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cta_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CallToActionHandler + 'static,
{
    respond(
        StatusCode::ACCEPTED,
        service.trigger_call_to_action(&SessionId(session_id)),
    )
}
