//! HTTP transport - maps requests onto `QuestionService` calls.
//!
//! ## Routes
//!
//! - `GET /questions?tags=<filter>` — list, newest first, optional tag filter
//! - `POST /questions` — create (identity required), 201
//! - `GET /questions/:id` — one question with answers expanded
//! - `PUT /questions/:id` — partial update of title/content/tags
//! - `PATCH /questions/:id/solution` — mark an answer as the solution
//! - `DELETE /questions/:id` — delete the question and its answers
//! - `POST /questions/:id/upvote` — upvote (identity required)
//! - `POST /questions/:id/downvote` — downvote (identity required)
//! - `POST /questions/:id/removevote` — clear the caller's vote (identity required)
//! - `POST /questions/:id/answers` — answer a question (identity required), 201
//! - `GET /health` — health check returning `{ "ok": true }`
//!
//! Handlers stay thin: decode the body, read the forwarded identity where
//! the operation needs one, call the service, shape the confirmation.
//! Every failure funnels through the `IntoResponse` impl on
//! [`ServiceError`], so status mapping lives in exactly one place.
//!
//! Tags arrive on the wire as a comma-separated string (create, update) or
//! a substring filter (list); the split happens here, at the boundary, and
//! the service only ever sees the parsed sequence.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

use crate::domain::views::{AnswerView, QuestionDetailView, QuestionView};
use crate::domain::Question;
use crate::service::{NewAnswer, NewQuestion, QuestionPatch, QuestionService, ServiceError};
use crate::store::DocumentStore;

use super::session::{identity_from_headers, USER_ID_HEADER};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the application router over the given service.
pub fn router<S: DocumentStore + 'static>(
    service: Arc<QuestionService<S>>,
    request_timeout: Duration,
) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/questions", get(list_handler).post(create_handler))
        .route(
            "/questions/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/questions/:id/solution", patch(solution_handler))
        .route("/questions/:id/upvote", post(upvote_handler))
        .route("/questions/:id/downvote", post(downvote_handler))
        .route("/questions/:id/removevote", post(remove_vote_handler))
        .route("/questions/:id/answers", post(add_answer_handler))
        .layer(cors)
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(service)
}

/// Serve the router at the given address (e.g. `"0.0.0.0:8080"`) until
/// Ctrl+C or SIGTERM.
pub async fn serve<S: DocumentStore + 'static>(
    service: Arc<QuestionService<S>>,
    addr: &str,
    request_timeout: Duration,
) -> Result<(), std::io::Error> {
    let app = router(service, request_timeout);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    tags: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateQuestionBody {
    title: String,
    content: String,
    /// Comma-separated, e.g. `"js,node"`.
    tags: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateQuestionBody {
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolutionBody {
    answer_id: String,
}

#[derive(Debug, Deserialize)]
struct AnswerBody {
    content: String,
}

/// `GET /health`
async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /questions?tags=<filter>`
async fn list_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<QuestionView>>, ServiceError> {
    let questions = service.list(params.tags.as_deref())?;
    Ok(Json(questions))
}

/// `POST /questions`
async fn create_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    headers: HeaderMap,
    Json(body): Json<CreateQuestionBody>,
) -> Result<(StatusCode, Json<QuestionView>), ServiceError> {
    let identity = identity_from_headers(&headers)?;

    let new = NewQuestion {
        title: body.title,
        content: body.content,
        tags: body.tags.as_deref().map(Question::parse_tags),
    };
    let question = service.create(new, &identity.user_id)?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// `GET /questions/:id`
async fn get_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Path(id): Path<String>,
) -> Result<Json<QuestionDetailView>, ServiceError> {
    let question = service.get(&id)?;
    Ok(Json(question))
}

/// `PUT /questions/:id`
async fn update_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateQuestionBody>,
) -> Result<Json<QuestionView>, ServiceError> {
    let patch = QuestionPatch {
        title: body.title,
        content: body.content,
        tags: body.tags.as_deref().map(Question::parse_tags),
    };
    let question = service.update(&id, patch)?;
    Ok(Json(question))
}

/// `PATCH /questions/:id/solution`
async fn solution_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Path(id): Path<String>,
    Json(body): Json<SolutionBody>,
) -> Result<Json<Value>, ServiceError> {
    let data = service.mark_solution(&id, &body.answer_id)?;
    Ok(Json(json!({ "message": "solution selected", "data": data })))
}

/// `DELETE /questions/:id`
async fn delete_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    service.delete(&id)?;
    Ok(Json(json!({ "message": "question deleted" })))
}

/// `POST /questions/:id/upvote`
async fn upvote_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ServiceError> {
    let identity = identity_from_headers(&headers)?;
    service.upvote(&id, &identity.user_id)?;
    Ok(Json(json!({ "message": "upvote recorded" })))
}

/// `POST /questions/:id/downvote`
async fn downvote_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ServiceError> {
    let identity = identity_from_headers(&headers)?;
    let update = service.downvote(&id, &identity.user_id)?;
    Ok(Json(json!({ "update": update, "message": "downvote recorded" })))
}

/// `POST /questions/:id/removevote`
async fn remove_vote_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ServiceError> {
    let identity = identity_from_headers(&headers)?;
    let update = service.remove_vote(&id, &identity.user_id)?;
    Ok(Json(json!({ "update": update, "message": "vote removed" })))
}

/// `POST /questions/:id/answers`
async fn add_answer_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<QuestionService<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<AnswerBody>,
) -> Result<(StatusCode, Json<AnswerView>), ServiceError> {
    let identity = identity_from_headers(&headers)?;

    let answer = service.add_answer(
        &id,
        NewAnswer {
            content: body.content,
        },
        &identity.user_id,
    )?;
    Ok((StatusCode::CREATED, Json(answer)))
}
