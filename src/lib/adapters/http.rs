use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{Form, Path, Query, Request, State},
    http::{HeaderMap, Method, StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, patch, post},
};
use serde::Deserialize;
use tokio::net;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::adapters::assets;
use crate::core::{AppError, TodoDraft, TodoPatch};
use crate::storage::TodoStore;
use crate::stream::{StreamPatch, accepts_turbo_stream, stream_response};
use crate::views::{self, FormState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig<'a> {
    pub port: &'a str,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

const CREATED_NOTICE_PATH: &str = "/todos?notice=Todo+was+successfully+created.";
const UPDATED_NOTICE_PATH: &str = "/todos?notice=Todo+was+successfully+updated.";
const DESTROYED_NOTICE_PATH: &str = "/todos?notice=Todo+was+successfully+destroyed.";

#[derive(Deserialize)]
pub struct IndexParams {
    notice: Option<String>,
}

/// Form body for create and update. `_method` is consumed by the override
/// middleware and ignored here.
#[derive(Debug, Default, Deserialize)]
pub struct TodoForm {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

pub async fn index_todos(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<Html<String>, AppError> {
    let todos = state.store.list().await?;
    Ok(Html(views::index_page(
        &todos,
        &FormState::default(),
        params.notice.as_deref(),
    )))
}

pub async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let draft = TodoDraft {
        title: form.title.unwrap_or_default(),
        completed: form.completed.unwrap_or(false),
    };
    match state.store.create(&draft).await {
        Ok(todo) => {
            tracing::info!(id = todo.id, "todo created");
            if accepts_turbo_stream(&headers) {
                Ok(stream_response(vec![StreamPatch::prepend(
                    "todos",
                    views::todo_item(&todo),
                )]))
            } else {
                Ok(Redirect::to(CREATED_NOTICE_PATH).into_response())
            }
        }
        Err(AppError::Validation(message)) => {
            // Re-render the list with the entered title preserved.
            let todos = state.store.list().await?;
            let form = FormState::invalid(draft.title, message);
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::index_page(&todos, &form, None)),
            )
                .into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn edit_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let todo = state.store.find(id).await?;
    let form = FormState {
        title: todo.title.clone(),
        error: None,
    };
    Ok(Html(views::edit_page(&todo, &form)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let todo = state.store.find(id).await?;
    let patch = TodoPatch {
        title: form.title.clone(),
        completed: form.completed,
    };
    match state.store.update(id, &patch).await {
        Ok(updated) => {
            tracing::info!(id, "todo updated");
            if accepts_turbo_stream(&headers) {
                Ok(stream_response(vec![StreamPatch::replace(
                    views::dom_id(updated.id),
                    views::todo_item(&updated),
                )]))
            } else {
                Ok(Redirect::to(UPDATED_NOTICE_PATH).into_response())
            }
        }
        Err(AppError::Validation(message)) => {
            let form = FormState::invalid(form.title.unwrap_or_default(), message);
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::edit_page(&todo, &form)),
            )
                .into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn destroy_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    state.store.delete(id).await?;
    tracing::info!(id, "todo destroyed");
    if accepts_turbo_stream(&headers) {
        Ok(stream_response(vec![StreamPatch::remove(views::dom_id(id))]))
    } else {
        Ok(Redirect::to(DESTROYED_NOTICE_PATH).into_response())
    }
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let todo = state.store.find(id).await?;
    let patch = TodoPatch {
        title: None,
        completed: Some(!todo.completed),
    };
    let todo = state.store.update(id, &patch).await?;
    if accepts_turbo_stream(&headers) {
        Ok(stream_response(vec![StreamPatch::replace(
            views::dom_id(todo.id),
            views::todo_item(&todo),
        )]))
    } else {
        // Toggling redirects without a notice.
        Ok(Redirect::to("/todos").into_response())
    }
}

async fn root_redirect() -> Redirect {
    Redirect::to("/todos")
}

async fn health_route() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const METHOD_FIELD: &str = "_method";
const OVERRIDE_BODY_LIMIT: usize = 64 * 1024;

/// Translates `POST` + `_method=patch|put|delete` form submissions into the
/// real verb, so plain HTML forms can reach the PATCH/DELETE routes.
pub async fn method_override(request: Request, next: Next) -> Response {
    if request.method() != Method::POST || !is_form_request(request.headers()) {
        return next.run(request).await;
    }
    let (mut parts, body) = request.into_parts();
    let bytes = match to_bytes(body, OVERRIDE_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::PAYLOAD_TOO_LARGE.into_response(),
    };
    if let Some(method) = override_method(&bytes) {
        tracing::debug!(method = %method, "rewrote form method");
        parts.method = method;
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn is_form_request(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with(FORM_CONTENT_TYPE))
}

fn override_method(body: &[u8]) -> Option<Method> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body).ok()?;
    let value = pairs.into_iter().find(|(key, _)| key == METHOD_FIELD)?.1;
    match value.to_ascii_lowercase().as_str() {
        "patch" => Some(Method::PATCH),
        "put" => Some(Method::PUT),
        "delete" => Some(Method::DELETE),
        _ => None,
    }
}

pub fn router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            let uri = request.uri().to_string();
            tracing::info_span!("http_request", method = ?request.method(), uri)
        });

    let inner = Router::new()
        .route("/", get(root_redirect))
        .route("/health", get(health_route))
        .route("/todos", get(index_todos).post(create_todo))
        .route("/todos/{id}", patch(update_todo).delete(destroy_todo))
        .route("/todos/{id}/edit", get(edit_todo))
        .route("/todos/{id}/toggle", post(toggle_todo))
        .route("/assets/application.css", get(assets::application_css))
        .route("/assets/reset_form.js", get(assets::reset_form_js))
        .route("/assets/todo_item.js", get(assets::todo_item_js))
        .with_state(state);

    // `method_override` must run *before* routing: applying it via the inner
    // `Router::layer` pushes it inside each `MethodRouter`, so a `POST` that
    // doesn't match a route's verbs is sent to the built-in 405 handler before
    // the override can re-dispatch it. Wrapping the routed router as a fallback
    // service lets the override rewrite the method, then route fresh.
    Router::new()
        .fallback_service(inner)
        .layer(middleware::from_fn(method_override))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
}

pub struct HttpServer {
    router: Router,
    listener: net::TcpListener,
}

impl HttpServer {
    pub async fn new(
        store: Arc<dyn TodoStore>,
        config: HttpServerConfig<'_>,
    ) -> anyhow::Result<Self> {
        let state = AppState { store };
        let router = router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port.parse::<u16>().unwrap_or(3000)));
        let listener = net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to listen on port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!("listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router)
            .await
            .context("received error from running server")?;
        Ok(())
    }
}
