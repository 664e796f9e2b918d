use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use rota_app::error::AppError;
use rota_core::rotation::ScheduledWeek;
use rota_core::settings::{NotificationTarget, Settings};
use rota_ports::inbound::RotationManager;
use rota_ports::types::{CurrentDriver, DriverChangeRequest};

use crate::error::ApiError;
use crate::extract::ApiJson;

pub type Manager = Arc<dyn RotationManager<Error = AppError>>;

#[derive(Clone)]
pub struct AppState {
    pub manager: Manager,
}

impl AppState {
    pub fn new(manager: Manager) -> Self {
        Self { manager }
    }
}

pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    let api = Router::new()
        .route("/settings", get(get_settings).post(save_settings))
        .route("/current-driver", get(current_driver))
        .route("/schedule", get(schedule))
        .route("/change-driver", post(change_driver))
        .route("/send-message", post(send_message))
        .route("/test-bot", post(test_bot));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    Ok(Json(state.manager.settings().await?))
}

async fn save_settings(
    State(state): State<AppState>,
    ApiJson(settings): ApiJson<Settings>,
) -> Result<Json<Value>, ApiError> {
    let saved = state.manager.save_settings(settings).await?;
    Ok(Json(json!({ "success": true, "settings": saved })))
}

async fn current_driver(State(state): State<AppState>) -> Result<Json<CurrentDriver>, ApiError> {
    Ok(Json(state.manager.current_driver().await?))
}

#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    weeks: Option<usize>,
}

async fn schedule(
    State(state): State<AppState>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> Result<Json<Vec<ScheduledWeek>>, ApiError> {
    let Query(query) = query?;
    let weeks = query.weeks.unwrap_or(8);
    Ok(Json(state.manager.schedule(weeks).await?))
}

async fn change_driver(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DriverChangeRequest>,
) -> Result<Json<Value>, ApiError> {
    let changed = state.manager.change_driver(request).await?;
    Ok(Json(json!({
        "success": true,
        "changedBy": changed.changed_by,
        "previousDriver": changed.previous_driver,
        "newDriver": changed.new_driver,
        "newOrder": changed.order,
    })))
}

#[derive(Debug, Deserialize)]
struct SendMessageBody {
    message: String,
}

async fn send_message(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SendMessageBody>,
) -> Result<Json<Value>, ApiError> {
    state.manager.send_message(&body.message).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestBotBody {
    #[serde(default)]
    bot_token: String,
    #[serde(default)]
    chat_id: String,
}

async fn test_bot(
    State(state): State<AppState>,
    body: Option<ApiJson<TestBotBody>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map(|ApiJson(body)| body).unwrap_or_default();
    let target = NotificationTarget::new(body.bot_token, body.chat_id);
    let bot = state.manager.verify_bot(Some(target)).await?;
    Ok(Json(json!({
        "success": true,
        "botName": bot.display_name(),
        "firstName": bot.first_name,
    })))
}
