use crate::db::{ContactRepo, NewContact};
use crate::error::AppResult;
use crate::tools;
use crate::web::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List registered tool definitions for the chat front end
pub async fn list_tools() -> Json<Vec<tools::ToolDefinition>> {
    Json(tools::definitions())
}

/// Invoke a tool by name with the model's arguments
pub async fn invoke_tool(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Json(arguments): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    let result = tools::dispatch(&state, &name, arguments).await?;
    Ok(Json(result))
}

/// Add a contact
pub async fn add_contact(
    State(state): State<AppState>,
    Json(new_contact): Json<NewContact>,
) -> AppResult<Json<serde_json::Value>> {
    let result = tools::contacts::add(&state, new_contact).await?;
    Ok(Json(result))
}

/// Bounded contact listing
pub async fn list_contacts(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let contacts = ContactRepo::list(&state.pool).await?;
    Ok(Json(serde_json::json!({ "contacts": contacts })))
}

/// Create the web router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let audio_dir = state.audio_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/api/transaction", post(crate::web::transaction::generic))
        .route(
            "/api/transaction/confirm",
            post(crate::web::transaction::confirm),
        )
        .route(
            "/api/transaction/preview",
            post(crate::web::transaction::preview),
        )
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(invoke_tool))
        .route("/api/contacts", get(list_contacts).post(add_contact))
        .route("/api/audio/transcribe", post(crate::web::audio::transcribe))
        .route("/api/text-to-speech", post(crate::web::audio::synthesize))
        .route(
            "/api/text-to-speech/delete",
            post(crate::web::audio::delete),
        )
        .nest_service("/audio", ServeDir::new(audio_dir))
        .with_state(state)
        .layer(cors)
}
