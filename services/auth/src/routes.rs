//! Authentication service routes

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    error::{AuthError, AuthResult},
    middleware::{AuthUser, auth_middleware},
    models::Credentials,
};

/// Response for user registration
#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: Uuid,
    pub username: String,
}

/// Response for user login
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route("/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "auth-service",
        "database": state.auth_service.store_healthy().await,
    }))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AuthResult<impl IntoResponse> {
    let Json(credentials) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;
    info!("Registration attempt for user: {}", credentials.username);

    let user = state.auth_service.register(credentials).await?;

    let response = RegisterResponse {
        message: "User registered".to_string(),
        id: user.id,
        username: user.username,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AuthResult<impl IntoResponse> {
    let Json(credentials) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;
    info!("Login attempt for user: {}", credentials.username);

    let issued = state.auth_service.login(credentials).await?;

    let response = LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// All registered users
pub async fn list_users(State(state): State<AppState>) -> AuthResult<impl IntoResponse> {
    let users = state.auth_service.list_users().await?;
    Ok(Json(users))
}

/// The user the session token was issued to
pub async fn current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AuthResult<impl IntoResponse> {
    let user = state.auth_service.current_user(user.id).await?;
    Ok(Json(user))
}
