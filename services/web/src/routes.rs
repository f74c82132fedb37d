//! Web front end routes

use axum::{
    Form, Json, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{AppState, client::ClientError, pages, session};

/// Username/password form fields
#[derive(Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Create the router for the web front end
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/data", get(data_view))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "web"
    }))
}

/// Landing page
pub async fn index(jar: CookieJar) -> impl IntoResponse {
    Html(pages::index(session::username(&jar).as_deref()))
}

/// Login page
pub async fn login_form() -> impl IntoResponse {
    Html(pages::login_form(None, ""))
}

/// Login form submission
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match state.client.login(&form.username, &form.password).await {
        Ok(grant) => {
            info!("User {} signed in", form.username);
            let jar = session::start(
                jar,
                grant.token,
                &form.username,
                grant.expires_in,
                state.cookie_secure,
            );
            (jar, Redirect::to("/data")).into_response()
        }
        Err(e) => {
            warn!("Login for {} failed: {}", form.username, e);
            let message = e.user_message();
            (
                e.status(),
                Html(pages::login_form(Some(message.as_str()), &form.username)),
            )
                .into_response()
        }
    }
}

/// Registration page
pub async fn register_form() -> impl IntoResponse {
    Html(pages::register_form(None, ""))
}

/// Registration form submission
pub async fn register(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    match state.client.register(&form.username, &form.password).await {
        Ok(()) => Html(pages::registered(&form.username)).into_response(),
        Err(e) => {
            warn!("Registration of {} failed: {}", form.username, e);
            let message = e.user_message();
            (
                e.status(),
                Html(pages::register_form(Some(message.as_str()), &form.username)),
            )
                .into_response()
        }
    }
}

/// Table of rows from the data endpoint
pub async fn data_view(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(token) = session::token(&jar) else {
        return Redirect::to("/login").into_response();
    };

    match state.client.fetch_rows(&token).await {
        Ok(rows) => Html(pages::data_table(&rows)).into_response(),
        Err(ClientError::Unauthorized(_)) => {
            info!("Session token rejected, redirecting to login");
            (session::end(jar), Redirect::to("/login")).into_response()
        }
        Err(e) => {
            warn!("Failed to load data: {}", e);
            (e.status(), Html(pages::error_page(&e.user_message()))).into_response()
        }
    }
}
