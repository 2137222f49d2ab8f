//! `/users` handlers.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use bistro_core::input::{LoginInput, RegisterUserInput, UpdateProfileInput};
use bistro_core::User;

use crate::auth::{Actor, ACCESS_TOKEN_COOKIE};
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).patch(update_profile))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterUserInput>,
) -> ApiResult<ApiResponse<User>> {
    let user = state.users.register(input).await?;
    Ok(ApiResponse::created(user, "User created successfully"))
}

/// Returns the token pair in the body and sets the access token cookie.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> ApiResult<Response> {
    let result = state.users.login(input).await?;
    let secure = if state.config.is_production() { "; Secure" } else { "" };
    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}{}",
        ACCESS_TOKEN_COOKIE, result.access_token, state.config.jwt_access_lifetime_secs, secure
    );

    let mut response = ApiResponse::ok(result, "Login successful").into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    Ok(response)
}

async fn logout(State(state): State<AppState>, actor: Actor) -> ApiResult<Response> {
    state.users.logout(&actor).await?;

    let mut response = ApiResponse::ok((), "Logout successful").into_response();
    let cleared = format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", ACCESS_TOKEN_COOKIE);
    if let Ok(value) = HeaderValue::from_str(&cleared) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    Ok(response)
}

async fn list_users(State(state): State<AppState>, _actor: Actor) -> ApiResult<ApiResponse<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(ApiResponse::ok(users, "Users fetched successfully"))
}

async fn update_profile(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(input): ValidatedJson<UpdateProfileInput>,
) -> ApiResult<ApiResponse<User>> {
    let user = state.users.update_profile(&actor, input).await?;
    Ok(ApiResponse::ok(user, "Profile updated successfully"))
}
