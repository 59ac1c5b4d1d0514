//! Auth API Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use validator::Validate;

use shared::{LoginRequest, LoginResponse, ProfileUpdateRequest, RegisterRequest, UserInfo};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Fixed login latency so response timing does not reveal whether the
/// e-mail exists.
const LOGIN_DELAY: Duration = Duration::from_millis(500);

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        photo_url: user.photo_url,
        created_at: user.created_at,
    }
}

/// Create an account and log it in.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(UserCreate {
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;

    let info = user_info(user);
    let token = state
        .get_jwt_service()
        .generate_token(
            &info.id,
            &info.email,
            &format!("{} {}", info.first_name, info.last_name),
        )
        .map_err(|e| AppError::internal(format!("Failed to issue token: {}", e)))?;

    security_log!("INFO", "register", email = info.email.clone());
    Ok(Json(LoginResponse { token, user: info }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    tokio::time::sleep(LOGIN_DELAY).await;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !user.verify_password(&payload.password) {
        security_log!("WARN", "login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let info = user_info(user);
    let token = state
        .get_jwt_service()
        .generate_token(
            &info.id,
            &info.email,
            &format!("{} {}", info.first_name, info.last_name),
        )
        .map_err(|e| AppError::internal(format!("Failed to issue token: {}", e)))?;

    security_log!("INFO", "login", email = info.email.clone());
    Ok(Json(LoginResponse { token, user: info }))
}

/// Stateless logout; the client discards its token.
pub async fn logout(user: CurrentUser) -> Json<Value> {
    security_log!("INFO", "logout", email = user.email);
    Json(json!({ "success": true }))
}

pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<UserInfo>> {
    let repo = UserRepository::new(state.get_db());
    let account = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))?;
    Ok(Json(user_info(account)))
}

pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfileUpdateRequest>,
) -> AppResult<Json<UserInfo>> {
    payload.validate()?;

    let repo = UserRepository::new(state.get_db());
    let updated = repo
        .update(
            &user.id,
            UserUpdate {
                first_name: payload.first_name,
                last_name: payload.last_name,
                photo_url: payload.photo_url,
            },
        )
        .await?;
    Ok(Json(user_info(updated)))
}
