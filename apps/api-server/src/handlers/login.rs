//! Login handler.

use actix_web::{HttpResponse, web};

use bloglist_core::ports::AuthError;
use bloglist_shared::dto::{LoginRequest, LoginResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::info!(username = %req.username, "Login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.tokens.generate_token(user.id, &user.username)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(state.tokens.expiration_seconds()).unwrap_or(0),
        username: user.username,
        name: user.name,
    }))
}
