//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use bloglist_core::ports::AuthError;
use bloglist_shared::ErrorResponse;

use super::pipeline::{Actor, RequestContext};
use crate::state::AppState;

/// Caller identity extractor that accepts anonymous requests.
///
/// A missing `Authorization` header yields `None`; a present but invalid
/// one is rejected with 401.
/// ```ignore
/// async fn handler(identity: OptionalIdentity) -> impl Responder {
///     match identity.0 {
///         Some(actor) => format!("Hello, {}!", actor.username),
///         None => "Hello, stranger!".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Actor>);

impl OptionalIdentity {
    pub fn user_id(&self) -> Option<uuid::Uuid> {
        self.0.as_ref().map(|actor| actor.user_id)
    }
}

/// Error type for authentication failures.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthenticationError(pub AuthError);

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match &self.0 {
            AuthError::TokenExpired
            | AuthError::InvalidToken(_)
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::InvalidCredentials => ErrorResponse::unauthorized(),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

/// Run the app's authentication pipeline over the request headers.
fn authenticate(req: &HttpRequest) -> Result<Option<Actor>, AuthError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Err(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        ));
    };

    let ctx = state.auth_pipeline.run(RequestContext::from_request(req)?)?;
    Ok(ctx.actor)
}

impl FromRequest for OptionalIdentity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            authenticate(req)
                .map(OptionalIdentity)
                .map_err(AuthenticationError),
        )
    }
}
