//! HTTP handlers and route configuration.

mod health;
mod login;
mod posts;
mod users;

use actix_web::{HttpResponse, web};
use bloglist_shared::ErrorResponse;
use uuid::Uuid;

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/login", web::post().to(login::login))
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/stats", web::get().to(posts::post_stats))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list_users))
                    .route("", web::post().to(users::create_user)),
            ),
    );
}

/// Malformed JSON bodies become problem documents instead of plain text.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Fallback for every unmatched path.
pub async fn unknown_endpoint(request_id: RequestId) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::not_found("unknown endpoint").with_request_id(request_id.as_str()),
    )
}

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("malformed id".to_string()))
}
