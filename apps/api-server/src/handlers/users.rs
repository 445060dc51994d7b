//! User handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use bloglist_core::DomainError;
use bloglist_core::domain::{Post, User};
use bloglist_core::error::RepoError;
use bloglist_core::validation::validate_registration;
use bloglist_shared::dto::{CreateUserRequest, OwnedPostResponse, UserResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: User, posts: &HashMap<uuid::Uuid, Post>) -> UserResponse {
    let blogs = user
        .post_ids
        .iter()
        .filter_map(|id| posts.get(id))
        .map(|post| OwnedPostResponse {
            id: post.id.to_string(),
            title: post.title.clone(),
            author: post.author.clone(),
            url: post.url.clone(),
            likes: post.likes,
        })
        .collect();

    UserResponse {
        id: user.id.to_string(),
        username: user.username,
        name: user.name,
        blogs,
    }
}

/// GET /api/users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;
    let posts: HashMap<_, _> = state
        .posts
        .find_all()
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let body: Vec<UserResponse> = users
        .into_iter()
        .map(|user| user_response(user, &posts))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_registration(&req.username, &req.password)?;

    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(DomainError::UsernameTaken.into());
    }

    let password_hash = state.passwords.hash(&req.password)?;

    let user = User::new(req.username, req.name, password_hash);
    let saved = match state.users.save(user).await {
        Ok(saved) => saved,
        // Lost a race with a concurrent registration.
        Err(RepoError::Constraint(_)) => {
            return Err(DomainError::UsernameTaken.into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %saved.id, username = %saved.username, "User registered");
    Ok(HttpResponse::Created().json(user_response(saved, &HashMap::new())))
}
