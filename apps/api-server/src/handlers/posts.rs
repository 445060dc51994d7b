//! Post handlers.

use actix_web::{HttpResponse, web};

use bloglist_core::domain::{Post, PostDraft, PostPatch};
use bloglist_core::error::RepoError;
use bloglist_core::{DeleteDecision, DomainError, PostStats, authorize_delete};
use bloglist_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use super::parse_id;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        author: post.author,
        url: post.url,
        likes: post.likes,
        user: post.user_id.map(|id| id.to_string()),
    }
}

fn not_found(id: uuid::Uuid) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
    .into()
}

/// GET /api/blogs
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/blogs/stats
pub async fn post_stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    Ok(HttpResponse::Ok().json(PostStats::from_posts(&posts)))
}

/// POST /api/blogs
///
/// With a bearer token the caller becomes the post's owner.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let owner = match identity.0 {
        Some(actor) => {
            let user = state
                .users
                .find_by_id(actor.user_id)
                .await?
                .ok_or(AppError::Unauthorized)?;
            tracing::debug!(username = %actor.username, "Creating post on behalf of user");
            Some(user.id)
        }
        None => None,
    };

    let draft = PostDraft {
        title: req.title,
        author: req.author,
        url: req.url,
        likes: req.likes,
    };
    let post = Post::from_draft(draft, owner)?;
    let saved = state.posts.save(post).await?;

    if let Some(user_id) = owner {
        if let Err(e) = state.users.link_post(user_id, saved.id).await {
            // Roll back: every owned post must be listed by its owner.
            if let Err(cleanup) = state.posts.delete(saved.id).await {
                tracing::error!(post_id = %saved.id, error = %cleanup, "Failed to remove unlinked post");
            }
            return Err(e.into());
        }
    }

    tracing::info!(post_id = %saved.id, "Post created");
    Ok(HttpResponse::Created().json(post_response(saved)))
}

/// PUT /api/blogs/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = body.into_inner();

    let mut post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    let patch = PostPatch {
        title: req.title,
        author: req.author,
        url: req.url,
        likes: req.likes,
    };
    patch.apply(&mut post)?;

    let updated = state.posts.update(post).await?;
    tracing::info!(post_id = %id, likes = updated.likes, "Post updated");

    Ok(HttpResponse::Ok().json(post_response(updated)))
}

/// DELETE /api/blogs/{id}
///
/// Only the owner may delete an owned post. Posts without an owner can be
/// deleted by any authenticated user.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    if let DeleteDecision::Deny(reason) = authorize_delete(identity.user_id(), &post) {
        tracing::warn!(post_id = %id, ?reason, "Post deletion denied");
        return Err(DomainError::DeleteDenied(reason).into());
    }

    state.posts.delete(id).await?;

    if let Some(owner_id) = post.user_id {
        match state.users.unlink_post(owner_id, id).await {
            Ok(()) | Err(RepoError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
