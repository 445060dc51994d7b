//! Application state - shared across all handlers.

use std::sync::Arc;

use bloglist_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use bloglist_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtTokenService,
};

use crate::config::AppConfig;
use crate::middleware::pipeline::RequestPipeline;

#[cfg(feature = "postgres")]
use bloglist_infra::database::{
    DatabaseConnections, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state. Every collaborator a handler needs is reached
/// through here; nothing is process-global.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    pub auth_pipeline: Arc<RequestPipeline>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let (posts, users) = Self::repositories(config).await;

        tracing::info!("Application state initialized");

        Self::from_parts(posts, users, passwords, tokens)
    }

    /// Assemble state from already-built collaborators.
    pub fn from_parts(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        let auth_pipeline = Arc::new(RequestPipeline::authentication(tokens.clone()));

        Self {
            posts,
            users,
            passwords,
            tokens,
            auth_pipeline,
        }
    }

    fn in_memory() -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        (posts, users)
    }

    #[cfg(feature = "postgres")]
    async fn repositories(
        config: &AppConfig,
    ) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => {
                let posts: Arc<dyn PostRepository> =
                    Arc::new(PostgresPostRepository::new(connections.main.clone()));
                let users: Arc<dyn UserRepository> =
                    Arc::new(PostgresUserRepository::new(connections.main));
                (posts, users)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(
        _config: &AppConfig,
    ) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory()
    }
}
