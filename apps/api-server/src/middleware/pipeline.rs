//! Request authentication pipeline.
//!
//! An ordered list of stages, each taking the request context produced by
//! the previous one. The first failing stage short-circuits the run.

use std::sync::Arc;

use actix_web::{HttpRequest, http::header};
use bloglist_core::ports::{AuthError, TokenService};
use uuid::Uuid;

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub username: String,
}

/// Per-request state threaded through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Raw `Authorization` header value.
    pub authorization: Option<String>,
    /// Bearer token extracted from the header.
    pub token: Option<String>,
    /// Caller identified by a verified token.
    pub actor: Option<Actor>,
}

impl RequestContext {
    pub fn from_request(req: &HttpRequest) -> Result<Self, AuthError> {
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| {
                value
                    .to_str()
                    .map(String::from)
                    .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))
            })
            .transpose()?;

        Ok(Self {
            authorization,
            ..Self::default()
        })
    }
}

/// A single request-transforming step.
pub trait RequestStage: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &'static str;

    fn apply(&self, ctx: RequestContext) -> Result<RequestContext, AuthError>;
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub struct BearerTokenStage;

impl RequestStage for BearerTokenStage {
    fn name(&self) -> &'static str {
        "bearer-token"
    }

    fn apply(&self, mut ctx: RequestContext) -> Result<RequestContext, AuthError> {
        let Some(auth) = ctx.authorization.as_deref() else {
            return Ok(ctx);
        };

        let token = auth
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

        ctx.token = Some(token.to_string());
        Ok(ctx)
    }
}

/// Verifies the token and records who is calling.
pub struct ActorStage {
    tokens: Arc<dyn TokenService>,
}

impl ActorStage {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

impl RequestStage for ActorStage {
    fn name(&self) -> &'static str {
        "actor"
    }

    fn apply(&self, mut ctx: RequestContext) -> Result<RequestContext, AuthError> {
        if let Some(token) = ctx.token.as_deref() {
            let claims = self.tokens.validate_token(token)?;
            ctx.actor = Some(Actor {
                user_id: claims.user_id,
                username: claims.username,
            });
        }
        Ok(ctx)
    }
}

/// Ordered, fail-fast sequence of [`RequestStage`]s.
#[derive(Default)]
pub struct RequestPipeline {
    stages: Vec<Box<dyn RequestStage>>,
}

impl RequestPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token extraction followed by token verification.
    pub fn authentication(tokens: Arc<dyn TokenService>) -> Self {
        Self::new()
            .stage(BearerTokenStage)
            .stage(ActorStage::new(tokens))
    }

    /// Append a stage to the end of the pipeline.
    pub fn stage(mut self, stage: impl RequestStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run(&self, ctx: RequestContext) -> Result<RequestContext, AuthError> {
        self.stages.iter().try_fold(ctx, |ctx, stage| {
            stage.apply(ctx).inspect_err(|e| {
                tracing::debug!(stage = stage.name(), error = %e, "Request rejected");
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloglist_infra::{JwtConfig, JwtTokenService};

    fn tokens() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "pipeline-secret".to_string(),
            expiration_hours: 1,
            issuer: "pipeline-test".to_string(),
        }))
    }

    fn with_header(value: &str) -> RequestContext {
        RequestContext {
            authorization: Some(value.to_string()),
            ..RequestContext::default()
        }
    }

    #[test]
    fn test_authentication_pipeline_has_two_stages() {
        let pipeline = RequestPipeline::authentication(tokens());
        assert_eq!(pipeline.len(), 2);
        assert!(RequestPipeline::new().is_empty());
    }

    #[test]
    fn test_no_header_yields_no_actor() {
        let ctx = RequestPipeline::authentication(tokens())
            .run(RequestContext::default())
            .unwrap();

        assert!(ctx.token.is_none());
        assert!(ctx.actor.is_none());
    }

    #[test]
    fn test_valid_token_yields_actor() {
        let tokens = tokens();
        let user_id = Uuid::new_v4();
        let token = tokens.generate_token(user_id, "root").unwrap();

        let ctx = RequestPipeline::authentication(tokens)
            .run(with_header(&format!("Bearer {token}")))
            .unwrap();

        assert_eq!(
            ctx.actor,
            Some(Actor {
                user_id,
                username: "root".to_string(),
            })
        );
    }

    #[test]
    fn test_non_bearer_scheme_short_circuits() {
        let result = RequestPipeline::authentication(tokens()).run(with_header("Basic abc"));
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_bad_token_is_rejected() {
        let result = RequestPipeline::authentication(tokens()).run(with_header("Bearer nope"));
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_stages_run_in_order() {
        // Without the bearer stage no token is ever extracted.
        let ctx = RequestPipeline::new()
            .stage(ActorStage::new(tokens()))
            .run(with_header("Bearer whatever"))
            .unwrap();

        assert!(ctx.actor.is_none());
    }
}
