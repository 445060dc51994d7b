//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, QueryFilter, QueryOrder, Select,
    Statement, Value,
};
use uuid::Uuid;

use bloglist_core::domain::User;
use bloglist_core::error::RepoError;
use bloglist_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{ListOrder, PostgresBaseRepository};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

impl ListOrder for PostEntity {
    fn list_order(query: Select<Self>) -> Select<Self> {
        query
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
    }
}

impl ListOrder for UserEntity {
    fn list_order(query: Select<Self>) -> Select<Self> {
        query
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
    }
}

/// Appends the post id unless the array already holds it.
const LINK_POST_SQL: &str = r#"UPDATE users
SET post_ids = CASE
        WHEN post_ids @> jsonb_build_array($1::text) THEN post_ids
        ELSE post_ids || jsonb_build_array($1::text)
    END,
    updated_at = now()
WHERE id = $2"#;

const UNLINK_POST_SQL: &str = r#"UPDATE users
SET post_ids = post_ids - $1::text,
    updated_at = now()
WHERE id = $2"#;

impl PostgresUserRepository {
    async fn edit_post_ids(
        &self,
        sql: &str,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<(), RepoError> {
        let values: [Value; 2] = [post_id.to_string().into(), user_id.into()];
        let statement = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);

        let result = self
            .db
            .execute(statement)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn link_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        tracing::debug!(%user_id, %post_id, "Linking post to user");
        self.edit_post_ids(LINK_POST_SQL, user_id, post_id).await
    }

    async fn unlink_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        tracing::debug!(%user_id, %post_id, "Unlinking post from user");
        self.edit_post_ids(UNLINK_POST_SQL, user_id, post_id).await
    }
}

impl PostRepository for PostgresPostRepository {}
