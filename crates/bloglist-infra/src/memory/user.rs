use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bloglist_core::domain::User;
use bloglist_core::error::RepoError;
use bloglist_core::ports::{BaseRepository, UserRepository};

/// In-memory user store. Usernames are unique, like the database column.
pub struct InMemoryUserRepository {
    store: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.store.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|u| u.id == id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store
            .iter()
            .any(|u| u.id == user.id || u.username == user.username)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store
            .iter()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        let slot = store
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|u| u.id != id);

        if store.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let store = self.store.read().await;
        Ok(store.iter().find(|u| u.username == username).cloned())
    }

    async fn link_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let user = store
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(RepoError::NotFound)?;
        user.link_post(post_id);
        Ok(())
    }

    async fn unlink_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let user = store
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(RepoError::NotFound)?;
        user.unlink_post(post_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn user(username: &str) -> User {
        User::new(username.to_string(), "Name".to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_constraint_violation() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("root")).await.unwrap();

        let result = repo.save(user("root")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(user("root")).await.unwrap();

        let found = repo.find_by_username("root").await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_links_are_all_kept() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user_id = repo.save(user("root")).await.unwrap().id;
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        let a = tokio::spawn({
            let repo = repo.clone();
            async move { repo.link_post(user_id, first).await }
        });
        let b = tokio::spawn({
            let repo = repo.clone();
            async move { repo.link_post(user_id, second).await }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let found = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(found.post_ids.len(), 2);
        assert!(found.post_ids.contains(&first));
        assert!(found.post_ids.contains(&second));
    }

    #[tokio::test]
    async fn test_link_and_unlink() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(user("root")).await.unwrap();
        let post_id = Uuid::new_v4();

        repo.link_post(saved.id, post_id).await.unwrap();
        repo.link_post(saved.id, post_id).await.unwrap();
        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.post_ids, vec![post_id]);

        repo.unlink_post(saved.id, post_id).await.unwrap();
        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert!(found.post_ids.is_empty());

        let missing = repo.link_post(Uuid::new_v4(), post_id).await;
        assert!(matches!(missing, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_persists_linked_posts() {
        let repo = InMemoryUserRepository::new();
        let mut saved = repo.save(user("root")).await.unwrap();
        let post_id = Uuid::new_v4();

        saved.link_post(post_id);
        repo.update(saved.clone()).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.post_ids, vec![post_id]);
    }
}
