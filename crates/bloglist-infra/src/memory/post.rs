use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bloglist_core::domain::Post;
use bloglist_core::error::RepoError;
use bloglist_core::ports::{BaseRepository, PostRepository};

/// In-memory post store. Keeps insertion order.
pub struct InMemoryPostRepository {
    store: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
        }
    }

    /// Seed the store, e.g. for tests.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            store: RwLock::new(posts),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.store.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("Post already exists".to_string()));
        }
        store.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|p| p.id != id);

        if store.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

impl PostRepository for InMemoryPostRepository {}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, owner: Option<Uuid>) -> Post {
        Post::new(title, "Author", "http://example.com", 0, owner)
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryPostRepository::new();
        repo.save(post("first", None)).await.unwrap();
        repo.save(post("second", None)).await.unwrap();

        let titles: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_post() {
        let repo = InMemoryPostRepository::new();

        let missing = post("ghost", None);
        assert!(matches!(
            repo.update(missing.clone()).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            repo.delete(missing.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_post() {
        let mut stored = post("title", None);
        let repo = InMemoryPostRepository::with_posts(vec![stored.clone()]);

        stored.likes = 999;
        repo.update(stored.clone()).await.unwrap();

        let found = repo.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(found.likes, 999);
    }
}
