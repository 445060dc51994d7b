use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::validation;

/// Post entity - a blog entry linked from the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    /// Owning user, absent for posts created anonymously.
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with generated ID and timestamps.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
        likes: u64,
        user_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author: author.into(),
            url: url.into(),
            likes,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a post from unvalidated input.
    ///
    /// Title and url are required; missing likes default to zero and a
    /// missing author becomes the empty string.
    pub fn from_draft(draft: PostDraft, user_id: Option<Uuid>) -> Result<Self, DomainError> {
        validation::validate_post_draft(&draft)?;

        Ok(Self::new(
            draft.title.unwrap_or_default(),
            draft.author.unwrap_or_default(),
            draft.url.unwrap_or_default(),
            draft.likes.unwrap_or(0),
            user_id,
        ))
    }

    /// Whether the given user is the recorded owner of this post.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Creation input for a post, before validation.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// Partial update of a post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl PostPatch {
    /// Validate the patch and apply it to `post`.
    pub fn apply(self, post: &mut Post) -> Result<(), DomainError> {
        validation::validate_post_patch(&self)?;

        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(url) = self.url {
            post.url = url;
        }
        if let Some(likes) = self.likes {
            post.likes = likes;
        }
        post.updated_at = Utc::now();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: Option<&str>, url: Option<&str>) -> PostDraft {
        PostDraft {
            title: title.map(String::from),
            author: Some("Some Guy".to_string()),
            url: url.map(String::from),
            likes: None,
        }
    }

    #[test]
    fn test_from_draft_defaults_likes_to_zero() {
        let post = Post::from_draft(
            draft(Some("This is a blog"), Some("http://www.some-dudes-blog.com/")),
            None,
        )
        .unwrap();

        assert_eq!(post.likes, 0);
        assert_eq!(post.author, "Some Guy");
        assert!(post.user_id.is_none());
    }

    #[test]
    fn test_from_draft_requires_title_and_url() {
        assert!(Post::from_draft(draft(None, Some("http://a")), None).is_err());
        assert!(Post::from_draft(draft(Some("A"), None), None).is_err());
        assert!(Post::from_draft(draft(Some("  "), Some("http://a")), None).is_err());
    }

    #[test]
    fn test_from_draft_records_owner() {
        let owner = Uuid::new_v4();
        let post = Post::from_draft(draft(Some("A"), Some("http://a")), Some(owner)).unwrap();

        assert!(post.is_owned_by(owner));
        assert!(!post.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_patch_updates_only_given_fields() {
        let mut post = Post::new("Title", "Author", "http://a", 3, None);
        let patch = PostPatch {
            likes: Some(999),
            ..Default::default()
        };

        patch.apply(&mut post).unwrap();

        assert_eq!(post.likes, 999);
        assert_eq!(post.title, "Title");
        assert_eq!(post.url, "http://a");
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        let mut post = Post::new("Title", "Author", "http://a", 3, None);
        let patch = PostPatch {
            title: Some(String::new()),
            ..Default::default()
        };

        assert!(patch.apply(&mut post).is_err());
        assert_eq!(post.title, "Title");
    }
}
