use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an account that can own posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    /// Never leaves the process.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Posts owned by this user, in creation order.
    pub post_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, name: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            name,
            password_hash,
            post_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record ownership of a post. Returns `false` if it was already linked.
    pub fn link_post(&mut self, post_id: Uuid) -> bool {
        if self.post_ids.contains(&post_id) {
            return false;
        }
        self.post_ids.push(post_id);
        self.updated_at = Utc::now();
        true
    }

    /// Drop ownership of a post. Returns `false` if it was not linked.
    pub fn unlink_post(&mut self, post_id: Uuid) -> bool {
        let before = self.post_ids.len();
        self.post_ids.retain(|id| *id != post_id);
        let removed = self.post_ids.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new(
            "root".to_string(),
            "Superuser".to_string(),
            "$argon2id$secret".to_string(),
        );

        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "root");
    }

    #[test]
    fn test_link_post_keeps_set_semantics() {
        let mut user = User::new("root".into(), "Root".into(), "hash".into());
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert!(user.link_post(first));
        assert!(user.link_post(second));
        assert!(!user.link_post(first));

        assert_eq!(user.post_ids, vec![first, second]);
    }

    #[test]
    fn test_unlink_post() {
        let mut user = User::new("root".into(), "Root".into(), "hash".into());
        let post_id = Uuid::new_v4();
        user.link_post(post_id);

        assert!(user.unlink_post(post_id));
        assert!(!user.unlink_post(post_id));
        assert!(user.post_ids.is_empty());
    }
}
