//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub username: String,
    pub name: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub name: String,
    pub blogs: Vec<OwnedPostResponse>,
}

/// A post as listed under its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedPostResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
}

/// Request to create a post. Presence of title and url is checked by the
/// domain layer, not by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// Request to update a post. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// Response containing a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_request_tolerates_missing_fields() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"author":"New Guy","url":"http://www.new-blog.com/"}"#)
                .unwrap();

        assert!(req.title.is_none());
        assert!(req.likes.is_none());
        assert_eq!(req.author.as_deref(), Some("New Guy"));
    }

    #[test]
    fn test_create_user_request_name_is_optional() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"root","password":"sekret"}"#).unwrap();
        assert_eq!(req.name, "");
    }

    #[test]
    fn test_anonymous_post_response_omits_user() {
        let resp = PostResponse {
            id: "1".into(),
            title: "t".into(),
            author: "a".into(),
            url: "u".into(),
            likes: 0,
            user: None,
        };

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("user").is_none());
    }
}
