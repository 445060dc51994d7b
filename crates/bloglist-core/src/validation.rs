//! Input validation rules.

use crate::domain::{PostDraft, PostPatch};
use crate::error::DomainError;

/// Minimum length of both usernames and passwords, in characters.
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// Largest like count a post may carry; the storage column is a signed bigint.
pub const MAX_LIKES: u64 = i64::MAX as u64;

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn check_likes(likes: Option<u64>) -> Result<(), DomainError> {
    match likes {
        Some(likes) if likes > MAX_LIKES => Err(DomainError::Validation(format!(
            "likes must be at most {MAX_LIKES}"
        ))),
        _ => Ok(()),
    }
}

/// A post needs both a title and a url.
pub fn validate_post_draft(draft: &PostDraft) -> Result<(), DomainError> {
    if is_blank(draft.title.as_deref()) {
        return Err(DomainError::Validation("title is required".to_string()));
    }
    if is_blank(draft.url.as_deref()) {
        return Err(DomainError::Validation("url is required".to_string()));
    }
    check_likes(draft.likes)
}

/// An update may omit title or url, but cannot blank them out.
pub fn validate_post_patch(patch: &PostPatch) -> Result<(), DomainError> {
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    if patch.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
        return Err(DomainError::Validation("url must not be empty".to_string()));
    }
    check_likes(patch.likes)
}

/// Username and password must each be at least three characters long.
pub fn validate_registration(username: &str, password: &str) -> Result<(), DomainError> {
    if username.chars().count() < MIN_CREDENTIAL_LEN
        || password.chars().count() < MIN_CREDENTIAL_LEN
    {
        return Err(DomainError::Validation(format!(
            "username and password must be at least {MIN_CREDENTIAL_LEN} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_length_limits() {
        assert!(validate_registration("user01", "pass").is_ok());
        assert!(validate_registration("abc", "abc").is_ok());
        assert!(validate_registration("ge", "password").is_err());
        assert!(validate_registration("gedfdaf", "pa").is_err());
    }

    #[test]
    fn test_registration_counts_characters_not_bytes() {
        assert!(validate_registration("äö", "password").is_err());
        assert!(validate_registration("äöü", "password").is_ok());
    }

    #[test]
    fn test_post_draft_rules() {
        let valid = PostDraft {
            title: Some("A new Blog".into()),
            author: None,
            url: Some("http://www.new-blog.com/".into()),
            likes: None,
        };
        assert!(validate_post_draft(&valid).is_ok());

        let missing_url = PostDraft {
            url: None,
            ..valid.clone()
        };
        assert_eq!(
            validate_post_draft(&missing_url),
            Err(DomainError::Validation("url is required".to_string()))
        );

        let missing_title = PostDraft {
            title: None,
            ..valid
        };
        assert_eq!(
            validate_post_draft(&missing_title),
            Err(DomainError::Validation("title is required".to_string()))
        );
    }

    #[test]
    fn test_likes_above_storage_range_are_rejected() {
        let draft = PostDraft {
            title: Some("Big".into()),
            author: None,
            url: Some("http://big.example".into()),
            likes: Some(MAX_LIKES),
        };
        assert!(validate_post_draft(&draft).is_ok());

        let too_many = PostDraft {
            likes: Some(u64::MAX),
            ..draft
        };
        assert!(matches!(
            validate_post_draft(&too_many),
            Err(DomainError::Validation(_))
        ));

        let patch = PostPatch {
            likes: Some(MAX_LIKES + 1),
            ..PostPatch::default()
        };
        assert!(matches!(
            validate_post_patch(&patch),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(validate_post_patch(&PostPatch::default()).is_ok());
    }
}
