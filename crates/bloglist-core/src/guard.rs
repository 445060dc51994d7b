//! Ownership guard for destructive post operations.

use uuid::Uuid;

use crate::domain::Post;

/// Why a deletion was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotAuthorized,
}

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    Allow,
    Deny(DenyReason),
}

impl DeleteDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether `actor` may delete `post`.
///
/// Anonymous callers are always denied. Posts without a recorded owner may
/// be deleted by any authenticated caller; owned posts only by their owner.
pub fn authorize_delete(actor: Option<Uuid>, post: &Post) -> DeleteDecision {
    let Some(actor) = actor else {
        return DeleteDecision::Deny(DenyReason::NotAuthorized);
    };

    if post.user_id.is_none() || post.is_owned_by(actor) {
        DeleteDecision::Allow
    } else {
        DeleteDecision::Deny(DenyReason::NotAuthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned_by(owner: Option<Uuid>) -> Post {
        Post::new("Title", "Author", "http://example.com", 0, owner)
    }

    #[test]
    fn test_anonymous_actor_is_denied() {
        let owner = Uuid::new_v4();

        assert_eq!(
            authorize_delete(None, &owned_by(Some(owner))),
            DeleteDecision::Deny(DenyReason::NotAuthorized)
        );
        assert_eq!(
            authorize_delete(None, &owned_by(None)),
            DeleteDecision::Deny(DenyReason::NotAuthorized)
        );
    }

    #[test]
    fn test_owner_is_allowed() {
        let owner = Uuid::new_v4();
        assert!(authorize_delete(Some(owner), &owned_by(Some(owner))).is_allowed());
    }

    #[test]
    fn test_other_user_is_denied() {
        let post = owned_by(Some(Uuid::new_v4()));
        assert_eq!(
            authorize_delete(Some(Uuid::new_v4()), &post),
            DeleteDecision::Deny(DenyReason::NotAuthorized)
        );
    }

    #[test]
    fn test_ids_compare_by_value() {
        let owner = Uuid::new_v4();
        let reparsed = Uuid::parse_str(&owner.to_string()).unwrap();
        assert!(authorize_delete(Some(reparsed), &owned_by(Some(owner))).is_allowed());
    }

    #[test]
    fn test_ownerless_post_allows_authenticated_actor() {
        assert!(authorize_delete(Some(Uuid::new_v4()), &owned_by(None)).is_allowed());
    }
}
