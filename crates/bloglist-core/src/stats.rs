//! Aggregate statistics over a collection of posts.
//!
//! Every function borrows the input and never reorders it. Ties are broken
//! by input order: the first post (or the first author, in order of first
//! appearance) to reach the maximum wins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Post;

/// The identifying fields of a single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub author: String,
    pub likes: u64,
}

/// An author together with the number of posts they wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorPosts {
    pub author: String,
    pub posts: u64,
}

/// An author together with the likes summed over their posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// Sum of likes over all posts, saturating at `u64::MAX`.
pub fn total_likes(posts: &[Post]) -> u64 {
    posts.iter().fold(0, |sum, p| sum.saturating_add(p.likes))
}

/// The most liked post.
pub fn favourite_post(posts: &[Post]) -> Option<PostSummary> {
    first_max_by_key(posts.iter(), |p| p.likes).map(|p| PostSummary {
        title: p.title.clone(),
        author: p.author.clone(),
        likes: p.likes,
    })
}

/// The author with the most posts.
pub fn most_prolific_author(posts: &[Post]) -> Option<AuthorPosts> {
    let totals = totals_by_author(posts, |_| 1);
    first_max_by_key(totals.into_iter(), |(_, count)| *count).map(|(author, posts)| {
        AuthorPosts {
            author: author.to_string(),
            posts,
        }
    })
}

/// The author whose posts have the most likes in total.
pub fn most_liked_author(posts: &[Post]) -> Option<AuthorLikes> {
    let totals = totals_by_author(posts, |p| p.likes);
    first_max_by_key(totals.into_iter(), |(_, likes)| *likes).map(|(author, likes)| {
        AuthorLikes {
            author: author.to_string(),
            likes,
        }
    })
}

/// `Iterator::max_by_key` keeps the last of equal maxima; this keeps the first.
fn first_max_by_key<T, I, F>(items: I, key: F) -> Option<T>
where
    I: Iterator<Item = T>,
    F: Fn(&T) -> u64,
{
    items.fold(None, |best, item| match best {
        Some(b) if key(&b) >= key(&item) => Some(b),
        _ => Some(item),
    })
}

/// Per-author totals, in order of each author's first appearance.
fn totals_by_author<F>(posts: &[Post], weight: F) -> Vec<(&str, u64)>
where
    F: Fn(&Post) -> u64,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, u64)> = Vec::new();

    for post in posts {
        let author = post.author.as_str();
        match index.get(author) {
            Some(&i) => totals[i].1 = totals[i].1.saturating_add(weight(post)),
            None => {
                index.insert(author, totals.len());
                totals.push((author, weight(post)));
            }
        }
    }

    totals
}

/// All aggregate statistics for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub total_likes: u64,
    pub favourite_post: Option<PostSummary>,
    pub most_prolific_author: Option<AuthorPosts>,
    pub most_liked_author: Option<AuthorLikes>,
}

impl PostStats {
    pub fn from_posts(posts: &[Post]) -> Self {
        Self {
            total_likes: total_likes(posts),
            favourite_post: favourite_post(posts),
            most_prolific_author: most_prolific_author(posts),
            most_liked_author: most_liked_author(posts),
        }
    }
}
