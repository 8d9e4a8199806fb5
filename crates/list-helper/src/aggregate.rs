//! Aggregations over blog collections.
//!
//! Per-author statistics are built in two linear passes: one to fold every
//! post into a per-author accumulator kept in first-occurrence order, and one
//! over the accumulators to pick the leader.

use crate::record::Post;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Author with the most blog posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: u64,
}

/// Author with the most likes summed over all of their posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// All statistics at once, shaped for a JSON response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub total_likes: u64,
    pub most_blogs: AuthorBlogs,
    pub most_likes: AuthorLikes,
}

/// Sum of likes across all posts. Saturates instead of overflowing.
pub fn total_likes<P: Post>(blogs: &[P]) -> u64 {
    blogs
        .iter()
        .fold(0u64, |sum, blog| sum.saturating_add(blog.likes()))
}

/// Author with the greatest number of posts; first-occurring author wins ties.
pub fn most_blogs<P: Post>(blogs: &[P]) -> AuthorBlogs {
    let mut tally = Tally::with_capacity(blogs.len());
    for blog in blogs {
        tally.add(blog.author(), 1);
    }

    let (author, blogs) = tally.leader();
    AuthorBlogs {
        author: author.to_string(),
        blogs,
    }
}

/// Author with the greatest summed likes; first-occurring author wins ties.
pub fn most_likes<P: Post>(blogs: &[P]) -> AuthorLikes {
    let mut tally = Tally::with_capacity(blogs.len());
    for blog in blogs {
        tally.add(blog.author(), blog.likes());
    }

    let (author, likes) = tally.leader();
    AuthorLikes {
        author: author.to_string(),
        likes,
    }
}

/// Compute every statistic over the same input.
pub fn summarize<P: Post>(blogs: &[P]) -> BlogSummary {
    BlogSummary {
        total_likes: total_likes(blogs),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}

/// Insertion-ordered author -> accumulator table.
struct Tally<'a> {
    entries: Vec<(&'a str, u64)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> Tally<'a> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    fn add(&mut self, author: &'a str, amount: u64) {
        match self.index.get(author) {
            Some(&slot) => {
                let total = &mut self.entries[slot].1;
                *total = total.saturating_add(amount);
            }
            None => {
                self.index.insert(author, self.entries.len());
                self.entries.push((author, amount));
            }
        }
    }

    /// Leader in first-occurrence order, seeded with `("", 0)`.
    ///
    /// Strictly greater only: an earlier author keeps the lead on ties.
    fn leader(&self) -> (&'a str, u64) {
        self.entries
            .iter()
            .fold(("", 0), |best, &(author, total)| {
                if total > best.1 {
                    (author, total)
                } else {
                    best
                }
            })
    }
}
