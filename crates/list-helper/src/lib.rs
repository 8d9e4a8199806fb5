//! # List Helper
//!
//! Pure aggregation functions over an ordered collection of blog posts.
//!
//! ## Operations
//!
//! | Function | Result | Empty input |
//! |----------|--------|-------------|
//! | [`dummy`] | `1` | n/a |
//! | [`total_likes`] | sum of likes | `0` |
//! | [`most_blogs`] | author with most posts | `{ author: "", blogs: 0 }` |
//! | [`most_likes`] | author with most summed likes | `{ author: "", likes: 0 }` |
//!
//! ## Tie-breaking
//!
//! Authors are grouped in the order they first appear in the input. The
//! leader is chosen by a single scan over the groups in that order, and a
//! group only replaces the current leader when its value is strictly greater.
//! The first author to reach the maximum therefore wins every tie.
//!
//! ## Usage
//!
//! ```rust
//! use list_helper::{most_likes, total_likes, BlogRecord};
//!
//! let blogs = vec![
//!     BlogRecord::new("A", 5),
//!     BlogRecord::new("B", 10),
//!     BlogRecord::new("A", 2),
//! ];
//!
//! assert_eq!(total_likes(&blogs), 17);
//! assert_eq!(most_likes(&blogs).author, "B");
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod record;

pub use aggregate::{most_blogs, most_likes, summarize, total_likes, AuthorBlogs, AuthorLikes, BlogSummary};
pub use record::{BlogRecord, Post};

/// Placeholder operation, always `1`.
pub fn dummy() -> u64 {
    1
}
