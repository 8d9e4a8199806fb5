//! Outbound ports for the Blog List API.
//!
//! Production deployments plug a document store in here; the service ships
//! with `InMemoryStore` (adapters/memory.rs).

use async_trait::async_trait;

use crate::domain::types::{Blog, BlogId, BlogPatch, User, UserId};

/// Storage failures surfaced by repositories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Registration collided with an existing username
    #[error("username already taken")]
    DuplicateUsername(String),

    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Storage backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Blog persistence
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All blogs in insertion order
    async fn list(&self) -> Result<Vec<Blog>, StoreError>;

    async fn find(&self, id: BlogId) -> Result<Option<Blog>, StoreError>;

    async fn insert(&self, blog: Blog) -> Result<Blog, StoreError>;

    /// Apply `patch`; `None` if no blog has this id.
    async fn update(&self, id: BlogId, patch: BlogPatch) -> Result<Option<Blog>, StoreError>;

    /// Remove and return the blog; `None` if no blog has this id.
    async fn delete(&self, id: BlogId) -> Result<Option<Blog>, StoreError>;
}

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in registration order
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn find(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user. Fails with `DuplicateUsername` if the username is
    /// taken; the check and the insert are atomic.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Append `blog` to the user's blog list.
    async fn attach_blog(&self, user: UserId, blog: BlogId) -> Result<(), StoreError>;

    /// Remove `blog` from the user's blog list. Missing entries are ignored.
    async fn detach_blog(&self, user: UserId, blog: BlogId) -> Result<(), StoreError>;
}

/// Time source trait for testability
pub trait TimeSource: Send + Sync {
    /// Seconds since the Unix epoch
    fn now(&self) -> i64;
}

/// System time implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}
