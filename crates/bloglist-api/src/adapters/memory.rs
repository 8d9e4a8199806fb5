//! In-memory implementation of the repository ports.
//!
//! Both collections live behind one `RwLock` so user/blog bookkeeping never
//! observes a half-applied write. Listings preserve insertion order.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::domain::types::{Blog, BlogId, BlogPatch, User, UserId};
use crate::ports::{BlogRepository, StoreError, UserRepository};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    blogs: Vec<Blog>,
}

/// Process-local blog and user store
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blogs
    pub fn blog_count(&self) -> usize {
        self.inner.read().blogs.len()
    }

    /// Number of registered users
    pub fn user_count(&self) -> usize {
        self.inner.read().users.len()
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Blog>, StoreError> {
        Ok(self.inner.read().blogs.clone())
    }

    async fn find(&self, id: BlogId) -> Result<Option<Blog>, StoreError> {
        Ok(self.inner.read().blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, StoreError> {
        let mut inner = self.inner.write();
        debug!(blog_id = %blog.id, owner = %blog.user, "Storing blog");
        inner.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn update(&self, id: BlogId, patch: BlogPatch) -> Result<Option<Blog>, StoreError> {
        let mut inner = self.inner.write();
        let Some(blog) = inner.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        patch.apply(blog);
        Ok(Some(blog.clone()))
    }

    async fn delete(&self, id: BlogId) -> Result<Option<Blog>, StoreError> {
        let mut inner = self.inner.write();
        let position = inner.blogs.iter().position(|b| b.id == id);
        Ok(position.map(|index| inner.blogs.remove(index)))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().users.clone())
    }

    async fn find(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .inner
            .read()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.write();
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        debug!(user_id = %user.id, username = %user.username, "Storing user");
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn attach_blog(&self, user: UserId, blog: BlogId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let owner = inner
            .users
            .iter_mut()
            .find(|u| u.id == user)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user)))?;

        owner.blogs.push(blog);
        Ok(())
    }

    async fn detach_blog(&self, user: UserId, blog: BlogId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if let Some(owner) = inner.users.iter_mut().find(|u| u.id == user) {
            owner.blogs.retain(|id| *id != blog);
        }
        Ok(())
    }
}
