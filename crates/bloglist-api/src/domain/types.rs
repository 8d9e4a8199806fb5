//! Entities, request bodies, and response views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::error::ApiError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self).map_err(|_| ApiError::malformatted_id())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user
    UserId
);

entity_id!(
    /// Identifier of a stored blog entry
    BlogId
);

// =============================================================================
// ENTITIES
// =============================================================================

/// Registered user. Not serializable: the password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    /// Blogs created by this user, in creation order
    pub blogs: Vec<BlogId>,
}

/// Stored blog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    /// Owner: the user whose token created the entry
    pub user: UserId,
}

impl list_helper::Post for Blog {
    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body of `POST /api/blogs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl NewBlog {
    /// Validate and build the entity owned by `owner`.
    pub fn into_blog(self, owner: UserId) -> Result<Blog, ApiError> {
        let title = required(self.title, "title")?;
        let url = required(self.url, "url")?;

        Ok(Blog {
            id: BlogId::new(),
            title,
            author: self.author.unwrap_or_default(),
            url,
            likes: self.likes.unwrap_or(0),
            user: owner,
        })
    }
}

/// Body of `PUT /api/blogs/:id`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl BlogPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.url.is_none() && self.likes.is_none()
    }

    /// Reject empty patches and blank required fields.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::bad_request("no fields to update"));
        }
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ApiError::bad_request("title is required"));
        }
        if self.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ApiError::bad_request("url is required"));
        }
        Ok(())
    }

    /// Overwrite the fields present in the patch.
    pub fn apply(self, blog: &mut Blog) {
        if let Some(title) = self.title {
            blog.title = title;
        }
        if let Some(author) = self.author {
            blog.author = author;
        }
        if let Some(url) = self.url {
            blog.url = url;
        }
        if let Some(likes) = self.likes {
            blog.likes = likes;
        }
    }
}

/// Body of `POST /api/users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /api/login`
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!("{} is required", field))),
    }
}

// =============================================================================
// RESPONSE VIEWS
// =============================================================================

/// Owner fields embedded in a blog view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub name: String,
}

/// Blog as returned by the API, owner populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogView {
    pub id: BlogId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: Option<UserSummary>,
}

impl BlogView {
    pub fn new(blog: Blog, owner: Option<&User>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner.map(|u| UserSummary {
                id: u.id,
                username: u.username.clone(),
                name: u.name.clone(),
            }),
        }
    }
}

/// Blog fields embedded in a user view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRef {
    pub id: BlogId,
    pub title: String,
    pub author: String,
    pub url: String,
}

/// User as returned by the API, blogs populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub blogs: Vec<BlogRef>,
}

impl UserView {
    /// Build the view; ids in `user.blogs` missing from `catalog` are skipped.
    pub fn new(user: User, catalog: &[Blog]) -> Self {
        let blogs = user
            .blogs
            .iter()
            .filter_map(|id| catalog.iter().find(|b| b.id == *id))
            .map(|b| BlogRef {
                id: b.id,
                title: b.title.clone(),
                author: b.author.clone(),
                url: b.url.clone(),
            })
            .collect();

        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs,
        }
    }
}

/// Response of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginView {
    pub token: String,
    pub username: String,
    pub name: String,
}
