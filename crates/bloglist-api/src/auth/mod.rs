//! Credentials: password hashing and signed bearer tokens.

pub mod password;
pub mod token;

pub use password::{PasswordError, PasswordHasher};
pub use token::{Claims, TokenError, TokenSigner};
