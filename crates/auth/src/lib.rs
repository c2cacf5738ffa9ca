//! `almacen-auth` — pure authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. The storage
//! layer looks records up; this crate decides whether they grant access.

pub mod credentials;
pub mod password;
pub mod token;

pub use credentials::{Credentials, CredentialsError};
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{generate_token, validate_token_record, AuthUser, TokenRecord};
