//! Request middleware for the FranchiseConnect platform

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
