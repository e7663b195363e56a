//! Shared types and models for the FranchiseConnect platform
//!
//! This crate contains types shared between the backend and other
//! components of the system (API clients, admin tooling).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
