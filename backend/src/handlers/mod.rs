//! HTTP handlers for the FranchiseConnect platform

pub mod admin;
pub mod application;
pub mod auth;
pub mod business;
pub mod financial;
pub mod health;
pub mod message;
pub mod notification;

pub use admin::*;
pub use application::*;
pub use auth::*;
pub use business::*;
pub use financial::*;
pub use health::*;
pub use message::*;
pub use notification::*;
