//! Domain models for the FranchiseConnect platform

mod application;
mod business;
mod financial;
mod user;

pub use application::*;
pub use business::*;
pub use financial::*;
pub use user::*;
