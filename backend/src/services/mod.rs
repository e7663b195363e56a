//! Business logic services for the FranchiseConnect platform

pub mod admin;
pub mod application;
pub mod auth;
pub mod business;
pub mod financial;
pub mod message;
pub mod notification;

pub use admin::AdminService;
pub use application::ApplicationService;
pub use auth::AuthService;
pub use business::BusinessService;
pub use financial::FinancialService;
pub use message::MessageService;
pub use notification::NotificationService;
