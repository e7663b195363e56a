//! User account models

use serde::{Deserialize, Serialize};

/// Input for registering a new investor account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub contact_info: Option<String>,
    pub address: Option<String>,
}

/// Input for logging in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}
