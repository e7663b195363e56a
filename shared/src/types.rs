//! Common types used across the platform

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a wire string does not map to a known variant
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized value: {0}")]
pub struct UnknownValue(pub String);

/// Sender id used for notifications emitted by the platform itself
/// (admin decisions, system announcements) rather than by a real user.
pub const SYSTEM_SENDER: Uuid = Uuid::nil();

/// Approval status shared by applications, investor verification,
/// and business admin approval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Agreed,
    Cancelled,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Agreed => "agreed",
            ApprovalStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status value case-insensitively.
    ///
    /// Older clients send the `Agreed` casing for the application status
    /// while storing lowercase everywhere else; parsing is deliberately
    /// case-insensitive so both spellings trigger the same transition.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ApprovalStatus::Pending),
            "agreed" => Some(ApprovalStatus::Agreed),
            "cancelled" => Some(ApprovalStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownValue(value.to_string()))
    }
}

/// Account types on the platform
///
/// Admin is not a user type; a user is an admin iff their email matches
/// the configured admin address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    User,
    Business,
    Franchise,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::User => "user",
            UserType::Business => "business",
            UserType::Franchise => "franchise",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Some(UserType::User),
            "business" => Some(UserType::Business),
            "franchise" => Some(UserType::Franchise),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownValue(value.to_string()))
    }
}

/// Read status for messages and notifications
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    #[default]
    Unread,
    Read,
}

impl ReadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadStatus::Unread => "unread",
            ReadStatus::Read => "read",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unread" => Some(ReadStatus::Unread),
            "read" => Some(ReadStatus::Read),
            _ => None,
        }
    }
}

impl std::str::FromStr for ReadStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownValue(value.to_string()))
    }
}

/// Notification kinds.
///
/// The wire tags are the historical free-form strings and are kept
/// verbatim so existing clients keep rendering correctly. The meaning of
/// a notification's `subject_id` depends on the kind: an application id
/// for application kinds, a post id for LIKE/COMMENT, none for business
/// status updates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationKind {
    #[serde(rename = "Application")]
    Application,
    #[serde(rename = "ApplicationStatusUpdate")]
    ApplicationStatusUpdate,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "COMMENT")]
    Comment,
    #[serde(rename = "business_status_update")]
    BusinessStatusUpdate,
    #[serde(rename = "franchise_removed")]
    FranchiseRemoved,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Application => "Application",
            NotificationKind::ApplicationStatusUpdate => "ApplicationStatusUpdate",
            NotificationKind::Like => "LIKE",
            NotificationKind::Comment => "COMMENT",
            NotificationKind::BusinessStatusUpdate => "business_status_update",
            NotificationKind::FranchiseRemoved => "franchise_removed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Application" => Some(NotificationKind::Application),
            "ApplicationStatusUpdate" => Some(NotificationKind::ApplicationStatusUpdate),
            "LIKE" => Some(NotificationKind::Like),
            "COMMENT" => Some(NotificationKind::Comment),
            "business_status_update" => Some(NotificationKind::BusinessStatusUpdate),
            "franchise_removed" => Some(NotificationKind::FranchiseRemoved),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_status_round_trip() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Agreed,
            ApprovalStatus::Cancelled,
        ] {
            assert_eq!(ApprovalStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_approval_status_parse_is_case_insensitive() {
        assert_eq!(ApprovalStatus::parse("Agreed"), Some(ApprovalStatus::Agreed));
        assert_eq!(ApprovalStatus::parse("agreed"), Some(ApprovalStatus::Agreed));
        assert_eq!(ApprovalStatus::parse("CANCELLED"), Some(ApprovalStatus::Cancelled));
        assert_eq!(ApprovalStatus::parse(" pending "), Some(ApprovalStatus::Pending));
    }

    #[test]
    fn test_approval_status_parse_rejects_unknown() {
        assert_eq!(ApprovalStatus::parse("approved"), None);
        assert_eq!(ApprovalStatus::parse(""), None);
    }

    #[test]
    fn test_user_type_round_trip() {
        for user_type in [UserType::User, UserType::Business, UserType::Franchise] {
            assert_eq!(UserType::parse(user_type.as_str()), Some(user_type));
        }
    }

    #[test]
    fn test_notification_kind_tags_are_legacy_strings() {
        assert_eq!(NotificationKind::Like.as_str(), "LIKE");
        assert_eq!(
            NotificationKind::BusinessStatusUpdate.as_str(),
            "business_status_update"
        );
        assert_eq!(NotificationKind::Application.as_str(), "Application");
    }

    #[test]
    fn test_notification_kind_round_trip() {
        for kind in [
            NotificationKind::Application,
            NotificationKind::ApplicationStatusUpdate,
            NotificationKind::Like,
            NotificationKind::Comment,
            NotificationKind::BusinessStatusUpdate,
            NotificationKind::FranchiseRemoved,
        ] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_system_sender_is_nil() {
        assert!(SYSTEM_SENDER.is_nil());
    }
}
