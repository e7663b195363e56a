//! Messaging and notification tests
//!
//! Tests for the submission notice format and conversation ordering.

use proptest::prelude::*;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The notice opens with the submission header and the first field
    #[test]
    fn test_notice_header() {
        let body = submission_body(&[("investment_amount", "5000")], "app-1");
        assert!(body.starts_with("New form submission -- investment_amount: 5000\n"));
    }

    /// The application id is the final line of the notice
    #[test]
    fn test_notice_application_id_is_last_line() {
        let body = submission_body(&[("investment_amount", "5000")], "app-42");
        // clients parse the trailing line as "application_id: <id>"
        assert_eq!(body.lines().last(), Some("application_id: app-42"));
    }

    /// Each provided field becomes a key: value line
    #[test]
    fn test_notice_contains_key_value_lines() {
        let body = submission_body(
            &[
                ("investment_amount", "12000"),
                ("purpose_of_investment", "Expansion"),
            ],
            "app-7",
        );

        assert!(body.contains("investment_amount: 12000\n"));
        assert!(body.contains("\npurpose_of_investment: Expansion\n"));
    }

    /// Omitted fields produce no line at all
    #[test]
    fn test_notice_omits_missing_fields() {
        let body = submission_body(&[("investment_amount", "12000")], "app-7");
        assert!(!body.contains("relevant_documents"));
        assert!(!body.contains("duration_of_investment"));
    }

    /// Conversations sort oldest first
    #[test]
    fn test_conversation_sorted_ascending() {
        let mut messages = vec![
            MessageModel { sent_at: 30 },
            MessageModel { sent_at: 10 },
            MessageModel { sent_at: 20 },
        ];
        sort_conversation(&mut messages);

        let times: Vec<i64> = messages.iter().map(|m| m.sent_at).collect();
        assert_eq!(times, vec![10, 20, 30]);
    }

    /// Platform notifications use the nil sender, which has no user row;
    /// display falls back to "System"
    #[test]
    fn test_system_sender_display_name() {
        assert_eq!(sender_display_name(None), "System");
        assert_eq!(sender_display_name(Some("maria")), "maria");
    }

    /// Read status values are a closed set
    #[test]
    fn test_read_status_values() {
        let statuses = ["unread", "read"];
        assert_eq!(statuses.len(), 2);
    }
}

// ============================================================================
// Helper Types and Functions
// ============================================================================

/// Message (simplified for testing)
#[derive(Debug, Clone)]
pub struct MessageModel {
    pub sent_at: i64,
}

/// Compose the submission notice from key/value form fields. At least one
/// field is always present (the investment amount is mandatory).
pub fn submission_body(fields: &[(&str, &str)], application_id: &str) -> String {
    let lines: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();
    format!(
        "New form submission -- {}\napplication_id: {}",
        lines.join("\n"),
        application_id
    )
}

/// Conversations are rendered oldest first
pub fn sort_conversation(messages: &mut [MessageModel]) {
    messages.sort_by_key(|m| m.sent_at);
}

/// Resolve the display name of a notification sender
pub fn sender_display_name(username: Option<&str>) -> &str {
    username.unwrap_or("System")
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn field_strategy() -> impl Strategy<Value = (String, String)> {
        ("[a-z_]{1,20}", "[a-zA-Z0-9 ]{0,40}")
            .prop_map(|(k, v)| (k, v))
    }

    proptest! {
        /// The notice always ends with the application id line, no matter
        /// what fields were provided
        #[test]
        fn prop_notice_ends_with_application_id(
            fields in proptest::collection::vec(field_strategy(), 1..8),
            id in "[a-f0-9-]{1,36}",
        ) {
            let borrowed: Vec<(&str, &str)> = fields
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let body = submission_body(&borrowed, &id);

            prop_assert!(body.starts_with("New form submission -- "));
            let expected_suffix = format!("application_id: {}", id);
            prop_assert!(body.ends_with(&expected_suffix));
        }

        /// One line per field (the first sharing the header line) plus the
        /// trailing id line
        #[test]
        fn prop_notice_line_count(
            fields in proptest::collection::vec(field_strategy(), 1..8),
        ) {
            let borrowed: Vec<(&str, &str)> = fields
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let body = submission_body(&borrowed, "x");

            prop_assert_eq!(body.lines().count(), fields.len() + 1);
        }

        /// Sorting a conversation is idempotent and ascending
        #[test]
        fn prop_conversation_sort_ascending(
            times in proptest::collection::vec(any::<i64>(), 0..30),
        ) {
            let mut messages: Vec<MessageModel> =
                times.into_iter().map(|t| MessageModel { sent_at: t }).collect();
            sort_conversation(&mut messages);

            prop_assert!(messages.windows(2).all(|w| w[0].sent_at <= w[1].sent_at));
        }
    }
}
