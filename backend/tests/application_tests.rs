//! Application lifecycle tests
//!
//! Tests for submission preconditions, the two-track status review,
//! investor promotion to franchise, and the franchise removal cascade.

use proptest::prelude::*;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Both tracks start pending
    #[test]
    fn test_new_application_is_pending() {
        let app = ApplicationModel::new();
        assert_eq!(app.application_status, Status::Pending);
        assert_eq!(app.investor_verification_status, Status::Pending);
    }

    /// On the business track, pending never overwrites a decision
    #[test]
    fn test_pending_does_not_reopen_decision() {
        let mut app = ApplicationModel::new();
        app.apply_update(Some(Status::Agreed), None);
        app.apply_update(Some(Status::Pending), None);

        assert_eq!(app.application_status, Status::Agreed);
    }

    /// Agreement on the business track records the approval date
    #[test]
    fn test_agreement_stamps_approval_date() {
        let mut app = ApplicationModel::new();
        assert!(!app.approval_dated);

        app.apply_update(Some(Status::Cancelled), None);
        assert!(!app.approval_dated);

        app.apply_update(Some(Status::Agreed), None);
        assert!(app.approval_dated);
    }

    /// Status strings parse case-insensitively
    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(parse_status("Agreed"), Some(Status::Agreed));
        assert_eq!(parse_status("agreed"), Some(Status::Agreed));
        assert_eq!(parse_status("CANCELLED"), Some(Status::Cancelled));
        assert_eq!(parse_status(" pending "), Some(Status::Pending));
    }

    /// Unknown status strings are rejected
    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(parse_status("approved"), None);
        assert_eq!(parse_status("done"), None);
        assert_eq!(parse_status(""), None);
    }

    /// Setting a track to its current value is permitted
    #[test]
    fn test_double_agree_is_permitted() {
        let mut app = ApplicationModel::new();
        let first = app.apply_update(Some(Status::Agreed), None);
        let second = app.apply_update(Some(Status::Agreed), None);

        assert_eq!(app.application_status, Status::Agreed);
        assert!(!first.promoted);
        assert!(!second.promoted);
    }

    /// There are no transition restrictions between statuses
    #[test]
    fn test_agree_after_cancel_is_permitted() {
        let mut app = ApplicationModel::new();
        app.apply_update(Some(Status::Cancelled), Some(Status::Cancelled));
        app.apply_update(Some(Status::Agreed), Some(Status::Agreed));

        assert_eq!(app.application_status, Status::Agreed);
        assert_eq!(app.investor_verification_status, Status::Agreed);
    }

    /// Promotion fires exactly when verification is set to agreed
    #[test]
    fn test_promotion_on_verification_agreement() {
        let mut app = ApplicationModel::new();

        let business_only = app.apply_update(Some(Status::Agreed), None);
        assert!(!business_only.promoted);

        let verified = app.apply_update(None, Some(Status::Agreed));
        assert!(verified.promoted);
    }

    /// An update must touch at least one track
    #[test]
    fn test_empty_update_is_rejected() {
        assert!(!is_valid_update(&None, &None));
        assert!(is_valid_update(&Some(Status::Agreed), &None));
        assert!(is_valid_update(&None, &Some(Status::Cancelled)));
    }

    /// Removal cancels both tracks of the target application
    #[test]
    fn test_removal_cancels_target() {
        let mut apps = vec![ApplicationModel::agreed(), ApplicationModel::agreed()];
        let outcome = remove_franchise(&mut apps, 0);

        assert_eq!(apps[0].application_status, Status::Cancelled);
        assert_eq!(apps[0].investor_verification_status, Status::Cancelled);
        assert!(outcome.demoted);
    }

    /// Removal cancels the verification track on every sibling application
    #[test]
    fn test_removal_cascades_to_siblings() {
        let mut apps = vec![
            ApplicationModel::agreed(),
            ApplicationModel::agreed(),
            ApplicationModel::new(),
        ];
        let outcome = remove_franchise(&mut apps, 0);

        // Siblings keep their business-side status but lose verification
        assert_eq!(apps[1].application_status, Status::Agreed);
        assert_eq!(apps[1].investor_verification_status, Status::Cancelled);
        assert_eq!(apps[2].investor_verification_status, Status::Cancelled);
        assert_eq!(outcome.cancelled_verifications, 2);
    }

    /// After removal no application of the investor passes the gate
    #[test]
    fn test_removal_closes_financial_gate_everywhere() {
        let mut apps = vec![ApplicationModel::agreed(), ApplicationModel::agreed()];
        remove_franchise(&mut apps, 1);

        assert!(apps.iter().all(|a| !a.is_fully_agreed()));
    }

    /// Submitting against an unknown business fails before anything is
    /// written: no application, no message, no notification
    #[test]
    fn test_submit_unknown_business_writes_nothing() {
        let mut store = SubmissionStore::new(&[1], &[10]);

        assert!(store.submit(1, 99).is_err());
        assert_eq!(store.applications.len(), 0);
        assert_eq!(store.messages, 0);
        assert_eq!(store.notifications, 0);
    }

    /// Submitting as an unknown investor fails the same way
    #[test]
    fn test_submit_unknown_investor_writes_nothing() {
        let mut store = SubmissionStore::new(&[1], &[10]);

        assert!(store.submit(99, 10).is_err());
        assert_eq!(store.applications.len(), 0);
        assert_eq!(store.messages, 0);
        assert_eq!(store.notifications, 0);
    }

    /// A successful submission writes the application plus the owner's
    /// notice message and notification
    #[test]
    fn test_submit_writes_application_message_and_notification() {
        let mut store = SubmissionStore::new(&[1], &[10]);

        assert!(store.submit(1, 10).is_ok());
        assert_eq!(store.applications, vec![(1, 10)]);
        assert_eq!(store.messages, 1);
        assert_eq!(store.notifications, 1);
    }
}

// ============================================================================
// Helper Types and Functions
// ============================================================================

/// Approval status (simplified for testing)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Agreed,
    Cancelled,
}

/// Parse a status value case-insensitively
pub fn parse_status(value: &str) -> Option<Status> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pending" => Some(Status::Pending),
        "agreed" => Some(Status::Agreed),
        "cancelled" => Some(Status::Cancelled),
        _ => None,
    }
}

/// Application with its two independent status tracks
#[derive(Debug, Clone)]
pub struct ApplicationModel {
    pub application_status: Status,
    pub investor_verification_status: Status,
    pub approval_dated: bool,
}

/// Outcome of applying a status update
#[derive(Debug, Clone, Copy)]
pub struct UpdateOutcome {
    pub promoted: bool,
}

/// Outcome of removing a franchise relationship
#[derive(Debug, Clone, Copy)]
pub struct RemovalOutcome {
    pub cancelled_verifications: usize,
    pub demoted: bool,
}

impl ApplicationModel {
    pub fn new() -> Self {
        Self {
            application_status: Status::Pending,
            investor_verification_status: Status::Pending,
            approval_dated: false,
        }
    }

    pub fn agreed() -> Self {
        Self {
            application_status: Status::Agreed,
            investor_verification_status: Status::Agreed,
            approval_dated: true,
        }
    }

    /// Apply a status update. On the business track only agreed and
    /// cancelled are decisions; pending leaves it untouched. Agreement
    /// stamps the approval date. Promotion fires when the verification
    /// track is explicitly set to agreed in this update.
    pub fn apply_update(
        &mut self,
        application_status: Option<Status>,
        verification_status: Option<Status>,
    ) -> UpdateOutcome {
        match application_status {
            Some(Status::Agreed) => {
                self.application_status = Status::Agreed;
                self.approval_dated = true;
            }
            Some(Status::Cancelled) => self.application_status = Status::Cancelled,
            Some(Status::Pending) | None => {}
        }
        if let Some(status) = verification_status {
            self.investor_verification_status = status;
        }

        UpdateOutcome {
            promoted: verification_status == Some(Status::Agreed),
        }
    }

    pub fn is_fully_agreed(&self) -> bool {
        self.application_status == Status::Agreed
            && self.investor_verification_status == Status::Agreed
    }
}

/// Submission store (simplified): known parties plus the rows a submission
/// writes. Preconditions are checked before any write happens.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    pub investors: Vec<u32>,
    pub businesses: Vec<u32>,
    pub applications: Vec<(u32, u32)>,
    pub messages: usize,
    pub notifications: usize,
}

impl SubmissionStore {
    pub fn new(investors: &[u32], businesses: &[u32]) -> Self {
        Self {
            investors: investors.to_vec(),
            businesses: businesses.to_vec(),
            applications: Vec::new(),
            messages: 0,
            notifications: 0,
        }
    }

    /// Submit an application: both parties must exist before the
    /// application row, the owner's notice message, and the notification
    /// are written
    pub fn submit(&mut self, investor: u32, business: u32) -> Result<(), &'static str> {
        if !self.investors.contains(&investor) {
            return Err("investor not found");
        }
        if !self.businesses.contains(&business) {
            return Err("business not found");
        }

        self.applications.push((investor, business));
        self.messages += 1;
        self.notifications += 1;
        Ok(())
    }
}

/// An update must set at least one track
pub fn is_valid_update(
    application_status: &Option<Status>,
    verification_status: &Option<Status>,
) -> bool {
    application_status.is_some() || verification_status.is_some()
}

/// Remove the franchise relationship on `target`: cancel both of its tracks,
/// cancel verification on every other application of the same investor, and
/// demote the investor
pub fn remove_franchise(apps: &mut [ApplicationModel], target: usize) -> RemovalOutcome {
    apps[target].application_status = Status::Cancelled;
    apps[target].investor_verification_status = Status::Cancelled;

    let mut cancelled = 0;
    for (i, app) in apps.iter_mut().enumerate() {
        if i != target && app.investor_verification_status != Status::Cancelled {
            app.investor_verification_status = Status::Cancelled;
            cancelled += 1;
        }
    }

    RemovalOutcome {
        cancelled_verifications: cancelled,
        demoted: true,
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = Status> {
        prop_oneof![
            Just(Status::Pending),
            Just(Status::Agreed),
            Just(Status::Cancelled),
        ]
    }

    fn optional_status_strategy() -> impl Strategy<Value = Option<Status>> {
        proptest::option::of(status_strategy())
    }

    proptest! {
        /// A provided verification status lands verbatim; the business
        /// track only moves on agreed or cancelled, and an omitted track
        /// never changes
        #[test]
        fn prop_update_sets_exactly_the_provided_tracks(
            initial_app in status_strategy(),
            initial_ver in status_strategy(),
            update_app in optional_status_strategy(),
            update_ver in optional_status_strategy(),
        ) {
            let mut app = ApplicationModel {
                application_status: initial_app,
                investor_verification_status: initial_ver,
                approval_dated: false,
            };
            app.apply_update(update_app, update_ver);

            let expected_app = match update_app {
                Some(Status::Agreed) => Status::Agreed,
                Some(Status::Cancelled) => Status::Cancelled,
                Some(Status::Pending) | None => initial_app,
            };
            prop_assert_eq!(app.application_status, expected_app);
            prop_assert_eq!(
                app.investor_verification_status,
                update_ver.unwrap_or(initial_ver)
            );
            prop_assert_eq!(app.approval_dated, update_app == Some(Status::Agreed));
        }

        /// Promotion fires iff the update sets verification to agreed
        #[test]
        fn prop_promotion_iff_verification_agreed(
            update_app in optional_status_strategy(),
            update_ver in optional_status_strategy(),
        ) {
            let mut app = ApplicationModel::new();
            let outcome = app.apply_update(update_app, update_ver);

            prop_assert_eq!(outcome.promoted, update_ver == Some(Status::Agreed));
        }

        /// The financial gate opens iff both tracks are agreed
        #[test]
        fn prop_gate_requires_both_tracks(
            app_status in status_strategy(),
            ver_status in status_strategy(),
        ) {
            let app = ApplicationModel {
                application_status: app_status,
                investor_verification_status: ver_status,
                approval_dated: app_status == Status::Agreed,
            };

            prop_assert_eq!(
                app.is_fully_agreed(),
                app_status == Status::Agreed && ver_status == Status::Agreed
            );
        }

        /// Removal leaves no verification standing for the investor
        #[test]
        fn prop_removal_cancels_all_verifications(
            statuses in proptest::collection::vec(
                (status_strategy(), status_strategy()), 1..8
            ),
            target_seed in any::<usize>(),
        ) {
            let mut apps: Vec<ApplicationModel> = statuses
                .into_iter()
                .map(|(a, v)| ApplicationModel {
                    application_status: a,
                    investor_verification_status: v,
                    approval_dated: a == Status::Agreed,
                })
                .collect();
            let target = target_seed % apps.len();

            remove_franchise(&mut apps, target);

            prop_assert!(apps
                .iter()
                .all(|a| a.investor_verification_status == Status::Cancelled));
            prop_assert_eq!(apps[target].application_status, Status::Cancelled);
        }

        /// A submission either writes all three rows or none of them
        #[test]
        fn prop_submission_is_all_or_nothing(
            investors in proptest::collection::vec(0u32..50, 0..5),
            businesses in proptest::collection::vec(0u32..50, 0..5),
            investor in 0u32..100,
            business in 0u32..100,
        ) {
            let mut store = SubmissionStore::new(&investors, &businesses);

            match store.submit(investor, business) {
                Ok(()) => {
                    prop_assert_eq!(store.applications.len(), 1);
                    prop_assert_eq!(store.messages, 1);
                    prop_assert_eq!(store.notifications, 1);
                }
                Err(_) => {
                    prop_assert!(store.applications.is_empty());
                    prop_assert_eq!(store.messages, 0);
                    prop_assert_eq!(store.notifications, 0);
                }
            }
        }

        /// Status parsing accepts any casing of the three known values
        #[test]
        fn prop_parse_accepts_any_casing(
            status in status_strategy(),
            uppercase_mask in proptest::collection::vec(any::<bool>(), 9),
        ) {
            let canonical = match status {
                Status::Pending => "pending",
                Status::Agreed => "agreed",
                Status::Cancelled => "cancelled",
            };
            let mangled: String = canonical
                .chars()
                .zip(uppercase_mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();

            prop_assert_eq!(parse_status(&mangled), Some(status));
        }
    }
}
