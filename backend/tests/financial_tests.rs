//! Financial reporting tests
//!
//! Tests for the financial access gate and entry aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Access requires agreement on both tracks
    #[test]
    fn test_gate_requires_both_agreed() {
        assert!(gate_open("agreed", "agreed"));
        assert!(!gate_open("agreed", "pending"));
        assert!(!gate_open("pending", "agreed"));
        assert!(!gate_open("cancelled", "agreed"));
        assert!(!gate_open("pending", "pending"));
    }

    /// An open gate with no entries yields an empty list, not an error
    #[test]
    fn test_open_gate_with_no_entries_is_empty() {
        let entries: Vec<EntryModel> = Vec::new();
        let summary = summarize(&entries);

        assert_eq!(summary.entry_count, 0);
        assert_eq!(summary.total_investment, Decimal::ZERO);
        assert_eq!(summary.net_return, Decimal::ZERO);
    }

    /// Totals accumulate across entries
    #[test]
    fn test_summary_totals() {
        let entries = vec![
            EntryModel::new(1000, 300),
            EntryModel::new(2000, 700),
            EntryModel::new(500, 0),
        ];
        let summary = summarize(&entries);

        assert_eq!(summary.entry_count, 3);
        assert_eq!(summary.total_investment, Decimal::from(3500));
        assert_eq!(summary.total_income, Decimal::from(1000));
        assert_eq!(summary.net_return, Decimal::from(-2500));
    }

    /// Investment amounts must be strictly positive
    #[test]
    fn test_investment_amount_validation() {
        assert!(valid_investment(Decimal::from(1)));
        assert!(!valid_investment(Decimal::ZERO));
        assert!(!valid_investment(Decimal::from(-50)));
    }

    /// Income amounts may be zero but not negative
    #[test]
    fn test_income_amount_validation() {
        assert!(valid_income(Decimal::ZERO));
        assert!(valid_income(Decimal::from(250)));
        assert!(!valid_income(Decimal::from(-1)));
    }

    /// Duplicate entries for the same date are allowed
    #[test]
    fn test_duplicate_entries_allowed() {
        let entries = vec![EntryModel::new(100, 50), EntryModel::new(100, 50)];
        let summary = summarize(&entries);

        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.total_investment, Decimal::from(200));
    }

    /// Submission requires the gate; a closed gate writes nothing
    #[test]
    fn test_submit_requires_open_gate() {
        let mut entries = Vec::new();

        assert!(submit_entry(&mut entries, true, EntryModel::new(100, 0)));
        assert!(!submit_entry(&mut entries, false, EntryModel::new(200, 0)));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].investment_amount, Decimal::from(100));
    }

    /// Entries recorded while the parties were agreed stay readable after
    /// the relationship is cancelled or removed
    #[test]
    fn test_entries_remain_readable_after_removal() {
        let mut entries = Vec::new();
        submit_entry(&mut entries, true, EntryModel::new(1000, 300));
        submit_entry(&mut entries, true, EntryModel::new(500, 800));

        // Removal closes the gate on both tracks
        assert!(!gate_open("cancelled", "cancelled"));

        // Fetch does not consult the gate
        let fetched = fetch_entries(&entries);
        assert_eq!(fetched.len(), 2);

        let summary = summarize(fetched);
        assert_eq!(summary.total_investment, Decimal::from(1500));
        assert_eq!(summary.net_return, Decimal::from(-400));
    }
}

// ============================================================================
// Helper Types and Functions
// ============================================================================

/// Financial entry (simplified for testing)
#[derive(Debug, Clone)]
pub struct EntryModel {
    pub investment_amount: Decimal,
    pub income_amount: Decimal,
}

impl EntryModel {
    pub fn new(investment: i64, income: i64) -> Self {
        Self {
            investment_amount: Decimal::from(investment),
            income_amount: Decimal::from(income),
        }
    }
}

/// Summary over a set of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryModel {
    pub entry_count: usize,
    pub total_investment: Decimal,
    pub total_income: Decimal,
    pub net_return: Decimal,
}

/// The gate opens iff both status tracks are agreed
pub fn gate_open(application_status: &str, verification_status: &str) -> bool {
    application_status == "agreed" && verification_status == "agreed"
}

/// Recording an entry requires an open gate
pub fn submit_entry(entries: &mut Vec<EntryModel>, gate: bool, entry: EntryModel) -> bool {
    if gate {
        entries.push(entry);
    }
    gate
}

/// Reading entries does not: the record outlives the relationship
pub fn fetch_entries(entries: &[EntryModel]) -> &[EntryModel] {
    entries
}

/// Compute totals across entries
pub fn summarize(entries: &[EntryModel]) -> SummaryModel {
    let total_investment: Decimal = entries.iter().map(|e| e.investment_amount).sum();
    let total_income: Decimal = entries.iter().map(|e| e.income_amount).sum();

    SummaryModel {
        entry_count: entries.len(),
        total_investment,
        total_income,
        net_return: total_income - total_investment,
    }
}

/// Investment must be strictly positive
pub fn valid_investment(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}

/// Income may be zero but not negative
pub fn valid_income(amount: Decimal) -> bool {
    amount >= Decimal::ZERO
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("pending"), Just("agreed"), Just("cancelled")]
    }

    fn entry_strategy() -> impl Strategy<Value = EntryModel> {
        (1i64..1_000_000, 0i64..1_000_000).prop_map(|(inv, inc)| EntryModel::new(inv, inc))
    }

    proptest! {
        /// The gate is closed unless both tracks say agreed
        #[test]
        fn prop_gate_closed_without_full_agreement(
            app_status in status_strategy(),
            ver_status in status_strategy(),
        ) {
            let open = gate_open(app_status, ver_status);
            if app_status != "agreed" || ver_status != "agreed" {
                prop_assert!(!open);
            } else {
                prop_assert!(open);
            }
        }

        /// Net return is always income minus investment
        #[test]
        fn prop_net_return_is_income_minus_investment(
            entries in proptest::collection::vec(entry_strategy(), 0..20),
        ) {
            let summary = summarize(&entries);
            prop_assert_eq!(
                summary.net_return,
                summary.total_income - summary.total_investment
            );
            prop_assert_eq!(summary.entry_count, entries.len());
        }

        /// Fetch returns exactly what was recorded while the gate was open,
        /// no matter how the gate flipped in between
        #[test]
        fn prop_fetch_returns_all_recorded_entries(
            submissions in proptest::collection::vec(
                (any::<bool>(), entry_strategy()), 0..20
            ),
        ) {
            let mut entries = Vec::new();
            let mut recorded = 0;
            for (gate, entry) in submissions {
                if submit_entry(&mut entries, gate, entry) {
                    recorded += 1;
                }
            }

            prop_assert_eq!(fetch_entries(&entries).len(), recorded);
        }

        /// Appending an entry grows the totals monotonically
        #[test]
        fn prop_totals_are_monotonic(
            entries in proptest::collection::vec(entry_strategy(), 0..20),
            extra in entry_strategy(),
        ) {
            let before = summarize(&entries);

            let mut grown = entries.clone();
            grown.push(extra.clone());
            let after = summarize(&grown);

            prop_assert_eq!(
                after.total_investment,
                before.total_investment + extra.investment_amount
            );
            prop_assert_eq!(
                after.total_income,
                before.total_income + extra.income_amount
            );
        }
    }
}
