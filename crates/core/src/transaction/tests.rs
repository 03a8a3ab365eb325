//! Tests for transaction lifecycle and validation rules.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::TransactionRuleError;
use super::lifecycle::{can_transition, validate_transition};
use super::types::{TransactionKind, TransactionStatus};
use super::validation::{validate_amount, validate_description, validate_notes};

fn status_strategy() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Pending),
        Just(TransactionStatus::Paid),
        Just(TransactionStatus::Overdue),
        Just(TransactionStatus::Cancelled),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Self-transitions are always a permitted no-op.
    #[test]
    fn prop_self_transition_allowed(status in status_strategy()) {
        prop_assert!(can_transition(status, status));
    }

    /// Terminal statuses never transition to a different status.
    #[test]
    fn prop_terminal_statuses_reject_exit(
        from in prop_oneof![Just(TransactionStatus::Paid), Just(TransactionStatus::Cancelled)],
        to in status_strategy(),
    ) {
        prop_assume!(from != to);
        // Bound to a local: prop_assert! stringifies its condition into a
        // format string, where the braces of a struct pattern do not parse.
        let illegal = matches!(
            validate_transition(from, to),
            Err(TransactionRuleError::IllegalTransition { .. })
        );
        prop_assert!(illegal);
    }

    /// Positive amounts with at least cent precision always validate.
    #[test]
    fn prop_positive_amounts_accepted(cents in 1i64..1_000_000_000i64) {
        let amount = Decimal::new(cents, 2);
        prop_assert!(validate_amount(amount).is_ok());
    }

    /// Zero and negative amounts are always rejected.
    #[test]
    fn prop_non_positive_amounts_rejected(cents in -1_000_000_000i64..=0i64) {
        let amount = Decimal::new(cents, 2);
        prop_assert!(matches!(
            validate_amount(amount),
            Err(TransactionRuleError::InvalidAmount(_))
        ));
    }
}

#[rstest]
#[case(TransactionStatus::Pending, TransactionStatus::Paid, true)]
#[case(TransactionStatus::Pending, TransactionStatus::Overdue, true)]
#[case(TransactionStatus::Pending, TransactionStatus::Cancelled, true)]
#[case(TransactionStatus::Overdue, TransactionStatus::Paid, true)]
#[case(TransactionStatus::Overdue, TransactionStatus::Cancelled, true)]
#[case(TransactionStatus::Overdue, TransactionStatus::Pending, false)]
#[case(TransactionStatus::Paid, TransactionStatus::Pending, false)]
#[case(TransactionStatus::Paid, TransactionStatus::Overdue, false)]
#[case(TransactionStatus::Paid, TransactionStatus::Cancelled, false)]
#[case(TransactionStatus::Cancelled, TransactionStatus::Paid, false)]
#[case(TransactionStatus::Cancelled, TransactionStatus::Pending, false)]
fn test_transition_edges(
    #[case] from: TransactionStatus,
    #[case] to: TransactionStatus,
    #[case] allowed: bool,
) {
    assert_eq!(can_transition(from, to), allowed);
}

#[test]
fn test_illegal_transition_reports_edge() {
    let err = validate_transition(TransactionStatus::Paid, TransactionStatus::Pending)
        .expect_err("terminal exit should fail");
    assert_eq!(
        err,
        TransactionRuleError::IllegalTransition {
            from: TransactionStatus::Paid,
            to: TransactionStatus::Pending,
        }
    );
}

#[test]
fn test_amount_minimum() {
    assert!(validate_amount(dec!(0.01)).is_ok());
    assert!(validate_amount(dec!(0.009)).is_err());
    assert!(validate_amount(dec!(0)).is_err());
    assert!(validate_amount(dec!(-5.00)).is_err());
}

#[test]
fn test_description_limits() {
    assert!(validate_description("Office rent").is_ok());
    assert!(validate_description("").is_err());
    assert!(validate_description("   ").is_err());
    assert!(validate_description(&"x".repeat(200)).is_ok());
    assert!(matches!(
        validate_description(&"x".repeat(201)),
        Err(TransactionRuleError::DescriptionTooLong { len: 201, max: 200 })
    ));
}

#[test]
fn test_notes_limits() {
    assert!(validate_notes("").is_ok());
    assert!(validate_notes(&"n".repeat(1000)).is_ok());
    assert!(matches!(
        validate_notes(&"n".repeat(1001)),
        Err(TransactionRuleError::NotesTooLong { len: 1001, max: 1000 })
    ));
}

#[test]
fn test_kind_round_trip() {
    for kind in [TransactionKind::Payable, TransactionKind::Receivable] {
        assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(TransactionKind::parse("receivable"), Some(TransactionKind::Receivable));
    assert_eq!(TransactionKind::parse("bogus"), None);
}

#[test]
fn test_status_round_trip() {
    for status in [
        TransactionStatus::Pending,
        TransactionStatus::Paid,
        TransactionStatus::Overdue,
        TransactionStatus::Cancelled,
    ] {
        assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(TransactionStatus::parse("paid"), Some(TransactionStatus::Paid));
    assert_eq!(TransactionStatus::parse(""), None);
}

#[test]
fn test_terminal_flag() {
    assert!(TransactionStatus::Paid.is_terminal());
    assert!(TransactionStatus::Cancelled.is_terminal());
    assert!(!TransactionStatus::Pending.is_terminal());
    assert!(!TransactionStatus::Overdue.is_terminal());
}
