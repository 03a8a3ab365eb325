//! Field validation for transaction create/update input.

use rust_decimal::Decimal;

use super::error::TransactionRuleError;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Maximum notes length in characters.
pub const MAX_NOTES_LEN: usize = 1000;

/// Minimum accepted amount.
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Validates that an amount is at least 0.01.
pub fn validate_amount(amount: Decimal) -> Result<(), TransactionRuleError> {
    if amount < MIN_AMOUNT {
        return Err(TransactionRuleError::InvalidAmount(amount));
    }
    Ok(())
}

/// Validates a transaction description: required, at most 200 characters.
pub fn validate_description(description: &str) -> Result<(), TransactionRuleError> {
    if description.trim().is_empty() {
        return Err(TransactionRuleError::EmptyDescription);
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(TransactionRuleError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// Validates optional notes: at most 1000 characters.
pub fn validate_notes(notes: &str) -> Result<(), TransactionRuleError> {
    let len = notes.chars().count();
    if len > MAX_NOTES_LEN {
        return Err(TransactionRuleError::NotesTooLong {
            len,
            max: MAX_NOTES_LEN,
        });
    }
    Ok(())
}
