//! Client input validation.
//!
//! Clients carry no lifecycle logic; only their field constraints live here.
//! Email uniqueness is enforced at the repository layer, where the existing
//! rows are visible.

use thiserror::Error;

use fluxo_shared::AppError;

/// A violated client field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientRuleError {
    /// Name must be 3 to 100 characters.
    #[error("Name must be between {min} and {max} characters (got {len})")]
    InvalidNameLength {
        /// Actual length.
        len: usize,
        /// Minimum allowed.
        min: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Email is not a valid address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Phone must be 10 or 11 digits.
    #[error("Phone must be 10-11 digits")]
    InvalidPhone,

    /// Document must be 11 to 14 digits.
    #[error("Document must be 11-14 digits")]
    InvalidDocument,

    /// Address exceeds the 500 character limit.
    #[error("Address exceeds {max} characters (got {len})")]
    AddressTooLong {
        /// Actual length.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl From<ClientRuleError> for AppError {
    fn from(err: ClientRuleError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Minimum client name length.
pub const MIN_NAME_LEN: usize = 3;
/// Maximum client name length.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum address length.
pub const MAX_ADDRESS_LEN: usize = 500;

/// Validates a client name: 3 to 100 characters.
pub fn validate_name(name: &str) -> Result<(), ClientRuleError> {
    let len = name.chars().count();
    if len < MIN_NAME_LEN || len > MAX_NAME_LEN {
        return Err(ClientRuleError::InvalidNameLength {
            len,
            min: MIN_NAME_LEN,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates an email address.
pub fn validate_email(email: &str) -> Result<(), ClientRuleError> {
    if email_address::EmailAddress::is_valid(email) {
        Ok(())
    } else {
        Err(ClientRuleError::InvalidEmail(email.to_string()))
    }
}

/// Validates a phone number: digits only, 10 or 11 of them.
pub fn validate_phone(phone: &str) -> Result<(), ClientRuleError> {
    if phone.len() < 10 || phone.len() > 11 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClientRuleError::InvalidPhone);
    }
    Ok(())
}

/// Validates a document number: digits only, 11 to 14 of them.
pub fn validate_document(document: &str) -> Result<(), ClientRuleError> {
    if document.len() < 11 || document.len() > 14 || !document.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ClientRuleError::InvalidDocument);
    }
    Ok(())
}

/// Validates an address: at most 500 characters.
pub fn validate_address(address: &str) -> Result<(), ClientRuleError> {
    let len = address.chars().count();
    if len > MAX_ADDRESS_LEN {
        return Err(ClientRuleError::AddressTooLong {
            len,
            max: MAX_ADDRESS_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("Ana").is_ok());
        assert!(validate_name("Al").is_err());
        assert!(validate_name(&"a".repeat(100)).is_ok());
        assert!(validate_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("1198765432").is_ok());
        assert!(validate_phone("11987654321").is_ok());
        assert!(validate_phone("123456789").is_err());
        assert!(validate_phone("119876543210").is_err());
        assert!(validate_phone("11-98765432").is_err());
    }

    #[test]
    fn test_document() {
        assert!(validate_document("12345678901").is_ok());
        assert!(validate_document("12345678901234").is_ok());
        assert!(validate_document("1234567890").is_err());
        assert!(validate_document("123456789012345").is_err());
        assert!(validate_document("12345678-901").is_err());
    }

    #[test]
    fn test_address() {
        assert!(validate_address("").is_ok());
        assert!(validate_address(&"r".repeat(500)).is_ok());
        assert!(validate_address(&"r".repeat(501)).is_err());
    }
}
