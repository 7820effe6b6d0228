use crate::errors::DepositError;
use rust_decimal::Decimal;

/// **Checks the caller's token against the one the app was provisioned with**
///
/// Byte equality of the two optional values, so a header that isn't valid text
/// is just another mismatch. A missing header is accepted only when no token
/// was provisioned either.
pub fn authorize(expected: Option<&str>, presented: Option<&[u8]>) -> Result<(), DepositError> {
    if expected.map(str::as_bytes) == presented {
        Ok(())
    } else {
        Err(DepositError::Unauthorized)
    }
}

/// **Basic input validation for a deposit amount**
///
/// Checks for:
/// - A negative amount.
pub fn is_valid_amount(amount: &Decimal) -> bool {
    *amount >= Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_matching_token_passes() {
        assert!(authorize(Some("secret"), Some(b"secret")).is_ok());
    }

    #[test]
    fn test_wrong_token_fails() {
        assert!(matches!(
            authorize(Some("secret"), Some(b"bad")),
            Err(DepositError::Unauthorized)
        ));
    }

    #[test]
    fn test_missing_token_fails() {
        assert!(authorize(Some("secret"), None).is_err());
    }

    #[test]
    fn test_unexpected_token_fails() {
        assert!(authorize(None, Some(b"secret")).is_err());
    }

    #[test]
    fn test_no_token_anywhere_passes() {
        assert!(authorize(None, None).is_ok());
    }

    #[test]
    fn test_token_is_case_sensitive() {
        assert!(authorize(Some("secret"), Some(b"Secret")).is_err());
    }

    #[test]
    fn test_non_ascii_token_compares_bytes() {
        assert!(authorize(Some("secret"), Some("sécret".as_bytes())).is_err());
        assert!(authorize(Some("sécret"), Some("sécret".as_bytes())).is_ok());
    }

    #[test]
    fn test_amounts() {
        assert!(is_valid_amount(&dec!(99)));
        assert!(is_valid_amount(&dec!(0)));
        assert!(is_valid_amount(&dec!(0.0001)));
        assert!(!is_valid_amount(&dec!(-5)));
        assert!(!is_valid_amount(&dec!(-0.01)));
    }
}
