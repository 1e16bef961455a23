//! Custom field validators used by `#[validate(custom(...))]`

use std::borrow::Cow;

use validator::ValidationError;

/// Accept E.164-style numbers: optional `+`, then 8 to 15 digits.
/// Spaces and dashes used as separators are ignored.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    let body = digits.strip_prefix('+').unwrap_or(&digits);
    let ok = (8..=15).contains(&body.len()) && body.chars().all(|c| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some(Cow::Borrowed("Enter a valid phone number"));
        Err(err)
    }
}

/// ISO-4217 style currency code: three ASCII letters
pub fn validate_currency(code: &str) -> Result<(), ValidationError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("currency");
        err.message = Some(Cow::Borrowed("Currency must be a 3-letter code"));
        Err(err)
    }
}

/// Reject blank strings that pass a plain length check
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("This field may not be blank"));
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone() {
        assert!(validate_phone("+243900000001").is_ok());
        assert!(validate_phone("+243 900-000-001").is_ok());
        assert!(validate_phone("0810000000").is_ok());
        assert!(validate_phone("+12").is_err());
        assert!(validate_phone("+24390000000a").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_currency() {
        assert!(validate_currency("CDF").is_ok());
        assert!(validate_currency("usd").is_ok());
        assert!(validate_currency("US").is_err());
        assert!(validate_currency("U5D").is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("Lion").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
