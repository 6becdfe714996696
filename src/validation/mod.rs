//! Business-rule validation of pledge drafts.
//!
//! Pure functions: nothing here touches storage or the clock.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Field, FieldError, FieldErrors};
use crate::models::PledgeDraft;

/// Smallest accepted donation, in dollars.
pub const MINIMUM_AMOUNT: f64 = 1.00;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const AMOUNT_BELOW_MINIMUM: &str = "Minimum donation is $1";
pub const AMOUNT_INVALID: &str = "Please enter a valid amount";

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Check every field of `draft`, collecting all failures.
pub fn validate(draft: &PledgeDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(err) = check_name(&draft.name) {
        errors.insert(Field::Name, err);
    }
    if let Some(err) = check_email(&draft.email) {
        errors.insert(Field::Email, err);
    }
    if let Some(err) = check_amount(draft.amount) {
        errors.insert(Field::Amount, err);
    }

    errors.into_result()
}

pub fn check_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        return Some(FieldError::Required(NAME_REQUIRED.to_string()));
    }
    None
}

pub fn check_email(email: &str) -> Option<FieldError> {
    if email.trim().is_empty() {
        return Some(FieldError::Required(EMAIL_REQUIRED.to_string()));
    }
    if !is_email_shaped(email) {
        return Some(FieldError::InvalidFormat(EMAIL_INVALID.to_string()));
    }
    None
}

pub fn check_amount(amount: f64) -> Option<FieldError> {
    if amount == f64::INFINITY {
        return Some(FieldError::InvalidFormat(AMOUNT_INVALID.to_string()));
    }
    if amount.is_nan() || amount < MINIMUM_AMOUNT {
        return Some(FieldError::BelowMinimum(AMOUNT_BELOW_MINIMUM.to_string()));
    }
    None
}

/// `local@domain.tld` with exactly one `@` and no whitespace anywhere.
pub fn is_email_shaped(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn draft(amount: f64, name: &str, email: &str) -> PledgeDraft {
        PledgeDraft::new(amount, name, email, Frequency::OneTime)
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate(&draft(25.0, "Sarah Johnson", "sarah.j@example.com")).is_ok());
    }

    #[test]
    fn test_minimum_amount_is_inclusive() {
        assert!(check_amount(1.0).is_none());
        assert!(matches!(
            check_amount(0.99),
            Some(FieldError::BelowMinimum(_))
        ));
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        assert!(matches!(
            check_amount(f64::NAN),
            Some(FieldError::BelowMinimum(_))
        ));
        assert!(matches!(
            check_amount(f64::NEG_INFINITY),
            Some(FieldError::BelowMinimum(_))
        ));
        assert!(matches!(
            check_amount(f64::INFINITY),
            Some(FieldError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_whitespace_name_required() {
        let err = check_name(" \t\n").unwrap();
        assert_eq!(err.message(), NAME_REQUIRED);
    }

    #[test]
    fn test_blank_email_is_required_not_invalid() {
        assert!(matches!(check_email(""), Some(FieldError::Required(_))));
        assert!(matches!(check_email("   "), Some(FieldError::Required(_))));
    }

    #[test]
    fn test_email_shapes() {
        for ok in ["x@y.z", "sarah.j@example.com", "a+b@mail.co.uk"] {
            assert!(is_email_shaped(ok), "{ok} should pass");
        }
        for bad in [
            "bad",
            "no-at.example.com",
            "a@@b.com",
            "a@b@c.com",
            "a@nodot",
            "@example.com",
            "a@.",
            "a b@example.com",
            "a@exa mple.com",
            " a@b.c",
            "a@b.",
        ] {
            assert!(!is_email_shaped(bad), "{bad} should fail");
        }
    }

    #[test]
    fn test_all_errors_reported_together() {
        let errors = validate(&draft(0.5, "", "bad")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!([Field::Amount, Field::Name, Field::Email]
            .into_iter()
            .all(|field| errors.contains(field)));
        assert!(matches!(
            errors.get(Field::Amount),
            Some(FieldError::BelowMinimum(_))
        ));
        assert!(matches!(
            errors.get(Field::Name),
            Some(FieldError::Required(_))
        ));
        assert!(matches!(
            errors.get(Field::Email),
            Some(FieldError::InvalidFormat(_))
        ));
    }
}
