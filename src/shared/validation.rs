//! Validation Utilities

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::{AppError, FieldError};

/// Characters accepted as the "special" class of the password policy.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Convert validation errors to AppError
///
/// Nested struct errors are flattened with dotted paths (`place.name`).
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors = Vec::new();
    collect_field_errors("", &errors, &mut field_errors);

    // HashMap order is unstable; keep responses deterministic
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    AppError::InvalidFields(field_errors)
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

/// Check a password against the account password policy.
///
/// Rules are applied in order and the first failing rule's message is
/// returned.
pub fn check_password_policy(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number");
    }
    if !password.chars().any(char::is_uppercase) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(char::is_lowercase) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err("Password must contain at least one special character");
    }
    Ok(())
}

/// `validator` adapter for [`check_password_policy`].
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    check_password_policy(password).map_err(|message| {
        let mut err = ValidationError::new("password_policy");
        err.message = Some(message.into());
        err
    })
}

/// Three ASCII letters, e.g. `EUR`.
pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("currency_code");
        err.message = Some("Currency must be a 3-letter code".into());
        Err(err)
    }
}
