//! Shared field rules used by request schemas across every resource.
//!
//! Enumerated fields are checked with [`check_one_of`]; the resulting
//! message lists the accepted values verbatim so API consumers can
//! self-correct. Request structs derive `validator::Validate` and report
//! enumeration failures through [`rule_violation`] from a struct-level
//! schema function.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Build the standard "not one of" message for `field`.
pub fn one_of_message(field: &str, allowed: &[&str]) -> String {
    format!("Invalid {field}. Must be one of: {}", allowed.join(", "))
}

/// Exact-match membership check. No trimming or case folding is applied.
pub fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(one_of_message(field, allowed)))
    }
}

/// Like [`check_one_of`] but skips absent values (partial updates).
pub fn check_optional_one_of(
    field: &str,
    value: Option<&str>,
    allowed: &[&str],
) -> Result<(), CoreError> {
    match value {
        Some(v) => check_one_of(field, v, allowed),
        None => Ok(()),
    }
}

/// Convert a domain rule failure into a `validator` error so it can be
/// returned from a `#[validate(schema(function = ...))]` function.
pub fn rule_violation(err: CoreError) -> ValidationError {
    let message = match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    };
    let mut violation = ValidationError::new("rule");
    violation.message = Some(Cow::Owned(message));
    violation
}

/// Flatten `validator` errors into a single client-facing message.
///
/// Fields are reported in name order so the message is deterministic;
/// multiple failures are joined with `"; "`.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();

    messages.join("; ")
}
