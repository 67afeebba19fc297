//! Input validation helpers
//!
//! Custom rules used by the `validator` derives on the create/update
//! payloads, and a flattener that turns `ValidationErrors` into the single
//! line shown to the user.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::SharedError;

// ── Custom rules ────────────────────────────────────────────────────

/// Reject empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}

/// Every entry of an image list must be a non-blank url.
pub fn no_blank_urls(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::new("blank_url")
            .with_message(Cow::Borrowed("image urls must not be empty")));
    }
    Ok(())
}

// ── Reporting ───────────────────────────────────────────────────────

/// Flatten validation errors into `field: message; field: message`.
///
/// Fields are sorted so the message is stable across runs.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                if field == "__all__" {
                    msg
                } else {
                    format!("{field}: {msg}")
                }
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run the derived validation and convert the failure.
pub fn check<T: Validate>(payload: &T) -> Result<(), SharedError> {
    payload.validate().map_err(SharedError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"))]
        title: String,
        #[validate(length(min = 1, message = "at least one image is required"))]
        images: Vec<String>,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Sea view").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_describe_sorts_fields() {
        let sample = Sample {
            title: " ".into(),
            images: vec![],
        };
        let err = check(&sample).unwrap_err();
        assert_eq!(
            err,
            SharedError::Validation(
                "images: at least one image is required; title: must not be empty".into()
            )
        );
    }

    #[test]
    fn test_valid_payload_passes() {
        let sample = Sample {
            title: "Spring offer".into(),
            images: vec!["https://cdn.example.com/a.jpg".into()],
        };
        assert!(check(&sample).is_ok());
    }
}
