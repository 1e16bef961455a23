//! Request body validation
//!
//! [`ValidatedJson`] parses the body, runs the payload's `validator` rules
//! and reports both kinds of failure as a 400 with per-field details.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::utils::AppError;

/// Detail key for errors not tied to one field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// JSON body that has been deserialized and validated
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let text = err.body_text();
            match field_error(&text) {
                Some((field, message)) => AppError::field(&field, message),
                None => AppError::field(NON_FIELD_ERRORS, data_error_detail(&text)),
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            AppError::field(NON_FIELD_ERRORS, format!("Malformed JSON: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::invalid("Expected request with `Content-Type: application/json`")
        }
        other => AppError::invalid(other.body_text()),
    }
}

/// Text after axum's "Failed to deserialize ..." prefix
fn data_error_detail(text: &str) -> &str {
    text.split_once(": ").map(|(_, rest)| rest).unwrap_or(text)
}

/// Field and message from a deserialization failure
///
/// `missing field `email`` → (`email`, "This field is required");
/// `type_ticket: unknown variant ...` → (`type_ticket`, "unknown variant ...").
pub fn field_error(text: &str) -> Option<(String, String)> {
    let detail = data_error_detail(text);

    if let Some((_, rest)) = detail.split_once("missing field `")
        && let Some((name, _)) = rest.split_once('`')
    {
        return Some((name.to_string(), "This field is required".to_string()));
    }

    let (path, message) = detail.split_once(": ")?;
    if path.is_empty() || path.contains(char::is_whitespace) {
        return None;
    }
    let field = path
        .split(['.', '['])
        .next()
        .filter(|f| !f.is_empty())?;
    let message = message
        .split(" at line ")
        .next()
        .unwrap_or(message)
        .to_string();
    Some((field.to_string(), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let text = "Failed to deserialize the JSON body into the target type: missing field `email` at line 1 column 20";
        assert_eq!(
            field_error(text),
            Some(("email".into(), "This field is required".into()))
        );
    }

    #[test]
    fn test_pathed_error() {
        let text = "Failed to deserialize the JSON body into the target type: type_ticket: unknown variant `platinum`, expected one of `standard`, `vip` at line 1 column 40";
        let (field, message) = field_error(text).unwrap();
        assert_eq!(field, "type_ticket");
        assert!(message.starts_with("unknown variant"));
        assert!(!message.contains("line 1"));

        let nested = "Failed to deserialize the JSON body into the target type: participants[1]: invalid type: string \"x\", expected i64 at line 1 column 9";
        assert_eq!(field_error(nested).unwrap().0, "participants");
    }

    #[test]
    fn test_unattributed_error() {
        let text = "Failed to deserialize the JSON body into the target type: invalid type: integer `3`, expected a map at line 1 column 1";
        // "invalid type" contains whitespace so it is not a field path
        assert!(field_error(text).is_none());
    }
}
