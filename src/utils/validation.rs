//! Input validation
//!
//! [`ValidatedJson`] extracts a JSON body and runs `validator` derive rules
//! on it before the handler sees it. Shape errors (malformed JSON, wrong
//! types) become 400 Invalid; rule violations become 400 Validation with
//! structured field-level errors.

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::utils::AppError;

/// JSON extractor that enforces `#[derive(Validate)]` rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid(format!("Invalid request body: {}", e.body_text())))?;

        value.validate().map_err(|e| {
            let details = serde_json::to_value(&e).unwrap_or(serde_json::Value::Null);
            AppError::validation_with_errors("Invalid request payload", details)
        })?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 2))]
        name: String,
        #[validate(range(min = 1, max = 5))]
        rating: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let req = json_request(r#"{"name":"Anna","rating":4}"#);
        let out = ValidatedJson::<Payload>::from_request(req, &()).await;
        assert!(out.is_ok());
    }

    #[tokio::test]
    async fn rejects_rule_violation_with_field_errors() {
        let req = json_request(r#"{"name":"Anna","rating":9}"#);
        let err = ValidatedJson::<Payload>::from_request(req, &())
            .await
            .unwrap_err();
        match err {
            AppError::Validation { errors, .. } => assert!(errors.is_some()),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_malformed_json_as_invalid() {
        let req = json_request(r#"{"name":"Anna","rating":"high"}"#);
        let err = ValidatedJson::<Payload>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));
    }
}
