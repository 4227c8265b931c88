//! The backend's response wrapper: `{ "code": "200", "msg": null, "data": ... }`.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// Envelope `code` for success.
pub const SUCCESS_CODE: &str = "200";

/// Undecoded response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Result code. A string on the wire; numbers are tolerated.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    /// Display message, usually only set on failure.
    #[serde(default)]
    pub msg: Option<String>,
    /// Payload. `null` when absent.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// The code as text, if present.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        match self.code.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Whether the code reports success. A missing code is taken as success
    /// since the HTTP status already was.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code().is_none_or(|code| code == SUCCESS_CODE)
    }

    /// Decode `data` into `T`, or report a failure code as `ApiError::Status`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for a failure code and `ApiError::Decode`
    /// if `data` does not match `T`.
    pub fn into_data<T: DeserializeOwned>(self, status: StatusCode) -> Result<T> {
        if !self.is_success() {
            let code = self.code().unwrap_or_default();
            return Err(ApiError::Status {
                status,
                message: self
                    .msg
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("request failed with code {code}")),
            });
        }
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Extract a non-empty `msg` from an error body, if it is an envelope.
pub(crate) fn message_of(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct MessageOnly {
        #[serde(default)]
        msg: Option<String>,
    }

    serde_json::from_slice::<MessageOnly>(body)
        .ok()?
        .msg
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Envelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_with_data() {
        let value: String = parse(r#"{"code":"200","msg":null,"data":"ok"}"#)
            .into_data(StatusCode::OK)
            .unwrap();
        assert_eq!(value, "ok");
    }

    #[test]
    fn test_null_data_accepted_for_optional_targets() {
        let value: Option<String> = parse(r#"{"code":"200","msg":null,"data":null}"#)
            .into_data(StatusCode::OK)
            .unwrap();
        assert_eq!(value, None);

        let (): () = parse(r#"{"code":"200"}"#).into_data(StatusCode::OK).unwrap();
    }

    #[test]
    fn test_null_data_rejected_for_required_targets() {
        let err = parse(r#"{"code":"200","msg":null,"data":null}"#)
            .into_data::<String>(StatusCode::OK)
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_failure_code_becomes_status_error() {
        let err = parse(r#"{"code":"400","msg":"商品不存在","data":null}"#)
            .into_data::<serde_json::Value>(StatusCode::OK)
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, StatusCode::OK);
                assert_eq!(message, "商品不存在");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_failure_code_without_message() {
        let err = parse(r#"{"code":500}"#)
            .into_data::<serde_json::Value>(StatusCode::OK)
            .unwrap_err();
        assert_eq!(
            err.display_message().as_deref(),
            Some("request failed with code 500")
        );
    }

    #[test]
    fn test_message_of() {
        assert_eq!(
            message_of(br#"{"code":"400","msg":"bad"}"#).as_deref(),
            Some("bad")
        );
        assert_eq!(message_of(br#"{"msg":"  "}"#), None);
        assert_eq!(message_of(b"<html>"), None);
    }
}
