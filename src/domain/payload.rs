//! The `data` form field and the response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::AppError;

/// Survey payload carried in the `data` field.
///
/// Both lists default to empty when absent; their item shapes are checked by
/// the normalizers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportPayload {
    #[serde(default)]
    pub project_info_payload: Vec<Value>,
    #[serde(default)]
    pub cost_info_payload: Vec<Value>,
}

impl ReportPayload {
    /// Parse the raw `data` field.
    ///
    /// Absent or blank text is [`AppError::MissingPayload`]; text that is not
    /// JSON is [`AppError::InvalidPayload`]. JSON of the wrong shape is a
    /// malformed payload.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(AppError::MissingPayload)?;

        let value: Value =
            serde_json::from_str(raw).map_err(|e| AppError::InvalidPayload(e.to_string()))?;

        ReportPayload::deserialize(&value).map_err(|e| AppError::malformed("data", e))
    }
}

/// JSON body for every response across the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportEnvelope {
    Result(String),
    Error(String),
}

impl ReportEnvelope {
    pub fn from_outcome(outcome: &Result<String, AppError>) -> Self {
        match outcome {
            Ok(text) => ReportEnvelope::Result(text.clone()),
            Err(err) => ReportEnvelope::Error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_lists_default_to_empty() {
        let payload = ReportPayload::parse(Some("{}")).unwrap();
        assert!(payload.project_info_payload.is_empty());
        assert!(payload.cost_info_payload.is_empty());
    }

    #[test]
    fn missing_and_blank_data_are_missing_payload() {
        assert!(matches!(ReportPayload::parse(None), Err(AppError::MissingPayload)));
        assert!(matches!(ReportPayload::parse(Some("  ")), Err(AppError::MissingPayload)));
    }

    #[test]
    fn non_json_is_invalid_payload() {
        assert!(matches!(ReportPayload::parse(Some("{oops")), Err(AppError::InvalidPayload(_))));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let err = ReportPayload::parse(Some(r#"{"project_info_payload": 3}"#)).unwrap_err();
        assert!(matches!(err, AppError::MalformedPayload { .. }));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn envelopes_use_result_and_error_keys() {
        let ok = ReportEnvelope::from_outcome(&Ok("report".into()));
        let err = ReportEnvelope::from_outcome(&Err(AppError::NoValidDocuments));

        assert_eq!(serde_json::to_value(ok).unwrap(), json!({"result": "report"}));
        assert_eq!(
            serde_json::to_value(err).unwrap(),
            json!({"error": "No valid PDF files uploaded"})
        );
    }
}
