use serde::Deserialize;
use serde_json::Value;

use crate::error::{GatewayError, extract_model_identifier};

/// Classifies a non-2xx Mistral response into the gateway error taxonomy.
///
/// Error bodies arrive either flat (`{"object": "error", "message": ...}`) or
/// nested under an `error` key on OpenAI-compatible deployments; both shapes
/// are handled, with the raw body kept as a fallback.
pub(crate) fn parse_mistral_error(status: u16, body: &str) -> GatewayError {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        error: Option<InnerError>,
        #[serde(default)]
        message: Option<Value>,
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default)]
        code: Option<Value>,
    }
    #[derive(Deserialize)]
    struct InnerError {
        #[serde(default)]
        message: Option<Value>,
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default)]
        code: Option<Value>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let (message, kind, code) = match parsed.error {
            Some(inner) => (inner.message, inner.kind, inner.code),
            None => (parsed.message, parsed.kind, parsed.code),
        };

        if message.is_some() || kind.is_some() {
            let mut message = message
                .map(value_to_text)
                .unwrap_or_else(|| "unknown error".to_string());
            if let Some(code) = code {
                message = format!("{message} ({code})");
            }

            let invalid_model = kind.as_deref() == Some("invalid_model");
            return match status {
                401 | 403 => GatewayError::Auth { message },
                429 => GatewayError::RateLimit {
                    message,
                    retry_after: None,
                },
                404 => GatewayError::ModelNotFound {
                    model: extract_model_identifier(&message),
                    message,
                },
                _ if invalid_model => GatewayError::ModelNotFound {
                    model: extract_model_identifier(&message),
                    message,
                },
                _ => GatewayError::provider("mistral", message),
            };
        }
    }

    GatewayError::provider("mistral", format!("status {status}: {body}"))
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
