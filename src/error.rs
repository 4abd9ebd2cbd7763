use std::time::Duration;

use thiserror::Error;

/// Aggregates every failure mode the gateway can produce.
///
/// Validation and configuration failures are decided locally, before any
/// remote call; the remaining variants classify errors raised by the remote
/// completion provider. The HTTP layer maps each variant to a response status
/// exactly once, so the core never deals in status codes.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Signals validation failures in the request payload.
    #[error("invalid request: {message}")]
    Validation { message: String },
    /// No provider credential was supplied; the gateway cannot forward anything.
    #[error("no provider credential configured")]
    Unconfigured,
    /// Reports invalid or rejected credentials.
    #[error("auth failure: {message}")]
    Auth { message: String },
    /// Indicates that the provider throttled the request.
    #[error("rate limited: {message}")]
    RateLimit {
        /// Raw message returned by the upstream provider.
        message: String,
        /// Optional wait duration suggested by the provider before retrying.
        retry_after: Option<Duration>,
    },
    /// Indicates that the requested model identifier could not be resolved.
    #[error("model not found: {message}")]
    ModelNotFound {
        /// Model identifier extracted from the error payload when available.
        model: Option<String>,
        /// Full error message returned by the provider for debugging.
        message: String,
    },
    /// Raised when reading or validating configuration fails.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// Name of the configuration field that failed validation.
        field: String,
        /// Additional context explaining why the field is invalid.
        reason: String,
    },
    /// Represents transport-layer or networking failures.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// Wraps provider-defined errors that cannot be normalized further.
    #[error("provider {provider} error: {message}")]
    Provider {
        /// Name of the provider, such as `mistral`.
        provider: &'static str,
        /// Human-readable error message returned by the provider.
        message: String,
    },
}

impl GatewayError {
    /// Creates a [`GatewayError::Validation`] from a textual description.
    ///
    /// # Examples
    ///
    /// ```
    /// use mistral_gateway::error::GatewayError;
    ///
    /// let err = GatewayError::validation("content cannot be empty");
    /// assert!(matches!(err, GatewayError::Validation { .. }));
    /// ```
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a [`GatewayError::Transport`] from a textual description.
    ///
    /// The helper keeps call sites concise and guarantees consistent formatting
    /// of transport failures across the crate.
    ///
    /// # Examples
    ///
    /// ```
    /// use mistral_gateway::error::GatewayError;
    ///
    /// let err = GatewayError::transport("dns lookup failed");
    /// assert!(matches!(err, GatewayError::Transport { .. }));
    /// ```
    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a [`GatewayError::Provider`] with the given provider name and message.
    ///
    /// # Examples
    ///
    /// ```
    /// use mistral_gateway::error::GatewayError;
    ///
    /// let err = GatewayError::provider("mistral", "bad JSON payload");
    /// assert!(matches!(err, GatewayError::Provider { provider: "mistral", .. }));
    /// ```
    pub fn provider<T: Into<String>>(provider: &'static str, message: T) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }
}

/// Attempts to extract a model identifier from an error payload.
pub(crate) fn extract_model_identifier(message: &str) -> Option<String> {
    for delimiter in ['`', '"', '\''] {
        if let Some(value) = between_delimiters(message, delimiter) {
            if !value.trim().is_empty() {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

fn between_delimiters(message: &str, delimiter: char) -> Option<String> {
    let mut chars = message.char_indices();
    while let Some((start, ch)) = chars.next() {
        if ch == delimiter {
            let start_idx = start + ch.len_utf8();
            if start_idx >= message.len() {
                return None;
            }
            if let Some(rel_end) = message[start_idx..].find(delimiter) {
                let end_idx = start_idx + rel_end;
                return Some(message[start_idx..end_idx].to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_model_identifier_handles_backticks_and_quotes() {
        assert_eq!(
            extract_model_identifier("Invalid model: `mistral-giant`"),
            Some("mistral-giant".to_string())
        );
        assert_eq!(
            extract_model_identifier(r#"model "pixtral-99b" does not exist"#),
            Some("pixtral-99b".to_string())
        );
        assert_eq!(extract_model_identifier("no identifier here"), None);
    }
}
