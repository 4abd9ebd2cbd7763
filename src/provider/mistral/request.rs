use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::types::ChatMessage;

pub(crate) fn build_chat_body(
    model: &str,
    messages: &[ChatMessage],
) -> Result<Value, GatewayError> {
    let messages = serde_json::to_value(messages).map_err(|err| GatewayError::Validation {
        message: format!("failed to serialize messages: {err}"),
    })?;

    let mut body = Map::new();
    body.insert("model".to_string(), Value::String(model.to_string()));
    body.insert("messages".to_string(), messages);
    Ok(Value::Object(body))
}
