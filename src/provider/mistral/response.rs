use crate::error::GatewayError;
use crate::types::{
    AssistantMessage, Choice, Completion, FinishReason, ProviderMetadata, Role, TokenUsage,
};

use super::types::{MistralChatResponse, MistralUsage};

pub(crate) fn map_response(
    resp: MistralChatResponse,
    provider: &'static str,
    endpoint: String,
) -> Result<Completion, GatewayError> {
    let mut choices = Vec::new();
    for choice in &resp.choices {
        let Some(message) = &choice.message else {
            continue;
        };
        choices.push(Choice {
            index: choice.index,
            message: AssistantMessage {
                role: message
                    .role
                    .clone()
                    .map(Role)
                    .unwrap_or_else(Role::assistant),
                content: message.content.clone().unwrap_or_default(),
            },
            finish_reason: choice.finish_reason.as_deref().map(convert_finish_reason),
        });
    }

    Ok(Completion {
        choices,
        model: Some(resp.model.clone()),
        usage: resp.usage.clone().map(convert_usage),
        provider: ProviderMetadata {
            provider: provider.to_string(),
            endpoint: Some(endpoint),
        },
    })
}

pub(crate) fn convert_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "model_length" => FinishReason::ModelLength,
        "tool_calls" => FinishReason::ToolCalls,
        "error" => FinishReason::Error,
        other => FinishReason::Other(other.to_string()),
    }
}

pub(crate) fn convert_usage(usage: MistralUsage) -> TokenUsage {
    TokenUsage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
    }
}
