use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::http::{DynHttpTransport, HttpResponse, post_json_with_headers};
use crate::provider::CompletionProvider;
use crate::types::{ChatMessage, Completion};

use super::error::parse_mistral_error;
use super::request::build_chat_body;
use super::response::map_response;
use super::types::MistralChatResponse;

const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";

/// Default text-completion tier substituted when a request omits `model`.
pub const DEFAULT_TEXT_MODEL: &str = "mistral-tiny";

/// Default vision-capable tier for image-recognition requests.
pub const DEFAULT_VISION_MODEL: &str = "pixtral-12b-2409";

/// Mistral Chat Completions provider.
///
/// Stateless between calls; one instance is shared by every in-flight request.
pub struct MistralProvider {
    pub(crate) transport: DynHttpTransport,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl MistralProvider {
    /// 创建带默认 base_url 的 Provider
    pub fn new(transport: DynHttpTransport, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// 自定义 base_url 便于代理或 mock 服务器
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{base}/chat/completions")
        } else {
            format!("{base}/v1/chat/completions")
        }
    }

    fn build_headers(&self) -> HashMap<String, String> {
        HashMap::from([
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ])
    }

    fn ensure_success(&self, response: HttpResponse) -> Result<String, GatewayError> {
        let status = response.status;
        let text = response.into_string()?;
        if (200..300).contains(&status) {
            Ok(text)
        } else {
            Err(parse_mistral_error(status, &text))
        }
    }

    fn try_parse<T: DeserializeOwned>(&self, text: &str) -> Result<T, GatewayError> {
        serde_json::from_str(text).map_err(|err| GatewayError::Provider {
            provider: self.name(),
            message: format!("failed to parse Mistral response: {err}"),
        })
    }
}

#[async_trait]
impl CompletionProvider for MistralProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, GatewayError> {
        let body = build_chat_body(model, messages)?;
        let response = post_json_with_headers(
            self.transport.as_ref(),
            self.endpoint(),
            self.build_headers(),
            &body,
        )
        .await?;
        let text = self.ensure_success(response)?;
        let parsed: MistralChatResponse = self.try_parse(&text)?;
        map_response(parsed, self.name(), self.endpoint())
    }

    fn name(&self) -> &'static str {
        "mistral"
    }
}
