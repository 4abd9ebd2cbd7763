//! The request gateway core: validate, default, reshape, forward once.
//!
//! Each operation is a single-shot sequence with no intermediate state.
//! Validation is decided locally and terminates the request before any remote
//! call; provider failures are caught at exactly one boundary (the `complete`
//! call) and never retried.

use crate::error::GatewayError;
use crate::provider::DynProvider;
use crate::types::{
    ChatMessage, CompletionReply, CompletionRequest, ContentPart, ImageCompletionRequest, Role,
};

/// Forwarding core shared by every request handler.
///
/// Holds the long-lived provider handle (absent when no credential was
/// configured) and the default model tiers. Stateless between operations, so
/// a single instance serves all in-flight requests.
pub struct Gateway {
    provider: Option<DynProvider>,
    text_model: String,
    vision_model: String,
}

impl Gateway {
    /// Creates a gateway over an optional provider handle.
    pub fn new(
        provider: Option<DynProvider>,
        text_model: impl Into<String>,
        vision_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            text_model: text_model.into(),
            vision_model: vision_model.into(),
        }
    }

    /// Whether a provider credential was configured.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> Result<&DynProvider, GatewayError> {
        self.provider.as_ref().ok_or(GatewayError::Unconfigured)
    }

    /// Forwards a text conversation and returns the first choice's content.
    ///
    /// Messages are reshaped into flat `{role, content}` pairs, preserving
    /// order; the configured text tier fills in for an absent `model`.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Validation`] for an empty conversation or a message
    /// missing its role or content, [`GatewayError::Unconfigured`] without a
    /// credential, otherwise whatever the provider call produced.
    pub async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionReply, GatewayError> {
        validate_completion(&request)?;
        let provider = self.provider()?;

        let model = request.model.as_deref().unwrap_or(&self.text_model);
        let messages: Vec<ChatMessage> = request
            .content
            .iter()
            .map(|message| ChatMessage::text(Role(message.role.clone()), message.content.clone()))
            .collect();

        let completion = provider.complete(model, &messages).await?;
        let response = completion.first_text().ok_or_else(|| {
            GatewayError::provider(provider.name(), "completion contained no choices")
        })?;
        Ok(CompletionReply {
            response: response.to_string(),
        })
    }

    /// Forwards an image-recognition prompt and returns the first choice's
    /// content.
    ///
    /// Entry 0 supplies the text prompt and entry 1 the image reference; both
    /// travel verbatim as the two parts of a single user-role message. The
    /// image reference is passed through unmodified, whether URL or base64
    /// data URI.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Validation`] with fewer than two messages or an empty
    /// image reference, [`GatewayError::Unconfigured`] without a credential,
    /// otherwise whatever the provider call produced.
    pub async fn image_recognition(
        &self,
        request: ImageCompletionRequest,
    ) -> Result<CompletionReply, GatewayError> {
        validate_image_recognition(&request)?;
        let provider = self.provider()?;

        let model = request.model.as_deref().unwrap_or(&self.vision_model);
        let message = ChatMessage::parts(
            Role::user(),
            vec![
                ContentPart::Text {
                    text: request.messages[0].content.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: request.messages[1].content.clone(),
                },
            ],
        );

        let completion = provider.complete(model, &[message]).await?;
        let response = completion.first_text().ok_or_else(|| {
            GatewayError::provider(provider.name(), "completion contained no choices")
        })?;
        Ok(CompletionReply {
            response: response.to_string(),
        })
    }
}

fn validate_completion(request: &CompletionRequest) -> Result<(), GatewayError> {
    if request.content.is_empty() {
        return Err(GatewayError::validation("content cannot be empty"));
    }
    for (index, message) in request.content.iter().enumerate() {
        if message.role.is_empty() {
            return Err(GatewayError::validation(format!(
                "message {index} is missing a role"
            )));
        }
        if message.content.is_empty() {
            return Err(GatewayError::validation(format!(
                "message {index} is missing content"
            )));
        }
    }
    Ok(())
}

fn validate_image_recognition(request: &ImageCompletionRequest) -> Result<(), GatewayError> {
    if request.messages.len() < 2 {
        return Err(GatewayError::validation(
            "image recognition expects a text prompt and an image reference",
        ));
    }
    if request.messages[1].content.is_empty() {
        return Err(GatewayError::validation("image content cannot be empty"));
    }
    Ok(())
}
