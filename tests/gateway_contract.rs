//! End-to-end contract tests over an in-memory transport.
//!
//! Drives the real provider wire code (body building, response parsing,
//! error classification) while recording every outgoing request, so the
//! forwarding contract is asserted without a network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use serde_json::{Value, json};

use mistral_gateway::error::GatewayError;
use mistral_gateway::gateway::Gateway;
use mistral_gateway::http::{HttpRequest, HttpResponse, HttpTransport};
use mistral_gateway::provider::mistral::MistralProvider;
use mistral_gateway::types::{
    CompletionRequest, ImageCompletionRequest, ImageMessage, Message,
};

/// Transport that records outgoing requests and replays a canned response.
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    status: u16,
    body: String,
}

impl RecordingTransport {
    fn replying(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            status,
            body: body.to_string(),
        })
    }

    fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn single_request_body(&self) -> Value {
        let requests = self.recorded();
        assert_eq!(requests.len(), 1, "expected exactly one remote call");
        let body = requests[0].body.clone().expect("request body");
        serde_json::from_slice(&body).expect("request body should be JSON")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request);
        Ok(HttpResponse {
            status: self.status,
            headers: Default::default(),
            body: self.body.clone().into_bytes(),
        })
    }
}

fn chat_completion_body(content: &str) -> Value {
    json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "created": 1,
        "model": "mistral-tiny",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 8, "completion_tokens": 3, "total_tokens": 11 }
    })
}

fn gateway_over(transport: Arc<RecordingTransport>) -> Gateway {
    let provider = MistralProvider::new(transport, "test-key");
    Gateway::new(Some(Arc::new(provider)), "mistral-tiny", "pixtral-12b-2409")
}

fn user_message(content: &str) -> Message {
    Message {
        role: "user".to_string(),
        content: content.to_string(),
        kind: "text".to_string(),
    }
}

#[tokio::test]
async fn completion_round_trip_forwards_once_and_extracts_first_choice() {
    let transport = RecordingTransport::replying(200, chat_completion_body("Hello!"));
    let gateway = gateway_over(transport.clone());

    let reply = gateway
        .completion(CompletionRequest {
            content: vec![user_message("Hi")],
            model: None,
        })
        .await
        .expect("completion should succeed");
    assert_eq!(reply.response, "Hello!");

    let requests = transport.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://api.mistral.ai/v1/chat/completions"
    );
    assert_eq!(
        requests[0].headers.get("Authorization"),
        Some(&"Bearer test-key".to_string())
    );

    let body = transport.single_request_body();
    assert_eq!(body["model"], "mistral-tiny");
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Hi");
}

#[tokio::test]
async fn completion_preserves_message_order_and_length() {
    let transport = RecordingTransport::replying(200, chat_completion_body("ok"));
    let gateway = gateway_over(transport.clone());

    let conversation = vec![
        Message {
            role: "system".to_string(),
            content: "You are terse.".to_string(),
            kind: "text".to_string(),
        },
        user_message("First question"),
        Message {
            role: "assistant".to_string(),
            content: "First answer".to_string(),
            kind: "text".to_string(),
        },
        user_message("Second question"),
    ];

    gateway
        .completion(CompletionRequest {
            content: conversation.clone(),
            model: None,
        })
        .await
        .expect("completion should succeed");

    let body = transport.single_request_body();
    let wire = body["messages"].as_array().expect("messages array");
    assert_eq!(wire.len(), conversation.len());
    for (sent, original) in wire.iter().zip(&conversation) {
        assert_eq!(sent["role"], original.role.as_str());
        assert_eq!(sent["content"], original.content.as_str());
    }
}

#[tokio::test]
async fn completion_model_override_reaches_the_wire() {
    let transport = RecordingTransport::replying(200, chat_completion_body("ok"));
    let gateway = gateway_over(transport.clone());

    gateway
        .completion(CompletionRequest {
            content: vec![user_message("Hi")],
            model: Some("mistral-large-latest".to_string()),
        })
        .await
        .expect("completion should succeed");

    assert_eq!(
        transport.single_request_body()["model"],
        "mistral-large-latest"
    );
}

#[tokio::test]
async fn image_recognition_sends_one_user_message_with_verbatim_parts() {
    let transport = RecordingTransport::replying(
        200,
        chat_completion_body("A boardwalk through a marsh."),
    );
    let gateway = gateway_over(transport.clone());

    let data_uri = format!(
        "data:image/jpeg;base64,{}",
        general_purpose::STANDARD.encode(b"fake image bytes")
    );
    let reply = gateway
        .image_recognition(ImageCompletionRequest {
            messages: vec![
                ImageMessage {
                    role: None,
                    content: "What's in this image?".to_string(),
                },
                ImageMessage {
                    role: None,
                    content: data_uri.clone(),
                },
            ],
            model: None,
        })
        .await
        .expect("image recognition should succeed");
    assert_eq!(reply.response, "A boardwalk through a marsh.");

    let body = transport.single_request_body();
    assert_eq!(body["model"], "pixtral-12b-2409");

    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");

    let parts = messages[0]["content"].as_array().expect("content parts");
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["type"], "text");
    assert_eq!(parts[0]["text"], "What's in this image?");
    assert_eq!(parts[1]["type"], "image_url");
    assert_eq!(parts[1]["image_url"], data_uri.as_str());
}

#[tokio::test]
async fn validation_failures_never_reach_the_transport() {
    let transport = RecordingTransport::replying(200, chat_completion_body("unused"));
    let gateway = gateway_over(transport.clone());

    gateway
        .completion(CompletionRequest {
            content: vec![],
            model: None,
        })
        .await
        .expect_err("empty content should fail");

    gateway
        .image_recognition(ImageCompletionRequest {
            messages: vec![ImageMessage {
                role: None,
                content: "only a prompt".to_string(),
            }],
            model: None,
        })
        .await
        .expect_err("short image request should fail");

    assert!(transport.recorded().is_empty());
}

#[tokio::test]
async fn unconfigured_gateway_makes_no_remote_calls() {
    let gateway = Gateway::new(None, "mistral-tiny", "pixtral-12b-2409");

    let err = gateway
        .completion(CompletionRequest {
            content: vec![user_message("Hi")],
            model: None,
        })
        .await
        .expect_err("unconfigured completion should fail");
    assert!(matches!(err, GatewayError::Unconfigured));
}

#[tokio::test]
async fn upstream_errors_surface_through_the_taxonomy() {
    let transport = RecordingTransport::replying(
        401,
        json!({ "message": "Unauthorized", "request_id": "req-1" }),
    );
    let gateway = gateway_over(transport);
    let err = gateway
        .completion(CompletionRequest {
            content: vec![user_message("Hi")],
            model: None,
        })
        .await
        .expect_err("401 should fail");
    assert!(matches!(err, GatewayError::Auth { .. }));

    let transport = RecordingTransport::replying(
        500,
        json!({ "object": "error", "message": "internal error", "type": "internal_server_error" }),
    );
    let gateway = gateway_over(transport);
    let err = gateway
        .completion(CompletionRequest {
            content: vec![user_message("Hi")],
            model: None,
        })
        .await
        .expect_err("500 should fail");
    assert!(matches!(err, GatewayError::Provider { .. }));
}

#[tokio::test]
async fn empty_choices_are_a_provider_error() {
    let transport = RecordingTransport::replying(
        200,
        json!({
            "id": "cmpl-2",
            "object": "chat.completion",
            "model": "mistral-tiny",
            "choices": []
        }),
    );
    let gateway = gateway_over(transport);

    let err = gateway
        .completion(CompletionRequest {
            content: vec![user_message("Hi")],
            model: None,
        })
        .await
        .expect_err("empty choices should fail");
    match err {
        GatewayError::Provider { message, .. } => assert!(message.contains("no choices")),
        other => panic!("unexpected error type: {other:?}"),
    }
}
