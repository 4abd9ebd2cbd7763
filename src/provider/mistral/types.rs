use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct MistralChatResponse {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) object: Option<String>,
    #[serde(default)]
    pub(crate) created: Option<u64>,
    pub(crate) model: String,
    pub(crate) choices: Vec<MistralResponseChoice>,
    #[serde(default)]
    pub(crate) usage: Option<MistralUsage>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct MistralResponseChoice {
    pub(crate) index: usize,
    pub(crate) message: Option<MistralResponseMessage>,
    #[serde(default)]
    pub(crate) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct MistralResponseMessage {
    #[serde(default)]
    pub(crate) role: Option<String>,
    #[serde(default)]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct MistralUsage {
    #[serde(default)]
    pub(crate) prompt_tokens: Option<u64>,
    #[serde(default)]
    pub(crate) completion_tokens: Option<u64>,
    #[serde(default)]
    pub(crate) total_tokens: Option<u64>,
}
