use std::sync::Arc;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::types::{ChatMessage, Completion};

pub mod mistral;

/// 统一的补全 Provider Trait 网关只依赖该接口
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// 提交一次同步补全请求并等待完整响应
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, GatewayError>;

    /// 供应商名称
    fn name(&self) -> &'static str;
}

/// 线程安全 Provider
pub type DynProvider = Arc<dyn CompletionProvider>;
