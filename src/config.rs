use std::net::SocketAddr;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::http::DynHttpTransport;
use crate::provider::DynProvider;
use crate::provider::mistral::{DEFAULT_TEXT_MODEL, DEFAULT_VISION_MODEL, MistralProvider};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// 网关运行时配置 从环境变量读取
///
/// 缺少凭证不视为错误 网关以未配置状态启动 转发路由一律返回 503
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Mistral API key 为空表示未配置
    pub api_key: Option<String>,
    /// 可选的 endpoint 覆盖 用于代理或 mock 服务器
    pub base_url: Option<String>,
    /// HTTP 服务监听地址
    pub bind_addr: SocketAddr,
    /// CORS 来源策略
    pub allowed_origins: AllowedOrigins,
    /// completion 请求缺省使用的模型
    pub text_model: String,
    /// image-recognition 请求缺省使用的模型
    pub vision_model: String,
}

/// CORS 来源策略 由 `GATEWAY_ALLOWED_ORIGINS` 解析
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// 允许任意来源 默认姿态
    Any,
    /// 仅允许列表中的来源
    List(Vec<String>),
}

impl GatewayConfig {
    /// 从环境变量加载配置 存在 .env 文件时先行读取
    ///
    /// 识别的键 `MISTRAL_API_KEY` `MISTRAL_BASE_URL` `GATEWAY_ADDR`
    /// `GATEWAY_ALLOWED_ORIGINS` `GATEWAY_TEXT_MODEL` `GATEWAY_VISION_MODEL`
    /// 值解析失败返回 [`GatewayError::InvalidConfig`]
    pub fn from_env() -> Result<Self, GatewayError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GatewayError> {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = optional("GATEWAY_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|err| GatewayError::InvalidConfig {
                field: "GATEWAY_ADDR".to_string(),
                reason: format!("{err}"),
            })?;

        Ok(Self {
            api_key: optional("MISTRAL_API_KEY"),
            base_url: optional("MISTRAL_BASE_URL"),
            bind_addr,
            allowed_origins: parse_origins(optional("GATEWAY_ALLOWED_ORIGINS")),
            text_model: optional("GATEWAY_TEXT_MODEL")
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            vision_model: optional("GATEWAY_VISION_MODEL")
                .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
        })
    }
}

fn parse_origins(raw: Option<String>) -> AllowedOrigins {
    let Some(raw) = raw else {
        return AllowedOrigins::Any;
    };
    if raw.trim() == "*" {
        return AllowedOrigins::Any;
    }
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(origins)
    }
}

/// 根据配置构建 Provider 缺少凭证时返回 None
pub fn build_provider(config: &GatewayConfig, transport: DynHttpTransport) -> Option<DynProvider> {
    let api_key = config.api_key.as_ref()?;
    let mut provider = MistralProvider::new(transport, api_key.clone());
    if let Some(base_url) = &config.base_url {
        provider = provider.with_base_url(base_url.clone());
    }
    Some(Arc::new(provider))
}
