// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::lookup::NetworkIdentity;
use crate::engines::traits::EngineError;
use async_trait::async_trait;
use thiserror::Error;

/// 单个查询步骤的错误
///
/// 聚合器在步骤边界吸收这些错误并替换为默认值，从不向调用方传播。
/// 启动时构建上游客户端失败也以此类型报告。
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Upstream returned status {0}")]
    Status(u16),
    #[error("Malformed upstream payload: {0}")]
    Decode(String),
    #[error("WhoisXML API key is not configured")]
    MissingApiKey,
    #[error("Page fetch failed: {0}")]
    Engine(#[from] EngineError),
}

/// 域名到 IP/ISP/ASN/国家的查询
#[async_trait]
pub trait NetworkIdentitySource: Send + Sync {
    async fn network_identity(&self, host: &str) -> Result<NetworkIdentity, LookupError>;
}

/// 子域名枚举
#[async_trait]
pub trait SubdomainSource: Send + Sync {
    /// 返回上游记录顺序的子域名列表
    async fn subdomains(&self, host: &str) -> Result<Vec<String>, LookupError>;
}

/// WHOIS 注册组织查询
#[async_trait]
pub trait RegistrantSource: Send + Sync {
    async fn organisation(&self, host: &str) -> Result<Option<String>, LookupError>;
}
