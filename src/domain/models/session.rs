// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::lookup::LookupResult;
use serde_json::Value;

/// 会话消息
///
/// 由客户端发送的 JSON 文本解析而来
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    /// 设置当前 URL（`{"url": ...}`），优先于 `operation`
    SetUrl(String),
    /// 请求一个操作（`{"operation": ...}`），非字符串的操作值记为 `None`
    Operation(Option<String>),
    /// 无法识别的消息
    Invalid,
}

impl SessionRequest {
    pub fn parse(text: &str) -> Self {
        let Ok(Value::Object(message)) = serde_json::from_str::<Value>(text) else {
            return SessionRequest::Invalid;
        };

        if let Some(url) = message.get("url") {
            return match url {
                Value::String(url) => SessionRequest::SetUrl(url.clone()),
                _ => SessionRequest::Invalid,
            };
        }

        match message.get("operation") {
            Some(operation) => SessionRequest::Operation(operation.as_str().map(str::to_owned)),
            None => SessionRequest::Invalid,
        }
    }
}

/// 会话支持的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOperation {
    GetInfo,
    GetSubdomains,
    GetAssetDomains,
}

impl SessionOperation {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "get_info" => Some(SessionOperation::GetInfo),
            "get_subdomains" => Some(SessionOperation::GetSubdomains),
            "get_asset_domains" => Some(SessionOperation::GetAssetDomains),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionOperation::GetInfo => "get_info",
            SessionOperation::GetSubdomains => "get_subdomains",
            SessionOperation::GetAssetDomains => "get_asset_domains",
        }
    }
}

/// 单个连接的会话状态
///
/// 只属于处理该连接的任务，连接关闭时随之销毁
#[derive(Debug, Default)]
pub struct SessionState {
    current_url: Option<String>,
    reuse_lookup: bool,
    last_lookup: Option<LookupResult>,
}

impl SessionState {
    pub fn new(reuse_lookup: bool) -> Self {
        Self {
            current_url: None,
            reuse_lookup,
            last_lookup: None,
        }
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// 切换当前 URL，同时丢弃旧 URL 的查询结果
    pub fn set_url(&mut self, url: String) {
        self.current_url = Some(url);
        self.last_lookup = None;
    }

    /// 当前 URL 的上一次查询结果，仅在启用复用时存在
    pub fn cached_lookup(&self) -> Option<&LookupResult> {
        self.last_lookup.as_ref()
    }

    pub fn remember(&mut self, result: &LookupResult) {
        if self.reuse_lookup {
            self.last_lookup = Some(result.clone());
        }
    }
}
