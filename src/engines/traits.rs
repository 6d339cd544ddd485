// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 目标URL无法解析
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// 页面抓取请求
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// 带协议的目标URL
    pub url: String,
}

impl PageRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// 页面抓取响应
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// 页面抓取引擎特质
///
/// 引擎只负责传输，非 2xx 状态照常返回，由调用方判断
#[async_trait]
pub trait PageEngine: Send + Sync {
    /// 执行抓取
    async fn fetch(&self, request: &PageRequest) -> Result<PageResponse, EngineError>;
}
