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

use crate::config::settings::FetchSettings;
use crate::engines::traits::{EngineError, PageEngine, PageRequest, PageResponse};
use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，客户端在所有请求间共享连接池
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 根据抓取配置创建引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 抓取配置（超时、User-Agent）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 引擎实例
    /// * `Err(EngineError)` - HTTP客户端构建失败
    pub fn new(settings: &FetchSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(PageResponse)` - 抓取响应（包括非2xx状态）
    /// * `Err(EngineError)` - URL无法解析，或传输、解码过程中出现的错误
    async fn fetch(&self, request: &PageRequest) -> Result<PageResponse, EngineError> {
        let url = Url::parse(&request.url)?;
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status_code = response.status().as_u16();
        let content = response.text().await?;

        debug!(
            "Fetched {} -> {} ({} bytes, {} ms)",
            request.url,
            status_code,
            content.len(),
            start.elapsed().as_millis()
        );

        Ok(PageResponse {
            status_code,
            content,
        })
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
