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

use crate::config::settings::Settings;
use crate::domain::models::lookup::{AssetDomains, LookupResult, NetworkInfo};
use crate::domain::services::asset_extractor::extract_external_assets;
use crate::domain::sources::lookup_source::{
    LookupError, NetworkIdentitySource, RegistrantSource, SubdomainSource,
};
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{PageEngine, PageRequest};
use crate::infrastructure::metrics;
use crate::infrastructure::whoisxml::WhoisXmlClient;
use crate::utils::url_utils::{bare_host, ensure_http_scheme};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 查询步骤，用于日志与指标标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStep {
    NetworkIdentity,
    Subdomains,
    Organisation,
    Assets,
}

impl LookupStep {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupStep::NetworkIdentity => "network_identity",
            LookupStep::Subdomains => "subdomains",
            LookupStep::Organisation => "organisation",
            LookupStep::Assets => "assets",
        }
    }
}

/// 网站信息聚合器
///
/// 依次查询网络身份、子域名、注册组织并抓取页面。每一步都是独立的故障边界：
/// 失败只记录日志并回退为该步骤的默认值，不会影响其他步骤。
pub struct WebsiteInfoAggregator {
    network: Arc<dyn NetworkIdentitySource>,
    subdomains: Arc<dyn SubdomainSource>,
    registrant: Arc<dyn RegistrantSource>,
    engine: Arc<dyn PageEngine>,
}

impl WebsiteInfoAggregator {
    /// 使用给定的数据源和抓取引擎创建聚合器
    pub fn new(
        network: Arc<dyn NetworkIdentitySource>,
        subdomains: Arc<dyn SubdomainSource>,
        registrant: Arc<dyn RegistrantSource>,
        engine: Arc<dyn PageEngine>,
    ) -> Self {
        Self {
            network,
            subdomains,
            registrant,
            engine,
        }
    }

    /// 按配置创建以 WhoisXML API 和 reqwest 为后端的聚合器
    ///
    /// # 返回值
    ///
    /// * `Ok(WebsiteInfoAggregator)` - 聚合器实例
    /// * `Err(LookupError)` - API 客户端或抓取引擎构建失败
    pub fn from_settings(settings: &Settings) -> Result<Self, LookupError> {
        let whoisxml = Arc::new(WhoisXmlClient::new(&settings.whoisxml, &settings.fetch)?);
        let engine = Arc::new(ReqwestEngine::new(&settings.fetch)?);
        Ok(Self::new(whoisxml.clone(), whoisxml.clone(), whoisxml, engine))
    }

    /// 查询目标网站的完整信息
    ///
    /// # 参数
    ///
    /// * `target` - 主机名或URL，可带或不带协议
    ///
    /// # 返回值
    ///
    /// 总是返回完整的 `LookupResult`，失败的部分为 `"N/A"` 或空集合
    pub async fn fetch(&self, target: &str) -> LookupResult {
        let started = Instant::now();
        let host = bare_host(target);
        info!("Looking up {} (host: {})", target, host);

        let identity = absorb(
            LookupStep::NetworkIdentity,
            target,
            self.network.network_identity(&host).await,
        )
        .unwrap_or_default();

        let subdomains = absorb(
            LookupStep::Subdomains,
            target,
            self.subdomains.subdomains(&host).await,
        )
        .unwrap_or_default();

        let organisation = absorb(
            LookupStep::Organisation,
            target,
            self.registrant.organisation(&host).await,
        )
        .flatten();

        let asset_domains = absorb(LookupStep::Assets, target, self.scrape_assets(target).await)
            .unwrap_or_default();

        let result = LookupResult {
            info: NetworkInfo::from_parts(identity, organisation),
            subdomains,
            asset_domains,
        };

        metrics::record_lookup(started.elapsed());
        debug!(
            "Lookup of {} finished in {:?}: {} subdomains, {} external assets",
            target,
            started.elapsed(),
            result.subdomains.len(),
            result.asset_domains.len()
        );
        result
    }

    /// 抓取页面并提取外部资源
    ///
    /// 传输错误或非 2xx 状态都视为整个步骤失败
    async fn scrape_assets(&self, target: &str) -> Result<AssetDomains, LookupError> {
        let page_url = ensure_http_scheme(target);
        let response = self.engine.fetch(&PageRequest::new(page_url.as_str())).await?;

        if !response.is_success() {
            return Err(LookupError::Status(response.status_code));
        }

        extract_external_assets(&response.content, &page_url)
    }
}

/// 吸收单个步骤的错误：记录日志和指标后返回 `None`
fn absorb<T>(step: LookupStep, target: &str, result: Result<T, LookupError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} lookup failed for {}: {}", step.as_str(), target, e);
            metrics::record_step_failure(step.as_str());
            None
        }
    }
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
