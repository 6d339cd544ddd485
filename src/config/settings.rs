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

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// 约定俗成的 WhoisXML API 密钥环境变量
pub const WHOISXML_API_KEY_ENV: &str = "WHOISXML_API_KEY";

/// 工作目录下可选的 `KEY=value` 文件，只从中读取 API 密钥
pub const DOTENV_FILE: &str = ".env";

/// 应用程序配置设置
///
/// 包含服务器、上游 API、页面抓取、会话和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// WhoisXML API 配置
    pub whoisxml: WhoisXmlSettings,
    /// 页面抓取配置
    pub fetch: FetchSettings,
    /// WebSocket 会话配置
    pub session: SessionSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// WhoisXML API 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct WhoisXmlSettings {
    /// API 密钥，缺失时三个 API 查询均返回默认值
    pub api_key: Option<String>,
    /// 域名地理位置 API
    pub geolocation_endpoint: String,
    /// 子域名 API
    pub subdomains_endpoint: String,
    /// WHOIS API
    pub whois_endpoint: String,
}

/// 页面抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 单个上游请求的超时时间（秒）
    pub timeout_secs: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// WebSocket 会话配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 是否在同一会话内复用当前 URL 的上一次查询结果
    pub reuse_lookup: bool,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启动 Prometheus 导出器
    pub enabled: bool,
    /// 导出器监听主机地址
    pub host: String,
    /// 导出器监听端口
    pub port: u16,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载代码默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `WEBSCOPE__` 前缀的环境变量。API 密钥未配置时依次回退到
    /// `WHOISXML_API_KEY` 环境变量和 `.env` 文件
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Default upstream endpoints
            .set_default(
                "whoisxml.geolocation_endpoint",
                "https://ip-geolocation.whoisxmlapi.com/api/v1",
            )?
            .set_default(
                "whoisxml.subdomains_endpoint",
                "https://subdomains.whoisxmlapi.com/api/v1",
            )?
            .set_default(
                "whoisxml.whois_endpoint",
                "https://www.whoisxmlapi.com/whoisserver/WhoisService",
            )?
            // Default fetch settings
            .set_default("fetch.timeout_secs", 30)?
            .set_default(
                "fetch.user_agent",
                concat!("webscope/", env!("CARGO_PKG_VERSION")),
            )?
            // Default session settings
            .set_default("session.reuse_lookup", false)?
            // Default metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.host", "0.0.0.0")?
            .set_default("metrics.port", 9000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("WEBSCOPE").separator("__"));

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.whoisxml.api_key = resolve_api_key(
            settings.whoisxml.api_key.take(),
            resolve_api_key(std::env::var(WHOISXML_API_KEY_ENV).ok(), dotenv_api_key()),
        );
        Ok(settings)
    }
}

/// 读取 `.env` 中的 API 密钥，文件缺失或无法解析时返回 `None`
fn dotenv_api_key() -> Option<String> {
    let dotenv = Config::builder()
        .add_source(File::new(DOTENV_FILE, FileFormat::Ini).required(false))
        .build();

    match dotenv {
        Ok(dotenv) => api_key_from(&dotenv),
        Err(e) => {
            warn!("Ignoring unreadable {}: {}", DOTENV_FILE, e);
            None
        }
    }
}

fn api_key_from(source: &Config) -> Option<String> {
    source
        .get_string(WHOISXML_API_KEY_ENV)
        .or_else(|_| source.get_string(&WHOISXML_API_KEY_ENV.to_ascii_lowercase()))
        .ok()
}

/// 选择 API 密钥：显式配置优先，其次是约定的环境变量，空字符串视为未配置
fn resolve_api_key(configured: Option<String>, fallback: Option<String>) -> Option<String> {
    configured
        .filter(|key| !key.trim().is_empty())
        .or_else(|| fallback.filter(|key| !key.trim().is_empty()))
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
