// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{FetchSettings, WhoisXmlSettings};
use crate::domain::models::lookup::NetworkIdentity;
use crate::domain::sources::lookup_source::{
    LookupError, NetworkIdentitySource, RegistrantSource, SubdomainSource,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// WhoisXML API 客户端
///
/// 同时提供域名地理位置、子域名和 WHOIS 注册信息三类查询
pub struct WhoisXmlClient {
    /// API密钥
    api_key: Option<String>,
    /// 地理位置API端点
    geolocation_endpoint: String,
    /// 子域名API端点
    subdomains_endpoint: String,
    /// WHOIS API端点
    whois_endpoint: String,
    /// HTTP客户端
    client: reqwest::Client,
}

impl WhoisXmlClient {
    /// 创建新的 WhoisXML 客户端
    ///
    /// # 返回值
    ///
    /// * `Ok(WhoisXmlClient)` - 客户端实例
    /// * `Err(LookupError)` - HTTP客户端构建失败（例如 User-Agent 非法）
    pub fn new(settings: &WhoisXmlSettings, fetch: &FetchSettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(fetch.user_agent.as_str())
            .timeout(fetch.timeout())
            .build()?;

        Ok(Self {
            api_key: settings.api_key.clone(),
            geolocation_endpoint: settings.geolocation_endpoint.clone(),
            subdomains_endpoint: settings.subdomains_endpoint.clone(),
            whois_endpoint: settings.whois_endpoint.clone(),
            client,
        })
    }

    fn api_key(&self) -> Result<&str, LookupError> {
        self.api_key.as_deref().ok_or(LookupError::MissingApiKey)
    }

    /// 调用一个 API 端点并解析 JSON 响应
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let response = self
            .client
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                debug!("Failed to call {}: {}", endpoint, e);
                LookupError::from(e)
            })?;

        if !response.status().is_success() {
            debug!("{} returned error status: {}", endpoint, response.status());
            return Err(LookupError::Status(response.status().as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            debug!("Failed to parse response from {}: {}", endpoint, e);
            LookupError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl NetworkIdentitySource for WhoisXmlClient {
    async fn network_identity(&self, host: &str) -> Result<NetworkIdentity, LookupError> {
        let api_key = self.api_key()?;
        debug!("Getting geolocation for domain: {}", host);

        let response: GeolocationResponse = self
            .get_json(
                &self.geolocation_endpoint,
                &[("apiKey", api_key), ("domain", host)],
            )
            .await?;

        Ok(response.into_identity())
    }
}

#[async_trait]
impl SubdomainSource for WhoisXmlClient {
    async fn subdomains(&self, host: &str) -> Result<Vec<String>, LookupError> {
        let api_key = self.api_key()?;
        debug!("Getting subdomains for domain: {}", host);

        let response: SubdomainsResponse = self
            .get_json(
                &self.subdomains_endpoint,
                &[("apiKey", api_key), ("domainName", host)],
            )
            .await?;

        Ok(response.into_domains())
    }
}

#[async_trait]
impl RegistrantSource for WhoisXmlClient {
    async fn organisation(&self, host: &str) -> Result<Option<String>, LookupError> {
        let api_key = self.api_key()?;
        debug!("Getting WHOIS registrant for domain: {}", host);

        let response: WhoisResponse = self
            .get_json(
                &self.whois_endpoint,
                &[
                    ("apiKey", api_key),
                    ("domainName", host),
                    ("outputFormat", "JSON"),
                ],
            )
            .await?;

        Ok(response
            .whois_record
            .and_then(|record| record.registrant)
            .and_then(|registrant| registrant.organization))
    }
}

/// 地理位置 API 响应结构
#[derive(Debug, Default, Deserialize)]
struct GeolocationResponse {
    ip: Option<String>,
    isp: Option<String>,
    #[serde(rename = "as")]
    autonomous_system: Option<AutonomousSystem>,
    location: Option<Location>,
}

#[derive(Debug, Default, Deserialize)]
struct AutonomousSystem {
    /// 上游以数字返回，也兼容字符串
    asn: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    country: Option<String>,
}

impl GeolocationResponse {
    fn into_identity(self) -> NetworkIdentity {
        NetworkIdentity {
            ip: self.ip,
            isp: self.isp,
            asn: self
                .autonomous_system
                .and_then(|system| system.asn)
                .and_then(|asn| match asn {
                    Value::String(asn) => Some(asn),
                    Value::Number(asn) => Some(asn.to_string()),
                    _ => None,
                }),
            country: self.location.and_then(|location| location.country),
        }
    }
}

/// 子域名 API 响应结构
#[derive(Debug, Default, Deserialize)]
struct SubdomainsResponse {
    result: Option<SubdomainsResult>,
}

#[derive(Debug, Default, Deserialize)]
struct SubdomainsResult {
    #[serde(default)]
    records: Vec<SubdomainRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct SubdomainRecord {
    domain: Option<String>,
}

impl SubdomainsResponse {
    fn into_domains(self) -> Vec<String> {
        self.result
            .map(|result| {
                result
                    .records
                    .into_iter()
                    .filter_map(|record| record.domain)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// WHOIS API 响应结构
#[derive(Debug, Default, Deserialize)]
struct WhoisResponse {
    #[serde(rename = "WhoisRecord")]
    whois_record: Option<WhoisRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct WhoisRecord {
    registrant: Option<Registrant>,
}

#[derive(Debug, Default, Deserialize)]
struct Registrant {
    organization: Option<String>,
}
