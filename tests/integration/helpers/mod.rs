// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use webscope::config::settings::{
    FetchSettings, MetricsSettings, ServerSettings, SessionSettings, Settings, WhoisXmlSettings,
};
use webscope::domain::services::aggregator::WebsiteInfoAggregator;
use webscope::presentation::routes;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const GEOLOCATION_PATH: &str = "/geo/api/v1";
pub const SUBDOMAINS_PATH: &str = "/subdomains/api/v1";
pub const WHOIS_PATH: &str = "/whoisserver/WhoisService";

/// 指向模拟服务器的配置
pub fn test_settings(upstream: &MockServer, api_key: Option<&str>, reuse_lookup: bool) -> Settings {
    let uri = upstream.uri();
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        whoisxml: WhoisXmlSettings {
            api_key: api_key.map(str::to_string),
            geolocation_endpoint: format!("{}{}", uri, GEOLOCATION_PATH),
            subdomains_endpoint: format!("{}{}", uri, SUBDOMAINS_PATH),
            whois_endpoint: format!("{}{}", uri, WHOIS_PATH),
        },
        fetch: FetchSettings {
            timeout_secs: 5,
            user_agent: "webscope-test".to_string(),
        },
        session: SessionSettings { reuse_lookup },
        metrics: MetricsSettings {
            enabled: false,
            host: "127.0.0.1".to_string(),
            port: 0,
        },
    }
}

/// 模拟服务器的 `host:port`，同时作为查询目标和 API 的 domain 参数
pub fn target_of(upstream: &MockServer) -> String {
    upstream.address().to_string()
}

pub fn aggregator(settings: &Settings) -> Arc<WebsiteInfoAggregator> {
    Arc::new(WebsiteInfoAggregator::from_settings(settings).unwrap())
}

pub fn test_server(settings: Settings) -> TestServer {
    let settings = Arc::new(settings);
    TestServer::new(routes::app(aggregator(&settings), settings)).unwrap()
}

pub fn websocket_server(settings: Settings) -> TestServer {
    let settings = Arc::new(settings);
    TestServer::builder()
        .http_transport()
        .build(routes::app(aggregator(&settings), settings))
        .unwrap()
}

pub fn landing_page(upstream: &MockServer) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <link rel="stylesheet" href="https://fonts.example.net/css">
    <link rel="stylesheet" href="/static/site.css">
    <script src="https://cdn.example.net/lib.js"></script>
    <script src="http://{authority}/static/app.js"></script>
  </head>
  <body>
    <img src="//images.example.net/logo.png">
    <img src="img/local.png">
    <iframe src="https://player.example.net/embed/1"></iframe>
    <a href="https://github.com/example">GitHub</a>
    <a href="https://github.com/example">GitHub again</a>
    <a href="/about">About</a>
  </body>
</html>"#,
        authority = target_of(upstream)
    )
}

pub async fn mount_geolocation(upstream: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(GEOLOCATION_PATH))
        .and(query_param("apiKey", API_KEY))
        .and(query_param("domain", target_of(upstream).as_str()))
        .respond_with(template)
        .mount(upstream)
        .await;
}

pub async fn mount_subdomains(upstream: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(SUBDOMAINS_PATH))
        .and(query_param("apiKey", API_KEY))
        .and(query_param("domainName", target_of(upstream).as_str()))
        .respond_with(template)
        .mount(upstream)
        .await;
}

pub async fn mount_whois(upstream: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(WHOIS_PATH))
        .and(query_param("apiKey", API_KEY))
        .and(query_param("domainName", target_of(upstream).as_str()))
        .and(query_param("outputFormat", "JSON"))
        .respond_with(template)
        .mount(upstream)
        .await;
}

pub async fn mount_page(upstream: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(template)
        .mount(upstream)
        .await;
}

pub fn geolocation_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ip": "93.184.216.34",
        "isp": "Edgecast Inc.",
        "as": { "asn": 15133, "name": "EDGECAST", "route": "93.184.216.0/24" },
        "location": { "country": "US", "region": "California", "city": "Los Angeles" }
    }))
}

pub fn subdomains_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "search": "example.com",
        "result": {
            "count": 3,
            "records": [
                { "domain": "www.example.com", "firstSeen": 1650000000, "lastSeen": 1700000000 },
                { "firstSeen": 1650000000 },
                { "domain": "mail.example.com", "firstSeen": 1650000000, "lastSeen": 1700000000 }
            ]
        }
    }))
}

pub fn whois_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "WhoisRecord": {
            "domainName": "example.com",
            "registrant": { "organization": "Internet Assigned Numbers Authority", "country": "UNITED STATES" }
        }
    }))
}

/// 挂载全部上游接口和目标页面
pub async fn mount_healthy_upstream(upstream: &MockServer) {
    mount_geolocation(upstream, geolocation_body()).await;
    mount_subdomains(upstream, subdomains_body()).await;
    mount_whois(upstream, whois_body()).await;
    mount_page(
        upstream,
        ResponseTemplate::new(200).set_body_raw(landing_page(upstream), "text/html"),
    )
    .await;
}
