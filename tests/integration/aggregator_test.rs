// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 聚合器端到端测试
//!
//! 使用真实的 WhoisXML 客户端和 reqwest 引擎访问 wiremock 模拟的上游

use super::helpers::*;
use std::io;
use std::sync::{Arc, Mutex};
use webscope::domain::models::lookup::{LookupResult, NOT_AVAILABLE};
use webscope::domain::services::aggregator::WebsiteInfoAggregator;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_lookup_against_healthy_upstream() {
    let upstream = MockServer::start().await;
    mount_healthy_upstream(&upstream).await;
    let aggregator = aggregator(&test_settings(&upstream, Some(API_KEY), false));

    let result = aggregator.fetch(&target_of(&upstream)).await;

    assert_eq!(result.info.ip, "93.184.216.34");
    assert_eq!(result.info.isp, "Edgecast Inc.");
    assert_eq!(result.info.asn, "15133");
    assert_eq!(result.info.location, "US");
    assert_eq!(
        result.info.organisation,
        "Internet Assigned Numbers Authority"
    );
    assert_eq!(result.subdomains, vec!["www.example.com", "mail.example.com"]);

    let assets = &result.asset_domains;
    assert_eq!(assets.stylesheets.len(), 1);
    assert!(assets.stylesheets.contains("https://fonts.example.net/css"));
    assert_eq!(assets.javascripts.len(), 1);
    assert!(assets.javascripts.contains("https://cdn.example.net/lib.js"));
    assert_eq!(assets.images.len(), 1);
    assert!(assets.images.contains("//images.example.net/logo.png"));
    assert_eq!(assets.iframes.len(), 1);
    assert!(assets.iframes.contains("https://player.example.net/embed/1"));
    assert_eq!(assets.anchors.len(), 1);
    assert!(assets.anchors.contains("https://github.com/example"));
}

#[tokio::test]
async fn test_lookup_with_scheme_qualified_target() {
    let upstream = MockServer::start().await;
    mount_healthy_upstream(&upstream).await;
    let aggregator = aggregator(&test_settings(&upstream, Some(API_KEY), false));

    let result = aggregator.fetch(&upstream.uri()).await;

    assert_eq!(result.info.ip, "93.184.216.34");
    assert_eq!(result.subdomains.len(), 2);
    assert_eq!(result.asset_domains.javascripts.len(), 1);
}

#[tokio::test]
async fn test_geolocation_failure_only_affects_network_fields() {
    let upstream = MockServer::start().await;
    mount_geolocation(&upstream, ResponseTemplate::new(500)).await;
    mount_subdomains(&upstream, subdomains_body()).await;
    mount_whois(&upstream, whois_body()).await;
    mount_page(
        &upstream,
        ResponseTemplate::new(200).set_body_raw(landing_page(&upstream), "text/html"),
    )
    .await;
    let aggregator = aggregator(&test_settings(&upstream, Some(API_KEY), false));

    let result = aggregator.fetch(&target_of(&upstream)).await;

    assert_eq!(result.info.ip, NOT_AVAILABLE);
    assert_eq!(result.info.isp, NOT_AVAILABLE);
    assert_eq!(result.info.asn, NOT_AVAILABLE);
    assert_eq!(result.info.location, NOT_AVAILABLE);
    assert_eq!(
        result.info.organisation,
        "Internet Assigned Numbers Authority"
    );
    assert_eq!(result.subdomains.len(), 2);
    assert!(!result.asset_domains.is_empty());
}

#[tokio::test]
async fn test_malformed_payloads_fall_back_to_defaults() {
    let upstream = MockServer::start().await;
    mount_geolocation(&upstream, geolocation_body()).await;
    mount_subdomains(
        &upstream,
        ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"),
    )
    .await;
    mount_whois(
        &upstream,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ErrorMessage": { "errorCode": "WHOIS_01", "msg": "Invalid domain" }
        })),
    )
    .await;
    mount_page(&upstream, ResponseTemplate::new(200).set_body_raw("", "text/html")).await;
    let aggregator = aggregator(&test_settings(&upstream, Some(API_KEY), false));

    let result = aggregator.fetch(&target_of(&upstream)).await;

    assert_eq!(result.info.ip, "93.184.216.34");
    assert_eq!(result.info.organisation, NOT_AVAILABLE);
    assert!(result.subdomains.is_empty());
    assert!(result.asset_domains.is_empty());
}

#[tokio::test]
async fn test_page_error_status_empties_assets() {
    let upstream = MockServer::start().await;
    mount_geolocation(&upstream, geolocation_body()).await;
    mount_subdomains(&upstream, subdomains_body()).await;
    mount_whois(&upstream, whois_body()).await;
    mount_page(
        &upstream,
        ResponseTemplate::new(404).set_body_raw(landing_page(&upstream), "text/html"),
    )
    .await;
    let aggregator = aggregator(&test_settings(&upstream, Some(API_KEY), false));

    let result = aggregator.fetch(&target_of(&upstream)).await;

    assert!(result.asset_domains.is_empty());
    assert_eq!(result.info.ip, "93.184.216.34");
    assert_eq!(result.subdomains.len(), 2);
}

#[tokio::test]
async fn test_missing_api_key_skips_api_calls() {
    let upstream = MockServer::start().await;
    mount_page(
        &upstream,
        ResponseTemplate::new(200).set_body_raw(landing_page(&upstream), "text/html"),
    )
    .await;
    // Any request to an API path would hit this and fail the expectation
    Mock::given(method("GET"))
        .and(wiremock::matchers::path_regex("^/(geo|subdomains|whoisserver)/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;
    let aggregator = aggregator(&test_settings(&upstream, None, false));

    let result = aggregator.fetch(&target_of(&upstream)).await;

    assert_eq!(result.info, LookupResult::default().info);
    assert!(result.subdomains.is_empty());
    assert_eq!(result.asset_domains.javascripts.len(), 1);
}

#[tokio::test]
async fn test_unreachable_target_yields_complete_defaults() {
    // APIs answer 404 because nothing is mounted, the page port is closed
    let upstream = MockServer::start().await;
    let settings = test_settings(&upstream, Some(API_KEY), false);
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let target = listener.local_addr().unwrap().to_string();
    drop(listener);

    let result = aggregator(&settings).fetch(&target).await;

    assert_eq!(result, LookupResult::default());
}

#[tokio::test]
async fn test_repeated_lookups_are_structurally_identical() {
    let upstream = MockServer::start().await;
    mount_healthy_upstream(&upstream).await;
    let aggregator = aggregator(&test_settings(&upstream, Some(API_KEY), false));
    let target = target_of(&upstream);

    let first = aggregator.fetch(&target).await;
    let second = aggregator.fetch(&target).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_user_agent_is_reported_at_construction() {
    let upstream = MockServer::start().await;
    let mut settings = test_settings(&upstream, Some(API_KEY), false);
    settings.fetch.user_agent = "bad\nagent".to_string();

    assert!(WebsiteInfoAggregator::from_settings(&settings).is_err());
}

/// 把日志输出收集到内存中
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_absorbed_failure_logs_a_single_warning() {
    let upstream = MockServer::start().await;
    mount_geolocation(&upstream, ResponseTemplate::new(500)).await;
    mount_subdomains(&upstream, subdomains_body()).await;
    mount_whois(&upstream, whois_body()).await;
    mount_page(
        &upstream,
        ResponseTemplate::new(200).set_body_raw(landing_page(&upstream), "text/html"),
    )
    .await;
    let aggregator = aggregator(&test_settings(&upstream, Some(API_KEY), false));

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("webscope=warn"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);

    aggregator.fetch(&target_of(&upstream)).await;
    drop(guard);

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1, "captured logs: {:?}", lines);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("network_identity lookup failed"));
}
