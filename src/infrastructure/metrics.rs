// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};

const LOOKUPS_TOTAL: &str = "lookups_total";
const LOOKUP_DURATION_SECONDS: &str = "lookup_duration_seconds";
const LOOKUP_STEP_FAILURES_TOTAL: &str = "lookup_step_failures_total";
const SESSION_MESSAGES_TOTAL: &str = "session_messages_total";

/// 初始化指标系统
///
/// 安装 Prometheus 导出器并注册指标说明。导出器无法启动时只记录警告。
pub fn init_metrics(settings: &MetricsSettings) {
    let addr: SocketAddr = match format!("{}:{}", settings.host, settings.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}:{}: {}", settings.host, settings.port, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(LOOKUPS_TOTAL, "Total number of website lookups performed");
    describe_histogram!(
        LOOKUP_DURATION_SECONDS,
        "Duration of website lookups in seconds"
    );
    describe_counter!(
        LOOKUP_STEP_FAILURES_TOTAL,
        "Lookup steps that fell back to defaults, by step"
    );
    describe_counter!(
        SESSION_MESSAGES_TOTAL,
        "WebSocket session messages handled, by kind"
    );

    info!("Metrics exporter listening on {}", addr);
}

pub fn record_lookup(duration: Duration) {
    counter!(LOOKUPS_TOTAL).increment(1);
    histogram!(LOOKUP_DURATION_SECONDS).record(duration.as_secs_f64());
}

pub fn record_step_failure(step: &'static str) {
    counter!(LOOKUP_STEP_FAILURES_TOTAL, "step" => step).increment(1);
}

pub fn record_session_message(kind: &'static str) {
    counter!(SESSION_MESSAGES_TOTAL, "kind" => kind).increment(1);
}
