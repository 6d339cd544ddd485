// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::services::aggregator::WebsiteInfoAggregator;
use crate::presentation::handlers::{lookup_handler, session_handler};
use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回未绑定状态的路由，处理器所需的扩展由 [`app`] 注入
pub fn routes() -> Router {
    Router::new()
        .route("/", get(lookup_handler::lookup))
        .route("/ws", get(session_handler::session))
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
}

/// 创建注入了聚合器和配置的完整应用
pub fn app(aggregator: Arc<WebsiteInfoAggregator>, settings: Arc<Settings>) -> Router {
    routes()
        .layer(Extension(aggregator))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
