// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::lookup::{AssetDomains, LookupResult, NetworkInfo};
use crate::domain::models::session::{SessionOperation, SessionRequest, SessionState};
use crate::domain::services::aggregator::WebsiteInfoAggregator;
use crate::infrastructure::metrics;
use crate::presentation::errors::ClientError;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Extension,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 会话回复
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SessionReply {
    Data { data: SessionPayload },
    Error { error: String },
}

/// 会话回复中的数据部分
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SessionPayload {
    Message(String),
    Info(NetworkInfo),
    Subdomains(Vec<String>),
    AssetDomains(AssetDomains),
}

impl From<ClientError> for SessionReply {
    fn from(err: ClientError) -> Self {
        SessionReply::Error {
            error: err.to_string(),
        }
    }
}

impl SessionPayload {
    fn select(operation: SessionOperation, result: LookupResult) -> Self {
        match operation {
            SessionOperation::GetInfo => SessionPayload::Info(result.info),
            SessionOperation::GetSubdomains => SessionPayload::Subdomains(result.subdomains),
            SessionOperation::GetAssetDomains => SessionPayload::AssetDomains(result.asset_domains),
        }
    }
}

/// `GET /ws` WebSocket 升级
pub async fn session(
    ws: WebSocketUpgrade,
    Extension(aggregator): Extension<Arc<WebsiteInfoAggregator>>,
    Extension(settings): Extension<Arc<Settings>>,
) -> Response {
    let reuse_lookup = settings.session.reuse_lookup;
    ws.on_upgrade(move |socket| run_session(socket, aggregator, reuse_lookup))
}

/// 按到达顺序逐条处理一个连接上的消息，直到连接关闭
async fn run_session(socket: WebSocket, aggregator: Arc<WebsiteInfoAggregator>, reuse_lookup: bool) {
    let (mut sender, mut receiver) = socket.split();
    let mut session = SessionState::new(reuse_lookup);
    info!("WebSocket session opened");

    while let Some(frame) = receiver.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text.as_str().to_owned(),
            Ok(Message::Binary(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!("WebSocket receive failed: {}", e);
                break;
            }
        };

        if text.is_empty() {
            continue;
        }

        let reply = handle_message(&aggregator, &mut session, &text).await;
        let payload = match serde_json::to_string(&reply) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize session reply: {}", e);
                continue;
            }
        };

        if let Err(e) = sender.send(Message::Text(payload.into())).await {
            debug!("WebSocket send failed: {}", e);
            break;
        }
    }

    info!("WebSocket session closed");
}

/// 处理一条会话消息并生成回复
///
/// # 参数
///
/// * `aggregator` - 网站信息聚合器
/// * `session` - 当前连接的会话状态
/// * `text` - 客户端发送的 JSON 文本
pub async fn handle_message(
    aggregator: &WebsiteInfoAggregator,
    session: &mut SessionState,
    text: &str,
) -> SessionReply {
    match SessionRequest::parse(text) {
        SessionRequest::SetUrl(url) => {
            metrics::record_session_message("set_url");
            let reply = SessionReply::Data {
                data: SessionPayload::Message(format!("session created for {}", url)),
            };
            session.set_url(url);
            reply
        }
        SessionRequest::Operation(operation) => {
            metrics::record_session_message("operation");
            let Some(url) = session.current_url().map(str::to_owned) else {
                return ClientError::SessionUrlMissing.into();
            };
            let Some(operation) = operation.as_deref().and_then(SessionOperation::parse) else {
                return ClientError::InvalidOperation.into();
            };

            let result = match session.cached_lookup() {
                Some(cached) => {
                    debug!("Reusing lookup of {} for {}", url, operation.as_str());
                    cached.clone()
                }
                None => {
                    let result = aggregator.fetch(&url).await;
                    session.remember(&result);
                    result
                }
            };

            SessionReply::Data {
                data: SessionPayload::select(operation, result),
            }
        }
        SessionRequest::Invalid => {
            metrics::record_session_message("invalid");
            ClientError::InvalidRequest.into()
        }
    }
}

#[cfg(test)]
#[path = "session_handler_test.rs"]
mod tests;
