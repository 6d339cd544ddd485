// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 客户端请求错误
///
/// 以 `{"error": ...}` 的形式返回给调用方，HTTP 状态码始终为 200
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClientError {
    /// HTTP 请求缺少 `url` 参数
    #[error("No Url Provided")]
    MissingUrlParameter,
    /// 会话尚未设置 URL
    #[error("No url provided")]
    SessionUrlMissing,
    /// 未知的会话操作
    #[error("Invalid Operation")]
    InvalidOperation,
    /// 无法识别的会话消息
    #[error("Invalid Request")]
    InvalidRequest,
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::OK, body).into_response()
    }
}
