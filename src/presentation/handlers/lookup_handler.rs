// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::aggregator::WebsiteInfoAggregator;
use crate::presentation::errors::ClientError;
use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// `GET /?url=<target>`
///
/// 缺少或为空的 `url` 返回 `{"error": "No Url Provided"}`，否则返回完整查询结果。
/// 重复的 `url` 参数只取第一个。
pub async fn lookup(
    Query(params): Query<Vec<(String, String)>>,
    Extension(aggregator): Extension<Arc<WebsiteInfoAggregator>>,
) -> Response {
    match first_url(params) {
        Some(url) => Json(aggregator.fetch(&url).await).into_response(),
        None => ClientError::MissingUrlParameter.into_response(),
    }
}

fn first_url(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find(|(key, _)| key == "url")
        .map(|(_, url)| url)
        .filter(|url| !url.is_empty())
}
