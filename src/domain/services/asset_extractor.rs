// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::lookup::{AssetDomains, AssetKind};
use crate::domain::sources::lookup_source::LookupError;
use crate::utils::url_utils::is_external;
use scraper::{Html, Selector};

/// 从HTML中提取外部资源引用
///
/// # 参数
///
/// * `html` - 页面HTML
/// * `base_url` - 页面的带协议URL，用于解析相对地址并判断是否外部
///
/// # 返回值
///
/// * `Ok(AssetDomains)` - 按类别去重后的外部资源
/// * `Err(LookupError)` - 选择器构建失败
pub fn extract_external_assets(html: &str, base_url: &str) -> Result<AssetDomains, LookupError> {
    let document = Html::parse_document(html);
    let mut assets = AssetDomains::default();

    for kind in AssetKind::ALL {
        let selector = Selector::parse(kind.selector())
            .map_err(|e| LookupError::Decode(format!("Invalid selector: {:?}", e)))?;

        for element in document.select(&selector) {
            match element.value().attr(kind.attribute()) {
                Some(value) if is_external(Some(value), base_url) => {
                    assets.insert(kind, value);
                }
                _ => {}
            }
        }
    }

    Ok(assets)
}
