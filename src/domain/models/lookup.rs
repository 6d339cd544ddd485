// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 上游缺失或失败时使用的占位值
pub const NOT_AVAILABLE: &str = "N/A";

/// 一次网站查询的完整结果
///
/// 每次聚合调用都会重新构建，不做持久化
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// 网络身份与注册组织
    pub info: NetworkInfo,
    /// 子域名列表，保持上游返回的顺序
    pub subdomains: Vec<String>,
    /// 外部资源引用
    #[serde(rename = "assetDomains")]
    pub asset_domains: AssetDomains,
}

/// 网络身份信息
///
/// 各字段相互独立，任意字段缺失时都回退为 `"N/A"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub ip: String,
    pub isp: String,
    pub asn: String,
    pub location: String,
    pub organisation: String,
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            ip: NOT_AVAILABLE.to_string(),
            isp: NOT_AVAILABLE.to_string(),
            asn: NOT_AVAILABLE.to_string(),
            location: NOT_AVAILABLE.to_string(),
            organisation: NOT_AVAILABLE.to_string(),
        }
    }
}

impl NetworkInfo {
    /// 由地理位置查询结果和注册组织组装网络信息
    pub fn from_parts(identity: NetworkIdentity, organisation: Option<String>) -> Self {
        Self {
            ip: or_not_available(identity.ip),
            isp: or_not_available(identity.isp),
            asn: or_not_available(identity.asn),
            location: or_not_available(identity.country),
            organisation: or_not_available(organisation),
        }
    }
}

/// 地理位置 API 返回的原始网络身份，字段可缺失
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkIdentity {
    pub ip: Option<String>,
    pub isp: Option<String>,
    pub asn: Option<String>,
    pub country: Option<String>,
}

fn or_not_available(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// 资源类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Javascript,
    Stylesheet,
    Image,
    Iframe,
    Anchor,
}

impl AssetKind {
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Stylesheet,
        AssetKind::Javascript,
        AssetKind::Image,
        AssetKind::Iframe,
        AssetKind::Anchor,
    ];

    /// 匹配该类资源的 CSS 选择器
    pub fn selector(self) -> &'static str {
        match self {
            AssetKind::Stylesheet => r#"link[rel~="stylesheet"]"#,
            AssetKind::Javascript => "script",
            AssetKind::Image => "img",
            AssetKind::Iframe => "iframe",
            AssetKind::Anchor => "a",
        }
    }

    /// 携带资源地址的属性名
    pub fn attribute(self) -> &'static str {
        match self {
            AssetKind::Stylesheet | AssetKind::Anchor => "href",
            AssetKind::Javascript | AssetKind::Image | AssetKind::Iframe => "src",
        }
    }
}

/// 外部资源集合
///
/// 每个集合按集合语义去重，序列化为顺序不定的 JSON 数组
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDomains {
    pub javascripts: HashSet<String>,
    pub stylesheets: HashSet<String>,
    pub images: HashSet<String>,
    pub iframes: HashSet<String>,
    pub anchors: HashSet<String>,
}

impl AssetDomains {
    pub fn get(&self, kind: AssetKind) -> &HashSet<String> {
        match kind {
            AssetKind::Javascript => &self.javascripts,
            AssetKind::Stylesheet => &self.stylesheets,
            AssetKind::Image => &self.images,
            AssetKind::Iframe => &self.iframes,
            AssetKind::Anchor => &self.anchors,
        }
    }

    /// 插入一个资源地址，返回是否为新值
    pub fn insert(&mut self, kind: AssetKind, url: impl Into<String>) -> bool {
        let set = match kind {
            AssetKind::Javascript => &mut self.javascripts,
            AssetKind::Stylesheet => &mut self.stylesheets,
            AssetKind::Image => &mut self.images,
            AssetKind::Iframe => &mut self.iframes,
            AssetKind::Anchor => &mut self.anchors,
        };
        set.insert(url.into())
    }

    pub fn is_empty(&self) -> bool {
        AssetKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }

    pub fn len(&self) -> usize {
        AssetKind::ALL.iter().map(|kind| self.get(*kind).len()).sum()
    }
}
