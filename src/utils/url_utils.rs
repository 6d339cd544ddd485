// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 拆分开头的协议，`://` 之前出现 `/`、`?` 或 `#` 时不算协议
///
/// `https://a.com/?r=http://b.com` -> `Some(("https", "a.com/?r=http://b.com"))`
pub fn split_scheme(target: &str) -> Option<(&str, &str)> {
    let idx = target.find("://")?;
    let scheme = &target[..idx];
    if scheme.is_empty() || scheme.contains(['/', '?', '#']) {
        return None;
    }
    Some((scheme, &target[idx + 3..]))
}

/// 去掉开头的协议前缀，没有协议时原样返回
pub fn strip_scheme(target: &str) -> &str {
    let target = target.trim();
    split_scheme(target).map_or(target, |(_, rest)| rest)
}

/// 提取供 WhoisXML API 使用的裸主机名
///
/// `https://example.com/path?q=1` -> `example.com`
pub fn bare_host(target: &str) -> String {
    let without_scheme = strip_scheme(target);
    let end = without_scheme
        .find(['/', '?', '#'])
        .unwrap_or(without_scheme.len());
    without_scheme[..end].to_string()
}

/// 确保目标带有 HTTP(S) 协议，缺省补 `http://`
///
/// 其他协议会被替换为 `http://`
pub fn ensure_http_scheme(target: &str) -> String {
    let target = target.trim();
    match split_scheme(target) {
        Some((scheme, _))
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
        {
            target.to_string()
        }
        Some((_, rest)) => format!("http://{}", rest),
        None => format!("http://{}", target),
    }
}

/// 判断资源地址相对于页面是否为外部资源
///
/// 候选地址先按标准规则相对 `base` 解析，再比较两者的 authority
/// （主机与显式端口）。空值、无法解析的地址以及没有主机的地址
/// （`data:`、`mailto:`、`javascript:` 等）都不算外部资源。
pub fn is_external(candidate: Option<&str>, base: &str) -> bool {
    let Some(candidate) = candidate.filter(|c| !c.is_empty()) else {
        return false;
    };

    match Url::parse(base) {
        Ok(base_url) => match resolve_url(&base_url, candidate) {
            Ok(resolved) => match authority(&resolved) {
                Some(resolved) => Some(resolved) != authority(&base_url),
                None => false,
            },
            Err(_) => false,
        },
        // Without a usable base only absolute candidates carry an authority
        Err(_) => Url::parse(candidate)
            .map(|resolved| authority(&resolved).is_some())
            .unwrap_or(false),
    }
}

fn authority(url: &Url) -> Option<(String, Option<u16>)> {
    url.host_str().map(|host| (host.to_string(), url.port()))
}
