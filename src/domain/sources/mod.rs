// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 上游数据源模块
///
/// 定义网络身份、子域名和注册组织查询的抽象接口
pub mod lookup_source;
