// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 网站信息聚合与页面资源提取
pub mod aggregator;
pub mod asset_extractor;
