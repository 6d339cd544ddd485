// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含查询结果模型、会话状态、上游数据源接口和聚合服务
pub mod domain;

/// 引擎模块
///
/// 实现目标页面的抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如 WhoisXML API 和指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和WebSocket会话，包括路由、处理器和错误回复
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
