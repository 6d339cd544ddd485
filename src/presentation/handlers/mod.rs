// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// `lookup_handler` 处理一次性的 HTTP 查询，`session_handler` 处理 WebSocket 会话
pub mod lookup_handler;
pub mod session_handler;
