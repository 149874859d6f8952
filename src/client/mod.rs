// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// API客户端模块
///
/// 提供学校管理系统REST接口的认证HTTP调用
/// 包括令牌生命周期管理、规范化响应信封和multipart文件上传
pub mod api_client;
pub mod response;
pub mod session;

pub use api_client::{AnalyticsKind, ApiClient};
pub use response::{ApiError, ApiResponse};
pub use session::{SessionState, TokenPair};
