// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// API错误类型
///
/// 传输层失败会以错误形式抛出；应用层拒绝（`success=false`的规范响应）
/// 不属于错误，作为正常的[`ApiResponse`]返回
#[derive(Error, Debug)]
pub enum ApiError {
    /// 传输层失败：连接失败、超时、响应体读取失败
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 非2xx状态且响应体不是规范信封
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// 在匿名状态下调用了需要会话的操作，未发起任何网络调用
    #[error("No session: login is required first")]
    NoSession,

    /// 2xx响应体无法解析为规范信封
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// 信封缺少约定字段（如登录响应缺少令牌）
    #[error("Malformed envelope: {0}")]
    Envelope(String),

    /// 基础URL不合法
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// 待上传文件读取失败
    #[error("Upload file unreadable: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// 是否为未发起网络调用的本地会话错误
    pub fn is_session_error(&self) -> bool {
        matches!(self, ApiError::NoSession)
    }
}

/// 规范化的API响应信封
///
/// 所有REST端点返回`{success, data, message}`；`success=false`表示
/// 应用层拒绝（校验失败、重复资源、权限不足），由调用方自行断言
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// 调用是否被服务端接受
    pub success: bool,
    /// 数据载荷（记录或列表），缺省为null
    #[serde(default)]
    pub data: Value,
    /// 人类可读的消息
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    /// 构造成功信封（主要用于测试和本地合成响应）
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// 构造应用层拒绝信封
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            message: Some(message.into()),
        }
    }

    /// 从data中按路径取字符串字段
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}
