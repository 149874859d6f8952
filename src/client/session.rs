// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 一对不透明令牌
///
/// access_token短期有效，refresh_token用于轮换access_token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// 访问令牌
    pub access_token: String,
    /// 刷新令牌
    pub refresh_token: String,
}

/// 会话状态
///
/// 每个客户端实例持有至多一对活动令牌；未登录、登出或重置后为空。
/// 令牌不跨进程持久化。
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    tokens: Option<TokenPair>,
}

impl SessionState {
    /// 是否处于已认证状态
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    /// 当前访问令牌
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    /// 当前刷新令牌
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh_token.as_str())
    }

    /// 安装新的令牌对（登录成功后调用）
    pub fn install(&mut self, pair: TokenPair) {
        self.tokens = Some(pair);
    }

    /// 轮换访问令牌，保留现有刷新令牌
    ///
    /// 匿名状态下轮换是无操作，由调用方在发起刷新前检查会话
    pub fn rotate_access(&mut self, access_token: String) {
        if let Some(tokens) = self.tokens.as_mut() {
            tokens.access_token = access_token;
        }
    }

    /// 清空令牌，回到匿名状态
    pub fn clear(&mut self) {
        self.tokens = None;
    }
}
