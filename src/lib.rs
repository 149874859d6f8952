// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// API客户端模块
///
/// 封装学校管理系统REST接口的HTTP调用和令牌生命周期管理
pub mod client;

/// 配置模块
///
/// 处理测试环境的配置设置和环境变量
pub mod config;

/// 测试数据生成模块
///
/// 生成可复现的合成测试数据，包括有效、无效和边界场景
pub mod generator;

/// 负载测试模块
///
/// 提供并发负载执行、结果收集和聚合统计功能
pub mod harness;

/// 数据库探针模块
///
/// 直接查询底层数据库以校验API可见状态
pub mod probe;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
