// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理测试环境的配置设置，包括API地址、数据库、负载参数和测试账号
pub mod settings;
