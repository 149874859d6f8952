// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库探针模块
///
/// 提供对底层关系存储的直接只读校验和测试数据清理
pub mod database;

pub use database::{DatabaseProbe, ProbeError, ProbeTable, UserRow};
