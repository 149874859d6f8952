// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 测试数据生成模块
///
/// 提供种子化的伪造数据源和按实体类型成形的合成记录生成器
/// 支持默认有效、刻意无效和边界场景三类载荷
pub mod faker;
pub mod records;

pub use faker::Faker;
pub use records::{grade_for_marks, DataGenerator, EntityKind, Role, SyntheticRecord};
