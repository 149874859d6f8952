// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 负载测试模块
///
/// 提供固定大小工作器池上的并发调用执行、结果收集、
/// 聚合统计和阈值断言，以及预置的负载场景
pub mod load;
pub mod scenarios;
pub mod stats;

pub use load::{CallResult, LoadHarness};
pub use stats::{HarnessError, LoadStatistics, Thresholds};
