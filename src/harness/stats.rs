// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use thiserror::Error;

use crate::harness::load::CallResult;

/// 聚合断言错误类型
///
/// 负载场景唯一的"错误"就是统计量越过阈值；错误信息携带实测值
/// 便于诊断
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("成功率未达标: 实测 {measured:.3}, 要求至少 {required:.3}")]
    SuccessRateBelowThreshold { measured: f64, required: f64 },

    #[error("平均延迟超标: 实测 {measured:?}, 上限 {limit:?}")]
    MeanLatencyExceeded { measured: Duration, limit: Duration },

    #[error("最大延迟超标: 实测 {measured:?}, 上限 {limit:?}")]
    MaxLatencyExceeded { measured: Duration, limit: Duration },

    #[error("P95延迟超标: 实测 {measured:?}, 上限 {limit:?}")]
    P95LatencyExceeded { measured: Duration, limit: Duration },

    #[error("吞吐量未达标: 实测 {measured:.2} req/s, 要求至少 {required:.2} req/s")]
    ThroughputBelowThreshold { measured: f64, required: f64 },
}

/// 一批调用结果的只读聚合统计
///
/// 批次结束后一次性计算，不支持增量更新
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// 调用总数
    pub count: usize,
    /// 成功调用数
    pub success_count: usize,
    /// 成功率（0.0-1.0）
    pub success_rate: f64,
    /// 平均延迟
    pub mean_latency: Duration,
    /// 最大延迟
    pub max_latency: Duration,
    /// 95分位延迟
    pub p95_latency: Duration,
    /// 吞吐量（调用数 / 墙钟时间）
    pub throughput: f64,
    /// 批次墙钟时间
    pub wall_time: Duration,
}

impl LoadStatistics {
    /// 从一批调用结果计算统计量
    pub fn from_results(results: &[CallResult], wall_time: Duration) -> Self {
        let count = results.len();
        let success_count = results.iter().filter(|r| r.success).count();
        let success_rate = if count > 0 {
            success_count as f64 / count as f64
        } else {
            0.0
        };

        let mut latencies: Vec<Duration> = results.iter().map(|r| r.elapsed).collect();
        latencies.sort();

        let mean_latency = if count > 0 {
            latencies.iter().sum::<Duration>() / count as u32
        } else {
            Duration::ZERO
        };
        let max_latency = latencies.last().copied().unwrap_or(Duration::ZERO);
        let p95_latency = if count > 0 {
            let index = ((count as f64) * 0.95) as usize;
            latencies[index.min(count - 1)]
        } else {
            Duration::ZERO
        };

        let throughput = if wall_time.as_secs_f64() > 0.0 {
            count as f64 / wall_time.as_secs_f64()
        } else {
            0.0
        };

        Self {
            count,
            success_count,
            success_rate,
            mean_latency,
            max_latency,
            p95_latency,
            throughput,
            wall_time,
        }
    }
}

impl std::fmt::Display for LoadStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "count={} success={} rate={:.3} mean={:?} max={:?} p95={:?} throughput={:.2}/s wall={:?}",
            self.count,
            self.success_count,
            self.success_rate,
            self.mean_latency,
            self.max_latency,
            self.p95_latency,
            self.throughput,
            self.wall_time,
        )
    }
}

/// 负载场景的静态阈值
///
/// 未设置的阈值不参与检查
#[derive(Debug, Clone, Default)]
pub struct Thresholds {
    /// 最低成功率（0.0-1.0）
    pub min_success_rate: Option<f64>,
    /// 平均延迟上限
    pub max_mean_latency: Option<Duration>,
    /// 最大延迟上限
    pub max_latency: Option<Duration>,
    /// 95分位延迟上限
    pub max_p95_latency: Option<Duration>,
    /// 最低吞吐量（req/s）
    pub min_throughput: Option<f64>,
}

impl Thresholds {
    /// 检查统计量是否越过阈值，返回第一个违规项
    pub fn check(&self, stats: &LoadStatistics) -> Result<(), HarnessError> {
        if let Some(required) = self.min_success_rate {
            if stats.success_rate < required {
                return Err(HarnessError::SuccessRateBelowThreshold {
                    measured: stats.success_rate,
                    required,
                });
            }
        }
        if let Some(limit) = self.max_mean_latency {
            if stats.mean_latency > limit {
                return Err(HarnessError::MeanLatencyExceeded {
                    measured: stats.mean_latency,
                    limit,
                });
            }
        }
        if let Some(limit) = self.max_latency {
            if stats.max_latency > limit {
                return Err(HarnessError::MaxLatencyExceeded {
                    measured: stats.max_latency,
                    limit,
                });
            }
        }
        if let Some(limit) = self.max_p95_latency {
            if stats.p95_latency > limit {
                return Err(HarnessError::P95LatencyExceeded {
                    measured: stats.p95_latency,
                    limit,
                });
            }
        }
        if let Some(required) = self.min_throughput {
            if stats.throughput < required {
                return Err(HarnessError::ThroughputBelowThreshold {
                    measured: stats.throughput,
                    required,
                });
            }
        }
        Ok(())
    }
}
