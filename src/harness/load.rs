// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use crate::client::{ApiError, ApiResponse};

/// 单次调用的结果
///
/// 创建后不再修改，由统计聚合消费。出错的调用也记录到失败点为止
/// 的耗时，不会中止同批次的其他调用
#[derive(Debug, Clone)]
pub struct CallResult {
    /// 调用是否成功（传输成功且服务端接受）
    pub success: bool,
    /// 耗时
    pub elapsed: Duration,
    /// 失败时的错误描述
    pub error: Option<String>,
}

impl CallResult {
    /// 从一次API调用的结果构造
    ///
    /// 应用层拒绝和传输错误都计为失败；二者的区别保留在error文本里
    pub fn from_outcome(outcome: Result<ApiResponse, ApiError>, elapsed: Duration) -> Self {
        match outcome {
            Ok(response) if response.success => Self {
                success: true,
                elapsed,
                error: None,
            },
            Ok(response) => Self {
                success: false,
                elapsed,
                error: response.message.or_else(|| Some("rejected by server".into())),
            },
            Err(error) => Self {
                success: false,
                elapsed,
                error: Some(error.to_string()),
            },
        }
    }

    /// 构造一条失败记录
    pub fn failure(elapsed: Duration, error: impl Into<String>) -> Self {
        Self {
            success: false,
            elapsed,
            error: Some(error.into()),
        }
    }
}

/// 并发负载执行器
///
/// 把N次调用提交到固定大小的工作器池并发执行，收集每次调用的
/// 成功与耗时。池大小与N无关；结果按完成顺序收集，跨工作器的
/// 完成顺序没有任何保证。单次调用失败不重试也不中止批次。
pub struct LoadHarness {
    workers: usize,
}

impl LoadHarness {
    /// 创建指定池大小的执行器
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// 工作器池大小
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 并发执行total次调用
    ///
    /// `op`以调用序号为参数构造一次调用；同时在途的调用数不超过
    /// 池大小。返回按完成顺序排列的全部结果，批次总是完整结束
    pub async fn run<F, Fut>(&self, total: usize, op: F) -> Vec<CallResult>
    where
        F: Fn(usize) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse, ApiError>> + Send + 'static,
    {
        let op = Arc::new(op);
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for index in 0..total {
            let op = op.clone();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return CallResult::failure(Duration::ZERO, "worker pool closed"),
                };
                let start = Instant::now();
                let outcome = op(index).await;
                CallResult::from_outcome(outcome, start.elapsed())
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            results.push(match joined {
                Ok(result) => result,
                // 调用内的panic被隔离为一条失败记录
                Err(error) => CallResult::failure(Duration::ZERO, format!("call panicked: {}", error)),
            });
        }

        debug!(
            total,
            failed = results.iter().filter(|r| !r.success).count(),
            "load batch complete"
        );
        results
    }

    /// 在固定的墙钟时长内反复执行调用（吞吐量场景）
    ///
    /// 每个工作器循环发起调用直到时间预算耗尽；已在途的调用会
    /// 跑完而不被取消。返回全部结果和实际经过的墙钟时间
    pub async fn run_for<F, Fut>(&self, budget: Duration, op: F) -> (Vec<CallResult>, Duration)
    where
        F: Fn(usize) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse, ApiError>> + Send + 'static,
    {
        let op = Arc::new(op);
        let counter = Arc::new(AtomicUsize::new(0));
        let started = Instant::now();
        let deadline = started + budget;
        let mut tasks = JoinSet::new();

        for _ in 0..self.workers {
            let op = op.clone();
            let counter = counter.clone();
            tasks.spawn(async move {
                let mut collected = Vec::new();
                while Instant::now() < deadline {
                    let index = counter.fetch_add(1, Ordering::Relaxed);
                    let start = Instant::now();
                    let outcome = op(index).await;
                    collected.push(CallResult::from_outcome(outcome, start.elapsed()));
                }
                collected
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(collected) => results.extend(collected),
                Err(error) => {
                    results.push(CallResult::failure(
                        Duration::ZERO,
                        format!("call panicked: {}", error),
                    ));
                }
            }
        }

        (results, started.elapsed())
    }
}
