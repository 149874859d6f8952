// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 并发负载执行器集成测试
//!
//! 验证批次完整性、失败隔离、池大小约束和并发登录场景的
//! 真实并行度（针对带延迟的wiremock桩服务）

use serde_json::Value;
use std::time::{Duration, Instant};

use crate::integration::helpers;
use edubench::client::{ApiError, ApiResponse};
use edubench::harness::{scenarios, LoadHarness, LoadStatistics, Thresholds};

#[tokio::test]
async fn test_all_success_batch() {
    let harness = LoadHarness::new(4);
    let started = Instant::now();
    let results = harness
        .run(25, |_| async { Ok(ApiResponse::ok(Value::Null)) })
        .await;
    let stats = LoadStatistics::from_results(&results, started.elapsed());

    assert_eq!(stats.count, 25);
    assert_eq!(stats.success_count, 25);
    assert!((stats.success_rate - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_rejections_counted_without_aborting_batch() {
    let harness = LoadHarness::new(4);
    let results = harness
        .run(20, |index| async move {
            if index % 5 == 0 {
                Ok(ApiResponse::rejected("duplicate record"))
            } else {
                Ok(ApiResponse::ok(Value::Null))
            }
        })
        .await;

    assert_eq!(results.len(), 20);
    let failed = results.iter().filter(|r| !r.success).count();
    assert_eq!(failed, 4);
    let stats = LoadStatistics::from_results(&results, Duration::from_secs(1));
    assert!((stats.success_rate - 0.8).abs() < 1e-9);
}

#[tokio::test]
async fn test_errors_and_panics_isolated_as_failures() {
    let harness = LoadHarness::new(4);
    let results = harness
        .run(10, |index| async move {
            match index {
                0 => panic!("boom"),
                1 => Err(ApiError::UnexpectedStatus {
                    status: 500,
                    body: "Internal Server Error".into(),
                }),
                _ => Ok(ApiResponse::ok(Value::Null)),
            }
        })
        .await;

    // 单次调用的panic或错误不会中止批次
    assert_eq!(results.len(), 10);
    assert_eq!(results.iter().filter(|r| r.success).count(), 8);
    assert!(results
        .iter()
        .any(|r| r.error.as_deref().is_some_and(|e| e.contains("panicked"))));
    assert!(results
        .iter()
        .any(|r| r.error.as_deref().is_some_and(|e| e.contains("500"))));
}

#[tokio::test]
async fn test_pool_size_bounds_concurrency() {
    let harness = LoadHarness::new(2);
    let started = Instant::now();
    let results = harness
        .run(4, |_| async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(ApiResponse::ok(Value::Null))
        })
        .await;
    let elapsed = started.elapsed();

    // 池大小2意味着4次50ms调用至少要两波
    assert_eq!(results.len(), 4);
    assert!(elapsed >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_run_for_respects_time_budget() {
    let harness = LoadHarness::new(4);
    let (results, wall_time) = harness
        .run_for(Duration::from_millis(200), |_| async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(ApiResponse::ok(Value::Null))
        })
        .await;

    assert!(wall_time >= Duration::from_millis(200));
    assert!(!results.is_empty());
    let stats = LoadStatistics::from_results(&results, wall_time);
    assert!(stats.throughput > 0.0);
}

#[tokio::test]
async fn test_concurrent_login_runs_in_parallel() {
    let server = wiremock::MockServer::start().await;
    helpers::mount_login(&server, Some(Duration::from_millis(50))).await;
    let settings = helpers::settings_for(&server, 10, 10);

    let started = Instant::now();
    let stats = scenarios::concurrent_login(&settings).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(stats.count, 10);
    assert!((stats.success_rate - 1.0).abs() < f64::EPSILON);
    assert!(stats.mean_latency >= Duration::from_millis(50));
    // 10个50ms的调用串行需要500ms以上；并行执行应远低于此
    assert!(
        elapsed < Duration::from_millis(450),
        "expected parallel execution, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_threshold_check_on_scenario_stats() {
    let server = wiremock::MockServer::start().await;
    helpers::mount_login(&server, None).await;
    let settings = helpers::settings_for(&server, 5, 5);

    let stats = scenarios::concurrent_login(&settings).await.unwrap();
    let thresholds = Thresholds {
        min_success_rate: Some(0.8),
        max_mean_latency: Some(Duration::from_secs(2)),
        max_latency: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    assert!(thresholds.check(&stats).is_ok());

    let strict = Thresholds {
        min_throughput: Some(1_000_000.0),
        ..Default::default()
    };
    assert!(strict.check(&stats).is_err());
}
