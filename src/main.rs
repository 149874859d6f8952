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

use edubench::config::settings::Settings;
use edubench::harness::scenarios;
use edubench::harness::stats::{LoadStatistics, Thresholds};
use edubench::utils::telemetry;
use std::time::Duration;
use tracing::{error, info};

/// 主函数
///
/// 按配置依次运行各负载场景，打印聚合统计并根据阈值判定结果；
/// 任一场景越过阈值时以非零状态退出
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    info!("Starting edubench load scenarios...");

    let settings = Settings::new()?;
    info!(
        base_url = %settings.api.base_url,
        users = settings.load.users,
        workers = settings.load.workers,
        "Configuration loaded"
    );

    let mut violations: Vec<String> = Vec::new();

    let login_thresholds = Thresholds {
        min_success_rate: Some(0.8),
        max_mean_latency: Some(Duration::from_secs(2)),
        max_latency: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    let stats = scenarios::concurrent_login(&settings).await?;
    report("concurrent_login", &stats, &login_thresholds, &mut violations);

    let class_thresholds = Thresholds {
        min_success_rate: Some(0.8),
        max_mean_latency: Some(Duration::from_secs(3)),
        ..Default::default()
    };
    let stats = scenarios::concurrent_class_creation(&settings).await?;
    report(
        "concurrent_class_creation",
        &stats,
        &class_thresholds,
        &mut violations,
    );

    let attendance_thresholds = Thresholds {
        min_success_rate: Some(0.8),
        max_mean_latency: Some(Duration::from_secs(2)),
        ..Default::default()
    };
    let stats = scenarios::concurrent_attendance_marking(&settings).await?;
    report(
        "concurrent_attendance_marking",
        &stats,
        &attendance_thresholds,
        &mut violations,
    );

    let throughput_thresholds = Thresholds {
        min_success_rate: Some(0.95),
        max_p95_latency: Some(Duration::from_secs(3)),
        min_throughput: Some(10.0),
        ..Default::default()
    };
    let stats = scenarios::read_throughput(&settings).await?;
    report(
        "read_throughput",
        &stats,
        &throughput_thresholds,
        &mut violations,
    );

    if !violations.is_empty() {
        anyhow::bail!("{} scenario(s) violated thresholds", violations.len());
    }

    info!("All load scenarios within thresholds");
    Ok(())
}

fn report(
    name: &str,
    stats: &LoadStatistics,
    thresholds: &Thresholds,
    violations: &mut Vec<String>,
) {
    info!(scenario = name, %stats, "scenario finished");
    if let Err(violation) = thresholds.check(stats) {
        error!(scenario = name, %violation, "threshold violated");
        violations.push(format!("{}: {}", name, violation));
    }
}
