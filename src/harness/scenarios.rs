// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::client::{ApiClient, ApiError};
use crate::config::settings::Settings;
use crate::generator::{DataGenerator, SyntheticRecord};
use crate::harness::load::LoadHarness;
use crate::harness::stats::LoadStatistics;

/// 并发登录场景
///
/// 每个虚拟用户独享一个客户端实例并各自登录，避免共享客户端上
/// login/refresh竞争导致的令牌覆盖
pub async fn concurrent_login(settings: &Settings) -> Result<LoadStatistics, ApiError> {
    let harness = LoadHarness::new(settings.load.workers);
    let base_url = settings.api.base_url.clone();
    let timeout = settings.api.timeout_duration();
    let credentials = settings.accounts.student.clone();

    let started = Instant::now();
    let results = harness
        .run(settings.load.users, move |index| {
            let base_url = base_url.clone();
            let credentials = credentials.clone();
            async move {
                let client = ApiClient::new(&base_url, timeout)?;
                let response = client.login(&credentials.email, &credentials.password).await?;
                info!(index, success = response.success, "login call finished");
                Ok(response)
            }
        })
        .await;

    Ok(LoadStatistics::from_results(&results, started.elapsed()))
}

/// 并发创建班级场景
///
/// 管理员登录一次后，令牌状态只读共享给所有工作器
pub async fn concurrent_class_creation(settings: &Settings) -> Result<LoadStatistics, ApiError> {
    let client = Arc::new(ApiClient::from_settings(&settings.api)?);
    let admin = &settings.accounts.admin;
    client.login(&admin.email, &admin.password).await?;

    let total = settings.load.users;
    let mut generator = DataGenerator::from_entropy();
    let classes: Vec<SyntheticRecord> = (0..total)
        .map(|index| {
            let mut class = generator.generate_class();
            class.insert("name".into(), json!(format!("Class {}", index)));
            let section = (b'A' + (index % 26) as u8) as char;
            class.insert("section".into(), json!(section.to_string()));
            class
        })
        .collect();
    let classes = Arc::new(classes);

    let harness = LoadHarness::new(settings.load.workers);
    let started = Instant::now();
    let results = harness
        .run(total, move |index| {
            let client = client.clone();
            let classes = classes.clone();
            async move { client.create_class(&classes[index]).await }
        })
        .await;

    Ok(LoadStatistics::from_results(&results, started.elapsed()))
}

/// 并发标记考勤场景
pub async fn concurrent_attendance_marking(
    settings: &Settings,
) -> Result<LoadStatistics, ApiError> {
    let client = Arc::new(ApiClient::from_settings(&settings.api)?);
    let teacher = &settings.accounts.teacher;
    client.login(&teacher.email, &teacher.password).await?;

    let total = settings.load.users;
    let mut generator = DataGenerator::from_entropy();
    let records: Vec<SyntheticRecord> = (0..total)
        .map(|_| generator.generate_attendance(None, None, None))
        .collect();
    let records = Arc::new(records);

    let harness = LoadHarness::new(settings.load.workers);
    let started = Instant::now();
    let results = harness
        .run(total, move |index| {
            let client = client.clone();
            let records = records.clone();
            async move { client.mark_attendance(&records[index]).await }
        })
        .await;

    Ok(LoadStatistics::from_results(&results, started.elapsed()))
}

/// 固定时长的读取吞吐量场景
///
/// 管理员登录后在时间预算内反复查询用户列表
pub async fn read_throughput(settings: &Settings) -> Result<LoadStatistics, ApiError> {
    let client = Arc::new(ApiClient::from_settings(&settings.api)?);
    let admin = &settings.accounts.admin;
    client.login(&admin.email, &admin.password).await?;

    let harness = LoadHarness::new(settings.load.workers);
    let (results, wall_time) = harness
        .run_for(settings.load.duration_as_duration(), move |_| {
            let client = client.clone();
            async move { client.get_users(&[]).await }
        })
        .await;

    Ok(LoadStatistics::from_results(&results, wall_time))
}
