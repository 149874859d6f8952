// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::config::settings::DatabaseSettings;

/// 探针错误类型
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

/// 可探测的表
///
/// 封闭枚举，表名不接受任意字符串，避免拼接SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeTable {
    Users,
    Classes,
    Attendance,
    Homework,
    Notifications,
    QaMessages,
    Complaints,
}

impl ProbeTable {
    /// 表名
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeTable::Users => "users",
            ProbeTable::Classes => "classes",
            ProbeTable::Attendance => "attendance",
            ProbeTable::Homework => "homework",
            ProbeTable::Notifications => "notifications",
            ProbeTable::QaMessages => "qa_messages",
            ProbeTable::Complaints => "complaints",
        }
    }
}

/// users表的一行
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

/// 数据库探针
///
/// 直接查询底层存储，用于把API可见状态与数据库行做交叉校验
/// 以及清理测试数据；不属于测试框架的主要契约
pub struct DatabaseProbe {
    pool: PgPool,
}

impl DatabaseProbe {
    /// 按配置建立连接池
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, ProbeError> {
        let mut options = PgPoolOptions::new()
            .max_connections(settings.max_connections.unwrap_or(20))
            .min_connections(settings.min_connections.unwrap_or(2));
        if let Some(seconds) = settings.connect_timeout {
            options = options.acquire_timeout(Duration::from_secs(seconds));
        }
        if let Some(seconds) = settings.idle_timeout {
            options = options.idle_timeout(Duration::from_secs(seconds));
        }

        let pool = options.connect(&settings.url).await?;
        Ok(Self { pool })
    }

    /// 底层连接池
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 按邮箱查询用户行
    pub async fn user_by_email(&self, email: &str) -> Result<Option<UserRow>, ProbeError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, email, role, is_active FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// 统计表的行数
    pub async fn count_rows(&self, table: ProbeTable) -> Result<i64, ProbeError> {
        // 表名来自封闭枚举
        let query = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let count: i64 = sqlx::query_scalar(&query).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// 按邮箱删除用户（测试数据清理）
    pub async fn delete_user_by_email(&self, email: &str) -> Result<u64, ProbeError> {
        let result = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
