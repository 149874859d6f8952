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

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::client::response::{ApiError, ApiResponse};
use crate::client::session::{SessionState, TokenPair};
use crate::config::settings::ApiSettings;
use crate::generator::{Role, SyntheticRecord};

/// 分析报表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsKind {
    /// 考勤分析
    Attendance,
    /// 成绩表现分析
    Performance,
    /// 班级分析
    Class,
}

impl AnalyticsKind {
    /// 端点路径片段
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsKind::Attendance => "attendance",
            AnalyticsKind::Performance => "performance",
            AnalyticsKind::Class => "class",
        }
    }
}

/// 学校管理系统API客户端
///
/// 包装一个共享连接池的HTTP会话并跟踪承载令牌的生命周期。
/// 状态机：匿名 --login--> 已认证 --refresh--> 已认证 --logout--> 匿名。
/// 已认证状态下所有请求自动附加`Authorization: Bearer`头。
///
/// 客户端只是传输层：应用层拒绝（`success=false`）按正常结果返回，
/// 由调用方断言；只有传输层失败和本地会话错误会抛出。
/// 并发负载场景下每个虚拟用户各持有一个客户端实例，令牌状态不跨
/// 工作器共享可变访问。
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: RwLock<SessionState>,
}

/// 应用层拒绝对应的状态码
///
/// 这些状态码附带规范信封时按正常结果返回，其余非2xx一律抛出
const REJECTION_STATUSES: &[StatusCode] = &[
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::FORBIDDEN,
    StatusCode::NOT_FOUND,
    StatusCode::CONFLICT,
    StatusCode::UNPROCESSABLE_ENTITY,
];

impl ApiClient {
    /// 创建新的客户端实例
    ///
    /// # 参数
    ///
    /// * `base_url` - REST接口基础URL，如`http://localhost:3001/api/v1`
    /// * `timeout` - 单次请求超时时间
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Url::parse(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // JSON的Content-Type由.json()按请求设置，multipart上传自带边界头
        let http = reqwest::Client::builder()
            .user_agent("edubench/0.1")
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session: RwLock::new(SessionState::default()),
        })
    }

    /// 从配置创建客户端
    pub fn from_settings(api: &ApiSettings) -> Result<Self, ApiError> {
        Self::new(&api.base_url, api.timeout_duration())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 是否处于已认证状态
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    /// 当前访问令牌的副本
    pub fn access_token(&self) -> Option<String> {
        self.session.read().access_token().map(str::to_owned)
    }

    /// 当前刷新令牌的副本
    pub fn refresh_token(&self) -> Option<String> {
        self.session.read().refresh_token().map(str::to_owned)
    }

    /// 显式重置会话状态（不访问网络）
    pub fn reset_session(&self) {
        self.session.write().clear();
    }

    /// 发送请求并把响应规范化为信封
    ///
    /// 已认证状态下附加Bearer头。2xx解析为信封；应用层拒绝状态码
    /// 附带规范信封时同样按正常结果返回；其余非2xx抛出
    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<ApiResponse, ApiError> {
        let token = self.access_token();
        let builder = match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        if REJECTION_STATUSES.contains(&status) {
            if let Ok(envelope) = serde_json::from_str::<ApiResponse>(&body) {
                return Ok(envelope);
            }
        }

        Err(ApiError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    // === 认证 ===

    /// 登录并保存令牌对
    ///
    /// 成功时由匿名态迁移到已认证态；服务端拒绝（success=false）时
    /// 保持匿名态并按正常结果返回
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse, ApiError> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .execute(self.http.post(self.endpoint("/auth/login")).json(&body))
            .await?;

        if response.success {
            let access = response
                .data_str("accessToken")
                .ok_or_else(|| ApiError::Envelope("login response missing accessToken".into()))?;
            let refresh = response
                .data_str("refreshToken")
                .ok_or_else(|| ApiError::Envelope("login response missing refreshToken".into()))?;
            self.session.write().install(TokenPair {
                access_token: access.to_owned(),
                refresh_token: refresh.to_owned(),
            });
        }

        Ok(response)
    }

    /// 用存储的刷新令牌轮换访问令牌
    ///
    /// 匿名状态下直接返回[`ApiError::NoSession`]，不发起网络调用
    pub async fn refresh(&self) -> Result<ApiResponse, ApiError> {
        let refresh_token = self
            .session
            .read()
            .refresh_token()
            .map(str::to_owned)
            .ok_or(ApiError::NoSession)?;

        let body = json!({ "refreshToken": refresh_token });
        let response = self
            .execute(self.http.post(self.endpoint("/auth/refresh")).json(&body))
            .await?;

        if response.success {
            let access = response
                .data_str("accessToken")
                .ok_or_else(|| ApiError::Envelope("refresh response missing accessToken".into()))?
                .to_owned();
            let mut session = self.session.write();
            match response.data_str("refreshToken") {
                // 服务端同时轮换了刷新令牌
                Some(new_refresh) => session.install(TokenPair {
                    access_token: access,
                    refresh_token: new_refresh.to_owned(),
                }),
                None => session.rotate_access(access),
            }
        }

        Ok(response)
    }

    /// 登出
    ///
    /// 本地令牌无条件清除：登出期间的网络失败或异常状态码不会让
    /// 客户端停留在混乱状态，此时返回一个本地合成的成功信封
    pub async fn logout(&self) -> Result<ApiResponse, ApiError> {
        let refresh_token = self.refresh_token();

        let mut builder = self.http.post(self.endpoint("/auth/logout"));
        if let Some(token) = &refresh_token {
            builder = builder.json(&json!({ "refreshToken": token }));
        }

        let result = self.execute(builder).await;
        self.session.write().clear();

        match result {
            Ok(envelope) => Ok(envelope),
            Err(_) => Ok(ApiResponse {
                success: true,
                data: Value::Null,
                message: Some("logout acknowledged client-side".into()),
            }),
        }
    }

    // === 通用HTTP动词 ===

    /// GET请求，支持分页、过滤、排序等查询参数透传
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        self.execute(self.http.get(self.endpoint(path)).query(query))
            .await
    }

    /// POST请求（JSON体）
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(self.http.post(self.endpoint(path)).json(body))
            .await
    }

    /// PUT请求（JSON体）
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(self.http.put(self.endpoint(path)).json(body))
            .await
    }

    /// PATCH请求（JSON体）
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(self.http.patch(self.endpoint(path)).json(body))
            .await
    }

    /// DELETE请求
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.execute(self.http.delete(self.endpoint(path))).await
    }

    // === 用户管理 ===

    /// 创建用户
    pub async fn create_user(&self, user: &SyntheticRecord) -> Result<ApiResponse, ApiError> {
        self.post("/users", user).await
    }

    /// 查询用户列表
    pub async fn get_users(&self, params: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        self.get("/users", params).await
    }

    /// 按ID查询用户
    pub async fn get_user(&self, user_id: &str) -> Result<ApiResponse, ApiError> {
        self.get(&format!("/users/{}", user_id), &[]).await
    }

    /// 更新用户
    pub async fn update_user(
        &self,
        user_id: &str,
        user: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.put(&format!("/users/{}", user_id), user).await
    }

    /// 删除用户
    pub async fn delete_user(&self, user_id: &str) -> Result<ApiResponse, ApiError> {
        self.delete(&format!("/users/{}", user_id)).await
    }

    // === 班级管理 ===

    /// 创建班级
    pub async fn create_class(&self, class: &SyntheticRecord) -> Result<ApiResponse, ApiError> {
        self.post("/classes", class).await
    }

    /// 查询班级列表
    pub async fn get_classes(&self, params: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        self.get("/classes", params).await
    }

    /// 按ID查询班级
    pub async fn get_class(&self, class_id: &str) -> Result<ApiResponse, ApiError> {
        self.get(&format!("/classes/{}", class_id), &[]).await
    }

    /// 更新班级
    pub async fn update_class(
        &self,
        class_id: &str,
        class: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.put(&format!("/classes/{}", class_id), class).await
    }

    /// 删除班级
    pub async fn delete_class(&self, class_id: &str) -> Result<ApiResponse, ApiError> {
        self.delete(&format!("/classes/{}", class_id)).await
    }

    // === 考勤管理 ===

    /// 标记考勤
    pub async fn mark_attendance(
        &self,
        attendance: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.post("/attendance", attendance).await
    }

    /// 查询考勤记录
    pub async fn get_attendance(&self, params: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        self.get("/attendance", params).await
    }

    /// 按班级查询考勤
    pub async fn get_attendance_by_class(
        &self,
        class_id: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        self.get(&format!("/attendance/class/{}", class_id), params)
            .await
    }

    /// 按学生查询考勤
    pub async fn get_attendance_by_student(
        &self,
        student_id: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        self.get(&format!("/attendance/student/{}", student_id), params)
            .await
    }

    // === 作业管理 ===

    /// 创建作业
    pub async fn create_homework(
        &self,
        homework: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.post("/homework", homework).await
    }

    /// 查询作业列表
    pub async fn get_homework(&self, params: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        self.get("/homework", params).await
    }

    /// 按ID查询作业
    pub async fn get_homework_by_id(&self, homework_id: &str) -> Result<ApiResponse, ApiError> {
        self.get(&format!("/homework/{}", homework_id), &[]).await
    }

    /// 更新作业
    pub async fn update_homework(
        &self,
        homework_id: &str,
        homework: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.put(&format!("/homework/{}", homework_id), homework)
            .await
    }

    /// 删除作业
    pub async fn delete_homework(&self, homework_id: &str) -> Result<ApiResponse, ApiError> {
        self.delete(&format!("/homework/{}", homework_id)).await
    }

    // === 通知 ===

    /// 发送通知
    pub async fn send_notification(
        &self,
        notification: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.post("/notifications", notification).await
    }

    /// 查询通知
    pub async fn get_notifications(
        &self,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        self.get("/notifications", params).await
    }

    /// 标记通知为已读
    pub async fn mark_notification_read(
        &self,
        notification_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.put(&format!("/notifications/{}", notification_id), &json!({}))
            .await
    }

    // === 问答 ===

    /// 发送问答消息
    pub async fn send_qa_message(&self, qa: &SyntheticRecord) -> Result<ApiResponse, ApiError> {
        self.post("/qa", qa).await
    }

    /// 查询问答消息
    pub async fn get_qa_messages(&self, params: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        self.get("/qa", params).await
    }

    /// 回复问答消息
    pub async fn reply_to_qa(
        &self,
        qa_id: &str,
        reply: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.put(&format!("/qa/{}/reply", qa_id), reply).await
    }

    // === 投诉 ===

    /// 创建投诉
    pub async fn create_complaint(
        &self,
        complaint: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.post("/complaints", complaint).await
    }

    /// 查询投诉
    pub async fn get_complaints(&self, params: &[(&str, &str)]) -> Result<ApiResponse, ApiError> {
        self.get("/complaints", params).await
    }

    /// 更新投诉
    pub async fn update_complaint(
        &self,
        complaint_id: &str,
        complaint: &SyntheticRecord,
    ) -> Result<ApiResponse, ApiError> {
        self.put(&format!("/complaints/{}", complaint_id), complaint)
            .await
    }

    // === 仪表盘与分析 ===

    /// 按角色查询仪表盘
    ///
    /// 家长角色可附带studentId查询参数
    pub async fn get_dashboard(
        &self,
        role: Role,
        student_id: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("/dashboard/{}", role.as_str());
        match student_id {
            Some(id) => self.get(&path, &[("studentId", id)]).await,
            None => self.get(&path, &[]).await,
        }
    }

    /// 查询分析报表
    pub async fn get_analytics(
        &self,
        kind: AnalyticsKind,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        self.get(&format!("/analytics/{}", kind.as_str()), params)
            .await
    }

    // === 文件 ===

    /// 上传文件
    ///
    /// multipart表单编码，包含file、fileType、description三个部分；
    /// multipart自带带边界的Content-Type，不走默认的JSON头
    pub async fn upload_file(
        &self,
        file_path: &Path,
        file_type: &str,
        description: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let bytes = tokio::fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name))
            .text("fileType", file_type.to_string())
            .text("description", description.unwrap_or_default().to_string());

        self.execute(self.http.post(self.endpoint("/files/upload")).multipart(form))
            .await
    }

    /// 查询文件信息
    pub async fn get_file(&self, file_id: &str) -> Result<ApiResponse, ApiError> {
        self.get(&format!("/files/{}", file_id), &[]).await
    }

    /// 删除文件
    pub async fn delete_file(&self, file_id: &str) -> Result<ApiResponse, ApiError> {
        self.delete(&format!("/files/{}", file_id)).await
    }
}
