// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! API客户端错误分类集成测试
//!
//! 验证应用层拒绝按正常结果返回、传输层失败以错误抛出，
//! 以及Bearer头和查询参数的透传

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::helpers;
use edubench::client::{AnalyticsKind, ApiClient, ApiError};
use edubench::generator::{DataGenerator, Role};

#[tokio::test]
async fn test_application_rejection_returns_normally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Email already exists"
        })))
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let user = DataGenerator::new(7).generate_user(Role::Student);
    let response = client.create_user(&user).await.unwrap();
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Email already exists"));
}

#[tokio::test]
async fn test_rejection_status_with_envelope_returns_normally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classes"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "Class already exists"
        })))
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let class = DataGenerator::new(7).generate_class();
    let response = client.create_class(&class).await.unwrap();
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Class already exists"));
}

#[tokio::test]
async fn test_unexpected_status_raises() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let error = client.get_users(&[]).await.unwrap_err();
    match error {
        ApiError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal Server Error"));
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_raises_transport_error() {
    // 必须使用非池化的服务器：池化实例在drop后仍保持监听，无法模拟连接失败
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = ApiClient::new(&uri, Duration::from_secs(2)).unwrap();
    let error = client.get_users(&[]).await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
    assert!(!error.is_session_error());
}

#[tokio::test]
async fn test_invalid_base_url_rejected_locally() {
    let error = ApiClient::new("not a url", Duration::from_secs(2)).unwrap_err();
    assert!(matches!(error, ApiError::InvalidBaseUrl(_)));
}

#[tokio::test]
async fn test_bearer_header_attached_after_login() {
    let server = MockServer::start().await;
    helpers::mount_login(&server, None).await;
    Mock::given(method("GET"))
        .and(path("/classes"))
        .and(header("Authorization", "Bearer access-token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    client.login("admin@school.com", "admin123").await.unwrap();
    let response = client.get_classes(&[]).await.unwrap();
    assert!(response.success);
}

#[tokio::test]
async fn test_query_params_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param("role", "student"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let response = client
        .get_users(&[("page", "2"), ("limit", "10"), ("role", "student")])
        .await
        .unwrap();
    assert!(response.success);
}

#[tokio::test]
async fn test_dashboard_and_analytics_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/parent"))
        .and(query_param("studentId", "stu-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analytics/attendance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let response = client.get_dashboard(Role::Parent, Some("stu-1")).await.unwrap();
    assert!(response.success);
    let response = client
        .get_analytics(AnalyticsKind::Attendance, &[])
        .await
        .unwrap();
    assert!(response.success);
}

#[tokio::test]
async fn test_notification_read_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/notifications/notif-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let response = client.mark_notification_read("notif-1").await.unwrap();
    assert!(response.success);
}
