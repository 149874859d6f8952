// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 令牌生命周期集成测试
//!
//! 针对wiremock桩服务验证登录、刷新、登出的状态迁移

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::helpers;
use edubench::client::ApiError;

#[tokio::test]
async fn test_login_installs_token_pair() {
    let server = MockServer::start().await;
    helpers::mount_login(&server, None).await;
    let client = helpers::client_for(&server);

    assert!(!client.is_authenticated());

    let response = client.login("student@school.com", "student123").await.unwrap();
    assert!(response.success);
    assert!(client.is_authenticated());
    assert_eq!(client.access_token().as_deref(), Some("access-token-1"));
    assert_eq!(client.refresh_token().as_deref(), Some("refresh-token-1"));
}

#[tokio::test]
async fn test_rejected_login_stays_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let response = client.login("student@school.com", "wrong").await.unwrap();
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Invalid credentials"));
    assert!(!client.is_authenticated());
    assert!(client.access_token().is_none());
}

#[tokio::test]
async fn test_refresh_while_anonymous_makes_no_network_call() {
    let server = MockServer::start().await;
    // 若客户端在匿名状态下仍访问刷新端点，expect(0)会在校验时失败
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::ok_envelope()))
        .expect(0)
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let error = client.refresh().await.unwrap_err();
    assert!(matches!(error, ApiError::NoSession));
    assert!(error.is_session_error());
}

#[tokio::test]
async fn test_refresh_rotates_access_token() {
    let server = MockServer::start().await;
    helpers::mount_login(&server, None).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "accessToken": "access-token-2" }
        })))
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    client.login("student@school.com", "student123").await.unwrap();
    let response = client.refresh().await.unwrap();

    assert!(response.success);
    assert_eq!(client.access_token().as_deref(), Some("access-token-2"));
    // 服务端未轮换刷新令牌时本地保留原值
    assert_eq!(client.refresh_token().as_deref(), Some("refresh-token-1"));
}

#[tokio::test]
async fn test_logout_clears_tokens_on_server_error() {
    let server = MockServer::start().await;
    helpers::mount_login(&server, None).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    client.login("student@school.com", "student123").await.unwrap();
    assert!(client.is_authenticated());

    let response = client.logout().await.unwrap();
    assert!(response.success);
    assert!(!client.is_authenticated());
    assert!(client.access_token().is_none());
}

#[tokio::test]
async fn test_logout_clears_tokens_when_server_unreachable() {
    let server = MockServer::start().await;
    helpers::mount_login(&server, None).await;
    let client = helpers::client_for(&server);

    client.login("student@school.com", "student123").await.unwrap();
    drop(server);

    let response = client.logout().await.unwrap();
    assert!(response.success);
    assert!(!client.is_authenticated());
}
