// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 文件上传集成测试
//!
//! 验证multipart编码的表单部分以及上传不走默认JSON头

use serde_json::json;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::helpers;
use edubench::client::ApiError;

#[tokio::test]
async fn test_upload_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": "file-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"homework submission body").unwrap();

    let response = client
        .upload_file(file.path(), "homework", Some("Math assignment"))
        .await
        .unwrap();
    assert!(response.success);
    assert_eq!(response.data_str("id"), Some("file-1"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);

    // multipart体自带边界和各部分的Content-Disposition头
    assert!(body.contains("Content-Disposition: form-data"));
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("name=\"fileType\""));
    assert!(body.contains("name=\"description\""));
    assert!(body.contains("homework submission body"));
    assert!(body.contains("Math assignment"));
}

#[tokio::test]
async fn test_upload_missing_file_raises_locally() {
    let server = MockServer::start().await;
    // 文件读取失败时不应访问网络
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::ok_envelope()))
        .expect(0)
        .mount(&server)
        .await;
    let client = helpers::client_for(&server);

    let error = client
        .upload_file(std::path::Path::new("/nonexistent/upload.pdf"), "homework", None)
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Io(_)));
}
