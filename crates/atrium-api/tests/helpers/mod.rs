#![allow(dead_code)]

use atrium_api::test_helpers::TestApp;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;

/// Returns the versioned API path: `api_path("/members")` -> `/api/v1/members`.
pub fn api_path(path: &str) -> String {
    format!("{}{}", atrium_api::constants::API_PREFIX, path)
}

/// Test server over in-memory stores, plus the fakes behind it.
pub struct TestContext {
    pub server: TestServer,
    pub app: TestApp,
}

impl TestContext {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.app.editor_token())
    }
}

pub fn setup_test_app() -> TestContext {
    setup_with(TestApp::new())
}

pub fn setup_with(app: TestApp) -> TestContext {
    let server =
        TestServer::new(app.router().into_make_service()).expect("Failed to create test server");
    TestContext { server, app }
}

pub fn jpeg_part(filename: &str) -> Part {
    Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
        .file_name(filename)
        .mime_type("image/jpeg")
}

pub fn pdf_part(filename: &str) -> Part {
    Part::bytes(b"%PDF-1.4\n%test\n".to_vec())
        .file_name(filename)
        .mime_type("application/pdf")
}

pub fn form(fields: &[(&str, &str)]) -> MultipartForm {
    fields
        .iter()
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(name.to_string(), value.to_string())
        })
}
