mod helpers;

use atrium_api::test_helpers::{Call, MockBlobStore, TestApp};
use atrium_storage::MediaFolder;
use axum::http::StatusCode;
use helpers::{api_path, form, jpeg_part, pdf_part, setup_test_app, setup_with};

#[tokio::test]
async fn test_create_testimonial_with_photo() {
    let ctx = setup_with(TestApp::with_blobs(|log| {
        MockBlobStore::new(log).with_keys(&["p1.jpg"])
    }));
    let auth = ctx.bearer();

    let response = ctx
        .client()
        .post(&api_path("/testimonials"))
        .add_header("Authorization", auth)
        .multipart(
            form(&[("name", "Ada"), ("content", "Wonderful team"), ("rating", "5")])
                .add_part("photo", jpeg_part("ada.jpg")),
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["photo_url"], "https://cdn.test/testimonials/p1.jpg");
    assert_eq!(
        ctx.app.log.calls(),
        vec![Call::blob_put("testimonials", "p1.jpg"), Call::RecordCreate]
    );
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let ctx = setup_test_app();

    let response = ctx
        .client()
        .post(&api_path("/members"))
        .multipart(form(&[("name", "Grace"), ("position", "Chair")]))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(ctx.app.log.calls().is_empty());
}

#[tokio::test]
async fn test_create_persist_failure_returns_500_and_discards_upload() {
    let ctx = setup_with(TestApp::with_blobs(|log| {
        MockBlobStore::new(log).with_keys(&["p1.jpg"])
    }));
    ctx.app.testimonials.fail_create(true);
    let auth = ctx.bearer();

    let response = ctx
        .client()
        .post(&api_path("/testimonials"))
        .add_header("Authorization", auth)
        .multipart(
            form(&[("name", "Ada"), ("content", "Wonderful team")])
                .add_part("photo", jpeg_part("ada.jpg")),
        )
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "PERSIST_FAILED");
    assert_eq!(
        ctx.app.log.blob_deletes(),
        vec![Call::blob_delete("testimonials", "p1.jpg")]
    );
}

#[tokio::test]
async fn test_upload_failure_returns_502() {
    let ctx = setup_test_app();
    ctx.app.blobs.fail_puts();
    let auth = ctx.bearer();

    let response = ctx
        .client()
        .post(&api_path("/ads"))
        .add_header("Authorization", auth)
        .multipart(
            form(&[("title", "Fair"), ("placement", "sidebar")])
                .add_part("image", jpeg_part("fair.jpg")),
        )
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UPLOAD_FAILED");
    assert!(ctx.app.ads.is_empty());
}

#[tokio::test]
async fn test_rejects_disallowed_file_type() {
    let ctx = setup_test_app();
    let auth = ctx.bearer();

    let response = ctx
        .client()
        .post(&api_path("/members"))
        .add_header("Authorization", auth)
        .multipart(
            form(&[("name", "Grace"), ("position", "Chair")])
                .add_part("photo", pdf_part("cv.pdf")),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.app.log.calls().is_empty());
}

#[tokio::test]
async fn test_rejects_unknown_file_field() {
    let ctx = setup_test_app();
    let auth = ctx.bearer();

    let response = ctx
        .client()
        .post(&api_path("/members"))
        .add_header("Authorization", auth)
        .multipart(
            form(&[("name", "Grace"), ("position", "Chair")])
                .add_part("logo", jpeg_part("logo.jpg")),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.app.members.is_empty());
}

#[tokio::test]
async fn test_update_member_replaces_photo() {
    let ctx = setup_with(TestApp::with_blobs(|log| {
        MockBlobStore::new(log).with_keys(&["old.jpg", "new.jpg"])
    }));
    let auth = ctx.bearer();

    let created = ctx
        .client()
        .post(&api_path("/members"))
        .add_header("Authorization", auth.clone())
        .multipart(
            form(&[("name", "Grace"), ("position", "Treasurer")])
                .add_part("photo", jpeg_part("a.jpg")),
        )
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();
    ctx.app.log.clear();

    let response = ctx
        .client()
        .patch(&api_path(&format!("/members/{}", id)))
        .add_header("Authorization", auth)
        .multipart(form(&[("position", "Chair")]).add_part("photo", jpeg_part("b.jpg")))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["position"], "Chair");
    assert_eq!(body["photo_url"], "https://cdn.test/members/new.jpg");
    assert_eq!(
        ctx.app.log.calls(),
        vec![
            Call::blob_put("members", "new.jpg"),
            Call::RecordUpdate { id },
            Call::blob_delete("members", "old.jpg"),
        ]
    );
    assert!(!ctx.app.blobs.contains(&MediaFolder::Members, "old.jpg"));
}

#[tokio::test]
async fn test_update_remove_photo() {
    let ctx = setup_with(TestApp::with_blobs(|log| {
        MockBlobStore::new(log).with_keys(&["m.jpg"])
    }));
    let auth = ctx.bearer();

    let created = ctx
        .client()
        .post(&api_path("/members"))
        .add_header("Authorization", auth.clone())
        .multipart(
            form(&[("name", "Grace"), ("position", "Treasurer")])
                .add_part("photo", jpeg_part("a.jpg")),
        )
        .await;
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let response = ctx
        .client()
        .patch(&api_path(&format!("/members/{}", id)))
        .add_header("Authorization", auth)
        .multipart(form(&[("remove_photo", "true")]))
        .await;

    response.assert_status_ok();
    assert!(response.json::<serde_json::Value>()["photo_url"].is_null());
    assert_eq!(
        ctx.app.log.blob_deletes(),
        vec![Call::blob_delete("members", "m.jpg")]
    );
}

#[tokio::test]
async fn test_delete_removes_record_then_blob() {
    let ctx = setup_with(TestApp::with_blobs(|log| {
        MockBlobStore::new(log).with_keys(&["x.jpg"])
    }));
    let auth = ctx.bearer();

    let created = ctx
        .client()
        .post(&api_path("/ads"))
        .add_header("Authorization", auth.clone())
        .multipart(
            form(&[("title", "Fair"), ("placement", "sidebar")])
                .add_part("image", jpeg_part("fair.jpg")),
        )
        .await;
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();
    ctx.app.log.clear();

    let response = ctx
        .client()
        .delete(&api_path(&format!("/ads/{}", id)))
        .add_header("Authorization", auth)
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(
        ctx.app.log.calls(),
        vec![Call::RecordDelete { id }, Call::blob_delete("ads", "x.jpg")]
    );

    let missing = ctx
        .client()
        .get(&api_path(&format!("/ads/{}", id)))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_failure_keeps_blob() {
    let ctx = setup_with(TestApp::with_blobs(|log| {
        MockBlobStore::new(log).with_keys(&["x.jpg"])
    }));
    let auth = ctx.bearer();

    let created = ctx
        .client()
        .post(&api_path("/ads"))
        .add_header("Authorization", auth.clone())
        .multipart(
            form(&[("title", "Fair"), ("placement", "sidebar")])
                .add_part("image", jpeg_part("fair.jpg")),
        )
        .await;
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();
    ctx.app.ads.fail_delete(true);

    let response = ctx
        .client()
        .delete(&api_path(&format!("/ads/{}", id)))
        .add_header("Authorization", auth)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(ctx.app.log.blob_deletes().is_empty());
    assert!(ctx.app.blobs.contains(&MediaFolder::Ads, "x.jpg"));
}

#[tokio::test]
async fn test_get_missing_member_is_404() {
    let ctx = setup_test_app();

    let response = ctx.client().get(&api_path("/members/999")).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_document_requires_file() {
    let ctx = setup_test_app();
    let auth = ctx.bearer();

    let response = ctx
        .client()
        .post(&api_path("/documents"))
        .add_header("Authorization", auth)
        .multipart(form(&[("title", "Annual report"), ("document_type", "report")]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.app.documents.is_empty());
}

#[tokio::test]
async fn test_document_upload_lists_publicly() {
    let ctx = setup_with(TestApp::with_blobs(|log| {
        MockBlobStore::new(log).with_keys(&["r.pdf"])
    }));
    let auth = ctx.bearer();

    ctx.client()
        .post(&api_path("/documents"))
        .add_header("Authorization", auth)
        .multipart(
            form(&[("title", "Annual report"), ("document_type", "report")])
                .add_part("file", pdf_part("annual.pdf")),
        )
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx.client().get(&api_path("/documents")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let docs = body.as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["document_type"], "report");
    assert_eq!(docs[0]["original_filename"], "annual.pdf");
    assert_eq!(docs[0]["file_url"], "https://cdn.test/documents/report/r.pdf");
}
