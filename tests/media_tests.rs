mod test_utils;

use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use serde_json::{json, Value};
use test_utils::*;

fn png_form(project_id: &str, media_type: &str) -> Form {
    Form::new()
        .text("project_id", project_id.to_string())
        .text("media_type", media_type.to_string())
        .text("caption_en", "HUD overlay")
        .part(
            "file",
            Part::bytes(PNG_BYTES.to_vec())
                .file_name("shot.png")
                .mime_str("image/png")
                .unwrap(),
        )
}

impl TestApp {
    async fn upload(&self, token: &str, form: Form) -> reqwest::Response {
        self.client
            .post(self.url("/api/admin/media"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .unwrap()
    }
}

#[actix_rt::test]
async fn youtube_embed_is_registered() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let id = app.create_project(&token, "MM-01").await;

    let response = app
        .post_admin(
            &token,
            "/api/admin/media",
            &json!({
                "project_id": id,
                "media_type": "youtube",
                "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "caption_en": "Walkthrough",
                "display_order": 3,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["media_type"], "youtube");
    assert_eq!(body["data"]["display_order"], 3);
    assert!(body["data"].get("storage_key").is_none());

    let detail = app.get_json(&format!("/api/projects/{}", id)).await;
    assert_eq!(detail["data"]["media"].as_array().unwrap().len(), 1);
    app.cleanup().await;
}

#[actix_rt::test]
async fn embed_on_wrong_host_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let id = app.create_project(&token, "MM-01").await;

    let response = app
        .post_admin(
            &token,
            "/api/admin/media",
            &json!({
                "project_id": id,
                "media_type": "vimeo",
                "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    app.cleanup().await;
}

#[actix_rt::test]
async fn uploaded_image_is_served_then_deleted() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let id = app.create_project(&token, "MM-01").await;

    let response = app.upload(&token, png_form(&id, "image")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let media_id = body["data"]["id"].as_i64().unwrap();
    let url = body["data"]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/media/"));
    assert!(url.ends_with(".png"));
    assert_eq!(body["data"]["caption_en"], "HUD overlay");

    let response = app.get(&url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    assert!(response.headers()["cache-control"].to_str().unwrap().contains("immutable"));
    assert_eq!(response.bytes().await.unwrap().as_ref(), PNG_BYTES);

    let listed = app.get_json(&format!("/api/media?project_id={}", id)).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let response = app
        .delete_admin(&token, &format!("/api/admin/media/{}", media_id))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get(&url).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete_admin(&token, &format!("/api/admin/media/{}", media_id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    app.cleanup().await;
}

#[actix_rt::test]
async fn content_must_match_declared_type() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let id = app.create_project(&token, "MM-01").await;

    let response = app.upload(&token, png_form(&id, "video")).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let mut entries = tokio::fs::read_dir(app.media_dir()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
    app.cleanup().await;
}

#[actix_rt::test]
async fn upload_for_unknown_project_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app.upload(&token, png_form("ghost", "image")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    app.cleanup().await;
}

#[actix_rt::test]
async fn oversized_upload_is_rejected() {
    let app = TestApp::spawn_with(|config| config.max_upload_bytes = 8).await;
    let token = app.login().await;
    let id = app.create_project(&token, "MM-01").await;

    let response = app.upload(&token, png_form(&id, "image")).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    app.cleanup().await;
}

#[actix_rt::test]
async fn object_keys_are_checked() {
    let app = TestApp::spawn().await;

    let response = app.get("/media/..secret").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/media/missing.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    app.cleanup().await;
}

#[actix_rt::test]
async fn media_routes_require_token() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/api/admin/media"))
        .multipart(png_form("ghost", "image"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    app.cleanup().await;
}

#[actix_rt::test]
async fn sweep_removes_only_unreferenced_objects() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let id = app.create_project(&token, "MM-01").await;

    let response = app.upload(&token, png_form(&id, "image")).await;
    let body: Value = response.json().await.unwrap();
    let url = body["data"]["url"].as_str().unwrap().to_string();

    let orphan = app.media_dir().join("left-behind.png");
    tokio::fs::write(&orphan, PNG_BYTES).await.unwrap();

    let removed = app
        .state
        .media_handler
        .sweep_orphans(std::time::Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(removed, 1);
    assert!(!orphan.exists());
    assert_eq!(app.get(&url).await.status(), StatusCode::OK);
    app.cleanup().await;
}
