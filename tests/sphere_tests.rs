mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

fn norm(position: &Value) -> f64 {
    position
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_f64().unwrap().powi(2))
        .sum::<f64>()
        .sqrt()
}

#[actix_rt::test]
async fn defaults_served_before_any_save() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    app.create_project(&token, "MM-01").await;
    app.create_project(&token, "MM-02").await;
    app.create_project(&token, "MM-03").await;

    let body = app.get_json("/api/sphere-config").await;
    let data = &body["data"];

    assert_eq!(data["config"]["radius"], 2.0);
    assert_eq!(data["updated_at"], Value::Null);

    let nodes = data["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    for node in nodes {
        assert!((norm(&node["position"]) - 2.0).abs() < 1e-9);
    }
    app.cleanup().await;
}

#[actix_rt::test]
async fn saved_config_is_returned() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    app.create_project(&token, "MM-01").await;

    let response = app
        .post_admin(
            &token,
            "/api/admin/sphere-config",
            &json!({ "radius": 5.0, "auto_rotate": false }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = app.get_json("/api/sphere-config").await;
    let data = &body["data"];
    assert_eq!(data["config"]["radius"], 5.0);
    assert_eq!(data["config"]["auto_rotate"], false);
    assert_eq!(data["config"]["point_size"], 0.08);
    assert!(data["updated_at"].is_string());
    assert!((norm(&data["nodes"][0]["position"]) - 5.0).abs() < 1e-9);
    app.cleanup().await;
}

#[actix_rt::test]
async fn featured_only_limits_nodes() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let mut featured = project_body("MM-01");
    featured["featured"] = json!(true);
    app.post_admin(&token, "/api/admin/projects", &featured).await;
    app.create_project(&token, "MM-02").await;

    app.post_admin(&token, "/api/admin/sphere-config", &json!({ "featured_only": true }))
        .await;

    let body = app.get_json("/api/sphere-config").await;
    let nodes = body["data"]["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["code"], "MM-01");
    app.cleanup().await;
}

#[actix_rt::test]
async fn invalid_config_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .post_admin(
            &token,
            "/api/admin/sphere-config",
            &json!({ "radius": 100.0, "highlight_color": "pink" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["highlight_color", "radius"]);

    let body = app.get_json("/api/sphere-config").await;
    assert_eq!(body["data"]["config"]["radius"], 2.0);
    app.cleanup().await;
}

#[actix_rt::test]
async fn social_image_renders_svg() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .post_admin(
            &token,
            "/api/admin/social-image",
            &json!({
                "title": "Sphere <HUD>",
                "subtitle": "Fibonacci lattice of every project",
                "project_code": "MM-01",
                "format": "square",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/svg+xml");

    let svg = response.text().await.unwrap();
    assert!(svg.contains(r#"width="1080""#));
    assert!(svg.contains("Sphere &lt;HUD&gt;"));
    assert!(svg.contains("MM-01"));
    app.cleanup().await;
}

#[actix_rt::test]
async fn social_image_requires_title() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .post_admin(&token, "/api/admin/social-image", &json!({ "subtitle": "No title" }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_admin(&token, "/api/admin/social-image", &json!({ "title": "    " }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    app.cleanup().await;
}
