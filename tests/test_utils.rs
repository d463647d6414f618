#![allow(dead_code)]

use std::{net::TcpListener, path::PathBuf, sync::Arc, time::Duration};

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use marcomotion_api::{
    db::sqlite::{create_pool, run_migrations},
    middlewares::auth::AuthMiddleware,
    routes::{config_extractors, configure_routes},
    settings::AppConfig,
    storage::local::LocalMediaStorage,
    AppState,
};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

pub const ADMIN_USERNAME: &str = "marco";
pub const ADMIN_PASSWORD: &str = "violet-Otter-glides-9";

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub address: String,
    pub db_pool: SqlitePool,
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let media_dir = std::env::temp_dir().join(format!("marcomotion-test-{}", Uuid::new_v4()));
        let mut config = AppConfig::for_testing(media_dir);
        customize(&mut config);

        let db_pool = create_pool(&config.database_url)
            .await
            .expect("Failed to create test DB pool");
        run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let storage = LocalMediaStorage::new(&config.media_dir, &config.media_base_url);
        storage.init().await.expect("Failed to create media dir");

        let state = web::Data::new(AppState::new(&config, db_pool.clone(), Arc::new(storage)));
        state
            .auth_handler
            .ensure_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .expect("Failed to seed admin");

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server_state = state.clone();
        let max_upload_bytes = config.max_upload_bytes;
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .configure(config_extractors(max_upload_bytes))
                .wrap(AuthMiddleware)
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(&address).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            state,
            address,
            db_pool,
            client,
            config,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn media_dir(&self) -> PathBuf {
        self.config.media_dir.clone()
    }

    pub async fn login(&self) -> String {
        let response = self
            .client
            .post(self.url("/api/admin/auth/login"))
            .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn get_json(&self, path: &str) -> Value {
        self.get(path).await.json().await.unwrap()
    }

    pub async fn post_admin(&self, token: &str, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn put_admin(&self, token: &str, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete_admin(&self, token: &str, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap()
    }

    /// Creates a project and returns its id.
    pub async fn create_project(&self, token: &str, code: &str) -> String {
        let response = self.post_admin(token, "/api/admin/projects", &project_body(code)).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_log(&self, token: &str, project_id: &str, entry_type: &str) -> Value {
        let response = self
            .post_admin(
                token,
                "/api/admin/logs",
                &json!({
                    "project_id": project_id,
                    "entry_type": entry_type,
                    "one_liner": format!("{} entry", entry_type),
                }),
            )
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.unwrap()
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.config.media_dir).await;
    }
}

pub fn project_body(code: &str) -> Value {
    json!({
        "code": code,
        "name_en": format!("Project {}", code),
        "name_es": format!("Proyecto {}", code),
        "description_en": "An experiment in motion",
        "category": "web",
        "tech_stack": ["Rust", "Three.js"],
        "tags": ["webgl", "hud"],
    })
}

/// Just enough of a PNG for type sniffing.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];
