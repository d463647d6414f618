use std::time::{Duration, Instant};

use actix_web::{web, Responder};
use chrono::Utc;
use humantime::format_duration;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use sysinfo::System;
use tracing::instrument;

use crate::{
    constants::START_TIME,
    entities::api::ApiResponse,
    repositories::{dev_log::DevLogRepository, project::ProjectRepository},
    use_cases::extractors::AdminClaims,
    AppState,
};

const CACHE_TTL: Duration = Duration::from_secs(5);

#[derive(Serialize, Clone)]
struct HostInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total_mb: u64,
}

#[derive(Serialize, Clone)]
struct DatabaseStatus {
    reachable: bool,
    latency_ms: Option<u128>,
    dev_logs: Option<i64>,
}

#[derive(Serialize, Clone)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    uptime: String,
    started_at: String,
    checked_at: String,
    database: DatabaseStatus,
    tracked_login_clients: usize,
    process_memory_mb: Option<u64>,
    host: HostInfo,
}

static LAST_REPORT: Lazy<RwLock<Option<(Instant, HealthReport)>>> = Lazy::new(|| RwLock::new(None));

async fn probe_database(state: &AppState) -> DatabaseStatus {
    let started = Instant::now();
    if let Err(e) = state.project_handler.project_repo.check_connection().await {
        tracing::warn!("Health check database ping failed: {}", e);
        return DatabaseStatus { reachable: false, latency_ms: None, dev_logs: None };
    }
    let latency_ms = started.elapsed().as_millis();

    DatabaseStatus {
        reachable: true,
        latency_ms: Some(latency_ms),
        dev_logs: state.log_handler.log_repo.count_logs().await.ok(),
    }
}

fn host_snapshot() -> (HostInfo, Option<u64>) {
    let mut sys = System::new_all();
    sys.refresh_all();

    let process_memory_mb = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map(|p| p.memory() / 1024 / 1024);

    let host = HostInfo {
        os: System::name().unwrap_or_else(|| "unknown".into()),
        kernel: System::kernel_version().unwrap_or_else(|| "unknown".into()),
        hostname: System::host_name().unwrap_or_else(|| "unknown".into()),
        cpu_count: sys.cpus().len(),
        memory_total_mb: sys.total_memory() / 1024 / 1024,
    };
    (host, process_memory_mb)
}

async fn build_report(state: &AppState) -> HealthReport {
    let now = Utc::now();
    let uptime = (now - *START_TIME).to_std().unwrap_or_default();
    let database = probe_database(state).await;
    let (host, process_memory_mb) = host_snapshot();

    HealthReport {
        status: if database.reachable { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_duration(Duration::from_secs(uptime.as_secs())).to_string(),
        started_at: START_TIME.to_rfc3339(),
        checked_at: now.to_rfc3339(),
        database,
        tracked_login_clients: state.auth_handler.limiter.tracked_clients(),
        process_memory_mb,
        host,
    }
}

/// Service health for the admin console. Reports are reused for a few
/// seconds since collecting host info is slow.
#[instrument(skip(claims, state), fields(admin = %claims.0.sub))]
pub async fn admin_health_check(claims: AdminClaims, state: web::Data<AppState>) -> impl Responder {
    let cached = LAST_REPORT
        .read()
        .as_ref()
        .filter(|(at, _)| at.elapsed() < CACHE_TTL)
        .map(|(_, report)| report.clone());

    let report = match cached {
        Some(report) => report,
        None => {
            let report = build_report(&state).await;
            *LAST_REPORT.write() = Some((Instant::now(), report.clone()));
            report
        }
    };

    ApiResponse::ok(report)
}
