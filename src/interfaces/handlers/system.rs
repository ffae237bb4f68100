use actix_web::{web, get, HttpResponse, Responder};
use humantime::format_duration;
use once_cell::sync::Lazy;
use chrono::Utc;
use std::{
    time::Duration,
    sync::{atomic::{AtomicI64, Ordering}, RwLock},
};
use sysinfo::System;
use serde::Serialize;
use crate::{constants::START_TIME, repositories::user::UserRepository, AppState};

const HEALTH_CACHE_SECONDS: i64 = 5;

#[derive(Serialize, Clone, Default)]
struct SystemInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
}

#[derive(Serialize, Clone, Default)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    database: String,
    redis_status: String,
    version: String,
    memory_usage: String,
    system: SystemInfo,
}

static LAST_CHECK: AtomicI64 = AtomicI64::new(0);
static CACHED_STATUS: Lazy<RwLock<HealthCheckResponse>> = Lazy::new(||
    RwLock::new(HealthCheckResponse::default())
);

fn bytes_to(bytes: u64, unit: u32) -> f64 {
    bytes as f64 / 1024f64.powi(unit as i32)
}

async fn build_health_response(state: &AppState) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime_secs = now_utc.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    let mut sys = System::new_all();
    sys.refresh_all();

    let system_info = SystemInfo {
        os: System::name().unwrap_or_else(|| "Unknown".to_string()),
        kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
        hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        cpu_count: sys.cpus().len(),
        memory_total: format!("{:.2} GB", bytes_to(sys.total_memory(), 3)),
    };

    let database = match state.auth_handler.user_repo.check_connection().await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Health check: database unavailable: {}", e);
            "Unavailable"
        }
    };

    let redis_status = match &state.auth_handler.deny_list {
        Some(deny_list) => match deny_list.ping().await {
            Ok(()) => "OK",
            Err(e) => {
                tracing::warn!("Health check: redis unavailable: {}", e);
                "Unavailable"
            }
        },
        None => "Not configured",
    };

    let memory_usage = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or("Unknown".to_string(), |p| format!("{:.2} MB", bytes_to(p.memory(), 2)));

    let status = if database == "OK" { "healthy" } else { "degraded" };

    HealthCheckResponse {
        status: status.to_string(),
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        memory_usage,
        database: database.to_string(),
        redis_status: redis_status.to_string(),
        system: system_info,
    }
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();
    let last = LAST_CHECK.load(Ordering::Relaxed);

    if now - last > HEALTH_CACHE_SECONDS {
        let response = build_health_response(&state).await;

        if let Ok(mut cache) = CACHED_STATUS.write() {
            *cache = response.clone();
            LAST_CHECK.store(now, Ordering::Relaxed);
        }

        return HttpResponse::Ok().json(response);
    }

    match CACHED_STATUS.read() {
        Ok(response) => HttpResponse::Ok().json(response.clone()),
        Err(e) => {
            tracing::warn!("HealthCheck cache lock poisoned: {}", e);
            HttpResponse::Ok().json(build_health_response(&state).await)
        }
    }
}
