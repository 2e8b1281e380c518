//! Health check endpoint
//!
//! `GET <api-prefix>/health` reports process uptime plus host diagnostics.
//! The handler keeps the uniform `Result<_, AppError>` contract even though
//! collecting the report cannot currently fail.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use sysinfo::System;

/// Wire shape of the health report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub uptime: f64,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub memory_usage: MemoryUsage,
    pub cpu_usage: f32,
    pub hostname: String,
    pub platform_info: PlatformInfo,
}

/// Resident and virtual memory of this process, in bytes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub rss: u64,
    pub virtual_memory: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub platform: String,
    pub release: String,
    pub kernel: String,
}

pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthReport>, AppError> {
    Ok(Json(collect_report(&state)))
}

fn collect_report(state: &AppState) -> HealthReport {
    let mut sys = System::new();
    sys.refresh_cpu_usage();

    let memory_usage = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| {
            sys.refresh_process(pid);
            sys.process(pid).map(|process| MemoryUsage {
                rss: process.memory(),
                virtual_memory: process.virtual_memory(),
            })
        })
        .unwrap_or(MemoryUsage {
            rss: 0,
            virtual_memory: 0,
        });

    HealthReport {
        uptime: state.started_at.elapsed().as_secs_f64(),
        message: "OK",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        memory_usage,
        cpu_usage: sys.global_cpu_info().cpu_usage(),
        hostname: System::host_name().unwrap_or_default(),
        platform_info: PlatformInfo {
            platform: System::name().unwrap_or_default(),
            release: System::os_version().unwrap_or_default(),
            kernel: System::kernel_version().unwrap_or_default(),
        },
    }
}
