//! 서비스 상태 확인.
//!
//! `/health`는 프로세스 생존만 알리고, `/health/ready`는 어떤 데이터 소스로
//! 시리즈를 만들고 있는지와 요청 기간 제한을 함께 보고합니다. 외부 시세 API가
//! 내려가도 시뮬레이션으로 응답하므로 readiness가 외부 API 상태에 따라
//! 바뀌지는 않습니다.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use series_core::DataSource;

use crate::state::AppState;

/// `/health/ready` 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub status: String,
    pub version: String,
    pub uptime_secs: i64,
    /// 서버 시작 시각 (RFC 3339)
    pub started_at: String,
    /// 시작 시 선택된 데이터 소스
    pub data_source: DataSource,
    /// `months` 생략 시 적용되는 기간
    pub default_months: u32,
    /// `months` 상한
    pub max_months: u32,
}

impl ReadinessReport {
    fn from_state(state: &AppState) -> Self {
        Self {
            status: "ready".to_string(),
            version: state.version.clone(),
            uptime_secs: state.uptime_secs(),
            started_at: state.started_at.to_rfc3339(),
            data_source: state.data_source(),
            default_months: state.default_months,
            max_months: state.max_months,
        }
    }
}

/// GET /health
pub async fn liveness() -> &'static str {
    "OK"
}

/// GET /health/ready
pub async fn readiness(State(state): State<Arc<AppState>>) -> Json<ReadinessReport> {
    Json(ReadinessReport::from_state(&state))
}

pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/ready", get(readiness))
}
