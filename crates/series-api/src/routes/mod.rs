//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/v1/series` - 주간 시세 시리즈 조회

pub mod health;
pub mod series;

pub use health::{health_router, ReadinessReport};
pub use series::{series_router, SeriesQuery};

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// 전체 API 라우터 생성 (상태 미주입).
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new().merge(health_router()).merge(series_router())
}

/// CORS 미들웨어 구성.
///
/// 브라우저 차트 클라이언트가 어느 origin에서든 GET으로 호출할 수 있어야 합니다.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// 미들웨어까지 포함한 최종 라우터 생성.
///
/// # 인자
/// * `state` - 공유 상태
/// * `request_timeout` - 요청 전체 타임아웃 (초과 시 408)
pub fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors_layer())
}
