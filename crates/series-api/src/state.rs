//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 요청 간 공유되는 값은 모두 읽기 전용입니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use series_core::{DataConfig, DataSource};
use series_data::SeriesProvider;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 시리즈 제공자 (외부 조회 / 시뮬레이션)
    pub provider: Arc<SeriesProvider>,

    /// `months` 미지정 시 기본값
    pub default_months: u32,

    /// 허용 최대 개월 수
    pub max_months: u32,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(provider: SeriesProvider, data: &DataConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            default_months: data.default_months,
            max_months: data.max_months,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 설정된 데이터 소스.
    pub fn data_source(&self) -> DataSource {
        self.provider.data_source()
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}

/// 시뮬레이션 제공자와 기본 설정으로 구성된 테스트용 상태.
#[cfg(test)]
pub fn create_test_state() -> AppState {
    AppState::new(SeriesProvider::simulated(), &DataConfig::default())
}
