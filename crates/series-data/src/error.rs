//! 외부 시세 조회 오류 타입.
//!
//! 모든 변형은 시뮬레이션 데이터로 복구되며, `fallback_note`가
//! 응답에 포함될 사유 문구를 만듭니다.

use thiserror::Error;

/// 제공자 응답에 시계열이 없을 때의 기본 사유.
pub const NO_WEEKLY_SERIES_MESSAGE: &str = "No weekly time series data available";

/// 외부 시세 조회 오류.
#[derive(Debug, Error)]
pub enum FetchError {
    /// 네트워크 실패, 타임아웃, 비정상 상태 코드, 빈 응답
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    /// 제공자 에러/안내 메시지 또는 시계열 누락
    #[error("Malformed upstream payload: {0}")]
    Malformed(String),

    /// 필터링 후 유효한 포인트 없음
    #[error("No valid data points from upstream")]
    NoValidData,
}

impl FetchError {
    /// 응답 `note` 필드에 들어갈 사유 문구.
    pub fn fallback_note(&self) -> String {
        match self {
            FetchError::Unavailable(_) => "Using simulated data due to API error".to_string(),
            FetchError::Malformed(reason) => {
                format!("Using simulated data due to API error: {}", reason)
            }
            FetchError::NoValidData => {
                "Using simulated data due to no valid data from API".to_string()
            }
        }
    }

    /// 로그용 분류 이름.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Unavailable(_) => "upstream_unavailable",
            FetchError::Malformed(_) => "upstream_malformed",
            FetchError::NoValidData => "no_valid_data",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Unavailable(format!("request timeout: {}", err))
        } else if err.is_connect() {
            FetchError::Unavailable(format!("connection failed: {}", err))
        } else {
            FetchError::Unavailable(err.to_string())
        }
    }
}
