//! 시리즈 서비스의 에러 타입.

use thiserror::Error;

/// 심볼 누락 시 클라이언트에 반환되는 메시지.
pub const MISSING_SYMBOL_MESSAGE: &str = "Symbol parameter is required";

/// 핵심 서비스 에러.
///
/// 외부 시세 API 실패는 시뮬레이션으로 복구되므로 여기에 포함되지 않습니다.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// 잘못된 클라이언트 입력
    #[error("{0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 서비스 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, SeriesError>;

impl SeriesError {
    /// 심볼 누락 에러.
    pub fn missing_symbol() -> Self {
        SeriesError::InvalidInput(MISSING_SYMBOL_MESSAGE.to_string())
    }

    /// 클라이언트 입력 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SeriesError::InvalidInput(_))
    }
}

impl From<config::ConfigError> for SeriesError {
    fn from(err: config::ConfigError) -> Self {
        SeriesError::Config(err.to_string())
    }
}
