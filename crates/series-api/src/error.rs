//! API 에러 응답 타입.
//!
//! 클라이언트에 노출되는 에러는 입력 검증 실패뿐이며, 본문은 다음 형식입니다.
//!
//! ```json
//! { "error": "Symbol parameter is required" }
//! ```

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use series_core::SeriesError;

/// API 에러 응답 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 사람이 읽을 수 있는 에러 메시지
    pub error: String,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 서비스 에러를 HTTP 응답으로 변환합니다.
///
/// 입력 에러는 400, 설정 에러 등 그 외는 500입니다.
pub fn series_error_response(err: SeriesError) -> (StatusCode, Json<ApiErrorResponse>) {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ApiErrorResponse::new(err.to_string())))
}
