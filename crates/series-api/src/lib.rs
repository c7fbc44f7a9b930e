//! 주간 시세 시리즈 REST API.
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트와 라우터 구성
//! - [`error`]: API 에러 응답

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult};
pub use routes::*;
pub use state::AppState;

#[cfg(test)]
pub use state::create_test_state;
