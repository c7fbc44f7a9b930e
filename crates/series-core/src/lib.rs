//! # Series Core
//!
//! 주간 시세 시리즈 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 서비스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 요청/응답 시리즈 타입 (`SeriesRequest`, `SeriesResult`)
//! - 데이터 소스 선택 (`DataSource`)
//! - 심볼 별칭 변환 (`SymbolResolver`)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod symbol;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use symbol::SymbolResolver;
pub use types::*;
