//! 주간 시세 데이터 소스.
//!
//! 이 crate는 다음을 제공합니다:
//! - `WeeklySeriesSource`: 외부 주간 시세 조회 인터페이스
//! - Alpha Vantage `TIME_SERIES_WEEKLY` 클라이언트
//! - 심볼 시드 기반 결정적 시뮬레이터
//! - `SeriesProvider`: 데이터 소스 선택 및 시뮬레이션 대체(fallback)

pub mod alphavantage;
pub mod error;
pub mod provider;
pub mod simulated;
pub mod source;

pub use alphavantage::AlphaVantageClient;
pub use error::FetchError;
pub use provider::SeriesProvider;
pub use simulated::{simulate_points, simulate_series, symbol_checksum, SimulationParams};
pub use source::WeeklySeriesSource;
