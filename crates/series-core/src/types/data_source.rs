//! 시세 데이터 소스 선택.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 시리즈를 생성할 데이터 소스.
///
/// 서비스 시작 시 설정으로 한 번 결정되며 요청마다 바뀌지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// 외부 시세 API 조회 (실패 시 시뮬레이션으로 대체)
    Live,
    /// 심볼 기반 결정적 시뮬레이션
    #[default]
    Simulated,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live => write!(f, "live"),
            DataSource::Simulated => write!(f, "simulated"),
        }
    }
}

impl std::str::FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" | "real" => Ok(Self::Live),
            "simulated" | "mock" => Ok(Self::Simulated),
            _ => Err(format!("Unknown data source: {}", s)),
        }
    }
}
