//! 주간 시세 시리즈 요청/응답 타입.
//!
//! - `SeriesRequest` - 검증된 조회 요청 (심볼, 개월 수)
//! - `PricePoint` - 날짜별 종가
//! - `SeriesResult` - 날짜/가격/수익률이 인덱스 정렬된 응답

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// 한 달에 해당하는 주 수 근사값.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// 기본 조회 기간 (개월).
pub const DEFAULT_MONTHS: u32 = 4;

/// 개월 수에 해당하는 최대 주간 포인트 수.
///
/// `ceil(months * 4.33)`
pub fn weeks_for_months(months: u32) -> usize {
    (f64::from(months) * WEEKS_PER_MONTH).ceil() as usize
}

/// 느슨한 정수 변환.
///
/// 앞쪽 공백을 무시하고 선택적 부호와 연속된 숫자만 읽습니다.
/// 숫자로 시작하지 않으면 0을 반환합니다 (`"abc"` → 0, `"3m"` → 3, `"1.9"` → 1).
pub fn parse_loose_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else {
            break;
        };
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }

    if negative {
        -value
    } else {
        value
    }
}

/// 검증된 시리즈 조회 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    /// 요청 심볼 (별칭 변환 전)
    pub symbol: String,
    /// 조회 기간 (개월)
    pub months: u32,
}

impl SeriesRequest {
    /// 새 요청을 생성합니다.
    ///
    /// # Errors
    /// 심볼이 비어 있으면 `SeriesError::InvalidInput`을 반환합니다.
    pub fn new(symbol: impl Into<String>, months: u32) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(SeriesError::missing_symbol());
        }
        Ok(Self { symbol, months })
    }

    /// 쿼리 파라미터 원문에서 요청을 생성합니다.
    ///
    /// `months`가 없으면 `default_months`, 있으면 느슨한 정수 변환 후
    /// `0..=max_months` 범위로 제한합니다.
    pub fn from_query(
        symbol: Option<&str>,
        months: Option<&str>,
        default_months: u32,
        max_months: u32,
    ) -> Result<Self, SeriesError> {
        let symbol = symbol
            .filter(|s| !s.is_empty())
            .ok_or_else(SeriesError::missing_symbol)?;
        let months = match months {
            Some(raw) => parse_loose_int(raw).clamp(0, i64::from(max_months)) as u32,
            None => default_months.min(max_months),
        };
        Self::new(symbol, months)
    }

    /// 최대 주간 포인트 수.
    pub fn weeks_needed(&self) -> usize {
        weeks_for_months(self.months)
    }
}

/// 날짜별 종가.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// 연속된 가격 간 변화율(%)을 계산합니다.
///
/// 첫 값은 비교 대상이 없으므로 0입니다.
pub fn percent_returns(prices: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(prices.len());
    for (i, price) in prices.iter().enumerate() {
        if i == 0 {
            returns.push(0.0);
        } else {
            returns.push((price / prices[i - 1] - 1.0) * 100.0);
        }
    }
    returns
}

/// 시리즈 응답.
///
/// `dates`, `prices`, `returns`는 길이가 같고 오래된 순서로 정렬됩니다.
///
/// ```json
/// {
///   "dates": ["2024-05-03", "2024-05-10"],
///   "prices": [812.4, 820.1],
///   "returns": [0, 0.9478],
///   "symbol": "BAAVGP",
///   "simulated": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResult {
    /// ISO 8601 날짜 (YYYY-MM-DD)
    pub dates: Vec<String>,
    /// 주간 종가
    pub prices: Vec<f64>,
    /// 직전 포인트 대비 수익률 (%)
    pub returns: Vec<f64>,
    /// 요청 심볼 (별칭 변환 전)
    pub symbol: String,
    /// 시뮬레이션 데이터 여부 (시뮬레이션일 때만 포함)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulated: Option<bool>,
    /// 대체 사유 (fallback 발생 시에만 포함)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SeriesResult {
    /// 오래된 순서의 포인트 목록에서 응답을 생성합니다.
    pub fn from_points(symbol: impl Into<String>, points: &[PricePoint]) -> Self {
        let dates = points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect();
        let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
        let returns = percent_returns(&prices);

        Self {
            dates,
            prices,
            returns,
            symbol: symbol.into(),
            simulated: None,
            note: None,
        }
    }

    /// 시뮬레이션 데이터로 표시합니다.
    #[must_use]
    pub fn mark_simulated(mut self) -> Self {
        self.simulated = Some(true);
        self
    }

    /// 대체 사유를 추가합니다.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_simulated(&self) -> bool {
        self.simulated.unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
