//! Alpha Vantage 주간 시세 클라이언트.
//!
//! `TIME_SERIES_WEEKLY` 함수를 호출하고 응답을 정규화합니다.
//!
//! # 응답 형식
//!
//! ```json
//! {
//!   "Meta Data": { ... },
//!   "Weekly Time Series": {
//!     "2024-06-14": { "1. open": "...", "4. close": "512.0000", ... }
//!   }
//! }
//! ```
//!
//! 오류나 요청 한도 초과 시에는 `"Error Message"`, `"Information"`,
//! `"Note"` 중 하나만 포함된 객체가 반환됩니다.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use series_core::{DataConfig, PricePoint};

use crate::error::NO_WEEKLY_SERIES_MESSAGE;
use crate::source::WeeklySeriesSource;
use crate::FetchError;

const WEEKLY_FUNCTION: &str = "TIME_SERIES_WEEKLY";
const USER_AGENT: &str = "Mozilla/5.0";

/// `TIME_SERIES_WEEKLY` 응답.
#[derive(Debug, Deserialize)]
struct WeeklyResponse {
    #[serde(rename = "Error Message")]
    error_message: Option<Value>,
    #[serde(rename = "Information")]
    information: Option<Value>,
    #[serde(rename = "Note")]
    note: Option<Value>,
    #[serde(rename = "Weekly Time Series")]
    series: Option<BTreeMap<String, WeeklyBar>>,
}

/// 주간 캔들 한 개.
#[derive(Debug, Deserialize)]
struct WeeklyBar {
    #[serde(rename = "4. close")]
    close: Option<Value>,
}

impl WeeklyBar {
    /// 종가를 f64로 변환합니다. 숫자 문자열과 숫자 모두 허용합니다.
    fn close_price(&self) -> Option<f64> {
        match self.close.as_ref()? {
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 응답 본문을 오래된 순서의 포인트 목록으로 변환합니다.
///
/// 최신 날짜부터 `weeks`개를 고른 뒤 잘못된 날짜와 0 이하 가격을 버립니다.
pub fn parse_weekly_payload(body: &str, weeks: usize) -> Result<Vec<PricePoint>, FetchError> {
    let response: WeeklyResponse = serde_json::from_str(body)
        .map_err(|_| FetchError::Malformed(NO_WEEKLY_SERIES_MESSAGE.to_string()))?;

    if let Some(message) = &response.error_message {
        return Err(FetchError::Malformed(message_text(message)));
    }
    if let Some(message) = response.information.as_ref().or(response.note.as_ref()) {
        return Err(FetchError::Malformed(message_text(message)));
    }

    let series = response
        .series
        .ok_or_else(|| FetchError::Malformed(NO_WEEKLY_SERIES_MESSAGE.to_string()))?;

    // ISO 날짜 문자열은 사전순 = 시간순. 최신부터 weeks개 선택.
    let mut points: Vec<PricePoint> = series
        .iter()
        .rev()
        .take(weeks)
        .filter_map(|(date, bar)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            let price = bar.close_price().filter(|p| p.is_finite() && *p > 0.0)?;
            Some(PricePoint::new(date, price))
        })
        .collect();

    if points.is_empty() {
        return Err(FetchError::NoValidData);
    }

    points.reverse();
    Ok(points)
}

/// Alpha Vantage 클라이언트.
pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    /// 새 클라이언트를 생성합니다.
    ///
    /// # Errors
    /// HTTP 클라이언트를 만들 수 없으면 `FetchError::Unavailable`을 반환합니다.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Unavailable(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// 데이터 설정에서 클라이언트를 생성합니다.
    pub fn from_config(config: &DataConfig) -> Result<Self, FetchError> {
        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Alpha Vantage client configured"
        );
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }
}

#[async_trait]
impl WeeklySeriesSource for AlphaVantageClient {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    async fn fetch_weekly(
        &self,
        provider_symbol: &str,
        weeks: usize,
    ) -> Result<Vec<PricePoint>, FetchError> {
        debug!(symbol = provider_symbol, weeks, "Requesting weekly series");

        let response = self
            .client
            .get(self.query_url())
            .query(&[
                ("function", WEEKLY_FUNCTION),
                ("symbol", provider_symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Unavailable(format!("HTTP status {}", status)));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(FetchError::Unavailable("empty response body".to_string()));
        }

        let points = parse_weekly_payload(&body, weeks)?;
        debug!(
            symbol = provider_symbol,
            points = points.len(),
            "Weekly series parsed"
        );
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const PAYLOAD: &str = r#"{
        "Meta Data": { "2. Symbol": "CEZ.PR" },
        "Weekly Time Series": {
            "2024-05-17": { "1. open": "1.0", "4. close": "900.5000" },
            "2024-05-24": { "1. open": "1.0", "4. close": "910.0000" },
            "2024-05-31": { "1. open": "1.0", "4. close": "0.0000" },
            "2024-06-07": { "1. open": "1.0", "4. close": "920.0000" },
            "2024-06-14": { "1. open": "1.0", "4. close": "901.6000" }
        }
    }"#;

    #[test]
    fn test_parse_takes_most_recent_weeks_in_order() {
        let points = parse_weekly_payload(PAYLOAD, 3).unwrap();

        // 최신 3주 중 0 가격(05-31) 제거 → 2개, 오래된 순
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, date(2024, 6, 7));
        assert_eq!(points[0].price, 920.0);
        assert_eq!(points[1].date, date(2024, 6, 14));
        assert_eq!(points[1].price, 901.6);
    }

    #[test]
    fn test_parse_all_weeks() {
        let points = parse_weekly_payload(PAYLOAD, 100).unwrap();
        assert_eq!(points.len(), 4);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_parse_error_message() {
        let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;
        match parse_weekly_payload(body, 10) {
            Err(FetchError::Malformed(reason)) => assert!(reason.starts_with("Invalid API call")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_information_and_note() {
        let body = r#"{"Information": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#;
        let err = parse_weekly_payload(body, 10).unwrap_err();
        assert!(err.fallback_note().contains("rate limit"));

        let body = r#"{"Note": "API call frequency exceeded"}"#;
        let err = parse_weekly_payload(body, 10).unwrap_err();
        assert_eq!(
            err.fallback_note(),
            "Using simulated data due to API error: API call frequency exceeded"
        );
    }

    #[test]
    fn test_parse_missing_series_and_garbage() {
        for body in [r#"{"Meta Data": {}}"#, "<html>oops</html>", "[]"] {
            match parse_weekly_payload(body, 10) {
                Err(FetchError::Malformed(reason)) => {
                    assert_eq!(reason, NO_WEEKLY_SERIES_MESSAGE)
                }
                other => panic!("unexpected result for {}: {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_parse_no_valid_points() {
        let body = r#"{"Weekly Time Series": {
            "2024-06-07": { "4. close": "0" },
            "2024-06-14": { "4. close": "-3.5" },
            "not-a-date": { "4. close": "100" }
        }}"#;
        assert!(matches!(
            parse_weekly_payload(body, 10),
            Err(FetchError::NoValidData)
        ));
    }

    #[test]
    fn test_parse_zero_weeks() {
        assert!(matches!(
            parse_weekly_payload(PAYLOAD, 0),
            Err(FetchError::NoValidData)
        ));
    }

    #[test]
    fn test_numeric_close_accepted() {
        let body = r#"{"Weekly Time Series": { "2024-06-14": { "4. close": 101.25 } }}"#;
        let points = parse_weekly_payload(body, 5).unwrap();
        assert_eq!(points[0].price, 101.25);
    }
}
