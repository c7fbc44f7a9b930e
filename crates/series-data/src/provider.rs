//! 시리즈 제공자.
//!
//! 요청 심볼을 제공자 심볼로 변환하고, 설정된 데이터 소스에 따라 외부 조회
//! 또는 시뮬레이션으로 시리즈를 만듭니다. 외부 조회가 어떤 이유로든 실패하면
//! 시뮬레이션 데이터와 사유(`note`)를 반환하므로 호출자에게 에러가 전달되지
//! 않습니다.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};

use series_core::{DataConfig, DataSource, SeriesRequest, SeriesResult, SymbolResolver};

use crate::alphavantage::AlphaVantageClient;
use crate::simulated::simulate_series;
use crate::source::WeeklySeriesSource;
use crate::FetchError;

/// 요청 단위 시리즈 제공자.
///
/// 내부 상태는 읽기 전용이므로 `Arc`로 여러 요청에서 공유할 수 있습니다.
pub struct SeriesProvider {
    resolver: SymbolResolver,
    live: Option<Arc<dyn WeeklySeriesSource>>,
}

impl SeriesProvider {
    /// 시뮬레이션 전용 제공자.
    pub fn simulated() -> Self {
        Self {
            resolver: SymbolResolver::new(),
            live: None,
        }
    }

    /// 외부 소스를 사용하는 제공자.
    pub fn with_live_source(source: Arc<dyn WeeklySeriesSource>) -> Self {
        Self {
            resolver: SymbolResolver::new(),
            live: Some(source),
        }
    }

    /// 데이터 설정에서 제공자를 생성합니다.
    ///
    /// `source = live`일 때만 Alpha Vantage 클라이언트를 만듭니다.
    pub fn from_config(config: &DataConfig) -> Result<Self, FetchError> {
        match config.source {
            DataSource::Live => {
                let client = AlphaVantageClient::from_config(config)?;
                Ok(Self::with_live_source(Arc::new(client)))
            }
            DataSource::Simulated => Ok(Self::simulated()),
        }
    }

    /// 현재 사용하는 데이터 소스.
    pub fn data_source(&self) -> DataSource {
        if self.live.is_some() {
            DataSource::Live
        } else {
            DataSource::Simulated
        }
    }

    /// 오늘(UTC) 기준으로 시리즈를 생성합니다.
    pub async fn get_series(&self, request: &SeriesRequest) -> SeriesResult {
        self.get_series_at(request, Utc::now().date_naive()).await
    }

    /// 주어진 기준일로 시리즈를 생성합니다.
    #[instrument(skip(self, request), fields(symbol = %request.symbol, months = request.months))]
    pub async fn get_series_at(&self, request: &SeriesRequest, today: NaiveDate) -> SeriesResult {
        let Some(live) = &self.live else {
            debug!("Using simulated data source");
            return simulate_series(&request.symbol, request.months, today);
        };

        let provider_symbol = self.resolver.to_provider_symbol(&request.symbol);

        match live
            .fetch_weekly(provider_symbol, request.weeks_needed())
            .await
        {
            Ok(points) => {
                info!(
                    source = live.name(),
                    provider_symbol,
                    points = points.len(),
                    "Live weekly series fetched"
                );
                SeriesResult::from_points(request.symbol.clone(), &points)
            }
            Err(e) => {
                warn!(
                    source = live.name(),
                    provider_symbol,
                    kind = e.kind(),
                    error = %e,
                    "Live fetch failed, falling back to simulated data"
                );
                simulate_series(&request.symbol, request.months, today).with_note(e.fallback_note())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use series_core::PricePoint;
    use std::sync::Mutex;

    /// 호출 인자를 기록하고 정해진 결과를 돌려주는 테스트용 소스.
    struct StubSource {
        result: fn() -> Result<Vec<PricePoint>, FetchError>,
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl StubSource {
        fn new(result: fn() -> Result<Vec<PricePoint>, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl WeeklySeriesSource for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn fetch_weekly(
            &self,
            provider_symbol: &str,
            weeks: usize,
        ) -> Result<Vec<PricePoint>, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((provider_symbol.to_string(), weeks));
            (self.result)()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    fn two_points() -> Result<Vec<PricePoint>, FetchError> {
        Ok(vec![
            PricePoint::new(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(), 100.0),
            PricePoint::new(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(), 110.0),
        ])
    }

    #[tokio::test]
    async fn test_simulated_source() {
        let provider = SeriesProvider::simulated();
        assert_eq!(provider.data_source(), DataSource::Simulated);

        let request = SeriesRequest::new("BAAVGP", 1).unwrap();
        let series = provider.get_series_at(&request, today()).await;

        assert!(series.is_simulated());
        assert!(series.note.is_none());
        assert_eq!(series, simulate_series("BAAVGP", 1, today()));
    }

    #[tokio::test]
    async fn test_live_source_resolves_alias() {
        let stub = StubSource::new(two_points);
        let provider = SeriesProvider::with_live_source(stub.clone());
        assert_eq!(provider.data_source(), DataSource::Live);

        let request = SeriesRequest::new("BAACEZ", 2).unwrap();
        let series = provider.get_series_at(&request, today()).await;

        assert_eq!(
            stub.calls.lock().unwrap().as_slice(),
            &[("CEZ.PR".to_string(), 9)]
        );
        // 응답에는 요청 심볼 그대로
        assert_eq!(series.symbol, "BAACEZ");
        assert!(series.simulated.is_none());
        assert!(series.note.is_none());
        assert_eq!(series.dates, vec!["2024-06-07", "2024-06-14"]);
        assert_eq!(series.returns[0], 0.0);
        assert!((series.returns[1] - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_live_failure_falls_back() {
        let stub = StubSource::new(|| Err(FetchError::Unavailable("HTTP status 500".into())));
        let provider = SeriesProvider::with_live_source(stub);

        let request = SeriesRequest::new("XYZ", 3).unwrap();
        let series = provider.get_series_at(&request, today()).await;

        assert!(series.is_simulated());
        assert_eq!(
            series.note.as_deref(),
            Some("Using simulated data due to API error")
        );
        assert_eq!(series.prices, simulate_series("XYZ", 3, today()).prices);
    }

    #[tokio::test]
    async fn test_no_valid_data_falls_back() {
        let stub = StubSource::new(|| Err(FetchError::NoValidData));
        let provider = SeriesProvider::with_live_source(stub);

        let request = SeriesRequest::new("BAAKOMB", 1).unwrap();
        let series = provider.get_series_at(&request, today()).await;

        assert!(series.is_simulated());
        assert_eq!(
            series.note.as_deref(),
            Some("Using simulated data due to no valid data from API")
        );
    }

    #[test]
    fn test_from_config() {
        let config = DataConfig::default();
        let provider = SeriesProvider::from_config(&config).unwrap();
        assert_eq!(provider.data_source(), DataSource::Simulated);

        let config = DataConfig {
            source: DataSource::Live,
            ..DataConfig::default()
        };
        let provider = SeriesProvider::from_config(&config).unwrap();
        assert_eq!(provider.data_source(), DataSource::Live);
    }
}
