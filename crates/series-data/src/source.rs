//! 외부 주간 시세 조회 인터페이스.

use async_trait::async_trait;

use series_core::PricePoint;

use crate::FetchError;

/// 주간 종가 시계열 제공자 trait.
#[async_trait]
pub trait WeeklySeriesSource: Send + Sync {
    /// 제공자 이름 (로그용).
    fn name(&self) -> &'static str;

    /// 최근 주간 종가 조회.
    ///
    /// # 인자
    /// * `provider_symbol` - 별칭 변환이 끝난 제공자 심볼 (예: "CEZ.PR")
    /// * `weeks` - 최근부터 가져올 최대 주 수
    ///
    /// # 반환값
    /// 오래된 순서로 정렬된, 가격이 양수인 포인트 목록 (비어 있지 않음)
    async fn fetch_weekly(
        &self,
        provider_symbol: &str,
        weeks: usize,
    ) -> Result<Vec<PricePoint>, FetchError>;
}
