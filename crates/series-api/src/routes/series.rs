//! 주간 시세 시리즈 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/series?symbol=BAACEZ&months=4`
//!
//! `symbol`이 없거나 비어 있으면 400을 반환합니다. `months`는 느슨한 정수
//! 변환을 거치며(숫자가 아니면 0), 생략하면 기본값(4)을 사용합니다.
//! 외부 시세 조회가 실패해도 항상 200과 시뮬레이션 데이터를 반환합니다.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, info};

use series_core::{SeriesRequest, SeriesResult};

use crate::error::{series_error_response, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 시리즈 조회 쿼리.
///
/// 검증과 숫자 변환은 핸들러에서 하므로 원문 그대로 받습니다.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    /// 요청 심볼 (예: BAACEZ, AAPL)
    pub symbol: Option<String>,
    /// 조회 기간 (개월)
    pub months: Option<String>,
}

impl SeriesQuery {
    /// 쿼리 쌍 목록에서 생성합니다.
    ///
    /// 같은 키가 반복되면 마지막 값을 사용하고, 알 수 없는 키는 무시합니다.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |mut query, (key, value)| {
                match key.as_str() {
                    "symbol" => query.symbol = Some(value),
                    "months" => query.months = Some(value),
                    _ => {}
                }
                query
            })
    }
}

/// 주간 시세 시리즈 조회.
///
/// GET /api/v1/series
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<SeriesResult>> {
    let Query(pairs) = query.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Query string rejected");
        (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(rejection.body_text())),
        )
    })?;
    let query = SeriesQuery::from_pairs(pairs);

    let request = SeriesRequest::from_query(
        query.symbol.as_deref(),
        query.months.as_deref(),
        state.default_months,
        state.max_months,
    )
    .map_err(series_error_response)?;

    let series = state.provider.get_series(&request).await;

    info!(
        symbol = %request.symbol,
        months = request.months,
        points = series.len(),
        simulated = series.is_simulated(),
        "Series request served"
    );

    Ok(Json(series))
}

/// 시리즈 라우터 생성.
pub fn series_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/series", get(get_series))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        ))
}
