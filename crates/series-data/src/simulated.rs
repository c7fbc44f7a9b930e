//! 심볼 시드 기반 주간 시세 시뮬레이터.
//!
//! 같은 심볼, 같은 개월 수, 같은 기준일에 대해 항상 같은 시리즈를 생성합니다.
//! 난수 생성기는 호출마다 새로 만들어지며 전역 상태를 공유하지 않습니다.
//!
//! - 시작 가격: `500 + crc32(symbol) % 1000`
//! - 변동성: `0.02 + (crc32(symbol + "vol") % 100) / 1000`
//! - 주간 변화율: `u * volatility + sin(i / 10) * 0.005`, `u ∈ [-1, 1]` (0.01 단위)

use chrono::{Days, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use series_core::{PricePoint, SeriesResult, WEEKS_PER_MONTH};

/// 주기적 추세 진폭.
const TREND_AMPLITUDE: f64 = 0.005;

/// 주간 간격 (일).
const STEP_DAYS: u64 = 7;

/// 심볼 문자열의 CRC-32 체크섬.
pub fn symbol_checksum(symbol: &str) -> u32 {
    crc32fast::hash(symbol.as_bytes())
}

/// 심볼별 시뮬레이션 파라미터.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    /// 시작 가격 (500 이상 1500 미만)
    pub base_price: f64,
    /// 주간 변동성 (0.02 이상 0.12 미만)
    pub volatility: f64,
    /// 난수 시드
    pub seed: u64,
}

impl SimulationParams {
    /// 심볼에서 파라미터를 유도합니다.
    pub fn for_symbol(symbol: &str) -> Self {
        let checksum = symbol_checksum(symbol);
        let vol_checksum = symbol_checksum(&format!("{}vol", symbol));

        Self {
            base_price: 500.0 + f64::from(checksum % 1000),
            volatility: 0.02 + f64::from(vol_checksum % 100) / 1000.0,
            seed: u64::from(checksum),
        }
    }
}

/// 기준일까지의 주간 가격 포인트를 생성합니다.
///
/// `today - (months + 1)개월`에서 시작해 7일씩 전진하며, 기준일을 넘는 날짜는
/// 만들지 않습니다. 포인트 수는 최대 `ceil(months * 4.33)`입니다.
pub fn simulate_points(symbol: &str, months: u32, today: NaiveDate) -> Vec<PricePoint> {
    let params = SimulationParams::for_symbol(symbol);
    let mut rng = StdRng::seed_from_u64(params.seed);

    let Some(mut date) = today.checked_sub_months(Months::new(months.saturating_add(1))) else {
        return Vec::new();
    };

    let limit = f64::from(months) * WEEKS_PER_MONTH;
    let mut points = Vec::with_capacity(limit.ceil() as usize);
    let mut previous_price = params.base_price;
    let mut i: u32 = 0;

    while f64::from(i) < limit {
        date = match date.checked_add_days(Days::new(STEP_DAYS)) {
            Some(next) => next,
            None => break,
        };
        if date > today {
            break;
        }

        let trend = (f64::from(i) / 10.0).sin() * TREND_AMPLITUDE;
        let shock = f64::from(rng.gen_range(-100i32..=100)) / 100.0;
        let change = shock * params.volatility + trend;
        let price = previous_price * (1.0 + change);

        points.push(PricePoint::new(date, price));
        previous_price = price;
        i += 1;
    }

    debug!(
        symbol,
        months,
        points = points.len(),
        base_price = params.base_price,
        volatility = params.volatility,
        "Simulated weekly series"
    );

    points
}

/// 시뮬레이션 시리즈 응답을 생성합니다 (`simulated: true`).
pub fn simulate_series(symbol: &str, months: u32, today: NaiveDate) -> SeriesResult {
    SeriesResult::from_points(symbol, &simulate_points(symbol, months, today)).mark_simulated()
}
