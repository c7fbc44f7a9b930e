//! 서비스 로그 출력 설정.
//!
//! 요청 처리(`Series request served`)와 외부 조회 대체(`falling back to
//! simulated data`) 로그가 모두 여기서 설치한 subscriber를 거칩니다.
//! 형식은 `logging.format`으로 고르며 pretty, json, compact를 지원합니다.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// 로그 집계용 JSON 형식 (운영용)
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 초기화 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 필터 지시문 (예: "info", "series_data=debug,tower_http=warn")
    pub level: String,
    pub format: LogFormat,
    /// span 진입/종료 이벤트 출력 (외부 조회 구간 추적용)
    pub with_span_events: bool,
    /// 소스 파일명과 줄 번호 출력
    pub with_file: bool,
    /// 모듈 경로 출력
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_span_events: false,
            with_file: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    pub fn with_file(mut self, enabled: bool) -> Self {
        self.with_file = enabled;
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.with_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// 형식별 출력 레이어.
    ///
    /// 형식 전환이 파일/줄 표시 기본값을 바꾸므로 플래그는 형식 선택 뒤에 적용합니다.
    fn output_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        match self.format {
            LogFormat::Pretty => fmt::layer()
                .pretty()
                .with_file(self.with_file)
                .with_line_number(self.with_file)
                .with_target(self.with_target)
                .with_span_events(self.span_events())
                .boxed(),
            // 집계 시스템에서 필드를 바로 색인하도록 이벤트 필드를 최상위로 올림
            LogFormat::Json => fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_file(self.with_file)
                .with_line_number(self.with_file)
                .with_target(self.with_target)
                .with_span_events(self.span_events())
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_file(self.with_file)
                .with_line_number(self.with_file)
                .with_target(self.with_target)
                .with_span_events(self.span_events())
                .boxed(),
        }
    }
}

/// 전역 subscriber를 설치합니다.
///
/// `RUST_LOG`가 있으면 `level`보다 우선합니다. 두 번째 호출은 에러입니다.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    tracing_subscriber::registry()
        .with(config.output_layer())
        .with(env_filter)
        .try_init()?;

    tracing::info!(
        format = ?config.format,
        level = %config.level,
        span_events = config.with_span_events,
        "Logging initialized"
    );

    Ok(())
}
