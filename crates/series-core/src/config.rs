//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → `SERIES__` 접두사 환경 변수 순서로 병합합니다.
//!
//! ```text
//! SERIES__DATA__SOURCE=live
//! SERIES__DATA__API_KEY=xxxx
//! SERIES__SERVER__PORT=8080
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreResult;
use crate::logging::{LogConfig, LogFormat};
use crate::types::{DataSource, DEFAULT_MONTHS};

/// 설정 파일 경로를 지정하는 환경 변수.
pub const CONFIG_PATH_ENV: &str = "SERIES_CONFIG";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 데이터 소스 설정
    #[serde(default)]
    pub data: DataConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    #[serde(default = "default_host")]
    pub host: String,
    /// 리스닝할 포트
    #[serde(default = "default_port")]
    pub port: u16,
    /// 요청 전체 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// span 진입/종료 이벤트 출력
    #[serde(default)]
    pub with_span_events: bool,
    /// 파일명과 줄 번호 출력
    #[serde(default)]
    pub with_file: bool,
    /// 모듈 경로 출력
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
fn default_with_target() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            with_span_events: false,
            with_file: false,
            with_target: default_with_target(),
        }
    }
}

impl LoggingConfig {
    /// 로깅 초기화용 설정으로 변환합니다.
    ///
    /// 알 수 없는 형식은 pretty로 처리합니다.
    pub fn to_log_config(&self) -> LogConfig {
        let format = self.format.parse().unwrap_or(LogFormat::Pretty);
        LogConfig::new(self.level.clone())
            .with_format(format)
            .with_span_events(self.with_span_events)
            .with_file(self.with_file)
            .with_target(self.with_target)
    }
}

/// 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 데이터 소스 (live | simulated)
    #[serde(default)]
    pub source: DataSource,
    /// Alpha Vantage API 키
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Alpha Vantage 기본 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 외부 API 요청 타임아웃 (초)
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    /// `months` 미지정 시 기본값
    #[serde(default = "default_months")]
    pub default_months: u32,
    /// 허용 최대 개월 수
    #[serde(default = "default_max_months")]
    pub max_months: u32,
}

fn default_api_key() -> String {
    "demo".to_string()
}
fn default_base_url() -> String {
    "https://www.alphavantage.co".to_string()
}
fn default_fetch_timeout() -> u64 {
    10
}
fn default_months() -> u32 {
    DEFAULT_MONTHS
}
fn default_max_months() -> u32 {
    120
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            api_key: default_api_key(),
            base_url: default_base_url(),
            timeout_secs: default_fetch_timeout(),
            default_months: default_months(),
            max_months: default_max_months(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("SERIES")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// `SERIES_CONFIG` 또는 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CoreResult<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.data.source, DataSource::Simulated);
        assert_eq!(config.data.default_months, 4);
        assert_eq!(config.data.max_months, 120);
        assert_eq!(config.data.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "series-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 8088

[data]
source = "live"
api_key = "TESTKEY"
timeout_secs = 3
"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.data.source, DataSource::Live);
        assert_eq!(config.data.api_key, "TESTKEY");
        assert_eq!(config.data.timeout_secs, 3);
        // 파일에 없는 값은 기본값 유지
        assert_eq!(config.data.default_months, 4);
        assert_eq!(config.data.base_url, "https://www.alphavantage.co");
    }

    #[test]
    fn test_env_overrides_file() {
        let path = std::env::temp_dir().join(format!(
            "series-config-env-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"
[data]
api_key = "FILEKEY"
max_months = 24
"#,
        )
        .unwrap();

        std::env::set_var(CONFIG_PATH_ENV, &path);
        std::env::set_var("SERIES__DATA__SOURCE", "live");
        std::env::set_var("SERIES__DATA__MAX_MONTHS", "60");
        let loaded = AppConfig::load_default();
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::remove_var("SERIES__DATA__SOURCE");
        std::env::remove_var("SERIES__DATA__MAX_MONTHS");
        std::fs::remove_file(&path).ok();

        let config = loaded.unwrap();
        assert_eq!(config.data.source, DataSource::Live);
        // 환경 변수가 파일 값보다 우선
        assert_eq!(config.data.max_months, 60);
        assert_eq!(config.data.api_key, "FILEKEY");
    }

    #[test]
    fn test_logging_config_conversion() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
            with_span_events: true,
            with_file: true,
            with_target: false,
        };
        let log_config = logging.to_log_config();
        assert_eq!(log_config.level, "debug");
        assert_eq!(log_config.format, LogFormat::Json);
        assert!(log_config.with_span_events);
        assert!(log_config.with_file);
        assert!(!log_config.with_target);

        let fallback = LoggingConfig {
            format: "fancy".to_string(),
            ..LoggingConfig::default()
        }
        .to_log_config();
        assert_eq!(fallback.format, LogFormat::Pretty);
        assert!(!fallback.with_span_events);
        assert!(fallback.with_target);
    }
}
