//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → `FOLIO__` 환경 변수 → `DB_PATH` 순으로
//! 덮어쓰며 애플리케이션 설정을 구성합니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FolioResult;
use crate::logging::LogFormat;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 대시보드 설정
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 파일 경로
    pub path: PathBuf,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("investments.sqlite3"),
            max_connections: 4,
            connection_timeout_secs: 10,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// 대시보드 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// "현금 제외 합계"에서 빠지는 상품 이름
    pub cash_name: String,
    /// 조회 대상 연도. 비어 있으면 모든 연도를 허용합니다.
    pub allowed_years: Vec<i32>,
    /// 차트 높이 (px)
    pub chart_height: u32,
    /// 차트 너비 (px)
    pub chart_width: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cash_name: "Cash".to_string(),
            allowed_years: vec![2024, 2025],
            chart_height: 400,
            chart_width: 960,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> FolioResult<Self> {
        Self::load_with(Some(path.as_ref()), None, std::env::var("DB_PATH").ok())
    }

    /// `env`가 주어지면 프로세스 환경 변수 대신 사용합니다.
    fn load_with(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
        db_path: Option<String>,
    ) -> FolioResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config = builder
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("dashboard.allowed_years")
                    .try_parsing(true)
                    .source(env),
            )
            // 기존 배포와의 호환성
            .set_override_option("database.path", db_path)?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
