//! 설정 관리 -- depscribe.toml 파싱 및 런타임 설정
//!
//! [`DepscribeConfig`]는 handler 바이너리의 모든 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`DEPSCRIBE_GENERAL_LOG_LEVEL=debug` 형식)
//! 3. 설정 파일 (`depscribe.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), depscribe_core::error::DepscribeError> {
//! use depscribe_core::config::DepscribeConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = DepscribeConfig::load("depscribe.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = DepscribeConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, DepscribeError};

/// 허용되는 로그 레벨
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 허용되는 로그 형식
pub const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// 허용되는 기본 ecosystem 이름 (별칭 포함, 대소문자 무시)
pub const VALID_ECOSYSTEMS: [&str; 6] = ["dep", "gopkg", "golang-dep", "glide", "godep", "godeps"];

/// 입력 파일 최대 크기 상한 (100 MB)
pub const MAX_FILE_SIZE_LIMIT: u64 = 100 * 1024 * 1024;

/// depscribe 통합 설정
///
/// `depscribe.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepscribeConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// handler 설정
    #[serde(default)]
    pub handler: HandlerConfig,
}

impl DepscribeConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DepscribeError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 있으면 로드하고, 없으면 기본값에 환경변수만 적용합니다.
    ///
    /// 명시적으로 지정되지 않은 기본 경로에만 사용합니다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, DepscribeError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DepscribeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DepscribeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                DepscribeError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, DepscribeError> {
        toml::from_str(toml_str).map_err(|e| {
            DepscribeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `DEPSCRIBE_{SECTION}_{FIELD}`
    /// 예: `DEPSCRIBE_HANDLER_MAX_FILE_SIZE=1048576`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "DEPSCRIBE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "DEPSCRIBE_GENERAL_LOG_FORMAT");

        // Handler
        override_u64(
            &mut self.handler.max_file_size,
            "DEPSCRIBE_HANDLER_MAX_FILE_SIZE",
        );
        override_string(
            &mut self.handler.default_ecosystem,
            "DEPSCRIBE_HANDLER_DEFAULT_ECOSYSTEM",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), DepscribeError> {
        if !VALID_LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_LEVELS.join(", ")),
            }
            .into());
        }

        if !VALID_LOG_FORMATS.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_FORMATS.join(", ")),
            }
            .into());
        }

        if self.handler.max_file_size == 0 || self.handler.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "handler.max_file_size".to_owned(),
                reason: format!("must be between 1 and {MAX_FILE_SIZE_LIMIT}"),
            }
            .into());
        }

        let ecosystem = self.handler.default_ecosystem.to_lowercase();
        if !VALID_ECOSYSTEMS.contains(&ecosystem.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "handler.default_ecosystem".to_owned(),
                reason: format!("must be one of: {}", VALID_ECOSYSTEMS.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// handler 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// 입력 파일 최대 크기 (바이트)
    pub max_file_size: u64,
    /// manifest 파일명으로 ecosystem을 판별할 수 없을 때 사용할 기본값
    pub default_ecosystem: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            default_ecosystem: "dep".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
