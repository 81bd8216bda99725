//! Go handler 설정
//!
//! [`GoHandlerConfig`]는 core의 [`HandlerConfig`](depscribe_core::config::HandlerConfig)에서
//! 문자열 필드를 도메인 타입으로 바꾼 실행용 설정입니다.
//!
//! # 사용 예시
//!
//! ```
//! use depscribe_core::config::HandlerConfig;
//! use depscribe_go_handler::{Ecosystem, GoHandlerConfig};
//!
//! let config = GoHandlerConfig::from_core(&HandlerConfig::default()).unwrap();
//! assert_eq!(config.default_ecosystem, Ecosystem::Dep);
//! config.validate().unwrap();
//! ```

use depscribe_core::config::{HandlerConfig, MAX_FILE_SIZE_LIMIT};
use depscribe_core::error::ConfigError;

use crate::types::Ecosystem;

/// Go handler 설정
///
/// - **max_file_size**: manifest/lock 파일 최대 크기 (바이트)
/// - **default_ecosystem**: 파일명으로 판별되지 않을 때 사용할 생태계
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoHandlerConfig {
    pub max_file_size: u64,
    pub default_ecosystem: Ecosystem,
}

impl Default for GoHandlerConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            default_ecosystem: Ecosystem::Dep,
        }
    }
}

impl GoHandlerConfig {
    /// core의 `HandlerConfig`에서 handler 설정을 생성합니다.
    pub fn from_core(core: &HandlerConfig) -> Result<Self, ConfigError> {
        let default_ecosystem = Ecosystem::from_str_loose(&core.default_ecosystem).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "handler.default_ecosystem".to_owned(),
                reason: format!("unknown ecosystem '{}'", core.default_ecosystem),
            }
        })?;

        let config = Self {
            max_file_size: core.max_file_size,
            default_ecosystem,
        };
        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// - `max_file_size`: 1-104857600 (100MB)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "handler.max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            });
        }
        Ok(())
    }
}
