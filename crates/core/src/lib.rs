//! depscribe 공통 크레이트
//!
//! 모든 ecosystem handler와 CLI가 공유하는 설정, 최상위 에러 타입,
//! 메트릭 이름 상수를 정의합니다.
//!
//! # Module Structure
//!
//! - [`config`]: `depscribe.toml` 파싱 및 환경변수 오버라이드 (`DepscribeConfig`)
//! - [`error`]: 최상위 에러 타입 (`DepscribeError`, `ConfigError`, `ExtractError`)
//! - [`metrics`]: 메트릭 이름 및 레이블 상수

pub mod config;
pub mod error;
pub mod metrics;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, DepscribeError, ExtractError};

// 설정
pub use config::{DepscribeConfig, GeneralConfig, HandlerConfig};
