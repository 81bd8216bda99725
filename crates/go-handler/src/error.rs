//! Go handler 에러 타입
//!
//! [`HandlerError`]는 하나의 handler 호출에서 발생할 수 있는 모든 치명적 에러를 나타냅니다.
//! `From<HandlerError> for DepscribeError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **입력 파일**: `FileNotFound`, `FileTooBig`
//! - **직렬화 형식 위반**: `Parse`
//! - **필수 필드 누락**: `SchemaMismatch`
//!
//! 선택 필드의 형식 불일치는 에러가 아니라 "없음"으로 취급됩니다
//! ([`FieldValue::tolerate`](crate::node::FieldValue::tolerate)).

use depscribe_core::error::{DepscribeError, ExtractError};

/// Go handler 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// 입력 파일을 열거나 읽을 수 없음
    #[error("file not found: {path}: {source}")]
    FileNotFound {
        /// 입력 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 선언된 직렬화 형식의 문법 위반
    #[error("parse error: {path}: {reason}")]
    Parse {
        /// 입력 파일 경로
        path: String,
        /// 파서 진단 메시지
        reason: String,
    },

    /// 필수 필드 누락 또는 형식 불일치
    #[error("schema mismatch: {path}: {field}: {reason}")]
    SchemaMismatch {
        /// 입력 파일 경로
        path: String,
        /// 문서 내 필드 위치 (예: `projects[2].revision`)
        field: String,
        /// 불일치 사유
        reason: String,
    },

    /// 입력 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 입력 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: u64,
        /// 최대 허용 크기 (바이트)
        max: u64,
    },
}

impl HandlerError {
    /// 메트릭 레이블 / 진단용 에러 종류 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "file_not_found",
            Self::Parse { .. } => "parse",
            Self::SchemaMismatch { .. } => "schema_mismatch",
            Self::FileTooBig { .. } => "file_too_big",
        }
    }

    /// 에러가 발생한 입력 파일 경로
    pub fn path(&self) -> &str {
        match self {
            Self::FileNotFound { path, .. }
            | Self::Parse { path, .. }
            | Self::SchemaMismatch { path, .. }
            | Self::FileTooBig { path, .. } => path,
        }
    }
}

impl From<HandlerError> for DepscribeError {
    fn from(err: HandlerError) -> Self {
        let extract = match err {
            HandlerError::FileNotFound { path, source } => ExtractError::FileNotFound {
                path,
                reason: source.to_string(),
            },
            HandlerError::Parse { path, reason } => ExtractError::ParseFailed { path, reason },
            HandlerError::SchemaMismatch {
                path,
                field,
                reason,
            } => ExtractError::SchemaMismatch {
                path,
                field,
                reason,
            },
            HandlerError::FileTooBig { path, size, max } => {
                ExtractError::TooLarge { path, size, max }
            }
        };
        DepscribeError::Extract(extract)
    }
}
