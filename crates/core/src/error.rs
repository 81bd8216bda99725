//! 에러 타입 -- 도메인별 에러 정의

/// depscribe 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum DepscribeError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// manifest / lock 추출 에러
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// manifest / lock 추출 에러
///
/// 각 ecosystem handler의 도메인 에러는 이 타입으로 변환되어 전파됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// 입력 파일 없음
    #[error("file not found: {path}: {reason}")]
    FileNotFound { path: String, reason: String },

    /// 직렬화 형식 위반
    #[error("parse failed: {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    /// 필수 필드 누락 또는 형식 불일치
    #[error("schema mismatch: {path}: {field}: {reason}")]
    SchemaMismatch {
        path: String,
        field: String,
        reason: String,
    },

    /// 입력 파일 크기 초과
    #[error("input too large: {path}: {size} bytes (max: {max})")]
    TooLarge { path: String, size: u64, max: u64 },
}
