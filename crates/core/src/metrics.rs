//! 메트릭 상수
//!
//! 모든 메트릭의 이름과 레이블 키를 중앙에서 정의합니다.
//! handler는 이 상수로 `metrics::counter!()` 매크로를 호출합니다.
//! 임베딩 프로세스가 recorder를 설치하지 않으면 모든 호출은 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `depscribe_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(depscribe_core::metrics::HANDLER_INVOCATIONS_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 에코시스템 레이블 키 (dep, glide, godep)
pub const LABEL_ECOSYSTEM: &str = "ecosystem";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

/// 에러 종류 레이블 키 (file_not_found, parse, schema_mismatch, ...)
pub const LABEL_ERROR_KIND: &str = "kind";

// ─── Handler 메트릭 ────────────────────────────────────────────────

/// handler 호출 수 (counter, label: ecosystem, result)
pub const HANDLER_INVOCATIONS_TOTAL: &str = "depscribe_handler_invocations_total";

/// handler 실패 수 (counter, label: ecosystem, kind)
pub const HANDLER_FAILURES_TOTAL: &str = "depscribe_handler_failures_total";

/// 로드된 입력 파일 수 (counter, label: format)
pub const FILES_LOADED_TOTAL: &str = "depscribe_files_loaded_total";

/// lock 문서에서 평탄화된 패키지 레코드 수 (counter)
pub const PACKAGES_RECONCILED_TOTAL: &str = "depscribe_packages_reconciled_total";

/// 형식 불일치로 기본값을 사용한 필드 수 (counter)
pub const TOLERATED_MISMATCHES_TOTAL: &str = "depscribe_tolerated_mismatches_total";

/// 로더 형식 레이블 키 (toml, json, yaml)
pub const LABEL_FORMAT: &str = "format";
