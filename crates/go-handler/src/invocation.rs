//! 단일 handler 호출 -- 생태계 선택, 로더 구성, 결과 생성
//!
//! 생태계는 다음 순서로 결정됩니다.
//!
//! 1. 명시적으로 지정된 생태계 (`--ecosystem`)
//! 2. manifest 파일명으로 판별한 생태계
//! 3. 설정의 `default_ecosystem`
//!
//! 호출은 상태를 남기지 않으므로 같은 입력에 대해 항상 같은 출력을 냅니다.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use depscribe_core::metrics as m;

use crate::config::GoHandlerConfig;
use crate::error::HandlerError;
use crate::handler::{HandlerOutput, handler_for};
use crate::loader::FormatLoader;
use crate::types::Ecosystem;

/// handler 호출 입력
#[derive(Debug, Clone)]
pub struct Invocation {
    /// manifest 파일 경로 (필수)
    pub manifest: PathBuf,
    /// lock 파일 경로 (선택)
    pub lock: Option<PathBuf>,
    /// 명시적 생태계 지정 (없으면 자동 판별)
    pub ecosystem: Option<Ecosystem>,
}

impl Invocation {
    /// manifest만으로 호출을 생성합니다.
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            lock: None,
            ecosystem: None,
        }
    }

    /// lock 파일 경로를 지정합니다.
    pub fn with_lock(mut self, lock: impl Into<PathBuf>) -> Self {
        self.lock = Some(lock.into());
        self
    }

    /// 생태계를 명시적으로 지정합니다.
    pub fn with_ecosystem(mut self, ecosystem: Ecosystem) -> Self {
        self.ecosystem = Some(ecosystem);
        self
    }

    /// 이 호출에 사용할 생태계를 결정합니다.
    pub fn resolve_ecosystem(&self, config: &GoHandlerConfig) -> Ecosystem {
        if let Some(ecosystem) = self.ecosystem {
            return ecosystem;
        }
        match Ecosystem::detect(&self.manifest) {
            Some(ecosystem) => ecosystem,
            None => {
                debug!(
                    manifest = %self.manifest.display(),
                    fallback = %config.default_ecosystem,
                    "ecosystem not detected from filename, using default"
                );
                config.default_ecosystem
            }
        }
    }

    /// handler를 실행합니다.
    pub fn run(&self, config: &GoHandlerConfig) -> Result<HandlerOutput, HandlerError> {
        let ecosystem = self.resolve_ecosystem(config);
        let span = tracing::info_span!(
            "handle",
            ecosystem = %ecosystem,
            manifest = %self.manifest.display()
        );
        let _guard = span.enter();

        let loader = FormatLoader::new(config.max_file_size);
        let handler = handler_for(ecosystem);
        let result = handler.handle(&loader, &self.manifest, self.lock.as_deref());

        match &result {
            Ok(_) => {
                info!(has_lock = self.lock.is_some(), "handler completed");
                metrics::counter!(
                    m::HANDLER_INVOCATIONS_TOTAL,
                    m::LABEL_ECOSYSTEM => ecosystem.to_string(),
                    m::LABEL_RESULT => "success"
                )
                .increment(1);
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "handler failed");
                metrics::counter!(
                    m::HANDLER_INVOCATIONS_TOTAL,
                    m::LABEL_ECOSYSTEM => ecosystem.to_string(),
                    m::LABEL_RESULT => "failure"
                )
                .increment(1);
                metrics::counter!(
                    m::HANDLER_FAILURES_TOTAL,
                    m::LABEL_ECOSYSTEM => ecosystem.to_string(),
                    m::LABEL_ERROR_KIND => err.kind()
                )
                .increment(1);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_ecosystem_wins_over_filename() {
        let inv = Invocation::new("Gopkg.toml").with_ecosystem(Ecosystem::Glide);
        assert_eq!(inv.resolve_ecosystem(&GoHandlerConfig::default()), Ecosystem::Glide);
    }

    #[test]
    fn filename_detection_wins_over_default() {
        let config = GoHandlerConfig {
            default_ecosystem: Ecosystem::Godep,
            ..GoHandlerConfig::default()
        };
        let inv = Invocation::new("/src/glide.yaml");
        assert_eq!(inv.resolve_ecosystem(&config), Ecosystem::Glide);
    }

    #[test]
    fn unknown_filename_falls_back_to_default() {
        let config = GoHandlerConfig {
            default_ecosystem: Ecosystem::Godep,
            ..GoHandlerConfig::default()
        };
        let inv = Invocation::new("/tmp/manifest.input");
        assert_eq!(inv.resolve_ecosystem(&config), Ecosystem::Godep);
    }

    #[test]
    fn run_respects_max_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("Gopkg.toml");
        fs::write(&manifest, "[[constraint]]\nname = \"github.com/pkg/errors\"\n").unwrap();

        let config = GoHandlerConfig {
            max_file_size: 8,
            ..GoHandlerConfig::default()
        };
        let err = Invocation::new(&manifest).run(&config).unwrap_err();
        assert!(matches!(err, HandlerError::FileTooBig { max: 8, .. }));
    }

    #[test]
    fn run_produces_json_line() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("Gopkg.toml");
        let lock = dir.path().join("Gopkg.lock");
        fs::write(&manifest, "").unwrap();
        fs::write(
            &lock,
            "[[projects]]\nname = \"a\"\nrevision = \"r1\"\npackages = [\".\"]\n",
        )
        .unwrap();

        let out = Invocation::new(&manifest)
            .with_lock(&lock)
            .run(&GoHandlerConfig::default())
            .unwrap();
        assert_eq!(
            out.to_json_line().unwrap(),
            r#"{"constraint":[],"override":[],"dependency_tree_lock_file":{"packages":[{"name":"a","revision":"r1"}]}}"#
        );
    }
}
