//! Ecosystem handler -- Gopkg.toml, glide.yaml, Godeps.json 등
//!
//! [`ManifestHandler`] trait은 각 manifest 형식의 handler가 구현해야 하는 인터페이스입니다.
//! [`handler_for`]는 닫힌 [`Ecosystem`] 열거형에서 handler로의 완전한(exhaustive) 매핑입니다.
//!
//! # 지원 형식
//!
//! - `Gopkg.toml` + `Gopkg.lock` (TOML) -- [`DepHandler`]
//! - `glide.yaml` + `glide.lock` (YAML) -- [`GlideHandler`]
//! - `Godeps.json` (JSON) -- [`GodepHandler`]
//!
//! # 확장
//!
//! 새로운 형식을 지원하려면 `Ecosystem`에 variant를 추가하고 `ManifestHandler`를
//! 구현합니다. 누락된 `match` 분기는 컴파일 에러로 드러납니다.

pub mod dep;
pub mod glide;
pub mod godep;

use std::path::Path;

use serde::Serialize;

pub use dep::DepHandler;
pub use glide::{GlideHandler, GlideResult};
pub use godep::GodepHandler;

use crate::error::HandlerError;
use crate::loader::FormatLoader;
use crate::node::GenericNode;
use crate::result::ReconciledResult;
use crate::types::Ecosystem;

/// Manifest handler trait
///
/// manifest(필수)와 lock(선택) 파일을 읽어 정규 결과를 생성합니다.
pub trait ManifestHandler: Send + Sync {
    /// 이 handler가 담당하는 생태계를 반환합니다.
    fn ecosystem(&self) -> Ecosystem;

    /// 주어진 manifest 파일을 이 handler가 처리할 수 있는지 확인합니다.
    ///
    /// 파일 이름으로 판별합니다 (예: "Gopkg.toml").
    fn can_handle(&self, manifest: &Path) -> bool {
        Ecosystem::detect(manifest) == Some(self.ecosystem())
    }

    /// manifest와 lock 파일을 처리합니다.
    ///
    /// # Arguments
    ///
    /// - `loader`: 크기 제한이 설정된 형식 로더
    /// - `manifest`: manifest 파일 경로
    /// - `lock`: lock 파일 경로 (선택)
    fn handle(
        &self,
        loader: &FormatLoader,
        manifest: &Path,
        lock: Option<&Path>,
    ) -> Result<HandlerOutput, HandlerError>;
}

/// handler 출력 -- 한 줄의 JSON으로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HandlerOutput {
    Dep(ReconciledResult),
    Glide(GlideResult),
    Godep(GenericNode),
}

impl HandlerOutput {
    /// 개행 없는 한 줄 JSON으로 직렬화합니다.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// 생태계에 대응하는 handler를 돌려줍니다.
pub fn handler_for(ecosystem: Ecosystem) -> Box<dyn ManifestHandler> {
    match ecosystem {
        Ecosystem::Dep => Box::new(DepHandler),
        Ecosystem::Glide => Box::new(GlideHandler),
        Ecosystem::Godep => Box::new(GodepHandler),
    }
}
