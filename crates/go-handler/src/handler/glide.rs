//! Masterminds/glide handler -- glide.yaml + glide.lock
//!
//! manifest의 알려진 필드만 골라 정규화하고, 비어 있는 필드는 생략합니다.
//! lock은 `dependency_tree_lock_file` 아래에 붙습니다.
//!
//! # glide.yaml 예시
//!
//! ```yaml
//! package: github.com/example/app
//! license: MIT
//! owners:
//! - name: Jane
//!   email: jane@example.com
//! import:
//! - package: github.com/pkg/errors
//!   version: ^0.8.0
//!   subpackages:
//!   - errgroup
//! ```
//!
//! # glide.lock 예시
//!
//! ```yaml
//! hash: 0a1b2c
//! updated: 2017-10-05T10:13:04.226716+02:00
//! imports:
//! - name: github.com/pkg/errors
//!   version: 645ef00459ed84a119197bfb8d8205042c6df63d
//! testImports: []
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::HandlerError;
use crate::handler::{HandlerOutput, ManifestHandler};
use crate::loader::FormatLoader;
use crate::node::{FieldValue, GenericNode};
use crate::types::Ecosystem;

/// glide.yaml / glide.lock handler
pub struct GlideHandler;

/// 의존성 출처 정보 (manifest / lock 공통)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlideSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subpackages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arch: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub os: Vec<String>,
}

/// glide.yaml의 `import` / `testImport` 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlideDependency {
    pub package: String,
    #[serde(flatten)]
    pub source: GlideSource,
}

/// glide.lock의 `imports` / `testImports` 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlideLockedDependency {
    pub name: String,
    #[serde(flatten)]
    pub source: GlideSource,
}

/// 프로젝트 소유자
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlideOwner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// 정규화된 glide.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlideManifest {
    pub package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub owners: Vec<GlideOwner>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
    #[serde(rename = "excludeDirs", skip_serializing_if = "Vec::is_empty")]
    pub exclude_dirs: Vec<String>,
    #[serde(rename = "import", skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<GlideDependency>,
    #[serde(rename = "testImport", skip_serializing_if = "Vec::is_empty")]
    pub test_imports: Vec<GlideDependency>,
}

/// 정규화된 glide.lock
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlideLock {
    pub hash: Option<String>,
    pub updated: Option<String>,
    #[serde(rename = "import", skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<GlideLockedDependency>,
    #[serde(rename = "testImport", skip_serializing_if = "Vec::is_empty")]
    pub test_imports: Vec<GlideLockedDependency>,
}

/// glide 정규 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlideResult {
    #[serde(flatten)]
    pub manifest: GlideManifest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_tree_lock_file: Option<GlideLock>,
}

impl ManifestHandler for GlideHandler {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Glide
    }

    fn handle(
        &self,
        loader: &FormatLoader,
        manifest: &Path,
        lock: Option<&Path>,
    ) -> Result<HandlerOutput, HandlerError> {
        let manifest_path = manifest.display().to_string();
        let tree = loader.load(manifest, self.ecosystem().format())?;
        let manifest = read_manifest(&tree, &manifest_path)?;
        debug!(
            path = %manifest_path,
            imports = manifest.imports.len(),
            test_imports = manifest.test_imports.len(),
            "glide manifest extracted"
        );

        let lock = match lock {
            Some(lock) => {
                let lock_path = lock.display().to_string();
                let tree = loader.load(lock, self.ecosystem().format())?;
                Some(read_lock(&tree, &lock_path)?)
            }
            None => None,
        };

        Ok(HandlerOutput::Glide(GlideResult {
            manifest,
            dependency_tree_lock_file: lock,
        }))
    }
}

/// glide.yaml 트리를 정규화합니다.
pub fn read_manifest(tree: &GenericNode, source_path: &str) -> Result<GlideManifest, HandlerError> {
    Ok(GlideManifest {
        package: text(tree, "package", source_path),
        license: text(tree, "license", source_path),
        homepage: text(tree, "homepage", source_path),
        owners: entries(tree, "owners", source_path)
            .iter()
            .filter_map(|owner| {
                if owner.as_mapping().is_none() {
                    warn!(path = source_path, found = owner.kind(), "owner entry is not a mapping, skipping");
                    return None;
                }
                Some(GlideOwner {
                    name: text(owner, "name", source_path),
                    email: text(owner, "email", source_path),
                    homepage: text(owner, "homepage", source_path),
                })
            })
            .collect(),
        ignore: strings(tree, "ignore", source_path),
        exclude_dirs: strings(tree, "excludeDirs", source_path),
        imports: dependencies(tree, "import", "package", source_path)?
            .into_iter()
            .map(|(package, source)| GlideDependency { package, source })
            .collect(),
        test_imports: dependencies(tree, "testImport", "package", source_path)?
            .into_iter()
            .map(|(package, source)| GlideDependency { package, source })
            .collect(),
    })
}

/// glide.lock 트리를 정규화합니다.
pub fn read_lock(tree: &GenericNode, source_path: &str) -> Result<GlideLock, HandlerError> {
    Ok(GlideLock {
        hash: text(tree, "hash", source_path),
        updated: text(tree, "updated", source_path),
        imports: dependencies(tree, "imports", "name", source_path)?
            .into_iter()
            .map(|(name, source)| GlideLockedDependency { name, source })
            .collect(),
        test_imports: dependencies(tree, "testImports", "name", source_path)?
            .into_iter()
            .map(|(name, source)| GlideLockedDependency { name, source })
            .collect(),
    })
}

/// 비어 있지 않은 문자열 필드
fn text(node: &GenericNode, key: &str, source_path: &str) -> Option<String> {
    node.str_field(key)
        .tolerate(source_path, key)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// 문자열 시퀀스 필드 (문자열이 아닌 원소와 빈 문자열은 건너뜀)
fn strings(node: &GenericNode, key: &str, source_path: &str) -> Vec<String> {
    entries(node, key, source_path)
        .iter()
        .filter_map(GenericNode::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn entries<'a>(node: &'a GenericNode, key: &str, source_path: &str) -> &'a [GenericNode] {
    node.sequence_field(key)
        .tolerate(source_path, key)
        .unwrap_or_default()
}

/// 의존성 목록을 (이름, 출처) 쌍으로 읽습니다. 이름이 없는 항목은 `SchemaMismatch`입니다.
fn dependencies(
    node: &GenericNode,
    key: &str,
    name_key: &str,
    source_path: &str,
) -> Result<Vec<(String, GlideSource)>, HandlerError> {
    entries(node, key, source_path)
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let field = format!("{key}[{index}].{name_key}");
            let name = match entry.str_field(name_key) {
                FieldValue::Value(name) if !name.is_empty() => name.to_owned(),
                FieldValue::Value(_) | FieldValue::Absent => {
                    return Err(HandlerError::SchemaMismatch {
                        path: source_path.to_owned(),
                        field,
                        reason: "required string field is missing".to_owned(),
                    });
                }
                FieldValue::Mismatch { expected, found } => {
                    return Err(HandlerError::SchemaMismatch {
                        path: source_path.to_owned(),
                        field,
                        reason: format!("expected {expected}, found {found}"),
                    });
                }
            };
            let source = GlideSource {
                version: text(entry, "version", source_path),
                repo: text(entry, "repo", source_path),
                vcs: text(entry, "vcs", source_path),
                subpackages: strings(entry, "subpackages", source_path),
                arch: strings(entry, "arch", source_path),
                os: strings(entry, "os", source_path),
            };
            Ok((name, source))
        })
        .collect()
}
