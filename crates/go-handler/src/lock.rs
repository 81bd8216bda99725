//! Lock 평탄화 -- Gopkg.lock의 프로젝트 항목을 패키지 레코드로 변환
//!
//! 하나의 프로젝트는 여러 하위 패키지를 노출할 수 있습니다. 각 하위 패키지는
//! 정확히 하나의 [`PackageRecord`]가 되며, 출력 순서는 (프로젝트 순서, 하위 패키지 순서)입니다.
//! 하류 소비자가 직렬화된 시퀀스를 해시할 수 있으므로 이 순서는 정확성 요건입니다.
//!
//! # Gopkg.lock 예시
//!
//! ```toml
//! [[projects]]
//!   name = "github.com/foo/bar"
//!   packages = [".", "sub"]
//!   revision = "abc123"
//!   version = "v1.0.0"
//! ```
//!
//! 위 항목은 `github.com/foo/bar`와 `github.com/foo/bar/sub` 두 레코드가 됩니다.
//!
//! # 누락 필드
//!
//! - `packages`가 없으면 해당 프로젝트는 레코드를 만들지 않습니다 (루트 패키지도 포함하지 않음).
//! - `name` 또는 `revision`이 없으면 [`HandlerError::SchemaMismatch`]입니다.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::HandlerError;
use crate::node::{FieldValue, GenericNode};

/// 프로젝트 자신의 루트 패키지를 가리키는 하위 패키지 식별자
pub const ROOT_PACKAGE: &str = ".";

/// lock 문서의 프로젝트 목록 필드
pub const PROJECTS_FIELD: &str = "projects";

/// 평탄화된 패키지-버전 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    /// import 경로
    pub name: String,
    /// 고정된 VCS revision
    pub revision: String,
    /// 버전 태그 (lock 항목에 있을 때만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// lock 문서의 프로젝트 항목 (원본 트리를 빌려 씀)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry<'a> {
    pub name: &'a str,
    pub revision: &'a str,
    pub version: Option<&'a str>,
    pub packages: Vec<&'a str>,
}

impl<'a> ProjectEntry<'a> {
    /// 프로젝트 항목 노드를 읽습니다.
    ///
    /// `index`는 에러 메시지의 필드 경로(`projects[index].name`)에 사용됩니다.
    pub fn from_node(
        node: &'a GenericNode,
        index: usize,
        source_path: &str,
    ) -> Result<Self, HandlerError> {
        if node.as_mapping().is_none() {
            return Err(HandlerError::SchemaMismatch {
                path: source_path.to_owned(),
                field: format!("{PROJECTS_FIELD}[{index}]"),
                reason: format!("expected mapping, found {}", node.kind()),
            });
        }

        let name = required_str(node, "name", index, source_path)?;
        let revision = required_str(node, "revision", index, source_path)?;
        let field_path = |field: &str| format!("{PROJECTS_FIELD}[{index}].{field}");

        let version = node
            .str_field("version")
            .tolerate(source_path, &field_path("version"));

        let packages = node
            .sequence_field("packages")
            .tolerate(source_path, &field_path("packages"))
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(i, pkg)| {
                let sub = pkg.as_str();
                if sub.is_none() {
                    warn!(
                        path = source_path,
                        field = %field_path(&format!("packages[{i}]")),
                        found = pkg.kind(),
                        "subpackage identifier is not a string, skipping"
                    );
                }
                sub
            })
            .collect();

        Ok(Self {
            name,
            revision,
            version,
            packages,
        })
    }

    /// 하위 패키지 식별자의 전체 import 경로
    ///
    /// `"."`는 프로젝트 이름 그대로, 나머지는 플랫폼과 무관하게 `/`로 잇습니다.
    pub fn package_name(&self, subpackage: &str) -> String {
        if subpackage == ROOT_PACKAGE {
            self.name.to_owned()
        } else {
            format!("{}/{}", self.name, subpackage)
        }
    }

    /// 이 프로젝트가 만드는 레코드 (하위 패키지 순서)
    pub fn records(&self) -> impl Iterator<Item = PackageRecord> + '_ {
        self.packages.iter().map(|sub| PackageRecord {
            name: self.package_name(sub),
            revision: self.revision.to_owned(),
            version: self.version.map(str::to_owned),
        })
    }
}

fn required_str<'a>(
    node: &'a GenericNode,
    field: &str,
    index: usize,
    source_path: &str,
) -> Result<&'a str, HandlerError> {
    let reason = match node.str_field(field) {
        FieldValue::Value(s) => return Ok(s),
        FieldValue::Absent => "required string field is missing".to_owned(),
        FieldValue::Mismatch { expected, found } => {
            format!("expected {expected}, found {found}")
        }
    };
    Err(HandlerError::SchemaMismatch {
        path: source_path.to_owned(),
        field: format!("{PROJECTS_FIELD}[{index}].{field}"),
        reason,
    })
}

/// lock 트리의 프로젝트 항목을 문서 순서대로 읽습니다.
///
/// `projects`가 없거나 시퀀스가 아니면 빈 목록입니다.
pub fn read_projects<'a>(
    lock: &'a GenericNode,
    source_path: &str,
) -> Result<Vec<ProjectEntry<'a>>, HandlerError> {
    lock.sequence_field(PROJECTS_FIELD)
        .tolerate(source_path, PROJECTS_FIELD)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, node)| ProjectEntry::from_node(node, index, source_path))
        .collect()
}

/// lock 트리를 패키지 레코드 시퀀스로 평탄화합니다.
pub fn reconcile(lock: &GenericNode, source_path: &str) -> Result<Vec<PackageRecord>, HandlerError> {
    let projects = read_projects(lock, source_path)?;

    let mut records = Vec::new();
    for project in &projects {
        if project.packages.is_empty() {
            debug!(
                path = source_path,
                project = project.name,
                "project lists no packages, contributes no records"
            );
        }
        records.extend(project.records());
    }

    debug!(
        path = source_path,
        projects = projects.len(),
        packages = records.len(),
        "lock reconciled"
    );
    metrics::counter!(depscribe_core::metrics::PACKAGES_RECONCILED_TOTAL)
        .increment(records.len() as u64);

    Ok(records)
}
