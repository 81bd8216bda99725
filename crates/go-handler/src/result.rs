//! 결과 조립 -- 제약 조건 + 평탄화된 lock을 정규 결과로 병합
//!
//! `dependency_tree_lock_file` 필드는 lock 문서가 주어지지 않았을 때 **완전히 생략**됩니다.
//! lock이 주어졌지만 패키지가 없으면 `{"packages": []}`로 남습니다.
//! 두 상태는 외부 스캐닝 엔진이 구분하므로 합쳐서는 안 됩니다.

use serde::Serialize;

use crate::lock::PackageRecord;
use crate::manifest::ConstraintSet;
use crate::node::GenericNode;

/// 평탄화된 lock 섹션
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LockSection {
    pub packages: Vec<PackageRecord>,
}

/// dep 정규 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledResult {
    pub constraint: Vec<GenericNode>,
    #[serde(rename = "override")]
    pub overrides: Vec<GenericNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_tree_lock_file: Option<LockSection>,
}

impl ReconciledResult {
    /// lock 문서가 주어졌는지 여부
    pub fn has_lock(&self) -> bool {
        self.dependency_tree_lock_file.is_some()
    }

    /// 평탄화된 패키지 수 (lock이 없으면 0)
    pub fn package_count(&self) -> usize {
        self.dependency_tree_lock_file
            .as_ref()
            .map_or(0, |lock| lock.packages.len())
    }
}

/// 추출 결과를 정규 결과로 조립합니다.
///
/// `packages`가 `None`이면 lock 문서가 주어지지 않은 것으로 보고 lock 필드를 생략합니다.
pub fn assemble(constraints: ConstraintSet, packages: Option<Vec<PackageRecord>>) -> ReconciledResult {
    ReconciledResult {
        constraint: constraints.constraint,
        overrides: constraints.overrides,
        dependency_tree_lock_file: packages.map(|packages| LockSection { packages }),
    }
}
