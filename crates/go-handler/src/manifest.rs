//! 제약 조건 추출기 -- Gopkg.toml의 `constraint` / `override` 목록
//!
//! 각 항목은 해석하지 않고 그대로 통과시킵니다. 최상위 필드의 타입(시퀀스인지)만
//! 확인하며, 타입이 다르면 실패 대신 빈 시퀀스로 대체합니다.

use tracing::warn;

use crate::node::GenericNode;

/// manifest의 선언 필드 이름
pub const CONSTRAINT_FIELD: &str = "constraint";
pub const OVERRIDE_FIELD: &str = "override";

/// manifest에서 추출한 선언 목록
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    /// `constraint` 항목 (불투명 payload)
    pub constraint: Vec<GenericNode>,
    /// `override` 항목 (불투명 payload)
    pub overrides: Vec<GenericNode>,
}

/// manifest 트리에서 `constraint`와 `override`를 추출합니다.
///
/// 필드가 없거나 시퀀스가 아니면 빈 목록을 돌려줍니다.
pub fn extract_constraints(manifest: &GenericNode, source_path: &str) -> ConstraintSet {
    if manifest.as_mapping().is_none() {
        warn!(
            path = source_path,
            found = manifest.kind(),
            "manifest root is not a mapping, no constraints extracted"
        );
        return ConstraintSet::default();
    }

    ConstraintSet {
        constraint: declared_list(manifest, CONSTRAINT_FIELD, source_path),
        overrides: declared_list(manifest, OVERRIDE_FIELD, source_path),
    }
}

fn declared_list(manifest: &GenericNode, field: &str, source_path: &str) -> Vec<GenericNode> {
    manifest
        .sequence_field(field)
        .tolerate(source_path, field)
        .map(<[GenericNode]>::to_vec)
        .unwrap_or_default()
}
