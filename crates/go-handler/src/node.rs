//! 범용 문서 트리 -- 모든 입력 형식의 공통 표현
//!
//! [`GenericNode`]는 TOML / JSON / YAML 문서를 파싱한 결과를 형식과 무관하게 표현합니다.
//! 이후의 모든 추출은 이 트리 위의 타입이 지정된 접근자([`GenericNode::sequence_field`] 등)를
//! 통해서만 이루어지며, 각 접근자는 "없음"과 "형식 불일치"를 구분하여 돌려줍니다.
//!
//! 매핑은 문서에 나타난 키 순서를 유지합니다.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tracing::warn;

/// 숫자 값
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// 부호 있는 정수
    Integer(i64),
    /// i64 범위를 넘는 부호 없는 정수 (JSON / YAML)
    Unsigned(u64),
    /// 부동소수점
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

/// 순서를 유지하는 문자열 키 매핑
///
/// 두 매핑은 같은 키-값 쌍이 같은 순서로 나타날 때만 같습니다.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, GenericNode>,
}

impl Mapping {
    /// 빈 매핑을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 키-값을 추가합니다. 같은 키가 이미 있으면 값만 교체하고 위치는 유지합니다.
    pub fn insert(&mut self, key: impl Into<String>, value: GenericNode) {
        self.entries.insert(key.into(), value);
    }

    /// 키로 값을 조회합니다.
    pub fn get(&self, key: &str) -> Option<&GenericNode> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 문서 순서대로 키-값을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GenericNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl FromIterator<(String, GenericNode)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, GenericNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// 형식 독립 문서 노드
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenericNode {
    #[default]
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
    Sequence(Vec<GenericNode>),
    Mapping(Mapping),
}

/// 타입이 지정된 필드 조회 결과
///
/// 값이 없거나 `Null`이면 [`FieldValue::Absent`], 기대한 타입이 아니면
/// [`FieldValue::Mismatch`]입니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<T> {
    Absent,
    Value(T),
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl<T> FieldValue<T> {
    /// 값이 있으면 `Some`, 없거나 타입이 다르면 `None`을 돌려줍니다.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Mismatch { .. } => None,
        }
    }

    /// 관대한 읽기: 형식 불일치를 경고로 남기고 "없음"으로 취급합니다.
    ///
    /// `source`와 `field`는 로그에만 사용됩니다.
    pub fn tolerate(self, source: &str, field: &str) -> Option<T> {
        if let Self::Mismatch { expected, found } = self {
            warn!(
                path = source,
                field,
                expected,
                found,
                "field has unexpected type, treating as absent"
            );
            metrics::counter!(depscribe_core::metrics::TOLERATED_MISMATCHES_TOTAL).increment(1);
        }
        self.into_option()
    }
}

impl GenericNode {
    /// 노드 종류 이름 (로그 / 에러 메시지용)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[GenericNode]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// 매핑이면 키로 값을 조회합니다. 매핑이 아니면 항상 `None`입니다.
    pub fn get(&self, key: &str) -> Option<&GenericNode> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// 문자열 필드를 조회합니다.
    pub fn str_field(&self, key: &str) -> FieldValue<&str> {
        self.typed_field(key, "string", GenericNode::as_str)
    }

    /// 시퀀스 필드를 조회합니다.
    pub fn sequence_field(&self, key: &str) -> FieldValue<&[GenericNode]> {
        self.typed_field(key, "sequence", GenericNode::as_sequence)
    }

    fn typed_field<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a GenericNode) -> Option<T>,
    ) -> FieldValue<T> {
        match self.get(key) {
            None | Some(GenericNode::Null) => FieldValue::Absent,
            Some(node) => match extract(node) {
                Some(value) => FieldValue::Value(value),
                None => FieldValue::Mismatch {
                    expected,
                    found: node.kind(),
                },
            },
        }
    }
}

impl From<&str> for GenericNode {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for GenericNode {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Mapping> for GenericNode {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl From<Vec<GenericNode>> for GenericNode {
    fn from(items: Vec<GenericNode>) -> Self {
        Self::Sequence(items)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Unsigned(n) => serializer.serialize_u64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for GenericNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(m) => m.serialize(serializer),
        }
    }
}
