//! 형식 로더 -- 입력 파일을 [`GenericNode`] 트리로 파싱
//!
//! [`FormatLoader`]는 파일을 열고, 크기를 확인하고, 선언된 형식으로 전체를 파싱한 뒤
//! 파일 핸들을 닫습니다. 에러 경로를 포함한 모든 경로에서 핸들은 함수 범위를 벗어나며
//! 해제되고, 부분적으로 파싱된 트리는 절대 노출되지 않습니다.
//!
//! # 형식별 변환 규칙
//!
//! - TOML datetime은 RFC 3339 문자열 노드가 됩니다.
//! - YAML 태그는 버리고 태그된 값만 유지합니다.
//! - YAML 매핑의 스칼라 키는 문자열로 변환하고, 스칼라가 아닌 키는 파싱 에러입니다.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::HandlerError;
use crate::node::{GenericNode, Mapping, Number};
use crate::types::Format;

/// 파일 기반 형식 로더
#[derive(Debug, Clone, Copy)]
pub struct FormatLoader {
    max_file_size: u64,
}

impl FormatLoader {
    /// 최대 파일 크기(바이트)를 지정하여 로더를 생성합니다.
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// 파일을 읽어 선언된 형식으로 파싱합니다.
    ///
    /// - 열 수 없거나 읽을 수 없는 파일: [`HandlerError::FileNotFound`]
    /// - 크기 초과: [`HandlerError::FileTooBig`]
    /// - UTF-8이 아니거나 문법 위반: [`HandlerError::Parse`]
    pub fn load(&self, path: &Path, format: Format) -> Result<GenericNode, HandlerError> {
        let display = path.display().to_string();

        let mut file = File::open(path).map_err(|e| HandlerError::FileNotFound {
            path: display.clone(),
            source: e,
        })?;

        let metadata = file.metadata().map_err(|e| HandlerError::FileNotFound {
            path: display.clone(),
            source: e,
        })?;
        if metadata.is_dir() {
            return Err(HandlerError::FileNotFound {
                path: display,
                source: std::io::Error::other("path is a directory"),
            });
        }
        if metadata.len() > self.max_file_size {
            return Err(HandlerError::FileTooBig {
                path: display,
                size: metadata.len(),
                max: self.max_file_size,
            });
        }

        // 메타데이터 이후 파일이 커지는 경우를 대비해 상한 + 1 바이트까지만 읽음
        let mut content = String::new();
        let read = file
            .by_ref()
            .take(self.max_file_size + 1)
            .read_to_string(&mut content)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::InvalidData {
                    HandlerError::Parse {
                        path: display.clone(),
                        reason: "content is not valid UTF-8".to_owned(),
                    }
                } else {
                    HandlerError::FileNotFound {
                        path: display.clone(),
                        source: e,
                    }
                }
            })?;
        if read as u64 > self.max_file_size {
            return Err(HandlerError::FileTooBig {
                path: display,
                size: read as u64,
                max: self.max_file_size,
            });
        }

        debug!(path = %path.display(), %format, bytes = read, "input file read");
        metrics::counter!(
            depscribe_core::metrics::FILES_LOADED_TOTAL,
            depscribe_core::metrics::LABEL_FORMAT => format.to_string()
        )
        .increment(1);

        parse_str(&content, format, &display)
    }
}

/// 문자열을 선언된 형식으로 파싱합니다.
///
/// `source_path`는 에러 메시지에만 사용됩니다.
pub fn parse_str(
    content: &str,
    format: Format,
    source_path: &str,
) -> Result<GenericNode, HandlerError> {
    let parse_err = |reason: String| HandlerError::Parse {
        path: source_path.to_owned(),
        reason,
    };

    match format {
        Format::Toml => {
            let table: toml::Table = toml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
            Ok(from_toml_table(table))
        }
        Format::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?;
            Ok(from_json(value))
        }
        Format::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
            from_yaml(value).map_err(parse_err)
        }
    }
}

fn from_toml_table(table: toml::Table) -> GenericNode {
    GenericNode::Mapping(
        table
            .into_iter()
            .map(|(k, v)| (k, from_toml(v)))
            .collect(),
    )
}

fn from_toml(value: toml::Value) -> GenericNode {
    match value {
        toml::Value::String(s) => GenericNode::String(s),
        toml::Value::Integer(n) => GenericNode::Number(Number::Integer(n)),
        toml::Value::Float(n) => GenericNode::Number(Number::Float(n)),
        toml::Value::Boolean(b) => GenericNode::Boolean(b),
        toml::Value::Datetime(dt) => GenericNode::String(dt.to_string()),
        toml::Value::Array(items) => {
            GenericNode::Sequence(items.into_iter().map(from_toml).collect())
        }
        toml::Value::Table(table) => from_toml_table(table),
    }
}

fn from_json(value: serde_json::Value) -> GenericNode {
    match value {
        serde_json::Value::Null => GenericNode::Null,
        serde_json::Value::Bool(b) => GenericNode::Boolean(b),
        serde_json::Value::Number(n) => GenericNode::Number(json_number(&n)),
        serde_json::Value::String(s) => GenericNode::String(s),
        serde_json::Value::Array(items) => {
            GenericNode::Sequence(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => GenericNode::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect(),
        ),
    }
}

fn json_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Number::Unsigned(u)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Number::Unsigned(u)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn from_yaml(value: serde_yaml::Value) -> Result<GenericNode, String> {
    Ok(match value {
        serde_yaml::Value::Null => GenericNode::Null,
        serde_yaml::Value::Bool(b) => GenericNode::Boolean(b),
        serde_yaml::Value::Number(n) => GenericNode::Number(yaml_number(&n)),
        serde_yaml::Value::String(s) => GenericNode::String(s),
        serde_yaml::Value::Sequence(items) => GenericNode::Sequence(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut mapping = Mapping::new();
            for (key, value) in map {
                mapping.insert(yaml_key(key)?, from_yaml(value)?);
            }
            GenericNode::Mapping(mapping)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok("null".to_owned()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
            Err("mapping keys must be scalars".to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_toml_preserves_key_order() {
        let node = parse_str("zeta = 1\nalpha = \"a\"\n", Format::Toml, "test.toml").unwrap();
        let keys: Vec<&str> = node.as_mapping().unwrap().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn parse_toml_array_of_tables() {
        let toml = r#"
[[projects]]
name = "github.com/foo/bar"
packages = ["."]

[[projects]]
name = "github.com/baz/qux"
"#;
        let node = parse_str(toml, Format::Toml, "Gopkg.lock").unwrap();
        let projects = node.get("projects").and_then(GenericNode::as_sequence).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].get("name").and_then(GenericNode::as_str), Some("github.com/baz/qux"));
    }

    #[test]
    fn parse_toml_datetime_becomes_string() {
        let node = parse_str("at = 1979-05-27T07:32:00Z\n", Format::Toml, "t.toml").unwrap();
        assert_eq!(node.get("at").and_then(GenericNode::as_str), Some("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn parse_invalid_toml_returns_parse_error() {
        let err = parse_str("[[projects]\nname = ", Format::Toml, "Gopkg.lock").unwrap_err();
        assert!(matches!(err, HandlerError::Parse { ref path, .. } if path == "Gopkg.lock"));
    }

    #[test]
    fn parse_json_object() {
        let node = parse_str(r#"{"b": [1, 2.5, null], "a": true}"#, Format::Json, "x.json").unwrap();
        let keys: Vec<&str> = node.as_mapping().unwrap().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(
            node.get("b").and_then(GenericNode::as_sequence).map(<[GenericNode]>::len),
            Some(3)
        );
    }

    #[test]
    fn parse_invalid_json_returns_error() {
        assert!(parse_str("not json!", Format::Json, "Godeps.json").is_err());
    }

    #[test]
    fn parse_yaml_with_scalar_keys_and_tags() {
        let yaml = "package: example\n1: one\ntrue: yes-key\nvalue: !custom tagged\n";
        let node = parse_str(yaml, Format::Yaml, "glide.yaml").unwrap();
        assert_eq!(node.get("1").and_then(GenericNode::as_str), Some("one"));
        assert_eq!(node.get("true").and_then(GenericNode::as_str), Some("yes-key"));
        assert_eq!(node.get("value").and_then(GenericNode::as_str), Some("tagged"));
    }

    #[test]
    fn parse_yaml_rejects_complex_keys() {
        let yaml = "? [a, b]\n: value\n";
        let err = parse_str(yaml, Format::Yaml, "glide.yaml").unwrap_err();
        assert!(err.to_string().contains("scalars"));
    }

    #[test]
    fn wide_json_object_parses_quickly() {
        const KEYS: usize = 100_000;
        let body: Vec<String> = (0..KEYS).map(|i| format!("\"k{i}\": {i}")).collect();
        let json = format!("{{{}}}", body.join(","));

        let start = std::time::Instant::now();
        let node = parse_str(&json, Format::Json, "Godeps.json").unwrap();
        let elapsed = start.elapsed();

        assert_eq!(node.as_mapping().map(Mapping::len), Some(KEYS));
        assert!(
            elapsed < std::time::Duration::from_secs(10),
            "parsing {KEYS} keys took {elapsed:?}"
        );
    }

    #[test]
    fn load_missing_file_is_file_not_found() {
        let loader = FormatLoader::new(1024);
        let err = loader
            .load(Path::new("/nonexistent/Gopkg.toml"), Format::Toml)
            .unwrap_err();
        assert!(matches!(err, HandlerError::FileNotFound { .. }));
    }

    #[test]
    fn load_directory_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FormatLoader::new(1024)
            .load(dir.path(), Format::Toml)
            .unwrap_err();
        assert!(matches!(err, HandlerError::FileNotFound { .. }));
    }

    #[test]
    fn load_rejects_oversized_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'#'; 64]).unwrap();
        let err = FormatLoader::new(16)
            .load(file.path(), Format::Toml)
            .unwrap_err();
        assert!(matches!(err, HandlerError::FileTooBig { size: 64, max: 16, .. }));
    }

    #[test]
    fn load_rejects_non_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x41]).unwrap();
        let err = FormatLoader::new(1024)
            .load(file.path(), Format::Toml)
            .unwrap_err();
        assert!(matches!(err, HandlerError::Parse { .. }));
    }

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[[constraint]]\nname = \"x\"\n").unwrap();
        let node = FormatLoader::new(1024)
            .load(file.path(), Format::Toml)
            .unwrap();
        assert!(node.get("constraint").is_some());
    }
}
