//! 도메인 타입 -- 지원 생태계와 입력 직렬화 형식

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// 입력 파일 직렬화 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => write!(f, "toml"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Go 패키지 관리 생태계
///
/// 닫힌 열거형이므로 생태계 추가/삭제는 모든 `match`에서 컴파일 에러로 드러납니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ecosystem {
    /// golang/dep (Gopkg.toml, Gopkg.lock)
    Dep,
    /// Masterminds/glide (glide.yaml, glide.lock)
    Glide,
    /// tools/godep (Godeps.json)
    Godep,
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dep => write!(f, "dep"),
            Self::Glide => write!(f, "glide"),
            Self::Godep => write!(f, "godep"),
        }
    }
}

impl Ecosystem {
    /// 모든 생태계 (선언 순서)
    pub const ALL: [Ecosystem; 3] = [Self::Dep, Self::Glide, Self::Godep];

    /// manifest 파일명
    pub fn manifest_filename(&self) -> &'static str {
        match self {
            Self::Dep => "Gopkg.toml",
            Self::Glide => "glide.yaml",
            Self::Godep => "Godeps.json",
        }
    }

    /// lock 파일명 (lock 파일이 없는 생태계는 `None`)
    pub fn lock_filename(&self) -> Option<&'static str> {
        match self {
            Self::Dep => Some("Gopkg.lock"),
            Self::Glide => Some("glide.lock"),
            Self::Godep => None,
        }
    }

    /// manifest와 lock 파일의 직렬화 형식
    pub fn format(&self) -> Format {
        match self {
            Self::Dep => Format::Toml,
            Self::Glide => Format::Yaml,
            Self::Godep => Format::Json,
        }
    }

    /// 문자열에서 생태계를 파싱합니다 (대소문자 구분 없음).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dep" | "gopkg" | "golang-dep" => Some(Self::Dep),
            "glide" => Some(Self::Glide),
            "godep" | "godeps" => Some(Self::Godep),
            _ => None,
        }
    }

    /// manifest 파일명으로 생태계를 판별합니다.
    pub fn detect(path: &Path) -> Option<Self> {
        let file_name = path.file_name().and_then(|n| n.to_str())?;

        Self::ALL
            .into_iter()
            .find(|eco| eco.manifest_filename() == file_name)
    }
}
