//! depscribe Go handler
//!
//! Go 패키지 관리 도구(dep, glide, godep)의 manifest와 lock 파일을 읽어
//! 외부 스캐닝 엔진이 소비하는 정규 JSON 결과를 만듭니다.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`HandlerError`)
//! - [`config`]: Handler configuration (`GoHandlerConfig`)
//! - [`types`]: Domain types (`Ecosystem`, `Format`)
//! - [`node`]: Format-neutral document tree (`GenericNode`, `Mapping`, `FieldValue`)
//! - [`loader`]: Size-limited file loading and TOML/JSON/YAML parsing (`FormatLoader`)
//! - [`manifest`]: Gopkg.toml constraint extraction (`ConstraintSet`)
//! - [`lock`]: Gopkg.lock flattening (`PackageRecord`, `reconcile`)
//! - [`result`]: dep result assembly (`ReconciledResult`)
//! - [`handler`]: Per-ecosystem handlers (`ManifestHandler` trait, `DepHandler`, `GlideHandler`, `GodepHandler`)
//! - [`invocation`]: One-shot orchestration (`Invocation`)
//!
//! # Architecture
//!
//! ```text
//! Invocation --> resolve Ecosystem --> handler_for --> ManifestHandler
//!                                                           |
//!                          +--------------------------------+
//!                          |
//!                    FormatLoader (manifest) --> extract --+
//!                    FormatLoader (lock)     --> reconcile -+--> HandlerOutput --> JSON line
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod invocation;
pub mod loader;
pub mod lock;
pub mod manifest;
pub mod node;
pub mod result;
pub mod types;

// --- Public API Re-exports ---

// Orchestration
pub use invocation::Invocation;

// Configuration
pub use config::GoHandlerConfig;

// Error
pub use error::HandlerError;

// Types
pub use node::{FieldValue, GenericNode, Mapping, Number};
pub use types::{Ecosystem, Format};

// Loader
pub use loader::FormatLoader;

// dep
pub use lock::{PackageRecord, reconcile};
pub use manifest::{ConstraintSet, extract_constraints};
pub use result::{LockSection, ReconciledResult, assemble};

// Handlers
pub use handler::{
    DepHandler, GlideHandler, GlideResult, GodepHandler, HandlerOutput, ManifestHandler,
    handler_for,
};
