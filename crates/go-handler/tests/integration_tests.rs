//! Integration tests for the Go handler
//!
//! Tests the full flow: manifest/lock files on disk -> Invocation -> one JSON line

use std::path::{Path, PathBuf};

use depscribe_core::config::DepscribeConfig;
use depscribe_go_handler::{Ecosystem, GoHandlerConfig, HandlerError, HandlerOutput, Invocation};

/// Directory holding one manifest (and optional lock) per ecosystem.
struct FixtureSet {
    root: PathBuf,
}

impl FixtureSet {
    fn bundled() -> Self {
        Self {
            root: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("fixtures"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn manifest(&self, eco: Ecosystem) -> PathBuf {
        self.path(eco.manifest_filename())
    }

    fn lock(&self, eco: Ecosystem) -> Option<PathBuf> {
        eco.lock_filename().map(|name| self.path(name))
    }

    fn invocation(&self, eco: Ecosystem) -> Invocation {
        let inv = Invocation::new(self.manifest(eco));
        match self.lock(eco) {
            Some(lock) => inv.with_lock(lock),
            None => inv,
        }
    }
}

/// Expected output for the bundled fixtures, with the lock file supplied.
fn expected_output(eco: Ecosystem) -> String {
    match eco {
        Ecosystem::Dep => concat!(
            r#"{"constraint":["#,
            r#"{"name":"github.com/pkg/errors","version":"0.8.0"},"#,
            r#"{"name":"gopkg.in/yaml.v2","branch":"v2"}],"#,
            r#""override":[{"name":"github.com/golang/protobuf","revision":"130e6b02ab059e7b717a096f397c5b60111cae74"}],"#,
            r#""dependency_tree_lock_file":{"packages":["#,
            r#"{"name":"github.com/golang/protobuf/proto","revision":"130e6b02ab059e7b717a096f397c5b60111cae74"},"#,
            r#"{"name":"github.com/golang/protobuf/ptypes/any","revision":"130e6b02ab059e7b717a096f397c5b60111cae74"},"#,
            r#"{"name":"github.com/pkg/errors","revision":"645ef00459ed84a119197bfb8d8205042c6df63d","version":"v0.8.0"},"#,
            r#"{"name":"gopkg.in/yaml.v2","revision":"eb3733d160e74a9c7e442f435eb3bea458e1d19f"}]}}"#
        )
        .to_owned(),
        Ecosystem::Glide => concat!(
            r#"{"package":"github.com/example/app","license":"MIT","#,
            r#""owners":[{"name":"Jane Doe","email":"jane@example.com","homepage":"https://example.com"}],"#,
            r#""ignore":["appengine"],"#,
            r#""import":[{"package":"github.com/pkg/errors","version":"^0.8.0"},"#,
            r#"{"package":"golang.org/x/net","repo":"https://go.googlesource.com/net","vcs":"git","subpackages":["context","http2"]}],"#,
            r#""testImport":[{"package":"github.com/stretchr/testify","version":"^1.1.4","subpackages":["assert"]}],"#,
            r#""dependency_tree_lock_file":{"#,
            r#""hash":"6a3f2d0b1c9e8f7a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d0e9f8a7b6c5d4e3f2a","#,
            r#""updated":"2017-10-05T10:13:04.226716+02:00","#,
            r#""import":[{"name":"github.com/pkg/errors","version":"645ef00459ed84a119197bfb8d8205042c6df63d"},"#,
            r#"{"name":"golang.org/x/net","version":"66aacef3dd8a676686c7ae3716979581e8b03c47","repo":"https://go.googlesource.com/net","vcs":"git","subpackages":["context","http2"]}],"#,
            r#""testImport":[{"name":"github.com/stretchr/testify","version":"69483b4bd14f5845b5a1e55bca19e954e827f1d0","subpackages":["assert"]}]}}"#
        )
        .to_owned(),
        Ecosystem::Godep => {
            let raw = std::fs::read_to_string(FixtureSet::bundled().path("Godeps.json")).unwrap();
            let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
            serde_json::to_string(&value).unwrap()
        }
    }
}

fn run(inv: &Invocation) -> Result<String, HandlerError> {
    let out = inv.run(&GoHandlerConfig::default())?;
    Ok(out.to_json_line().unwrap())
}

#[test]
fn test_every_ecosystem_matches_expected_output() {
    let fixtures = FixtureSet::bundled();
    for eco in Ecosystem::ALL {
        let json = run(&fixtures.invocation(eco)).unwrap();
        assert_eq!(json, expected_output(eco), "ecosystem {eco}");
        assert!(!json.contains('\n'), "output must be a single line");
    }
}

#[test]
fn test_ecosystem_is_detected_from_manifest_filename() {
    let fixtures = FixtureSet::bundled();
    for eco in Ecosystem::ALL {
        let inv = fixtures.invocation(eco);
        assert_eq!(inv.resolve_ecosystem(&GoHandlerConfig::default()), eco);
    }
}

#[test]
fn test_output_is_idempotent() {
    let fixtures = FixtureSet::bundled();
    for eco in Ecosystem::ALL {
        let inv = fixtures.invocation(eco);
        assert_eq!(run(&inv).unwrap(), run(&inv).unwrap());
    }
}

#[test]
fn test_dep_without_lock_omits_lock_field() {
    let fixtures = FixtureSet::bundled();
    let json = run(&Invocation::new(fixtures.manifest(Ecosystem::Dep))).unwrap();
    assert!(json.starts_with(r#"{"constraint":[{"name":"github.com/pkg/errors","version":"0.8.0"}"#));
    assert!(json.ends_with(r#""override":[{"name":"github.com/golang/protobuf","revision":"130e6b02ab059e7b717a096f397c5b60111cae74"}]}"#));
    assert!(!json.contains("dependency_tree_lock_file"));
}

#[test]
fn test_glide_without_lock_omits_lock_field() {
    let fixtures = FixtureSet::bundled();
    let out = Invocation::new(fixtures.manifest(Ecosystem::Glide))
        .run(&GoHandlerConfig::default())
        .unwrap();
    let HandlerOutput::Glide(result) = out else {
        panic!("expected glide output");
    };
    assert!(result.dependency_tree_lock_file.is_none());
    assert_eq!(result.manifest.imports.len(), 2);
}

#[test]
fn test_lock_missing_revision_is_schema_mismatch() {
    let fixtures = FixtureSet::bundled();
    let err = run(
        &Invocation::new(fixtures.manifest(Ecosystem::Dep)).with_lock(fixtures.path("Gopkg.bad.lock")),
    )
    .unwrap_err();
    match err {
        HandlerError::SchemaMismatch { path, field, .. } => {
            assert!(path.ends_with("Gopkg.bad.lock"));
            assert_eq!(field, "projects[0].revision");
        }
        other => panic!("expected schema mismatch, got {other}"),
    }
}

#[test]
fn test_malformed_lock_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let lock = dir.path().join("Gopkg.lock");
    std::fs::write(&lock, "[[projects]\nname = ").unwrap();

    let fixtures = FixtureSet::bundled();
    let err = run(&Invocation::new(fixtures.manifest(Ecosystem::Dep)).with_lock(&lock)).unwrap_err();
    assert!(matches!(err, HandlerError::Parse { .. }));
    assert_eq!(err.kind(), "parse");
}

#[test]
fn test_missing_lock_file_is_not_found() {
    let fixtures = FixtureSet::bundled();
    let err = run(
        &Invocation::new(fixtures.manifest(Ecosystem::Dep)).with_lock(fixtures.path("missing.lock")),
    )
    .unwrap_err();
    assert!(matches!(err, HandlerError::FileNotFound { .. }));
}

#[test]
fn test_renamed_manifest_uses_explicit_ecosystem() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("deps.yml");
    std::fs::copy(FixtureSet::bundled().manifest(Ecosystem::Glide), &manifest).unwrap();

    let json = run(&Invocation::new(&manifest).with_ecosystem(Ecosystem::Glide)).unwrap();
    assert!(json.starts_with(r#"{"package":"github.com/example/app""#));
}

#[test]
fn test_config_defaults_drive_invocation() {
    let core = DepscribeConfig::default();
    let config = GoHandlerConfig::from_core(&core.handler).unwrap();
    assert_eq!(config.default_ecosystem, Ecosystem::Dep);

    let fixtures = FixtureSet::bundled();
    let manifest: &Path = &fixtures.manifest(Ecosystem::Dep);
    let out = Invocation::new(manifest).run(&config).unwrap();
    assert!(matches!(out, HandlerOutput::Dep(_)));
}
