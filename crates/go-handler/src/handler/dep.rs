//! golang/dep handler -- Gopkg.toml + Gopkg.lock
//!
//! 처리 순서:
//!
//! ```text
//! LoadManifest -> ExtractConstraints -> [LoadLock -> Reconcile] -> Assemble
//! ```

use std::path::Path;

use tracing::debug;

use crate::error::HandlerError;
use crate::handler::{HandlerOutput, ManifestHandler};
use crate::loader::FormatLoader;
use crate::lock::reconcile;
use crate::manifest::extract_constraints;
use crate::result::assemble;
use crate::types::Ecosystem;

/// Gopkg.toml / Gopkg.lock handler
pub struct DepHandler;

impl ManifestHandler for DepHandler {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Dep
    }

    fn handle(
        &self,
        loader: &FormatLoader,
        manifest: &Path,
        lock: Option<&Path>,
    ) -> Result<HandlerOutput, HandlerError> {
        let manifest_path = manifest.display().to_string();
        let manifest_tree = loader.load(manifest, self.ecosystem().format())?;
        let constraints = extract_constraints(&manifest_tree, &manifest_path);
        debug!(
            path = %manifest_path,
            constraints = constraints.constraint.len(),
            overrides = constraints.overrides.len(),
            "manifest extracted"
        );

        let packages = match lock {
            Some(lock) => {
                let lock_path = lock.display().to_string();
                let lock_tree = loader.load(lock, self.ecosystem().format())?;
                Some(reconcile(&lock_tree, &lock_path)?)
            }
            None => None,
        };

        Ok(HandlerOutput::Dep(assemble(constraints, packages)))
    }
}
