//! tools/godep handler -- Godeps.json
//!
//! Godeps.json은 이미 정규화된 JSON이므로 키 순서를 유지한 채 그대로 내보냅니다.
//! godep에는 별도의 lock 파일이 없어 lock 경로는 무시됩니다.

use std::path::Path;

use tracing::warn;

use crate::error::HandlerError;
use crate::handler::{HandlerOutput, ManifestHandler};
use crate::loader::FormatLoader;
use crate::types::Ecosystem;

/// Godeps.json handler
pub struct GodepHandler;

impl ManifestHandler for GodepHandler {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Godep
    }

    fn handle(
        &self,
        loader: &FormatLoader,
        manifest: &Path,
        lock: Option<&Path>,
    ) -> Result<HandlerOutput, HandlerError> {
        if let Some(lock) = lock {
            warn!(
                lock = %lock.display(),
                "godep has no lock file, ignoring lock path"
            );
        }

        let tree = loader.load(manifest, self.ecosystem().format())?;
        Ok(HandlerOutput::Godep(tree))
    }
}
