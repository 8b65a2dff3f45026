use crate::api::HuntApi;
use crate::config::TreasureConfig;
use crate::error::Result;
use crate::store::fs_backend::FsBackend;
use crate::store::paths::HuntPaths;
use std::path::Path;

pub struct TreasureContext {
    pub api: HuntApi<FsBackend>,
}

/// Builds the filesystem-backed API for `base`, reading `treasure.json` from
/// it when present.
pub fn initialize(base: &Path) -> Result<TreasureContext> {
    let config = TreasureConfig::load(base)?;
    let paths = HuntPaths::from_config(base, &config);
    tracing::debug!(
        data_root = %paths.data_root().display(),
        combined_log = %paths.combined_log().display(),
        merge_mode = ?config.merge_mode,
        "initialized treasure store"
    );

    let api = HuntApi::new(FsBackend::new(paths), config);
    Ok(TreasureContext { api })
}
