//! Process-wide cached model load.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use scorebatch_model::LinearModel;

use crate::error::{InferError, Result};

static MODEL: OnceLock<Arc<LinearModel>> = OnceLock::new();

/// Load the model artifact once per process lifetime and return shared,
/// read-only access to it.
///
/// The first successful load wins; later calls return the cached instance
/// regardless of the path argument. The cached model is immutable, so
/// concurrent requests may share it without locking. Failed loads are not
/// cached and may be retried by the caller.
pub fn load_cached(path: &Path) -> Result<Arc<LinearModel>> {
    if let Some(model) = MODEL.get() {
        debug!("reusing cached model");
        return Ok(Arc::clone(model));
    }
    let loaded = Arc::new(
        LinearModel::from_path(path).map_err(|source| InferError::Load { source })?,
    );
    Ok(Arc::clone(MODEL.get_or_init(|| loaded)))
}
