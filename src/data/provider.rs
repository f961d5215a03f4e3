use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};

use super::loader;
use super::model::PenguinDataset;

// ---------------------------------------------------------------------------
// Process-wide dataset
// ---------------------------------------------------------------------------

static DATASET: OnceLock<Arc<PenguinDataset>> = OnceLock::new();

/// Where the shared table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// The table compiled into the binary.
    Bundled,
    /// A user-supplied `.csv` / `.json` / `.parquet` file.
    File(PathBuf),
}

impl DatasetSource {
    pub fn load(&self) -> Result<PenguinDataset> {
        match self {
            DatasetSource::Bundled => loader::load_penguins(),
            DatasetSource::File(path) => loader::load_file(path)
                .with_context(|| format!("loading dataset from {}", path.display())),
        }
    }
}

/// Load the shared table once. Later calls return the installed table and
/// ignore `source`.
pub fn init(source: &DatasetSource) -> Result<Arc<PenguinDataset>> {
    if let Some(existing) = DATASET.get() {
        log::warn!("dataset already initialised, ignoring {source:?}");
        return Ok(Arc::clone(existing));
    }
    let dataset = source.load()?;
    log::info!("Loaded {} penguins from {source:?}", dataset.len());
    Ok(Arc::clone(DATASET.get_or_init(|| Arc::new(dataset))))
}

/// The shared table, if [`init`] has run.
pub fn get() -> Option<Arc<PenguinDataset>> {
    DATASET.get().cloned()
}
