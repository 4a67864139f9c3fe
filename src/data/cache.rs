use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::OnceCell;

use super::model::SurveyDataset;

/// Dataset shared by the whole process once it has loaded successfully.
pub static DATASET_CACHE: DatasetCache = DatasetCache::new();

/// Load-once holder for the survey dataset.
///
/// The first successful load is kept for the rest of the process; later
/// calls return the same `Arc` without invoking the loader. A failed load
/// is not cached, so the next call tries again.
pub struct DatasetCache {
    cell: OnceCell<Arc<SurveyDataset>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        DatasetCache {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached dataset, running `load` only if nothing is cached.
    /// Concurrent callers block until the first initialiser finishes.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<SurveyDataset>>
    where
        F: FnOnce() -> Result<SurveyDataset>,
    {
        self.cell
            .get_or_try_init(|| load().map(Arc::new))
            .map(Arc::clone)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}
