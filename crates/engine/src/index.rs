//! Index spec operations on a store

use soupstore_core::{IndexSpec, IndexType, StoreError, StoreResult};
use tracing::info;

use crate::store::SoupStore;

impl SoupStore {
    /// Current index specs of a soup
    pub fn get_soup_index_specs(&self, soup_name: &str) -> StoreResult<Vec<IndexSpec>> {
        Ok(self.soup(soup_name)?.index_specs().to_vec())
    }

    /// Replace a soup's index specs and rebuild its indexed data.
    ///
    /// Unchanged `(path, type)` pairs keep their stored values unless
    /// `reindex_data` is set.
    pub fn alter_soup(
        &mut self,
        soup_name: &str,
        index_specs: Vec<IndexSpec>,
        reindex_data: bool,
    ) -> StoreResult<String> {
        let soup = self.soup_mut(soup_name)?;
        let entries = soup.len();
        soup.alter(index_specs, reindex_data);
        info!(
            target: "soupstore::index",
            soup = soup_name,
            indexes = soup.index_specs().len(),
            entries,
            reindex_data,
            "Soup altered"
        );
        Ok(soup_name.to_string())
    }

    /// Recompute the indexed values of `paths` for every entry.
    pub fn reindex_soup(&mut self, soup_name: &str, paths: &[String]) -> StoreResult<String> {
        let soup = self.soup_mut(soup_name)?;
        if let Some(path) = paths.iter().find(|path| !soup.has_index(path)) {
            return Err(StoreError::invalid_index(soup_name, path.as_str()));
        }
        soup.reindex(paths);
        info!(
            target: "soupstore::index",
            soup = soup_name,
            paths = ?paths,
            "Soup reindexed"
        );
        Ok(soup_name.to_string())
    }

    /// Accept `_soup`, `_soupEntryId` and indexed paths of the soup.
    pub fn check_index(&self, soup_name: &str, path: &str) -> StoreResult<()> {
        self.soup(soup_name)?.check_index(path)
    }

    /// Whether `path` has an index spec in the soup
    pub fn index_exists(&self, soup_name: &str, path: &str) -> StoreResult<bool> {
        Ok(self.soup(soup_name)?.has_index(path))
    }

    /// Type of the index on `path`, if any
    pub fn index_type(&self, soup_name: &str, path: &str) -> StoreResult<Option<IndexType>> {
        Ok(self
            .soup(soup_name)?
            .index_spec(path)
            .map(|spec| spec.index_type))
    }
}
