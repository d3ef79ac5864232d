//! Native setup: configuration and records in the platform directories.

use std::path::{Path, PathBuf};

use crate::config::AutosaveConfig;
use crate::store::JsonFileStore;

/// Where a native session keeps its configuration and records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativePaths {
    pub config: PathBuf,
    pub records: PathBuf,
}

impl NativePaths {
    /// Config under the platform config dir, records under the data dir.
    pub fn platform() -> Option<Self> {
        Some(Self {
            config: AutosaveConfig::default_path()?,
            records: JsonFileStore::default_path()?,
        })
    }

    /// Both files side by side in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            config: dir.join(AutosaveConfig::default_filename()),
            records: dir.join(JsonFileStore::DEFAULT_FILENAME),
        }
    }

    /// Load the configuration and open the record store.
    ///
    /// On first run the default configuration is written out so there is a
    /// file to edit. A config file that fails to parse is left untouched and
    /// the defaults are used for this session.
    pub fn open(&self) -> (AutosaveConfig, JsonFileStore) {
        let config = match AutosaveConfig::load_from_path(&self.config) {
            Some(config) => config,
            None if self.config.exists() => AutosaveConfig::default(),
            None => {
                let config = AutosaveConfig::default();
                if let Err(e) = config.save_to_path(&self.config) {
                    log::warn!("Could not write default config to {:?}: {}", self.config, e);
                }
                config
            }
        };
        (config, JsonFileStore::new(&self.records))
    }
}
