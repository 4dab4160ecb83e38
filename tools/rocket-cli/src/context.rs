//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rocket_cache::{Cache, FileStore};
use rocket_data::{Catalog, FetchClient, FixtureCatalog, HttpCatalog};
use rocket_store::{CartStore, MemoryNotifier};
use tracing::debug;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Cart store as the CLI builds it.
pub type Store = CartStore<Arc<dyn Catalog>>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Local JSON database used instead of the API.
    pub fixture: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, fixture: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let mut ctx = Self {
            config,
            config_path,
            output,
            cwd,
            fixture: None,
        };
        ctx.fixture = fixture.map(|path| ctx.resolve_path(path));
        Ok(ctx)
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Build the catalog: the fixture when one is given, the API otherwise.
    pub fn catalog(&self) -> Result<Arc<dyn Catalog>> {
        if let Some(path) = &self.fixture {
            debug!(path = %path.display(), "using fixture catalog");
            let catalog = FixtureCatalog::from_path(path)
                .with_context(|| format!("Failed to load fixture: {}", path.display()))?;
            return Ok(Arc::new(catalog));
        }

        let api = &self.config.api;
        debug!(base_url = %api.base_url, lookup = api.lookup.as_str(), "using storefront api");
        let client = FetchClient::with_policy(api.base_url.clone(), self.config.fetch_policy())
            .with_context(|| format!("Invalid api.base_url: {}", api.base_url))?;
        Ok(Arc::new(HttpCatalog::new(client).with_mode(api.lookup)))
    }

    /// Open the cart store.
    ///
    /// Toasts are collected in the returned notifier so that commands can
    /// print them once any spinner is gone.
    pub fn open_store(&self) -> Result<(Store, Arc<MemoryNotifier>)> {
        let cache = self.open_cache()?;
        let notifier = Arc::new(MemoryNotifier::new());
        let store = CartStore::open(self.catalog()?, cache, self.config.store_config())
            .with_context(|| format!("Failed to restore cart from {}", self.storage_dir().display()))?
            .with_notifier(notifier.clone());

        Ok((store, notifier))
    }

    /// Open the file store holding the cart slot.
    pub fn open_cache(&self) -> Result<Cache> {
        let dir = self.storage_dir();
        let files = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage directory: {}", dir.display()))?;
        Ok(Cache::new(files))
    }

    /// Directory of the file store.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
