use crate::config::{Backend, CONFIG_FILE, Config};
use anyhow::{Context, Result};
use catalog_page::{CatalogPage, HtmlPage, Notifier};
use catalog_store::{CatalogStore, FileMirror, Mirror, SqliteMirror};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STORE_DIR: &str = "store";
pub const DB_FILE: &str = "catalog.db";

pub type DynStore = CatalogStore<Box<dyn Mirror>>;

/// Data directory plus the config read from it
pub struct Workspace {
    data_dir: PathBuf,
    config: Config,
}

impl Workspace {
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from(&data_dir.join(CONFIG_FILE))?;
        debug!(data_dir = %data_dir.display(), backend = %config.storage.backend, "opened workspace");
        Ok(Self { data_dir, config })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save_to(&self.config_path())
    }

    pub fn mirror(&self) -> Result<Box<dyn Mirror>> {
        let mirror: Box<dyn Mirror> = match self.config.storage.backend {
            Backend::File => Box::new(FileMirror::new(self.data_dir.join(STORE_DIR))),
            Backend::Sqlite => Box::new(
                SqliteMirror::open(&self.data_dir.join(DB_FILE))
                    .context("Failed to open catalog database")?,
            ),
        };
        Ok(mirror)
    }

    pub fn store(&self) -> Result<DynStore> {
        Ok(CatalogStore::new(self.mirror()?).with_key(self.config.storage.key.clone()))
    }

    /// Page markup: `explicit`, then the configured page, then the built-in page
    pub fn page(&self, explicit: Option<&Path>) -> Result<HtmlPage> {
        let path = explicit.or(self.config.page.path.as_deref());

        let Some(path) = path else {
            return Ok(HtmlPage::default_page());
        };

        let html = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page: {}", path.display()))?;
        HtmlPage::parse(&html).with_context(|| format!("Invalid page: {}", path.display()))
    }

    pub fn open_page<N: Notifier>(
        &self,
        explicit: Option<&Path>,
        notifier: N,
    ) -> Result<CatalogPage<Box<dyn Mirror>, N>> {
        Ok(CatalogPage::open(
            self.store()?,
            self.page(explicit)?,
            notifier,
            self.config.form.validation,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_page::RecordingNotifier;
    use catalog_store::LoadOutcome;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let workspace = Workspace::open(temp_dir.path().to_path_buf())?;

        assert_eq!(workspace.config().storage.backend, Backend::File);
        assert_eq!(workspace.config_path(), temp_dir.path().join("config.toml"));
        Ok(())
    }

    #[test]
    fn test_file_backend_persists_between_opens() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let workspace = Workspace::open(temp_dir.path().to_path_buf())?;

        let page = workspace.open_page(None, RecordingNotifier::new())?;
        assert_eq!(page.load_outcome(), LoadOutcome::Seeded(0));
        assert!(temp_dir.path().join(STORE_DIR).join("products.json").exists());

        let page = workspace.open_page(None, RecordingNotifier::new())?;
        assert_eq!(page.load_outcome(), LoadOutcome::Restored(0));
        Ok(())
    }

    #[test]
    fn test_sqlite_backend_uses_database_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut workspace = Workspace::open(temp_dir.path().to_path_buf())?;
        workspace.config_mut().storage.backend = Backend::Sqlite;

        workspace.open_page(None, RecordingNotifier::new())?;
        assert!(temp_dir.path().join(DB_FILE).exists());
        Ok(())
    }

    #[test]
    fn test_missing_page_file_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let workspace = Workspace::open(temp_dir.path().to_path_buf())?;

        let err = workspace
            .page(Some(&temp_dir.path().join("nope.html")))
            .err()
            .map(|e| e.to_string());
        assert!(err.is_some_and(|msg| msg.contains("Failed to read page")));
        Ok(())
    }
}
