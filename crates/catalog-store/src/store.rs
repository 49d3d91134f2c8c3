use crate::mirror::Mirror;
use crate::seed::{MarkupSource, records_from_markup};
use catalog_types::{IdGenerator, ProductRecord, RecordId, decode_catalog, encode_catalog};
use tracing::{debug, info, warn};

/// Key the catalog document is stored under unless configured otherwise
pub const DEFAULT_KEY: &str = "products";

/// How `load` obtained the in-memory list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Taken verbatim from the mirror
    Restored(usize),
    /// Rebuilt from page markup and written back to the mirror
    Seeded(usize),
}

impl LoadOutcome {
    pub fn count(&self) -> usize {
        match self {
            LoadOutcome::Restored(n) | LoadOutcome::Seeded(n) => *n,
        }
    }
}

/// Result of writing the list to the mirror.
///
/// A failed write is reported, never propagated: the in-memory list stays
/// authoritative for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    Failed(String),
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved)
    }
}

/// Authoritative, ordered (most recent first) product list with a durable mirror
pub struct CatalogStore<M: Mirror> {
    mirror: M,
    key: String,
    records: Vec<ProductRecord>,
    ids: IdGenerator,
}

impl<M: Mirror> CatalogStore<M> {
    pub fn new(mirror: M) -> Self {
        Self {
            mirror,
            key: DEFAULT_KEY.to_string(),
            records: Vec::new(),
            ids: IdGenerator::default(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mirror(&self) -> &M {
        &self.mirror
    }

    pub fn into_mirror(self) -> M {
        self.mirror
    }

    /// Fresh id from the store's generator
    pub fn next_id(&mut self) -> RecordId {
        self.ids.next_id()
    }

    /// Restore the list from the mirror, or seed it from `markup` when the
    /// mirror holds nothing usable.
    pub fn load<S: MarkupSource + ?Sized>(&mut self, markup: &S) -> LoadOutcome {
        if let Some(records) = self.read_mirror() {
            info!(key = %self.key, count = records.len(), "restored catalog from mirror");
            self.records = records;
            return LoadOutcome::Restored(self.records.len());
        }

        LoadOutcome::Seeded(self.seed(markup))
    }

    /// Replace the list with records rebuilt from `markup`, then persist.
    pub fn seed<S: MarkupSource + ?Sized>(&mut self, markup: &S) -> usize {
        let items = markup.product_items();
        self.records = records_from_markup(&items, &mut self.ids);
        info!(key = %self.key, count = self.records.len(), "seeded catalog from page markup");

        self.persist();
        self.records.len()
    }

    fn read_mirror(&self) -> Option<Vec<ProductRecord>> {
        let raw = match self.mirror.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no catalog in mirror");
                return None;
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "cannot read catalog mirror");
                return None;
            }
        };

        match decode_catalog(&raw) {
            Ok(records) => Some(records),
            Err(err) => {
                warn!(key = %self.key, error = %err, "ignoring unusable catalog data");
                None
            }
        }
    }

    /// Prepend `record` and persist. The record is kept even if the write fails.
    pub fn add(&mut self, record: ProductRecord) -> PersistOutcome {
        debug!(id = %record.id, name = %record.name, "adding product");
        self.records.insert(0, record);
        self.persist()
    }

    pub fn list(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Overwrite the mirror with the whole current list
    pub fn persist(&mut self) -> PersistOutcome {
        let written = encode_catalog(&self.records)
            .map_err(crate::Error::from)
            .and_then(|document| self.mirror.set(&self.key, &document));

        match written {
            Ok(()) => PersistOutcome::Saved,
            Err(err) => {
                warn!(
                    key = %self.key,
                    error = %err,
                    "failed to persist catalog; keeping in-memory list"
                );
                PersistOutcome::Failed(err.to_string())
            }
        }
    }

    /// Drop every record and remove the persisted document
    pub fn clear(&mut self) -> PersistOutcome {
        self.records.clear();

        match self.mirror.remove(&self.key) {
            Ok(()) => {
                info!(key = %self.key, "cleared catalog");
                PersistOutcome::Saved
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to clear catalog mirror");
                PersistOutcome::Failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::MemoryMirror;
    use crate::seed::{MarkupItem, MarkupParagraph, NoMarkup};
    use catalog_types::FixedClock;

    fn page_items() -> Vec<MarkupItem> {
        vec![
            MarkupItem::named("Sách A")
                .with_paragraph(MarkupParagraph::text("Tiểu thuyết"))
                .with_paragraph(MarkupParagraph::price("100000")),
            MarkupItem::named("Lập trình Rust")
                .with_paragraph(MarkupParagraph::text("Sách kỹ thuật"))
                .with_paragraph(MarkupParagraph::price("250000"))
                .with_image("https://img.example/rust.jpg"),
        ]
    }

    fn store(mirror: MemoryMirror) -> CatalogStore<MemoryMirror> {
        CatalogStore::new(mirror).with_id_generator(IdGenerator::new(FixedClock(1000)))
    }

    #[test]
    fn test_load_seeds_from_markup_when_mirror_empty() {
        let mut store = store(MemoryMirror::new());

        let outcome = store.load(&page_items());

        assert_eq!(outcome, LoadOutcome::Seeded(2));
        assert_eq!(store.list()[0].name, "Sách A");
        assert_eq!(store.list()[0].price, "100000");
        assert_eq!(store.list()[1].name, "Lập trình Rust");
        assert_eq!(store.list()[0].id.as_str(), "book-1000");
        assert_eq!(store.list()[1].id.as_str(), "book-1001");
        assert!(store.mirror().raw(DEFAULT_KEY).is_some());
    }

    #[test]
    fn test_add_after_seed_puts_new_record_first() {
        let mut store = store(MemoryMirror::new());
        store.load(&page_items());

        let id = store.next_id();
        let outcome = store.add(ProductRecord::new(id, "Sách B").with_price("50000"));

        assert!(outcome.is_saved());
        assert_eq!(store.len(), 3);
        assert_eq!(store.list()[0].name, "Sách B");
        assert_eq!(store.list()[0].price, "50000");
    }

    #[test]
    fn test_restore_ignores_markup() {
        let mirror = MemoryMirror::new().with_entry(
            DEFAULT_KEY,
            r#"[{"id":"book-7","name":"Stored","desc":"","price":"1","img":""}]"#,
        );
        let mut store = store(mirror);

        assert_eq!(store.load(&page_items()), LoadOutcome::Restored(1));
        assert_eq!(store.list()[0].name, "Stored");
    }

    #[test]
    fn test_empty_array_restores_empty_catalog() {
        let mut store = store(MemoryMirror::new().with_entry(DEFAULT_KEY, "[]"));

        assert_eq!(store.load(&page_items()), LoadOutcome::Restored(0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_array_document_falls_back_to_seeding() {
        let mut store = store(MemoryMirror::new().with_entry(DEFAULT_KEY, r#""not an array""#));

        assert_eq!(store.load(&page_items()), LoadOutcome::Seeded(2));
        let raw = store.mirror().raw(DEFAULT_KEY).unwrap();
        assert!(raw.starts_with('['));
    }

    #[test]
    fn test_unreadable_mirror_falls_back_to_seeding() {
        let mut mirror = MemoryMirror::new().with_entry(DEFAULT_KEY, "[]");
        mirror.set_unavailable(true);
        let mut store = store(mirror);

        assert_eq!(store.load(&page_items()), LoadOutcome::Seeded(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_persist_failure_keeps_in_memory_add() {
        let mut store = store(MemoryMirror::new().with_quota(16));
        store.load(&NoMarkup);

        let outcome = store.add(ProductRecord::new("book-1", "A product with a long name"));

        assert!(matches!(outcome, PersistOutcome::Failed(ref msg) if msg.contains("quota")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.mirror().raw(DEFAULT_KEY), Some("[]"));
    }

    #[test]
    fn test_custom_key() {
        let mut store = store(MemoryMirror::new()).with_key("catalog-v2");
        store.load(&page_items());

        assert!(store.mirror().raw("catalog-v2").is_some());
        assert!(store.mirror().raw(DEFAULT_KEY).is_none());
    }

    #[test]
    fn test_clear_removes_document_and_reseeds_on_next_load() {
        let mut store = store(MemoryMirror::new());
        store.load(&page_items());

        assert!(store.clear().is_saved());
        assert!(store.is_empty());
        assert!(store.mirror().raw(DEFAULT_KEY).is_none());

        assert_eq!(store.load(&page_items()), LoadOutcome::Seeded(2));
    }
}
