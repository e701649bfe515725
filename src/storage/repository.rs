use tracing::{error, info, warn};

use super::store::KeyValueStore;
use crate::document::ResumeDocument;
use crate::error::StorageError;
use crate::render::TemplateId;

/// Key holding the JSON-serialised [`ResumeDocument`].
pub const DATA_KEY: &str = "resumeData";

/// Key holding the selected [`TemplateId`].
pub const TEMPLATE_KEY: &str = "resumeTemplate";

/// The only door to durable storage used by the editor and the preview.
#[derive(Debug)]
pub struct ResumeRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ResumeRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored document, or `None` when nothing has been submitted yet.
    pub fn load(&self) -> Result<Option<ResumeDocument>, StorageError> {
        let Some(raw) = self.store.get(DATA_KEY)? else {
            return Ok(None);
        };
        let document = serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: DATA_KEY.to_string(),
            source,
        })?;
        Ok(Some(document))
    }

    /// Overwrites both the document and the template selection.
    ///
    /// Either both keys change or neither does: when the document cannot be
    /// written the previous template value is put back.
    pub fn save(&self, document: &ResumeDocument, template: TemplateId) -> Result<(), StorageError> {
        let json = serde_json::to_string(document)?;
        let previous = self.store.get(TEMPLATE_KEY)?;
        self.save_template(template)?;

        if let Err(err) = self.store.set(DATA_KEY, &json) {
            let restored = match &previous {
                Some(value) => self.store.set(TEMPLATE_KEY, value),
                None => self.store.remove(TEMPLATE_KEY),
            };
            if let Err(restore_err) = restored {
                error!(error = %restore_err, "failed to restore template after a failed save");
            }
            return Err(err);
        }

        info!(%template, "resume saved");
        Ok(())
    }

    /// Overwrites the document only, leaving the template selection alone.
    pub fn save_document(&self, document: &ResumeDocument) -> Result<(), StorageError> {
        let json = serde_json::to_string(document)?;
        self.store.set(DATA_KEY, &json)
    }

    /// The stored template selection.
    ///
    /// An unrecognised identifier falls back to the default template rather
    /// than failing, the same way an unknown layout is shown as `modern`.
    pub fn load_template(&self) -> Result<Option<TemplateId>, StorageError> {
        let Some(raw) = self.store.get(TEMPLATE_KEY)? else {
            return Ok(None);
        };
        let template = raw.trim().parse().unwrap_or_else(|_| {
            warn!(stored = %raw, "unknown template id, falling back to default");
            TemplateId::default()
        });
        Ok(Some(template))
    }

    pub fn save_template(&self, template: TemplateId) -> Result<(), StorageError> {
        self.store.set(TEMPLATE_KEY, template.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ExperienceEntry, SkillGroup};
    use crate::storage::{FileStore, MemoryStore};

    fn sample() -> ResumeDocument {
        let mut doc = ResumeDocument::seeded();
        doc.full_name = "Jane Doe".into();
        doc.email = "jane@example.com".into();
        doc.summary = "Line one\nLine two".into();
        doc.experience = vec![ExperienceEntry {
            company: "Acme".into(),
            position: "Engineer".into(),
            description: "• Shipped\n• Measured".into(),
            ..Default::default()
        }]
        .into();
        doc.skills = vec![
            SkillGroup {
                category: "Languages".into(),
                skill_list: "Rust, Go".into(),
            },
            SkillGroup::default(),
        ]
        .into();
        doc
    }

    #[test]
    fn save_then_load_is_deep_equal() {
        let repo = ResumeRepository::new(MemoryStore::new());
        let doc = sample();
        repo.save(&doc, TemplateId::Tech).unwrap();

        assert_eq!(repo.load().unwrap(), Some(doc));
        assert_eq!(repo.load_template().unwrap(), Some(TemplateId::Tech));
    }

    #[test]
    fn save_overwrites_previous_document() {
        let repo = ResumeRepository::new(MemoryStore::new());
        repo.save(&sample(), TemplateId::Classic).unwrap();

        let replacement = ResumeDocument::seeded();
        repo.save(&replacement, TemplateId::Modern).unwrap();
        assert_eq!(repo.load().unwrap(), Some(replacement));
        assert_eq!(repo.load_template().unwrap(), Some(TemplateId::Modern));
    }

    #[test]
    fn empty_store_loads_nothing() {
        let repo = ResumeRepository::new(MemoryStore::new());
        assert_eq!(repo.load().unwrap(), None);
        assert_eq!(repo.load_template().unwrap(), None);
    }

    #[test]
    fn stored_keys_match_browser_layout() {
        let repo = ResumeRepository::new(MemoryStore::new());
        repo.save(&sample(), TemplateId::Creative).unwrap();

        let raw = repo.store().get(DATA_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(
            repo.store().get(TEMPLATE_KEY).unwrap().as_deref(),
            Some("creative")
        );
    }

    #[test]
    fn unknown_template_falls_back_to_modern() {
        let store = MemoryStore::new();
        store.set(TEMPLATE_KEY, "baroque").unwrap();
        let repo = ResumeRepository::new(store);
        assert_eq!(repo.load_template().unwrap(), Some(TemplateId::Modern));
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let store = MemoryStore::new();
        store.set(DATA_KEY, "{not json").unwrap();
        let repo = ResumeRepository::new(store);
        assert!(matches!(repo.load(), Err(StorageError::Corrupt { .. })));
    }

    /// Accepts every write except the document key.
    struct DataKeyFails(MemoryStore);

    impl KeyValueStore for DataKeyFails {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == DATA_KEY {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
                });
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn failed_document_write_keeps_previous_template() {
        let store = MemoryStore::new();
        store.set(TEMPLATE_KEY, "classic").unwrap();
        let repo = ResumeRepository::new(DataKeyFails(store));

        let err = repo.save(&sample(), TemplateId::Tech).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(repo.load_template().unwrap(), Some(TemplateId::Classic));
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn failed_first_save_leaves_no_template() {
        let repo = ResumeRepository::new(DataKeyFails(MemoryStore::new()));
        assert!(repo.save(&sample(), TemplateId::Creative).is_err());
        assert_eq!(repo.load_template().unwrap(), None);
    }

    #[test]
    fn file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ResumeRepository::new(FileStore::new(dir.path()));
        let doc = sample();
        repo.save(&doc, TemplateId::Classic).unwrap();

        let reopened = ResumeRepository::new(FileStore::new(dir.path()));
        assert_eq!(reopened.load().unwrap(), Some(doc));
        assert_eq!(reopened.load_template().unwrap(), Some(TemplateId::Classic));
    }
}
