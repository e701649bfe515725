use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::machine::{Transition, Wizard};
use super::stage::Stage;
use crate::document::ResumeDocument;
use crate::error::EditorError;
use crate::navigation::{Navigator, Route};
use crate::render::TemplateId;
use crate::storage::{KeyValueStore, ResumeRepository};

/// How an editor session starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorOptions {
    /// Explicit template choice, wins over the stored one.
    pub template: Option<TemplateId>,
    /// Used when neither an explicit nor a stored template exists.
    pub fallback_template: TemplateId,
    /// Start from the stored document instead of the seeded one.
    pub resume: bool,
}

/// What happened on a successful submission, printed like an audit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    pub full_name: String,
    pub template: TemplateId,
    pub stages_visited: Vec<Stage>,
    pub submitted_at: DateTime<Utc>,
}

/// Outcome of [`Editor::next`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditorStep {
    /// The wizard handled the request without submitting.
    Wizard(Transition),
    /// The document was saved and the preview route requested.
    Submitted(SubmissionRecord),
}

/// A wizard bound to storage and navigation.
pub struct Editor<'a, S, N> {
    wizard: Wizard,
    template: TemplateId,
    repository: &'a ResumeRepository<S>,
    navigator: &'a mut N,
}

impl<'a, S: KeyValueStore, N: Navigator> Editor<'a, S, N> {
    pub fn open(
        repository: &'a ResumeRepository<S>,
        navigator: &'a mut N,
        options: EditorOptions,
    ) -> Result<Self, EditorError> {
        let template = match options.template {
            Some(template) => template,
            None => repository
                .load_template()?
                .unwrap_or(options.fallback_template),
        };

        let document = if options.resume {
            repository.load()?.unwrap_or_else(ResumeDocument::seeded)
        } else {
            ResumeDocument::seeded()
        };

        debug!(%template, resume = options.resume, "editor opened");
        Ok(Self::with_document(repository, navigator, document, template))
    }

    pub fn with_document(
        repository: &'a ResumeRepository<S>,
        navigator: &'a mut N,
        document: ResumeDocument,
        template: TemplateId,
    ) -> Self {
        Self {
            wizard: Wizard::new(document),
            template,
            repository,
            navigator,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Field edits and list mutations go straight to the wizard.
    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    /// Starts over on `document` from the first stage.
    pub fn replace_document(&mut self, document: ResumeDocument) {
        self.wizard = Wizard::new(document);
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn set_template(&mut self, template: TemplateId) {
        self.template = template;
    }

    /// Advances the wizard; on the terminal stage with a valid document the
    /// resume is saved and the preview opened.
    ///
    /// When saving fails the error is returned and the editor stays where it
    /// is, with the document untouched.
    pub fn next(&mut self) -> Result<EditorStep, EditorError> {
        match self.wizard.next() {
            Transition::Submit => self.submit().map(EditorStep::Submitted),
            transition => Ok(EditorStep::Wizard(transition)),
        }
    }

    pub fn previous(&mut self) -> Transition {
        self.wizard.previous()
    }

    pub fn select(&mut self, stage: Stage) -> Transition {
        self.wizard.select(stage)
    }

    fn submit(&mut self) -> Result<SubmissionRecord, EditorError> {
        let document = self.wizard.document();
        self.repository.save(document, self.template)?;
        self.navigator.navigate(Route::Preview);

        info!(template = %self.template, "resume submitted");
        Ok(SubmissionRecord {
            full_name: document.full_name.clone(),
            template: self.template,
            stages_visited: self.wizard.history(),
            submitted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Section;
    use crate::error::StorageError;
    use crate::navigation::History;
    use crate::storage::{DATA_KEY, MemoryStore, TEMPLATE_KEY};

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn fill_valid<S: KeyValueStore, N: Navigator>(editor: &mut Editor<'_, S, N>) {
        for (path, value) in [
            ("fullName", "Jane Doe"),
            ("email", "jane@example.com"),
            ("education[0].school", "MIT"),
            ("experience[0].company", "Acme"),
            ("experience[0].position", "Engineer"),
            ("skills[0].skillList", "Rust, SQL"),
            ("projects[0].name", "Resume builder"),
        ] {
            editor
                .wizard_mut()
                .set_field(&path.parse().unwrap(), value)
                .unwrap();
        }
    }

    fn walk_to_projects<S: KeyValueStore, N: Navigator>(editor: &mut Editor<'_, S, N>) {
        for _ in 0..4 {
            assert!(matches!(
                editor.next().unwrap(),
                EditorStep::Wizard(Transition::Moved(_))
            ));
        }
        assert_eq!(editor.wizard().stage(), Stage::Projects);
    }

    #[test]
    fn submission_saves_both_keys_and_opens_preview() {
        let repo = ResumeRepository::new(MemoryStore::new());
        let mut history = History::new();
        let mut editor = Editor::open(
            &repo,
            &mut history,
            EditorOptions {
                template: Some(TemplateId::Classic),
                ..Default::default()
            },
        )
        .unwrap();
        fill_valid(&mut editor);
        walk_to_projects(&mut editor);

        let EditorStep::Submitted(record) = editor.next().unwrap() else {
            panic!("expected submission");
        };
        assert_eq!(record.template, TemplateId::Classic);
        assert_eq!(record.stages_visited, Stage::ALL);
        let document = editor.wizard().document().clone();
        drop(editor);

        assert_eq!(history.routes(), &[Route::Preview]);
        assert_eq!(repo.store().get(TEMPLATE_KEY).unwrap().as_deref(), Some("classic"));
        assert!(repo.store().get(DATA_KEY).unwrap().is_some());
        assert_eq!(repo.load().unwrap(), Some(document));
    }

    #[test]
    fn failed_save_does_not_navigate() {
        let repo = ResumeRepository::new(ReadOnlyStore);
        let mut history = History::new();
        let mut editor = Editor::open(&repo, &mut history, EditorOptions::default()).unwrap();
        fill_valid(&mut editor);
        walk_to_projects(&mut editor);

        let err = editor.next().unwrap_err();
        assert!(matches!(err, EditorError::Storage(_)));
        assert_eq!(editor.wizard().stage(), Stage::Projects);
        assert_eq!(editor.wizard().document().full_name, "Jane Doe");
        drop(editor);
        assert!(history.routes().is_empty());
    }

    #[test]
    fn invalid_document_is_never_saved() {
        let repo = ResumeRepository::new(MemoryStore::new());
        let mut history = History::new();
        let mut editor = Editor::open(&repo, &mut history, EditorOptions::default()).unwrap();
        editor.select(Stage::Projects);

        assert!(matches!(
            editor.next().unwrap(),
            EditorStep::Wizard(Transition::Blocked(_))
        ));
        drop(editor);
        assert!(history.routes().is_empty());
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn template_resolution_order() {
        let repo = ResumeRepository::new(MemoryStore::new());
        let mut history = History::new();
        let options = EditorOptions {
            fallback_template: TemplateId::Creative,
            ..Default::default()
        };

        let editor = Editor::open(&repo, &mut history, options).unwrap();
        assert_eq!(editor.template(), TemplateId::Creative);
        drop(editor);

        repo.save_template(TemplateId::Tech).unwrap();
        let editor = Editor::open(&repo, &mut history, options).unwrap();
        assert_eq!(editor.template(), TemplateId::Tech);
        drop(editor);

        let explicit = EditorOptions {
            template: Some(TemplateId::Modern),
            ..options
        };
        let editor = Editor::open(&repo, &mut history, explicit).unwrap();
        assert_eq!(editor.template(), TemplateId::Modern);
    }

    #[test]
    fn resume_opens_the_stored_document() {
        let repo = ResumeRepository::new(MemoryStore::new());
        let mut stored = ResumeDocument::seeded();
        stored.full_name = "Stored Name".into();
        stored.append(Section::Projects);
        repo.save(&stored, TemplateId::Modern).unwrap();

        let mut history = History::new();
        let resumed = EditorOptions {
            resume: true,
            ..Default::default()
        };
        let editor = Editor::open(&repo, &mut history, resumed).unwrap();
        assert_eq!(editor.wizard().document(), &stored);
        drop(editor);

        let fresh = Editor::open(&repo, &mut history, EditorOptions::default()).unwrap();
        assert_eq!(fresh.wizard().document(), &ResumeDocument::seeded());
        assert_eq!(fresh.wizard().stage(), Stage::Personal);
    }
}
