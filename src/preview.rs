//! The preview screen: the stored resume in the selected template, plus the
//! template picker and the print, PDF and enhance actions.
//!
//! Export and enhancement suspend. While one of them runs its control is
//! disabled and a second request is rejected with
//! [`PreviewError::ActionInFlight`]; the control comes back once the action
//! finishes, whether it succeeded or not.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::document::ResumeDocument;
use crate::enhance::Enhancer;
use crate::error::PreviewError;
use crate::export::{PdfOptions, PdfRenderer, Printer};
use crate::navigation::{Navigator, Route};
use crate::render::{RenderedResume, TemplateId, render};
use crate::storage::{KeyValueStore, ResumeRepository};

/// The suspending actions of the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
    ExportPdf,
    Enhance,
}

impl fmt::Display for PreviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewAction::ExportPdf => write!(f, "PDF export"),
            PreviewAction::Enhance => write!(f, "enhancement"),
        }
    }
}

/// Marks an action as running until dropped.
struct InFlight<'c> {
    flag: &'c Cell<bool>,
}

impl<'c> InFlight<'c> {
    fn acquire(flag: &'c Cell<bool>, action: PreviewAction) -> Result<Self, PreviewError> {
        if flag.replace(true) {
            warn!(%action, "rejected, already running");
            return Err(PreviewError::ActionInFlight(action));
        }
        debug!(%action, "started");
        Ok(Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct Preview<'a, S> {
    repository: &'a ResumeRepository<S>,
    document: RefCell<ResumeDocument>,
    template: Cell<TemplateId>,
    exporting: Cell<bool>,
    enhancing: Cell<bool>,
}

impl<'a, S: KeyValueStore> Preview<'a, S> {
    /// Loads the stored resume. With nothing stored the navigator is sent
    /// to the editor and `None` is returned.
    pub fn open(
        repository: &'a ResumeRepository<S>,
        navigator: &mut impl Navigator,
        fallback_template: TemplateId,
    ) -> Result<Option<Self>, PreviewError> {
        let Some(document) = repository.load()? else {
            info!("no stored resume, redirecting to the editor");
            navigator.navigate(Route::Editor);
            return Ok(None);
        };
        let template = repository.load_template()?.unwrap_or(fallback_template);

        Ok(Some(Self {
            repository,
            document: RefCell::new(document),
            template: Cell::new(template),
            exporting: Cell::new(false),
            enhancing: Cell::new(false),
        }))
    }

    /// Like [`open`](Self::open), but a missing resume is an error.
    pub fn require(
        repository: &'a ResumeRepository<S>,
        navigator: &mut impl Navigator,
        fallback_template: TemplateId,
    ) -> Result<Self, PreviewError> {
        Self::open(repository, navigator, fallback_template)?.ok_or(PreviewError::MissingDocument)
    }

    #[cfg(test)]
    pub fn document(&self) -> std::cell::Ref<'_, ResumeDocument> {
        self.document.borrow()
    }

    pub fn template(&self) -> TemplateId {
        self.template.get()
    }

    pub fn rendered(&self) -> RenderedResume {
        render(&self.document.borrow(), self.template.get())
    }

    /// Switches the template and remembers the choice.
    pub fn select_template(&self, template: TemplateId) -> Result<(), PreviewError> {
        self.repository.save_template(template)?;
        self.template.set(template);
        info!(%template, "template selected");
        Ok(())
    }

    /// Whether `action` can be started, i.e. it is not already running.
    #[cfg(test)]
    pub fn is_enabled(&self, action: PreviewAction) -> bool {
        !self.flag(action).get()
    }

    fn flag(&self, action: PreviewAction) -> &Cell<bool> {
        match action {
            PreviewAction::ExportPdf => &self.exporting,
            PreviewAction::Enhance => &self.enhancing,
        }
    }

    /// Runs the enhancer over the current document and saves the result.
    pub async fn enhance(&self, enhancer: &impl Enhancer) -> Result<(), PreviewError> {
        let _running = InFlight::acquire(&self.enhancing, PreviewAction::Enhance)?;

        let current = self.document.borrow().clone();
        let enhanced = enhancer.enhance(current).await;
        self.repository.save_document(&enhanced)?;
        *self.document.borrow_mut() = enhanced;
        Ok(())
    }

    /// Default PDF options for the current document.
    pub fn pdf_options(&self) -> PdfOptions {
        PdfOptions::for_document(&self.document.borrow())
    }

    pub async fn export_pdf(
        &self,
        renderer: &impl PdfRenderer,
        options: &PdfOptions,
    ) -> Result<PathBuf, PreviewError> {
        let _running = InFlight::acquire(&self.exporting, PreviewAction::ExportPdf)?;

        let rendered = self.rendered();
        let path = renderer.render_to_pdf(&rendered, options).await?;
        Ok(path)
    }

    pub fn print(&self, printer: &impl Printer) -> Result<(), PreviewError> {
        printer.print(&self.rendered())?;
        Ok(())
    }

    /// Back to the editor.
    pub fn edit(&self, navigator: &mut impl Navigator) {
        navigator.navigate(Route::Editor);
    }
}
