//! Projection of a resume document into a template's visual structure.
//!
//! [`render`] is pure: it borrows the document, never mutates it and always
//! yields the same [`RenderedResume`] for the same input. The rendered tree
//! can be turned into a standalone HTML page ([`RenderedResume::to_html`])
//! or into plain text lines ([`RenderedResume::plain_lines`]).

mod html;
mod templates;
mod text;
mod tree;

pub use templates::TemplateId;
pub use text::{PlainLine, TextStyle};
pub use tree::{FontFamily, RenderedResume};

#[cfg(test)]
pub use tree::{LineRole, SectionKind};

use crate::document::ResumeDocument;

/// Renders `document` with the layout selected by `template`.
pub fn render(document: &ResumeDocument, template: TemplateId) -> RenderedResume {
    template.template().render(document)
}
