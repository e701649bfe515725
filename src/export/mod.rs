//! Materialising a rendered resume outside the terminal: PDF files and the
//! system print queue.

mod pdf;
mod print;

use std::path::PathBuf;

pub use pdf::LopdfRenderer;
pub use print::SystemPrinter;

use crate::document::ResumeDocument;
use crate::error::ExportError;
use crate::render::RenderedResume;

/// Used when the resume has no name to derive a filename from.
pub const FALLBACK_FILENAME: &str = "Resume.pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Letter,
}

impl PageSize {
    /// Width and height in PDF points, portrait.
    pub fn points(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// Rasterisation scale for backends that draw bitmaps.
    pub scale: f32,
    pub margin_in: f32,
    pub filename: String,
}

impl PdfOptions {
    /// Letter portrait, scale 2, half-inch margins, named after the person.
    pub fn for_document(document: &ResumeDocument) -> Self {
        Self {
            page_size: PageSize::Letter,
            orientation: Orientation::Portrait,
            scale: 2.0,
            margin_in: 0.5,
            filename: pdf_filename(&document.full_name),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_margin(mut self, margin_in: f32) -> Self {
        self.margin_in = margin_in;
        self
    }

    /// Page width and height in points after orientation.
    pub fn page_points(&self) -> (f32, f32) {
        let (w, h) = self.page_size.points();
        match self.orientation {
            Orientation::Portrait => (w, h),
        }
    }
}

/// `<full name>.pdf`, with path separators and other characters that are
/// awkward in filenames replaced by `-`.
pub fn pdf_filename(full_name: &str) -> String {
    let cleaned: String = full_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("{cleaned}.pdf")
    }
}

/// Turns a rendering into a PDF file and reports where it went.
#[allow(async_fn_in_trait)]
pub trait PdfRenderer {
    async fn render_to_pdf(
        &self,
        rendered: &RenderedResume,
        options: &PdfOptions,
    ) -> Result<PathBuf, ExportError>;
}

/// Hands a rendering to the platform print flow.
pub trait Printer {
    fn print(&self, rendered: &RenderedResume) -> Result<(), ExportError>;
}
