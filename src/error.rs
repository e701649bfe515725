use thiserror::Error;

use crate::document::Section;
use crate::preview::PreviewAction;

/// Errors from addressing or mutating a [`ResumeDocument`](crate::document::ResumeDocument).
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid field path: {0}")]
    InvalidPath(String),

    #[error("{section}[{index}] does not exist ({len} entries)")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },

    #[error("entries in {0} cannot be reordered")]
    NotReorderable(Section),
}

/// Errors crossing the key-value storage boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error on `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value under `{key}` is not a valid resume: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode resume: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Failures of the PDF and print export actions.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("print command `{command}` failed: {message}")]
    Print { command: String, message: String },
}

/// Errors surfaced by the preview screen.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("no resume has been saved yet")]
    MissingDocument,

    #[error("{0} is already in progress")]
    ActionInFlight(PreviewAction),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Errors from the editor outside of validation, which is never an error.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("failed to save resume: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_error_display() {
        let err = DocumentError::IndexOutOfRange {
            section: Section::Projects,
            index: 4,
            len: 2,
        };
        assert_eq!(err.to_string(), "projects[4] does not exist (2 entries)");
        assert_eq!(
            DocumentError::NotReorderable(Section::Skills).to_string(),
            "entries in skills cannot be reordered"
        );
    }

    #[test]
    fn preview_error_display() {
        let err = PreviewError::ActionInFlight(PreviewAction::ExportPdf);
        assert_eq!(err.to_string(), "PDF export is already in progress");
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
        assert_send_sync::<DocumentError>();
    }
}
