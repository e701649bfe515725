//! Five-stage resume wizard.
//!
//! `Wizard` is the pure state machine over the document; [`Editor`] binds
//! it to storage and navigation and turns the final `Submit` into a saved
//! resume.

mod editor;
mod machine;
mod stage;

pub use editor::{Editor, EditorOptions, EditorStep, SubmissionRecord};
pub use machine::Transition;
pub use stage::Stage;
