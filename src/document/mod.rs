//! The resume document: its shape, field addressing and list mutations.
//!
//! [`ResumeDocument`] is the only record the builder manages. Its four
//! repeatable sections are [`EntryList`]s; entries that may be reordered
//! implement `Reorderable`, so moving a skill group does not type-check.

mod list;
mod model;
mod path;

pub use list::{Direction, Entry, EntryList};
pub use model::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument, SkillGroup};
pub use path::{EntryField, FieldPath, PersonalField, Section};
