//! Durable storage for the current resume.
//!
//! A [`KeyValueStore`] holds string values under two keys, `resumeData`
//! and `resumeTemplate`. [`ResumeRepository`] is the typed layer the rest
//! of the crate talks to.

mod repository;
mod store;

pub use repository::ResumeRepository;
pub use store::{FileStore, KeyValueStore};

#[cfg(test)]
pub use repository::{DATA_KEY, TEMPLATE_KEY};
#[cfg(test)]
pub use store::MemoryStore;
