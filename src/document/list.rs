use serde::{Deserialize, Serialize};
use tracing::debug;

use super::path::{EntryField, Section};

/// A record that lives in one of the repeatable resume sections.
pub trait Entry: Default + Clone {
    const SECTION: Section;

    fn field(&self, field: EntryField) -> Option<&str>;

    fn field_mut(&mut self, field: EntryField) -> Option<&mut String>;
}

/// Marker for entries whose order the user controls through move up/down.
///
/// Skill groups deliberately do not implement it.
pub trait Reorderable: Entry {}

/// Direction of a single-step move inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Ordered entries of one section. Serialises as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T>(Vec<T>);

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for EntryList<T> {
    fn from(entries: Vec<T>) -> Self {
        Self(entries)
    }
}

impl<'a, T> IntoIterator for &'a EntryList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> EntryList<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index)
    }

    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.0.first_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T: Entry> EntryList<T> {
    /// A list holding one empty entry, the shape a fresh editor starts from.
    pub fn seeded(first: T) -> Self {
        Self(vec![first])
    }

    /// Appends an empty entry and returns its index.
    pub fn append(&mut self) -> usize {
        self.0.push(T::default());
        debug!(section = %T::SECTION, len = self.0.len(), "appended entry");
        self.0.len() - 1
    }

    /// Removes the entry at `index`, shifting later entries down.
    ///
    /// Refuses to drop the last remaining entry and ignores out-of-range
    /// indices. Returns whether anything was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.0.len() <= 1 || index >= self.0.len() {
            return false;
        }
        self.0.remove(index);
        debug!(section = %T::SECTION, index, "removed entry");
        true
    }
}

impl<T: Reorderable> EntryList<T> {
    /// Swaps the entry at `index` with its neighbour in `direction`.
    ///
    /// No-op (returns `false`) when the neighbour would be out of bounds.
    pub fn move_entry(&mut self, index: usize, direction: Direction) -> bool {
        if index >= self.0.len() {
            return false;
        }
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&t| t < self.0.len()),
        };
        let Some(target) = target else {
            return false;
        };
        self.0.swap(index, target);
        debug!(section = %T::SECTION, from = index, to = target, "moved entry");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ExperienceEntry, SkillGroup};

    fn experience(companies: &[&str]) -> EntryList<ExperienceEntry> {
        companies
            .iter()
            .map(|c| ExperienceEntry {
                company: (*c).to_string(),
                ..Default::default()
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn companies(list: &EntryList<ExperienceEntry>) -> Vec<&str> {
        list.iter().map(|e| e.company.as_str()).collect()
    }

    #[test]
    fn append_adds_empty_entry_at_end() {
        let mut list = experience(&["Acme"]);
        let index = list.append();
        assert_eq!(index, 1);
        assert_eq!(list.get(1), Some(&ExperienceEntry::default()));
    }

    #[test]
    fn remove_last_remaining_entry_is_noop() {
        let mut list = experience(&["Acme"]);
        let before = list.clone();
        assert!(!list.remove(0));
        assert_eq!(list, before);
    }

    #[test]
    fn remove_shifts_later_entries_down() {
        let mut list = experience(&["A", "B", "C"]);
        assert!(list.remove(1));
        assert_eq!(companies(&list), vec!["A", "C"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut list = experience(&["A", "B"]);
        assert!(!list.remove(5));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn move_at_bounds_is_noop() {
        let mut list = experience(&["A", "B", "C"]);
        assert!(!list.move_entry(0, Direction::Up));
        assert!(!list.move_entry(2, Direction::Down));
        assert_eq!(companies(&list), vec!["A", "B", "C"]);
    }

    #[test]
    fn move_up_then_down_restores_order() {
        for i in 1..4 {
            let mut list = experience(&["A", "B", "C", "D"]);
            assert!(list.move_entry(i, Direction::Up));
            assert!(list.move_entry(i - 1, Direction::Down));
            assert_eq!(companies(&list), vec!["A", "B", "C", "D"]);
        }
    }

    #[test]
    fn move_down_swaps_with_next() {
        let mut list = experience(&["A", "B", "C"]);
        assert!(list.move_entry(0, Direction::Down));
        assert_eq!(companies(&list), vec!["B", "A", "C"]);
    }

    #[test]
    fn skill_list_serialises_as_plain_array() {
        let list = EntryList::seeded(SkillGroup {
            category: "Languages".into(),
            skill_list: "Rust, Go".into(),
        });
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"category":"Languages","skillList":"Rust, Go"}]"#);
    }
}
