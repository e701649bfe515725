use serde::{Deserialize, Serialize};

use super::list::{Direction, Entry, EntryList, Reorderable};
use super::path::{EntryField, FieldPath, PersonalField, Section};
use crate::error::DocumentError;

/// Category label of the skill group a fresh editor starts with.
pub const SEEDED_SKILL_CATEGORY: &str = "Technical Skills";

/// The resume being edited: personal details plus four ordered sections.
///
/// Serialises with the camelCase keys stored under `resumeData`. Missing
/// keys deserialise to empty strings and empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
    pub summary: String,
    pub education: EntryList<EducationEntry>,
    pub experience: EntryList<ExperienceEntry>,
    pub skills: EntryList<SkillGroup>,
    pub projects: EntryList<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    pub category: String,
    /// Free text, conventionally comma separated. Never split or parsed.
    pub skill_list: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub technologies: String,
}

impl Entry for EducationEntry {
    const SECTION: Section = Section::Education;

    fn field(&self, field: EntryField) -> Option<&str> {
        let value = match field {
            EntryField::School => &self.school,
            EntryField::Degree => &self.degree,
            EntryField::FieldOfStudy => &self.field_of_study,
            EntryField::StartDate => &self.start_date,
            EntryField::EndDate => &self.end_date,
            EntryField::Location => &self.location,
            EntryField::Description => &self.description,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, field: EntryField) -> Option<&mut String> {
        match field {
            EntryField::School => Some(&mut self.school),
            EntryField::Degree => Some(&mut self.degree),
            EntryField::FieldOfStudy => Some(&mut self.field_of_study),
            EntryField::StartDate => Some(&mut self.start_date),
            EntryField::EndDate => Some(&mut self.end_date),
            EntryField::Location => Some(&mut self.location),
            EntryField::Description => Some(&mut self.description),
            _ => None,
        }
    }
}

impl Entry for ExperienceEntry {
    const SECTION: Section = Section::Experience;

    fn field(&self, field: EntryField) -> Option<&str> {
        let value = match field {
            EntryField::Company => &self.company,
            EntryField::Position => &self.position,
            EntryField::StartDate => &self.start_date,
            EntryField::EndDate => &self.end_date,
            EntryField::Location => &self.location,
            EntryField::Description => &self.description,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, field: EntryField) -> Option<&mut String> {
        match field {
            EntryField::Company => Some(&mut self.company),
            EntryField::Position => Some(&mut self.position),
            EntryField::StartDate => Some(&mut self.start_date),
            EntryField::EndDate => Some(&mut self.end_date),
            EntryField::Location => Some(&mut self.location),
            EntryField::Description => Some(&mut self.description),
            _ => None,
        }
    }
}

impl Entry for SkillGroup {
    const SECTION: Section = Section::Skills;

    fn field(&self, field: EntryField) -> Option<&str> {
        match field {
            EntryField::Category => Some(&self.category),
            EntryField::SkillList => Some(&self.skill_list),
            _ => None,
        }
    }

    fn field_mut(&mut self, field: EntryField) -> Option<&mut String> {
        match field {
            EntryField::Category => Some(&mut self.category),
            EntryField::SkillList => Some(&mut self.skill_list),
            _ => None,
        }
    }
}

impl Entry for ProjectEntry {
    const SECTION: Section = Section::Projects;

    fn field(&self, field: EntryField) -> Option<&str> {
        let value = match field {
            EntryField::Name => &self.name,
            EntryField::Role => &self.role,
            EntryField::StartDate => &self.start_date,
            EntryField::EndDate => &self.end_date,
            EntryField::Description => &self.description,
            EntryField::Technologies => &self.technologies,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, field: EntryField) -> Option<&mut String> {
        match field {
            EntryField::Name => Some(&mut self.name),
            EntryField::Role => Some(&mut self.role),
            EntryField::StartDate => Some(&mut self.start_date),
            EntryField::EndDate => Some(&mut self.end_date),
            EntryField::Description => Some(&mut self.description),
            EntryField::Technologies => Some(&mut self.technologies),
            _ => None,
        }
    }
}

impl Reorderable for EducationEntry {}
impl Reorderable for ExperienceEntry {}
impl Reorderable for ProjectEntry {}

fn entry_field<'a, T: Entry>(
    list: &'a EntryList<T>,
    path: &FieldPath,
    index: usize,
    field: EntryField,
) -> Result<&'a str, DocumentError> {
    let entry = list.get(index).ok_or(DocumentError::IndexOutOfRange {
        section: T::SECTION,
        index,
        len: list.len(),
    })?;
    entry
        .field(field)
        .ok_or_else(|| DocumentError::InvalidPath(path.to_string()))
}

fn entry_field_mut<'a, T: Entry>(
    list: &'a mut EntryList<T>,
    path: &FieldPath,
    index: usize,
    field: EntryField,
) -> Result<&'a mut String, DocumentError> {
    let len = list.len();
    let entry = list.get_mut(index).ok_or(DocumentError::IndexOutOfRange {
        section: T::SECTION,
        index,
        len,
    })?;
    entry
        .field_mut(field)
        .ok_or_else(|| DocumentError::InvalidPath(path.to_string()))
}

impl ResumeDocument {
    /// The document a fresh editor starts with: empty personal fields and one
    /// empty entry per section.
    pub fn seeded() -> Self {
        Self {
            education: EntryList::seeded(EducationEntry::default()),
            experience: EntryList::seeded(ExperienceEntry::default()),
            skills: EntryList::seeded(SkillGroup {
                category: SEEDED_SKILL_CATEGORY.to_string(),
                skill_list: String::new(),
            }),
            projects: EntryList::seeded(ProjectEntry::default()),
            ..Default::default()
        }
    }

    pub fn personal(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::FullName => &self.full_name,
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Location => &self.location,
            PersonalField::Linkedin => &self.linkedin,
            PersonalField::Website => &self.website,
            PersonalField::Summary => &self.summary,
        }
    }

    fn personal_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Website => &mut self.website,
            PersonalField::Summary => &mut self.summary,
        }
    }

    /// Reads the field addressed by `path`.
    pub fn get(&self, path: &FieldPath) -> Result<&str, DocumentError> {
        match *path {
            FieldPath::Personal(field) => Ok(self.personal(field)),
            FieldPath::Entry {
                section,
                index,
                field,
            } => match section {
                Section::Education => entry_field(&self.education, path, index, field),
                Section::Experience => entry_field(&self.experience, path, index, field),
                Section::Skills => entry_field(&self.skills, path, index, field),
                Section::Projects => entry_field(&self.projects, path, index, field),
            },
        }
    }

    /// Overwrites the field addressed by `path`.
    pub fn set(&mut self, path: &FieldPath, value: impl Into<String>) -> Result<(), DocumentError> {
        let slot = match *path {
            FieldPath::Personal(field) => self.personal_mut(field),
            FieldPath::Entry {
                section,
                index,
                field,
            } => match section {
                Section::Education => entry_field_mut(&mut self.education, path, index, field)?,
                Section::Experience => entry_field_mut(&mut self.experience, path, index, field)?,
                Section::Skills => entry_field_mut(&mut self.skills, path, index, field)?,
                Section::Projects => entry_field_mut(&mut self.projects, path, index, field)?,
            },
        };
        *slot = value.into();
        Ok(())
    }

    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Education => self.education.len(),
            Section::Experience => self.experience.len(),
            Section::Skills => self.skills.len(),
            Section::Projects => self.projects.len(),
        }
    }

    /// Appends an empty entry to `section`, returning its index.
    pub fn append(&mut self, section: Section) -> usize {
        match section {
            Section::Education => self.education.append(),
            Section::Experience => self.experience.append(),
            Section::Skills => self.skills.append(),
            Section::Projects => self.projects.append(),
        }
    }

    /// See [`EntryList::remove`].
    pub fn remove(&mut self, section: Section, index: usize) -> bool {
        match section {
            Section::Education => self.education.remove(index),
            Section::Experience => self.experience.remove(index),
            Section::Skills => self.skills.remove(index),
            Section::Projects => self.projects.remove(index),
        }
    }

    /// See [`EntryList::move_entry`]. Skill groups cannot be reordered.
    pub fn move_entry(
        &mut self,
        section: Section,
        index: usize,
        direction: Direction,
    ) -> Result<bool, DocumentError> {
        match section {
            Section::Education => Ok(self.education.move_entry(index, direction)),
            Section::Experience => Ok(self.experience.move_entry(index, direction)),
            Section::Projects => Ok(self.projects.move_entry(index, direction)),
            Section::Skills => Err(DocumentError::NotReorderable(section)),
        }
    }
}
