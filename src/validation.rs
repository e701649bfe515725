//! Field-level validation of the resume document.
//!
//! Rules are synchronous and produce a map from [`FieldPath`] to a
//! human-readable message. An empty map means the checked fields are valid.
//! Validation failures are never errors in the `Result` sense: they are
//! shown next to the offending field and only block forward navigation.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use email_address::{EmailAddress, Options};

use crate::document::{Entry, EntryField, EntryList, FieldPath, PersonalField, ResumeDocument};
use crate::wizard::Stage;

/// Minimum length of every required text field.
pub const MIN_REQUIRED_LEN: usize = 2;

/// Field path → message for every failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldPath, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.0.contains_key(path)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FieldPath, String> {
        self.0.iter()
    }

    /// Stages owning at least one failing field, in wizard order.
    pub fn stages(&self) -> BTreeSet<Stage> {
        self.0.keys().map(Stage::owning).collect()
    }

    fn insert(&mut self, path: FieldPath, message: &str) {
        self.0.insert(path, message.to_string());
    }

    fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, message)) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{path}: {message}")?;
        }
        Ok(())
    }
}

fn too_short(value: &str) -> bool {
    value.chars().count() < MIN_REQUIRED_LEN
}

const EMAIL_OPTIONS: Options = Options {
    minimum_sub_domains: 2,
    allow_domain_literal: false,
    allow_display_text: false,
};

/// `local@domain.tld`: a bare address with an unquoted local part and a
/// domain ending in a label of at least two ASCII letters.
pub fn is_valid_email(value: &str) -> bool {
    let Ok(address) = EmailAddress::parse_with_options(value, EMAIL_OPTIONS) else {
        return false;
    };
    if address.local_part().starts_with('"') {
        return false;
    }
    address.domain().rsplit_once('.').is_some_and(|(name, tld)| {
        !name.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
    })
}

/// Required fields of one entry type with the message shown when too short.
fn required_fields(section_fields: &[EntryField]) -> Vec<(EntryField, &'static str)> {
    section_fields
        .iter()
        .filter_map(|field| {
            let message = match field {
                EntryField::School => "School name is required",
                EntryField::Company => "Company name is required",
                EntryField::Position => "Position is required",
                EntryField::SkillList => "Please enter at least one skill",
                EntryField::Name => "Project name is required",
                _ => return None,
            };
            Some((*field, message))
        })
        .collect()
}

fn validate_entries<T: Entry>(list: &EntryList<T>, errors: &mut ValidationErrors) {
    let required = required_fields(T::SECTION.fields());
    for (index, entry) in list.iter().enumerate() {
        for &(field, message) in &required {
            if entry.field(field).is_some_and(too_short) {
                errors.insert(FieldPath::entry(T::SECTION, index, field), message);
            }
        }
    }
}

/// Validates only the fields that belong to `stage`.
pub fn validate_stage(document: &ResumeDocument, stage: Stage) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    match stage {
        Stage::Personal => {
            if too_short(&document.full_name) {
                errors.insert(
                    PersonalField::FullName.into(),
                    "Name must be at least 2 characters",
                );
            }
            if !is_valid_email(&document.email) {
                errors.insert(
                    PersonalField::Email.into(),
                    "Please enter a valid email address",
                );
            }
        }
        Stage::Education => validate_entries(&document.education, &mut errors),
        Stage::Experience => validate_entries(&document.experience, &mut errors),
        Stage::Skills => validate_entries(&document.skills, &mut errors),
        Stage::Projects => validate_entries(&document.projects, &mut errors),
    }
    errors
}

/// Validates every stage; used before the document is submitted.
pub fn validate_document(document: &ResumeDocument) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for stage in Stage::ALL {
        errors.extend(validate_stage(document, stage));
    }
    errors
}
