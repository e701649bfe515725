use std::fmt;
use std::str::FromStr;

use crate::error::DocumentError;

/// The four repeatable sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Education,
    Experience,
    Skills,
    Projects,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::Projects,
    ];

    /// The JSON key of the section inside the stored document.
    pub fn key(self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Projects => "projects",
        }
    }

    /// Fields an entry of this section carries, in form order.
    pub fn fields(self) -> &'static [EntryField] {
        use EntryField::*;
        match self {
            Section::Education => &[
                School,
                Degree,
                FieldOfStudy,
                Location,
                StartDate,
                EndDate,
                Description,
            ],
            Section::Experience => &[
                Position,
                Company,
                Location,
                StartDate,
                EndDate,
                Description,
            ],
            Section::Skills => &[Category, SkillList],
            Section::Projects => &[
                Name,
                Role,
                StartDate,
                EndDate,
                Technologies,
                Description,
            ],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| DocumentError::InvalidPath(s.to_string()))
    }
}

/// Single-valued fields at the root of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Website,
    Summary,
}

impl PersonalField {
    pub const ALL: [PersonalField; 7] = [
        PersonalField::FullName,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Linkedin,
        PersonalField::Website,
        PersonalField::Summary,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PersonalField::FullName => "fullName",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Linkedin => "linkedin",
            PersonalField::Website => "website",
            PersonalField::Summary => "summary",
        }
    }
}

/// Every field name that can appear inside a section entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryField {
    School,
    Degree,
    FieldOfStudy,
    Company,
    Position,
    Category,
    SkillList,
    Name,
    Role,
    Technologies,
    Location,
    StartDate,
    EndDate,
    Description,
}

impl EntryField {
    pub fn key(self) -> &'static str {
        match self {
            EntryField::School => "school",
            EntryField::Degree => "degree",
            EntryField::FieldOfStudy => "fieldOfStudy",
            EntryField::Company => "company",
            EntryField::Position => "position",
            EntryField::Category => "category",
            EntryField::SkillList => "skillList",
            EntryField::Name => "name",
            EntryField::Role => "role",
            EntryField::Technologies => "technologies",
            EntryField::Location => "location",
            EntryField::StartDate => "startDate",
            EntryField::EndDate => "endDate",
            EntryField::Description => "description",
        }
    }
}

/// Address of one string field of a [`ResumeDocument`](super::ResumeDocument).
///
/// Displays and parses as `fullName` for root fields and
/// `experience[2].position` for entry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Personal(PersonalField),
    Entry {
        section: Section,
        index: usize,
        field: EntryField,
    },
}

impl FieldPath {
    pub fn entry(section: Section, index: usize, field: EntryField) -> Self {
        FieldPath::Entry {
            section,
            index,
            field,
        }
    }

    /// The section this path points into, `None` for personal fields.
    pub fn section(&self) -> Option<Section> {
        match self {
            FieldPath::Personal(_) => None,
            FieldPath::Entry { section, .. } => Some(*section),
        }
    }
}

impl From<PersonalField> for FieldPath {
    fn from(field: PersonalField) -> Self {
        FieldPath::Personal(field)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Personal(field) => f.write_str(field.key()),
            FieldPath::Entry {
                section,
                index,
                field,
            } => write!(f, "{}[{index}].{}", section.key(), field.key()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DocumentError::InvalidPath(s.to_string());

        let Some((head, rest)) = s.split_once('[') else {
            return PersonalField::ALL
                .into_iter()
                .find(|field| field.key() == s)
                .map(FieldPath::Personal)
                .ok_or_else(invalid);
        };

        let section: Section = head.parse().map_err(|_| invalid())?;
        let (index, field) = rest.split_once("].").ok_or_else(invalid)?;
        let index: usize = index.parse().map_err(|_| invalid())?;
        let field = section
            .fields()
            .iter()
            .copied()
            .find(|f| f.key() == field)
            .ok_or_else(invalid)?;

        Ok(FieldPath::entry(section, index, field))
    }
}
