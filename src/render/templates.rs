use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tree::{
    Column, FontFamily, Header, HeaderStyle, Line, LineBuilder, LineRole, RenderedEntry,
    RenderedResume, RenderedSection, SectionKind, Span, Theme,
};
use crate::document::{
    EducationEntry, Entry, EntryField, ExperienceEntry, FieldPath, PersonalField, ProjectEntry,
    ResumeDocument, SkillGroup,
};

/// Shown in place of an empty end date.
const PRESENT: &str = "Present";

const RANGE_SEPARATOR: &str = " – ";

/// The fixed set of layouts a resume can be shown in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Creative,
    Tech,
}

#[derive(Debug, Error)]
#[error("unknown template `{0}` (expected one of: modern, classic, creative, tech)")]
pub struct UnknownTemplate(String);

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Creative,
        TemplateId::Tech,
    ];

    /// Identifier stored under `resumeTemplate`.
    pub fn id(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Creative => "creative",
            TemplateId::Tech => "tech",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateId::Modern => "Modern Minimalist",
            TemplateId::Classic => "Classic Professional",
            TemplateId::Creative => "Creative Portfolio",
            TemplateId::Tech => "Tech Innovator",
        }
    }

    /// The layout strategy behind this identifier.
    pub fn template(self) -> &'static dyn ResumeTemplate {
        match self {
            TemplateId::Modern => &Modern,
            TemplateId::Classic => &Classic,
            TemplateId::Creative => &Creative,
            TemplateId::Tech => &Tech,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

/// One visual layout of the resume.
///
/// Implementations may reorder sections, rename headings and restyle, but
/// they all show the same fields and follow the same omission rules.
pub trait ResumeTemplate: Sync {
    fn id(&self) -> TemplateId;

    fn render(&self, document: &ResumeDocument) -> RenderedResume;
}

/// Per-template wording of the entry lines.
struct EntryStyle {
    /// Joins company (or school) with location on the subtitle line.
    place_separator: &'static str,
    /// Classic titles education with the degree and puts the school below.
    degree_first: bool,
    /// Prefix for the technologies line, if any.
    technologies_label: &'static str,
    category_suffix: &'static str,
}

const STANDARD_STYLE: EntryStyle = EntryStyle {
    place_separator: ", ",
    degree_first: false,
    technologies_label: "Technologies: ",
    category_suffix: "",
};

fn entry_path<T: Entry>(index: usize, field: EntryField) -> FieldPath {
    FieldPath::entry(T::SECTION, index, field)
}

/// `start – end`, with `Present` for a missing end. `None` when both are empty.
fn date_line(start_path: FieldPath, start: &str, end_path: FieldPath, end: &str) -> Option<Line> {
    if start.is_empty() && end.is_empty() {
        return None;
    }
    let separator = if start.is_empty() {
        RANGE_SEPARATOR.trim_start()
    } else {
        RANGE_SEPARATOR
    };
    let builder = LineBuilder::new(LineRole::Dates)
        .field(start_path, start)
        .literal(separator);
    if end.is_empty() {
        builder.literal(PRESENT).build()
    } else {
        builder.field(end_path, end).build()
    }
}

fn entry_dates<T: Entry>(entry: &T, index: usize) -> Option<Line> {
    date_line(
        entry_path::<T>(index, EntryField::StartDate),
        entry.field(EntryField::StartDate).unwrap_or_default(),
        entry_path::<T>(index, EntryField::EndDate),
        entry.field(EntryField::EndDate).unwrap_or_default(),
    )
}

fn body<T: Entry>(entry: &T, index: usize) -> Option<Line> {
    LineBuilder::new(LineRole::Body)
        .field(
            entry_path::<T>(index, EntryField::Description),
            entry.field(EntryField::Description).unwrap_or_default(),
        )
        .build()
}

fn header(document: &ResumeDocument) -> Header {
    let span = |field: PersonalField| {
        let text = document.personal(field);
        (!text.is_empty()).then(|| Span {
            field: Some(field.into()),
            text: text.to_string(),
        })
    };
    let contacts = [
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Linkedin,
        PersonalField::Website,
    ]
    .into_iter()
    .filter_map(span)
    .collect();

    Header {
        name: span(PersonalField::FullName),
        contacts,
    }
}

fn section(
    kind: SectionKind,
    heading: &str,
    column: Column,
    entries: Vec<RenderedEntry>,
) -> Option<RenderedSection> {
    (!entries.is_empty()).then(|| RenderedSection {
        kind,
        heading: heading.to_string(),
        column,
        entries,
    })
}

fn summary_section(document: &ResumeDocument, heading: &str, column: Column) -> Option<RenderedSection> {
    let line = LineBuilder::new(LineRole::Body)
        .field(PersonalField::Summary.into(), &document.summary)
        .build()?;
    section(
        SectionKind::Summary,
        heading,
        column,
        vec![RenderedEntry { lines: vec![line] }],
    )
}

fn experience_entry(entry: &ExperienceEntry, i: usize, style: &EntryStyle) -> RenderedEntry {
    let path = |field| entry_path::<ExperienceEntry>(i, field);
    let lines = [
        LineBuilder::new(LineRole::Title)
            .field(path(EntryField::Position), &entry.position)
            .build(),
        LineBuilder::new(LineRole::Subtitle)
            .field(path(EntryField::Company), &entry.company)
            .joined(style.place_separator, path(EntryField::Location), &entry.location)
            .build(),
        entry_dates(entry, i),
        body(entry, i),
    ];
    RenderedEntry {
        lines: lines.into_iter().flatten().collect(),
    }
}

fn education_entry(
    entry: &EducationEntry,
    i: usize,
    style: &EntryStyle,
    location_on_own_line: bool,
) -> RenderedEntry {
    let path = |field| entry_path::<EducationEntry>(i, field);
    let degree = LineBuilder::new(LineRole::Title)
        .field(path(EntryField::Degree), &entry.degree)
        .joined(", ", path(EntryField::FieldOfStudy), &entry.field_of_study);

    let (title, subtitle, location) = if style.degree_first {
        let school = LineBuilder::new(LineRole::Subtitle)
            .field(path(EntryField::School), &entry.school)
            .joined(", ", path(EntryField::Location), &entry.location);
        (degree.build(), school.build(), None)
    } else {
        let school = LineBuilder::new(LineRole::Title).field(path(EntryField::School), &entry.school);
        let mut subtitle = LineBuilder::new(LineRole::Subtitle)
            .field(path(EntryField::Degree), &entry.degree)
            .joined(", ", path(EntryField::FieldOfStudy), &entry.field_of_study);
        let mut location = None;
        if location_on_own_line {
            location = LineBuilder::new(LineRole::Detail)
                .field(path(EntryField::Location), &entry.location)
                .build();
        } else {
            subtitle = subtitle.joined(" - ", path(EntryField::Location), &entry.location);
        }
        (school.build(), subtitle.build(), location)
    };

    let lines = [title, subtitle, entry_dates(entry, i), location, body(entry, i)];
    RenderedEntry {
        lines: lines.into_iter().flatten().collect(),
    }
}

fn skill_entry(entry: &SkillGroup, i: usize, style: &EntryStyle) -> RenderedEntry {
    let path = |field| entry_path::<SkillGroup>(i, field);
    let category = LineBuilder::new(LineRole::Title)
        .field(path(EntryField::Category), &entry.category)
        .build()
        .map(|mut line| {
            if !style.category_suffix.is_empty() {
                line.spans.push(Span {
                    field: None,
                    text: style.category_suffix.to_string(),
                });
            }
            line
        });
    let skills = LineBuilder::new(LineRole::Detail)
        .field(path(EntryField::SkillList), &entry.skill_list)
        .build();
    RenderedEntry {
        lines: [category, skills].into_iter().flatten().collect(),
    }
}

fn project_entry(entry: &ProjectEntry, i: usize, style: &EntryStyle) -> RenderedEntry {
    let path = |field| entry_path::<ProjectEntry>(i, field);
    let lines = [
        LineBuilder::new(LineRole::Title)
            .field(path(EntryField::Name), &entry.name)
            .build(),
        LineBuilder::new(LineRole::Subtitle)
            .field(path(EntryField::Role), &entry.role)
            .build(),
        entry_dates(entry, i),
        LineBuilder::new(LineRole::Detail)
            .literal(style.technologies_label)
            .field(path(EntryField::Technologies), &entry.technologies)
            .build(),
        body(entry, i),
    ];
    RenderedEntry {
        lines: lines.into_iter().flatten().collect(),
    }
}

fn experience_section(
    document: &ResumeDocument,
    heading: &str,
    column: Column,
    style: &EntryStyle,
) -> Option<RenderedSection> {
    let entries = document
        .experience
        .iter()
        .enumerate()
        .map(|(i, e)| experience_entry(e, i, style))
        .collect();
    section(SectionKind::Experience, heading, column, entries)
}

fn education_section(
    document: &ResumeDocument,
    heading: &str,
    column: Column,
    style: &EntryStyle,
    location_on_own_line: bool,
) -> Option<RenderedSection> {
    let entries = document
        .education
        .iter()
        .enumerate()
        .map(|(i, e)| education_entry(e, i, style, location_on_own_line))
        .collect();
    section(SectionKind::Education, heading, column, entries)
}

fn skills_section(
    document: &ResumeDocument,
    heading: &str,
    column: Column,
    style: &EntryStyle,
) -> Option<RenderedSection> {
    let entries = document
        .skills
        .iter()
        .enumerate()
        .map(|(i, e)| skill_entry(e, i, style))
        .collect();
    section(SectionKind::Skills, heading, column, entries)
}

fn projects_section(
    document: &ResumeDocument,
    heading: &str,
    column: Column,
    style: &EntryStyle,
) -> Option<RenderedSection> {
    let entries = document
        .projects
        .iter()
        .enumerate()
        .map(|(i, e)| project_entry(e, i, style))
        .collect();
    section(SectionKind::Projects, heading, column, entries)
}

fn assemble(
    template: TemplateId,
    theme: Theme,
    document: &ResumeDocument,
    sections: impl IntoIterator<Item = Option<RenderedSection>>,
) -> RenderedResume {
    RenderedResume {
        template,
        theme,
        header: header(document),
        sections: sections.into_iter().flatten().collect(),
    }
}

/// Single column, sans serif, thin rules under the headings.
#[derive(Debug)]
pub struct Modern;

impl ResumeTemplate for Modern {
    fn id(&self) -> TemplateId {
        TemplateId::Modern
    }

    fn render(&self, document: &ResumeDocument) -> RenderedResume {
        let theme = Theme {
            font: FontFamily::Sans,
            accent: "#1f2937",
            header: HeaderStyle::Plain,
            centered_headings: false,
        };
        let style = &STANDARD_STYLE;
        assemble(
            self.id(),
            theme,
            document,
            [
                summary_section(document, "Summary", Column::Main),
                experience_section(document, "Experience", Column::Main, style),
                education_section(document, "Education", Column::Main, style, false),
                skills_section(document, "Skills", Column::Main, style),
                projects_section(document, "Projects", Column::Main, style),
            ],
        )
    }
}

/// Serif, centred upper-case headings, degree-first education.
#[derive(Debug)]
pub struct Classic;

impl ResumeTemplate for Classic {
    fn id(&self) -> TemplateId {
        TemplateId::Classic
    }

    fn render(&self, document: &ResumeDocument) -> RenderedResume {
        let theme = Theme {
            font: FontFamily::Serif,
            accent: "#111827",
            header: HeaderStyle::Centered,
            centered_headings: true,
        };
        let style = &EntryStyle {
            degree_first: true,
            ..STANDARD_STYLE
        };
        assemble(
            self.id(),
            theme,
            document,
            [
                summary_section(document, "PROFESSIONAL SUMMARY", Column::Main),
                experience_section(document, "PROFESSIONAL EXPERIENCE", Column::Main, style),
                education_section(document, "EDUCATION", Column::Main, style, false),
                skills_section(document, "SKILLS", Column::Main, style),
                projects_section(document, "PROJECTS", Column::Main, style),
            ],
        )
    }
}

/// Colour banner header, narrative main column and a sidebar.
#[derive(Debug)]
pub struct Creative;

impl ResumeTemplate for Creative {
    fn id(&self) -> TemplateId {
        TemplateId::Creative
    }

    fn render(&self, document: &ResumeDocument) -> RenderedResume {
        let theme = Theme {
            font: FontFamily::Sans,
            accent: "#7c3aed",
            header: HeaderStyle::Banner {
                background: "#7c3aed",
            },
            centered_headings: false,
        };
        let style = &EntryStyle {
            technologies_label: "",
            ..STANDARD_STYLE
        };
        assemble(
            self.id(),
            theme,
            document,
            [
                summary_section(document, "About Me", Column::Main),
                experience_section(document, "Experience", Column::Main, style),
                projects_section(document, "Projects", Column::Main, style),
                education_section(document, "Education", Column::Sidebar, style, true),
                skills_section(document, "Skills", Column::Sidebar, style),
            ],
        )
    }
}

/// Monospace, dark header, skills up front.
#[derive(Debug)]
pub struct Tech;

impl ResumeTemplate for Tech {
    fn id(&self) -> TemplateId {
        TemplateId::Tech
    }

    fn render(&self, document: &ResumeDocument) -> RenderedResume {
        let theme = Theme {
            font: FontFamily::Mono,
            accent: "#2563eb",
            header: HeaderStyle::Banner {
                background: "#111827",
            },
            centered_headings: false,
        };
        let style = &EntryStyle {
            place_separator: " @ ",
            technologies_label: "",
            category_suffix: ":",
            ..STANDARD_STYLE
        };
        assemble(
            self.id(),
            theme,
            document,
            [
                summary_section(document, "<Summary>", Column::Main),
                skills_section(document, "<Skills>", Column::Main, style),
                experience_section(document, "<Experience>", Column::Main, style),
                projects_section(document, "<Projects>", Column::Main, style),
                education_section(document, "<Education>", Column::Main, style, true),
            ],
        )
    }
}
