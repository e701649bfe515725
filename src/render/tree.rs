use super::templates::TemplateId;
use crate::document::FieldPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    pub fn css(self) -> &'static str {
        match self {
            FontFamily::Sans => "'Helvetica Neue', Helvetica, Arial, sans-serif",
            FontFamily::Serif => "Georgia, 'Times New Roman', serif",
            FontFamily::Mono => "'JetBrains Mono', Menlo, Consolas, monospace",
        }
    }
}

/// How the name and contact block is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    Plain,
    Centered,
    /// Coloured full-width band with light text.
    Banner { background: &'static str },
}

/// Purely presentational knobs of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub font: FontFamily,
    pub accent: &'static str,
    pub header: HeaderStyle,
    pub centered_headings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Main,
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Title,
    Subtitle,
    Dates,
    Detail,
    /// Free text shown verbatim, line breaks included.
    Body,
}

/// A run of text, tagged with the document field it shows when it shows one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub field: Option<FieldPath>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub role: LineRole,
    pub spans: Vec<Span>,
}

impl Line {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub lines: Vec<Line>,
}

impl RenderedEntry {
    #[cfg(test)]
    pub fn line(&self, role: LineRole) -> Option<&Line> {
        self.lines.iter().find(|l| l.role == role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub heading: String,
    pub column: Column,
    pub entries: Vec<RenderedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: Option<Span>,
    pub contacts: Vec<Span>,
}

/// The visual structure a template produces for one document.
///
/// Everything the export actions need is here; they never look at the
/// document again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResume {
    pub template: TemplateId,
    pub theme: Theme,
    pub header: Header,
    pub sections: Vec<RenderedSection>,
}

impl RenderedResume {
    #[cfg(test)]
    pub fn section(&self, kind: SectionKind) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn column(&self, column: Column) -> impl Iterator<Item = &RenderedSection> {
        self.sections.iter().filter(move |s| s.column == column)
    }

    pub fn has_sidebar(&self) -> bool {
        self.column(Column::Sidebar).next().is_some()
    }

    /// Every document field displayed somewhere in the output.
    #[cfg(test)]
    pub fn fields(&self) -> std::collections::BTreeSet<FieldPath> {
        let header = self.header.name.iter().chain(&self.header.contacts);
        let body = self
            .sections
            .iter()
            .flat_map(|s| &s.entries)
            .flat_map(|e| &e.lines)
            .flat_map(|l| &l.spans);
        header.chain(body).filter_map(|span| span.field).collect()
    }
}

/// Accumulates spans for one line, skipping empty values and only placing a
/// separator between two present parts.
#[derive(Debug)]
pub(crate) struct LineBuilder {
    role: LineRole,
    spans: Vec<Span>,
}

impl LineBuilder {
    pub(crate) fn new(role: LineRole) -> Self {
        Self {
            role,
            spans: Vec::new(),
        }
    }

    pub(crate) fn literal(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.spans.push(Span {
                field: None,
                text: text.to_string(),
            });
        }
        self
    }

    pub(crate) fn field(mut self, path: FieldPath, value: &str) -> Self {
        if !value.is_empty() {
            self.spans.push(Span {
                field: Some(path),
                text: value.to_string(),
            });
        }
        self
    }

    /// Adds `value` preceded by `separator` when the line already has text.
    pub(crate) fn joined(self, separator: &str, path: FieldPath, value: &str) -> Self {
        if value.is_empty() {
            return self;
        }
        let has_content = self.spans.iter().any(|s| s.field.is_some());
        let with_separator = if has_content {
            self.literal(separator)
        } else {
            self
        };
        with_separator.field(path, value)
    }

    /// The finished line, or `None` when no field made it in.
    pub(crate) fn build(self) -> Option<Line> {
        if self.spans.iter().any(|s| s.field.is_some()) {
            Some(Line {
                role: self.role,
                spans: self.spans,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EntryField, PersonalField, Section};

    #[test]
    fn builder_skips_empty_parts_and_dangling_separators() {
        let degree = FieldPath::entry(Section::Education, 0, EntryField::Degree);
        let study = FieldPath::entry(Section::Education, 0, EntryField::FieldOfStudy);

        let line = LineBuilder::new(LineRole::Subtitle)
            .field(degree, "")
            .joined(", ", study, "Physics")
            .build()
            .unwrap();
        assert_eq!(line.text(), "Physics");

        let line = LineBuilder::new(LineRole::Subtitle)
            .field(degree, "BSc")
            .joined(", ", study, "Physics")
            .build()
            .unwrap();
        assert_eq!(line.text(), "BSc, Physics");
    }

    #[test]
    fn builder_without_fields_yields_nothing() {
        let line = LineBuilder::new(LineRole::Detail)
            .literal("Technologies: ")
            .field(PersonalField::Phone.into(), "")
            .build();
        assert!(line.is_none());
    }
}
