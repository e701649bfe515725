use super::tree::{Column, LineRole, RenderedResume};

/// Typographic weight of a plain-text line, used by the PDF writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Name,
    Contact,
    Heading,
    Title,
    Normal,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainLine {
    pub style: TextStyle,
    pub text: String,
}

impl PlainLine {
    fn new(style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(TextStyle::Blank, "")
    }
}

const CONTACT_SEPARATOR: &str = "  |  ";

impl RenderedResume {
    /// Flattens the tree into styled lines: header first, then the main
    /// column, then the sidebar. Body text is split on its own line breaks
    /// and otherwise left untouched.
    pub fn plain_lines(&self) -> Vec<PlainLine> {
        let mut lines = Vec::new();

        if let Some(name) = &self.header.name {
            lines.push(PlainLine::new(TextStyle::Name, name.text.clone()));
        }
        if !self.header.contacts.is_empty() {
            let contacts: Vec<&str> = self.header.contacts.iter().map(|s| s.text.as_str()).collect();
            lines.push(PlainLine::new(TextStyle::Contact, contacts.join(CONTACT_SEPARATOR)));
        }

        let sections = self.column(Column::Main).chain(self.column(Column::Sidebar));
        for section in sections {
            if !lines.is_empty() {
                lines.push(PlainLine::blank());
            }
            lines.push(PlainLine::new(TextStyle::Heading, section.heading.clone()));

            for (i, entry) in section.entries.iter().enumerate() {
                if i > 0 {
                    lines.push(PlainLine::blank());
                }
                for line in &entry.lines {
                    let text = line.text();
                    match line.role {
                        LineRole::Title => lines.push(PlainLine::new(TextStyle::Title, text)),
                        LineRole::Body => lines.extend(
                            text.split('\n')
                                .map(|l| PlainLine::new(TextStyle::Normal, l)),
                        ),
                        LineRole::Subtitle | LineRole::Dates | LineRole::Detail => {
                            lines.push(PlainLine::new(TextStyle::Normal, text))
                        }
                    }
                }
            }
        }

        lines
    }

    /// Plain-text rendition for terminals and printers.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in self.plain_lines() {
            out.push_str(&line.text);
            out.push('\n');
            if line.style == TextStyle::Heading {
                out.push_str(&"-".repeat(line.text.chars().count()));
                out.push('\n');
            }
        }
        out
    }
}
