use std::fmt::Write;

use super::tree::{Column, HeaderStyle, LineRole, RenderedResume, RenderedSection};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn role_class(role: LineRole) -> &'static str {
    match role {
        LineRole::Title => "title",
        LineRole::Subtitle => "subtitle",
        LineRole::Dates => "dates",
        LineRole::Detail => "detail",
        LineRole::Body => "body",
    }
}

impl RenderedResume {
    fn stylesheet(&self) -> String {
        let theme = &self.theme;
        let (header_bg, header_fg) = match theme.header {
            HeaderStyle::Banner { background } => (background, "#ffffff"),
            HeaderStyle::Plain | HeaderStyle::Centered => ("transparent", "inherit"),
        };
        let header_align = match theme.header {
            HeaderStyle::Centered => "center",
            _ => "left",
        };
        let heading_align = if theme.centered_headings {
            "center"
        } else {
            "left"
        };
        let columns = if self.has_sidebar() {
            "2fr 1fr"
        } else {
            "1fr"
        };

        format!(
            "body {{ font-family: {font}; color: #1f2937; max-width: 8.5in; margin: 0 auto; }}\n\
             header {{ background: {header_bg}; color: {header_fg}; text-align: {header_align}; padding: 1.5rem; }}\n\
             header h1 {{ margin: 0 0 .5rem; }}\n\
             header .contacts span + span::before {{ content: \" | \"; }}\n\
             main {{ display: grid; grid-template-columns: {columns}; gap: 2rem; padding: 0 1.5rem; }}\n\
             h2 {{ color: {accent}; text-align: {heading_align}; border-bottom: 1px solid {accent}; }}\n\
             .entry {{ margin-bottom: 1rem; }}\n\
             .title {{ font-weight: bold; }}\n\
             .subtitle, .dates {{ color: #4b5563; }}\n\
             .body {{ white-space: pre-line; }}\n",
            font = theme.font.css(),
            accent = theme.accent,
        )
    }

    fn write_section(out: &mut String, section: &RenderedSection) {
        let _ = writeln!(out, "<section><h2>{}</h2>", escape(&section.heading));
        for entry in &section.entries {
            out.push_str("<div class=\"entry\">");
            for line in &entry.lines {
                let _ = write!(
                    out,
                    "<div class=\"{}\">{}</div>",
                    role_class(line.role),
                    escape(&line.text())
                );
            }
            out.push_str("</div>\n");
        }
        out.push_str("</section>\n");
    }

    /// Standalone HTML page for this rendering, styles inlined.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let title = self
            .header
            .name
            .as_ref()
            .map(|s| s.text.as_str())
            .unwrap_or("Resume");

        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>\n{}</style>\n</head>\n<body class=\"template-{}\">\n",
            escape(title),
            self.stylesheet(),
            self.template.id(),
        );

        out.push_str("<header>\n");
        if let Some(name) = &self.header.name {
            let _ = writeln!(out, "<h1>{}</h1>", escape(&name.text));
        }
        if !self.header.contacts.is_empty() {
            out.push_str("<div class=\"contacts\">");
            for contact in &self.header.contacts {
                let _ = write!(out, "<span>{}</span>", escape(&contact.text));
            }
            out.push_str("</div>\n");
        }
        out.push_str("</header>\n<main>\n");

        for column in [Column::Main, Column::Sidebar] {
            let mut sections = self.column(column).peekable();
            if sections.peek().is_none() {
                continue;
            }
            let class = match column {
                Column::Main => "main",
                Column::Sidebar => "sidebar",
            };
            let _ = writeln!(out, "<div class=\"{class}\">");
            for section in sections {
                Self::write_section(&mut out, section);
            }
            out.push_str("</div>\n");
        }

        out.push_str("</main>\n</body>\n</html>\n");
        out
    }
}
