use std::path::PathBuf;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::info;

use super::{PdfOptions, PdfRenderer};
use crate::error::ExportError;
use crate::render::{FontFamily, PlainLine, RenderedResume, TextStyle};

const POINTS_PER_INCH: f32 = 72.0;
const LINE_SPACING: f32 = 1.3;

/// Writes vector PDFs with the standard 14 fonts, one file per export.
#[derive(Debug, Clone)]
pub struct LopdfRenderer {
    out_dir: PathBuf,
}

impl LopdfRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl PdfRenderer for LopdfRenderer {
    async fn render_to_pdf(
        &self,
        rendered: &RenderedResume,
        options: &PdfOptions,
    ) -> Result<PathBuf, ExportError> {
        let mut doc = build_document(rendered, options)?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;

        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(&options.filename);
        tokio::fs::write(&path, &buffer).await?;

        info!(path = %path.display(), bytes = buffer.len(), "PDF written");
        Ok(path)
    }
}

fn font_size(style: TextStyle) -> f32 {
    match style {
        TextStyle::Name => 20.0,
        TextStyle::Heading => 13.0,
        TextStyle::Title => 11.0,
        TextStyle::Contact => 9.0,
        TextStyle::Normal => 10.0,
        TextStyle::Blank => 6.0,
    }
}

fn is_bold(style: TextStyle) -> bool {
    matches!(style, TextStyle::Name | TextStyle::Heading | TextStyle::Title)
}

/// Base font names (regular, bold) for the theme's family.
fn base_fonts(family: FontFamily) -> (&'static str, &'static str) {
    match family {
        FontFamily::Sans => ("Helvetica", "Helvetica-Bold"),
        FontFamily::Serif => ("Times-Roman", "Times-Bold"),
        FontFamily::Mono => ("Courier", "Courier-Bold"),
    }
}

/// Average advance width as a fraction of the font size.
fn glyph_width(family: FontFamily) -> f32 {
    match family {
        FontFamily::Sans => 0.5,
        FontFamily::Serif => 0.45,
        FontFamily::Mono => 0.6,
    }
}

/// Greedy word wrap to at most `width` characters per line.
///
/// Leading whitespace is kept as a hanging indent on every wrapped line,
/// unless it leaves no room for text.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let body = text.trim_start();
    let indent = &text[..text.len() - body.len()];
    let indent_len = indent.chars().count();
    if body.is_empty() || indent_len == 0 || indent_len >= width {
        return wrap_words(body, width);
    }
    wrap_words(body, width - indent_len)
        .into_iter()
        .map(|line| format!("{indent}{line}"))
        .collect()
}

/// Words longer than a line are split hard. Whitespace runs collapse to a
/// single space, except that an empty input yields one empty line.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        if chars.is_empty() {
            continue;
        }
        let needed = if current_len == 0 {
            chars.len()
        } else {
            current_len + 1 + chars.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += chars.len();
        current.extend(chars);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encodes `text` for a font using `WinAnsiEncoding`; unmapped characters
/// become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// One wrapped, positioned run of text.
#[derive(Debug, Clone, PartialEq)]
struct Placed {
    bold: bool,
    size: f32,
    y: f32,
    text: String,
}

/// Wraps the lines and distributes them over as many pages as needed.
fn layout(lines: &[PlainLine], family: FontFamily, options: &PdfOptions) -> Vec<Vec<Placed>> {
    let (page_width, page_height) = options.page_points();
    let margin = options.margin_in * POINTS_PER_INCH;
    let usable = page_width - 2.0 * margin;
    let top = page_height - margin;

    let mut pages = vec![Vec::new()];
    let mut y = top;

    for line in lines {
        let size = font_size(line.style);
        let advance = size * LINE_SPACING;
        let per_line = (usable / (size * glyph_width(family))).floor() as usize;

        let wrapped = if line.style == TextStyle::Blank {
            vec![String::new()]
        } else {
            wrap(&line.text, per_line)
        };
        for text in wrapped {
            if y - advance < margin && pages.last().is_some_and(|p| !p.is_empty()) {
                pages.push(Vec::new());
                y = top;
            }
            y -= advance;
            if line.style != TextStyle::Blank {
                if let Some(page) = pages.last_mut() {
                    page.push(Placed {
                        bold: is_bold(line.style),
                        size,
                        y,
                        text,
                    });
                }
            }
        }
    }
    pages
}

fn page_content(placed: &[Placed], margin: f32) -> Content {
    let mut operations = Vec::with_capacity(placed.len() * 5);
    for run in placed {
        let font = if run.bold { "F2" } else { "F1" };
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), Object::Real(run.size)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(margin), Object::Real(run.y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(&run.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

fn font(doc: &mut Document, base: &str) -> ObjectId {
    doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base.as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]))
}

fn literal(text: &str) -> Object {
    Object::String(win_ansi(text), StringFormat::Literal)
}

fn build_document(rendered: &RenderedResume, options: &PdfOptions) -> Result<Document, ExportError> {
    let family = rendered.theme.font;
    let (page_width, page_height) = options.page_points();
    let margin = options.margin_in * POINTS_PER_INCH;
    let pages = layout(&rendered.plain_lines(), family, options);

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let (regular, bold) = base_fonts(family);
    let regular_id = font(&mut doc, regular);
    let bold_id = font(&mut doc, bold);
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![
            ("F1", Object::Reference(regular_id)),
            ("F2", Object::Reference(bold_id)),
        ])),
    )]));

    let mut page_ids = Vec::with_capacity(pages.len());
    for placed in &pages {
        let content = page_content(placed, margin);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(page_width),
                    Object::Real(page_height),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let title = rendered
        .header
        .name
        .as_ref()
        .map(|s| s.text.as_str())
        .unwrap_or("Resume");
    let info_id = doc.add_object(Dictionary::from_iter(vec![
        ("Title", literal(title)),
        ("Producer", literal("resume-builder")),
        ("Template", literal(rendered.template.id())),
        ("RenderScale", literal(&options.scale.to_string())),
    ]));
    doc.trailer.set("Info", Object::Reference(info_id));

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ExperienceEntry, ResumeDocument};
    use crate::render::{TemplateId, render};

    fn long_document() -> ResumeDocument {
        let mut doc = ResumeDocument::seeded();
        doc.full_name = "Jane Doe".into();
        doc.email = "jane@example.com".into();
        doc.summary = "Engineer. ".repeat(80);
        let jobs: Vec<ExperienceEntry> = (0..30)
            .map(|i| ExperienceEntry {
                company: format!("Company {i}"),
                position: "Engineer".into(),
                start_date: "Jan 2020".into(),
                description: "• Built things\n• Fixed things\n• Shipped things".into(),
                ..Default::default()
            })
            .collect();
        doc.experience = jobs.into();
        doc
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("one two three four", 9), vec!["one two", "three", "four"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_never_exceeds_width() {
        for text in [
            "Results-driven engineer with a record of delivering high-quality code",
            "    • Cut build times by half across every service",
        ] {
            for width in [3, 5, 12, 30] {
                for line in wrap(text, width) {
                    assert!(line.chars().count() <= width, "{line:?} > {width}");
                }
            }
        }
    }

    #[test]
    fn wrap_keeps_leading_indent() {
        assert_eq!(wrap("  • indented", 40), vec!["  • indented"]);
        assert_eq!(
            wrap("  • Shipped the thing", 12),
            vec!["  • Shipped", "  the thing"]
        );
        assert_eq!(wrap("   ", 10), vec![""]);
    }

    #[test]
    fn win_ansi_maps_typography() {
        assert_eq!(win_ansi("a – b"), vec![b'a', b' ', 0x96, b' ', b'b']);
        assert_eq!(win_ansi("•é"), vec![0x95, 0xe9]);
        assert_eq!(win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn long_resume_spans_several_pages() {
        let rendered = render(&long_document(), TemplateId::Modern);
        let options = PdfOptions::for_document(&long_document());
        let pages = layout(&rendered.plain_lines(), rendered.theme.font, &options);

        assert!(pages.len() > 1);
        let margin = options.margin_in * POINTS_PER_INCH;
        for page in &pages {
            assert!(!page.is_empty());
            assert!(page.iter().all(|p| p.y >= margin));
        }
    }

    #[tokio::test]
    async fn writes_a_loadable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = LopdfRenderer::new(dir.path().join("out"));
        let doc = long_document();
        let rendered = render(&doc, TemplateId::Classic);
        let options = PdfOptions::for_document(&doc);

        let path = renderer.render_to_pdf(&rendered, &options).await.unwrap();
        assert_eq!(path, dir.path().join("out").join("Jane Doe.pdf"));

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let loaded = Document::load_mem(&bytes).unwrap();
        assert!(loaded.get_pages().len() > 1);
    }

    #[tokio::test]
    async fn empty_resume_still_produces_one_page() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = LopdfRenderer::new(dir.path());
        let doc = ResumeDocument::default();
        let rendered = render(&doc, TemplateId::Tech);

        let path = renderer
            .render_to_pdf(&rendered, &PdfOptions::for_document(&doc))
            .await
            .unwrap();
        assert!(path.ends_with("Resume.pdf"));
        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
    }
}
