//! A4 PDF layout of printable documents.
//!
//! Documents are set in the built-in Helvetica faces, so no font files are
//! needed at runtime. Those faces only cover ASCII reliably; German letters
//! are transliterated and anything else becomes `?`.

use crate::{Block, Document};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use tracing::{debug, instrument};
use whodunit_error::{RenderError, RenderErrorKind, WhodunitResult};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const GAP: f32 = 2.0;
const LAYER: &str = "Text";

/// Millimetres per typographic point.
const MM_PER_PT: f32 = 0.3528;

#[derive(Debug, Clone, Copy)]
struct Style {
    size: f32,
    line_height: f32,
    bold: bool,
}

const TITLE: Style = Style {
    size: 18.0,
    line_height: 10.0,
    bold: true,
};
const HEADING: Style = Style {
    size: 13.0,
    line_height: 8.0,
    bold: true,
};
const LABEL: Style = Style {
    size: 11.0,
    line_height: 6.0,
    bold: true,
};
const BODY: Style = Style {
    size: 11.0,
    line_height: 6.0,
    bold: false,
};

impl Style {
    /// Characters that fit between the margins, using an average glyph width.
    fn chars_per_line(self) -> usize {
        let em = if self.bold { 0.58 } else { 0.52 };
        let glyph = self.size * MM_PER_PT * em;
        (((PAGE_WIDTH - 2.0 * MARGIN) / glyph).floor() as usize).max(1)
    }
}

/// ASCII form of `text` for the built-in fonts.
///
/// # Examples
///
/// ```
/// use whodunit_render::pdf_safe;
///
/// assert_eq!(pdf_safe("Fischbrötchen in Lübeck"), "Fischbroetchen in Luebeck");
/// assert_eq!(pdf_safe("Straße \u{263a}"), "Strasse ?");
/// ```
pub fn pdf_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            'é' | 'è' | 'ê' => out.push('e'),
            'á' | 'à' | 'â' => out.push('a'),
            '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Greedy word wrap to at most `width` characters per line.
///
/// Words longer than a line are split. Empty text yields one empty line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(width) {
            let piece: String = piece.iter().collect();
            let needed = if current.is_empty() {
                piece.len()
            } else {
                current.len() + 1 + piece.len()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Writes lines top to bottom, starting a new page at the bottom margin.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Distance from the top edge of the page to the last written line
    cursor: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, printpdf::Error> {
        let (doc, page, layer) =
            PdfDocument::new(pdf_safe(title), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: MARGIN,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = MARGIN;
        self.pages += 1;
    }

    fn line(&mut self, text: &str, style: Style) {
        if self.cursor + style.line_height > PAGE_HEIGHT - MARGIN {
            self.new_page();
        }
        self.cursor += style.line_height;
        let baseline = PAGE_HEIGHT - self.cursor + style.line_height * 0.25;
        let font = if style.bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, style.size, Mm(MARGIN), Mm(baseline), font);
    }

    fn wrapped(&mut self, text: &str, style: Style) {
        for line in wrap_words(&pdf_safe(text), style.chars_per_line()) {
            self.line(&line, style);
        }
    }

    fn space(&mut self, height: f32) {
        self.cursor = (self.cursor + height).min(PAGE_HEIGHT - MARGIN);
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Title(text) => {
                self.wrapped(text, TITLE);
                self.space(GAP);
            }
            Block::Heading(text) => self.wrapped(text, HEADING),
            Block::Paragraph(text) => self.wrapped(text, BODY),
            Block::Field { key, value } => {
                self.wrapped(&format!("{}:", key), LABEL);
                self.wrapped(value, BODY);
            }
            Block::Gap => self.space(GAP),
            Block::PageBreak => self.new_page(),
        }
    }
}

/// Lay a document out as an A4 PDF.
///
/// # Errors
///
/// Returns an error when the PDF cannot be assembled.
#[instrument(skip(document), fields(name = %document.name, blocks = document.blocks.len()))]
pub fn render_pdf(document: &Document) -> WhodunitResult<Vec<u8>> {
    let pdf_error = |e: printpdf::Error| {
        RenderError::new(RenderErrorKind::Pdf {
            name: document.name.clone(),
            message: e.to_string(),
        })
    };

    let mut writer = PageWriter::new(document.title()).map_err(pdf_error)?;
    for block in &document.blocks {
        writer.block(block);
    }
    let pages = writer.pages;
    let bytes = writer.doc.save_to_bytes().map_err(pdf_error)?;
    debug!(pages, bytes = bytes.len(), "Rendered PDF");
    Ok(bytes)
}
