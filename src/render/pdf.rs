// src/render/pdf.rs
// =============================================================================
// Writes the laid-out pages to a PDF using printpdf's builtin Helvetica
// fonts on US-Letter paper.
//
// Builtin PDF fonts only cover Latin-1, so other characters are replaced
// with '?' before they are written.
// =============================================================================

use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::layout::{layout, LineKind};
use super::Renderer;
use crate::crawl::PageRecord;
use crate::error::RenderError;

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 5.0;
const HEADING_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 10.0;

// roughly what fits in 176 mm of 10pt Helvetica
const LINE_WIDTH_CHARS: usize = 95;
const LINES_PER_PAGE: usize = 47;

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    title: String,
}

impl PdfRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, pages: &[PageRecord], destination: &Path) -> Result<(), RenderError> {
        let laid_out = layout(pages, LINE_WIDTH_CHARS, LINES_PER_PAGE);

        let (doc, first_page, first_layer) = PdfDocument::new(
            pdf_safe(&self.title),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Page 1",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

        let mut first = Some((first_page, first_layer));
        for (index, lines) in laid_out.iter().enumerate() {
            let (page, layer) = match first.take() {
                Some(indices) => indices,
                None => doc.add_page(
                    Mm(PAGE_WIDTH_MM),
                    Mm(PAGE_HEIGHT_MM),
                    format!("Page {}", index + 1),
                ),
            };
            let layer = doc.get_page(page).get_layer(layer);

            let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
            for line in lines {
                match line.kind {
                    LineKind::Heading => layer.use_text(
                        pdf_safe(&line.text),
                        HEADING_SIZE,
                        Mm(MARGIN_MM),
                        Mm(y),
                        &bold,
                    ),
                    LineKind::Body => layer.use_text(
                        pdf_safe(&line.text),
                        BODY_SIZE,
                        Mm(MARGIN_MM),
                        Mm(y),
                        &regular,
                    ),
                    LineKind::Blank => {}
                }
                y -= LINE_HEIGHT_MM;
            }
        }

        let file = File::create(destination).map_err(|source| RenderError::Io {
            path: destination.display().to_string(),
            source,
        })?;
        doc.save(&mut BufWriter::new(file)).map_err(pdf_error)?;
        Ok(())
    }
}

fn pdf_error<E: std::fmt::Debug>(err: E) -> RenderError {
    RenderError::Pdf(format!("{:?}", err))
}

fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c,
            _ => '?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_safe() {
        assert_eq!(pdf_safe("café – 日本"), "café ? ??");
    }

    #[test]
    fn test_render_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let long_text = "A sentence that goes on for a while. ".repeat(200);
        let pages = vec![
            PageRecord {
                url: "https://example.com/".to_string(),
                depth: 0,
                text: "Hello World. Second sentence.".to_string(),
            },
            PageRecord {
                url: "https://example.com/long".to_string(),
                depth: 1,
                text: long_text,
            },
        ];

        PdfRenderer::new("example.com").render(&pages, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_empty_crawl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        PdfRenderer::new("empty").render(&[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.pdf");
        let err = PdfRenderer::new("x").render(&[], &path).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
