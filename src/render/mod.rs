// src/render/mod.rs
// =============================================================================
// Turns the crawl's PageRecords into the output document.
//
// Rendering is a pure read of the crawl output: a failure here is reported
// to the caller but never touches the collected pages.
//
// Submodules:
// - layout: sentence chunking, word wrap and pagination (format independent)
// - pdf: writes the laid-out pages with printpdf
// =============================================================================

mod layout;
mod pdf;

use std::path::{Path, PathBuf};

use crate::crawl::PageRecord;
use crate::error::RenderError;

pub use pdf::PdfRenderer;

const OUTPUT_EXTENSION: &str = ".pdf";
const DEFAULT_SUFFIX: &str = "_website_content";

pub trait Renderer {
    fn render(&self, pages: &[PageRecord], destination: &Path) -> Result<(), RenderError>;
}

/// Picks the output file name.
///
/// Without a custom name: `<authority>_website_content.pdf`.
/// A custom name that doesn't end in `.pdf` gets the extension appended.
pub fn output_path(custom: Option<&str>, origin_authority: &str) -> PathBuf {
    let name = match custom.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        // "localhost:8080" is not a portable file name
        None => format!("{}{}", origin_authority.replace(':', "_"), DEFAULT_SUFFIX),
    };

    if name.to_ascii_lowercase().ends_with(OUTPUT_EXTENSION) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}{}", name, OUTPUT_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name_from_authority() {
        assert_eq!(
            output_path(None, "example.com"),
            PathBuf::from("example.com_website_content.pdf")
        );
        assert_eq!(
            output_path(None, "localhost:8080"),
            PathBuf::from("localhost_8080_website_content.pdf")
        );
    }

    #[test]
    fn test_custom_name_gets_extension() {
        assert_eq!(output_path(Some("report"), "example.com"), PathBuf::from("report.pdf"));
        assert_eq!(output_path(Some("report.PDF"), "example.com"), PathBuf::from("report.PDF"));
        assert_eq!(
            output_path(Some("out/site.pdf"), "example.com"),
            PathBuf::from("out/site.pdf")
        );
    }

    #[test]
    fn test_blank_custom_name_falls_back_to_default() {
        assert_eq!(
            output_path(Some("  "), "example.com"),
            PathBuf::from("example.com_website_content.pdf")
        );
    }
}
