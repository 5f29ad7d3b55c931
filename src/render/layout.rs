// src/render/layout.rs
// =============================================================================
// Lays collected pages out as lines and pages, independent of the PDF writer.
//
// For each PageRecord:
//   Source: <url>            (heading)
//   <sentence chunk>         (body, word-wrapped)
//                            (blank spacer)
//   <sentence chunk>
//   ...
//
// Sentences are found by splitting on ". ", which is a rough heuristic
// ("e.g. this" gets split too). That is fine for a readable document.
// =============================================================================

use crate::crawl::PageRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Body,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn heading(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Heading,
            text: text.into(),
        }
    }

    fn body(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Body,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            text: String::new(),
        }
    }
}

/// Splits text into sentence-like chunks on ". ".
///
/// The period consumed by the split is put back, so "A. B." becomes
/// ["A.", "B."] rather than ["A", "B."].
pub fn sentence_chunks(text: &str) -> Vec<String> {
    let pieces: Vec<&str> = text.split(". ").collect();
    let last = pieces.len().saturating_sub(1);

    pieces
        .iter()
        .enumerate()
        .filter_map(|(i, piece)| {
            let piece = piece.trim();
            if piece.is_empty() {
                None
            } else if i < last {
                Some(format!("{}.", piece))
            } else {
                Some(piece.to_string())
            }
        })
        .collect()
}

/// Greedy word wrap. Words longer than `width` (long URLs) are hard-split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();

        if chars.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            for piece in chars.chunks(width) {
                lines.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { chars.len() } else { current_len + 1 + chars.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += chars.len();
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lays out every record and packs the lines into pages.
///
/// Always returns at least one (possibly empty) page.
pub fn layout(pages: &[PageRecord], line_width: usize, lines_per_page: usize) -> Vec<Vec<Line>> {
    let mut lines = Vec::new();

    for record in pages {
        for heading in wrap(&format!("Source: {}", record.url), line_width) {
            lines.push(Line::heading(heading));
        }
        for chunk in sentence_chunks(&record.text) {
            lines.extend(wrap(&chunk, line_width).into_iter().map(Line::body));
            lines.push(Line::blank());
        }
    }

    paginate(lines, lines_per_page.max(1))
}

fn paginate(lines: Vec<Line>, lines_per_page: usize) -> Vec<Vec<Line>> {
    let mut pages = vec![Vec::new()];

    for line in lines {
        let full = pages.last().map_or(false, |page| page.len() >= lines_per_page);
        if full {
            pages.push(Vec::new());
        }
        let Some(page) = pages.last_mut() else { continue };
        // no spacer at the top of a page
        if page.is_empty() && line.kind == LineKind::Blank {
            continue;
        }
        page.push(line);
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(url: &str, text: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            depth: 0,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_sentence_chunks_restore_period() {
        assert_eq!(
            sentence_chunks("Hello World. This is a page. Bye"),
            vec!["Hello World.", "This is a page.", "Bye"]
        );
    }

    #[test]
    fn test_sentence_chunks_keep_final_period_once() {
        assert_eq!(sentence_chunks("One. Two."), vec!["One.", "Two."]);
        assert_eq!(sentence_chunks("Hello World."), vec!["Hello World."]);
    }

    #[test]
    fn test_sentence_chunks_skip_empty() {
        assert!(sentence_chunks("").is_empty());
        assert_eq!(sentence_chunks(". A"), vec!["A"]);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap("", 10), Vec::<String>::new());
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        assert_eq!(wrap("ab abcdefgh c", 3), vec!["ab", "abc", "def", "gh", "c"]);
    }

    #[test]
    fn test_layout_sections() {
        let pages = layout(&[record("https://example.com/", "First. Second.")], 80, 50);
        assert_eq!(pages.len(), 1);
        assert_eq!(
            pages[0],
            vec![
                Line::heading("Source: https://example.com/"),
                Line::body("First."),
                Line::blank(),
                Line::body("Second."),
                Line::blank(),
            ]
        );
    }

    #[test]
    fn test_layout_paginates() {
        let text = (0..10).map(|i| format!("Sentence {}", i)).collect::<Vec<_>>().join(". ");
        let pages = layout(&[record("https://example.com/", &text)], 80, 4);

        // 1 heading + 10 bodies + 10 spacers = 21 lines; spacers at a page top are dropped
        assert!(pages.len() > 1);
        assert!(pages.iter().all(|p| p.len() <= 4));
        assert!(pages.iter().all(|p| p.first().map_or(true, |l| l.kind != LineKind::Blank)));
        let bodies = pages.iter().flatten().filter(|l| l.kind == LineKind::Body).count();
        assert_eq!(bodies, 10);
    }

    #[test]
    fn test_layout_of_nothing_is_one_empty_page() {
        let pages = layout(&[], 80, 40);
        assert_eq!(pages, vec![Vec::<Line>::new()]);
    }
}
