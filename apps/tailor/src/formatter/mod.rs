//! Formatter — turns raw tailored-resume text into display blocks and HTML.
//!
//! Pure and infallible: any input string (including the empty string) yields
//! a block sequence, one block per non-blank line, in input order.
//!
//! NOTE: block text is interpolated into the markup as-is. Nothing is
//! escaped, so untrusted HTML in the input passes straight through.

pub mod rules;

use std::sync::LazyLock;

use regex::Regex;

pub use rules::classify;

/// Non-greedy `**...**` pairs. An unmatched trailing `**` stays literal.
/// A pair never spans a line terminator (CR, LF, U+2028, U+2029).
static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^\r\n\x{2028}\x{2029}]*?)\*\*").unwrap()
});

/// Trimmed alongside Unicode whitespace, as browsers do.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Classification result for a single line, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    SectionHeader,
    JobTitleLine,
    BulletLine,
    PlainLine,
}

/// A run of text inside a job-title line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis(String),
}

/// One renderable unit derived from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    SectionHeader(String),
    JobTitleLine(Vec<Inline>),
    BulletLine(String),
    PlainLine(String),
}

impl DisplayBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            DisplayBlock::SectionHeader(_) => BlockKind::SectionHeader,
            DisplayBlock::JobTitleLine(_) => BlockKind::JobTitleLine,
            DisplayBlock::BulletLine(_) => BlockKind::BulletLine,
            DisplayBlock::PlainLine(_) => BlockKind::PlainLine,
        }
    }

    /// Renders this block as an HTML fragment.
    pub fn to_html(&self) -> String {
        match self {
            DisplayBlock::SectionHeader(text) => {
                format!("<h3 class=\"section-header\">{text}</h3>")
            }
            DisplayBlock::JobTitleLine(inlines) => {
                let body: String = inlines
                    .iter()
                    .map(|inline| match inline {
                        Inline::Text(t) => t.clone(),
                        Inline::Emphasis(t) => format!("<strong>{t}</strong>"),
                    })
                    .collect();
                format!("<p class=\"job-title\">{body}</p>")
            }
            DisplayBlock::BulletLine(text) => format!("<p class=\"bullet-point\">{text}</p>"),
            DisplayBlock::PlainLine(text) => format!("<p>{text}</p>"),
        }
    }
}

/// Splits a job-title line into literal and emphasized runs.
pub fn parse_emphasis(line: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut cursor = 0;

    for caps in EMPHASIS_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            inlines.push(Inline::Text(line[cursor..whole.start()].to_string()));
        }
        inlines.push(Inline::Emphasis(inner.as_str().to_string()));
        cursor = whole.end();
    }

    if cursor < line.len() {
        inlines.push(Inline::Text(line[cursor..].to_string()));
    }

    inlines
}

/// Builds the block for a single trimmed, non-empty line.
pub fn format_line(line: &str) -> DisplayBlock {
    match classify(line) {
        BlockKind::SectionHeader => DisplayBlock::SectionHeader(line.to_string()),
        BlockKind::JobTitleLine => DisplayBlock::JobTitleLine(parse_emphasis(line)),
        BlockKind::BulletLine => DisplayBlock::BulletLine(line.to_string()),
        BlockKind::PlainLine => DisplayBlock::PlainLine(line.to_string()),
    }
}

/// Classifies every non-blank line of `text`, preserving order.
pub fn format_resume(text: &str) -> Vec<DisplayBlock> {
    text.split('\n')
        .map(trim_line)
        .filter(|line| !line.is_empty())
        .map(format_line)
        .collect()
}

fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Concatenates the markup of every block with no separator.
pub fn render_html(blocks: &[DisplayBlock]) -> String {
    blocks.iter().map(DisplayBlock::to_html).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_resume_html(text: &str) -> String {
        render_html(&format_resume(text))
    }

    const SAMPLE: &str = "SUMMARY\n**Engineer** at Acme\n• Did X\nPlain text";

    #[test]
    fn test_sample_blocks_in_order() {
        let blocks = format_resume(SAMPLE);
        assert_eq!(
            blocks,
            vec![
                DisplayBlock::SectionHeader("SUMMARY".to_string()),
                DisplayBlock::JobTitleLine(vec![
                    Inline::Emphasis("Engineer".to_string()),
                    Inline::Text(" at Acme".to_string()),
                ]),
                DisplayBlock::BulletLine("• Did X".to_string()),
                DisplayBlock::PlainLine("Plain text".to_string()),
            ]
        );
    }

    #[test]
    fn test_sample_html() {
        assert_eq!(
            format_resume_html(SAMPLE),
            "<h3 class=\"section-header\">SUMMARY</h3>\
             <p class=\"job-title\"><strong>Engineer</strong> at Acme</p>\
             <p class=\"bullet-point\">• Did X</p>\
             <p>Plain text</p>"
        );
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(format_resume("").is_empty());
        assert_eq!(format_resume_html(""), "");
    }

    #[test]
    fn test_blank_and_whitespace_lines_dropped() {
        let blocks = format_resume("\n   \nExperience here\n\t\n\r\n");
        assert_eq!(
            blocks,
            vec![DisplayBlock::PlainLine("Experience here".to_string())]
        );
    }

    #[test]
    fn test_crlf_line_endings_trimmed() {
        let blocks = format_resume("SKILLS\r\n• Rust\r\n");
        assert_eq!(blocks[0], DisplayBlock::SectionHeader("SKILLS".to_string()));
        assert_eq!(blocks[1], DisplayBlock::BulletLine("• Rust".to_string()));
    }

    #[test]
    fn test_block_count_never_exceeds_line_count() {
        let inputs = [
            SAMPLE,
            "a\n\nb\n\n\nc",
            "\n\n\n",
            "ONE LINE",
            "• x\n**y**\nZZZZ\n  \n",
        ];
        for input in inputs {
            let lines = input.split('\n').count();
            assert!(format_resume(input).len() <= lines, "input: {input:?}");
        }
    }

    #[test]
    fn test_formatting_is_idempotent() {
        assert_eq!(format_resume(SAMPLE), format_resume(SAMPLE));
        assert_eq!(format_resume_html(SAMPLE), format_resume_html(SAMPLE));
    }

    #[test]
    fn test_all_caps_bullet_is_bullet() {
        assert_eq!(
            format_resume("• ALL CAPS BULLET"),
            vec![DisplayBlock::BulletLine("• ALL CAPS BULLET".to_string())]
        );
    }

    #[test]
    fn test_short_caps_is_plain() {
        assert_eq!(
            format_resume("AI"),
            vec![DisplayBlock::PlainLine("AI".to_string())]
        );
    }

    #[test]
    fn test_unterminated_marker_kept_literal() {
        let blocks = format_resume("**bold text");
        assert_eq!(
            blocks,
            vec![DisplayBlock::JobTitleLine(vec![Inline::Text(
                "**bold text".to_string()
            )])]
        );
        assert_eq!(
            render_html(&blocks),
            "<p class=\"job-title\">**bold text</p>"
        );
    }

    #[test]
    fn test_multiple_pairs_non_greedy() {
        assert_eq!(
            format_resume_html("**Senior Engineer** | **Acme Corp** | 2020"),
            "<p class=\"job-title\"><strong>Senior Engineer</strong> | \
             <strong>Acme Corp</strong> | 2020</p>"
        );
    }

    #[test]
    fn test_pair_then_unterminated_marker() {
        assert_eq!(
            parse_emphasis("**Lead** at **Acme"),
            vec![
                Inline::Emphasis("Lead".to_string()),
                Inline::Text(" at **Acme".to_string()),
            ]
        );
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        assert_eq!(
            format_resume("SUMMARY\n\u{feff}\n\u{feff}Plain text"),
            vec![
                DisplayBlock::SectionHeader("SUMMARY".to_string()),
                DisplayBlock::PlainLine("Plain text".to_string()),
            ]
        );
    }

    #[test]
    fn test_emphasis_does_not_span_carriage_return() {
        assert_eq!(
            parse_emphasis("Lead **a\rb** x"),
            vec![Inline::Text("Lead **a\rb** x".to_string())]
        );
        assert_eq!(
            parse_emphasis("**a\u{2028}b** **c**"),
            vec![
                Inline::Text("**a\u{2028}b** ".to_string()),
                Inline::Emphasis("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_emphasis_pair() {
        assert_eq!(
            format_resume_html("**** x"),
            "<p class=\"job-title\"><strong></strong> x</p>"
        );
    }

    #[test]
    fn test_markup_is_not_escaped() {
        assert_eq!(
            format_resume_html("R&D <b>lab</b>"),
            "<p>R&D <b>lab</b></p>"
        );
    }

    #[test]
    fn test_kind_matches_variant() {
        for block in format_resume(SAMPLE) {
            assert_eq!(block.kind(), classify(&plain(&block)));
        }
    }

    fn plain(block: &DisplayBlock) -> String {
        match block {
            DisplayBlock::SectionHeader(t)
            | DisplayBlock::BulletLine(t)
            | DisplayBlock::PlainLine(t) => t.clone(),
            DisplayBlock::JobTitleLine(inlines) => inlines
                .iter()
                .map(|i| match i {
                    Inline::Text(t) => t.clone(),
                    Inline::Emphasis(t) => format!("**{t}**"),
                })
                .collect(),
        }
    }
}
