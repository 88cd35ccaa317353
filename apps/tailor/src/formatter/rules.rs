//! Line classification rules for the formatter.
//!
//! Rules are evaluated in table order and the first match wins. Lines that
//! match no rule are plain paragraphs.

use tracing::trace;

use super::BlockKind;

/// Bullet marker emitted by the tailoring service.
pub const BULLET_MARKER: &str = "•";

/// Inline emphasis delimiter (markdown-style bold).
pub const EMPHASIS_MARKER: &str = "**";

/// A header must be strictly longer than this many UTF-16 code units.
const HEADER_MAX_EXCLUDED_LEN: usize = 3;

/// A single classification rule: a predicate over a trimmed, non-empty line.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub kind: BlockKind,
    pub matches: fn(&str) -> bool,
}

/// Priority-ordered rule table.
///
/// ORDER MATTERS: the header rule carries its own bullet exclusion, so an
/// all-caps bullet falls through to the bullet rule. A line containing `**`
/// is a job title even when it also starts with the bullet marker.
pub const RULES: &[Rule] = &[
    Rule {
        name: "section_header",
        kind: BlockKind::SectionHeader,
        matches: is_section_header,
    },
    Rule {
        name: "job_title",
        kind: BlockKind::JobTitleLine,
        matches: has_emphasis_marker,
    },
    Rule {
        name: "bullet",
        kind: BlockKind::BulletLine,
        matches: is_bullet,
    },
];

/// Returns the kind of the first rule matching `line`, or `PlainLine`.
pub fn classify(line: &str) -> BlockKind {
    match RULES.iter().find(|rule| (rule.matches)(line)) {
        Some(rule) => {
            trace!("{line:?} matched rule {}", rule.name);
            rule.kind
        }
        None => BlockKind::PlainLine,
    }
}

/// Upper-casing leaves the line unchanged, it is longer than three UTF-16
/// code units, and it is not a bullet.
///
/// Case comparison uses Rust's full Unicode `to_uppercase`, so caseless
/// scripts and punctuation-only lines count as "upper case". Length is
/// measured the way browsers measure string length, so an astral character
/// such as an emoji counts twice.
pub fn is_section_header(line: &str) -> bool {
    line.encode_utf16().count() > HEADER_MAX_EXCLUDED_LEN
        && !line.starts_with(BULLET_MARKER)
        && line.to_uppercase() == line
}

pub fn has_emphasis_marker(line: &str) -> bool {
    line.contains(EMPHASIS_MARKER)
}

pub fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLET_MARKER)
}
