//! Section boundary detection for sectioned statement exports
//!
//! A section boundary is any row whose joined cell text matches one of an
//! ordered list of content patterns. Each pattern is bound to a section name,
//! or to nothing, meaning the row is recognized but intentionally ignored.
//! Patterns are tried in table order and the first match wins.

use regex::Regex;

use crate::constants::sections;
use crate::Result;

/// Outcome of matching one row against the pattern table
#[derive(Debug, Clone, PartialEq)]
pub enum SectionMatch<'a> {
    /// Row starts the named section
    Boundary(&'a str),
    /// Row matched a pattern bound to no section; consume it silently
    Ignored,
}

/// Ordered (content-matcher, section-name) table used to recognize
/// section-boundary rows.
///
/// The default table recognizes both bare section-title rows (a lone
/// "Filled Orders" token) and combined title+column-header rows; real
/// exports contain both layouts. A caller-supplied table wholly replaces
/// the defaults for that run.
#[derive(Debug, Clone)]
pub struct SectionPatterns {
    entries: Vec<(Regex, Option<String>)>,
}

/// Default patterns matched against the comma-joined, cell-trimmed row text.
/// Combined title+header rows are listed before the bare-title fallbacks so
/// the more specific layout claims the match.
const DEFAULT_PATTERNS: &[(&str, Option<&str>)] = &[
    (
        r"(?i)^,+exec\s*time.*spread.*side.*qty.*pos\s*effect.*symbol.*price.*net\s*price.*price\s*improvement.*order\s*type",
        Some(sections::FILLED),
    ),
    (
        r"(?i)^notes,+time\s*canceled.*spread.*side.*qty.*pos\s*effect.*symbol.*price,+tif.*status",
        Some(sections::CANCELED),
    ),
    (
        r"(?i)^notes,+time\s*placed.*spread.*side.*qty.*pos\s*effect.*symbol.*price,+tif.*mark.*status",
        Some(sections::WORKING),
    ),
    (
        r"(?i)^covered\s*call\s*position.*new\s*exp.*call\s*by.*begin.*order\s*price.*active\s*time",
        Some(sections::ROLLING),
    ),
    (r"(?i)^\s*,?\s*filled\s*orders\s*,*\s*$", Some(sections::FILLED)),
    (
        r"(?i)^\s*,?\s*(?:canceled|cancelled)\s*orders\s*,*\s*$",
        Some(sections::CANCELED),
    ),
    (r"(?i)^\s*,?\s*working\s*orders\s*,*\s*$", Some(sections::WORKING)),
    (
        r"(?i)^\s*,?\s*rolling\s*strategies\s*,*\s*$",
        Some(sections::ROLLING),
    ),
    (
        r"(?i)^\s*,?\s*account\s*trade\s*history\s*,*\s*$",
        Some("Account Trade History"),
    ),
    (
        r"(?i)^\s*,?\s*(?:account|today's\s*trade\s*activity)",
        Some(sections::TOP),
    ),
];

impl SectionPatterns {
    /// Build the default pattern table
    pub fn default_table() -> Self {
        let entries = DEFAULT_PATTERNS
            .iter()
            .map(|&(pattern, section)| {
                let regex = Regex::new(pattern).expect("default section pattern compiles");
                (regex, section.map(|s| s.to_string()))
            })
            .collect();
        Self { entries }
    }

    /// Compile a caller-supplied table, replacing the defaults wholesale.
    /// Entries keep their supplied order; a `None` section slot means
    /// "recognized but intentionally ignored".
    pub fn from_pairs(pairs: &[(String, Option<String>)]) -> Result<Self> {
        let mut entries = Vec::with_capacity(pairs.len());
        for (pattern, section) in pairs {
            let regex = Regex::new(pattern)?;
            entries.push((regex, section.clone()));
        }
        Ok(Self { entries })
    }

    /// Match a row's joined cell text against the table.
    ///
    /// Returns `None` when no pattern matches; the current section persists
    /// from the previous boundary in that case.
    pub fn match_row(&self, joined: &str) -> Option<SectionMatch<'_>> {
        for (regex, section) in &self.entries {
            if regex.is_match(joined) {
                return Some(match section {
                    Some(name) => SectionMatch::Boundary(name),
                    None => SectionMatch::Ignored,
                });
            }
        }
        None
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SectionPatterns {
    fn default() -> Self {
        Self::default_table()
    }
}
