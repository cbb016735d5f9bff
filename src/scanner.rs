// WHY: Thin adapter over regex-automata so extraction strategies only see ranges
// URL capture groups are resolved here into named variants

use anyhow::{Context, Result};
use regex_automata::{meta::Regex, util::captures::Captures, Input, PatternID};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::TextRange;

/// Compiled recognizer rule for one entity type
#[derive(Debug, Clone)]
pub struct RecognizerRule {
    pattern: String,
    regex: Regex,
}

impl RecognizerRule {
    /// Compile a pattern; a malformed pattern is a setup error
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("failed to compile recognizer pattern `{pattern}`"))?;
        debug!("Compiled recognizer pattern: {}", pattern);
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of capture groups, counting the implicit whole-match group 0
    pub fn group_count(&self) -> usize {
        self.regex.group_info().group_len(PatternID::ZERO)
    }
}

/// One recognizer hit: the whole match plus its numbered capture groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    range: TextRange,
    groups: Vec<Option<TextRange>>,
}

impl RawMatch {
    pub fn new(range: TextRange, groups: Vec<Option<TextRange>>) -> Self {
        Self { range, groups }
    }

    fn from_captures(caps: &Captures) -> Option<Self> {
        let whole = caps.get_match()?;
        let groups = (0..caps.group_len())
            .map(|index| {
                caps.get_group(index)
                    .map(|span| TextRange::from_bounds(span.start, span.end))
            })
            .collect();
        Some(Self::new(
            TextRange::from_bounds(whole.start(), whole.end()),
            groups,
        ))
    }

    /// Range of the whole match
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Range of capture group `index` when it matched non-empty text
    ///
    /// Groups that did not participate and groups that matched nothing both
    /// mean the rule branch was not taken.
    pub fn group(&self, index: usize) -> Option<TextRange> {
        self.groups
            .get(index)
            .copied()
            .flatten()
            .filter(|range| !range.is_empty())
    }

    pub fn group_len(&self) -> usize {
        self.groups.len()
    }
}

/// Run `rule` over `range` of `text`, yielding matches left to right
///
/// The range is clamped to the text and to char boundaries first. Anchors such
/// as `^` still see the text outside the range, so `^` never matches at a range
/// start greater than zero.
pub fn scan<'a>(
    text: &'a str,
    rule: &'a RecognizerRule,
    range: TextRange,
) -> impl Iterator<Item = RawMatch> + 'a {
    let bounded = range.clamp_to(text);
    let input = Input::new(text).range(bounded.as_range());
    rule.regex
        .captures_iter(input)
        .filter_map(|caps| RawMatch::from_captures(&caps))
}

/// Capture-group positions the URL rule uses for each syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlGroupLayout {
    /// Bare URL
    pub plain: usize,
    /// Label of a `[label](link)` link
    pub label: usize,
    /// Destination of a `[label](link)` link
    pub labeled_link: usize,
    /// Destination of a `<link|alias>` link
    pub explicit_link: usize,
    /// Optional alias of a `<link|alias>` link
    pub alias: usize,
}

impl Default for UrlGroupLayout {
    fn default() -> Self {
        Self {
            plain: 3,
            label: 6,
            labeled_link: 7,
            explicit_link: 8,
            alias: 9,
        }
    }
}

impl UrlGroupLayout {
    /// Highest group index the layout refers to
    pub fn max_index(&self) -> usize {
        [
            self.plain,
            self.label,
            self.labeled_link,
            self.explicit_link,
            self.alias,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Which URL syntax produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSyntax {
    /// `[label](link)`
    Labeled { label: TextRange, link: TextRange },
    /// `<link>` or `<link|alias>`
    Explicit {
        link: TextRange,
        alias: Option<TextRange>,
    },
    /// A bare URL
    Plain { url: TextRange },
}

impl UrlSyntax {
    /// Resolve the syntax of a URL match, labeled links first, then explicit, then plain
    pub fn from_match(raw: &RawMatch, layout: &UrlGroupLayout) -> Option<Self> {
        if let (Some(label), Some(link)) = (raw.group(layout.label), raw.group(layout.labeled_link))
        {
            return Some(UrlSyntax::Labeled { label, link });
        }
        if let Some(link) = raw.group(layout.explicit_link) {
            return Some(UrlSyntax::Explicit {
                link,
                alias: raw.group(layout.alias),
            });
        }
        raw.group(layout.plain).map(|url| UrlSyntax::Plain { url })
    }
}
