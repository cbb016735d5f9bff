// WHY: URL extraction rewrites the text, so ranges are derived from the rewritten output
// Two phases: plan every replacement against the original, then splice left to right

use serde::Serialize;
use tracing::{debug, warn};

use super::URL_MIN_LENGTH;
use crate::entity::{ElementResult, Entity, EntityType, TextRange};
use crate::normalization::{trim_token, trimmed_range, truncate_display};
use crate::scanner::{scan, RecognizerRule, UrlGroupLayout, UrlSyntax};

/// How URL display text is shortened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortenOptions {
    /// Longest display text in grapheme clusters; `None` keeps it whole
    pub max_display_length: Option<usize>,
    /// Marker appended to truncated text, counted inside the limit
    pub ellipsis: Option<String>,
}

impl ShortenOptions {
    pub fn with_max_length(max_display_length: usize) -> Self {
        Self {
            max_display_length: Some(max_display_length),
            ellipsis: None,
        }
    }

    fn shorten(&self, alter: &str) -> String {
        truncate_display(alter, self.max_display_length, self.ellipsis.as_deref())
    }
}

/// Result of URL extraction: elements plus the text their ranges index into
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlRewrite {
    pub elements: Vec<ElementResult>,
    pub text: String,
}

/// One planned substitution, addressed in the original text
#[derive(Debug, Clone, PartialEq, Eq)]
struct Replacement {
    span: TextRange,
    original: String,
    alter: String,
    link: String,
}

/// Extract URLs, replace each with its display text and report ranges in the new text
pub fn extract_and_shorten(
    text: &str,
    rule: &RecognizerRule,
    layout: &UrlGroupLayout,
    range: TextRange,
    options: &ShortenOptions,
) -> UrlRewrite {
    let replacements = plan_replacements(text, rule, layout, range, options);
    apply_replacements(text, replacements)
}

fn plan_replacements(
    text: &str,
    rule: &RecognizerRule,
    layout: &UrlGroupLayout,
    range: TextRange,
    options: &ShortenOptions,
) -> Vec<Replacement> {
    let mut replacements = Vec::new();

    for raw in scan(text, rule, range) {
        if raw.range().char_len(text) <= URL_MIN_LENGTH {
            continue;
        }
        let Some(syntax) = UrlSyntax::from_match(&raw, layout) else {
            debug!("URL match at {} fits no known syntax", raw.range());
            continue;
        };

        let trimmed = |range: TextRange| range.slice(text).map(trim_token).unwrap_or_default();
        let (span, alter, link) = match syntax {
            UrlSyntax::Labeled { label, link } => (
                trimmed_range(text, raw.range()),
                trimmed(label),
                trimmed(link),
            ),
            UrlSyntax::Explicit { link, alias } => {
                let link = trimmed(link);
                let alter = alias.map(trimmed).filter(|a| !a.is_empty()).unwrap_or(link);
                (trimmed_range(text, raw.range()), alter, link)
            }
            UrlSyntax::Plain { url } => {
                let span = trimmed_range(text, url);
                let word = trimmed(url);
                (span, word, word)
            }
        };

        let Some(original) = span.slice(text) else {
            continue;
        };
        replacements.push(Replacement {
            span,
            original: original.to_string(),
            alter: options.shorten(alter),
            link: link.to_string(),
        });
    }

    replacements
}

fn apply_replacements(text: &str, replacements: Vec<Replacement>) -> UrlRewrite {
    let mut rewritten = String::with_capacity(text.len());
    let mut elements = Vec::with_capacity(replacements.len());
    let mut cursor = 0;

    for replacement in replacements {
        if replacement.span.location < cursor {
            warn!(
                "Skipping URL replacement at {} overlapping an earlier one",
                replacement.span
            );
            continue;
        }

        rewritten.push_str(&text[cursor..replacement.span.location]);
        let range = TextRange::new(rewritten.len(), replacement.alter.len());
        rewritten.push_str(&replacement.alter);
        cursor = replacement.span.end();

        debug!(
            "Rewrote URL {:?} as {:?} at {}",
            replacement.original, replacement.alter, range
        );
        elements.push(ElementResult::new(
            range,
            Entity::Url {
                original: replacement.original,
                alter: replacement.alter,
                link: replacement.link,
            },
            EntityType::Url,
        ));
    }
    rewritten.push_str(&text[cursor..]);

    UrlRewrite {
        elements,
        text: rewritten,
    }
}
