// WHY: Mentions and hashtags drop their sigil from the payload but not from the range
// Highlighting must still cover the `@` / `#` the reader sees

use tracing::debug;

use super::filter::{accepts, FilterPredicate};
use super::SIGIL_MIN_LENGTH;
use crate::entity::{ElementResult, Entity, EntityType, TextRange};
use crate::normalization::{drop_first_char, strip_sigil, trim_token};
use crate::scanner::{scan, RecognizerRule};

/// Emit sigil-prefixed tokens with the sigil removed from the payload
///
/// The first character of every match is dropped. Rules that consume a
/// leading separator leave the sigil in place after that, so one more `@` or
/// `#` is stripped when present.
pub fn extract_elements_ignoring_first_char(
    text: &str,
    rule: &RecognizerRule,
    entity_type: &EntityType,
    range: TextRange,
    predicate: Option<&dyn FilterPredicate>,
) -> Vec<ElementResult> {
    let mut elements = Vec::new();

    for raw in scan(text, rule, range) {
        let matched = raw.range();
        let Some(slice) = matched.slice(text) else {
            continue;
        };
        if slice.chars().count() <= SIGIL_MIN_LENGTH {
            continue;
        }

        let word = trim_token(strip_sigil(drop_first_char(slice)));
        if !accepts(predicate, word) {
            debug!("Predicate rejected {} {:?}", entity_type, word);
            continue;
        }

        elements.push(ElementResult::new(
            matched,
            Entity::create(entity_type, word),
            entity_type.clone(),
        ));
    }

    elements
}
