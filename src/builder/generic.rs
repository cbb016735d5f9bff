// WHY: Generic extraction for URLs outside the shortening path and for custom rules
// Reported ranges are the untouched match ranges; payloads are trimmed

use tracing::debug;

use super::filter::{accepts, FilterPredicate};
use crate::entity::{ElementResult, Entity, EntityType, TextRange};
use crate::normalization::trim_token;
use crate::scanner::{scan, RecognizerRule};

/// Emit one element per match longer than `min_length` characters
pub fn extract_elements(
    text: &str,
    rule: &RecognizerRule,
    entity_type: &EntityType,
    range: TextRange,
    min_length: usize,
    predicate: Option<&dyn FilterPredicate>,
) -> Vec<ElementResult> {
    let mut elements = Vec::new();

    for raw in scan(text, rule, range) {
        let matched = raw.range();
        let Some(slice) = matched.slice(text) else {
            continue;
        };
        if slice.chars().count() <= min_length {
            debug!("Skipping {} match {:?}: not longer than {}", entity_type, slice, min_length);
            continue;
        }

        let word = trim_token(slice);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_trims_payload_but_keeps_match_range() {
        let text = "fix T-12 and T-345\n";
        let rule = RecognizerRule::new(r"\sT-\d+\s").unwrap();
        let ty = EntityType::custom("ticket");
        let elements = extract_elements(text, &rule, &ty, TextRange::full(text), 1, None);

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].entity, Entity::Custom("T-12".to_string()));
        assert_eq!(elements[0].range.slice(text), Some(" T-12 "));
        assert_eq!(elements[1].entity, Entity::Custom("T-345".to_string()));
        assert_eq!(elements[1].range.slice(text), Some(" T-345\n"));
    }

    #[test]
    fn test_generic_min_length_is_strict() {
        let text = "a bc def";
        let rule = RecognizerRule::new(r"[a-z]+").unwrap();
        let ty = EntityType::custom("word");

        let words = |min_length| -> Vec<String> {
            extract_elements(text, &rule, &ty, TextRange::full(text), min_length, None)
                .into_iter()
                .map(|e| e.entity.text().to_string())
                .collect()
        };
        assert_eq!(words(0), vec!["a", "bc", "def"]);
        assert_eq!(words(1), vec!["bc", "def"]);
        assert_eq!(words(2), vec!["def"]);
    }

    #[test]
    fn test_generic_url_payload_repeats_word() {
        let text = "go to https://a.io now";
        let rule = RecognizerRule::new(r"https?://\S+").unwrap();
        let elements =
            extract_elements(text, &rule, &EntityType::Url, TextRange::full(text), 2, None);
        assert_eq!(
            elements[0].entity,
            Entity::Url {
                original: "https://a.io".to_string(),
                alter: "https://a.io".to_string(),
                link: "https://a.io".to_string(),
            }
        );
    }

    #[test]
    fn test_generic_predicate_skips_but_continues() {
        let text = "x1 x2 x3";
        let rule = RecognizerRule::new(r"x\d").unwrap();
        let ty = EntityType::custom("x");
        let not_two = |token: &str| token != "x2";
        let elements =
            extract_elements(text, &rule, &ty, TextRange::full(text), 1, Some(&not_two));
        let found: Vec<_> = elements.iter().map(|e| e.entity.text()).collect();
        assert_eq!(found, vec!["x1", "x3"]);
    }
}
