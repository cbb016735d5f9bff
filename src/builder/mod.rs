// WHY: Element builder interface; picks the extraction strategy for each entity type
// Strategies live in submodules and share the scanner and normalization helpers

use tracing::warn;

pub mod filter;
pub mod generic;
pub mod sigil;
pub mod url;

pub use filter::{Blocklist, FilterPredicate};
pub use url::{ShortenOptions, UrlRewrite};

use crate::entity::{ElementResult, EntityType, TextRange};
use crate::rules::RuleProvider;

/// Matches must be longer than this many characters for generic extraction
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Custom rules keep one-character tokens
pub const CUSTOM_MIN_LENGTH: usize = 1;

/// Mentions and hashtags must be longer than sigil plus one character
pub const SIGIL_MIN_LENGTH: usize = 2;

/// URL matches must be longer than this many characters
pub const URL_MIN_LENGTH: usize = 2;

/// Builds elements from the rules of a [`RuleProvider`]
pub struct ElementBuilder<'r> {
    rules: &'r dyn RuleProvider,
}

impl<'r> ElementBuilder<'r> {
    pub fn new(rules: &'r dyn RuleProvider) -> Self {
        Self { rules }
    }

    /// Extract elements of one type without rewriting the text
    ///
    /// Mentions and hashtags use sigil stripping, URLs the generic path with the
    /// default minimum length, custom types the generic path with
    /// [`CUSTOM_MIN_LENGTH`].
    pub fn create_elements(
        &self,
        entity_type: &EntityType,
        text: &str,
        range: TextRange,
        predicate: Option<&dyn FilterPredicate>,
    ) -> Vec<ElementResult> {
        let Some(rule) = self.rules.rule(entity_type) else {
            warn!("No recognizer rule registered for {}", entity_type);
            return Vec::new();
        };

        match entity_type {
            EntityType::Mention | EntityType::Hashtag => {
                sigil::extract_elements_ignoring_first_char(text, rule, entity_type, range, predicate)
            }
            EntityType::Url => generic::extract_elements(
                text,
                rule,
                entity_type,
                range,
                DEFAULT_MIN_LENGTH,
                predicate,
            ),
            EntityType::Custom(_) => generic::extract_elements(
                text,
                rule,
                entity_type,
                range,
                CUSTOM_MIN_LENGTH,
                predicate,
            ),
        }
    }

    /// Extract URLs and rewrite each to its (possibly shortened) display text
    ///
    /// Returned ranges index into [`UrlRewrite::text`], which must replace the
    /// caller's copy before highlighting.
    pub fn create_url_elements(
        &self,
        text: &str,
        range: TextRange,
        options: &ShortenOptions,
    ) -> UrlRewrite {
        let Some(rule) = self.rules.rule(&EntityType::Url) else {
            warn!("No recognizer rule registered for {}", EntityType::Url);
            return UrlRewrite {
                elements: Vec::new(),
                text: text.to_string(),
            };
        };
        url::extract_and_shorten(text, rule, self.rules.url_layout(), range, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::rules::RuleSet;
    use crate::scanner::{RecognizerRule, UrlGroupLayout};

    #[test]
    fn test_dispatch_by_type() {
        let mut rules = RuleSet::with_default_rules().unwrap();
        rules.register_custom("digit", r"\s\d").unwrap();
        let builder = ElementBuilder::new(&rules);
        let text = "@bob #rust http://a.io 7";
        let range = TextRange::full(text);

        let mentions = builder.create_elements(&EntityType::Mention, text, range, None);
        assert_eq!(mentions[0].entity, Entity::Mention("bob".to_string()));

        let hashtags = builder.create_elements(&EntityType::Hashtag, text, range, None);
        assert_eq!(hashtags[0].entity, Entity::Hashtag("rust".to_string()));

        let urls = builder.create_elements(&EntityType::Url, text, range, None);
        assert_eq!(urls[0].entity.link(), Some("http://a.io"));
        assert_eq!(urls[0].range.slice(text), Some(" http://a.io"));

        let digits = builder.create_elements(&EntityType::custom("digit"), text, range, None);
        assert_eq!(digits.len(), 1);
        assert_eq!(digits[0].entity, Entity::Custom("7".to_string()));
    }

    #[test]
    fn test_unknown_custom_type_yields_nothing() {
        let rules = RuleSet::with_default_rules().unwrap();
        let builder = ElementBuilder::new(&rules);
        let elements =
            builder.create_elements(&EntityType::custom("nope"), "text", TextRange::new(0, 4), None);
        assert!(elements.is_empty());
    }

    struct UrlOnly {
        url: RecognizerRule,
        layout: UrlGroupLayout,
    }

    impl RuleProvider for UrlOnly {
        fn rule(&self, entity_type: &EntityType) -> Option<&RecognizerRule> {
            (*entity_type == EntityType::Url).then_some(&self.url)
        }

        fn url_layout(&self) -> &UrlGroupLayout {
            &self.layout
        }
    }

    #[test]
    fn test_custom_provider_and_layout() {
        // groups 1 and 4 never capture text, so only the explicit branch can fire
        let provider = UrlOnly {
            url: RecognizerRule::new(r"()(go:(\w+))()").unwrap(),
            layout: UrlGroupLayout {
                plain: 2,
                label: 1,
                labeled_link: 4,
                explicit_link: 3,
                alias: 1,
            },
        };
        let builder = ElementBuilder::new(&provider);
        let text = "open go:home now";
        let rewrite =
            builder.create_url_elements(text, TextRange::full(text), &ShortenOptions::default());
        assert_eq!(rewrite.text, "open home now");
        assert_eq!(rewrite.elements.len(), 1);
        assert_eq!(rewrite.elements[0].range, TextRange::new(5, 4));
        assert_eq!(
            rewrite.elements[0].entity,
            Entity::Url {
                original: "go:home".to_string(),
                alter: "home".to_string(),
                link: "home".to_string(),
            }
        );
        assert!(builder
            .create_elements(&EntityType::Mention, text, TextRange::full(text), None)
            .is_empty());
    }
}
