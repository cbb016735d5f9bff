// WHY: Multi-type entry point; URL rewriting runs first so every other type scans the final text

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::builder::{ElementBuilder, FilterPredicate, ShortenOptions};
use crate::entity::{ElementResult, EntityType, TextRange};
use crate::rules::RuleSet;

/// Predicate shareable across threads together with the extractor
pub type SharedPredicate = Box<dyn FilterPredicate + Send + Sync>;

/// Text after URL rewriting and every element found in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub text: String,
    pub elements: Vec<ElementResult>,
}

impl Extraction {
    /// Elements of one type, in scan order
    pub fn of_type<'a>(
        &'a self,
        entity_type: &'a EntityType,
    ) -> impl Iterator<Item = &'a ElementResult> + 'a {
        self.elements
            .iter()
            .filter(move |element| &element.entity_type == entity_type)
    }
}

/// Runs every enabled entity type over a text
pub struct Extractor {
    rules: RuleSet,
    enabled: Vec<EntityType>,
    shorten: ShortenOptions,
    filters: HashMap<EntityType, SharedPredicate>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("enabled", &self.enabled)
            .field("shorten", &self.shorten)
            .field("filtered_types", &self.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Extractor {
    /// Extractor for the default types with no shortening and no filters
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            enabled: EntityType::defaults(),
            shorten: ShortenOptions::default(),
            filters: HashMap::new(),
        }
    }

    /// Types to extract; duplicates are dropped, first occurrence wins
    pub fn with_enabled_types(mut self, types: Vec<EntityType>) -> Self {
        let mut enabled: Vec<EntityType> = Vec::with_capacity(types.len());
        for entity_type in types {
            if !enabled.contains(&entity_type) {
                enabled.push(entity_type);
            }
        }
        self.enabled = enabled;
        self
    }

    pub fn with_shorten_options(mut self, shorten: ShortenOptions) -> Self {
        self.shorten = shorten;
        self
    }

    /// Predicate for one type; URLs on the shortening path are never filtered
    pub fn with_filter<P>(mut self, entity_type: EntityType, predicate: P) -> Self
    where
        P: FilterPredicate + Send + Sync + 'static,
    {
        self.filters.insert(entity_type, Box::new(predicate));
        self
    }

    pub fn enabled_types(&self) -> &[EntityType] {
        &self.enabled
    }

    pub fn shorten_options(&self) -> &ShortenOptions {
        &self.shorten
    }

    /// Extract over the whole text
    pub fn extract(&self, text: &str) -> Extraction {
        self.extract_range(text, TextRange::full(text))
    }

    /// Extract within `range`
    ///
    /// URL elements come first when enabled, followed by each other enabled
    /// type in order. All ranges index into [`Extraction::text`].
    ///
    /// Rules still see the text before `range`, so a leading boundary such as
    /// `(?:^|\s)` in the default mention, hashtag and URL rules must itself lie
    /// inside the range. A token starting exactly at `range.location > 0` is not
    /// matched unless the range also covers the character before it.
    pub fn extract_range(&self, text: &str, range: TextRange) -> Extraction {
        let builder = ElementBuilder::new(&self.rules);
        let mut range = range.clamp_to(text);
        let mut current = text.to_string();
        let mut elements = Vec::new();

        if self.enabled.contains(&EntityType::Url) {
            let rewrite = builder.create_url_elements(&current, range, &self.shorten);
            // edits stay inside the range, so the tail after it keeps its length
            let tail = current.len() - range.end();
            range = TextRange::from_bounds(range.location, rewrite.text.len() - tail);
            current = rewrite.text;
            elements.extend(rewrite.elements);
        }

        for entity_type in self.enabled.iter().filter(|t| **t != EntityType::Url) {
            let predicate = self
                .filters
                .get(entity_type)
                .map(|p| &**p as &dyn FilterPredicate);
            let found = builder.create_elements(entity_type, &current, range, predicate);
            debug!("Found {} {} elements", found.len(), entity_type);
            elements.extend(found);
        }

        debug!(
            "Extracted {} elements, text length {} -> {}",
            elements.len(),
            text.len(),
            current.len()
        );
        Extraction {
            text: current,
            elements,
        }
    }
}
