// WHY: File-based configuration compiled into an Extractor at startup
// All validation happens in build(); extraction itself never fails

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::builder::{Blocklist, ShortenOptions};
use crate::entity::EntityType;
use crate::extractor::Extractor;
use crate::rules::RuleSet;
use crate::scanner::{RecognizerRule, UrlGroupLayout};

/// Replacement patterns for the built-in types
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternOverrides {
    pub mention: Option<String>,
    pub hashtag: Option<String>,
    pub url: Option<String>,
}

/// A custom recognizer rule
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomRuleConfig {
    pub id: String,
    pub pattern: String,
}

/// Tokens rejected per type
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub mention_blocklist: Vec<String>,
    pub hashtag_blocklist: Vec<String>,
    /// Applied to every custom type
    pub custom_blocklist: Vec<String>,
}

/// Extractor configuration as read from TOML
///
/// ```toml
/// enabled = ["mention", "url", "custom:ticket"]
/// url_max_length = 24
/// url_ellipsis = "…"
///
/// [[custom]]
/// id = "ticket"
/// pattern = '\sT-\d+'
///
/// [filters]
/// mention_blocklist = ["admin"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Types to extract; defaults to mention, hashtag, url and every custom rule
    pub enabled: Option<Vec<EntityType>>,
    pub url_max_length: Option<usize>,
    pub url_ellipsis: Option<String>,
    pub patterns: PatternOverrides,
    pub url_groups: Option<UrlGroupLayout>,
    pub custom: Vec<CustomRuleConfig>,
    pub filters: FilterConfig,
}

impl ExtractorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("failed to parse extractor config")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
    }

    pub async fn load_async<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
    }

    /// Compile rules and assemble the extractor
    pub fn build(&self) -> Result<Extractor> {
        let rules = self.build_rules()?;

        let enabled = match &self.enabled {
            Some(types) => types.clone(),
            None => {
                let mut types = EntityType::defaults();
                types.extend(rules.custom_ids().into_iter().map(EntityType::custom));
                types
            }
        };
        for entity_type in &enabled {
            if let EntityType::Custom(id) = entity_type {
                if !self.custom.iter().any(|rule| &rule.id == id) {
                    bail!("custom type `{id}` is enabled but no [[custom]] rule defines it");
                }
            }
        }

        if self.url_max_length == Some(0) {
            bail!("url_max_length must be at least 1");
        }
        let shorten = ShortenOptions {
            max_display_length: self.url_max_length,
            ellipsis: self.url_ellipsis.clone(),
        };

        info!(
            "Building extractor for {} types ({} custom rules)",
            enabled.len(),
            self.custom.len()
        );
        let mut extractor = Extractor::new(rules)
            .with_enabled_types(enabled.clone())
            .with_shorten_options(shorten);

        let mentions = Blocklist::new(self.filters.mention_blocklist.iter().cloned());
        if !mentions.is_empty() {
            info!("Blocking {} mention tokens", mentions.len());
            extractor = extractor.with_filter(EntityType::Mention, mentions);
        }
        let hashtags = Blocklist::new(self.filters.hashtag_blocklist.iter().cloned());
        if !hashtags.is_empty() {
            info!("Blocking {} hashtag tokens", hashtags.len());
            extractor = extractor.with_filter(EntityType::Hashtag, hashtags);
        }
        let custom = Blocklist::new(self.filters.custom_blocklist.iter().cloned());
        if !custom.is_empty() {
            info!("Blocking {} tokens for every custom type", custom.len());
            for entity_type in enabled.iter().filter(|t| matches!(t, EntityType::Custom(_))) {
                extractor = extractor.with_filter(entity_type.clone(), custom.clone());
            }
        }

        Ok(extractor)
    }

    fn build_rules(&self) -> Result<RuleSet> {
        let mut rules = RuleSet::with_default_rules()?;

        if let Some(pattern) = &self.patterns.mention {
            rules = rules.with_mention_rule(
                RecognizerRule::new(pattern).context("mention pattern override")?,
            );
        }
        if let Some(pattern) = &self.patterns.hashtag {
            rules = rules.with_hashtag_rule(
                RecognizerRule::new(pattern).context("hashtag pattern override")?,
            );
        }
        if self.patterns.url.is_some() || self.url_groups.is_some() {
            let pattern = self
                .patterns
                .url
                .as_deref()
                .unwrap_or(crate::rules::URL_PATTERN);
            let rule = RecognizerRule::new(pattern).context("url pattern override")?;
            rules = rules.with_url_rule(rule, self.url_groups.unwrap_or_default())?;
        }

        for custom in &self.custom {
            rules.register_custom(custom.id.as_str(), &custom.pattern)?;
        }

        Ok(rules)
    }
}
