// WHY: Recognizer rules indexed by entity type
// Defaults cover mentions, hashtags and three URL syntaxes; callers may swap any of them

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use tracing::info;

use crate::entity::EntityType;
use crate::scanner::{RecognizerRule, UrlGroupLayout};

/// `@name` preceded by start of text, whitespace or a period
pub const MENTION_PATTERN: &str = r"(?:^|[\s.])@[\p{L}0-9_]*";

/// `#tag` preceded by start of text or whitespace
pub const HASHTAG_PATTERN: &str = r"(?:^|\s)#[\p{L}0-9_]*";

/// Bare URLs (group 3), `[label](link)` (groups 6, 7) and `<link|alias>` (groups 8, 9)
pub const URL_PATTERN: &str = concat!(
    r#"((^|[\s.:;?\-\]\(])((?:https?://|www\.)[^\s<>\[\]()]*[^\s<>\[\]().,:;?!'"]))"#,
    r"|((\[([^\]\n]+)\])\(((?:https?://|www\.)[^\s()<>]+)\))",
    r"|<((?:https?://|www\.)[^\s<>|]+)(?:\|([^<>\n]+))?>",
);

/// Source of recognizer rules for the element builder
pub trait RuleProvider {
    /// Rule for `entity_type`, `None` when nothing is registered
    fn rule(&self, entity_type: &EntityType) -> Option<&RecognizerRule>;

    /// Capture-group positions of the URL rule
    fn url_layout(&self) -> &UrlGroupLayout;
}

/// Compiled rules for the built-in types plus any custom ones
#[derive(Debug, Clone)]
pub struct RuleSet {
    mention: RecognizerRule,
    hashtag: RecognizerRule,
    url: RecognizerRule,
    url_layout: UrlGroupLayout,
    custom: HashMap<String, RecognizerRule>,
}

impl RuleSet {
    /// Compile the default mention, hashtag and URL rules
    pub fn with_default_rules() -> Result<Self> {
        info!("Compiling default recognizer rules");
        let url = RecognizerRule::new(URL_PATTERN).context("default URL rule")?;
        Ok(Self {
            mention: RecognizerRule::new(MENTION_PATTERN).context("default mention rule")?,
            hashtag: RecognizerRule::new(HASHTAG_PATTERN).context("default hashtag rule")?,
            url,
            url_layout: UrlGroupLayout::default(),
            custom: HashMap::new(),
        })
    }

    pub fn with_mention_rule(mut self, rule: RecognizerRule) -> Self {
        self.mention = rule;
        self
    }

    pub fn with_hashtag_rule(mut self, rule: RecognizerRule) -> Self {
        self.hashtag = rule;
        self
    }

    /// Replace the URL rule; every group in `layout` must exist in the rule
    pub fn with_url_rule(mut self, rule: RecognizerRule, layout: UrlGroupLayout) -> Result<Self> {
        if layout.max_index() >= rule.group_count() {
            bail!(
                "URL rule `{}` has {} groups but the layout refers to group {}",
                rule.pattern(),
                rule.group_count() - 1,
                layout.max_index()
            );
        }
        self.url = rule;
        self.url_layout = layout;
        Ok(self)
    }

    /// Register a rule for `EntityType::Custom(id)`; ids must be unique
    pub fn register_custom(&mut self, id: impl Into<String>, pattern: &str) -> Result<()> {
        let id = id.into();
        if self.custom.contains_key(&id) {
            bail!("custom rule `{id}` is already registered");
        }
        let rule = RecognizerRule::new(pattern)
            .with_context(|| format!("custom rule `{id}`"))?;
        info!("Registered custom rule {}", id);
        self.custom.insert(id, rule);
        Ok(())
    }

    /// Custom rule ids in sorted order
    pub fn custom_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl RuleProvider for RuleSet {
    fn rule(&self, entity_type: &EntityType) -> Option<&RecognizerRule> {
        match entity_type {
            EntityType::Mention => Some(&self.mention),
            EntityType::Hashtag => Some(&self.hashtag),
            EntityType::Url => Some(&self.url),
            EntityType::Custom(id) => self.custom.get(id),
        }
    }

    fn url_layout(&self) -> &UrlGroupLayout {
        &self.url_layout
    }
}
