pub mod builder;
pub mod config;
pub mod entity;
pub mod extractor;
pub mod input;
pub mod normalization;
pub mod rules;
pub mod scanner;

// Re-export main types for convenient access
pub use entity::{ElementResult, Entity, EntityType, TextRange};

// Re-export the extraction entry points
pub use builder::{Blocklist, ElementBuilder, FilterPredicate, ShortenOptions, UrlRewrite};
pub use extractor::{Extraction, Extractor};

// Re-export rule and configuration types
pub use config::ExtractorConfig;
pub use rules::{RuleProvider, RuleSet};
pub use scanner::{scan, RawMatch, RecognizerRule, UrlGroupLayout, UrlSyntax};
