// WHY: Inclusion predicates applied to candidate tokens before an element is emitted

use std::collections::HashSet;

/// Decides whether a normalized token becomes an element
pub trait FilterPredicate {
    fn accepts(&self, token: &str) -> bool;
}

impl<F> FilterPredicate for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, token: &str) -> bool {
        self(token)
    }
}

/// Evaluate an optional predicate; no predicate accepts everything
pub fn accepts(predicate: Option<&dyn FilterPredicate>, token: &str) -> bool {
    predicate.map_or(true, |p| p.accepts(token))
}

/// Case-sensitive set of tokens that must never become elements
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    blocked: HashSet<String>,
}

impl Blocklist {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocked: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_blocked(&self, token: &str) -> bool {
        self.blocked.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }
}

impl FilterPredicate for Blocklist {
    fn accepts(&self, token: &str) -> bool {
        !self.is_blocked(token)
    }
}
