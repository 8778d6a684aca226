use std::fmt;

use super::handle::RecordHandle;
use super::rule::Matcher;

/// The rule that won a [`RuleSet::match_str()`](crate::RuleSet::match_str) call.
///
/// Its record has already been filled in place.
pub struct Match<'a> {
    index: usize,
    rule: &'a dyn Matcher,
}

impl<'a> Match<'a> {
    pub(crate) fn new(index: usize, rule: &'a dyn Matcher) -> Self {
        Self { index, rule }
    }

    /// Position of the winning rule in declaration order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn label(&self) -> Option<&'a str> {
        self.rule.label()
    }

    #[must_use]
    pub fn pattern(&self) -> &'a str {
        self.rule.pattern()
    }

    #[must_use]
    pub fn rule(&self) -> &'a dyn Matcher {
        self.rule
    }

    /// The filled record, if the rule's record type is `R`.
    #[must_use]
    pub fn record<R: Send + 'static>(&self) -> Option<RecordHandle<R>> {
        self.rule
            .record_any()
            .downcast_ref::<RecordHandle<R>>()
            .cloned()
    }
}

impl fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("index", &self.index)
            .field("label", &self.label())
            .field("pattern", &self.pattern())
            .finish()
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "rule #{} '{label}'", self.index),
            None => write!(f, "rule #{}", self.index),
        }
    }
}
