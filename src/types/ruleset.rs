use std::fmt;

use super::error::Error;
use super::field::Record;
use super::handle::RecordHandle;
use super::matched::Match;
use super::rule::{Matcher, Rule};

/// Builder for constructing a [`RuleSet`].
///
/// Rules are tried in the order they are added.
///
/// # Example
///
/// ```
/// use restruct::{RecordHandle, RuleSetBuilder};
///
/// #[derive(Debug, Default)]
/// struct Human {
///     name: String,
///     age: i64,
///     height: Option<i64>,
/// }
/// restruct::impl_record!(Human { name, age, height });
///
/// let human = RecordHandle::<Human>::default();
/// let mut rules = RuleSetBuilder::new()
///     .rule("age", r"(?P<name>\w+) is (?P<age>\d+)( years old)?", &human)
///     .rule("height", r"(?P<name>\w+) is (?P<height>\d+) cm tall", &human)
///     .build();
///
/// let matched = rules.match_str("John is 178 cm tall").unwrap().unwrap();
/// assert_eq!(matched.label(), Some("height"));
/// assert_eq!(human.lock().height, Some(178));
/// ```
#[derive(Default)]
pub struct RuleSetBuilder {
    rules: Vec<Box<dyn Matcher>>,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labeled rule filling `record`.
    #[must_use]
    pub fn rule<R: Record>(
        self,
        label: &str,
        pattern: &str,
        record: &RecordHandle<R>,
    ) -> Self {
        self.push(Rule::new(pattern, record).labeled(label))
    }

    /// Add a rule without a label.
    #[must_use]
    pub fn unlabeled<R: Record>(self, pattern: &str, record: &RecordHandle<R>) -> Self {
        self.push(Rule::new(pattern, record))
    }

    /// Add a fully configured rule.
    #[must_use]
    pub fn push(mut self, rule: impl Matcher + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Finish building. The set compiles lazily on its first match.
    #[must_use]
    pub fn build(self) -> RuleSet {
        RuleSet::new(self.rules)
    }

    /// Finish building and compile every rule now.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Compilation`] encountered.
    pub fn compile(self) -> Result<RuleSet, Error> {
        let mut ruleset = self.build();
        ruleset.compile()?;
        Ok(ruleset)
    }
}

impl fmt::Debug for RuleSetBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSetBuilder")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Whether a [`RuleSet`] has compiled every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileState {
    Uncompiled,
    Compiled,
}

/// An ordered collection of rules, evaluated first-match-wins.
///
/// The set compiles once, either explicitly through [`compile()`](Self::compile)
/// or on the first [`match_str()`](Self::match_str). A failed compilation
/// leaves the set uncompiled, and the next `match_str` tries again.
///
/// A record is locked only while one rule fills it. Callers that fill the
/// same record from several threads must serialize those calls themselves.
/// A compiled set can be shared and matched through [`find()`](Self::find).
pub struct RuleSet {
    rules: Vec<Box<dyn Matcher>>,
    state: CompileState,
}

impl RuleSet {
    /// A set over `rules`, in the given order. Nothing is compiled yet.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Matcher>>) -> Self {
        Self {
            rules,
            state: CompileState::Uncompiled,
        }
    }

    #[must_use]
    pub fn state(&self) -> CompileState {
        self.state
    }

    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.state == CompileState::Compiled
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &(dyn Matcher + 'static)> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Rule labels in evaluation order.
    #[must_use]
    pub fn labels(&self) -> Vec<Option<&str>> {
        self.rules.iter().map(|r| r.label()).collect()
    }

    /// Compile every rule in order.
    ///
    /// Stops at the first invalid pattern. Rules before it stay compiled, but
    /// the set as a whole remains uncompiled. Compiling a compiled set
    /// rebuilds every rule.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Compilation`] encountered.
    pub fn compile(&mut self) -> Result<(), Error> {
        for rule in &mut self.rules {
            if let Err(err) = rule.compile() {
                self.state = CompileState::Uncompiled;
                return Err(err);
            }
        }
        self.state = CompileState::Compiled;
        tracing::debug!(rules = self.rules.len(), "compiled rule set");
        Ok(())
    }

    /// Match `input` against each rule in order and fill the first rule
    /// that matches. Compiles the set first if needed.
    ///
    /// Returns `Ok(None)` when no rule matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Compilation`] if the lazy compilation fails, and
    /// [`Error::FieldFilling`] if the first matching rule cannot coerce a
    /// capture. No later rules are tried after an error.
    pub fn match_str(&mut self, input: &str) -> Result<Option<Match<'_>>, Error> {
        if !self.is_compiled() {
            self.compile()?;
        }
        self.find(input)
    }

    /// Like [`match_str()`](Self::match_str), without compiling. Usable through
    /// a shared reference once the set has compiled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotCompiled`] for a rule that has not compiled, and
    /// [`Error::FieldFilling`] as for `match_str`.
    pub fn find(&self, input: &str) -> Result<Option<Match<'_>>, Error> {
        for (index, rule) in self.rules.iter().enumerate() {
            tracing::trace!(index, label = ?rule.label(), "trying rule");
            if rule.fill(input)? {
                tracing::trace!(index, label = ?rule.label(), "rule matched");
                return Ok(Some(Match::new(index, rule.as_ref())));
            }
        }
        tracing::trace!(rules = self.rules.len(), "no rule matched");
        Ok(None)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("labels", &self.labels())
            .field("state", &self.state)
            .finish()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            CompileState::Uncompiled => "uncompiled",
            CompileState::Compiled => "compiled",
        };
        write!(f, "RuleSet({} rules, {state})", self.rules.len())
    }
}
