use std::any::Any;
use std::fmt;

use regex::Regex;

use super::error::Error;
use super::field::{Field, Record};
use super::handle::RecordHandle;

/// How much of the input a rule's pattern has to cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// The pattern must match the entire input.
    #[default]
    Whole,
    /// The leftmost match anywhere in the input is used.
    Search,
}

/// The resolved association between one capture group and one record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub(crate) group: usize,
    pub(crate) capture: String,
    pub(crate) field: usize,
    pub(crate) field_name: String,
}

impl Binding {
    /// Index of the capture group in the pattern.
    #[must_use]
    pub fn group(&self) -> usize {
        self.group
    }

    /// Name of the capture group.
    #[must_use]
    pub fn capture(&self) -> &str {
        &self.capture
    }

    /// Declaration index of the field in its record.
    #[must_use]
    pub fn field(&self) -> usize {
        self.field
    }

    /// Declared name of the field.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} -> {}", self.capture, self.group, self.field_name)
    }
}

/// Compiled pattern and its binding map. Both exist or neither does.
#[derive(Debug)]
struct Compiled {
    regex: Regex,
    bindings: Vec<Binding>,
}

/// One pattern bound to one record.
///
/// A rule starts uncompiled. [`compile()`](Self::compile) builds the regex and
/// the binding map together; [`try_match()`](Self::try_match) then fills the
/// record in place whenever the pattern matches.
///
/// ```
/// use restruct::{RecordHandle, Rule};
///
/// #[derive(Debug, Default)]
/// struct Human {
///     name: String,
///     age: i64,
/// }
/// restruct::impl_record!(Human { name, age });
///
/// let human = RecordHandle::<Human>::default();
/// let mut rule = Rule::new(r"(?P<name>\w+) is (?P<age>\d+)", &human).labeled("age");
/// rule.compile().unwrap();
///
/// assert!(rule.try_match("John is 42").unwrap().is_some());
/// assert_eq!(human.lock().age, 42);
/// ```
pub struct Rule<R> {
    label: Option<String>,
    pattern: String,
    mode: MatchMode,
    record: RecordHandle<R>,
    fields: Vec<Field<R>>,
    compiled: Option<Compiled>,
}

impl<R: Record> Rule<R> {
    /// A rule filling `record` using the fields declared by its [`Record`] impl.
    #[must_use]
    pub fn new(pattern: impl Into<String>, record: &RecordHandle<R>) -> Self {
        Self::with_fields(pattern, record, R::fields())
    }
}

impl<R: Send + 'static> Rule<R> {
    /// A rule filling `record` through an explicit field list, for types
    /// without a [`Record`] impl or to bind a subset of fields.
    #[must_use]
    pub fn with_fields(
        pattern: impl Into<String>,
        record: &RecordHandle<R>,
        fields: Vec<Field<R>>,
    ) -> Self {
        Self {
            label: None,
            pattern: pattern.into(),
            mode: MatchMode::default(),
            record: record.clone(),
            fields,
            compiled: None,
        }
    }

    /// Attach a label. Labels identify results and never influence matching.
    #[must_use]
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Choose how much of the input the pattern must cover.
    #[must_use]
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    #[must_use]
    pub fn record(&self) -> &RecordHandle<R> {
        &self.record
    }

    #[must_use]
    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// The binding map, ordered by group index. Empty until compiled.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        self.compiled
            .as_ref()
            .map_or(&[][..], |c| c.bindings.as_slice())
    }

    /// Compile the pattern and resolve the binding map.
    ///
    /// Compiling again rebuilds both from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Compilation`] if the pattern is invalid; the rule is
    /// then left uncompiled.
    pub fn compile(&mut self) -> Result<(), Error> {
        self.compiled = None;

        let regex = crate::compile::compile_pattern(&self.pattern, self.mode).map_err(|source| {
            tracing::warn!(
                label = ?self.label,
                pattern = %self.pattern,
                error = %source,
                "rule failed to compile"
            );
            Error::Compilation {
                label: self.label.clone(),
                source,
            }
        })?;
        let bindings = crate::compile::resolve_bindings(&regex, &self.fields);

        tracing::debug!(
            label = ?self.label,
            pattern = %self.pattern,
            bindings = bindings.len(),
            "compiled rule"
        );
        self.compiled = Some(Compiled { regex, bindings });
        Ok(())
    }

    /// Match `input` and fill the record.
    ///
    /// Returns the record handle when the pattern matched, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotCompiled`] before [`compile()`](Self::compile) has
    /// succeeded, and [`Error::FieldFilling`] when a capture cannot be coerced.
    /// A failed fill may leave some fields already updated.
    pub fn try_match(&self, input: &str) -> Result<Option<&RecordHandle<R>>, Error> {
        let compiled = self.compiled.as_ref().ok_or_else(|| Error::NotCompiled {
            label: self.label.clone(),
        })?;

        let matched = crate::fill::fill(
            self.label.as_deref(),
            &compiled.regex,
            &compiled.bindings,
            &self.fields,
            &self.record,
            input,
        )?;
        Ok(matched.then_some(&self.record))
    }
}

impl<R> fmt::Debug for Rule<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("label", &self.label)
            .field("pattern", &self.pattern)
            .field("mode", &self.mode)
            .field("fields", &self.fields)
            .field("compiled", &self.compiled.is_some())
            .finish()
    }
}

/// A rule with its record type erased, as held by a [`RuleSet`](crate::RuleSet).
pub trait Matcher: Send + Sync {
    fn label(&self) -> Option<&str>;

    fn pattern(&self) -> &str;

    fn is_compiled(&self) -> bool;

    fn bindings(&self) -> &[Binding];

    /// Compile the pattern and binding map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Compilation`] if the pattern is invalid.
    fn compile(&mut self) -> Result<(), Error>;

    /// Attempt a match, filling the record on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotCompiled`] or [`Error::FieldFilling`].
    fn fill(&self, input: &str) -> Result<bool, Error>;

    /// The rule's [`RecordHandle`], for downcasting.
    fn record_any(&self) -> &dyn Any;
}

impl<R: Send + 'static> Matcher for Rule<R> {
    fn label(&self) -> Option<&str> {
        Rule::label(self)
    }

    fn pattern(&self) -> &str {
        Rule::pattern(self)
    }

    fn is_compiled(&self) -> bool {
        Rule::is_compiled(self)
    }

    fn bindings(&self) -> &[Binding] {
        Rule::bindings(self)
    }

    fn compile(&mut self) -> Result<(), Error> {
        Rule::compile(self)
    }

    fn fill(&self, input: &str) -> Result<bool, Error> {
        Ok(self.try_match(input)?.is_some())
    }

    fn record_any(&self) -> &dyn Any {
        &self.record
    }
}
