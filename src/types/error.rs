use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Errors surfaced by [`RuleSet::compile()`](crate::RuleSet::compile) and
/// [`RuleSet::match_str()`](crate::RuleSet::match_str).
#[derive(Debug, Error)]
pub enum Error {
    /// The pattern text of a rule is not a valid regular expression.
    #[error("could not compile rule{}: {source}", label_suffix(.label))]
    Compilation {
        label: Option<String>,
        #[source]
        source: regex::Error,
    },

    /// A non-empty capture could not be coerced into its field's type.
    #[error("could not fill field {field}{}: {source}", rule_suffix(.label))]
    FieldFilling {
        label: Option<String>,
        field: String,
        #[source]
        source: CoercionError,
    },

    /// [`Rule::try_match()`](crate::Rule::try_match) was called before the rule compiled.
    #[error("rule{} has not been compiled", label_suffix(.label))]
    NotCompiled { label: Option<String> },
}

impl Error {
    /// The label of the rule the error came from, if it has one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Error::Compilation { label, .. }
            | Error::FieldFilling { label, .. }
            | Error::NotCompiled { label } => label.as_deref(),
        }
    }

    /// The declared name of the field that could not be filled.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::FieldFilling { field, .. } => Some(field),
            _ => None,
        }
    }
}

fn label_suffix(label: &Option<String>) -> String {
    match label {
        Some(label) => format!(" '{label}'"),
        None => String::new(),
    }
}

fn rule_suffix(label: &Option<String>) -> String {
    match label {
        Some(label) => format!(" of rule '{label}'"),
        None => String::new(),
    }
}

/// Failure to turn captured text into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("invalid integer: {0}")]
    Integer(#[from] ParseIntError),

    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    /// The text is a well-formed float whose magnitude overflows the field's width.
    #[error("float out of range: '{0}'")]
    FloatRange(String),

    #[error(transparent)]
    Boolean(#[from] ParseBoolError),
}

/// The captured text is not one of the accepted boolean spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBoolError {
    text: String,
}

impl ParseBoolError {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
        }
    }

    /// The rejected text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ParseBoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid boolean '{}'", self.text)
    }
}

impl std::error::Error for ParseBoolError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex_error() -> regex::Error {
        regex::Regex::new("(?P<").unwrap_err()
    }

    #[test]
    fn compilation_message_without_label() {
        let err = Error::Compilation {
            label: None,
            source: regex_error(),
        };
        assert!(err.to_string().starts_with("could not compile rule: "));
        assert_eq!(err.label(), None);
    }

    #[test]
    fn compilation_message_with_label() {
        let err = Error::Compilation {
            label: Some("age".into()),
            source: regex_error(),
        };
        assert!(err.to_string().starts_with("could not compile rule 'age': "));
        assert_eq!(err.label(), Some("age"));
    }

    #[test]
    fn field_filling_message() {
        let source = CoercionError::from("abc".parse::<i64>().unwrap_err());
        let err = Error::FieldFilling {
            label: None,
            field: "A".into(),
            source,
        };
        assert_eq!(
            err.to_string(),
            "could not fill field A: invalid integer: invalid digit found in string"
        );
        assert_eq!(err.field(), Some("A"));
        assert_eq!(err.label(), None);
    }

    #[test]
    fn field_filling_message_with_label() {
        let err = Error::FieldFilling {
            label: Some("age".into()),
            field: "Age".into(),
            source: CoercionError::FloatRange("1e400".into()),
        };
        assert_eq!(
            err.to_string(),
            "could not fill field Age of rule 'age': float out of range: '1e400'"
        );
        assert_eq!(err.label(), Some("age"));
    }

    #[test]
    fn not_compiled_message() {
        let err = Error::NotCompiled {
            label: Some("height".into()),
        };
        assert_eq!(err.to_string(), "rule 'height' has not been compiled");
    }

    #[test]
    fn bool_error_message() {
        let err = CoercionError::from(ParseBoolError::new("maybe"));
        assert_eq!(err.to_string(), "invalid boolean 'maybe'");
    }
}
