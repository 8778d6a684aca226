mod error;
mod field;
mod handle;
mod matched;
mod rule;
mod ruleset;
mod value;

pub use error::{CoercionError, Error, ParseBoolError};
pub use field::{Field, FieldTag, Record};
pub use handle::RecordHandle;
pub use matched::Match;
pub use rule::{Binding, MatchMode, Matcher, Rule};
pub use ruleset::{CompileState, RuleSet, RuleSetBuilder};
pub use value::{parse_bool, FieldKind, FieldValue, ValueKind};
