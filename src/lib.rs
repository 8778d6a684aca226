//! Match strings against an ordered list of regular expressions and fill
//! typed records from the named capture groups of the first one that matches.
//!
//! ```
//! use restruct::{RecordHandle, RuleSetBuilder};
//!
//! #[derive(Debug, Default)]
//! struct Reading {
//!     sensor: String,
//!     celsius: f32,
//!     ok: Option<bool>,
//! }
//! restruct::impl_record!(Reading { sensor, celsius => "temp", ok });
//!
//! let reading = RecordHandle::<Reading>::default();
//! let mut rules = RuleSetBuilder::new()
//!     .rule("temp", r"(?P<sensor>\w+): (?P<temp>-?[\d.]+)C( ok=(?P<ok>\w+))?", &reading)
//!     .build();
//!
//! rules.match_str("probe1: 21.5C").unwrap().unwrap();
//! assert_eq!(reading.lock().celsius, 21.5);
//! assert_eq!(reading.lock().ok, None);
//! ```

mod compile;
mod fill;
mod types;

pub use types::{
    parse_bool, Binding, CoercionError, CompileState, Error, Field, FieldKind, FieldTag,
    FieldValue, Match, MatchMode, Matcher, ParseBoolError, Record, RecordHandle, Rule, RuleSet,
    RuleSetBuilder, ValueKind,
};
