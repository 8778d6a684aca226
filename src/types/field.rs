use std::fmt;
use std::sync::Arc;

use super::error::CoercionError;
use super::value::{FieldKind, FieldValue};

type Assign<R> = dyn Fn(&mut R, Option<&str>) -> Result<(), CoercionError> + Send + Sync;

/// How a field picks the capture group that feeds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldTag {
    /// Use the field's own name, lowercased.
    Implicit,
    /// Use this capture name verbatim.
    Rename(String),
    /// Never bind this field.
    Skip,
}

/// A record type whose fields can be filled from named capture groups.
///
/// Usually implemented with [`impl_record!`](crate::impl_record):
///
/// ```
/// #[derive(Debug, Default)]
/// struct Human {
///     name: String,
///     age: i64,
///     height: Option<i64>,
/// }
///
/// restruct::impl_record!(Human { name, age, height });
/// ```
pub trait Record: Sized + Send + 'static {
    /// The record's fields, in declaration order.
    fn fields() -> Vec<Field<Self>>;
}

/// Describes one field of a [`Record`]: its declared name, naming tag, type
/// kind, and how to write it.
pub struct Field<R> {
    name: String,
    tag: FieldTag,
    kind: FieldKind,
    assign: Option<Arc<Assign<R>>>,
}

impl<R: 'static> Field<R> {
    /// A field filled by coercing captures into `T`.
    #[must_use]
    pub fn new<T, A>(name: impl Into<String>, access: A) -> Self
    where
        T: FieldValue,
        A: Fn(&mut R) -> &mut T + Send + Sync + 'static,
    {
        let assign: Arc<Assign<R>> = Arc::new(move |record: &mut R, text: Option<&str>| {
            let slot = access(record);
            match text {
                None => *slot = T::default(),
                Some(text) => *slot = T::from_capture(text)?,
            }
            Ok(())
        });
        Self {
            name: name.into(),
            tag: FieldTag::Implicit,
            kind: T::KIND,
            assign: Some(assign),
        }
    }

    /// A field of a type with no coercion. It still binds, and an empty or
    /// absent capture resets it to `T::default()`, but captured text is
    /// never written into it.
    #[must_use]
    pub fn opaque<T, A>(name: impl Into<String>, access: A) -> Self
    where
        T: Default + 'static,
        A: Fn(&mut R) -> &mut T + Send + Sync + 'static,
    {
        let assign: Arc<Assign<R>> = Arc::new(move |record: &mut R, text: Option<&str>| {
            if text.is_none() {
                *access(record) = T::default();
            }
            Ok(())
        });
        Self {
            name: name.into(),
            tag: FieldTag::Implicit,
            kind: FieldKind::Opaque,
            assign: Some(assign),
        }
    }

    /// A field that never binds. No accessor is needed.
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: FieldTag::Skip,
            kind: FieldKind::Opaque,
            assign: None,
        }
    }
}

impl<R> Field<R> {
    /// Bind this field to the capture group `capture` instead of its own name.
    #[must_use]
    pub fn rename(mut self, capture: impl Into<String>) -> Self {
        if self.tag != FieldTag::Skip {
            self.tag = FieldTag::Rename(capture.into());
        }
        self
    }

    /// Exclude this field from binding.
    #[must_use]
    pub fn skip(mut self) -> Self {
        self.tag = FieldTag::Skip;
        self
    }

    /// The declared field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tag(&self) -> &FieldTag {
        &self.tag
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The capture name this field binds to, or `None` for skipped fields.
    #[must_use]
    pub fn capture_name(&self) -> Option<String> {
        match &self.tag {
            FieldTag::Implicit => Some(self.name.to_lowercase()),
            FieldTag::Rename(capture) => Some(capture.clone()),
            FieldTag::Skip => None,
        }
    }

    /// Write a capture into `record`. `None` stands for an empty or
    /// non-participating group.
    pub(crate) fn assign(&self, record: &mut R, text: Option<&str>) -> Result<(), CoercionError> {
        match &self.assign {
            Some(assign) => assign(record, text),
            None => Ok(()),
        }
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            tag: self.tag.clone(),
            kind: self.kind,
            assign: self.assign.clone(),
        }
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Implement [`Record`] for a struct by listing its fields in declaration order.
///
/// Each entry is a field name, optionally followed by `=>` and one of:
/// - a string literal: bind to that capture name instead of the lowercased field name;
/// - `skip`: never bind the field;
/// - `opaque`: bind the field but never coerce into it (any `Default` type).
///
/// ```
/// #[derive(Debug, Default)]
/// struct Reading {
///     sensor: String,
///     celsius: f32,
///     ok: Option<bool>,
///     raw: Vec<u8>,
///     note: String,
/// }
///
/// restruct::impl_record!(Reading {
///     sensor,
///     celsius => "temp",
///     ok,
///     raw => opaque,
///     note => skip,
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    (@field $ty:ident, $field:ident) => {
        $crate::Field::new(stringify!($field), |r: &mut $ty| &mut r.$field)
    };
    (@field $ty:ident, $field:ident, skip) => {
        $crate::Field::<$ty>::skipped(stringify!($field))
    };
    (@field $ty:ident, $field:ident, opaque) => {
        $crate::Field::opaque(stringify!($field), |r: &mut $ty| &mut r.$field)
    };
    (@field $ty:ident, $field:ident, $capture:literal) => {
        $crate::Field::new(stringify!($field), |r: &mut $ty| &mut r.$field).rename($capture)
    };
    ($ty:ident { $($field:ident $(=> $opt:tt)?),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields() -> ::std::vec::Vec<$crate::Field<Self>> {
                ::std::vec![$($crate::impl_record!(@field $ty, $field $(, $opt)?)),*]
            }
        }
    };
}
