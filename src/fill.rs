use regex::Regex;

use crate::{Binding, Error, Field, RecordHandle};

/// Match `input` and, on success, write every bound capture into the record.
///
/// Empty or non-participating groups reset their field. A coercion failure
/// aborts the fill; fields of lower-indexed groups keep their new values.
/// `label` names the rule in the resulting error.
pub(crate) fn fill<R>(
    label: Option<&str>,
    regex: &Regex,
    bindings: &[Binding],
    fields: &[Field<R>],
    record: &RecordHandle<R>,
    input: &str,
) -> Result<bool, Error> {
    let Some(captures) = regex.captures(input) else {
        return Ok(false);
    };

    let mut record = record.lock();
    for binding in bindings {
        let text = captures
            .get(binding.group)
            .map(|m| m.as_str())
            .filter(|text| !text.is_empty());

        fields[binding.field]
            .assign(&mut *record, text)
            .map_err(|source| {
                tracing::debug!(
                    label = ?label,
                    field = %binding.field_name,
                    capture = %binding.capture,
                    error = %source,
                    "field filling failed"
                );
                Error::FieldFilling {
                    label: label.map(str::to_owned),
                    field: binding.field_name.clone(),
                    source,
                }
            })?;
    }

    Ok(true)
}
