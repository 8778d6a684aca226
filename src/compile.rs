use std::collections::{BTreeMap, HashMap};

use regex::Regex;

use crate::{Binding, Field, MatchMode};

/// Compile a rule's pattern. In [`MatchMode::Whole`] the pattern is wrapped so
/// it must span the entire input; the wrapper adds no capture group, so group
/// indices stay those of the source pattern.
///
/// The source is always compiled on its own first. A source with a stray `)`
/// would otherwise close the wrapper's group and escape the anchors.
pub(crate) fn compile_pattern(source: &str, mode: MatchMode) -> Result<Regex, regex::Error> {
    let regex = Regex::new(source)?;
    match mode {
        MatchMode::Whole => Regex::new(&format!(r"\A(?:{source})\z")),
        MatchMode::Search => Ok(regex),
    }
}

/// Intersect the pattern's named groups with the record's fields.
///
/// Fields are visited in declaration order. A field binds to the group named
/// by its rename, else by its lowercased name; skipped fields never bind.
/// When several fields resolve to the same group, the last one declared wins.
/// The result is ordered by group index.
pub(crate) fn resolve_bindings<R>(regex: &Regex, fields: &[Field<R>]) -> Vec<Binding> {
    let groups: HashMap<&str, usize> = regex
        .capture_names()
        .enumerate()
        .filter_map(|(index, name)| name.map(|name| (name, index)))
        .collect();

    let mut by_group: BTreeMap<usize, usize> = BTreeMap::new();
    for (field_index, field) in fields.iter().enumerate() {
        let Some(capture) = field.capture_name() else {
            continue;
        };
        if let Some(&group) = groups.get(capture.as_str()) {
            by_group.insert(group, field_index);
        }
    }

    by_group
        .into_iter()
        .map(|(group, field_index)| {
            let field = &fields[field_index];
            Binding {
                group,
                capture: field.capture_name().unwrap_or_default(),
                field: field_index,
                field_name: field.name().to_owned(),
            }
        })
        .collect()
}
