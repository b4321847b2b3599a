//! Left-to-right merging of normalized input sources.

use std::collections::HashMap;

use toml::{Table, Value};
use tracing::{debug, trace};

use super::source::{NormalizedInput, Origin};

/// How a later source combines with keys already set by earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// A later top-level key replaces the earlier value wholesale.
    #[default]
    Replace,
    /// Nested tables are merged recursively; other values are replaced.
    Deep,
}

/// The merged view of all sources, with the origin that last set each top-level key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Merged {
    values: Table,
    origins: HashMap<String, Option<Origin>>,
}

impl Merged {
    /// Wraps a single keyword table with no origin attached.
    pub(crate) fn from_kwargs(values: Table) -> Self {
        let origins = values.keys().map(|key| (key.clone(), None)).collect();
        Self { values, origins }
    }

    pub fn values(&self) -> &Table {
        &self.values
    }

    /// Returns the origin of the source that last set `key`, if known.
    pub fn origin_of(&self, key: &str) -> Option<&Origin> {
        self.origins.get(key).and_then(Option::as_ref)
    }

    pub fn into_parts(self) -> (Table, HashMap<String, Option<Origin>>) {
        (self.values, self.origins)
    }
}

/// Merges the inputs in order; later sources win.
pub fn merge(
    inputs: impl IntoIterator<Item = NormalizedInput>,
    strategy: MergeStrategy,
) -> Merged {
    let mut merged = Merged::default();

    for NormalizedInput { origin, data } in inputs {
        debug!(origin = ?origin, keys = data.len(), "merging input source");
        for (key, value) in data {
            merged.origins.insert(key.clone(), origin.clone());
            match (strategy, merged.values.get_mut(&key), value) {
                (MergeStrategy::Deep, Some(Value::Table(base)), Value::Table(overlay)) => {
                    trace!(key = %key, "deep-merging table");
                    deep_merge(base, overlay);
                }
                (_, existing, value) => {
                    if existing.is_some() {
                        trace!(key = %key, "overriding earlier value");
                    }
                    merged.values.insert(key, value);
                }
            }
        }
    }

    merged
}

fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(toml_str: &str) -> Table {
        toml::from_str(toml_str).unwrap()
    }

    fn bare(toml_str: &str) -> NormalizedInput {
        NormalizedInput {
            origin: None,
            data: make_table(toml_str),
        }
    }

    fn sourced(label: &str, toml_str: &str) -> NormalizedInput {
        NormalizedInput {
            origin: Some(Origin::Label(label.into())),
            data: make_table(toml_str),
        }
    }

    #[test]
    fn test_later_sources_override() {
        let merged = merge(
            vec![bare("a = 1"), bare("a = 2\nb = 3")],
            MergeStrategy::Replace,
        );
        assert_eq!(merged.values(), &make_table("a = 2\nb = 3"));
    }

    #[test]
    fn test_override_keeps_first_position() {
        let merged = merge(
            vec![bare("a = 1\nb = 2"), bare("c = 3\na = 4")],
            MergeStrategy::Replace,
        );
        let keys: Vec<&str> = merged.values().keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(merged.values()["a"].as_integer(), Some(4));
    }

    #[test]
    fn test_replace_does_not_merge_nested_tables() {
        let merged = merge(
            vec![
                bare("[server]\nhost = \"a\"\nport = 1"),
                bare("[server]\nport = 2"),
            ],
            MergeStrategy::Replace,
        );
        let server = merged.values()["server"].as_table().unwrap();
        assert_eq!(server.get("host"), None);
        assert_eq!(server["port"].as_integer(), Some(2));
    }

    #[test]
    fn test_deep_merges_nested_tables() {
        let merged = merge(
            vec![
                bare("[server]\nhost = \"a\"\nport = 1"),
                bare("[server]\nport = 2"),
            ],
            MergeStrategy::Deep,
        );
        let server = merged.values()["server"].as_table().unwrap();
        assert_eq!(server["host"].as_str(), Some("a"));
        assert_eq!(server["port"].as_integer(), Some(2));
    }

    #[test]
    fn test_deep_replaces_arrays() {
        let merged = merge(
            vec![bare("tags = [\"a\", \"b\"]"), bare("tags = [\"c\"]")],
            MergeStrategy::Deep,
        );
        assert_eq!(merged.values()["tags"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_tracks_origin_of_last_writer() {
        let merged = merge(
            vec![sourced("defaults", "a = 1\nb = 1"), sourced("cli", "b = 2"), bare("c = 3")],
            MergeStrategy::Replace,
        );
        assert_eq!(merged.origin_of("a"), Some(&Origin::Label("defaults".into())));
        assert_eq!(merged.origin_of("b"), Some(&Origin::Label("cli".into())));
        assert_eq!(merged.origin_of("c"), None);
        assert_eq!(merged.origin_of("missing"), None);
    }

    #[test]
    fn test_empty_inputs_merge_to_empty_table() {
        let merged = merge(Vec::new(), MergeStrategy::Replace);
        assert!(merged.values().is_empty());
    }
}
