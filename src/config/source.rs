//! Input sources and their normalization into `(origin, table)` pairs.

use std::fmt;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::ConfigError;

/// Where an input table came from. Carried for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    Path(PathBuf),
    Label(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Path(path) => write!(f, "{}", path.display()),
            Origin::Label(label) => f.write_str(label),
        }
    }
}

impl From<PathBuf> for Origin {
    fn from(path: PathBuf) -> Self {
        Origin::Path(path)
    }
}

impl From<&Path> for Origin {
    fn from(path: &Path) -> Self {
        Origin::Path(path.to_path_buf())
    }
}

impl From<String> for Origin {
    fn from(label: String) -> Self {
        Origin::Label(label)
    }
}

impl From<&str> for Origin {
    fn from(label: &str) -> Self {
        Origin::Label(label.to_string())
    }
}

/// A single input source: either a bare table or a table tagged with its origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Bare(Table),
    Sourced(Option<Origin>, Table),
}

impl Input {
    /// Converts a dynamically shaped value into an input source.
    ///
    /// Accepts a table, or a two-element array of `[label, table]`.
    /// `index` is the position of the value in its sequence and only
    /// appears in the error.
    pub fn from_value(index: usize, value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Table(data) => Ok(Input::Bare(data)),
            Value::Array(items) => {
                let mut items = items.into_iter();
                match (items.next(), items.next(), items.next()) {
                    (Some(Value::String(label)), Some(Value::Table(data)), None) => {
                        Ok(Input::Sourced(Some(Origin::Label(label)), data))
                    }
                    _ => Err(ConfigError::InvalidInputShape {
                        index,
                        found: "array",
                    }),
                }
            }
            other => Err(ConfigError::InvalidInputShape {
                index,
                found: other.type_str(),
            }),
        }
    }

    pub fn normalize(self) -> NormalizedInput {
        match self {
            Input::Bare(data) => NormalizedInput { origin: None, data },
            Input::Sourced(origin, data) => NormalizedInput { origin, data },
        }
    }
}

impl From<Table> for Input {
    fn from(data: Table) -> Self {
        Input::Bare(data)
    }
}

impl From<&Table> for Input {
    fn from(data: &Table) -> Self {
        Input::Bare(data.clone())
    }
}

impl From<(Option<Origin>, Table)> for Input {
    fn from((origin, data): (Option<Origin>, Table)) -> Self {
        Input::Sourced(origin, data)
    }
}

impl From<(Origin, Table)> for Input {
    fn from((origin, data): (Origin, Table)) -> Self {
        Input::Sourced(Some(origin), data)
    }
}

impl From<(&str, Table)> for Input {
    fn from((label, data): (&str, Table)) -> Self {
        Input::Sourced(Some(label.into()), data)
    }
}

impl From<(String, Table)> for Input {
    fn from((label, data): (String, Table)) -> Self {
        Input::Sourced(Some(label.into()), data)
    }
}

impl From<(PathBuf, Table)> for Input {
    fn from((path, data): (PathBuf, Table)) -> Self {
        Input::Sourced(Some(path.into()), data)
    }
}

impl From<(&Path, Table)> for Input {
    fn from((path, data): (&Path, Table)) -> Self {
        Input::Sourced(Some(path.into()), data)
    }
}

impl From<NormalizedInput> for Input {
    fn from(input: NormalizedInput) -> Self {
        Input::Sourced(input.origin, input.data)
    }
}

/// An input source with its origin made explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    pub origin: Option<Origin>,
    pub data: Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(toml_str: &str) -> Table {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_bare_table_has_no_origin() {
        let input: Input = make_table(r#"name = "John""#).into();
        let normalized = input.normalize();

        assert_eq!(normalized.origin, None);
        assert_eq!(normalized.data["name"].as_str(), Some("John"));
    }

    #[test]
    fn test_label_and_path_origins() {
        let labelled = Input::from(("settings.cfg", Table::new())).normalize();
        assert_eq!(labelled.origin, Some(Origin::Label("settings.cfg".into())));

        let pathed = Input::from((Path::new("/etc/app.toml"), Table::new())).normalize();
        assert_eq!(
            pathed.origin,
            Some(Origin::Path(PathBuf::from("/etc/app.toml")))
        );
        assert_eq!(pathed.origin.unwrap().to_string(), "/etc/app.toml");
    }

    #[test]
    fn test_explicit_absent_origin() {
        let input = Input::from((None, make_table("a = 1")));
        assert_eq!(input.normalize().origin, None);
    }

    #[test]
    fn test_from_value_table() {
        let value = Value::Table(make_table("a = 1"));
        let input = Input::from_value(0, value).unwrap();
        assert_eq!(input, Input::Bare(make_table("a = 1")));
    }

    #[test]
    fn test_from_value_pair() {
        let value = Value::Array(vec![
            Value::String("cli".into()),
            Value::Table(make_table("a = 1")),
        ]);
        let normalized = Input::from_value(0, value).unwrap().normalize();
        assert_eq!(normalized.origin, Some(Origin::Label("cli".into())));
        assert_eq!(normalized.data, make_table("a = 1"));
    }

    #[test]
    fn test_from_value_rejects_scalars() {
        let result = Input::from_value(3, Value::Integer(7));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidInputShape { index: 3, found: "integer" })
        ));
    }

    #[test]
    fn test_from_value_rejects_malformed_pairs() {
        let reversed = Value::Array(vec![
            Value::Table(Table::new()),
            Value::String("cli".into()),
        ]);
        assert!(matches!(
            Input::from_value(0, reversed),
            Err(ConfigError::InvalidInputShape { found: "array", .. })
        ));

        let triple = Value::Array(vec![
            Value::String("cli".into()),
            Value::Table(Table::new()),
            Value::Table(Table::new()),
        ]);
        assert!(Input::from_value(1, triple).is_err());
    }
}
