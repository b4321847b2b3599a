use std::path::Path;

use toml::{Table, Value};
use tracing::debug;

use super::merge::merge;
use super::schema::{construct, Config, EmptyInputs};
use super::source::{Input, NormalizedInput, Origin};
use super::ConfigError;

/// An ordered sequence of input sources.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Whether nested tables merge recursively or are replaced is
/// decided by the target schema's [`Policy`](super::Policy).
///
/// External loaders (files, environment, command line) read their data and
/// hand it over here, optionally tagged with where it came from:
///
/// ```
/// use cot_config::{config_schema, field, Inputs};
///
/// config_schema! {
///     pub struct ServerConfig {
///         pub host: String = field(),
///         pub port: u16 = field().with_default(8080),
///     }
/// }
///
/// let defaults: toml::Table = toml::from_str(r#"host = "localhost""#)?;
/// let overrides: toml::Table = toml::from_str("port = 9000")?;
///
/// let config: ServerConfig = Inputs::builder()
///     .with_data(defaults)
///     .with_source("settings.cfg", overrides)
///     .build()?;
///
/// assert_eq!(config.port, 9000);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Inputs {
    sources: Vec<Input>,
}

impl Inputs {
    /// Creates an empty sequence.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a table with no recorded origin.
    pub fn with_data(mut self, data: Table) -> Self {
        self.sources.push(Input::Bare(data));
        self
    }

    /// Adds a table along with where it came from.
    pub fn with_source(mut self, origin: impl Into<Origin>, data: Table) -> Self {
        self.sources.push(Input::Sourced(Some(origin.into()), data));
        self
    }

    /// Adds a table read from `path`.
    pub fn with_file_data(self, path: impl AsRef<Path>, data: Table) -> Self {
        self.with_source(path.as_ref(), data)
    }

    pub fn push(&mut self, input: impl Into<Input>) {
        self.sources.push(input.into());
    }

    /// Checks the shape of every value before accepting any of them.
    pub fn try_from_values(values: impl IntoIterator<Item = Value>) -> Result<Self, ConfigError> {
        let sources = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Input::from_value(index, value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sources })
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Converts every source into an `(origin, table)` pair, preserving order.
    pub fn normalize(self) -> Vec<NormalizedInput> {
        self.sources
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                let normalized = input.normalize();
                debug!(index, origin = ?normalized.origin, "normalized input source");
                normalized
            })
            .collect()
    }

    /// Normalizes, merges and constructs a `C`.
    ///
    /// With no sources, the schema's [`EmptyInputs`] policy decides between a
    /// defaults-only instance and [`ConfigError::EmptyInputs`].
    pub fn build<C: Config>(self) -> Result<C, ConfigError> {
        let policy = C::policy();

        if self.is_empty() {
            match policy.empty_inputs {
                EmptyInputs::Reject => return Err(ConfigError::EmptyInputs { schema: C::NAME }),
                EmptyInputs::Defaults => {
                    debug!(schema = C::NAME, "no input sources; using declared defaults");
                }
            }
        }

        let merged = merge(self.normalize(), policy.merge);
        construct(merged)
    }
}

impl<I: Into<Input>> FromIterator<I> for Inputs {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            sources: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<I: Into<Input>> Extend<I> for Inputs {
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        self.sources.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for Inputs {
    type Item = Input;
    type IntoIter = std::vec::IntoIter<Input>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.into_iter()
    }
}
