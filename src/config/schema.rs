//! The `Config` trait implemented by every schema, and the construction step
//! shared by keyword construction and [`Inputs::build`].

use std::any::Any;
use std::fmt;

use toml::{Table, Value};
use tracing::debug;

use super::builder::Inputs;
use super::field::FieldDecl;
use super::merge::{Merged, MergeStrategy};
use super::source::Input;
use super::ConfigError;

/// What to do with input keys that have no field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Keep them in the instance's overflow table.
    #[default]
    Capture,
    Ignore,
    /// Fail construction with [`ConfigError::UnknownField`].
    Reject,
}

/// What `from_data` does when given no input sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyInputs {
    /// Build from declared defaults alone.
    #[default]
    Defaults,
    /// Fail with [`ConfigError::EmptyInputs`].
    Reject,
}

/// Per-schema construction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policy {
    pub unknown_keys: UnknownKeys,
    pub empty_inputs: EmptyInputs,
    pub merge: MergeStrategy,
}

impl Policy {
    pub const fn new() -> Self {
        Self {
            unknown_keys: UnknownKeys::Capture,
            empty_inputs: EmptyInputs::Defaults,
            merge: MergeStrategy::Replace,
        }
    }

    pub const fn unknown_keys(mut self, unknown_keys: UnknownKeys) -> Self {
        self.unknown_keys = unknown_keys;
        self
    }

    pub const fn empty_inputs(mut self, empty_inputs: EmptyInputs) -> Self {
        self.empty_inputs = empty_inputs;
        self
    }

    pub const fn merge(mut self, merge: MergeStrategy) -> Self {
        self.merge = merge;
        self
    }
}

/// A configuration schema.
///
/// Normally implemented through [`config_schema!`](crate::config_schema), which
/// generates the record type, this impl, and a matching `Display`.
///
/// ## Example
///
/// ```
/// use cot_config::{config_schema, field, Config};
///
/// config_schema! {
///     pub struct SampleConfig {
///         pub name: String = field(),
///         pub retries: i64 = field().with_default(3),
///     }
/// }
///
/// let loaded = SampleConfig::from_data([toml::from_str::<toml::Table>(r#"name = "John""#)?])?;
/// assert_eq!(loaded, SampleConfig::new("John".to_string(), 3));
/// assert_eq!(loaded.to_string(), r#"<SampleConfig name="John", retries=3>"#);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Config: PartialEq + fmt::Debug + Sized + 'static {
    /// Schema name used in representations and errors.
    const NAME: &'static str;

    /// Declared fields, in declaration order.
    fn fields() -> Vec<FieldDecl>;

    fn policy() -> Policy {
        Policy::new()
    }

    /// Builds an instance from declared keys only, filling in defaults for
    /// the ones not supplied. Captured keys are attached afterwards.
    fn from_declared(values: Table) -> Result<Self, toml::de::Error>;

    /// Keys captured under [`UnknownKeys::Capture`].
    fn extra(&self) -> &Table;

    fn extra_mut(&mut self) -> &mut Table;

    /// Declared fields paired with their rendered values.
    fn field_values(&self) -> Vec<(&'static str, String)>;

    /// Builds an instance from a single table of keyword values.
    fn from_kwargs(kwargs: Table) -> Result<Self, ConfigError> {
        construct(Merged::from_kwargs(kwargs))
    }

    /// Normalizes, merges (later sources win) and constructs from `inputs`.
    fn from_data<I>(inputs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<Input>,
    {
        inputs.into_iter().collect::<Inputs>().build()
    }

    /// Like [`from_data`](Self::from_data), for sources whose shape is only known at runtime.
    fn from_values<I>(values: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Value>,
    {
        Inputs::try_from_values(values)?.build()
    }

    /// Equality against a value of any type; `false` unless it is the same schema.
    fn same_as(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<Self>().is_some_and(|other| self == other)
    }

    fn repr(&self) -> String {
        struct Repr<'a, C>(&'a C);

        impl<C: Config> fmt::Display for Repr<'_, C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                super::repr::write_config(self.0, f)
            }
        }

        Repr(self).to_string()
    }

    fn field_names() -> Vec<&'static str> {
        Self::fields().iter().map(FieldDecl::name).collect()
    }
}

/// Splits off undeclared keys, then hands the declared ones to the schema.
pub(crate) fn construct<C: Config>(merged: Merged) -> Result<C, ConfigError> {
    let policy = C::policy();
    let fields = C::fields();
    let (values, origins) = merged.into_parts();

    let mut declared = Table::new();
    let mut extra = Table::new();

    for (key, value) in values {
        if fields.iter().any(|field| field.name() == key) {
            declared.insert(key, value);
            continue;
        }
        match policy.unknown_keys {
            UnknownKeys::Capture => {
                debug!(schema = C::NAME, key = %key, "capturing undeclared key");
                extra.insert(key, value);
            }
            UnknownKeys::Ignore => {
                debug!(schema = C::NAME, key = %key, "ignoring undeclared key");
            }
            UnknownKeys::Reject => {
                return Err(ConfigError::UnknownField {
                    schema: C::NAME,
                    origin: origins.get(&key).cloned().flatten(),
                    field: key,
                });
            }
        }
    }

    debug!(
        schema = C::NAME,
        fields = declared.len(),
        extra = extra.len(),
        "constructing config"
    );

    let mut config =
        C::from_declared(declared).map_err(|source| ConfigError::Deserialize {
            schema: C::NAME,
            source,
        })?;
    *config.extra_mut() = extra;
    Ok(config)
}
