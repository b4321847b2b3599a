pub mod config;

pub use config::{
    field, Config, ConfigError, EmptyInputs, Field, FieldDecl, Input, Inputs, MergeStrategy,
    NormalizedInput, Origin, Policy, UnknownKeys,
};
pub use toml::{Table, Value};

#[doc(hidden)]
pub mod __private {
    pub use crate::config::compare::{field_eq, table_eq};
    pub use crate::config::field::resolve;
    pub use crate::config::repr::{render, write_config};
    pub use toml::de::Error as DeError;
}
