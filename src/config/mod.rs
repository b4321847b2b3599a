//! Declarative configuration schemas.
//!
//! A schema is declared with [`config_schema!`](crate::config_schema) and built
//! either from keyword values ([`Config::from_kwargs`]) or from an ordered
//! sequence of input sources ([`Config::from_data`], [`Inputs`]). Sources are
//! normalized into `(origin, table)` pairs, merged left to right, and then
//! deserialized into the schema, with declared defaults filling the gaps.

mod builder;
pub(crate) mod compare;
mod error;
pub(crate) mod field;
mod macros;
mod merge;
pub(crate) mod repr;
mod schema;
mod source;

pub use builder::Inputs;
pub use error::ConfigError;
pub use field::{field, Field, FieldDecl};
pub use merge::{merge, Merged, MergeStrategy};
pub use schema::{Config, EmptyInputs, Policy, UnknownKeys};
pub use source::{Input, NormalizedInput, Origin};
