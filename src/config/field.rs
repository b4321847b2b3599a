//! Field declaration markers used by [`config_schema!`](crate::config_schema).

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, Visitor};

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Marks a schema field, optionally with a default.
///
/// Created with [`field()`]. A field without a default must be supplied by the
/// input (unless its type is an `Option`, which falls back to `None`).
pub struct Field<T> {
    default: Option<Factory<T>>,
}

/// Declares a field with no default.
pub fn field<T>() -> Field<T> {
    Field { default: None }
}

impl<T> Field<T> {
    /// Uses `value` when the field is not supplied. Each instance gets its own clone.
    pub fn with_default(self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            default: Some(Box::new(move || value.clone())),
        }
    }

    /// Calls `factory` for every instance that does not supply the field.
    pub fn with_default_factory<F>(self, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            default: Some(Box::new(factory)),
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Produces a fresh default, or `None` if the field has no default.
    pub fn make_default(&self) -> Option<T> {
        self.default.as_ref().map(|factory| factory())
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// Picks the supplied value, else the declared default, else whatever the
/// type yields for a missing field (`None` for options, an error otherwise).
pub fn resolve<T: DeserializeOwned>(
    name: &'static str,
    supplied: Option<T>,
    field: Field<T>,
) -> Result<T, toml::de::Error> {
    match supplied.or_else(|| field.make_default()) {
        Some(value) => Ok(value),
        None => T::deserialize(MissingField(name)),
    }
}

struct MissingField(&'static str);

impl<'de> Deserializer<'de> for MissingField {
    type Error = toml::de::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(<toml::de::Error as de::Error>::missing_field(self.0))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_none()
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

/// A named, type-erased field declaration belonging to a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    name: &'static str,
    type_name: &'static str,
    has_default: bool,
}

impl FieldDecl {
    pub fn new<T>(name: &'static str, field: Field<T>) -> Self {
        Self {
            name,
            type_name: std::any::type_name::<T>(),
            has_default: field.has_default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared Rust type. Informational only.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn has_default(&self) -> bool {
        self.has_default
    }
}
