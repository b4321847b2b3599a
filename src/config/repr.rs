//! Rendering of config instances as `<Name key=value, ...>`.

use std::fmt;

use serde::Serialize;
use toml::Value;

use super::Config;

/// Renders a field value. Falls back to `Debug` for values TOML cannot hold,
/// so an unset `Option` field shows as `None`.
pub fn render<T: Serialize + fmt::Debug>(value: &T) -> String {
    match Value::try_from(value) {
        Ok(value) => render_value(&value),
        Err(_) => format!("{value:?}"),
    }
}

pub fn render_value(value: &Value) -> String {
    Rendered(value).to_string()
}

struct Rendered<'a>(&'a Value);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Datetime(dt) => write!(f, "{dt}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Rendered(item))?;
                }
                f.write_str("]")
            }
            Value::Table(table) => {
                f.write_str("{")?;
                for (i, (key, item)) in table.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={}", Rendered(item))?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Writes declared fields in declaration order, then captured extras in merge order.
pub fn write_config<C: Config>(config: &C, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "<{}", C::NAME)?;

    let mut first = true;
    for (key, value) in config.field_values() {
        write_entry(f, &mut first, key, value)?;
    }
    for (key, value) in config.extra() {
        write_entry(f, &mut first, key, Rendered(value))?;
    }

    f.write_str(">")
}

fn write_entry(
    f: &mut fmt::Formatter<'_>,
    first: &mut bool,
    key: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    let sep = if *first { " " } else { ", " };
    *first = false;
    write!(f, "{sep}{key}={value}")
}
