use thiserror::Error;

use super::source::Origin;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("input source #{index} is neither a table nor an (origin, table) pair (found {found})")]
    InvalidInputShape { index: usize, found: &'static str },

    #[error("no input sources given for {schema}")]
    EmptyInputs { schema: &'static str },

    #[error("unknown field `{field}` for {schema} (from {})", describe_origin(.origin.as_ref()))]
    UnknownField {
        schema: &'static str,
        field: String,
        origin: Option<Origin>,
    },

    #[error("failed to deserialize {schema}: {source}")]
    Deserialize {
        schema: &'static str,
        source: toml::de::Error,
    },
}

fn describe_origin(origin: Option<&Origin>) -> String {
    match origin {
        Some(origin) => origin.to_string(),
        None => "unknown origin".to_string(),
    }
}
