/// Declares a configuration schema.
///
/// Each field is written as `name: Type = marker`, where the marker is
/// [`field()`](crate::field) optionally followed by `.with_default(..)` or
/// `.with_default_factory(..)`. An optional leading `policy = <expr>;`
/// overrides the schema's [`Policy`](crate::Policy). Fields accept doc
/// comments only; the field name is also its input key, so there is no
/// renaming.
///
/// The macro generates:
/// - the struct, deriving `Debug` and `Clone`, plus a hidden table of captured
///   undeclared keys;
/// - `new`, taking every declared field in order;
/// - the [`Config`](crate::Config) impl; the calling crate needs `serde` as a
///   dependency for it;
/// - `PartialEq`, comparing declared fields and captured keys, with floats
///   compared by `total_cmp` so NaN equals itself;
/// - `Display`, rendering `<Name field=value, ...>`.
///
/// The rendering lists declared fields in declaration order, whatever order
/// the input used, followed by captured keys in the order they were merged.
/// Declared `Option` fields that were never supplied render as `None`.
///
/// ```
/// use cot_config::{config_schema, field, Config, Policy, UnknownKeys};
///
/// config_schema! {
///     policy = Policy::new().unknown_keys(UnknownKeys::Reject);
///     /// Database connection settings.
///     pub struct Database {
///         pub url: String = field(),
///         pub pool_size: u32 = field().with_default(4),
///         pub replicas: Vec<String> = field().with_default_factory(Vec::new),
///     }
/// }
///
/// let db = Database::from_kwargs(toml::from_str(r#"url = "postgres://db""#)?)?;
/// assert_eq!(db.pool_size, 4);
/// assert_eq!(db.to_string(), r#"<Database url="postgres://db", pool_size=4, replicas=[]>"#);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Other field attributes, such as serde renames, do not match the grammar:
///
/// ```compile_fail
/// use cot_config::{config_schema, field};
///
/// config_schema! {
///     pub struct Renamed {
///         #[serde(rename = "display-name")]
///         pub name: String = field(),
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_schema {
    (
        @schema [$policy:expr]
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:expr])*
                $field_vis:vis $field:ident : $ty:ty = $marker:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $field_vis $field: $ty,
            )*
            __extra: $crate::Table,
        }

        impl $name {
            #[allow(clippy::too_many_arguments, dead_code)]
            $vis fn new($($field: $ty),*) -> Self {
                Self {
                    $($field,)*
                    __extra: $crate::Table::new(),
                }
            }
        }

        impl $crate::Config for $name {
            const NAME: &'static str = ::core::stringify!($name);

            fn fields() -> ::std::vec::Vec<$crate::FieldDecl> {
                ::std::vec![
                    $($crate::FieldDecl::new::<$ty>(::core::stringify!($field), $marker)),*
                ]
            }

            fn policy() -> $crate::Policy {
                $policy
            }

            #[allow(unused_variables)]
            fn from_declared(
                values: $crate::Table,
            ) -> ::core::result::Result<Self, $crate::__private::DeError> {
                #[derive(::serde::Deserialize)]
                struct Supplied {
                    $($field: ::core::option::Option<$ty>,)*
                }

                let supplied: Supplied = $crate::Value::Table(values).try_into()?;
                ::core::result::Result::Ok(Self {
                    $(
                        $field: $crate::__private::resolve(
                            ::core::stringify!($field),
                            supplied.$field,
                            $marker,
                        )?,
                    )*
                    __extra: $crate::Table::new(),
                })
            }

            fn extra(&self) -> &$crate::Table {
                &self.__extra
            }

            fn extra_mut(&mut self) -> &mut $crate::Table {
                &mut self.__extra
            }

            fn field_values(&self) -> ::std::vec::Vec<(&'static str, ::std::string::String)> {
                ::std::vec![
                    $((::core::stringify!($field), $crate::__private::render(&self.$field))),*
                ]
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                true $(&& $crate::__private::field_eq(&self.$field, &other.$field))*
                    && $crate::__private::table_eq(&self.__extra, &other.__extra)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::__private::write_config(self, f)
            }
        }
    };
    (policy = $policy:expr; $($rest:tt)*) => {
        $crate::config_schema!(@schema [$policy] $($rest)*);
    };
    ($(#[$meta:meta])* $vis:vis struct $($rest:tt)*) => {
        $crate::config_schema!(@schema [$crate::Policy::new()] $(#[$meta])* $vis struct $($rest)*);
    };
}
