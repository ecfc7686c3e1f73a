//! Macro for implementing Display and FromStr for closed domain enums
//!
//! Used for tags that travel as lowercase strings on the wire and in the
//! relational store (`win`/`loss`, `json`/`sqlite`, ...).
//!
//! # Example
//!
//! ```rust
//! use copion_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Outcome {
//!     Win,
//!     Loss,
//! }
//!
//! impl_domain_enum_conversions!(Outcome {
//!     Win => "win",
//!     Loss => "loss",
//! });
//!
//! assert_eq!("WIN".parse::<Outcome>().unwrap(), Outcome::Win);
//! ```

/// Implements Display and FromStr for enums with a fixed set of string tags
///
/// - Display writes the canonical lowercase tag
/// - FromStr trims and matches case-insensitively; unknown tags yield
///   `CopionError::InvalidInput`
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical lowercase tag for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = $crate::errors::CopionError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::errors::CopionError::InvalidInput(format!(
                        "invalid {}: '{}'",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}
