//! Strongly-typed value objects used by domain entities.
//!
//! Statuses are stored as snake_case text. Parsing goes through these types so
//! that once a value reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided status is not one of the known values.
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    /// Provided amount was negative.
    #[error("amount cannot be negative")]
    NegativeAmount,
}

/// Macro to generate status enums backed by snake_case text.
macro_rules! status_enum {
    ($name:ident, $doc:expr, { $($(#[$attr:meta])* $variant:ident => $text:literal),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$attr])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Text form stored in the database and accepted by filters.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(TypeConstraintError::UnknownStatus(other.to_string())),
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

status_enum!(OrderStatus, "Lifecycle of a customer order.", {
    #[default]
    New => "new",
    Processing => "processing",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

status_enum!(ProductStatus, "Catalogue visibility of a product.", {
    #[default]
    Active => "active",
    Hidden => "hidden",
    OutOfStock => "out_of_stock",
});

status_enum!(CraftsmanStatus, "Availability of a registered craftsman.", {
    #[default]
    Available => "available",
    Busy => "busy",
    Inactive => "inactive",
});

/// Trims the value and rejects empty inputs.
pub fn non_empty(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    Ok(trimmed.to_string())
}

/// Trims an optional value, mapping blank input to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
