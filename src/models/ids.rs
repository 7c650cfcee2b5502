//! Prefixed entity identifiers and sequential ID generation.
//!
//! Identifiers look like `M000001` / `P000042`: one ASCII letter naming the
//! entity type followed by a zero-padded decimal sequence number.

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Minimum width of the numeric suffix. Wider numbers are kept as-is.
pub const ID_DIGITS: usize = 6;

/// Splits an identifier into its prefix letter and sequence number.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidIdFormat`] if the first character is
/// not an ASCII letter or the remainder is not a non-empty run of ASCII
/// digits that fits in a `u64`.
#[inline]
pub fn parse_id(raw: &str) -> Result<(char, u64)> {
    let invalid = || DashboardError::InvalidIdFormat(raw.to_owned());
    let mut chars = raw.chars();
    let prefix = chars
        .next()
        .filter(char::is_ascii_alphabetic)
        .ok_or_else(invalid)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let number = digits.parse::<u64>().map_err(|_overflow| invalid())?;
    Ok((prefix, number))
}

/// Formats a prefix and sequence number as an identifier.
#[inline]
#[must_use]
pub fn format_id(prefix: char, number: u64) -> String {
    format!("{prefix}{number:0width$}", width = ID_DIGITS)
}

/// Produces the identifier following `last`, keeping its prefix.
///
/// `next_id("M000001")` is `"M000002"`, `next_id("P000099")` is
/// `"P000100"`.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidIdFormat`] if `last` is malformed or its
/// sequence number cannot be incremented.
#[inline]
pub fn next_id(last: &str) -> Result<String> {
    let (prefix, number) = parse_id(last)?;
    let next = number
        .checked_add(1)
        .ok_or_else(|| DashboardError::InvalidIdFormat(last.to_owned()))?;
    Ok(format_id(prefix, next))
}

/// Macro to define a newtype ID with a fixed one-letter prefix.
macro_rules! define_prefixed_id {
    (
        $(#[$meta:meta])*
        $name:ident($prefix:literal)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix letter shared by every identifier of this type.
            pub const PREFIX: char = $prefix;

            /// Wraps a raw identifier string without validating it.
            #[inline]
            #[must_use]
            pub const fn new(value: String) -> Self {
                Self(value)
            }

            /// Builds the identifier carrying the given sequence number.
            #[inline]
            #[must_use]
            pub fn from_sequence(number: u64) -> Self {
                Self(format_id(Self::PREFIX, number))
            }

            /// Returns the sequence number, checking the prefix.
            ///
            /// # Errors
            ///
            /// Returns [`DashboardError::InvalidIdFormat`] if the identifier
            /// is malformed or carries another type's prefix.
            #[inline]
            pub fn sequence(&self) -> Result<u64> {
                match parse_id(&self.0)? {
                    (Self::PREFIX, number) => Ok(number),
                    _ => Err(DashboardError::InvalidIdFormat(self.0.clone())),
                }
            }

            /// Returns the identifier that follows this one.
            ///
            /// # Errors
            ///
            /// Returns [`DashboardError::InvalidIdFormat`] if this
            /// identifier is malformed.
            #[inline]
            pub fn next(&self) -> Result<Self> {
                next_id(&self.0).map(Self)
            }

            /// Returns a reference to the inner string.
            #[inline]
            #[must_use]
            pub fn as_inner(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner string.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

define_prefixed_id! {
    /// Identifier of a merchant (`M` + six digits).
    MerchantId('M')
}

define_prefixed_id! {
    /// Identifier of a product (`P` + six digits).
    ProductId('P')
}
