//! Lenient deserializers for form-style input.
//!
//! Dashboard forms submit numbers as strings (`"15000"`) and parameters
//! either as an object or as a list of `{name, value}` pairs. These helpers
//! accept both shapes and produce the typed representation.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::error::{DashboardError, Result};

/// A JSON value that is either a number or a string holding one.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    /// Already numeric.
    Number(f64),
    /// Text to be parsed.
    Text(String),
}

/// One `{name, value}` pair of the list form of product parameters.
#[derive(Deserialize)]
struct ParameterPair {
    /// Parameter name.
    name: String,
    /// Parameter value.
    value: String,
}

/// Either parameter representation.
#[derive(Deserialize)]
#[serde(untagged)]
enum ParametersRepr {
    /// `{"Material": "Leather"}`.
    Map(IndexMap<String, String>),
    /// `[{"name": "Material", "value": "Leather"}]`.
    List(Vec<ParameterPair>),
}

impl From<ParametersRepr> for IndexMap<String, String> {
    fn from(repr: ParametersRepr) -> Self {
        match repr {
            ParametersRepr::Map(map) => map,
            ParametersRepr::List(pairs) => pairs
                .into_iter()
                .map(|pair| (pair.name, pair.value))
                .collect(),
        }
    }
}

/// Parses a decimal; blank input counts as zero.
fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Coerces a form string into a number.
///
/// Blank input is treated as `0`, matching how the dashboard forms submit an
/// untouched numeric field.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidField`] if `raw` is not a finite
/// decimal number.
#[inline]
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    parse_decimal(raw).ok_or_else(|| DashboardError::InvalidField {
        field,
        reason: format!("expected a number, got {raw:?}"),
    })
}

/// Removes repeated tags, keeping the first occurrence of each.
#[inline]
#[must_use]
pub fn dedup_tags(mut tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tags.len());
    tags.retain(|tag| seen.insert(tag.clone()));
    tags
}

/// Converts a number-or-string into `f64`.
fn to_number<E: serde::de::Error>(value: NumberOrString) -> core::result::Result<f64, E> {
    match value {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::Text(text) => parse_decimal(&text)
            .ok_or_else(|| E::custom(format!("expected a number, got {text:?}"))),
    }
}

/// Deserializes a number given either as a JSON number or a numeric string.
pub(crate) fn number<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<f64, D::Error> {
    to_number(NumberOrString::deserialize(deserializer)?)
}

/// Like [`number`], but `null`, absent and blank strings mean "no change".
pub(crate) fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<Option<f64>, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(value) => to_number(value).map(Some),
    }
}

/// Deserializes a string, accepting a JSON number in its place.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<String, D::Error> {
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => number.to_string(),
        NumberOrString::Text(text) => text,
    })
}

/// Optional form of [`string_or_number`].
pub(crate) fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<Option<String>, D::Error> {
    Ok(
        Option::<NumberOrString>::deserialize(deserializer)?.map(|value| match value {
            NumberOrString::Number(number) => number.to_string(),
            NumberOrString::Text(text) => text,
        }),
    )
}

/// Deserializes a tag list, dropping duplicates.
pub(crate) fn tags<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<Vec<String>, D::Error> {
    Vec::<String>::deserialize(deserializer).map(dedup_tags)
}

/// Optional form of [`tags`].
pub(crate) fn optional_tags<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.map(dedup_tags))
}

/// Deserializes product parameters from either representation.
pub(crate) fn parameters<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<IndexMap<String, String>, D::Error> {
    ParametersRepr::deserialize(deserializer)
        .map(Into::into)
        .map_err(|err| D::Error::custom(format!("invalid parameters: {err}")))
}

/// Optional form of [`parameters`].
pub(crate) fn optional_parameters<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<Option<IndexMap<String, String>>, D::Error> {
    Ok(Option::<ParametersRepr>::deserialize(deserializer)?.map(Into::into))
}
