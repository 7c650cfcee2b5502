//! Enumeration types for constrained values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// How an offer amount is interpreted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    /// A fixed amount off the price.
    #[default]
    Amount,
    /// A percentage off the price.
    Percent,
}

/// Whether a merchant or product is currently offered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Visible and purchasable.
    #[default]
    Active,
    /// Hidden from the storefront.
    Inactive,
}

impl OfferType {
    /// Returns the wire name of the variant.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Percent => "percent",
        }
    }
}

impl Status {
    /// Returns the wire name of the variant.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for OfferType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferType {
    type Err = DashboardError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amount" => Ok(Self::Amount),
            "percent" => Ok(Self::Percent),
            other => Err(DashboardError::InvalidField {
                field: "offerType",
                reason: format!("expected `amount` or `percent`, got {other:?}"),
            }),
        }
    }
}

impl FromStr for Status {
    type Err = DashboardError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(DashboardError::InvalidField {
                field: "status",
                reason: format!("expected `active` or `inactive`, got {other:?}"),
            }),
        }
    }
}
