//! Product model and its create/update inputs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::coerce;
use super::{MerchantId, OfferType, ProductId, Status};
use crate::error::{DashboardError, Result};

/// Wire name of the price field.
const PRICE_FIELD: &str = "merchantProductPrice";

/// A product sold by a merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (`P` + six digits), immutable once assigned.
    #[serde(rename = "product_id")]
    pub id: ProductId,
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// Display name.
    #[serde(rename = "merchantProductName")]
    pub name: String,
    /// Free-text description.
    #[serde(rename = "merchantProductDescription", default)]
    pub description: String,
    /// Price; never negative.
    #[serde(
        rename = "merchantProductPrice",
        default,
        deserialize_with = "coerce::number"
    )]
    pub price: f64,
    /// Offer amount, interpreted per [`Self::offer_type`].
    #[serde(
        rename = "merchantProductOfferAmount",
        default,
        deserialize_with = "coerce::number"
    )]
    pub offer_amount: f64,
    /// Offer type.
    #[serde(rename = "merchantProductOfferType", default)]
    pub offer_type: OfferType,
    /// Product image URL.
    #[serde(rename = "merchantProductImageUrl", default)]
    pub image_url: String,
    /// Product page URL.
    #[serde(rename = "merchantProductUrl", default)]
    pub url: String,
    /// Whether the product is active.
    #[serde(rename = "merchantProductStatus", default)]
    pub status: Status,
    /// Tags in insertion order, without duplicates.
    #[serde(rename = "merchantProductTag", default, deserialize_with = "coerce::tags")]
    pub tags: Vec<String>,
    /// Named attributes (material, colour, ...) in submitted order.
    #[serde(
        rename = "merchantProductParameters",
        default,
        deserialize_with = "coerce::parameters"
    )]
    pub parameters: IndexMap<String, String>,
}

/// Rejects negative prices.
fn check_price(price: f64) -> Result<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(DashboardError::InvalidField {
            field: PRICE_FIELD,
            reason: format!("price must be a non-negative number, got {price}"),
        })
    }
}

/// Input for creating a product.
///
/// Numeric fields accept numeric strings on the wire and are stored as
/// numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Explicit identifier; assigned by the backend when absent.
    #[serde(rename = "product_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Owning merchant (required).
    #[serde(default)]
    pub merchant_id: MerchantId,
    /// Display name (required).
    #[serde(rename = "merchantProductName", default)]
    pub name: String,
    /// Description (required).
    #[serde(rename = "merchantProductDescription", default)]
    pub description: String,
    /// Price.
    #[serde(
        rename = "merchantProductPrice",
        default,
        deserialize_with = "coerce::number"
    )]
    pub price: f64,
    /// Offer amount.
    #[serde(
        rename = "merchantProductOfferAmount",
        default,
        deserialize_with = "coerce::number"
    )]
    pub offer_amount: f64,
    /// Offer type.
    #[serde(rename = "merchantProductOfferType", default)]
    pub offer_type: OfferType,
    /// Product image URL.
    #[serde(rename = "merchantProductImageUrl", default)]
    pub image_url: String,
    /// Product page URL.
    #[serde(rename = "merchantProductUrl", default)]
    pub url: String,
    /// Initial status.
    #[serde(rename = "merchantProductStatus", default)]
    pub status: Status,
    /// Tags.
    #[serde(rename = "merchantProductTag", default, deserialize_with = "coerce::tags")]
    pub tags: Vec<String>,
    /// Named attributes.
    #[serde(
        rename = "merchantProductParameters",
        default,
        deserialize_with = "coerce::parameters"
    )]
    pub parameters: IndexMap<String, String>,
}

impl NewProduct {
    /// Creates an input with the required fields set and defaults elsewhere.
    #[inline]
    #[must_use]
    pub fn new<N, D>(merchant_id: MerchantId, name: N, description: D, price: f64) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self {
            merchant_id,
            name: name.into(),
            description: description.into(),
            price,
            ..Self::default()
        }
    }

    /// Returns the wire names of required fields that are blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (self.name.as_str(), "merchantProductName"),
            (self.description.as_str(), "merchantProductDescription"),
            (self.merchant_id.as_inner(), "merchant_id"),
        ]
        .into_iter()
        .filter(|&(value, _)| value.trim().is_empty())
        .map(|(_, field)| field)
        .collect()
    }

    /// Checks required fields and the price.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MissingFields`] listing each blank field, or
    /// [`DashboardError::InvalidField`] for a negative price.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DashboardError::MissingFields(missing));
        }
        check_price(self.price)
    }

    /// Turns the input into a stored product with the given identifier.
    #[inline]
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            merchant_id: self.merchant_id,
            name: self.name,
            description: self.description,
            price: self.price,
            offer_amount: self.offer_amount,
            offer_type: self.offer_type,
            image_url: self.image_url,
            url: self.url,
            status: self.status,
            tags: coerce::dedup_tags(self.tags),
            parameters: self.parameters,
        }
    }
}

/// Partial update of a product; absent fields are left untouched.
///
/// The owning merchant cannot be changed through an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    /// New display name.
    #[serde(
        rename = "merchantProductName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// New description.
    #[serde(
        rename = "merchantProductDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// New price; blank strings on the wire leave the price untouched.
    #[serde(
        rename = "merchantProductPrice",
        default,
        deserialize_with = "coerce::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    /// New offer amount; blank strings leave it untouched.
    #[serde(
        rename = "merchantProductOfferAmount",
        default,
        deserialize_with = "coerce::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub offer_amount: Option<f64>,
    /// New offer type.
    #[serde(
        rename = "merchantProductOfferType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub offer_type: Option<OfferType>,
    /// New image URL.
    #[serde(
        rename = "merchantProductImageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// New product page URL.
    #[serde(
        rename = "merchantProductUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    /// New status.
    #[serde(
        rename = "merchantProductStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Status>,
    /// Replacement tag list.
    #[serde(
        rename = "merchantProductTag",
        default,
        deserialize_with = "coerce::optional_tags",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
    /// Replacement parameter map.
    #[serde(
        rename = "merchantProductParameters",
        default,
        deserialize_with = "coerce::optional_parameters",
        skip_serializing_if = "Option::is_none"
    )]
    pub parameters: Option<IndexMap<String, String>>,
}

impl ProductPatch {
    /// Returns `true` if the patch changes nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks that the patch keeps required fields non-blank and the price
    /// non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MissingFields`] or
    /// [`DashboardError::InvalidField`].
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = [
            (self.name.as_deref(), "merchantProductName"),
            (self.description.as_deref(), "merchantProductDescription"),
        ]
        .into_iter()
        .filter(|&(value, _)| value.is_some_and(|v| v.trim().is_empty()))
        .map(|(_, field)| field)
        .collect();
        if !missing.is_empty() {
            return Err(DashboardError::MissingFields(missing));
        }
        self.price.map_or(Ok(()), check_price)
    }

    /// Merges the present fields into `product`.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(offer_amount) = self.offer_amount {
            product.offer_amount = offer_amount;
        }
        if let Some(offer_type) = self.offer_type {
            product.offer_type = offer_type;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        if let Some(url) = self.url {
            product.url = url;
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(tags) = self.tags {
            product.tags = coerce::dedup_tags(tags);
        }
        if let Some(parameters) = self.parameters {
            product.parameters = parameters;
        }
    }
}
