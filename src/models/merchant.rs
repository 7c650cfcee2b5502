//! Merchant model and its create/update inputs.

use serde::{Deserialize, Serialize};

use super::coerce;
use super::{MerchantId, OfferType, Product, Status};
use crate::error::{DashboardError, Result};

/// Wire names of the fields a new merchant must carry.
const REQUIRED: [&str; 3] = ["merchantName", "merchantLogoUrl", "merchantUrl"];

/// A merchant storefront with its best offer and products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    /// Unique identifier (`M` + six digits), immutable once assigned.
    #[serde(rename = "merchant_id")]
    pub id: MerchantId,
    /// Display name.
    #[serde(rename = "merchantName")]
    pub name: String,
    /// Logo image URL.
    #[serde(rename = "merchantLogoUrl", default)]
    pub logo_url: String,
    /// Storefront URL.
    #[serde(rename = "merchantUrl", default)]
    pub url: String,
    /// Free-text description.
    #[serde(rename = "merchantDescription", default)]
    pub description: String,
    /// Best offer amount, kept as the numeric string the form submitted.
    #[serde(
        rename = "bestMerchantOfferAmount",
        default,
        deserialize_with = "coerce::string_or_number"
    )]
    pub best_offer_amount: String,
    /// How [`Self::best_offer_amount`] is interpreted.
    #[serde(rename = "bestMerchantOfferAmountType", default)]
    pub best_offer_type: OfferType,
    /// Whether the merchant is active.
    #[serde(rename = "merchantStatus", default)]
    pub status: Status,
    /// Products owned by this merchant, in insertion order.
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Input for creating a merchant.
///
/// The identifier is normally left empty and assigned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMerchant {
    /// Explicit identifier; assigned by the backend when absent.
    #[serde(rename = "merchant_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MerchantId>,
    /// Display name (required).
    #[serde(rename = "merchantName", default)]
    pub name: String,
    /// Logo image URL (required).
    #[serde(rename = "merchantLogoUrl", default)]
    pub logo_url: String,
    /// Storefront URL (required).
    #[serde(rename = "merchantUrl", default)]
    pub url: String,
    /// Free-text description.
    #[serde(rename = "merchantDescription", default)]
    pub description: String,
    /// Best offer amount as a numeric string.
    #[serde(
        rename = "bestMerchantOfferAmount",
        default,
        deserialize_with = "coerce::string_or_number"
    )]
    pub best_offer_amount: String,
    /// Best offer type.
    #[serde(rename = "bestMerchantOfferAmountType", default)]
    pub best_offer_type: OfferType,
    /// Initial status.
    #[serde(rename = "merchantStatus", default)]
    pub status: Status,
}

impl NewMerchant {
    /// Creates an input with the required fields set and defaults elsewhere.
    #[inline]
    #[must_use]
    pub fn new<N, L, U>(name: N, logo_url: L, url: U) -> Self
    where
        N: Into<String>,
        L: Into<String>,
        U: Into<String>,
    {
        Self {
            name: name.into(),
            logo_url: logo_url.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns the wire names of required fields that are blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [&self.name, &self.logo_url, &self.url]
            .into_iter()
            .zip(REQUIRED)
            .filter(|&(value, _)| value.trim().is_empty())
            .map(|(_, field)| field)
            .collect()
    }

    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MissingFields`] listing each blank field.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DashboardError::MissingFields(missing))
        }
    }

    /// Turns the input into a stored merchant with the given identifier.
    #[inline]
    #[must_use]
    pub fn into_merchant(self, id: MerchantId) -> Merchant {
        Merchant {
            id,
            name: self.name,
            logo_url: self.logo_url,
            url: self.url,
            description: self.description,
            best_offer_amount: self.best_offer_amount,
            best_offer_type: self.best_offer_type,
            status: self.status,
            products: Vec::new(),
        }
    }
}

/// Partial update of a merchant; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantPatch {
    /// New display name.
    #[serde(rename = "merchantName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New logo URL.
    #[serde(rename = "merchantLogoUrl", default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// New storefront URL.
    #[serde(rename = "merchantUrl", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New description.
    #[serde(
        rename = "merchantDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// New best offer amount.
    #[serde(
        rename = "bestMerchantOfferAmount",
        default,
        deserialize_with = "coerce::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub best_offer_amount: Option<String>,
    /// New best offer type.
    #[serde(
        rename = "bestMerchantOfferAmountType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub best_offer_type: Option<OfferType>,
    /// New status.
    #[serde(rename = "merchantStatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl MerchantPatch {
    /// Returns `true` if the patch changes nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks that the patch does not blank out a required field.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MissingFields`] listing each required field
    /// the patch would set to an empty string.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = [&self.name, &self.logo_url, &self.url]
            .into_iter()
            .zip(REQUIRED)
            .filter(|&(value, _)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
            .map(|(_, field)| field)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DashboardError::MissingFields(missing))
        }
    }

    /// Merges the present fields into `merchant`.
    pub fn apply_to(self, merchant: &mut Merchant) {
        if let Some(name) = self.name {
            merchant.name = name;
        }
        if let Some(logo_url) = self.logo_url {
            merchant.logo_url = logo_url;
        }
        if let Some(url) = self.url {
            merchant.url = url;
        }
        if let Some(description) = self.description {
            merchant.description = description;
        }
        if let Some(amount) = self.best_offer_amount {
            merchant.best_offer_amount = amount;
        }
        if let Some(offer_type) = self.best_offer_type {
            merchant.best_offer_type = offer_type;
        }
        if let Some(status) = self.status {
            merchant.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amazon() -> Merchant {
        NewMerchant::new(
            "Amazon",
            "https://www.amazon.com/logo",
            "https://www.amazon.com",
        )
        .into_merchant(MerchantId::from("M000001"))
    }

    #[test]
    fn deserialize_merchant() {
        let json = r#"{
            "merchant_id": "M000001",
            "merchantName": "Amazon",
            "merchantLogoUrl": "https://www.amazon.com/logo",
            "merchantUrl": "https://www.amazon.com",
            "merchantDescription": "Everything store",
            "bestMerchantOfferAmount": "10",
            "bestMerchantOfferAmountType": "percent",
            "merchantStatus": "active",
            "products": []
        }"#;
        let merchant: Merchant = serde_json::from_str(json).unwrap();
        assert_eq!(merchant.id, MerchantId::from("M000001"));
        assert_eq!(merchant.name, "Amazon");
        assert_eq!(merchant.best_offer_amount, "10");
        assert_eq!(merchant.best_offer_type, OfferType::Percent);
        assert!(merchant.products.is_empty());
    }

    #[test]
    fn serialize_uses_wire_names() {
        let value = serde_json::to_value(amazon()).unwrap();
        assert_eq!(value["merchant_id"], "M000001");
        assert_eq!(value["merchantName"], "Amazon");
        assert_eq!(value["bestMerchantOfferAmountType"], "amount");
        assert_eq!(value["merchantStatus"], "active");
        assert!(value["products"].as_array().unwrap().is_empty());
    }

    #[test]
    fn new_merchant_missing_url_is_rejected() {
        let input = NewMerchant::new("Amazon", "https://www.amazon.com/logo", "");
        assert_eq!(input.missing_fields(), vec!["merchantUrl"]);
        assert!(matches!(
            input.validate(),
            Err(DashboardError::MissingFields(fields)) if fields == vec!["merchantUrl"]
        ));
    }

    #[test]
    fn new_merchant_reports_all_missing_fields() {
        let input = NewMerchant::default();
        assert_eq!(
            input.missing_fields(),
            vec!["merchantName", "merchantLogoUrl", "merchantUrl"]
        );
    }

    #[test]
    fn new_merchant_accepts_numeric_offer() {
        let json = r#"{
            "merchantName": "Flipkart",
            "merchantLogoUrl": "https://www.flipkart.com/logo",
            "merchantUrl": "https://www.flipkart.com",
            "bestMerchantOfferAmount": 250
        }"#;
        let input: NewMerchant = serde_json::from_str(json).unwrap();
        assert_eq!(input.best_offer_amount, "250");
        assert_eq!(input.status, Status::Active);
        assert!(input.id.is_none());
        input.validate().unwrap();
    }

    #[test]
    fn patch_applies_present_fields_only() {
        let mut merchant = amazon();
        let patch: MerchantPatch =
            serde_json::from_str(r#"{"merchantName": "Amazon India", "merchantStatus": "inactive"}"#)
                .unwrap();
        patch.validate().unwrap();
        patch.apply_to(&mut merchant);
        assert_eq!(merchant.name, "Amazon India");
        assert_eq!(merchant.status, Status::Inactive);
        assert_eq!(merchant.url, "https://www.amazon.com");
        assert_eq!(merchant.id, MerchantId::from("M000001"));
    }

    #[test]
    fn patch_cannot_blank_required_field() {
        let patch = MerchantPatch {
            logo_url: Some("  ".to_owned()),
            ..MerchantPatch::default()
        };
        assert!(matches!(
            patch.validate(),
            Err(DashboardError::MissingFields(fields)) if fields == vec!["merchantLogoUrl"]
        ));
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = MerchantPatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }
}
