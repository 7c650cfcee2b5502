//! Data models for merchants and products.
//!
//! This module contains the stored entity types, the typed inputs used to
//! create and update them, prefixed ID wrappers, and enumeration types for
//! constrained values. Field names on the wire follow the dashboard's
//! historical JSON shape (`merchantName`, `merchantProductPrice`, ...).

mod coerce;
mod enums;
mod ids;
mod merchant;
mod product;

pub use coerce::{dedup_tags, parse_number};
pub use enums::{OfferType, Status};
pub use ids::{ID_DIGITS, MerchantId, ProductId, format_id, next_id, parse_id};
pub use merchant::{Merchant, MerchantPatch, NewMerchant};
pub use product::{NewProduct, Product, ProductPatch};
