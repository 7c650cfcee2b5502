//! Backends that hold merchants and products.
//!
//! This module defines the [`Backend`] (async) and [`BlockingBackend`]
//! (blocking) traits via a shared macro. Both the HTTP clients in
//! [`crate::client`] and the [`InMemoryStore`] implement them, so the
//! action layer and the fallback server can run over either.

mod memory;

pub use memory::InMemoryStore;

/// Generates a backend trait with the ten CRUD methods.
///
/// The method list is written once under `@methods`; `@method` renders each
/// entry either as a plain `fn` or as one returning `impl Future + Send`.
macro_rules! define_backend {
    // ── Entry points ────────────────────────────────────────────────
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: async_mode,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_backend!(@methods async_mode);
        }
    };
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: blocking,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_backend!(@methods blocking);
        }
    };

    // ── Single method list (shared between both variants) ───────────
    (@methods $mode:ident) => {
        // Merchants
        define_backend!(@method $mode, list_merchants,
            "Returns every merchant in insertion order, each with its products.\n\n# Errors\n\nReturns an error if the backend cannot be reached or answers with a failure.",
            -> Result<Vec<Merchant>>);
        define_backend!(@method $mode, create_merchant,
            "Creates a merchant, assigning the next sequential ID when none is given.\n\n# Errors\n\nReturns `DashboardError::MissingFields` if a required field is blank,\n`DashboardError::DuplicateId` if the supplied ID is taken, or a\ntransport error.",
            input: NewMerchant, -> Result<Merchant>);
        define_backend!(@method $mode, read_merchant,
            "Returns the merchant with the given ID.\n\n# Errors\n\nReturns `DashboardError::NotFound` if no merchant has this ID, or a\ntransport error.",
            id: &MerchantId, -> Result<Merchant>);
        define_backend!(@method $mode, update_merchant,
            "Merges `patch` into the merchant with the given ID and returns the result.\n\n# Errors\n\nReturns `DashboardError::NotFound` if no merchant has this ID, or a\nvalidation or transport error.",
            id: &MerchantId, patch: MerchantPatch, -> Result<Merchant>);
        define_backend!(@method $mode, delete_merchant,
            "Removes the merchant with the given ID. Its products are kept.\n\n# Errors\n\nReturns `DashboardError::NotFound` if no merchant has this ID, or a\ntransport error.",
            id: &MerchantId, -> Result<()>);

        // Products
        define_backend!(@method $mode, list_products,
            "Returns every product in insertion order.\n\n# Errors\n\nReturns an error if the backend cannot be reached or answers with a failure.",
            -> Result<Vec<Product>>);
        define_backend!(@method $mode, create_product,
            "Creates a product, assigning the next sequential ID when none is given.\n\n# Errors\n\nReturns `DashboardError::MissingFields` if a required field is blank,\n`DashboardError::UnknownMerchant` if the owner does not exist,\n`DashboardError::DuplicateId` if the supplied ID is taken, or a\ntransport error.",
            input: NewProduct, -> Result<Product>);
        define_backend!(@method $mode, read_product,
            "Returns the product with the given ID.\n\n# Errors\n\nReturns `DashboardError::NotFound` if no product has this ID, or a\ntransport error.",
            id: &ProductId, -> Result<Product>);
        define_backend!(@method $mode, update_product,
            "Merges `patch` into the product with the given ID and returns the result.\n\n# Errors\n\nReturns `DashboardError::NotFound` if no product has this ID, or a\nvalidation or transport error.",
            id: &ProductId, patch: ProductPatch, -> Result<Product>);
        define_backend!(@method $mode, delete_product,
            "Removes the product with the given ID.\n\n# Errors\n\nReturns `DashboardError::NotFound` if no product has this ID, or a\ntransport error.",
            id: &ProductId, -> Result<()>);
    };

    // ── Blocking method renderer ────────────────────────────────────
    (@method blocking, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*) -> $ret;
    };

    // ── Async method renderer (returns impl Future + Send) ──────────
    (@method async_mode, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*)
            -> impl core::future::Future<Output = $ret> + Send;
    };
}

#[cfg(feature = "async")]
mod async_backend {
    //! Async backend trait definition.

    use crate::error::Result;
    use crate::models::{
        Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, Product, ProductId,
        ProductPatch,
    };

    define_backend! {
        trait_name: Backend,
        trait_doc: "Async backend holding merchants and products.\n\nAll methods take `&self`; implementations use interior mutability\n(e.g. `Mutex`) or a shared HTTP connection pool.",
        mode: async_mode,
    }
}

#[cfg(feature = "blocking")]
mod blocking_backend {
    //! Blocking backend trait definition.

    use crate::error::Result;
    use crate::models::{
        Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, Product, ProductId,
        ProductPatch,
    };

    define_backend! {
        trait_name: BlockingBackend,
        trait_doc: "Blocking backend holding merchants and products.\n\nAll methods take `&self`; implementations use interior mutability\n(e.g. `Mutex`) or a shared HTTP connection pool.",
        mode: blocking,
    }
}

#[cfg(feature = "async")]
pub use async_backend::Backend;
#[cfg(feature = "blocking")]
pub use blocking_backend::BlockingBackend;
