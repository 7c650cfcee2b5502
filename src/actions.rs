//! Action layer: backend calls normalized into a uniform result.
//!
//! Every operation of the [`Actions`] / [`BlockingActions`] wrappers issues
//! one backend call and never returns an error. Failures are logged and
//! reported as [`ActionResult::Failure`] with a readable message; successes
//! carry the payload. On the wire the result is
//! `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.

use serde::ser::SerializeStruct as _;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;

/// Outcome of an action: the payload, or a failure message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Envelope<T>")]
pub enum ActionResult<T> {
    /// The call succeeded.
    Success(T),
    /// The call failed; the message names the action and its cause.
    Failure(String),
}

/// Wire shape of [`ActionResult`].
#[derive(Deserialize)]
struct Envelope<T> {
    /// Discriminant.
    success: bool,
    /// Payload on success.
    data: Option<T>,
    /// Message on failure.
    error: Option<String>,
}

impl<T> TryFrom<Envelope<T>> for ActionResult<T> {
    type Error = String;

    fn try_from(envelope: Envelope<T>) -> core::result::Result<Self, Self::Error> {
        match (envelope.success, envelope.data, envelope.error) {
            (true, Some(data), _) => Ok(Self::Success(data)),
            (true, None, _) => Err("successful result without `data`".to_owned()),
            (false, _, error) => Ok(Self::Failure(
                error.unwrap_or_else(|| "unknown error".to_owned()),
            )),
        }
    }
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ActionResult", 2)?;
        match *self {
            Self::Success(ref data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(ref error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

impl<T> ActionResult<T> {
    /// Converts a backend result, logging the failure under `context`.
    #[cfg(any(feature = "async", feature = "blocking", test))]
    fn settle(result: Result<T>, context: &str) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => {
                tracing::error!(error = %err, "{context}");
                Self::Failure(format!("{context}: {err}"))
            }
        }
    }

    /// Returns `true` for [`ActionResult::Success`].
    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(*self, Self::Success(_))
    }

    /// Returns the payload, if any.
    #[inline]
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match *self {
            Self::Success(ref data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure message, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match *self {
            Self::Success(_) => None,
            Self::Failure(ref message) => Some(message),
        }
    }

    /// Converts into a standard `Result` with the message as the error.
    ///
    /// # Errors
    ///
    /// Returns the failure message for [`ActionResult::Failure`].
    #[inline]
    pub fn into_result(self) -> core::result::Result<T, String> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(message) => Err(message),
        }
    }

    /// Returns the payload, or `T::default()` on failure.
    ///
    /// For list actions this gives the "empty collection on failure"
    /// behaviour.
    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Success(data) => data,
            Self::Failure(_) => T::default(),
        }
    }

    /// Maps the payload, leaving failures untouched.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ActionResult<U> {
        match self {
            Self::Success(data) => ActionResult::Success(f(data)),
            Self::Failure(message) => ActionResult::Failure(message),
        }
    }
}

/// Generates an action wrapper (async or blocking) over a backend trait.
macro_rules! define_actions {
    (
        actions_name: $actions:ident,
        backend_trait: $backend:ident,
        actions_doc: $actions_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $actions_doc]
        #[derive(Debug, Clone)]
        pub struct $actions<B: $backend> {
            /// Backend the actions call into.
            backend: B,
        }

        impl<B: $backend> $actions<B> {
            /// Wraps a backend.
            #[inline]
            #[must_use]
            pub const fn new(backend: B) -> Self {
                Self { backend }
            }

            /// Returns the wrapped backend.
            #[inline]
            #[must_use]
            pub const fn backend(&self) -> &B {
                &self.backend
            }

            /// Fetches every merchant.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn fetch_merchants(&self) -> ActionResult<Vec<Merchant>> {
                let result = self.backend.list_merchants() $( .$await_ext )?;
                ActionResult::settle(result, "Failed to fetch merchants")
            }

            /// Creates a merchant.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn add_merchant(&self, input: NewMerchant) -> ActionResult<Merchant> {
                let result = self.backend.create_merchant(input) $( .$await_ext )?;
                ActionResult::settle(result, "Failed to add merchant")
            }

            /// Fetches one merchant with its products.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn fetch_merchant(&self, id: &MerchantId) -> ActionResult<Merchant> {
                let result = self.backend.read_merchant(id) $( .$await_ext )?;
                ActionResult::settle(result, "Failed to fetch merchant")
            }

            /// Applies a partial update to a merchant.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn update_merchant(
                &self,
                id: &MerchantId,
                patch: MerchantPatch,
            ) -> ActionResult<Merchant> {
                let result = self.backend.update_merchant(id, patch) $( .$await_ext )?;
                ActionResult::settle(result, "Failed to update merchant")
            }

            /// Deletes a merchant, returning its ID.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete_merchant(&self, id: &MerchantId) -> ActionResult<MerchantId> {
                let result = self
                    .backend
                    .delete_merchant(id)
                    $( .$await_ext )?
                    .map(|()| id.clone());
                ActionResult::settle(result, "Failed to delete merchant")
            }

            /// Fetches every product.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn fetch_products(&self) -> ActionResult<Vec<Product>> {
                let result = self.backend.list_products() $( .$await_ext )?;
                ActionResult::settle(result, "Failed to fetch merchant products")
            }

            /// Creates a product.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn add_product(&self, input: NewProduct) -> ActionResult<Product> {
                let result = self.backend.create_product(input) $( .$await_ext )?;
                ActionResult::settle(result, "Failed to add merchant product")
            }

            /// Fetches one product.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn fetch_product(&self, id: &ProductId) -> ActionResult<Product> {
                let result = self.backend.read_product(id) $( .$await_ext )?;
                ActionResult::settle(result, "Failed to fetch merchant product")
            }

            /// Applies a partial update to a product.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn update_product(
                &self,
                id: &ProductId,
                patch: ProductPatch,
            ) -> ActionResult<Product> {
                let result = self.backend.update_product(id, patch) $( .$await_ext )?;
                ActionResult::settle(result, "Failed to update merchant product")
            }

            /// Deletes a product, returning its ID.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete_product(&self, id: &ProductId) -> ActionResult<ProductId> {
                let result = self
                    .backend
                    .delete_product(id)
                    $( .$await_ext )?
                    .map(|()| id.clone());
                ActionResult::settle(result, "Failed to delete merchant product")
            }
        }
    };
}

#[cfg(feature = "async")]
mod async_actions {
    //! Async action wrapper.

    use super::ActionResult;
    use crate::backend::Backend;
    use crate::models::{
        Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, Product, ProductId,
        ProductPatch,
    };

    define_actions! {
        actions_name: Actions,
        backend_trait: Backend,
        actions_doc: "Async action layer over a [`Backend`].\n\nUse [`Actions::new()`] with an [`crate::backend::InMemoryStore`] or a\n[`crate::client::DashboardClient`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_actions {
    //! Blocking action wrapper.

    use super::ActionResult;
    use crate::backend::BlockingBackend;
    use crate::models::{
        Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, Product, ProductId,
        ProductPatch,
    };

    define_actions! {
        actions_name: BlockingActions,
        backend_trait: BlockingBackend,
        actions_doc: "Blocking action layer over a [`BlockingBackend`].\n\nUse [`BlockingActions::new()`] with an [`crate::backend::InMemoryStore`] or\na [`crate::client::DashboardBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_actions::Actions;
#[cfg(feature = "blocking")]
pub use blocking_actions::BlockingActions;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    #[test]
    fn success_serializes_with_data() {
        let result = ActionResult::Success(vec![1_u32, 2_u32]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn failure_serializes_with_error() {
        let result: ActionResult<u32> = ActionResult::Failure("Failed to add merchant".to_owned());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Failed to add merchant"})
        );
    }

    #[test]
    fn deserializes_both_shapes() {
        let ok: ActionResult<String> =
            serde_json::from_str(r#"{"success": true, "data": "M000001"}"#).unwrap();
        assert_eq!(ok.data().map(String::as_str), Some("M000001"));
        let failed: ActionResult<String> =
            serde_json::from_str(r#"{"success": false, "error": "boom"}"#).unwrap();
        assert_eq!(failed.error(), Some("boom"));
        assert!(serde_json::from_str::<ActionResult<String>>(r#"{"success": true}"#).is_err());
    }

    #[test]
    fn deserializes_payload_without_default() {
        let ok: ActionResult<crate::models::Merchant> = serde_json::from_str(
            r#"{"success": true, "data": {"merchant_id": "M000001", "merchantName": "Amazon"}}"#,
        )
        .unwrap();
        assert_eq!(ok.data().map(|merchant| merchant.name.as_str()), Some("Amazon"));
        let failed: ActionResult<crate::models::Merchant> =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(failed.error(), Some("unknown error"));
    }

    #[test]
    fn settle_prefixes_context() {
        let result: ActionResult<()> = ActionResult::settle(
            Err(DashboardError::MissingFields(vec!["merchantUrl"])),
            "Failed to add merchant",
        );
        assert_eq!(
            result.error(),
            Some("Failed to add merchant: missing required fields: merchantUrl")
        );
        assert!(!result.is_success());
    }

    #[test]
    fn unwrap_or_default_gives_empty_list_on_failure() {
        let failed: ActionResult<Vec<u8>> = ActionResult::Failure("down".to_owned());
        assert!(failed.unwrap_or_default().is_empty());
        let ok = ActionResult::Success(vec![7_u8]);
        assert_eq!(ok.clone().into_result(), Ok(vec![7_u8]));
        assert_eq!(ok.map(|items| items.len()).data(), Some(&1));
    }

    #[cfg(feature = "blocking")]
    mod blocking {
        use super::*;
        use crate::backend::InMemoryStore;
        use crate::models::{MerchantId, NewMerchant, NewProduct, ProductId, ProductPatch};

        #[test]
        fn add_then_fetch_merchant() {
            let actions = BlockingActions::new(InMemoryStore::new());
            let added = actions.add_merchant(NewMerchant::new(
                "Acme",
                "https://acme.test/logo.png",
                "https://acme.test",
            ));
            let id = added.data().map(|merchant| merchant.id.clone()).unwrap();
            assert_eq!(id, MerchantId::from("M000001"));
            let fetched = actions.fetch_merchant(&id);
            assert_eq!(fetched.data().map(|m| m.name.as_str()), Some("Acme"));
        }

        #[test]
        fn missing_field_becomes_failure() {
            let actions = BlockingActions::new(InMemoryStore::new());
            let added = actions.add_merchant(NewMerchant::new("Acme", "logo", ""));
            assert!(added.error().unwrap().starts_with("Failed to add merchant"));
            assert!(actions.fetch_merchants().unwrap_or_default().is_empty());
        }

        #[test]
        fn delete_returns_id_and_second_delete_fails() {
            let actions = BlockingActions::new(InMemoryStore::with_demo_data());
            let id = ProductId::from("P000001");
            assert_eq!(actions.delete_product(&id), ActionResult::Success(id.clone()));
            let again = actions.delete_product(&id);
            assert!(again.error().unwrap().contains("product not found"));
        }

        #[test]
        fn product_update_and_fetch() {
            let actions = BlockingActions::new(InMemoryStore::with_demo_data());
            let created = actions.add_product(NewProduct::new(
                MerchantId::from("M000002"),
                "Kurta",
                "Cotton kurta",
                799.0,
            ));
            let id = created.data().map(|product| product.id.clone()).unwrap();
            assert_eq!(id.as_inner(), "P000003");
            let patch = ProductPatch {
                name: Some("Linen Kurta".to_owned()),
                ..ProductPatch::default()
            };
            assert!(actions.update_product(&id, patch).is_success());
            let fetched = actions.fetch_product(&id).into_result().unwrap();
            assert_eq!(fetched.name, "Linen Kurta");
            assert_eq!(actions.fetch_products().unwrap_or_default().len(), 3);
        }
    }

    #[cfg(feature = "async")]
    mod async_tests {
        use super::*;
        use crate::backend::InMemoryStore;
        use crate::models::{MerchantId, MerchantPatch, Status};

        #[tokio::test]
        async fn update_merchant_status() {
            let actions = Actions::new(InMemoryStore::with_demo_data());
            let id = MerchantId::from("M000002");
            let patch = MerchantPatch {
                status: Some(Status::Inactive),
                ..MerchantPatch::default()
            };
            let updated = actions.update_merchant(&id, patch).await;
            assert_eq!(updated.data().map(|m| m.status), Some(Status::Inactive));
        }

        #[tokio::test]
        async fn fetch_missing_merchant_fails() {
            let actions = Actions::new(InMemoryStore::new());
            let fetched = actions.fetch_merchant(&MerchantId::from("M000404")).await;
            assert_eq!(
                fetched.error(),
                Some("Failed to fetch merchant: merchant not found: M000404")
            );
        }

        #[tokio::test]
        async fn fetch_products_lists_demo_catalogue() {
            let actions = Actions::new(InMemoryStore::with_demo_data());
            let products = actions.fetch_products().await.unwrap_or_default();
            assert_eq!(products.len(), 2);
        }
    }
}
