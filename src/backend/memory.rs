//! In-memory fallback backend.
//!
//! Provides [`InMemoryStore`], a thread-safe in-process implementation of
//! the backend traits. It serves the fallback HTTP routes and doubles as a
//! zero-setup backend for tests.

use std::sync::{Mutex, PoisonError};

#[cfg(feature = "async")]
use core::future::{self, Future};

use indexmap::IndexMap;

use crate::error::{DashboardError, Result};
use crate::models::{
    Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, OfferType, Product, ProductId,
    ProductPatch, Status,
};

/// Thread-safe in-memory store for merchants and products.
///
/// This type implements both [`super::Backend`] (async) and
/// [`super::BlockingBackend`] (blocking) traits.
///
/// # ID allocation
///
/// Each entity type keeps the highest identifier ever stored. A create
/// without an explicit ID takes the one after it, so identifiers are
/// sequential and never reused after a delete. Allocation and insertion
/// happen under the same lock.
///
/// # Example
///
/// ```rust
/// use merchant_dashboard::backend::InMemoryStore;
///
/// let store = InMemoryStore::with_demo_data();
/// // Serve it over HTTP, or wrap it in the action layer:
/// // Actions::new(store)
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<Collections>,
}

/// Inner mutable state.
#[derive(Debug, Default)]
struct Collections {
    /// Stored merchants, products not joined.
    merchants: Vec<Merchant>,
    /// Stored products.
    products: Vec<Product>,
    /// Highest merchant ID ever stored.
    last_merchant_id: Option<MerchantId>,
    /// Highest product ID ever stored.
    last_product_id: Option<ProductId>,
}

/// Sequential identifier operations the allocator needs.
trait SequentialId: Clone {
    /// Identifier with sequence number one.
    fn first() -> Self;
    /// Identifier following `self`.
    fn successor(&self) -> Result<Self>;
    /// Sequence number, checking the prefix.
    fn number(&self) -> Result<u64>;
    /// Checks a caller-supplied identifier: it must be in canonical
    /// zero-padded form and leave room for a successor.
    fn ensure_canonical(&self) -> Result<()>;
    /// Raw identifier text.
    fn raw(self) -> String;
}

/// Implements [`SequentialId`] by delegating to the inherent methods.
macro_rules! impl_sequential_id {
    ($($id:ty),+ $(,)?) => {
        $(
            impl SequentialId for $id {
                fn first() -> Self {
                    Self::from_sequence(1)
                }

                fn successor(&self) -> Result<Self> {
                    self.next()
                }

                fn number(&self) -> Result<u64> {
                    self.sequence()
                }

                fn ensure_canonical(&self) -> Result<()> {
                    let number = self.sequence()?;
                    if Self::from_sequence(number) != *self || number.checked_add(1).is_none() {
                        return Err(DashboardError::InvalidIdFormat(self.as_inner().to_owned()));
                    }
                    Ok(())
                }

                fn raw(self) -> String {
                    self.into_inner()
                }
            }
        )+
    };
}

impl_sequential_id!(MerchantId, ProductId);

/// Picks the identifier for a new entity and advances the high-water mark.
///
/// An explicit identifier must be well-formed and unused; otherwise the
/// successor of `last` is taken.
fn reserve_id<I, F>(last: &mut Option<I>, explicit: Option<I>, taken: F) -> Result<I>
where
    I: SequentialId,
    F: Fn(&I) -> bool,
{
    let id = match explicit {
        Some(id) => {
            id.ensure_canonical()?;
            if taken(&id) {
                return Err(DashboardError::DuplicateId(id.raw()));
            }
            id
        }
        None => match last.as_ref() {
            Some(previous) => previous.successor()?,
            None => I::first(),
        },
    };
    let advance = match last.as_ref() {
        Some(previous) => id.number()? > previous.number()?,
        None => true,
    };
    if advance {
        *last = Some(id.clone());
    }
    Ok(id)
}

impl Collections {
    /// Returns a copy of `merchant` with its products attached.
    fn joined(&self, merchant: &Merchant) -> Merchant {
        let mut merchant = merchant.clone();
        merchant.products = self
            .products
            .iter()
            .filter(|product| product.merchant_id == merchant.id)
            .cloned()
            .collect();
        merchant
    }

    /// Position of the merchant with `id`.
    fn merchant_index(&self, id: &MerchantId) -> Result<usize> {
        self.merchants
            .iter()
            .position(|merchant| merchant.id == *id)
            .ok_or_else(|| DashboardError::not_found("merchant", id))
    }

    /// Position of the product with `id`.
    fn product_index(&self, id: &ProductId) -> Result<usize> {
        self.products
            .iter()
            .position(|product| product.id == *id)
            .ok_or_else(|| DashboardError::not_found("product", id))
    }

    /// Every merchant with products joined.
    fn list_merchants(&self) -> Vec<Merchant> {
        self.merchants
            .iter()
            .map(|merchant| self.joined(merchant))
            .collect()
    }

    /// Validates, allocates an ID and appends.
    fn create_merchant(&mut self, mut input: NewMerchant) -> Result<Merchant> {
        input.validate()?;
        let merchants = &self.merchants;
        let id = reserve_id(&mut self.last_merchant_id, input.id.take(), |id| {
            merchants.iter().any(|merchant| merchant.id == *id)
        })?;
        tracing::debug!(id = %id, "creating merchant");
        let merchant = input.into_merchant(id);
        let created = self.joined(&merchant);
        self.merchants.push(merchant);
        Ok(created)
    }

    /// Lookup with products joined.
    fn read_merchant(&self, id: &MerchantId) -> Result<Merchant> {
        self.merchants
            .iter()
            .find(|merchant| merchant.id == *id)
            .map(|merchant| self.joined(merchant))
            .ok_or_else(|| DashboardError::not_found("merchant", id))
    }

    /// Merges a patch in place.
    fn update_merchant(&mut self, id: &MerchantId, patch: MerchantPatch) -> Result<Merchant> {
        patch.validate()?;
        let index = self.merchant_index(id)?;
        let merchant = self
            .merchants
            .get_mut(index)
            .ok_or_else(|| DashboardError::not_found("merchant", id))?;
        patch.apply_to(merchant);
        tracing::debug!(id = %id, "updated merchant");
        self.read_merchant(id)
    }

    /// Hard removal; products are kept.
    fn delete_merchant(&mut self, id: &MerchantId) -> Result<()> {
        let index = self.merchant_index(id)?;
        let removed = self.merchants.remove(index);
        tracing::debug!(id = %removed.id, "deleted merchant");
        Ok(())
    }

    /// Validates, checks the owner, allocates an ID and appends.
    fn create_product(&mut self, mut input: NewProduct) -> Result<Product> {
        input.validate()?;
        if !self
            .merchants
            .iter()
            .any(|merchant| merchant.id == input.merchant_id)
        {
            return Err(DashboardError::UnknownMerchant(input.merchant_id));
        }
        let products = &self.products;
        let id = reserve_id(&mut self.last_product_id, input.id.take(), |id| {
            products.iter().any(|product| product.id == *id)
        })?;
        tracing::debug!(id = %id, merchant_id = %input.merchant_id, "creating product");
        let product = input.into_product(id);
        self.products.push(product.clone());
        Ok(product)
    }

    /// Lookup by ID.
    fn read_product(&self, id: &ProductId) -> Result<Product> {
        self.products
            .iter()
            .find(|product| product.id == *id)
            .cloned()
            .ok_or_else(|| DashboardError::not_found("product", id))
    }

    /// Merges a patch in place.
    fn update_product(&mut self, id: &ProductId, patch: ProductPatch) -> Result<Product> {
        patch.validate()?;
        let index = self.product_index(id)?;
        let product = self
            .products
            .get_mut(index)
            .ok_or_else(|| DashboardError::not_found("product", id))?;
        patch.apply_to(product);
        tracing::debug!(id = %id, "updated product");
        Ok(product.clone())
    }

    /// Hard removal.
    fn delete_product(&mut self, id: &ProductId) -> Result<()> {
        let index = self.product_index(id)?;
        let removed = self.products.remove(index);
        tracing::debug!(id = %removed.id, "deleted product");
        Ok(())
    }
}

/// Demo catalogue: two merchants and two products of the first one.
fn demo_collections() -> Collections {
    let amazon = MerchantId::from_sequence(1);
    let merchants = vec![
        Merchant {
            id: amazon.clone(),
            name: "Amazon".to_owned(),
            logo_url: "https://www.amazon.com/logo".to_owned(),
            url: "https://www.amazon.com/checkout".to_owned(),
            description: String::new(),
            best_offer_amount: "0".to_owned(),
            best_offer_type: OfferType::Amount,
            status: Status::Active,
            products: Vec::new(),
        },
        Merchant {
            id: MerchantId::from_sequence(2),
            name: "Flipkart".to_owned(),
            logo_url: "https://www.flipkart.com/logo".to_owned(),
            url: "https://www.flipkart.com/checkout".to_owned(),
            description: String::new(),
            best_offer_amount: "0".to_owned(),
            best_offer_type: OfferType::Amount,
            status: Status::Active,
            products: Vec::new(),
        },
    ];
    let parameters = |material: &str, colour: &str| {
        IndexMap::from([
            ("Material".to_owned(), material.to_owned()),
            ("Colour".to_owned(), colour.to_owned()),
        ])
    };
    let products = vec![
        Product {
            parameters: parameters("Leather", "Red"),
            ..NewProduct::new(
                amazon.clone(),
                "Lovely Red Shoes",
                "Really lovely red leather shoes",
                15_000.0,
            )
            .into_product(ProductId::from_sequence(1))
        },
        Product {
            parameters: parameters("Denim", "Blue"),
            ..NewProduct::new(
                amazon,
                "Blue Denim Jeans",
                "Comfortable blue denim jeans",
                2_500.0,
            )
            .into_product(ProductId::from_sequence(2))
        },
    ];
    Collections {
        last_merchant_id: merchants.last().map(|merchant| merchant.id.clone()),
        last_product_id: products.last().map(|product| product.id.clone()),
        merchants,
        products,
    }
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the demo catalogue (Amazon and Flipkart,
    /// plus two Amazon products).
    #[inline]
    #[must_use]
    pub fn with_demo_data() -> Self {
        Self {
            inner: Mutex::new(demo_collections()),
        }
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut inner))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &PoisonError<T>) -> DashboardError {
    DashboardError::Storage(err.to_string().into())
}

// ── BlockingBackend implementation ──────────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingBackend for InMemoryStore {
    #[inline]
    fn list_merchants(&self) -> Result<Vec<Merchant>> {
        self.with_lock(|inner| inner.list_merchants())
    }

    #[inline]
    fn create_merchant(&self, input: NewMerchant) -> Result<Merchant> {
        self.with_lock(|inner| inner.create_merchant(input))?
    }

    #[inline]
    fn read_merchant(&self, id: &MerchantId) -> Result<Merchant> {
        self.with_lock(|inner| inner.read_merchant(id))?
    }

    #[inline]
    fn update_merchant(&self, id: &MerchantId, patch: MerchantPatch) -> Result<Merchant> {
        self.with_lock(|inner| inner.update_merchant(id, patch))?
    }

    #[inline]
    fn delete_merchant(&self, id: &MerchantId) -> Result<()> {
        self.with_lock(|inner| inner.delete_merchant(id))?
    }

    #[inline]
    fn list_products(&self) -> Result<Vec<Product>> {
        self.with_lock(|inner| inner.products.clone())
    }

    #[inline]
    fn create_product(&self, input: NewProduct) -> Result<Product> {
        self.with_lock(|inner| inner.create_product(input))?
    }

    #[inline]
    fn read_product(&self, id: &ProductId) -> Result<Product> {
        self.with_lock(|inner| inner.read_product(id))?
    }

    #[inline]
    fn update_product(&self, id: &ProductId, patch: ProductPatch) -> Result<Product> {
        self.with_lock(|inner| inner.update_product(id, patch))?
    }

    #[inline]
    fn delete_product(&self, id: &ProductId) -> Result<()> {
        self.with_lock(|inner| inner.delete_product(id))?
    }
}

// ── Backend (async) implementation ──────────────────────────────────────

#[cfg(feature = "async")]
impl super::Backend for InMemoryStore {
    #[inline]
    fn list_merchants(&self) -> impl Future<Output = Result<Vec<Merchant>>> + Send {
        future::ready(self.with_lock(|inner| inner.list_merchants()))
    }

    #[inline]
    fn create_merchant(&self, input: NewMerchant) -> impl Future<Output = Result<Merchant>> + Send {
        future::ready(self.with_lock(|inner| inner.create_merchant(input)).and_then(|r| r))
    }

    #[inline]
    fn read_merchant(&self, id: &MerchantId) -> impl Future<Output = Result<Merchant>> + Send {
        future::ready(self.with_lock(|inner| inner.read_merchant(id)).and_then(|r| r))
    }

    #[inline]
    fn update_merchant(
        &self,
        id: &MerchantId,
        patch: MerchantPatch,
    ) -> impl Future<Output = Result<Merchant>> + Send {
        future::ready(
            self.with_lock(|inner| inner.update_merchant(id, patch))
                .and_then(|r| r),
        )
    }

    #[inline]
    fn delete_merchant(&self, id: &MerchantId) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.with_lock(|inner| inner.delete_merchant(id)).and_then(|r| r))
    }

    #[inline]
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send {
        future::ready(self.with_lock(|inner| inner.products.clone()))
    }

    #[inline]
    fn create_product(&self, input: NewProduct) -> impl Future<Output = Result<Product>> + Send {
        future::ready(self.with_lock(|inner| inner.create_product(input)).and_then(|r| r))
    }

    #[inline]
    fn read_product(&self, id: &ProductId) -> impl Future<Output = Result<Product>> + Send {
        future::ready(self.with_lock(|inner| inner.read_product(id)).and_then(|r| r))
    }

    #[inline]
    fn update_product(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> impl Future<Output = Result<Product>> + Send {
        future::ready(
            self.with_lock(|inner| inner.update_product(id, patch))
                .and_then(|r| r),
        )
    }

    #[inline]
    fn delete_product(&self, id: &ProductId) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.with_lock(|inner| inner.delete_product(id)).and_then(|r| r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoes(merchant: &str) -> NewProduct {
        NewProduct::new(
            MerchantId::from(merchant),
            "Lovely Red Shoes",
            "Really lovely red leather shoes",
            15_000.0,
        )
    }

    fn acme() -> NewMerchant {
        NewMerchant::new("Acme", "https://acme.test/logo.png", "https://acme.test")
    }

    // ── Blocking tests ─────────────────────────────────────────────────

    #[cfg(feature = "blocking")]
    mod blocking {
        use super::*;
        use crate::backend::BlockingBackend;

        #[test]
        fn first_create_gets_first_id() {
            let store = InMemoryStore::new();
            let merchant = store.create_merchant(acme()).unwrap();
            assert_eq!(merchant.id, MerchantId::from("M000001"));
            let product = store.create_product(shoes("M000001")).unwrap();
            assert_eq!(product.id, ProductId::from("P000001"));
        }

        #[test]
        fn ids_are_sequential() {
            let store = InMemoryStore::new();
            let first = store.create_merchant(acme()).unwrap();
            let second = store.create_merchant(acme()).unwrap();
            assert_eq!(first.id.as_inner(), "M000001");
            assert_eq!(second.id.as_inner(), "M000002");
        }

        #[test]
        fn ids_are_not_reused_after_delete() {
            let store = InMemoryStore::new();
            let _first = store.create_merchant(acme()).unwrap();
            let second = store.create_merchant(acme()).unwrap();
            store.delete_merchant(&second.id).unwrap();
            let third = store.create_merchant(acme()).unwrap();
            assert_eq!(third.id.as_inner(), "M000003");
        }

        #[test]
        fn explicit_id_moves_high_water_mark() {
            let store = InMemoryStore::new();
            let input = NewMerchant {
                id: Some(MerchantId::from("M000041")),
                ..acme()
            };
            let _explicit = store.create_merchant(input).unwrap();
            let next = store.create_merchant(acme()).unwrap();
            assert_eq!(next.id.as_inner(), "M000042");
        }

        #[test]
        fn duplicate_explicit_id_is_rejected() {
            let store = InMemoryStore::with_demo_data();
            let input = NewMerchant {
                id: Some(MerchantId::from("M000001")),
                ..acme()
            };
            assert!(matches!(
                store.create_merchant(input),
                Err(DashboardError::DuplicateId(id)) if id == "M000001"
            ));
        }

        #[test]
        fn malformed_explicit_id_is_rejected() {
            let store = InMemoryStore::new();
            let input = NewMerchant {
                id: Some(MerchantId::from("Mxyz")),
                ..acme()
            };
            assert!(matches!(
                store.create_merchant(input),
                Err(DashboardError::InvalidIdFormat(_))
            ));
            let input = NewMerchant {
                id: Some(MerchantId::from("P000001")),
                ..acme()
            };
            assert!(matches!(
                store.create_merchant(input),
                Err(DashboardError::InvalidIdFormat(_))
            ));
        }

        #[test]
        fn non_canonical_explicit_id_is_rejected() {
            let store = InMemoryStore::new();
            let _first = store.create_merchant(acme()).unwrap();
            for raw in ["M1", "M0000001", "M00001"] {
                let input = NewMerchant {
                    id: Some(MerchantId::from(raw)),
                    ..acme()
                };
                assert!(matches!(
                    store.create_merchant(input),
                    Err(DashboardError::InvalidIdFormat(id)) if id == raw
                ));
            }
            assert_eq!(store.list_merchants().unwrap().len(), 1);
        }

        #[test]
        fn explicit_id_without_successor_is_rejected() {
            let store = InMemoryStore::new();
            let input = NewMerchant {
                id: Some(MerchantId::from("M18446744073709551615")),
                ..acme()
            };
            assert!(matches!(
                store.create_merchant(input),
                Err(DashboardError::InvalidIdFormat(_))
            ));
            let next = store.create_merchant(acme()).unwrap();
            assert_eq!(next.id.as_inner(), "M000001");

            let input = NewProduct {
                id: Some(ProductId::from("P18446744073709551615")),
                ..shoes("M000001")
            };
            assert!(store.create_product(input).is_err());
            let product = store.create_product(shoes("M000001")).unwrap();
            assert_eq!(product.id.as_inner(), "P000001");
        }

        #[test]
        fn explicit_id_past_six_digits_is_accepted() {
            let store = InMemoryStore::new();
            let input = NewMerchant {
                id: Some(MerchantId::from("M1000000")),
                ..acme()
            };
            let _wide = store.create_merchant(input).unwrap();
            let next = store.create_merchant(acme()).unwrap();
            assert_eq!(next.id.as_inner(), "M1000001");
        }

        #[test]
        fn missing_fields_leave_store_untouched() {
            let store = InMemoryStore::new();
            let input = NewMerchant::new("Acme", "https://acme.test/logo.png", "");
            assert!(matches!(
                store.create_merchant(input),
                Err(DashboardError::MissingFields(fields)) if fields == vec!["merchantUrl"]
            ));
            assert!(store.list_merchants().unwrap().is_empty());
            let created = store.create_merchant(acme()).unwrap();
            assert_eq!(created.id.as_inner(), "M000001");
        }

        #[test]
        fn read_after_create_round_trips() {
            let store = InMemoryStore::new();
            let created = store.create_merchant(acme()).unwrap();
            let read = store.read_merchant(&created.id).unwrap();
            assert_eq!(read, created);
            assert_eq!(store.read_merchant(&created.id).unwrap(), read);
        }

        #[test]
        fn delete_then_read_is_not_found() {
            let store = InMemoryStore::with_demo_data();
            let id = ProductId::from("P000002");
            store.delete_product(&id).unwrap();
            assert!(matches!(
                store.read_product(&id),
                Err(DashboardError::NotFound { entity: "product", .. })
            ));
            assert!(matches!(
                store.delete_product(&id),
                Err(DashboardError::NotFound { .. })
            ));
        }

        #[test]
        fn delete_merchant_does_not_cascade() {
            let store = InMemoryStore::with_demo_data();
            store.delete_merchant(&MerchantId::from("M000001")).unwrap();
            assert_eq!(store.list_merchants().unwrap().len(), 1);
            assert_eq!(store.list_products().unwrap().len(), 2);
        }

        #[test]
        fn product_requires_existing_merchant() {
            let store = InMemoryStore::with_demo_data();
            assert!(matches!(
                store.create_product(shoes("M000099")),
                Err(DashboardError::UnknownMerchant(id)) if id.as_inner() == "M000099"
            ));
        }

        #[test]
        fn product_price_string_is_stored_as_number() {
            let store = InMemoryStore::with_demo_data();
            let input: NewProduct = serde_json::from_str(
                r#"{
                    "merchant_id": "M000002",
                    "merchantProductName": "Sneakers",
                    "merchantProductDescription": "White sneakers",
                    "merchantProductPrice": "15000"
                }"#,
            )
            .unwrap();
            let product = store.create_product(input).unwrap();
            assert_eq!(product.id.as_inner(), "P000003");
            assert!((product.price - 15_000.0).abs() < f64::EPSILON);
        }

        #[test]
        fn merchant_read_joins_products() {
            let store = InMemoryStore::with_demo_data();
            let amazon = store.read_merchant(&MerchantId::from("M000001")).unwrap();
            let names: Vec<&str> = amazon.products.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["Lovely Red Shoes", "Blue Denim Jeans"]);
            let flipkart = store.read_merchant(&MerchantId::from("M000002")).unwrap();
            assert!(flipkart.products.is_empty());
        }

        #[test]
        fn update_merges_partial_fields() {
            let store = InMemoryStore::with_demo_data();
            let id = ProductId::from("P000001");
            let patch = ProductPatch {
                price: Some(12_000.0),
                ..ProductPatch::default()
            };
            let updated = store.update_product(&id, patch).unwrap();
            assert!((updated.price - 12_000.0).abs() < f64::EPSILON);
            assert_eq!(updated.name, "Lovely Red Shoes");
            assert_eq!(store.read_product(&id).unwrap(), updated);
        }

        #[test]
        fn update_unknown_merchant_is_not_found() {
            let store = InMemoryStore::new();
            let result = store.update_merchant(&MerchantId::from("M000001"), MerchantPatch::default());
            assert!(matches!(result, Err(DashboardError::NotFound { entity: "merchant", .. })));
        }

        #[test]
        fn list_preserves_insertion_order() {
            let store = InMemoryStore::with_demo_data();
            let names: Vec<String> = store
                .list_merchants()
                .unwrap()
                .into_iter()
                .map(|merchant| merchant.name)
                .collect();
            assert_eq!(names, vec!["Amazon", "Flipkart"]);
        }
    }

    // ── Async tests ────────────────────────────────────────────────────

    #[cfg(feature = "async")]
    mod async_tests {
        use super::*;
        use crate::backend::Backend;

        #[tokio::test]
        async fn create_read_delete() {
            let store = InMemoryStore::new();
            let merchant = Backend::create_merchant(&store, acme()).await.unwrap();
            assert_eq!(merchant.id.as_inner(), "M000001");
            let read = Backend::read_merchant(&store, &merchant.id).await.unwrap();
            assert_eq!(read.name, "Acme");
            Backend::delete_merchant(&store, &merchant.id).await.unwrap();
            assert!(Backend::list_merchants(&store).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn demo_data_is_seeded() {
            let store = InMemoryStore::with_demo_data();
            assert_eq!(Backend::list_merchants(&store).await.unwrap().len(), 2);
            let products = Backend::list_products(&store).await.unwrap();
            assert_eq!(products.len(), 2);
            assert_eq!(
                products.first().and_then(|p| p.parameters.get("Material")).map(String::as_str),
                Some("Leather")
            );
        }

        #[tokio::test]
        async fn concurrent_creates_get_distinct_ids() {
            let store = alloc::sync::Arc::new(InMemoryStore::new());
            let mut handles = Vec::new();
            for _ in 0..20 {
                let store = alloc::sync::Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    Backend::create_merchant(&*store, acme()).await.unwrap().id
                }));
            }
            let mut ids = Vec::new();
            for handle in handles {
                ids.push(handle.await.unwrap());
            }
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 20);
            assert_eq!(ids.last().map(MerchantId::as_inner), Some("M000020"));
        }
    }
}
