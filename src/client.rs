//! HTTP client for the merchant dashboard backend.
//!
//! Provides both async and blocking client variants behind feature flags.
//! Each client implements the matching backend trait, so it can be used
//! anywhere an [`crate::backend::InMemoryStore`] can.

/// Base URL used when none is configured.
#[cfg(any(feature = "async", feature = "blocking"))]
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Value of the `Cache-Control` header sent with every request.
#[cfg(any(feature = "async", feature = "blocking"))]
const NO_STORE: &str = "no-store";

/// Parses and checks a base URL.
#[cfg(any(feature = "async", feature = "blocking"))]
fn parse_base_url(raw: &str) -> crate::error::Result<url::Url> {
    let url = url::Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithoutBase.into());
    }
    Ok(url)
}

/// Generates a dashboard client (async or blocking) with builder, backend
/// implementation, and tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        backend_trait: $backend:path,
        http_type: $http_type:ty,
        request_type: $req_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
        $(send_bound: $send_bound:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Base URL override.
            base_url: Option<String>,
        }

        impl $builder {
            /// Overrides the base URL (e.g. the `SERVER_HOST` setting or a
            /// mock server in tests).
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`DashboardError::InvalidBaseUrl`] if the base URL does
            /// not parse or cannot carry a path.
            /// Returns [`DashboardError::Http`] if the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let raw = self
                    .base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
                let base_url = parse_base_url(&raw)?;
                tracing::debug!(base_url = %base_url, "building client");
                let http = <$http_type>::builder().build()?;

                Ok($client { http, base_url })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug, Clone)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// Backend base URL.
            base_url: Url,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder { base_url: None }
            }

            /// Returns the base URL requests are sent to.
            #[inline]
            #[must_use]
            pub const fn base_url(&self) -> &Url {
                &self.base_url
            }

            /// Appends percent-encoded path segments to the base URL.
            fn endpoint(&self, segments: &[&str]) -> Result<Url> {
                let mut url = self.base_url.clone();
                {
                    let mut path = url
                        .path_segments_mut()
                        .map_err(|()| url::ParseError::RelativeUrlWithoutBase)?;
                    let _path = path.pop_if_empty().extend(segments);
                }
                Ok(url)
            }

            /// Sends a request and turns non-success statuses into
            /// [`DashboardError::Api`].
            #[tracing::instrument(skip_all)]
            $($async_kw)? fn execute(&self, request: $req_type) -> Result<$resp_type> {
                let response: $resp_type = request
                    .header(CACHE_CONTROL, NO_STORE)
                    .send()
                    $( .$await_ext )?
                    ?;

                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    Ok(response)
                } else {
                    let message = response
                        .text()
                        $( .$await_ext )?
                        .unwrap_or_else(|_| "unknown error".to_owned());
                    tracing::debug!(status = status.as_u16(), message = %message, "API error");
                    Err(DashboardError::Api {
                        status: status.as_u16(),
                        message,
                    })
                }
            }

            /// Reads a success response body as JSON.
            $($async_kw)? fn parse<Resp: serde::de::DeserializeOwned>(
                response: $resp_type,
            ) -> Result<Resp> {
                let body = response.text() $( .$await_ext )? ?;
                tracing::trace!(body_len = body.len(), "parsing response body");
                serde_json::from_str(&body).map_err(DashboardError::from)
            }

            /// Sends a GET request and deserializes the response.
            #[tracing::instrument(skip_all, fields(path = ?segments))]
            $($async_kw)? fn get_json<Resp: serde::de::DeserializeOwned>(
                &self,
                segments: &[&str],
            ) -> Result<Resp> {
                let url = self.endpoint(segments)?;
                tracing::trace!(url = %url, "sending GET request");
                let response = self.execute(self.http.get(url)) $( .$await_ext )? ?;
                Self::parse(response) $( .$await_ext )?
            }

            /// Sends a JSON body with `method` and deserializes the response.
            #[tracing::instrument(skip_all, fields(path = ?segments))]
            $($async_kw)? fn send_json<
                Req: serde::Serialize $(+ $send_bound)?,
                Resp: serde::de::DeserializeOwned,
            >(
                &self,
                method: Method,
                segments: &[&str],
                body: &Req,
            ) -> Result<Resp> {
                let url = self.endpoint(segments)?;
                tracing::trace!(url = %url, method = %method, "sending JSON request");
                let request = self
                    .http
                    .request(method, url)
                    .header(CONTENT_TYPE, "application/json")
                    .json(body);
                let response = self.execute(request) $( .$await_ext )? ?;
                Self::parse(response) $( .$await_ext )?
            }

            /// Sends a DELETE request, ignoring the response body.
            #[tracing::instrument(skip_all, fields(path = ?segments))]
            $($async_kw)? fn send_delete(&self, segments: &[&str]) -> Result<()> {
                let url = self.endpoint(segments)?;
                tracing::trace!(url = %url, "sending DELETE request");
                let _response = self.execute(self.http.delete(url)) $( .$await_ext )? ?;
                Ok(())
            }
        }

        impl $backend for $client {
            #[tracing::instrument(skip_all)]
            $($async_kw)? fn list_merchants(&self) -> Result<Vec<Merchant>> {
                tracing::debug!("listing merchants");
                self.get_json(&["merchant", "list"]) $( .$await_ext )?
            }

            #[tracing::instrument(skip_all)]
            $($async_kw)? fn create_merchant(&self, input: NewMerchant) -> Result<Merchant> {
                tracing::debug!("creating merchant");
                self.send_json(Method::POST, &["merchant", "create"], &input) $( .$await_ext )?
            }

            #[tracing::instrument(skip_all, fields(id = %id))]
            $($async_kw)? fn read_merchant(&self, id: &MerchantId) -> Result<Merchant> {
                tracing::debug!("reading merchant");
                self.get_json(&["merchant", "read", id.as_inner()]) $( .$await_ext )?
            }

            #[tracing::instrument(skip_all, fields(id = %id))]
            $($async_kw)? fn update_merchant(
                &self,
                id: &MerchantId,
                patch: MerchantPatch,
            ) -> Result<Merchant> {
                tracing::debug!("updating merchant");
                self.send_json(Method::PUT, &["merchant", "update", id.as_inner()], &patch)
                    $( .$await_ext )?
            }

            #[tracing::instrument(skip_all, fields(id = %id))]
            $($async_kw)? fn delete_merchant(&self, id: &MerchantId) -> Result<()> {
                tracing::debug!("deleting merchant");
                self.send_delete(&["merchant", "delete", id.as_inner()]) $( .$await_ext )?
            }

            #[tracing::instrument(skip_all)]
            $($async_kw)? fn list_products(&self) -> Result<Vec<Product>> {
                tracing::debug!("listing products");
                self.get_json(&["product", "list"]) $( .$await_ext )?
            }

            #[tracing::instrument(skip_all)]
            $($async_kw)? fn create_product(&self, input: NewProduct) -> Result<Product> {
                tracing::debug!("creating product");
                self.send_json(Method::POST, &["product", "create"], &input) $( .$await_ext )?
            }

            #[tracing::instrument(skip_all, fields(id = %id))]
            $($async_kw)? fn read_product(&self, id: &ProductId) -> Result<Product> {
                tracing::debug!("reading product");
                self.get_json(&["product", "read", id.as_inner()]) $( .$await_ext )?
            }

            #[tracing::instrument(skip_all, fields(id = %id))]
            $($async_kw)? fn update_product(
                &self,
                id: &ProductId,
                patch: ProductPatch,
            ) -> Result<Product> {
                tracing::debug!("updating product");
                self.send_json(Method::PUT, &["product", "update", id.as_inner()], &patch)
                    $( .$await_ext )?
            }

            #[tracing::instrument(skip_all, fields(id = %id))]
            $($async_kw)? fn delete_product(&self, id: &ProductId) -> Result<()> {
                tracing::debug!("deleting product");
                self.send_delete(&["product", "delete", id.as_inner()]) $( .$await_ext )?
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the dashboard backend.

    use reqwest::Method;
    use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
    use url::Url;

    use super::{DEFAULT_BASE_URL, NO_STORE, parse_base_url};
    use crate::error::{DashboardError, Result};
    use crate::models::{
        Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, Product, ProductId,
        ProductPatch,
    };

    define_client! {
        client_name: DashboardClient,
        builder_name: DashboardClientBuilder,
        backend_trait: crate::backend::Backend,
        http_type: reqwest::Client,
        request_type: reqwest::RequestBuilder,
        response_type: reqwest::Response,
        client_doc: "Async client for the dashboard backend.\n\nUse [`DashboardClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`DashboardClient`].",
        async_kw: async,
        await_kw: await,
        send_bound: Sync,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the dashboard backend.

    use reqwest::Method;
    use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
    use url::Url;

    use super::{DEFAULT_BASE_URL, NO_STORE, parse_base_url};
    use crate::error::{DashboardError, Result};
    use crate::models::{
        Merchant, MerchantId, MerchantPatch, NewMerchant, NewProduct, Product, ProductId,
        ProductPatch,
    };

    define_client! {
        client_name: DashboardBlockingClient,
        builder_name: DashboardBlockingClientBuilder,
        backend_trait: crate::backend::BlockingBackend,
        http_type: reqwest::blocking::Client,
        request_type: reqwest::blocking::RequestBuilder,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the dashboard backend.\n\nUse [`DashboardBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`DashboardBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{DashboardClient, DashboardClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{DashboardBlockingClient, DashboardBlockingClientBuilder};
