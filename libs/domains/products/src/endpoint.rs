//! Request descriptors for the catalog transport.
//!
//! Descriptors are plain data; providers decide how (and whether) to turn
//! them into I/O.

use http::{HeaderMap, Method};
use strum::IntoStaticStr;

use crate::models::{DetailRequest, ListRequest};

/// Description of a request target, independent of the transport
pub trait Endpoint: Send + Sync {
    fn base_url(&self) -> &str;

    fn path(&self) -> String;

    fn method(&self) -> Method;

    /// Encoded request body, if the endpoint carries one
    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error>;

    fn headers(&self) -> HeaderMap;

    /// `base_url` joined with `path`
    fn url(&self) -> String {
        format!("{}{}", self.base_url(), self.path())
    }
}

/// The two catalog requests
#[derive(Debug, Clone, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProductEndpoint {
    ListProducts(ListRequest),
    ProductDetail(DetailRequest),
}

impl ProductEndpoint {
    pub fn list() -> Self {
        ProductEndpoint::ListProducts(ListRequest::default())
    }

    pub fn detail(id: impl Into<String>) -> Self {
        ProductEndpoint::ProductDetail(DetailRequest::new(id))
    }

    /// Short name for log fields
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl Endpoint for ProductEndpoint {
    fn base_url(&self) -> &str {
        ""
    }

    // The detail path is the bare id; there is no real detail route yet.
    fn path(&self) -> String {
        match self {
            ProductEndpoint::ListProducts(_) => "/home".to_string(),
            ProductEndpoint::ProductDetail(request) => request.id.clone(),
        }
    }

    fn method(&self) -> Method {
        match self {
            ProductEndpoint::ListProducts(_) | ProductEndpoint::ProductDetail(_) => Method::GET,
        }
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        let value = match self {
            ProductEndpoint::ListProducts(request) => serde_json::to_value(request)?,
            ProductEndpoint::ProductDetail(request) => serde_json::to_value(request)?,
        };
        Ok(Some(value))
    }

    fn headers(&self) -> HeaderMap {
        HeaderMap::new()
    }
}
