//! The I/O seam: a host-provided `Transport` and the remote resource
//! operations composed on top of it.

use crate::client::ProductClient;
use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Draft, Product, ProductId};

/// Executes one HTTP round-trip.
///
/// Implementations return `Ok` for every response the server produced,
/// including 4xx/5xx; status interpretation belongs to `ProductClient`.
/// `Err` is reserved for requests that never got an answer.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        (**self).execute(request)
    }
}

/// The four remote resource operations over a `Transport`.
#[derive(Debug, Clone)]
pub struct ProductApi<T> {
    client: ProductClient,
    transport: T,
}

impl<T: Transport> ProductApi<T> {
    pub fn new(client: ProductClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ProductClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list(&self) -> Result<Vec<Product>, NetworkError> {
        let response = self.transport.execute(self.client.build_list())?;
        self.client.parse_list(response)
    }

    pub fn create(&self, draft: &Draft) -> Result<Product, NetworkError> {
        let response = self.transport.execute(self.client.build_create(draft)?)?;
        self.client.parse_create(response)
    }

    pub fn update(&self, id: &ProductId, draft: &Draft) -> Result<Product, NetworkError> {
        let response = self.transport.execute(self.client.build_update(id, draft)?)?;
        self.client.parse_update(response)
    }

    pub fn delete(&self, id: &ProductId) -> Result<(), NetworkError> {
        let response = self.transport.execute(self.client.build_delete(id))?;
        self.client.parse_delete(response)
    }
}
