//! Stateless HTTP request builder and response parser for the products API.
//!
//! # Design
//! `ProductClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.
//!
//! Any 2xx status counts as success. Hosted mock APIs answer create with 201
//! and delete with 200 plus the removed record; the bundled mock server
//! answers delete with 204 and no body. Both are accepted.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::error::NetworkError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Draft, Product, ProductId};

/// Characters escaped when an id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const COLLECTION: &str = "products";

/// Synchronous, stateless client for the products API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductClient {
    base_url: String,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{COLLECTION}", self.base_url)
    }

    fn item_url(&self, id: &ProductId) -> String {
        let segment = utf8_percent_encode(id.as_str(), PATH_SEGMENT);
        format!("{}/{COLLECTION}/{segment}", self.base_url)
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, draft: &Draft) -> Result<HttpRequest, NetworkError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(encode(draft)?),
        })
    }

    pub fn build_update(&self, id: &ProductId, draft: &Draft) -> Result<HttpRequest, NetworkError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(id),
            headers: json_headers(),
            body: Some(encode(draft)?),
        })
    }

    pub fn build_delete(&self, id: &ProductId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Product>, NetworkError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Product, NetworkError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Product, NetworkError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Status-only check for a write. A 2xx means the server stored it,
    /// whatever the body holds.
    pub fn check_ack(&self, response: &HttpResponse) -> Result<(), NetworkError> {
        check_status(response)
    }

    /// The body of a delete acknowledgement is ignored.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), NetworkError> {
        check_status(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(draft: &Draft) -> Result<String, NetworkError> {
    serde_json::to_string(draft).map_err(|e| NetworkError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, NetworkError> {
    serde_json::from_str(body).map_err(|e| NetworkError::Decode(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), NetworkError> {
    if response.is_success() {
        return Ok(());
    }
    Err(NetworkError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
