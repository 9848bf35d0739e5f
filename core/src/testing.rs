//! In-memory stand-in for the products endpoint, used by unit tests.

use std::cell::RefCell;

use crate::error::NetworkError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Draft, Product, ProductId};

#[derive(Default)]
struct State {
    products: Vec<Product>,
    next_id: u32,
    failing: Vec<HttpMethod>,
    disconnected: bool,
    bare_acks: bool,
    requests: Vec<HttpRequest>,
}

/// Behaves like a MockAPI resource: 201 on create, 200 with the removed
/// record on delete, 404 for unknown ids.
#[derive(Default)]
pub(crate) struct FakeServer {
    state: RefCell<State>,
}

impl FakeServer {
    pub(crate) const BASE_URL: &'static str = "http://fake";

    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        let server = Self::new();
        {
            let mut state = server.state.borrow_mut();
            state.next_id = products.len() as u32;
            state.products = products;
        }
        server
    }

    /// Answer every request with this method with a 500 from now on.
    pub(crate) fn fail_on(&self, method: HttpMethod) {
        self.state.borrow_mut().failing.push(method);
    }

    /// Fail every request before it reaches the "server".
    pub(crate) fn disconnect(&self) {
        self.state.borrow_mut().disconnected = true;
    }

    /// Store writes as usual but answer them with an empty body.
    pub(crate) fn ack_without_body(&self) {
        self.state.borrow_mut().bare_acks = true;
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.borrow().requests.clone()
    }

    pub(crate) fn products(&self) -> Vec<Product> {
        self.state.borrow().products.clone()
    }
}

impl Transport for FakeServer {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        if state.disconnected {
            return Err(NetworkError::Transport("connection refused".to_string()));
        }
        if state.failing.contains(&request.method) {
            return Ok(HttpResponse::new(500, "unavailable"));
        }

        let collection = format!("{}/products", Self::BASE_URL);
        let Some(rest) = request.path.strip_prefix(&collection) else {
            return Ok(HttpResponse::new(404, ""));
        };
        let id = rest.strip_prefix('/').map(ProductId::from);

        let bare = state.bare_acks;
        let response = match (request.method, id) {
            (HttpMethod::Get, None) => json(200, &state.products),
            (HttpMethod::Post, None) => {
                let draft = read_draft(&request);
                state.next_id += 1;
                let product = stamp(ProductId::new(state.next_id.to_string()), draft);
                state.products.push(product.clone());
                if bare {
                    HttpResponse::new(201, "")
                } else {
                    json(201, &product)
                }
            }
            (HttpMethod::Put, Some(id)) => {
                let draft = read_draft(&request);
                match state.products.iter_mut().find(|p| p.id == id) {
                    Some(slot) => {
                        *slot = stamp(id, draft);
                        if bare {
                            HttpResponse::new(200, "")
                        } else {
                            json(200, &*slot)
                        }
                    }
                    None => HttpResponse::new(404, "\"Not found\""),
                }
            }
            (HttpMethod::Delete, Some(id)) => {
                match state.products.iter().position(|p| p.id == id) {
                    Some(index) => {
                        let removed = state.products.remove(index);
                        json(200, &removed)
                    }
                    None => HttpResponse::new(404, "\"Not found\""),
                }
            }
            _ => HttpResponse::new(405, ""),
        };
        Ok(response)
    }
}

fn read_draft(request: &HttpRequest) -> Draft {
    serde_json::from_str(request.body.as_deref().unwrap_or("{}")).unwrap_or_default()
}

fn stamp(id: ProductId, draft: Draft) -> Product {
    Product {
        id,
        name: draft.name,
        price: draft.price,
        description: draft.description,
    }
}

fn json<T: serde::Serialize + ?Sized>(status: u16, value: &T) -> HttpResponse {
    HttpResponse::new(status, serde_json::to_string(value).unwrap_or_default())
}
