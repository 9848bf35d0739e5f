//! Client core for a single-screen product catalogue editor.
//!
//! # Overview
//! Keeps three pieces of state consistent across remote CRUD calls: the
//! product list, the draft in the form, and which product (if any) the form
//! is editing. Network I/O stays outside the crate (host-does-IO pattern):
//! the core builds `HttpRequest` values and parses `HttpResponse` values, and
//! a host either executes them itself or plugs in a [`Transport`].
//!
//! # Design
//! - `ProductClient` is stateless; it holds only `base_url`.
//! - `Session` owns the list and the form. Remote interactions are
//!   `*_request` / `apply` pairs, so an in-flight request is an explicit
//!   value rather than hidden state.
//! - The list is a cache: after every successful mutation it is refetched
//!   and replaced, never patched.
//! - Failures are logged through `tracing` and leave the session unchanged.
//! - `Driver` runs the pairs through a blocking `Transport` for Rust hosts.

pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod form;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::ProductClient;
pub use config::ClientConfig;
pub use driver::Driver;
pub use error::NetworkError;
pub use form::{Field, FormState, Mode, Submission};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{Applied, Operation, Pending, Session};
pub use transport::{ProductApi, Transport};
pub use types::{Draft, Product, ProductId};
