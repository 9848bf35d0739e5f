//! The screen's state machine: the product list, the form, and the pending
//! operations that move between them.
//!
//! # Design
//! `Session` is a single-owner state struct. Every remote interaction is
//! split in two, matching the host-does-IO pattern of `ProductClient`:
//!
//! 1. `*_request` reads the current state and returns a [`Pending`]
//!    operation: the `HttpRequest` to execute plus the [`Operation`] it
//!    belongs to. The session is not modified.
//! 2. [`Session::apply`] takes the operation back together with the outcome
//!    of the round-trip and moves the state forward, or, on failure, logs
//!    and leaves every field exactly as it was.
//!
//! Several operations may be pending at once. Nothing orders them: the last
//! one applied decides the form reset and the list contents.
//!
//! The list is never edited locally. A successful create, update or delete
//! reports `Applied::needs_refresh`, and the caller follows up with a
//! refresh that replaces the list wholesale.

use std::fmt;

use tracing::{debug, info, warn};

use crate::client::ProductClient;
use crate::error::NetworkError;
use crate::form::{Field, FormState, Mode, Submission};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Draft, Product, ProductId};

/// A remote interaction, remembered while its request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Refresh,
    Create,
    Update(ProductId),
    Delete(ProductId),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Refresh => write!(f, "refresh"),
            Operation::Create => write!(f, "create"),
            Operation::Update(id) => write!(f, "update {id}"),
            Operation::Delete(id) => write!(f, "delete {id}"),
        }
    }
}

/// A request ready to be executed, tagged with the operation it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub operation: Operation,
    pub request: HttpRequest,
}

/// What a successfully applied operation did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The list was replaced; carries the new length.
    Refreshed(usize),
    /// A create or update went through and the form is back in create mode.
    /// Carries the record the server echoed, when it sent a readable one.
    Saved(Option<Product>),
    Deleted(ProductId),
}

impl Applied {
    /// Mutations invalidate the cached list.
    pub fn needs_refresh(&self) -> bool {
        !matches!(self, Applied::Refreshed(_))
    }

    /// The echoed record of a save; `None` for anything else.
    pub fn into_saved(self) -> Option<Product> {
        match self {
            Applied::Saved(product) => product,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    products: Vec<Product>,
    form: FormState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn draft(&self) -> &Draft {
        self.form.draft()
    }

    pub fn mode(&self) -> &Mode {
        self.form.mode()
    }

    pub fn selected_id(&self) -> Option<&ProductId> {
        self.form.selected_id()
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn begin_edit(&mut self, product: &Product) {
        debug!(id = %product.id, "editing product");
        self.form.begin_edit(product);
    }

    /// Select a product from the current list by id. Returns `false`, leaving
    /// the form alone, if the list has no such product.
    pub fn begin_edit_by_id(&mut self, id: &ProductId) -> bool {
        match self.products.iter().find(|p| &p.id == id) {
            Some(product) => {
                debug!(%id, "editing product");
                self.form.begin_edit(product);
                true
            }
            None => false,
        }
    }

    pub fn begin_create(&mut self) {
        self.form.begin_create();
    }

    pub fn refresh_request(&self, client: &ProductClient) -> Pending {
        Pending {
            operation: Operation::Refresh,
            request: client.build_list(),
        }
    }

    /// Build the create or update the current form calls for.
    pub fn submit_request(&self, client: &ProductClient) -> Result<Pending, NetworkError> {
        let built = match self.form.submission() {
            Submission::Create(draft) => client
                .build_create(&draft)
                .map(|request| (Operation::Create, request)),
            Submission::Update(id, draft) => client
                .build_update(&id, &draft)
                .map(|request| (Operation::Update(id), request)),
        };
        match built {
            Ok((operation, request)) => Ok(Pending { operation, request }),
            Err(err) => {
                warn!(error = %err, "could not build submit request");
                Err(err)
            }
        }
    }

    pub fn delete_request(&self, client: &ProductClient, id: &ProductId) -> Pending {
        Pending {
            operation: Operation::Delete(id.clone()),
            request: client.build_delete(id),
        }
    }

    /// Apply the outcome of a pending operation.
    ///
    /// On any failure the session is untouched and the error is logged and
    /// handed back; callers are free to ignore it.
    pub fn apply(
        &mut self,
        client: &ProductClient,
        operation: &Operation,
        outcome: Result<HttpResponse, NetworkError>,
    ) -> Result<Applied, NetworkError> {
        let applied = outcome.and_then(|response| self.absorb(client, operation, response));
        if let Err(err) = &applied {
            warn!(op = %operation, error = %err, "operation failed, state unchanged");
        }
        applied
    }

    fn absorb(
        &mut self,
        client: &ProductClient,
        operation: &Operation,
        response: HttpResponse,
    ) -> Result<Applied, NetworkError> {
        match operation {
            Operation::Refresh => {
                self.products = client.parse_list(response)?;
                debug!(count = self.products.len(), "product list replaced");
                Ok(Applied::Refreshed(self.products.len()))
            }
            Operation::Create => {
                client.check_ack(&response)?;
                let product = echoed(operation, client.parse_create(response));
                info!(id = ?product.as_ref().map(|p| p.id.as_str()), "product created");
                self.form.begin_create();
                Ok(Applied::Saved(product))
            }
            Operation::Update(id) => {
                client.check_ack(&response)?;
                let product = echoed(operation, client.parse_update(response));
                info!(%id, "product updated");
                self.form.begin_create();
                Ok(Applied::Saved(product))
            }
            Operation::Delete(id) => {
                client.parse_delete(response)?;
                info!(%id, "product deleted");
                // Editing a product that no longer exists would turn the next
                // submit into an update of a missing record.
                if self.form.selected_id() == Some(id) {
                    self.form.begin_create();
                }
                Ok(Applied::Deleted(id.clone()))
            }
        }
    }
}

/// The server already stored the write, so an unreadable echo only costs
/// the returned record.
fn echoed(operation: &Operation, parsed: Result<Product, NetworkError>) -> Option<Product> {
    match parsed {
        Ok(product) => Some(product),
        Err(err) => {
            warn!(op = %operation, error = %err, "write accepted, echoed record unreadable");
            None
        }
    }
}
