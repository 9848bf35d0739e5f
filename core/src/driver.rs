//! Blocking driver that runs session operations through a `Transport`.
//!
//! Each call performs the full interaction: execute the request, apply the
//! outcome, and after a successful mutation refetch the list. A failed
//! follow-up refresh does not undo the mutation; it is logged and the list
//! keeps its previous contents.

use tracing::debug;

use crate::client::ProductClient;
use crate::error::NetworkError;
use crate::session::{Applied, Pending, Session};
use crate::transport::{ProductApi, Transport};
use crate::types::{Product, ProductId};

#[derive(Debug)]
pub struct Driver<T> {
    api: ProductApi<T>,
    session: Session,
}

impl<T: Transport> Driver<T> {
    pub fn new(client: ProductClient, transport: T) -> Self {
        Self {
            api: ProductApi::new(client, transport),
            session: Session::new(),
        }
    }

    pub fn api(&self) -> &ProductApi<T> {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Form edits go straight to the session; only remote operations need
    /// the driver.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Initial load of the screen.
    pub fn mount(&mut self) -> Result<usize, NetworkError> {
        self.refresh()
    }

    pub fn refresh(&mut self) -> Result<usize, NetworkError> {
        let pending = self.session.refresh_request(self.api.client());
        self.run(pending)?;
        Ok(self.session.products().len())
    }

    /// Create or update, depending on the form's mode.
    ///
    /// Success is decided by the status alone. The saved record is `None`
    /// when the server acknowledged the write without a readable body.
    pub fn submit(&mut self) -> Result<Option<Product>, NetworkError> {
        let pending = self.session.submit_request(self.api.client())?;
        Ok(self.run(pending)?.into_saved())
    }

    pub fn delete(&mut self, id: &ProductId) -> Result<(), NetworkError> {
        let pending = self.session.delete_request(self.api.client(), id);
        self.run(pending).map(|_| ())
    }

    fn run(&mut self, pending: Pending) -> Result<Applied, NetworkError> {
        let Pending { operation, request } = pending;
        debug!(op = %operation, method = %request.method, path = %request.path, "sending request");
        let outcome = self.api.transport().execute(request);
        let applied = self.session.apply(self.api.client(), &operation, outcome)?;
        if applied.needs_refresh() {
            // Failure is logged by the session.
            let _ = self.refresh();
        }
        Ok(applied)
    }
}
