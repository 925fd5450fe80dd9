//! Supported destination countries

use crate::client::dispatcher::{Dispatcher, API_PREFIX};
use crate::domain::Country;
use crate::error::PwintyResult;

#[derive(Debug, Clone, Copy)]
pub struct Countries<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Countries<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Countries { dispatcher }
    }

    /// Every country the service ships to. Not paginated.
    pub async fn list(&self) -> PwintyResult<Vec<Country>> {
        self.dispatcher.get(&format!("{}/countries", API_PREFIX)).await
    }
}
